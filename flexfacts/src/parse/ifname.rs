//! Interface-name abbreviation.

/// Verbose-prefix to abbreviation rules, tried top to bottom.
///
/// Ordering is part of the contract: a rule whose prefix extends an
/// earlier rule's prefix would never fire, so extensions must come first
/// (`InLoopBack` before `LoopBack`). `test_no_rule_is_shadowed` keeps the
/// table honest when rules are added.
const RULES: [(&str, &str); 17] = [
    ("Ten-GigabitEthernet", "XGE"),
    ("FortyGigE", "FGE"),
    ("M-GigabitEthernet", "MGE"),
    ("Bridge-Aggregation", "BAGG"),
    ("HundredGigE", "HGE"),
    ("InLoopBack", "InLoop"),
    ("LoopBack", "Loop"),
    ("Multicast Tunnel", "MTunnel"),
    ("Register-Tunnel", "REG"),
    ("Route-Aggregation", "RAGG"),
    ("SAN-Aggregation", "SAGG"),
    ("S-Channel", "S-Ch"),
    ("Schannel-Aggregation", "SCH-AGG"),
    ("Schannel-Bundle", "SCH-B"),
    ("Tunnel", "Tun"),
    ("Vsi-interface", "Vsi"),
    ("Vlan-interface", "Vlan-int"),
];

/// Rewrite a verbose interface name into its abbreviated canonical form.
///
/// At most one substitution is applied: the first rule whose prefix matches
/// (case-sensitive) replaces that prefix and the rest of the name is kept
/// untouched. Names matching no rule pass through unchanged, so already
/// abbreviated names are stable under repeated canonicalization.
pub fn canonicalize(name: &str) -> String {
    for (prefix, replacement) in RULES {
        if let Some(rest) = name.strip_prefix(prefix) {
            return format!("{replacement}{rest}");
        }
    }
    name.to_string()
}
