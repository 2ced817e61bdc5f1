//! Elapsed-time phrase parsing.

const MINUTE_SECONDS: u64 = 60;
const HOUR_SECONDS: u64 = 3600;
const DAY_SECONDS: u64 = 24 * HOUR_SECONDS;
const WEEK_SECONDS: u64 = 7 * DAY_SECONDS;
const YEAR_SECONDS: u64 = 365 * DAY_SECONDS;

/// Unit words in match priority order; a clause is claimed by the first
/// word it contains.
const UNITS: [(&str, u64); 6] = [
    ("year", YEAR_SECONDS),
    ("week", WEEK_SECONDS),
    ("day", DAY_SECONDS),
    ("hour", HOUR_SECONDS),
    ("minute", MINUTE_SECONDS),
    ("second", 1),
];

/// Parse a free-text elapsed-time phrase into total seconds.
///
/// The phrase is a comma-separated sequence of `<integer> <unit>` clauses,
/// e.g. `0 years, 10 weeks, 2 days, 3 hours, 18 minutes, 42 seconds`.
/// Units absent from the input count as zero; a repeated unit keeps the
/// last clause's value. Clauses with no recognized unit word or a
/// non-numeric lead are ignored, which lets the same parser handle both
/// uptime phrases and link-flap phrases.
///
/// A year is 365 days, a week 7 days; no calendar adjustment.
pub fn parse_duration(text: &str) -> u64 {
    let mut slots = [0u64; UNITS.len()];

    for clause in text.split(',') {
        let clause = clause.trim();
        let Some(index) = UNITS.iter().position(|(unit, _)| clause.contains(unit)) else {
            continue;
        };
        if let Some(value) = clause
            .split_whitespace()
            .next()
            .and_then(|token| token.parse::<u64>().ok())
        {
            slots[index] = value;
        }
    }

    slots
        .iter()
        .zip(UNITS.iter())
        .map(|(value, (_, weight))| value * weight)
        .sum()
}
