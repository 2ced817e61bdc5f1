//! Two-state line scanner for tabular CLI output.

/// Line scanner that skips preamble until a start marker, then emits data
/// rows until a stop marker.
///
/// The machine starts inactive. A line matching the start predicate flips
/// it active and is discarded; while active, a line matching the stop
/// predicate flips it back inactive and is discarded, and every other line
/// is emitted to the caller. The same instance can activate again on a
/// later start marker, which is how multi-table output is walked.
///
/// Never reaching the active state is not an error - the caller reads zero
/// emitted rows as "this dialect is absent, try the fallback".
pub struct LineScanner<S, E> {
    start: S,
    stop: E,
    active: bool,
}

impl<S, E> LineScanner<S, E>
where
    S: FnMut(&str) -> bool,
    E: FnMut(&str) -> bool,
{
    /// Create a scanner with the given start/stop predicates.
    pub fn new(start: S, stop: E) -> Self {
        Self {
            start,
            stop,
            active: false,
        }
    }

    /// Feed one line; returns the line when it is a data row.
    pub fn feed<'a>(&mut self, line: &'a str) -> Option<&'a str> {
        if self.active {
            if (self.stop)(line) {
                self.active = false;
                return None;
            }
            Some(line)
        } else {
            if (self.start)(line) {
                self.active = true;
            }
            None
        }
    }

    /// Whether the scanner is currently inside a table.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Separator row of a tabular block: dashes and nothing else.
pub fn is_separator_row(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(text: &str) -> Vec<&str> {
        let mut scanner = LineScanner::new(
            |line: &str| line.starts_with("Header"),
            |line: &str| line.trim().is_empty(),
        );
        text.lines().filter_map(|line| scanner.feed(line)).collect()
    }

    #[test]
    fn test_start_and_stop_lines_are_discarded() {
        let text = "preamble\nHeader a b\nrow 1\nrow 2\n\ntrailer";
        assert_eq!(rows(text), ["row 1", "row 2"]);
    }

    #[test]
    fn test_never_activates_yields_no_rows() {
        assert!(rows("no table\nhere at all").is_empty());
    }

    #[test]
    fn test_reactivates_on_second_start() {
        let text = "Header one\nrow 1\n\nHeader two\nrow 2";
        assert_eq!(rows(text), ["row 1", "row 2"]);
    }

    #[test]
    fn test_separator_rows() {
        assert!(is_separator_row("----------------"));
        assert!(is_separator_row("  ----  "));
        assert!(!is_separator_row(""));
        assert!(!is_separator_row("  "));
        assert!(!is_separator_row("--- 1 ---"));
        assert!(!is_separator_row("row with - dash"));
    }
}
