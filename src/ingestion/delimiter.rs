//! Field-separator sniffing over decoded sample text.
//!
//! Counts occurrences of common separators in the header line and prefers a
//! candidate whose per-line count is consistent across a few sample lines.
//! Falls back to comma when no candidate wins. Never fails for non-empty
//! input; the caller guarantees the text decoded under some encoding.

/// Separators considered, in tie-break preference order.
const CANDIDATES: [char; 4] = [',', '\t', '|', ';'];

/// How many lines (including the header) to sample for consistency.
const SAMPLE_LINES: usize = 5;

/// Sniff the field separator from decoded sample text.
pub fn detect_delimiter(sample: &str) -> u8 {
    let mut lines = sample.lines().take(SAMPLE_LINES);
    let Some(header) = lines.next() else {
        return b',';
    };
    let body: Vec<&str> = lines.filter(|l| !l.trim().is_empty()).collect();

    let mut best_consistent: Option<(char, usize)> = None;
    let mut best_any: Option<(char, usize)> = None;

    for cand in CANDIDATES {
        let count = header.matches(cand).count();
        if count == 0 {
            continue;
        }
        if best_any.is_none_or(|(_, n)| count > n) {
            best_any = Some((cand, count));
        }
        let consistent = body.iter().all(|line| line.matches(cand).count() == count);
        if consistent && best_consistent.is_none_or(|(_, n)| count > n) {
            best_consistent = Some((cand, count));
        }
    }

    best_consistent
        .or(best_any)
        .map(|(c, _)| c as u8)
        .unwrap_or(b',')
}
