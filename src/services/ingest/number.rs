//! Locale-tolerant amount parsing.
//!
//! Sheets mix `1.234,56` (comma decimal) with `1234.56` and `1.234` (period
//! thousands). Anything that cannot be read collapses to zero.

use crate::services::excel::Cell;

pub fn normalize(cell: &Cell) -> f64 {
    match cell {
        Cell::Number(n) if n.is_finite() => *n,
        Cell::Number(_) | Cell::Empty => 0.0,
        Cell::Text(s) => normalize_str(s),
    }
}

pub fn normalize_str(raw: &str) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("null") {
        return 0.0;
    }

    let mut s: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    if s.is_empty() {
        return 0.0;
    }

    if s.contains(',') {
        s = s.replace('.', "").replacen(',', ".", 1);
    } else {
        let parts: Vec<&str> = s.split('.').collect();
        // 3-digit trailing group reads as thousands; misreads 3-place decimals.
        if parts.len() > 1 && parts.last().map_or(false, |p| p.len() == 3) {
            s = s.replace('.', "");
        }
    }

    let n = parse_leading_decimal(&s);
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// Reads the longest `digits[.digits]` prefix, ignoring whatever follows.
fn parse_leading_decimal(s: &str) -> f64 {
    let int_len = s.bytes().take_while(u8::is_ascii_digit).count();
    let (int_part, rest) = s.split_at(int_len);

    let frac_part = rest
        .strip_prefix('.')
        .map(|r| &r[..r.bytes().take_while(u8::is_ascii_digit).count()])
        .unwrap_or("");

    if int_part.is_empty() && frac_part.is_empty() {
        return 0.0;
    }

    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let literal = if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{}.{}", int_part, frac_part)
    };

    literal.parse::<f64>().unwrap_or(0.0)
}
