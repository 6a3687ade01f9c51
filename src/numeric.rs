//!
//! Lenient number normalization.
//!

/// Extract a number from arbitrary text.
///
/// Keeps
/// * one minus sign, if it appears anywhere before the first digit.
/// * all digits.
/// * the first decimal point, as long as no exponent has been seen.
/// * the first exponent marker `e`/`E` after a digit.
///
/// Everything else is dropped. This is more permissive than
/// parsing; pasted text like `$ -1,234.50` becomes `-1234.50`.
pub fn normalize_number(s: &str) -> String {
    let mut negative = false;
    let mut seen_digit = false;
    let mut seen_point = false;
    let mut seen_exp = false;
    let mut body = String::new();

    for c in s.chars() {
        match c {
            '-' if !seen_digit => {
                negative = true;
            }
            '0'..='9' => {
                seen_digit = true;
                body.push(c);
            }
            '.' if !seen_point && !seen_exp => {
                seen_point = true;
                body.push(c);
            }
            'e' | 'E' if seen_digit && !seen_exp => {
                seen_exp = true;
                body.push(c);
            }
            _ => {}
        }
    }

    if negative {
        body.insert(0, '-');
    }
    body
}
