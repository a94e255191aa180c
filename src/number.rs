//! Number and flag scanning for the path-data grammar.
//!
//! Path arguments follow the SVG/CSS number grammar: optional sign, integer
//! and/or fractional digits, optional exponent. Adjacent numbers need no
//! separator (`"-1-2"` is two numbers), so the scanner reads exactly one
//! number from the front of the input and reports how many bytes it
//! consumed, never requiring a trailing delimiter.
//!
//! Two lexical subtleties, both significant for real-world content:
//!
//! - A `.` not followed by a digit is not part of the number (`"1."` scans
//!   as `1`, consuming one byte, leaving the dot).
//! - An `e`/`E` without a following (optionally signed) digit is not an
//!   exponent (`"1em"` scans as `1`).

use crate::error::ParseErrorKind;

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Scan one number from the front of `input`.
///
/// Returns the parsed value and the number of bytes consumed. Fails without
/// consuming anything on empty input, a bare sign, or a leading character
/// that cannot start a number.
pub fn parse_number(input: &str) -> Result<(f64, usize), ParseErrorKind> {
    let bytes = input.as_bytes();
    if bytes.is_empty() {
        return Err(ParseErrorKind::UnexpectedEnd);
    }

    let mut consumed = 0;
    if bytes[0] == b'+' || bytes[0] == b'-' {
        consumed = 1;
    }

    let int_digits = count_digits(&bytes[consumed..]);
    consumed += int_digits;

    let mut frac_digits = 0;
    if bytes.get(consumed) == Some(&b'.')
        && bytes.get(consumed + 1).is_some_and(|b| b.is_ascii_digit())
    {
        consumed += 1;
        frac_digits = count_digits(&bytes[consumed..]);
        consumed += frac_digits;
    }

    if int_digits == 0 && frac_digits == 0 {
        return Err(ParseErrorKind::MalformedNumber);
    }

    if matches!(bytes.get(consumed), Some(b'e') | Some(b'E')) {
        // Only commit to the exponent if a digit follows the optional sign.
        let mut lookahead = consumed + 1;
        if matches!(bytes.get(lookahead), Some(b'+') | Some(b'-')) {
            lookahead += 1;
        }
        let exp_digits = count_digits(&bytes[lookahead..]);
        if exp_digits > 0 {
            consumed = lookahead + exp_digits;
        }
    }

    let value = input[..consumed]
        .parse::<f64>()
        .map_err(|_| ParseErrorKind::MalformedNumber)?;
    Ok((value, consumed))
}

/// Scan one arc flag from the front of `input`: exactly `'0'` or `'1'`.
///
/// Any other character is a hard error; flags are single digits and never
/// run together with the following number.
pub fn parse_flag(input: &str) -> Result<(bool, usize), ParseErrorKind> {
    match input.as_bytes().first() {
        Some(b'0') => Ok((false, 1)),
        Some(b'1') => Ok((true, 1)),
        Some(_) => {
            // Report the offending character, not the raw byte.
            let ch = input.chars().next().unwrap_or('\u{FFFD}');
            Err(ParseErrorKind::InvalidFlag(ch))
        }
        None => Err(ParseErrorKind::UnexpectedEnd),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(input: &str) -> (f64, usize) {
        parse_number(input).unwrap()
    }

    #[test]
    fn test_integers() {
        assert_eq!(number("0"), (0.0, 1));
        assert_eq!(number("42"), (42.0, 2));
        assert_eq!(number("-7"), (-7.0, 2));
        assert_eq!(number("+13"), (13.0, 3));
        assert_eq!(number("0009"), (9.0, 4));
    }

    #[test]
    fn test_fractions() {
        assert_eq!(number("1.5"), (1.5, 3));
        assert_eq!(number(".5"), (0.5, 2));
        assert_eq!(number("-.25"), (-0.25, 4));
        assert_eq!(number("0.79"), (0.79, 4));
    }

    #[test]
    fn test_exponents() {
        assert_eq!(number("1e2"), (100.0, 3));
        assert_eq!(number("1E2"), (100.0, 3));
        assert_eq!(number("1e-2"), (0.01, 4));
        assert_eq!(number("1.5e+1"), (15.0, 6));
        assert_eq!(number(".79e-1"), (0.079, 6));
    }

    #[test]
    fn test_no_trailing_delimiter_required() {
        // The remainder is another number; only the first is consumed.
        assert_eq!(number("-1-2"), (-1.0, 2));
        assert_eq!(number("1.5.5"), (1.5, 3));
        assert_eq!(number("3,4"), (3.0, 1));
        assert_eq!(number("2L3"), (2.0, 1));
    }

    #[test]
    fn test_unconsumed_dot() {
        // A dot with no digit after it is left in the input.
        assert_eq!(number("1."), (1.0, 1));
        assert_eq!(number("1.e5"), (1.0, 1));
    }

    #[test]
    fn test_unconsumed_exponent() {
        assert_eq!(number("1e"), (1.0, 1));
        assert_eq!(number("1em"), (1.0, 1));
        assert_eq!(number("1e+"), (1.0, 1));
        assert_eq!(number("2e-z"), (2.0, 1));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_number(""), Err(ParseErrorKind::UnexpectedEnd));
        assert_eq!(parse_number("-"), Err(ParseErrorKind::MalformedNumber));
        assert_eq!(parse_number("+"), Err(ParseErrorKind::MalformedNumber));
        assert_eq!(parse_number("+-1"), Err(ParseErrorKind::MalformedNumber));
        assert_eq!(parse_number("."), Err(ParseErrorKind::MalformedNumber));
        assert_eq!(parse_number("x1"), Err(ParseErrorKind::MalformedNumber));
    }

    #[test]
    fn test_flags() {
        assert_eq!(parse_flag("0"), Ok((false, 1)));
        assert_eq!(parse_flag("1"), Ok((true, 1)));
        assert_eq!(parse_flag("10 20"), Ok((true, 1)));
        assert_eq!(parse_flag("2"), Err(ParseErrorKind::InvalidFlag('2')));
        assert_eq!(parse_flag("x"), Err(ParseErrorKind::InvalidFlag('x')));
        assert_eq!(parse_flag(""), Err(ParseErrorKind::UnexpectedEnd));
    }
}
