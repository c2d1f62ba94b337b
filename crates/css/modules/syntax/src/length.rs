//! Lenient pixel reads of computed values.

use cssparser::{Parser, ParserInput, Token};

/// Read the leading integer of a computed value, `0` when there is none.
///
/// `"8px"` and `"8.75px"` give `8`, `"-3px"` gives `-3`, while `""`, `"auto"` and `"0"`
/// give `0`. Fractions truncate toward zero, so the result never overshoots the real length.
pub fn parse_leading_px(value: &str) -> i32 {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    match parser.next() {
        Ok(Token::Dimension { value: number, .. } | Token::Number { value: number, .. }) => {
            number.trunc() as i32
        }
        Ok(Token::Percentage { unit_value, .. }) => (unit_value * 100.0).trunc() as i32,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::parse_leading_px;

    #[test]
    fn reads_pixel_lengths() {
        assert_eq!(parse_leading_px("8px"), 8);
        assert_eq!(parse_leading_px(" 12px "), 12);
        assert_eq!(parse_leading_px("8.75px"), 8);
        assert_eq!(parse_leading_px("-3px"), -3);
    }

    #[test]
    fn non_lengths_read_as_zero() {
        assert_eq!(parse_leading_px(""), 0);
        assert_eq!(parse_leading_px("auto"), 0);
        assert_eq!(parse_leading_px("0"), 0);
    }
}
