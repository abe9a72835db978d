//! Token-to-value parsers shared by the OBJ and MTL grammars.

use crate::error::LoadError;
use crate::lexer::Lexer;

/// Names and texture paths are capped at 63 bytes; the format is ASCII by
/// contract.
pub(crate) const NAME_MAX: usize = 63;

/// Reads `N` whitespace-separated decimal floats. An empty or malformed
/// token fails at that token's position.
pub(crate) fn parse_floats<const N: usize>(lexer: &mut Lexer<'_>) -> crate::Result<[f32; N]> {
    let mut out = [0.0f32; N];
    for value in &mut out {
        let token = lexer.next_token(false);
        *value = token
            .text
            .parse()
            .map_err(|_| LoadError::parse_float(&token))?;
    }
    Ok(out)
}

/// Reads one whitespace-separated signed decimal integer.
pub(crate) fn parse_int(lexer: &mut Lexer<'_>) -> crate::Result<i32> {
    let token = lexer.next_token(false);
    token.text.parse().map_err(|_| LoadError::parse_int(&token))
}

pub(crate) fn bounded_name(text: &str) -> String {
    let mut end = text.len().min(NAME_MAX);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn floats_parse_in_sequence() {
        let mut lexer = Lexer::new("1 -2.5 3e2");
        assert_eq!(parse_floats::<3>(&mut lexer).unwrap(), [1.0, -2.5, 300.0]);
    }

    #[test]
    fn missing_float_reports_token_position() {
        let mut lexer = Lexer::new("1.0 2.0");
        let err = parse_floats::<3>(&mut lexer).unwrap_err();
        assert_eq!(err.to_string(), "(1:8) Error parsing float");
    }

    #[test]
    fn malformed_float_is_an_error() {
        let mut lexer = Lexer::new("banana");
        assert!(parse_floats::<1>(&mut lexer).is_err());
    }

    #[test]
    fn int_parses_sign() {
        let mut lexer = Lexer::new("-7");
        assert_eq!(parse_int(&mut lexer).unwrap(), -7);
    }

    #[test]
    fn names_are_truncated() {
        let long = "x".repeat(100);
        assert_eq!(bounded_name(&long).len(), NAME_MAX);
        assert_eq!(bounded_name("short"), "short");
    }
}
