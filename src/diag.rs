use std::error::Error;
use std::fmt;

/// Errors collected by the parser into `Program.errors`.
///
/// Parsing never bails out on these; the parser records the error and resumes
/// at the next statement boundary.
#[derive(Debug, PartialEq, Clone)]
pub enum ParseError {
    /// The token at expression position has no prefix parse rule.
    NoPrefixParseFn(String),
    /// A grouped expression was not closed before the next token.
    UnmatchedGroupParen,
    /// A call argument list ran out before its closing parenthesis.
    MalformedCall,
    /// Expected vs. actual token mismatch (unexpected/actual lexeme, then
    /// expected).
    UnexpectedToken(String, String),
    /// Integer literal that does not fit an i64.
    BadIntLiteral(String),
    ExpectedIdentifier,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::NoPrefixParseFn(lexeme) => {
                write!(f, "no prefix parse fn for '{}' found", lexeme)
            }
            ParseError::UnmatchedGroupParen => {
                write!(f, "unmatched '(' in group expression")
            }
            ParseError::MalformedCall => {
                write!(f, "malformed function call missing ')'")
            }
            ParseError::UnexpectedToken(unexpected, expected) => write!(
                f,
                "unexpected token '{}', expected '{}'",
                unexpected, expected
            ),
            ParseError::BadIntLiteral(lit) => {
                write!(f, "cannot parse integer literal: {}", lit)
            }
            ParseError::ExpectedIdentifier => {
                write!(f, "expected identifier")
            }
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}
