pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
///
/// Input the lexer cannot match (which, given the catch-all [`TokenKind::Symbol`], is only
/// possible for malformed UTF-8 boundaries) is emitted as a [`TokenKind::Symbol`] token so that
/// the parser can report it.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind: result.unwrap_or(TokenKind::Symbol),
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "1 + 2",
            [
                (TokenKind::Int, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "2"),
            ],
        );
    }

    #[test]
    fn both_power_spellings() {
        compare_tokens(
            "x^2**3",
            [
                (TokenKind::Name, "x"),
                (TokenKind::Exp, "^"),
                (TokenKind::Int, "2"),
                (TokenKind::Exp, "**"),
                (TokenKind::Int, "3"),
            ],
        );
    }

    #[test]
    fn question_text() {
        compare_tokens(
            "What's 3.5x2?",
            [
                (TokenKind::Name, "What"),
                (TokenKind::Symbol, "'"),
                (TokenKind::Name, "s"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Float, "3.5"),
                (TokenKind::Name, "x2"),
                (TokenKind::Symbol, "?"),
            ],
        );
    }

    #[test]
    fn equation_with_call() {
        compare_tokens(
            "sin(x)=.5",
            [
                (TokenKind::Name, "sin"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Name, "x"),
                (TokenKind::CloseParen, ")"),
                (TokenKind::Eq, "="),
                (TokenKind::Float, ".5"),
            ],
        );
    }
}
