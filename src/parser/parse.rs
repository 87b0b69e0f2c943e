//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing
//! infrastructure: the token cursor, error type, helper methods, and the
//! compile entry point.
//!
//! # Parser Architecture
//!
//! The Parser drives a one-token-lookahead recursive descent over the token
//! stream, writing the parse tree to an [`XmlEmitter`] as it consumes
//! tokens. There is no AST: the emitted stream is the output. Production
//! methods are split across multiple files using `impl Parser` blocks:
//! - This module: Parser struct, helpers, and the entry point
//! - `declarations`: class, class variables, subroutines
//! - `statements`: the five statement forms
//! - `expressions`: expressions, terms, subroutine calls
//!
//! Every production method leaves the cursor on the first token after
//! everything that production consumed, so the caller's own lookahead is
//! reliable. The cursor only ever moves forward; no production backtracks.

use thiserror::Error;

use crate::parser::emitter::XmlEmitter;
use crate::parser::lexer::{Keyword, LexError, Lexer, SourceLocation, Token};

/// Parser error type
#[derive(Error, Debug)]
#[error("Parse error at {location}: {message}")]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

/// Recursive descent syntax-directed translator for Jack.
///
/// One instance translates exactly one compilation unit; [`Parser::compile`]
/// consumes the parser.
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) emitter: XmlEmitter,
}

impl Parser {
    /// Tokenize the source and set the cursor before the first token.
    pub fn new(source: &str) -> Result<Self, LexError> {
        let tokens = Lexer::new(source)?.tokenize()?;
        Ok(Self {
            tokens,
            position: 0,
            emitter: XmlEmitter::new(),
        })
    }

    /// Compile one compilation unit (a single `class`) to its XML tree.
    ///
    /// Trailing tokens after the class's closing brace are an error; partial
    /// output from a failed parse is discarded.
    pub fn compile(mut self) -> Result<String, ParseError> {
        self.compile_class()?;

        if !self.is_at_end() {
            return Err(
                self.error(format!("Expected end of file, found {}", self.peek()))
            );
        }

        Ok(self.emitter.finish())
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_token(&self) -> Token {
        self.tokens[self.position].clone()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof(_))
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location()
    }

    pub(crate) fn error(&self, message: String) -> ParseError {
        ParseError {
            message,
            location: self.current_location(),
        }
    }

    /// Write the current token to the emitter and advance past it.
    pub(crate) fn write_advance(&mut self) {
        self.emitter.terminal(&self.tokens[self.position]);
        if !matches!(self.tokens[self.position], Token::Eof(_)) {
            self.position += 1;
        }
    }

    pub(crate) fn check_symbol(&self, sym: char) -> bool {
        matches!(self.peek(), Token::Symbol(s, _) if *s == sym)
    }

    pub(crate) fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(self.peek(), Token::Keyword(kw, _) if *kw == keyword)
    }

    /// The current keyword, if the current token is one.
    pub(crate) fn current_keyword(&self) -> Option<Keyword> {
        match self.peek() {
            Token::Keyword(kw, _) => Some(*kw),
            _ => None,
        }
    }

    pub(crate) fn expect_symbol(
        &mut self,
        sym: char,
        ctx: &str,
    ) -> Result<(), ParseError> {
        if self.check_symbol(sym) {
            self.write_advance();
            Ok(())
        } else {
            Err(self.error(format!(
                "Expected '{}' {}, found {}",
                sym,
                ctx,
                self.peek()
            )))
        }
    }

    pub(crate) fn expect_keyword(
        &mut self,
        keyword: Keyword,
        ctx: &str,
    ) -> Result<(), ParseError> {
        if self.check_keyword(keyword) {
            self.write_advance();
            Ok(())
        } else {
            Err(self.error(format!(
                "Expected '{}' {}, found {}",
                keyword.as_str(),
                ctx,
                self.peek()
            )))
        }
    }

    pub(crate) fn expect_identifier(
        &mut self,
        ctx: &str,
    ) -> Result<(), ParseError> {
        if matches!(self.peek(), Token::Identifier(_, _)) {
            self.write_advance();
            Ok(())
        } else {
            Err(self.error(format!(
                "Expected identifier {}, found {}",
                ctx,
                self.peek()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(source: &str) -> String {
        Parser::new(source).unwrap().compile().unwrap()
    }

    fn compile_err(source: &str) -> ParseError {
        Parser::new(source).unwrap().compile().unwrap_err()
    }

    #[test]
    fn test_empty_class() {
        assert_eq!(
            compile("class Main { }"),
            "<class>\n\
             \x20 <keyword> class </keyword>\n\
             \x20 <identifier> Main </identifier>\n\
             \x20 <symbol> { </symbol>\n\
             \x20 <symbol> } </symbol>\n\
             </class>\n"
        );
    }

    #[test]
    fn test_unclosed_class_body() {
        let err = compile_err("class Main {");
        assert!(err.message.contains("Expected '}'"), "{}", err.message);
        assert!(err.message.contains("end of file"), "{}", err.message);
    }

    #[test]
    fn test_missing_class_keyword() {
        let err = compile_err("Main { }");
        assert!(err.message.contains("Expected 'class'"), "{}", err.message);
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = compile_err("class Main { } class Other { }");
        assert!(
            err.message.contains("Expected end of file"),
            "{}",
            err.message
        );
    }

    #[test]
    fn test_compile_is_deterministic() {
        let source = "class Main {
            function void main() {
                do Output.printInt(1 + 2);
                return;
            }
        }";
        assert_eq!(compile(source), compile(source));
    }

    #[test]
    fn test_parse_error_carries_location() {
        let err = compile_err("class Main {\n  static int x\n}");
        assert!(err.message.contains("Expected ';'"), "{}", err.message);
        assert_eq!(err.location.line, 3);
    }
}
