//! Expression parsing implementation
//!
//! This module handles Jack expressions:
//!
//! ```text
//! expression     ::= term (op term)*
//! term           ::= integerConstant | stringConstant | keywordConstant
//!                  | varName | varName '[' expression ']' | subroutineCall
//!                  | '(' expression ')' | unaryOp term
//! subroutineCall ::= subroutineName '(' expressionList ')'
//!                  | (className | varName) '.' subroutineName
//!                    '(' expressionList ')'
//! expressionList ::= (expression (',' expression)*)?
//! op             ::= '+' | '-' | '*' | '/' | '&' | '|' | '<' | '>' | '='
//! unaryOp        ::= '-' | '~' | '^' | '#'
//! ```
//!
//! The grammar is deliberately precedence-free: binary operators form a
//! flat, left-associative chain. An identifier at the start of a term is
//! disambiguated by the token after it (`[`, `(`, `.`, or anything else),
//! never by backtracking. A subroutine call is not wrapped in a tag of its
//! own; its tokens are inlined into the enclosing term or do statement.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the
//! [`Parser`] struct.

use crate::parser::lexer::{Keyword, Token};
use crate::parser::parse::{ParseError, Parser};

/// Binary operators of the `expression` rule.
const BINARY_OPS: [char; 9] = ['+', '-', '*', '/', '&', '|', '<', '>', '='];

/// Unary operators, including the shift operators `^` and `#`.
const UNARY_OPS: [char; 4] = ['-', '~', '^', '#'];

impl Parser {
    /// Compile an expression: a term followed by any number of op-term pairs.
    pub(crate) fn compile_expression(&mut self) -> Result<(), ParseError> {
        self.emitter.open("expression");

        self.compile_term()?;

        while matches!(self.peek(), Token::Symbol(op, _) if BINARY_OPS.contains(op))
        {
            self.write_advance();
            self.compile_term()?;
        }

        self.emitter.close("expression");
        Ok(())
    }

    /// Compile a single term.
    fn compile_term(&mut self) -> Result<(), ParseError> {
        self.emitter.open("term");

        match self.peek_token() {
            Token::IntConst(_, _) | Token::StringConst(_, _) => {
                self.write_advance();
            }
            Token::Keyword(
                Keyword::True | Keyword::False | Keyword::Null | Keyword::This,
                _,
            ) => {
                self.write_advance();
            }
            Token::Identifier(_, _) => {
                self.write_advance();

                // The next token decides: '[' is array access, '(' or '.'
                // is a subroutine call, anything else leaves a bare
                // variable reference with nothing more consumed.
                if self.check_symbol('[') {
                    self.write_advance();
                    self.compile_expression()?;
                    self.expect_symbol(']', "after array index")?;
                } else if self.check_symbol('(') || self.check_symbol('.') {
                    self.compile_subroutine_call()?;
                }
            }
            Token::Symbol('(', _) => {
                self.write_advance();
                self.compile_expression()?;
                self.expect_symbol(')', "after parenthesized expression")?;
            }
            Token::Symbol(op, _) if UNARY_OPS.contains(&op) => {
                self.write_advance();
                // Unary application binds a single term, not a full
                // expression, so stacked unary operators nest.
                self.compile_term()?;
            }
            other => {
                return Err(
                    self.error(format!("Expected term, found {}", other))
                );
            }
        }

        self.emitter.close("term");
        Ok(())
    }

    /// Compile the remainder of a subroutine call.
    ///
    /// The leading identifier (call name or qualifier) has already been
    /// consumed and written by the caller; the cursor sits on `.` or `(`.
    pub(crate) fn compile_subroutine_call(&mut self) -> Result<(), ParseError> {
        if self.check_symbol('.') {
            self.write_advance();
            self.expect_identifier("for subroutine name after '.'")?;
        }

        self.expect_symbol('(', "before argument list")?;
        self.compile_expression_list()?;
        self.expect_symbol(')', "after argument list")?;

        Ok(())
    }

    /// Compile a (possibly empty) comma-separated list of expressions.
    fn compile_expression_list(&mut self) -> Result<(), ParseError> {
        self.emitter.open("expressionList");

        if !self.check_symbol(')') {
            loop {
                self.compile_expression()?;

                if self.check_symbol(',') {
                    self.write_advance();
                } else {
                    break;
                }
            }
        }

        self.emitter.close("expressionList");
        Ok(())
    }
}
