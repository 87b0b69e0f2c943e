//! Statement parsing implementation
//!
//! This module handles the five Jack statement forms:
//!
//! ```text
//! statements      ::= statement*
//! statement       ::= letStatement | ifStatement | whileStatement
//!                   | doStatement | returnStatement
//! letStatement    ::= 'let' varName ('[' expression ']')? '=' expression ';'
//! ifStatement     ::= 'if' '(' expression ')' '{' statements '}'
//!                     ('else' '{' statements '}')?
//! whileStatement  ::= 'while' '(' expression ')' '{' statements '}'
//! doStatement     ::= 'do' subroutineCall ';'
//! returnStatement ::= 'return' expression? ';'
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the
//! [`Parser`] struct.

use crate::parser::lexer::Keyword;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Compile a sequence of statements, excluding the enclosing braces.
    ///
    /// The `<statements>` tag is written even when the sequence is empty.
    /// The loop ends at the first token that is not a statement keyword;
    /// that is the normal end of a block, not an error.
    pub(crate) fn compile_statements(&mut self) -> Result<(), ParseError> {
        self.emitter.open("statements");

        loop {
            match self.current_keyword() {
                Some(Keyword::Let) => self.compile_let()?,
                Some(Keyword::If) => self.compile_if()?,
                Some(Keyword::While) => self.compile_while()?,
                Some(Keyword::Do) => self.compile_do()?,
                Some(Keyword::Return) => self.compile_return()?,
                _ => break,
            }
        }

        self.emitter.close("statements");
        Ok(())
    }

    /// Compile a let statement.
    fn compile_let(&mut self) -> Result<(), ParseError> {
        self.emitter.open("letStatement");

        self.write_advance(); // 'let'
        self.expect_identifier("for assignment target")?;

        if self.check_symbol('[') {
            self.write_advance();
            self.compile_expression()?;
            self.expect_symbol(']', "after array index")?;
        }

        self.expect_symbol('=', "in let statement")?;
        self.compile_expression()?;
        self.expect_symbol(';', "after let statement")?;

        self.emitter.close("letStatement");
        Ok(())
    }

    /// Compile an if statement, possibly with a trailing else clause.
    fn compile_if(&mut self) -> Result<(), ParseError> {
        self.emitter.open("ifStatement");

        self.write_advance(); // 'if'
        self.expect_symbol('(', "after 'if'")?;
        self.compile_expression()?;
        self.expect_symbol(')', "after if condition")?;

        self.expect_symbol('{', "before if body")?;
        self.compile_statements()?;
        self.expect_symbol('}', "after if body")?;

        if self.check_keyword(Keyword::Else) {
            self.write_advance();
            self.expect_symbol('{', "before else body")?;
            self.compile_statements()?;
            self.expect_symbol('}', "after else body")?;
        }

        self.emitter.close("ifStatement");
        Ok(())
    }

    /// Compile a while statement.
    fn compile_while(&mut self) -> Result<(), ParseError> {
        self.emitter.open("whileStatement");

        self.write_advance(); // 'while'
        self.expect_symbol('(', "after 'while'")?;
        self.compile_expression()?;
        self.expect_symbol(')', "after while condition")?;

        self.expect_symbol('{', "before while body")?;
        self.compile_statements()?;
        self.expect_symbol('}', "after while body")?;

        self.emitter.close("whileStatement");
        Ok(())
    }

    /// Compile a do statement: `do subroutineCall ;`.
    fn compile_do(&mut self) -> Result<(), ParseError> {
        self.emitter.open("doStatement");

        self.write_advance(); // 'do'
        self.expect_identifier("for subroutine call after 'do'")?;
        self.compile_subroutine_call()?;
        self.expect_symbol(';', "after do statement")?;

        self.emitter.close("doStatement");
        Ok(())
    }

    /// Compile a return statement with an optional value expression.
    fn compile_return(&mut self) -> Result<(), ParseError> {
        self.emitter.open("returnStatement");

        self.write_advance(); // 'return'

        if !self.check_symbol(';') {
            self.compile_expression()?;
        }

        self.expect_symbol(';', "after return statement")?;

        self.emitter.close("returnStatement");
        Ok(())
    }
}
