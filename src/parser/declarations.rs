//! Declaration parsing implementation
//!
//! This module handles the structural productions of a Jack class:
//!
//! ```text
//! class          ::= 'class' className '{' classVarDec* subroutineDec* '}'
//! classVarDec    ::= ('static' | 'field') type varName (',' varName)* ';'
//! subroutineDec  ::= ('constructor' | 'function' | 'method')
//!                    ('void' | type) subroutineName
//!                    '(' parameterList ')' subroutineBody
//! parameterList  ::= ((type varName) (',' type varName)*)?
//! subroutineBody ::= '{' varDec* statements '}'
//! varDec         ::= 'var' type varName (',' varName)* ';'
//! type           ::= 'int' | 'char' | 'boolean' | className
//! ```
//!
//! The parentheses around the parameter list belong to `subroutineDec`, so
//! they are written outside the `<parameterList>` tag.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the
//! [`Parser`] struct.

use crate::parser::lexer::{Keyword, Token};
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Compile a complete class, the one top-level production.
    pub(crate) fn compile_class(&mut self) -> Result<(), ParseError> {
        self.emitter.open("class");

        self.expect_keyword(Keyword::Class, "at start of compilation unit")?;
        self.expect_identifier("for class name")?;
        self.expect_symbol('{', "after class name")?;

        while matches!(
            self.current_keyword(),
            Some(Keyword::Static | Keyword::Field)
        ) {
            self.compile_class_var_dec()?;
        }

        while matches!(
            self.current_keyword(),
            Some(Keyword::Constructor | Keyword::Function | Keyword::Method)
        ) {
            self.compile_subroutine_dec()?;
        }

        self.expect_symbol('}', "after class body")?;

        self.emitter.close("class");
        Ok(())
    }

    /// Compile a static or field declaration.
    fn compile_class_var_dec(&mut self) -> Result<(), ParseError> {
        self.emitter.open("classVarDec");

        self.write_advance(); // 'static' | 'field', checked by the caller
        self.compile_type("after 'static' or 'field'")?;
        self.expect_identifier("for variable name")?;

        while self.check_symbol(',') {
            self.write_advance();
            self.expect_identifier("after ','")?;
        }

        self.expect_symbol(';', "after class variable declaration")?;

        self.emitter.close("classVarDec");
        Ok(())
    }

    /// Compile a complete subroutine declaration.
    fn compile_subroutine_dec(&mut self) -> Result<(), ParseError> {
        self.emitter.open("subroutineDec");

        self.write_advance(); // 'constructor' | 'function' | 'method'

        if self.check_keyword(Keyword::Void) {
            self.write_advance();
        } else {
            self.compile_type("for return type")?;
        }

        self.expect_identifier("for subroutine name")?;
        self.expect_symbol('(', "after subroutine name")?;
        self.compile_parameter_list()?;
        self.expect_symbol(')', "after parameter list")?;
        self.compile_subroutine_body()?;

        self.emitter.close("subroutineDec");
        Ok(())
    }

    /// Compile a (possibly empty) parameter list, excluding the parentheses.
    fn compile_parameter_list(&mut self) -> Result<(), ParseError> {
        self.emitter.open("parameterList");

        if !self.check_symbol(')') {
            loop {
                self.compile_type("for parameter")?;
                self.expect_identifier("for parameter name")?;

                if self.check_symbol(',') {
                    self.write_advance();
                } else {
                    break;
                }
            }
        }

        self.emitter.close("parameterList");
        Ok(())
    }

    /// Compile a subroutine's body.
    fn compile_subroutine_body(&mut self) -> Result<(), ParseError> {
        self.emitter.open("subroutineBody");

        self.expect_symbol('{', "before subroutine body")?;

        while self.check_keyword(Keyword::Var) {
            self.compile_var_dec()?;
        }

        self.compile_statements()?;
        self.expect_symbol('}', "after subroutine body")?;

        self.emitter.close("subroutineBody");
        Ok(())
    }

    /// Compile a local variable declaration.
    fn compile_var_dec(&mut self) -> Result<(), ParseError> {
        self.emitter.open("varDec");

        self.write_advance(); // 'var', checked by the caller
        self.compile_type("after 'var'")?;
        self.expect_identifier("for variable name")?;

        while self.check_symbol(',') {
            self.write_advance();
            self.expect_identifier("after ','")?;
        }

        self.expect_symbol(';', "after variable declaration")?;

        self.emitter.close("varDec");
        Ok(())
    }

    /// Compile a type: a primitive type keyword or a class name.
    pub(crate) fn compile_type(&mut self, ctx: &str) -> Result<(), ParseError> {
        match self.peek() {
            Token::Keyword(
                Keyword::Int | Keyword::Char | Keyword::Boolean,
                _,
            )
            | Token::Identifier(_, _) => {
                self.write_advance();
                Ok(())
            }
            other => {
                let message = format!("Expected type {}, found {}", ctx, other);
                Err(self.error(message))
            }
        }
    }
}
