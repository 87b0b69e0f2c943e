//! # Introduction
//!
//! Jackal is a syntax analyzer for the Jack language (the teaching language
//! of the nand2tetris course). It tokenizes a Jack compilation unit and
//! drives a recursive-descent, syntax-directed translation that emits the
//! program's full parse tree as indented XML, one line per terminal token
//! or structural marker, mirroring every grammar production exactly. The
//! output is compared line-by-line against reference analyzers, so its
//! textual form is the conformance contract.
//!
//! ## Pipeline
//!
//! ```text
//! Source → strip comments → Lexer → tokens → Parser → XML parse tree
//! ```
//!
//! 1. [`parser::lexer`] removes all three comment forms in a textual
//!    pre-pass, then classifies every lexeme into one of five token kinds.
//! 2. [`parser::parse`] runs one mutually recursive procedure per grammar
//!    non-terminal, pulling tokens through a forward-only cursor.
//! 3. [`parser::emitter`] handles depth-tracked XML formatting; the emitted
//!    stream is the only representation of the tree.
//!
//! There is no semantic analysis and no code generation: the analyzer
//! verifies syntax, nothing more. A lexical or structural error aborts the
//! current unit without recovery.

pub mod error;
pub mod parser;

use error::AnalyzerError;
use parser::lexer::Lexer;
use parser::parse::Parser;

/// Run the full lex + parse + emit pipeline for one compilation unit.
///
/// The source must contain exactly one `class`; trailing tokens after it
/// are a parse error. On success the returned string is the complete XML
/// parse tree, newline-terminated.
pub fn compile_unit(source: &str) -> Result<String, AnalyzerError> {
    let parser = Parser::new(source)?;
    Ok(parser.compile()?)
}

/// Tokenize one compilation unit into the flat `<tokens>` XML listing.
///
/// This is the tokenizer conformance artifact: every token on its own
/// line, in source order, with no grammar structure.
pub fn tokenize_unit(source: &str) -> Result<String, AnalyzerError> {
    let tokens = Lexer::new(source)?.tokenize()?;

    let mut out = String::from("<tokens>\n");
    for token in &tokens {
        if matches!(token, parser::lexer::Token::Eof(_)) {
            break;
        }
        out.push_str(&token.xml());
        out.push('\n');
    }
    out.push_str("</tokens>\n");

    Ok(out)
}
