//! Jack source code parser
//!
//! This module transforms Jack source text into its XML parse tree:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Recursive descent parsing (tokens → emitted tree)
//! - [`emitter`]: Indented XML output
//!
//! # Pipeline
//!
//! The lexer strips comments and produces the complete token sequence in
//! one eager pass before any parsing begins. The parser then walks the
//! token stream with one token of lookahead, writing an opening tag for
//! every non-terminal it enters, the classified form of every terminal it
//! consumes, and a closing tag when the production is exhausted. The
//! emitted stream *is* the parse tree; no AST is materialized.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent. The grammar is precedence-free by
//! design, so expressions are flat left-associative operator chains. No
//! external parser generator dependencies.

pub mod emitter;
pub mod lexer;
pub mod parse;

mod declarations;
mod expressions;
mod statements;
