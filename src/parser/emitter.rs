//! XML tree emitter
//!
//! A pure indentation/formatting service with no grammar knowledge. The
//! parser calls [`XmlEmitter::open`] when it enters a non-terminal,
//! [`XmlEmitter::terminal`] for every token it consumes, and
//! [`XmlEmitter::close`] when the production is exhausted. The emitted
//! stream is the parse tree; no separate tree structure is built.

use crate::parser::lexer::Token;

const INDENT: &str = "  ";

/// Write-once XML emitter with two-space indentation per nesting level.
#[derive(Debug, Default)]
pub struct XmlEmitter {
    out: String,
    depth: usize,
}

impl XmlEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write an opening tag at the current depth and descend one level.
    pub fn open(&mut self, tag: &str) {
        self.write_line(&format!("<{}>", tag));
        self.depth += 1;
    }

    /// Ascend one level and write the matching closing tag.
    pub fn close(&mut self, tag: &str) {
        self.depth -= 1;
        self.write_line(&format!("</{}>", tag));
    }

    /// Write a terminal token line at the current depth.
    pub fn terminal(&mut self, token: &Token) {
        self.write_line(&token.xml());
    }

    /// Consume the emitter and return the accumulated output.
    pub fn finish(self) -> String {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(line);
        self.out.push('\n');
    }
}
