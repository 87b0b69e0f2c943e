//! Lexer (tokenizer) for Jack source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the
//! parser. Comment removal is a separate textual pre-pass over the whole
//! input (`strip_comments`), so the scanner itself never sees comment
//! characters. String literal bodies are exempt from comment removal: a
//! `/*` or `//` inside `"..."` belongs to the string.

use std::fmt;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Source position for error reporting, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The 21 reserved words of the Jack language.
///
/// Recognition is case-sensitive: `Class` is an identifier, `class` is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Class,
    Constructor,
    Function,
    Method,
    Field,
    Static,
    Var,
    Int,
    Char,
    Boolean,
    Void,
    True,
    False,
    Null,
    This,
    Let,
    Do,
    If,
    Else,
    While,
    Return,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Class => "class",
            Keyword::Constructor => "constructor",
            Keyword::Function => "function",
            Keyword::Method => "method",
            Keyword::Field => "field",
            Keyword::Static => "static",
            Keyword::Var => "var",
            Keyword::Int => "int",
            Keyword::Char => "char",
            Keyword::Boolean => "boolean",
            Keyword::Void => "void",
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Null => "null",
            Keyword::This => "this",
            Keyword::Let => "let",
            Keyword::Do => "do",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::Return => "return",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static KEYWORDS: Lazy<FxHashMap<&'static str, Keyword>> = Lazy::new(|| {
    use Keyword::*;
    [
        Class,
        Constructor,
        Function,
        Method,
        Field,
        Static,
        Var,
        Int,
        Char,
        Boolean,
        Void,
        True,
        False,
        Null,
        This,
        Let,
        Do,
        If,
        Else,
        While,
        Return,
    ]
    .into_iter()
    .map(|kw| (kw.as_str(), kw))
    .collect()
});

/// The fixed symbol set, including the shift operators `^` and `#`.
const SYMBOLS: &str = "{}()[].,;+-*/&|<>=~^#";

/// Largest representable Jack integer constant.
const MAX_INT_CONST: u32 = 32767;

/// All token variants produced by the lexer.
///
/// Every variant carries a [`SourceLocation`] so that parse errors can
/// report an accurate line and column. String constants are stored without
/// their surrounding quotes.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Keyword(Keyword, SourceLocation),
    Symbol(char, SourceLocation),
    Identifier(String, SourceLocation),
    IntConst(u16, SourceLocation),
    StringConst(String, SourceLocation),
    Eof(SourceLocation),
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::Keyword(_, loc)
            | Token::Symbol(_, loc)
            | Token::Identifier(_, loc)
            | Token::IntConst(_, loc)
            | Token::StringConst(_, loc)
            | Token::Eof(loc) => *loc,
        }
    }

    /// Renders the terminal XML line for this token, without indentation.
    ///
    /// `&`, `<` and `>` are escaped wherever they can occur. `Eof` has no
    /// printed form; the parser never emits it.
    pub fn xml(&self) -> String {
        match self {
            Token::Keyword(kw, _) => {
                format!("<keyword> {} </keyword>", kw.as_str())
            }
            Token::Symbol(sym, _) => {
                format!("<symbol> {} </symbol>", xml_escape_char(*sym))
            }
            Token::Identifier(name, _) => {
                format!("<identifier> {} </identifier>", name)
            }
            Token::IntConst(value, _) => {
                format!("<integerConstant> {} </integerConstant>", value)
            }
            Token::StringConst(text, _) => {
                format!("<stringConstant> {} </stringConstant>", xml_escape(text))
            }
            Token::Eof(_) => String::new(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Keyword(kw, _) => write!(f, "'{}'", kw.as_str()),
            Token::Symbol(sym, _) => write!(f, "'{}'", sym),
            Token::Identifier(name, _) => write!(f, "identifier '{}'", name),
            Token::IntConst(value, _) => write!(f, "integer constant {}", value),
            Token::StringConst(text, _) => {
                write!(f, "string constant \"{}\"", text)
            }
            Token::Eof(_) => write!(f, "end of file"),
        }
    }
}

fn xml_escape_char(ch: char) -> String {
    match ch {
        '&' => "&amp;".to_string(),
        '<' => "&lt;".to_string(),
        '>' => "&gt;".to_string(),
        _ => ch.to_string(),
    }
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Lexer error type
#[derive(Error, Debug)]
#[error("Lexer error at {location}: {message}")]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

/// Replaces all three comment forms with whitespace.
///
/// Handles `// ...` to end of line and `/* ... */` (the documentation
/// flavour `/** ... */` falls out of the same rule). Comment bytes become
/// spaces and newlines are kept, so line/column positions of everything
/// after a comment are unchanged. Text inside a string literal is copied
/// verbatim. An unterminated block comment is an error.
pub(crate) fn strip_comments(source: &str) -> Result<String, LexError> {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());
    let mut line = 1;
    let mut column = 1;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        match ch {
            '"' => {
                // Copy the whole literal through; a newline ends it early
                // and the scanner reports the unterminated string.
                out.push(ch);
                i += 1;
                column += 1;
                while i < chars.len() {
                    let c = chars[i];
                    out.push(c);
                    i += 1;
                    if c == '\n' {
                        line += 1;
                        column = 1;
                        break;
                    }
                    column += 1;
                    if c == '"' {
                        break;
                    }
                }
            }
            '/' if chars.get(i + 1) == Some(&'/') => {
                while i < chars.len() && chars[i] != '\n' {
                    out.push(' ');
                    i += 1;
                    column += 1;
                }
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                let start = SourceLocation::new(line, column);
                out.push_str("  ");
                i += 2;
                column += 2;
                let mut closed = false;
                while i < chars.len() {
                    if chars[i] == '*' && chars.get(i + 1) == Some(&'/') {
                        out.push_str("  ");
                        i += 2;
                        column += 2;
                        closed = true;
                        break;
                    }
                    if chars[i] == '\n' {
                        out.push('\n');
                        line += 1;
                        column = 1;
                    } else {
                        out.push(' ');
                        column += 1;
                    }
                    i += 1;
                }
                if !closed {
                    return Err(LexError {
                        message: "Unterminated block comment".to_string(),
                        location: start,
                    });
                }
            }
            '\n' => {
                out.push('\n');
                i += 1;
                line += 1;
                column = 1;
            }
            _ => {
                out.push(ch);
                i += 1;
                column += 1;
            }
        }
    }

    Ok(out)
}

/// Lexer for Jack source code
#[derive(Debug)]
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    ///
    /// Comment removal happens here; an unterminated block comment is the
    /// only way construction can fail.
    pub fn new(source: &str) -> Result<Self, LexError> {
        let stripped = strip_comments(source)?;
        Ok(Self {
            input: stripped.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        })
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                tokens.push(Token::Eof(self.current_location()));
                break;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of file".to_string(),
            location: loc,
        })?;

        match ch {
            '"' => self.string_constant(loc),
            '0'..='9' => self.int_constant(ch, loc),
            'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(ch, loc),
            _ if SYMBOLS.contains(ch) => Ok(Token::Symbol(ch, loc)),
            _ => Err(LexError {
                message: format!("Unexpected character: '{}'", ch),
                location: loc,
            }),
        }
    }

    /// Scan a string constant; the opening quote is already consumed.
    ///
    /// No escape processing: the literal runs to the next double quote and
    /// must not span a line. The stored value excludes the quotes.
    fn string_constant(
        &mut self,
        loc: SourceLocation,
    ) -> Result<Token, LexError> {
        let mut text = String::new();

        while let Some(ch) = self.peek() {
            if ch == '"' {
                self.advance();
                return Ok(Token::StringConst(text, loc));
            }
            if ch == '\n' {
                break;
            }
            text.push(ch);
            self.advance();
        }

        Err(LexError {
            message: "Unterminated string literal".to_string(),
            location: loc,
        })
    }

    /// Scan an integer constant (maximal digit run, range 0..=32767).
    fn int_constant(
        &mut self,
        first_digit: char,
        loc: SourceLocation,
    ) -> Result<Token, LexError> {
        let mut num_str = String::new();
        num_str.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let value = num_str.parse::<u32>().map_err(|_| LexError {
            message: format!("Invalid integer constant: {}", num_str),
            location: loc,
        })?;

        if value > MAX_INT_CONST {
            return Err(LexError {
                message: format!(
                    "Integer constant {} out of range (0..=32767)",
                    num_str
                ),
                location: loc,
            });
        }

        Ok(Token::IntConst(value as u16, loc))
    }

    /// Scan an identifier run and reclassify reserved words as keywords.
    fn identifier_or_keyword(
        &mut self,
        first_char: char,
        loc: SourceLocation,
    ) -> Result<Token, LexError> {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match KEYWORDS.get(ident.as_str()) {
            Some(&kw) => Ok(Token::Keyword(kw, loc)),
            None => Ok(Token::Identifier(ident, loc)),
        }
    }

    /// Skip whitespace between tokens
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(source: &str) -> Vec<Token> {
        Lexer::new(source).unwrap().tokenize().unwrap()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = tokenize("class Main { }");

        assert!(matches!(tokens[0], Token::Keyword(Keyword::Class, _)));
        assert!(matches!(tokens[1], Token::Identifier(ref s, _) if s == "Main"));
        assert!(matches!(tokens[2], Token::Symbol('{', _)));
        assert!(matches!(tokens[3], Token::Symbol('}', _)));
        assert!(matches!(tokens[4], Token::Eof(_)));
    }

    #[test]
    fn test_all_symbols() {
        let tokens = tokenize("{ } ( ) [ ] . , ; + - * / & | < > = ~ ^ #");

        for (i, expected) in SYMBOLS.chars().enumerate() {
            assert!(
                matches!(tokens[i], Token::Symbol(sym, _) if sym == expected),
                "expected symbol '{}', got {:?}",
                expected,
                tokens[i]
            );
        }
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        let tokens = tokenize("class Class CLASS");

        assert!(matches!(tokens[0], Token::Keyword(Keyword::Class, _)));
        assert!(matches!(tokens[1], Token::Identifier(ref s, _) if s == "Class"));
        assert!(matches!(tokens[2], Token::Identifier(ref s, _) if s == "CLASS"));
    }

    #[test]
    fn test_every_reserved_word_is_a_keyword() {
        for (text, kw) in KEYWORDS.iter() {
            let tokens = tokenize(text);
            assert!(
                matches!(tokens[0], Token::Keyword(k, _) if k == *kw),
                "'{}' classified as {:?}",
                text,
                tokens[0]
            );
        }
    }

    #[test]
    fn test_comments_are_stripped() {
        let source = "let x; // line comment\nlet y; /* block\ncomment */ let z; /** doc */ let w;";
        let tokens = tokenize(source);

        let idents: Vec<&str> = tokens
            .iter()
            .filter_map(|t| match t {
                Token::Identifier(s, _) => Some(s.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(idents, vec!["x", "y", "z", "w"]);
    }

    #[test]
    fn test_comment_text_does_not_affect_tokens() {
        let a = tokenize("let x = 1; // something\n");
        let b = tokenize("let x = 1; // entirely different text\n");
        assert_eq!(a, b);
    }

    #[test]
    fn test_comment_opener_inside_string() {
        let tokens = tokenize("\"not /* a */ comment // either\"");

        match &tokens[0] {
            Token::StringConst(s, _) => {
                assert_eq!(s, "not /* a */ comment // either");
            }
            other => panic!("Expected string constant, got {:?}", other),
        }
        assert!(matches!(tokens[1], Token::Eof(_)));
    }

    #[test]
    fn test_string_quotes_are_stripped() {
        let tokens = tokenize("\"hello world\"");

        match &tokens[0] {
            Token::StringConst(s, _) => assert_eq!(s, "hello world"),
            other => panic!("Expected string constant, got {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new("\"no closing quote")
            .unwrap()
            .tokenize()
            .unwrap_err();
        assert!(err.message.contains("Unterminated string"));
    }

    #[test]
    fn test_string_must_not_span_a_line() {
        let err = Lexer::new("\"first\nsecond\"")
            .unwrap()
            .tokenize()
            .unwrap_err();
        assert!(err.message.contains("Unterminated string"));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = Lexer::new("let x; /* never closed").unwrap_err();
        assert!(err.message.contains("Unterminated block comment"));
        assert_eq!(err.location, SourceLocation::new(1, 8));
    }

    #[test]
    fn test_int_range() {
        let tokens = tokenize("0 32767");
        assert!(matches!(tokens[0], Token::IntConst(0, _)));
        assert!(matches!(tokens[1], Token::IntConst(32767, _)));

        let err = Lexer::new("32768").unwrap().tokenize().unwrap_err();
        assert!(err.message.contains("out of range"));
    }

    #[test]
    fn test_unexpected_character() {
        let err = Lexer::new("let x = 1 ? 2;").unwrap().tokenize().unwrap_err();
        assert!(err.message.contains("Unexpected character"));
        assert_eq!(err.location, SourceLocation::new(1, 11));
    }

    #[test]
    fn test_locations_survive_comment_stripping() {
        // The '@' sits on line 3 after a multi-line block comment.
        let err = Lexer::new("let a;\n/* one\ntwo */ @")
            .unwrap()
            .tokenize()
            .unwrap_err();
        assert_eq!(err.location, SourceLocation::new(3, 8));
    }

    #[test]
    fn test_token_xml_escaping() {
        let loc = SourceLocation::new(1, 1);
        assert_eq!(Token::Symbol('<', loc).xml(), "<symbol> &lt; </symbol>");
        assert_eq!(Token::Symbol('>', loc).xml(), "<symbol> &gt; </symbol>");
        assert_eq!(Token::Symbol('&', loc).xml(), "<symbol> &amp; </symbol>");
        assert_eq!(Token::Symbol('+', loc).xml(), "<symbol> + </symbol>");
    }
}
