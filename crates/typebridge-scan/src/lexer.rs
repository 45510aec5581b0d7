//! Tokenizer for Go source files.
//!
//! Produces just enough structure for declaration scanning: identifiers,
//! literals, operators and the semicolons the language inserts at line ends.
//! String literal values are decoded; other literals keep their source text.

use typebridge_core::unquote;

/// Longest operators first so greedy matching picks `<<=` over `<<`.
const OPERATORS: &[&str] = &[
    "<<=", ">>=", "&^=", "...", "&&", "||", "<-", "++", "--", "==", "!=", "<=", ">=", ":=", "+=",
    "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<", ">>", "&^",
];

const KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range", "return",
    "select", "struct", "switch", "type", "var",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Ident(String),
    /// Interpreted or raw string literal, decoded.
    Str(String),
    /// Rune literal, source text.
    Char(String),
    /// Numeric literal, source text.
    Number(String),
    Op(String),
    /// Explicit or inserted statement terminator.
    Semicolon,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

impl Token {
    pub fn is_ident(&self, name: &str) -> bool {
        matches!(&self.kind, TokenKind::Ident(ident) if ident == name)
    }

    pub fn is_op(&self, op: &str) -> bool {
        matches!(&self.kind, TokenKind::Op(text) if text == op)
    }

    pub fn is_semicolon(&self) -> bool {
        self.kind == TokenKind::Semicolon
    }
}

/// Lexing failure: line number and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub line: usize,
    pub message: String,
}

/// Tokenize a whole source file.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, LexError> {
        while let Some(c) = self.peek() {
            match c {
                '\n' => {
                    self.end_line();
                    self.bump();
                }
                c if c.is_whitespace() => {
                    self.bump();
                }
                '/' if self.rest().starts_with("//") => self.line_comment(),
                '/' if self.rest().starts_with("/*") => self.block_comment()?,
                '"' => self.interpreted_string()?,
                '`' => self.raw_string()?,
                '\'' => self.rune()?,
                c if c.is_ascii_digit() => self.number(),
                '.' if self.rest()[1..].starts_with(|d: char| d.is_ascii_digit()) => self.number(),
                c if c == '_' || c.is_alphabetic() => self.identifier(),
                ';' => {
                    self.bump();
                    self.push(TokenKind::Semicolon);
                }
                _ => self.operator(),
            }
        }
        self.end_line();
        Ok(self.tokens)
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn push(&mut self, kind: TokenKind) {
        self.tokens.push(Token {
            kind,
            line: self.line,
        });
    }

    fn error(&self, message: impl Into<String>) -> LexError {
        LexError {
            line: self.line,
            message: message.into(),
        }
    }

    /// Insert a semicolon when the line's last token can end a statement.
    fn end_line(&mut self) {
        let terminates = match self.tokens.last().map(|token| &token.kind) {
            Some(TokenKind::Ident(ident)) => {
                !KEYWORDS.contains(&ident.as_str())
                    || matches!(
                        ident.as_str(),
                        "break" | "continue" | "fallthrough" | "return"
                    )
            }
            Some(TokenKind::Str(_) | TokenKind::Char(_) | TokenKind::Number(_)) => true,
            Some(TokenKind::Op(op)) => matches!(op.as_str(), "++" | "--" | ")" | "]" | "}"),
            Some(TokenKind::Semicolon) | None => false,
        };
        if terminates {
            self.push(TokenKind::Semicolon);
        }
    }

    fn line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn block_comment(&mut self) -> Result<(), LexError> {
        let Some(len) = self.rest()[2..].find("*/") else {
            return Err(self.error("comment not terminated"));
        };
        if self.rest()[2..2 + len].contains('\n') {
            self.end_line();
        }
        let end = self.pos + len + 4;
        while self.pos < end {
            self.bump();
        }
        Ok(())
    }

    fn interpreted_string(&mut self) -> Result<(), LexError> {
        let start = self.pos;
        self.bump();
        self.skip_quoted('"', "string literal not terminated")?;
        let value = unquote(&self.source[start..self.pos]).map_err(|reason| self.error(reason))?;
        self.push(TokenKind::Str(value));
        Ok(())
    }

    /// Advance past the closing `quote`; escapes may not span lines.
    fn skip_quoted(&mut self, quote: char, unterminated: &str) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some('\n') | None => return Err(self.error(unterminated)),
                Some('\\') => {
                    self.bump();
                    if matches!(self.peek(), Some('\n') | None) {
                        return Err(self.error(unterminated));
                    }
                    self.bump();
                }
                Some(c) => {
                    self.bump();
                    if c == quote {
                        return Ok(());
                    }
                }
            }
        }
    }

    fn raw_string(&mut self) -> Result<(), LexError> {
        let start_line = self.line;
        self.bump();
        let Some(len) = self.rest().find('`') else {
            return Err(self.error("raw string literal not terminated"));
        };
        let value = self.rest()[..len].replace('\r', "");
        self.pos += len + 1;
        self.line += value.matches('\n').count();
        self.tokens.push(Token {
            kind: TokenKind::Str(value),
            line: start_line,
        });
        Ok(())
    }

    fn rune(&mut self) -> Result<(), LexError> {
        let start = self.pos;
        self.bump();
        self.skip_quoted('\'', "rune literal not terminated")?;
        let text = self.source[start..self.pos].to_string();
        self.push(TokenKind::Char(text));
        Ok(())
    }

    fn number(&mut self) {
        let start = self.pos;
        let mut previous = '\0';
        while let Some(c) = self.peek() {
            let exponent_sign = (c == '+' || c == '-') && matches!(previous, 'e' | 'E' | 'p' | 'P');
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || exponent_sign {
                previous = c;
                self.bump();
            } else {
                break;
            }
        }
        let text = self.source[start..self.pos].to_string();
        self.push(TokenKind::Number(text));
    }

    fn identifier(&mut self) {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == '_' || c.is_alphanumeric() {
                self.bump();
            } else {
                break;
            }
        }
        let text = self.source[start..self.pos].to_string();
        self.push(TokenKind::Ident(text));
    }

    fn operator(&mut self) {
        let rest = self.rest();
        let op = OPERATORS
            .iter()
            .find(|op| rest.starts_with(**op))
            .map(|op| op.to_string());

        let op = match op {
            Some(op) => {
                self.pos += op.len();
                op
            }
            None => match self.bump() {
                Some(c) => c.to_string(),
                None => return,
            },
        };
        self.push(TokenKind::Op(op));
    }
}

#[cfg(test)]
#[path = "lexer/lexer_tests.rs"]
mod lexer_tests;
