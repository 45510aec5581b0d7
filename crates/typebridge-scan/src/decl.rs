//! Constant declaration scanner.
//!
//! Walks a token stream for the package clause and every `const`
//! declaration, grouped or not, at any nesting level. Each spec keeps its
//! names, its explicit type and a coarse classification of each initializer.

use crate::lexer::{Token, TokenKind};

/// Initializer of one constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstValue {
    /// A single string literal, decoded.
    Str(String),
    /// Anything else: numbers, `iota`, expressions, conversions.
    Other,
}

/// One `Names [Type] [= Values]` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstSpec {
    pub names: Vec<String>,

    /// Explicit type when it is a plain identifier.
    pub type_name: Option<String>,

    /// Whether any explicit type is present, plain identifier or not.
    pub typed: bool,

    pub values: Vec<ConstValue>,

    pub line: usize,
}

impl ConstSpec {
    /// `(name, value)` pairs whose initializer is a string literal.
    pub fn string_values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names
            .iter()
            .zip(&self.values)
            .filter_map(|(name, value)| match value {
                ConstValue::Str(value) => Some((name.as_str(), value.as_str())),
                ConstValue::Other => None,
            })
    }
}

/// A `const` declaration; a single spec unless written as a group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConstBlock {
    pub specs: Vec<ConstSpec>,
}

/// Declarations of one source file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceFile {
    /// Name from the package clause; empty when the clause is missing.
    pub package: String,

    pub blocks: Vec<ConstBlock>,
}

/// Scan a tokenized file.
pub fn scan_file(tokens: &[Token]) -> SourceFile {
    let package = match tokens {
        [first, Token { kind: TokenKind::Ident(name), .. }, ..] if first.is_ident("package") => {
            name.clone()
        }
        _ => String::new(),
    };

    let mut blocks = Vec::new();
    let mut pos = 0;
    while pos < tokens.len() {
        if tokens[pos].is_ident("const") {
            let (block, next) = const_decl(tokens, pos + 1);
            blocks.push(block);
            pos = next;
        } else {
            pos += 1;
        }
    }

    SourceFile { package, blocks }
}

/// Parse the declaration after a `const` keyword; returns the block and the
/// position after it.
fn const_decl(tokens: &[Token], mut pos: usize) -> (ConstBlock, usize) {
    let mut block = ConstBlock::default();

    if !tokens.get(pos).is_some_and(|token| token.is_op("(")) {
        let end = spec_end(tokens, pos);
        block.specs.extend(const_spec(&tokens[pos..end]));
        return (block, end);
    }

    pos += 1;
    while let Some(token) = tokens.get(pos) {
        if token.is_op(")") {
            pos += 1;
            break;
        }
        if token.is_semicolon() {
            pos += 1;
            continue;
        }
        let end = spec_end(tokens, pos);
        block.specs.extend(const_spec(&tokens[pos..end]));
        pos = end;
    }

    (block, pos)
}

/// Position of the `;` or closing `)` ending the spec starting at `start`.
fn spec_end(tokens: &[Token], start: usize) -> usize {
    let mut depth = 0usize;
    for (offset, token) in tokens[start..].iter().enumerate() {
        match &token.kind {
            TokenKind::Semicolon if depth == 0 => return start + offset,
            TokenKind::Op(op) => match op.as_str() {
                "(" | "[" | "{" => depth += 1,
                ")" | "]" | "}" if depth == 0 => return start + offset,
                ")" | "]" | "}" => depth -= 1,
                _ => {}
            },
            _ => {}
        }
    }
    tokens.len()
}

fn const_spec(tokens: &[Token]) -> Option<ConstSpec> {
    let line = tokens.first()?.line;

    let mut names = Vec::new();
    let mut pos = 0;
    while let Some(Token {
        kind: TokenKind::Ident(name),
        ..
    }) = tokens.get(pos)
    {
        names.push(name.clone());
        pos += 1;
        if tokens.get(pos).is_some_and(|token| token.is_op(",")) {
            pos += 1;
        } else {
            break;
        }
    }
    if names.is_empty() {
        return None;
    }

    let rest = &tokens[pos..];
    let assign = top_level_position(rest, "=");
    let type_tokens = &rest[..assign.unwrap_or(rest.len())];
    let type_name = match type_tokens {
        [Token {
            kind: TokenKind::Ident(name),
            ..
        }] => Some(name.clone()),
        _ => None,
    };

    let values = match assign {
        Some(at) => split_top_level(&rest[at + 1..])
            .into_iter()
            .map(classify)
            .collect(),
        None => Vec::new(),
    };

    Some(ConstSpec {
        names,
        type_name,
        typed: !type_tokens.is_empty(),
        values,
        line,
    })
}

fn top_level_position(tokens: &[Token], op: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate() {
        if let TokenKind::Op(text) = &token.kind {
            match text.as_str() {
                "(" | "[" | "{" => depth += 1,
                ")" | "]" | "}" => depth = depth.saturating_sub(1),
                text if depth == 0 && text == op => return Some(index),
                _ => {}
            }
        }
    }
    None
}

fn split_top_level(tokens: &[Token]) -> Vec<&[Token]> {
    let mut parts = Vec::new();
    let mut rest = tokens;
    while let Some(comma) = top_level_position(rest, ",") {
        parts.push(&rest[..comma]);
        rest = &rest[comma + 1..];
    }
    if !rest.is_empty() {
        parts.push(rest);
    }
    parts
}

fn classify(tokens: &[Token]) -> ConstValue {
    match tokens {
        [Token {
            kind: TokenKind::Str(value),
            ..
        }] => ConstValue::Str(value.clone()),
        _ => ConstValue::Other,
    }
}
