//! Struct tag parsing.
//!
//! A raw tag is a sequence of space-separated `key:"value"` pairs. Two keys
//! matter to the generator:
//!
//! - `json:"name,omitempty"` - wire name override, omit-on-empty, `-` to skip
//! - `param:"header,required,default=1"` - transport location, required flag
//!   and default value
//!
//! Parsing follows the source language's own tag lookup: scanning stops at
//! the first malformed pair and keeps whatever was read before it.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const JSON_KEY: &str = "json";
const PARAM_KEY: &str = "param";

/// Where a property travels in a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Header,
    Body,
    Query,
    Path,
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "header" => Ok(Location::Header),
            "body" => Ok(Location::Body),
            "query" => Ok(Location::Query),
            "path" => Ok(Location::Path),
            other => Err(format!("unknown location `{other}`")),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Location::Header => "header",
            Location::Body => "body",
            Location::Query => "query",
            Location::Path => "path",
        };
        f.write_str(name)
    }
}

/// The `json` tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonTag {
    /// Name override; `None` keeps the declared field name.
    pub name: Option<String>,
    pub omit_empty: bool,
    pub skip: bool,
}

impl JsonTag {
    pub fn parse(value: &str) -> Self {
        if value == "-" {
            return Self {
                skip: true,
                ..Self::default()
            };
        }

        let mut parts = value.split(',');
        let name = parts.next().filter(|n| !n.is_empty()).map(str::to_string);
        let omit_empty = parts.any(|opt| opt == "omitempty" || opt == "omitzero");

        Self {
            name,
            omit_empty,
            skip: false,
        }
    }
}

/// The `param` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamTag {
    pub location: Location,
    pub required: bool,
    pub default: Option<String>,
}

impl ParamTag {
    pub fn parse(value: &str) -> Result<Self, String> {
        let mut parts = value.split(',');
        let location = parts.next().unwrap_or_default().trim().parse()?;

        let mut tag = Self {
            location,
            required: false,
            default: None,
        };

        for option in parts {
            if option == "required" {
                tag.required = true;
            } else if let Some(default) = option.strip_prefix("default=") {
                tag.default = Some(default.to_string());
            }
        }

        Ok(tag)
    }
}

/// Everything the generator reads from one field's tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTags {
    pub json: JsonTag,
    pub param: Option<ParamTag>,
}

impl FieldTags {
    pub fn parse(raw: &str) -> CoreResult<Self> {
        let invalid = |reason: String| CoreError::InvalidTag {
            tag: raw.to_string(),
            reason,
        };

        let json = lookup_tag(raw, JSON_KEY)
            .map_err(invalid)?
            .map(|value| JsonTag::parse(&value))
            .unwrap_or_default();

        let param = match lookup_tag(raw, PARAM_KEY).map_err(invalid)? {
            Some(value) => Some(ParamTag::parse(&value).map_err(|reason| {
                CoreError::InvalidTag {
                    tag: raw.to_string(),
                    reason,
                }
            })?),
            None => None,
        };

        Ok(Self { json, param })
    }

    pub fn skip(&self) -> bool {
        self.json.skip
    }

    /// Wire name of a field declared as `declared`.
    pub fn wire_name<'a>(&'a self, declared: &'a str) -> &'a str {
        self.json.name.as_deref().unwrap_or(declared)
    }

    /// `required` wins over `omitempty`; a default makes the field optional.
    pub fn is_optional(&self) -> bool {
        match &self.param {
            Some(param) if param.required => false,
            Some(param) if param.default.is_some() => true,
            _ => self.json.omit_empty,
        }
    }
}

/// Look up `key` in a raw struct tag.
///
/// Returns `Ok(None)` when the key is absent or the tag is malformed before
/// the key is reached, and an error when the key's value is a broken quoted
/// string.
pub fn lookup_tag(tag: &str, key: &str) -> Result<Option<String>, String> {
    let bytes = tag.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        while pos < bytes.len() && bytes[pos] == b' ' {
            pos += 1;
        }
        if pos >= bytes.len() {
            break;
        }

        let name_start = pos;
        while pos < bytes.len()
            && bytes[pos] > b' '
            && bytes[pos] != b':'
            && bytes[pos] != b'"'
            && bytes[pos] != 0x7f
        {
            pos += 1;
        }
        if pos == name_start
            || pos + 1 >= bytes.len()
            || bytes[pos] != b':'
            || bytes[pos + 1] != b'"'
        {
            break;
        }
        let name = &tag[name_start..pos];
        pos += 1;

        let value_start = pos;
        pos += 1;
        while pos < bytes.len() && bytes[pos] != b'"' {
            if bytes[pos] == b'\\' {
                pos += 1;
            }
            pos += 1;
        }
        if pos >= bytes.len() {
            break;
        }
        let quoted = &tag[value_start..=pos];
        pos += 1;

        if name == key {
            return unquote(quoted).map(Some);
        }
    }

    Ok(None)
}

/// Decode a double-quoted string literal with backslash escapes.
pub fn unquote(quoted: &str) -> Result<String, String> {
    let inner = quoted
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(|| format!("`{quoted}` is not a quoted string"))?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('a') => out.push('\u{7}'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('v') => out.push('\u{b}'),
            Some('x') => out.push(hex_escape(&mut chars, 2)?),
            Some('u') => out.push(hex_escape(&mut chars, 4)?),
            Some('U') => out.push(hex_escape(&mut chars, 8)?),
            Some(first @ '0'..='7') => out.push(octal_escape(first, &mut chars)?),
            Some(other) => return Err(format!("unknown escape `\\{other}`")),
            None => return Err("dangling backslash".to_string()),
        }
    }

    Ok(out)
}

fn hex_escape(chars: &mut std::str::Chars<'_>, digits: usize) -> Result<char, String> {
    let hex: String = chars.by_ref().take(digits).collect();
    if hex.len() != digits {
        return Err(format!("short hex escape `{hex}`"));
    }
    u32::from_str_radix(&hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| format!("invalid hex escape `{hex}`"))
}

fn octal_escape(first: char, chars: &mut std::str::Chars<'_>) -> Result<char, String> {
    let rest: String = chars.by_ref().take(2).collect();
    let digits = format!("{first}{rest}");
    if digits.len() != 3 {
        return Err(format!("short octal escape `{digits}`"));
    }
    u32::from_str_radix(&digits, 8)
        .ok()
        .filter(|value| *value <= 0xff)
        .and_then(char::from_u32)
        .ok_or_else(|| format!("invalid octal escape `{digits}`"))
}
