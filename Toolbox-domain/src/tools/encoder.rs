use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use once_cell::sync::Lazy;
use tracing::debug;

use super::ToolError;

/// Standard alphabet, padded output, padding optional on input
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Characters `urlencoding` escapes but URI components leave alone
const URI_COMPONENT_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%2A", "*"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
];

static NAMED_ENTITIES: Lazy<HashMap<&'static str, char>> = Lazy::new(|| {
    HashMap::from([
        ("amp", '&'),
        ("lt", '<'),
        ("gt", '>'),
        ("quot", '"'),
        ("apos", '\''),
        ("nbsp", '\u{a0}'),
        ("copy", '\u{a9}'),
        ("reg", '\u{ae}'),
        ("trade", '\u{2122}'),
        ("hellip", '\u{2026}'),
        ("mdash", '\u{2014}'),
        ("ndash", '\u{2013}'),
        ("lsquo", '\u{2018}'),
        ("rsquo", '\u{2019}'),
        ("ldquo", '\u{201c}'),
        ("rdquo", '\u{201d}'),
        ("laquo", '\u{ab}'),
        ("raquo", '\u{bb}'),
        ("bull", '\u{2022}'),
        ("middot", '\u{b7}'),
        ("para", '\u{b6}'),
        ("sect", '\u{a7}'),
        ("deg", '\u{b0}'),
        ("plusmn", '\u{b1}'),
        ("times", '\u{d7}'),
        ("divide", '\u{f7}'),
        ("cent", '\u{a2}'),
        ("pound", '\u{a3}'),
        ("yen", '\u{a5}'),
        ("euro", '\u{20ac}'),
    ])
});

/// Supported text encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingKind {
    Url,
    Base64,
    Html,
}

impl EncodingKind {
    pub const ALL: [EncodingKind; 3] = [EncodingKind::Url, EncodingKind::Base64, EncodingKind::Html];

    pub fn name(&self) -> &'static str {
        match self {
            EncodingKind::Url => "url",
            EncodingKind::Base64 => "base64",
            EncodingKind::Html => "html",
        }
    }
}

impl fmt::Display for EncodingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EncodingKind {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "url" | "uri" => Ok(EncodingKind::Url),
            "base64" | "b64" => Ok(EncodingKind::Base64),
            "html" => Ok(EncodingKind::Html),
            _ => Err(ToolError::UnknownEncoding(s.to_string())),
        }
    }
}

/// Encode `text`. Encoding never fails.
pub fn encode(kind: EncodingKind, text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    match kind {
        EncodingKind::Url => encode_uri_component(text),
        EncodingKind::Base64 => BASE64.encode(text.as_bytes()),
        EncodingKind::Html => escape_html(text),
    }
}

/// Decode `text`
pub fn decode(kind: EncodingKind, text: &str) -> Result<String, ToolError> {
    if text.is_empty() {
        return Ok(String::new());
    }

    let decoded = match kind {
        EncodingKind::Url => decode_uri_component(text),
        EncodingKind::Base64 => decode_base64(text),
        EncodingKind::Html => Ok(unescape_html(text)),
    };

    if let Err(e) = &decoded {
        debug!("{} decode failed: {}", kind, e);
    }
    decoded
}

fn encode_uri_component(text: &str) -> String {
    URI_COMPONENT_MARKS
        .iter()
        .fold(urlencoding::encode(text).into_owned(), |acc, (escaped, mark)| {
            acc.replace(escaped, mark)
        })
}

fn decode_uri_component(text: &str) -> Result<String, ToolError> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            if !escape.map_or(false, |hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                return Err(ToolError::Decode(format!("malformed escape at position {i}")));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    urlencoding::decode(text)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| ToolError::Decode("escapes do not form valid UTF-8".to_string()))
}

fn decode_base64(text: &str) -> Result<String, ToolError> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = BASE64
        .decode(compact)
        .map_err(|e| ToolError::Decode(e.to_string()))?;

    String::from_utf8(bytes)
        .map_err(|_| ToolError::Decode("decoded bytes are not valid UTF-8".to_string()))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\u{a0}' => escaped.push_str("&nbsp;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn unescape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];

        match candidate.find(';').and_then(|end| {
            resolve_entity(&candidate[1..end]).map(|c| (c, end))
        }) {
            Some((c, end)) => {
                out.push(c);
                rest = &candidate[end + 1..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Resolve the body of an entity (between `&` and `;`)
fn resolve_entity(body: &str) -> Option<char> {
    if let Some(numeric) = body.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) if !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()) => {
                u32::from_str_radix(hex, 16).unwrap_or(u32::MAX)
            }
            None if !numeric.is_empty() && numeric.chars().all(|c| c.is_ascii_digit()) => {
                numeric.parse().unwrap_or(u32::MAX)
            }
            _ => return None,
        };
        return Some(match code {
            0 => char::REPLACEMENT_CHARACTER,
            _ => char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER),
        });
    }

    NAMED_ENTITIES.get(body).copied()
}
