//! Content stream → ordered text fragments.
//!
//! Every text-showing operator (`Tj`, `TJ`, `'`, `"`) inside a `BT`/`ET`
//! block yields one fragment, in stream order. Positions are tracked with a
//! simplified text matrix and carried along, but nothing downstream
//! reorders by them.

use std::collections::BTreeMap;

use lopdf::{Dictionary, Document as LopdfDocument, Encoding, Object};

use crate::error::{Error, Result};

/// Kerning adjustment (thousandths of text space) treated as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Leading used by `T*` when no `TL` was set.
const DEFAULT_LEADING: f32 = 12.0;

/// A piece of text as shown by one operator.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    /// Decoded text, untrimmed
    pub text: String,
    /// X position in text space
    pub x: f32,
    /// Y position in text space
    pub y: f32,
}

impl TextFragment {
    /// Create a fragment at the given position.
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
        }
    }
}

/// Decode a page's content stream into text fragments.
pub(crate) fn collect_fragments(
    doc: &LopdfDocument,
    content: &[u8],
    fonts: &BTreeMap<Vec<u8>, &Dictionary>,
) -> Result<Vec<TextFragment>> {
    if content.is_empty() {
        return Ok(Vec::new());
    }

    let content = lopdf::content::Content::decode(content)
        .map_err(|e| Error::TextExtract(format!("content stream: {}", e)))?;

    let mut fragments = Vec::new();
    let mut encoding: Option<Encoding> = None;
    let mut matrix = TextMatrix::default();
    let mut in_text_block = false;

    for op in &content.operations {
        match op.operator.as_str() {
            "BT" => {
                in_text_block = true;
                matrix.reset();
            }
            "ET" => in_text_block = false,
            "Tf" => {
                if let Some(Object::Name(font_name)) = op.operands.first() {
                    encoding = fonts
                        .get(font_name)
                        .and_then(|font| font.get_font_encoding(doc).ok());
                }
            }
            "TL" => {
                if let Some(leading) = op.operands.first().and_then(get_number) {
                    matrix.leading = leading;
                }
            }
            "Td" | "TD" => {
                if op.operands.len() >= 2 {
                    let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                    let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                    if op.operator == "TD" {
                        matrix.leading = -ty;
                    }
                    matrix.translate(tx, ty);
                }
            }
            "Tm" => {
                if op.operands.len() >= 6 {
                    let e = get_number(&op.operands[4]).unwrap_or(0.0);
                    let f = get_number(&op.operands[5]).unwrap_or(0.0);
                    matrix.set_origin(e, f);
                }
            }
            "T*" => matrix.next_line(),
            "Tj" if in_text_block => {
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    let text = decode_bytes(encoding.as_ref(), bytes);
                    fragments.push(matrix.fragment(text));
                }
            }
            "TJ" if in_text_block => {
                if let Some(Object::Array(items)) = op.operands.first() {
                    let text = decode_tj_array(encoding.as_ref(), items);
                    fragments.push(matrix.fragment(text));
                }
            }
            "'" | "\"" => {
                matrix.next_line();
                let text_idx = if op.operator == "\"" { 2 } else { 0 };
                if in_text_block {
                    if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                        let text = decode_bytes(encoding.as_ref(), bytes);
                        fragments.push(matrix.fragment(text));
                    }
                }
            }
            _ => {}
        }
    }

    Ok(fragments)
}

/// Join the strings of a `TJ` array, inserting a space at large gaps.
fn decode_tj_array(encoding: Option<&Encoding>, items: &[Object]) -> String {
    let mut combined = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => combined.push_str(&decode_bytes(encoding, bytes)),
            Object::Integer(_) | Object::Real(_) => {
                let adjustment = -get_number(item).unwrap_or(0.0);
                if adjustment > TJ_SPACE_THRESHOLD
                    && !combined.is_empty()
                    && !combined.ends_with(' ')
                    && !combined.chars().last().is_some_and(is_spaceless_script_char)
                {
                    combined.push(' ');
                }
            }
            _ => {}
        }
    }
    combined
}

fn decode_bytes(encoding: Option<&Encoding>, bytes: &[u8]) -> String {
    encoding
        .and_then(|enc| LopdfDocument::decode_text(enc, bytes).ok())
        .unwrap_or_else(|| decode_text_simple(bytes))
}

/// Simple text decoding when the font has no usable encoding.
pub(crate) fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

/// Scripts written without spaces between words (Han, kana).
fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x3000..=0x303F
        | 0x3040..=0x309F
        | 0x30A0..=0x30FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0x20000..=0x2EBEF)
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Translation part of the text matrix plus the line origin.
#[derive(Debug, Clone, Copy)]
struct TextMatrix {
    x: f32,
    y: f32,
    line_x: f32,
    line_y: f32,
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            line_x: 0.0,
            line_y: 0.0,
            leading: DEFAULT_LEADING,
        }
    }
}

impl TextMatrix {
    fn reset(&mut self) {
        *self = Self {
            leading: self.leading,
            ..Self::default()
        };
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.line_x = x;
        self.line_y = y;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.set_origin(self.line_x + tx, self.line_y + ty);
    }

    fn next_line(&mut self) {
        self.translate(0.0, -self.leading);
    }

    fn fragment(&self, text: String) -> TextFragment {
        TextFragment::new(text, self.x, self.y)
    }
}
