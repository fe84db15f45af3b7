//! Page text reconstruction from content stream operators.
//!
//! Text showing operators are decoded with the current font's encoding, and a
//! line break is emitted whenever the text position moves to a new line
//! (`Td`/`TD` with a vertical offset, `T*`, `Tm` to a new baseline, the `'`
//! and `"` operators) or a text object ends.

use std::collections::BTreeMap;

use lopdf::content::{Content, Operation};
use lopdf::{Document as LopdfDocument, Encoding, Object, ObjectId};

use crate::error::Result;

/// Kerning adjustments more negative than this (in 1/1000 text space units)
/// are read as a word gap.
const WORD_GAP: f32 = -100.0;

/// Decode the text of one page, one output line per text line.
pub fn page_text(pdf: &LopdfDocument, page_id: ObjectId) -> Result<String> {
    let mut encodings = BTreeMap::new();
    for (name, font) in pdf.get_page_fonts(page_id)? {
        match font.get_font_encoding(pdf) {
            Ok(encoding) => {
                encodings.insert(name, encoding);
            }
            Err(e) => log::debug!(
                "Font {} has no usable encoding: {}",
                String::from_utf8_lossy(&name),
                e
            ),
        }
    }

    let content = Content::decode(&pdf.get_page_content(page_id)?)?;
    Ok(collect_text(&content.operations, &encodings))
}

/// Walk content operations and rebuild the page's lines.
fn collect_text(operations: &[Operation], encodings: &BTreeMap<Vec<u8>, Encoding>) -> String {
    let mut text = LineBuffer::default();
    let mut encoding: Option<&Encoding> = None;
    let mut line_y = 0.0;

    for op in operations {
        match op.operator.as_str() {
            "BT" => line_y = 0.0,
            "ET" | "T*" => text.break_line(),
            "Tf" => {
                encoding = op
                    .operands
                    .first()
                    .and_then(|o| o.as_name().ok())
                    .and_then(|name| encodings.get(name));
            }
            "Td" | "TD" => {
                let tx = operand_number(op, 0);
                let ty = operand_number(op, 1);
                if ty != 0.0 {
                    text.break_line();
                    line_y += ty;
                } else if tx != 0.0 {
                    text.separate();
                }
            }
            "Tm" => {
                let y = operand_number(op, 5);
                if y != line_y {
                    text.break_line();
                    line_y = y;
                } else {
                    text.separate();
                }
            }
            "Tj" | "TJ" => text.push_operands(&op.operands, encoding),
            "'" => {
                text.break_line();
                text.push_operands(&op.operands, encoding);
            }
            "\"" => {
                text.break_line();
                text.push_operands(op.operands.get(2..).unwrap_or_default(), encoding);
            }
            _ => {}
        }
    }

    text.into_string()
}

fn operand_number(op: &Operation, index: usize) -> f32 {
    op.operands.get(index).and_then(number).unwrap_or(0.0)
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

#[derive(Debug, Default)]
struct LineBuffer {
    buf: String,
}

impl LineBuffer {
    fn push_operands(&mut self, operands: &[Object], encoding: Option<&Encoding>) {
        for operand in operands {
            match operand {
                Object::String(bytes, _) => self.buf.push_str(&decode(bytes, encoding)),
                Object::Array(items) => self.push_operands(items, encoding),
                Object::Integer(_) | Object::Real(_) => {
                    if number(operand).is_some_and(|n| n < WORD_GAP) {
                        self.separate();
                    }
                }
                _ => {}
            }
        }
    }

    fn break_line(&mut self) {
        let trimmed = self.buf.trim_end_matches(' ').len();
        self.buf.truncate(trimmed);
        if !self.buf.is_empty() && !self.buf.ends_with('\n') {
            self.buf.push('\n');
        }
    }

    fn separate(&mut self) {
        if !self.buf.is_empty() && !self.buf.ends_with(char::is_whitespace) {
            self.buf.push(' ');
        }
    }

    fn into_string(self) -> String {
        self.buf
    }
}

/// Decode with the font encoding, or guess when the font has none.
fn decode(bytes: &[u8], encoding: Option<&Encoding>) -> String {
    encoding
        .and_then(|enc| LopdfDocument::decode_text(enc, bytes).ok())
        .unwrap_or_else(|| decode_bytes(bytes))
}

/// UTF-16BE with a byte order mark, then UTF-8, then Latin-1.
fn decode_bytes(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::StringFormat;

    fn op(operator: &str, operands: Vec<Object>) -> Operation {
        Operation::new(operator, operands)
    }

    fn string(text: &str) -> Object {
        Object::String(text.as_bytes().to_vec(), StringFormat::Literal)
    }

    fn text_of(ops: Vec<Operation>) -> String {
        collect_text(&ops, &BTreeMap::new())
    }

    #[test]
    fn test_td_moves_start_new_lines() {
        let text = text_of(vec![
            op("BT", vec![]),
            op("Td", vec![72.into(), 700.into()]),
            op("Tj", vec![string("Vegetarian Entrees")]),
            op("Td", vec![0.into(), (-14).into()]),
            op("Tj", vec![string("Falafel wrap")]),
            op("TD", vec![0.into(), (-14).into()]),
            op("Tj", vec![string("Ratatouille bowl")]),
            op("ET", vec![]),
        ]);
        assert_eq!(text, "Vegetarian Entrees\nFalafel wrap\nRatatouille bowl\n");
    }

    #[test]
    fn test_next_line_operators() {
        let text = text_of(vec![
            op("BT", vec![]),
            op("Tj", vec![string("Mains")]),
            op("T*", vec![]),
            op("Tj", vec![string("Lasagna")]),
            op("'", vec![string("Sushi roll")]),
            op("\"", vec![1.into(), 0.into(), string("Baba ganoush")]),
            op("ET", vec![]),
        ]);
        assert_eq!(text, "Mains\nLasagna\nSushi roll\nBaba ganoush\n");
    }

    #[test]
    fn test_tm_on_same_baseline_stays_on_line() {
        let text = text_of(vec![
            op("BT", vec![]),
            op("Tm", vec![1.into(), 0.into(), 0.into(), 1.into(), 72.into(), 700.into()]),
            op("Tj", vec![string("Side")]),
            op("Tm", vec![1.into(), 0.into(), 0.into(), 1.into(), 110.into(), 700.into()]),
            op("Tj", vec![string("Dishes")]),
            op("Tm", vec![1.into(), 0.into(), 0.into(), 1.into(), 72.into(), 680.into()]),
            op("Tj", vec![string("Grilled corn")]),
            op("ET", vec![]),
        ]);
        assert_eq!(text, "Side Dishes\nGrilled corn\n");
    }

    #[test]
    fn test_tj_array_gaps_become_spaces() {
        let text = text_of(vec![
            op("BT", vec![]),
            op(
                "TJ",
                vec![Object::Array(vec![
                    string("Couscous"),
                    (-250).into(),
                    string("salad"),
                    (-20).into(),
                    string("s"),
                ])],
            ),
            op("ET", vec![]),
        ]);
        assert_eq!(text, "Couscous salads\n");
    }

    #[test]
    fn test_separate_text_objects_are_separate_lines() {
        let text = text_of(vec![
            op("BT", vec![]),
            op("Tj", vec![string("Breakfast")]),
            op("ET", vec![]),
            op("BT", vec![]),
            op("Tj", vec![string("Toast")]),
            op("ET", vec![]),
        ]);
        assert_eq!(text, "Breakfast\nToast\n");
    }

    #[test]
    fn test_no_text_operators_yield_empty_text() {
        let text = text_of(vec![
            op("m", vec![0.into(), 0.into()]),
            op("l", vec![100.into(), 100.into()]),
            op("S", vec![]),
        ]);
        assert!(text.is_empty());
    }

    #[test]
    fn test_decode_bytes_fallbacks() {
        assert_eq!(decode_bytes(b"Hello"), "Hello");
        assert_eq!(decode_bytes(&[0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69]), "Hi");
        assert_eq!(decode_bytes(&[0x43, 0x72, 0xE8, 0x6D, 0x65]), "Crème");
    }
}
