//! PDF text extraction over lopdf content streams
//!
//! Walks each page's decoded content stream and collects the operands of the
//! text-showing operators, decoding each string with the font selected by the
//! last `Tf`. Fonts with a `/ToUnicode` CMap are decoded through it. Other
//! simple fonts fall back to UTF-8, then UTF-16BE (with BOM), then Latin-1.
//! Composite fonts without a CMap cannot be read and yield replacement
//! characters, which the quality check downstream rejects.

use std::collections::BTreeMap;

use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId};
use shared_types::DocumentKind;
use tracing::debug;

use crate::cmap::{ToUnicodeMap, UNMAPPED};
use crate::error::{ExtractionError, Result};

/// Kerning offsets below this (in thousandths of an em) read as a word gap
const WORD_GAP_KERNING: f64 = -100.0;

/// How the strings shown with one font are turned into text
#[derive(Debug, Clone, PartialEq)]
enum FontDecoder {
    /// Single-byte font with no CMap
    Plain,
    /// Any font carrying a usable `/ToUnicode` CMap
    Cmap(ToUnicodeMap),
    /// Composite font with no CMap: glyph codes of this width, unreadable
    Opaque { code_len: usize },
}

impl FontDecoder {
    fn from_font(doc: &Document, font: &Dictionary) -> Self {
        let composite = font
            .get(b"Subtype")
            .and_then(Object::as_name_str)
            .is_ok_and(|subtype| subtype == "Type0");
        let code_len = if composite { 2 } else { 1 };

        let cmap = font
            .get(b"ToUnicode")
            .and_then(|obj| doc.dereference(obj))
            .and_then(|(_, obj)| obj.as_stream())
            .map(|stream| {
                let data = stream
                    .decompressed_content()
                    .unwrap_or_else(|_| stream.content.clone());
                ToUnicodeMap::parse(&data, code_len)
            });

        match cmap {
            Ok(map) if !map.is_empty() => FontDecoder::Cmap(map),
            _ if composite => FontDecoder::Opaque { code_len },
            _ => FontDecoder::Plain,
        }
    }

    fn decode(&self, bytes: &[u8]) -> String {
        match self {
            FontDecoder::Plain => decode_pdf_string(bytes),
            FontDecoder::Cmap(map) => map.decode(bytes),
            FontDecoder::Opaque { code_len } => {
                std::iter::repeat(UNMAPPED).take(bytes.len().div_ceil(*code_len)).collect()
            }
        }
    }
}

/// Extract the text of every page, in page order. Pages with no text are dropped.
pub fn extract_pages(data: &[u8]) -> Result<Vec<String>> {
    let doc =
        Document::load_mem(data).map_err(|e| ExtractionError::corrupt(DocumentKind::Pdf, e))?;

    let page_ids = doc.get_pages();
    debug!(pages = page_ids.len(), "Parsed PDF");

    let mut pages = Vec::with_capacity(page_ids.len());
    for (&page_num, &page_id) in page_ids.iter() {
        let text = extract_page_text(&doc, page_id)?;
        let text = text.trim();
        if text.is_empty() {
            debug!(page = page_num, "Page has no extractable text");
            continue;
        }
        pages.push(text.to_string());
    }

    Ok(pages)
}

fn page_decoders(doc: &Document, page_id: ObjectId) -> BTreeMap<Vec<u8>, FontDecoder> {
    doc.get_page_fonts(page_id)
        .into_iter()
        .map(|(name, font)| (name, FontDecoder::from_font(doc, font)))
        .collect()
}

fn extract_page_text(doc: &Document, page_id: ObjectId) -> Result<String> {
    // A page without a content stream is blank, not broken
    let Ok(content) = doc.get_page_content(page_id) else {
        return Ok(String::new());
    };
    let operations = Content::decode(&content)
        .map_err(|e| ExtractionError::corrupt(DocumentKind::Pdf, e))?
        .operations;

    let decoders = page_decoders(doc, page_id);
    let plain = FontDecoder::Plain;
    let mut decoder = &plain;

    let mut text = String::new();
    for op in operations {
        match op.operator.as_str() {
            "Tf" => {
                decoder = op
                    .operands
                    .first()
                    .and_then(|name| name.as_name().ok())
                    .and_then(|name| decoders.get(name))
                    .unwrap_or(&plain);
            }
            "Tj" | "TJ" => {
                for operand in &op.operands {
                    push_operand_text(&mut text, operand, decoder);
                }
            }
            // ' and " move to the next line before showing text
            "'" | "\"" => {
                push_break(&mut text, '\n');
                if let Some(operand) = op.operands.last() {
                    push_operand_text(&mut text, operand, decoder);
                }
            }
            "T*" => push_break(&mut text, '\n'),
            "Td" | "TD" => {
                let dy = op
                    .operands
                    .get(1)
                    .and_then(|o| o.as_float().ok())
                    .unwrap_or(0.0);
                push_break(&mut text, if dy != 0.0 { '\n' } else { ' ' });
            }
            "ET" => push_break(&mut text, '\n'),
            _ => {}
        }
    }

    Ok(text)
}

fn push_break(text: &mut String, sep: char) {
    match text.chars().last() {
        None => {}
        Some('\n') => {}
        Some(c) if c.is_whitespace() && sep == ' ' => {}
        Some(c) if c.is_whitespace() => {
            text.pop();
            text.push(sep);
        }
        Some(_) => text.push(sep),
    }
}

fn push_operand_text(text: &mut String, operand: &Object, decoder: &FontDecoder) {
    match operand {
        Object::String(bytes, _) => text.push_str(&decoder.decode(bytes)),
        Object::Array(items) => {
            for item in items {
                match item {
                    Object::String(bytes, _) => text.push_str(&decoder.decode(bytes)),
                    Object::Integer(n) if (*n as f64) < WORD_GAP_KERNING => text.push(' '),
                    Object::Real(n) if f64::from(*n) < WORD_GAP_KERNING => text.push(' '),
                    _ => {}
                }
            }
        }
        _ => {}
    }
}

fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        if let Ok(s) = String::from_utf16(&units) {
            return s;
        }
    }
    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }
    bytes.iter().map(|&b| b as char).collect()
}
