//! DOCX text extraction
//!
//! DOCX files are ZIP archives; the body lives in `word/document.xml`.
//! Each `w:p` element becomes one paragraph built from its `w:t` runs.

use std::io::{Cursor, Read, Seek};

use quick_xml::events::Event;
use quick_xml::Reader;
use shared_types::DocumentKind;
use tracing::debug;

use crate::error::{ExtractionError, Result};

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract every paragraph, in document order. Empty paragraphs are kept.
pub fn extract_paragraphs(data: &[u8]) -> Result<Vec<String>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data)).map_err(corrupt)?;
    let xml = read_document_xml(&mut archive)?;
    let paragraphs = parse_document_xml(&xml)?;
    debug!(paragraphs = paragraphs.len(), "Parsed DOCX");
    Ok(paragraphs)
}

fn corrupt(err: impl ToString) -> ExtractionError {
    ExtractionError::corrupt(DocumentKind::Docx, err)
}

fn read_document_xml<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> Result<String> {
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| corrupt(format!("cannot find {}: {}", DOCUMENT_PART, e)))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml).map_err(corrupt)?;
    Ok(xml)
}

fn parse_document_xml(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    // Whitespace inside w:t is significant (xml:space="preserve")
    reader.config_mut().trim_text(false);

    let mut paragraphs = Vec::new();
    // Text boxes nest paragraphs inside paragraphs
    let mut open: Vec<String> = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => open.push(String::new()),
                b"w:t" => in_text = true,
                b"w:tab" => push_char(&mut open, '\t'),
                b"w:br" | b"w:cr" => push_char(&mut open, '\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:p" => paragraphs.push(String::new()),
                b"w:tab" => push_char(&mut open, '\t'),
                b"w:br" | b"w:cr" => push_char(&mut open, '\n'),
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    if let Some(paragraph) = open.pop() {
                        paragraphs.push(paragraph);
                    }
                }
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let text = e.unescape().map_err(corrupt)?;
                if let Some(paragraph) = open.last_mut() {
                    paragraph.push_str(&text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(corrupt(format!(
                    "XML error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn push_char(open: &mut [String], c: char) {
    if let Some(paragraph) = open.last_mut() {
        paragraph.push(c);
    }
}
