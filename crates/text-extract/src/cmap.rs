//! ToUnicode CMap parsing
//!
//! Composite (Type0) fonts show text as glyph codes, usually two bytes each,
//! and carry a `/ToUnicode` stream that maps those codes back to text. Only
//! the parts needed for extraction are read: `codespacerange`, `bfchar` and
//! `bfrange`.

use std::collections::BTreeMap;

/// Upper bound on codes expanded from a single `bfrange` entry
const MAX_RANGE_LEN: u32 = 0x1_0000;

/// Character emitted for codes the map does not cover
pub const UNMAPPED: char = '\u{FFFD}';

#[derive(Debug, Clone, PartialEq, Eq)]
struct CodeSpace {
    len: usize,
    low: u32,
    high: u32,
}

/// Code-to-text table parsed from a `/ToUnicode` stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToUnicodeMap {
    code_spaces: Vec<CodeSpace>,
    default_code_len: usize,
    mappings: BTreeMap<u32, String>,
}

impl ToUnicodeMap {
    /// Parse a CMap program. `default_code_len` applies when it declares no codespace.
    pub fn parse(data: &[u8], default_code_len: usize) -> Self {
        let mut map = ToUnicodeMap {
            code_spaces: Vec::new(),
            default_code_len: default_code_len.clamp(1, 4),
            mappings: BTreeMap::new(),
        };

        let tokens = tokenize(data);
        let mut i = 0;
        while i < tokens.len() {
            let section = match &tokens[i] {
                Token::Word(w) if w.as_slice() == b"begincodespacerange" => Section::CodeSpace,
                Token::Word(w) if w.as_slice() == b"beginbfchar" => Section::BfChar,
                Token::Word(w) if w.as_slice() == b"beginbfrange" => Section::BfRange,
                _ => {
                    i += 1;
                    continue;
                }
            };
            let start = i + 1;
            let end = tokens[start..]
                .iter()
                .position(|t| matches!(t, Token::Word(w) if w.starts_with(b"end")))
                .map_or(tokens.len(), |p| start + p);
            map.read_section(section, &tokens[start..end]);
            i = end + 1;
        }

        map
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Decode a shown string through the map, code by code
    pub fn decode(&self, bytes: &[u8]) -> String {
        let mut text = String::new();
        let mut rest = bytes;
        while !rest.is_empty() {
            let len = self.code_len_at(rest).min(rest.len());
            let code = be_code(&rest[..len]);
            match self.mappings.get(&code) {
                Some(s) => text.push_str(s),
                None => text.push(UNMAPPED),
            }
            rest = &rest[len..];
        }
        text
    }

    fn code_len_at(&self, bytes: &[u8]) -> usize {
        if self.code_spaces.is_empty() {
            return self.default_code_len;
        }
        self.code_spaces
            .iter()
            .find(|space| {
                bytes.len() >= space.len && (space.low..=space.high).contains(&be_code(&bytes[..space.len]))
            })
            .or_else(|| self.code_spaces.iter().min_by_key(|space| space.len))
            .map_or(self.default_code_len, |space| space.len)
    }

    fn read_section(&mut self, section: Section, tokens: &[Token]) {
        match section {
            Section::CodeSpace => {
                for pair in tokens.chunks_exact(2) {
                    if let (Token::Hex(low), Token::Hex(high)) = (&pair[0], &pair[1]) {
                        if (1..=4).contains(&low.len()) {
                            self.code_spaces.push(CodeSpace {
                                len: low.len(),
                                low: be_code(low),
                                high: be_code(high),
                            });
                        }
                    }
                }
                self.code_spaces.sort_by_key(|space| space.len);
            }
            Section::BfChar => {
                for pair in tokens.chunks_exact(2) {
                    if let (Token::Hex(src), Token::Hex(dst)) = (&pair[0], &pair[1]) {
                        self.mappings.insert(be_code(src), utf16_be(dst));
                    }
                }
            }
            Section::BfRange => self.read_ranges(tokens),
        }
    }

    fn read_ranges(&mut self, tokens: &[Token]) {
        let mut i = 0;
        while i + 2 < tokens.len() {
            let (Token::Hex(low), Token::Hex(high)) = (&tokens[i], &tokens[i + 1]) else {
                i += 1;
                continue;
            };
            let low = be_code(low);
            let high = be_code(high).min(low.saturating_add(MAX_RANGE_LEN - 1));

            match &tokens[i + 2] {
                Token::Hex(dst) => {
                    for (offset, code) in (low..=high).enumerate() {
                        self.mappings.insert(code, offset_utf16_be(dst, offset as u16));
                    }
                    i += 3;
                }
                Token::ArrayStart => {
                    let mut j = i + 3;
                    let mut code = low;
                    while j < tokens.len() && tokens[j] != Token::ArrayEnd {
                        if let Token::Hex(dst) = &tokens[j] {
                            if code <= high {
                                self.mappings.insert(code, utf16_be(dst));
                            }
                            code = code.saturating_add(1);
                        }
                        j += 1;
                    }
                    i = j + 1;
                }
                _ => i += 3,
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Section {
    CodeSpace,
    BfChar,
    BfRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Hex(Vec<u8>),
    Word(Vec<u8>),
    ArrayStart,
    ArrayEnd,
}

fn tokenize(data: &[u8]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < data.len() {
        match data[i] {
            b if b.is_ascii_whitespace() => i += 1,
            b'%' => {
                while i < data.len() && data[i] != b'\n' && data[i] != b'\r' {
                    i += 1;
                }
            }
            b'[' => {
                tokens.push(Token::ArrayStart);
                i += 1;
            }
            b']' => {
                tokens.push(Token::ArrayEnd);
                i += 1;
            }
            // Dictionary delimiters carry nothing we read
            b'<' if data.get(i + 1) == Some(&b'<') => i += 2,
            b'>' if data.get(i + 1) == Some(&b'>') => i += 2,
            b'<' => {
                let end = data[i..]
                    .iter()
                    .position(|&b| b == b'>')
                    .map_or(data.len(), |p| i + p);
                tokens.push(Token::Hex(hex_bytes(&data[i + 1..end])));
                i = end + 1;
            }
            b'(' => {
                let mut depth = 0usize;
                while i < data.len() {
                    match data[i] {
                        b'\\' => i += 1,
                        b'(' => depth += 1,
                        b')' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                    i += 1;
                }
                i += 1;
            }
            _ => {
                let start = i;
                while i < data.len() && !is_delimiter(data[i]) {
                    i += 1;
                }
                if i == start {
                    i += 1;
                } else {
                    tokens.push(Token::Word(data[start..i].to_vec()));
                }
            }
        }
    }
    tokens
}

fn is_delimiter(b: u8) -> bool {
    b.is_ascii_whitespace() || matches!(b, b'<' | b'>' | b'[' | b']' | b'(' | b')' | b'%')
}

fn hex_bytes(digits: &[u8]) -> Vec<u8> {
    let nibbles: Vec<u8> = digits
        .iter()
        .filter_map(|&b| (b as char).to_digit(16).map(|d| d as u8))
        .collect();
    nibbles
        .chunks(2)
        .map(|pair| (pair[0] << 4) | pair.get(1).copied().unwrap_or(0))
        .collect()
}

fn be_code(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
}

fn utf16_be(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair.get(1).copied().unwrap_or(0)]))
        .collect();
    String::from_utf16_lossy(&units)
}

/// Destination of the `offset`-th code in a `bfrange`: the last UTF-16 unit is incremented
fn offset_utf16_be(bytes: &[u8], offset: u16) -> String {
    let mut units: Vec<u16> = bytes
        .chunks(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair.get(1).copied().unwrap_or(0)]))
        .collect();
    if let Some(last) = units.last_mut() {
        *last = last.wrapping_add(offset);
    }
    String::from_utf16_lossy(&units)
}
