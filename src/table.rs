// src/table.rs
// Character to Morse code lookup

use crate::error::TableError;
use std::collections::HashMap;
use std::path::Path;

/// A single keyed element of a Morse character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Dot,
    Dash,
}

impl Element {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Element::Dot),
            '-' => Some(Element::Dash),
            _ => None,
        }
    }
}

/// Immutable mapping from a normalized character to its code.
///
/// Keys are matched exactly, so lookups expect text that has already been
/// through a [`Normalize`](crate::normalize::Normalize) pass (upper-case
/// Latin, half-width katakana).
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: HashMap<char, Vec<Element>>,
}

impl SymbolTable {
    /// Latin letters, digits, punctuation and Wabun (half-width katakana).
    pub fn standard() -> Self {
        let entries = STANDARD_CODES
            .iter()
            .map(|&(ch, code)| (ch, code.chars().filter_map(Element::from_char).collect()))
            .collect();
        Self { entries }
    }

    pub fn get(&self, ch: char) -> Option<&[Element]> {
        self.entries.get(&ch).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &[Element])> {
        self.entries.iter().map(|(&ch, code)| (ch, code.as_slice()))
    }

    /// Parses the line-oriented table format: `<char> <code>` per line,
    /// with blank lines and `#` comments ignored.
    pub fn parse(source: &str) -> Result<Self, TableError> {
        let mut entries = HashMap::new();

        for (idx, raw) in source.lines().enumerate() {
            let line = idx + 1;
            let text = raw.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            let mut fields = text.split_whitespace();
            let (Some(key), Some(code), None) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(TableError::Syntax {
                    line,
                    message: format!("expected `<char> <code>`, got {text:?}"),
                });
            };

            let mut chars = key.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                return Err(TableError::Syntax {
                    line,
                    message: format!("key {key:?} is not a single character"),
                });
            };

            let elements = code
                .chars()
                .map(|c| {
                    Element::from_char(c).ok_or_else(|| TableError::Syntax {
                        line,
                        message: format!("invalid code symbol {c:?} in {code:?}"),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            if entries.insert(ch, elements).is_some() {
                return Err(TableError::Duplicate { line, ch });
            }
        }

        log::debug!("Parsed symbol table with {} entries", entries.len());
        Ok(Self { entries })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source)
    }
}

const STANDARD_CODES: &[(char, &str)] = &[
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    ('0', "-----"),
    ('.', ".-.-.-"),
    (',', "--..--"),
    ('?', "..--.."),
    ('/', "-..-."),
    ('-', "-....-"),
    ('(', "-.--."),
    (')', "-.--.-"),
    ('=', "-...-"),
    ('+', ".-.-."),
    (':', "---..."),
    ('\'', ".----."),
    ('"', ".-..-."),
    ('@', ".--.-."),
    ('!', "-.-.--"),
    ('&', ".-..."),
    // Wabun, iroha order
    ('ｲ', ".-"),
    ('ﾛ', ".-.-"),
    ('ﾊ', "-..."),
    ('ﾆ', "-.-."),
    ('ﾎ', "-.."),
    ('ﾍ', "."),
    ('ﾄ', "..-.."),
    ('ﾁ', "..-."),
    ('ﾘ', "--."),
    ('ﾇ', "...."),
    ('ﾙ', "-.--."),
    ('ｦ', ".---"),
    ('ﾜ', "-.-"),
    ('ｶ', ".-.."),
    ('ﾖ', "--"),
    ('ﾀ', "-."),
    ('ﾚ', "---"),
    ('ｿ', "---."),
    ('ﾂ', ".--."),
    ('ﾈ', "--.-"),
    ('ﾅ', ".-."),
    ('ﾗ', "..."),
    ('ﾑ', "-"),
    ('ｳ', "..-"),
    ('ヰ', ".-..-"),
    ('ﾉ', "..--"),
    ('ｵ', ".-..."),
    ('ｸ', "...-"),
    ('ﾔ', ".--"),
    ('ﾏ', "-..-"),
    ('ｹ', "-.--"),
    ('ﾌ', "--.."),
    ('ｺ', "----"),
    ('ｴ', "-.---"),
    ('ﾃ', ".-.--"),
    ('ｱ', "--.--"),
    ('ｻ', "-.-.-"),
    ('ｷ', "-.-.."),
    ('ﾕ', "-..--"),
    ('ﾒ', "-...-"),
    ('ﾐ', "..-.-"),
    ('ｼ', "--.-."),
    ('ヱ', ".--.."),
    ('ﾋ', "--..-"),
    ('ﾓ', "-..-."),
    ('ｾ', ".---."),
    ('ｽ', "---.-"),
    ('ﾝ', ".-.-."),
    ('ﾞ', ".."),
    ('ﾟ', "..--."),
    ('ｰ', ".--.-"),
    ('､', ".-.-.-"),
    ('｡', ".-.-.."),
    // Only the closing bracket has a Wabun code; `｢` plays as a gap.
    ('｣', ".-.-.."),
    // Small kana are keyed like their full-size forms.
    ('ｧ', "--.--"),
    ('ｨ', ".-"),
    ('ｩ', "..-"),
    ('ｪ', "-.---"),
    ('ｫ', ".-..."),
    ('ｬ', ".--"),
    ('ｭ', "-..--"),
    ('ｮ', "--"),
    ('ｯ', ".--."),
];
