// src/translator.rs
// Text to Morse token translation

use crate::normalize::{KanaNormalizer, Normalize};
use crate::table::{Element, SymbolTable};

/// Intermediate representation between translation and playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MorseToken {
    Dot,
    Dash,
    /// Silence standing in for a space or a character with no code.
    Gap,
}

impl MorseToken {
    /// `.` and `-` are elements; every other character reads as a gap.
    pub fn from_char(c: char) -> Self {
        match c {
            '.' => MorseToken::Dot,
            '-' => MorseToken::Dash,
            _ => MorseToken::Gap,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            MorseToken::Dot => '.',
            MorseToken::Dash => '-',
            MorseToken::Gap => ' ',
        }
    }
}

impl From<Element> for MorseToken {
    fn from(element: Element) -> Self {
        match element {
            Element::Dot => MorseToken::Dot,
            Element::Dash => MorseToken::Dash,
        }
    }
}

/// Maps already-normalized text to tokens.
///
/// Known characters contribute their code with no separator in between;
/// anything missing from the table (whitespace included) becomes one `Gap`.
/// Never fails.
pub fn translate_normalized(normalized: &str, table: &SymbolTable) -> Vec<MorseToken> {
    let mut tokens = Vec::with_capacity(normalized.len() * 4);
    for ch in normalized.chars() {
        match table.get(ch) {
            Some(code) => tokens.extend(code.iter().copied().map(MorseToken::from)),
            None => tokens.push(MorseToken::Gap),
        }
    }
    tokens
}

/// Textual code form: `.` `-` and a space per gap.
pub fn render(tokens: &[MorseToken]) -> String {
    tokens.iter().map(|t| t.as_char()).collect()
}

/// Reads a raw code string back into tokens.
pub fn parse_code(code: &str) -> Vec<MorseToken> {
    code.chars().map(MorseToken::from_char).collect()
}

/// Normalizes text and looks it up in a symbol table.
#[derive(Debug, Clone)]
pub struct Translator<N = KanaNormalizer> {
    table: SymbolTable,
    normalizer: N,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(SymbolTable::standard())
    }
}

impl Translator {
    pub fn new(table: SymbolTable) -> Self {
        Self::with_normalizer(table, KanaNormalizer)
    }
}

impl<N: Normalize> Translator<N> {
    pub fn with_normalizer(table: SymbolTable, normalizer: N) -> Self {
        Self { table, normalizer }
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    pub fn into_parts(self) -> (SymbolTable, N) {
        (self.table, self.normalizer)
    }

    pub fn translate(&self, text: &str) -> Vec<MorseToken> {
        let normalized = self.normalizer.normalize(text);
        let tokens = translate_normalized(&normalized, &self.table);
        log::debug!(
            "Translated {:?} -> {:?} ({} tokens)",
            normalized,
            render(&tokens),
            tokens.len()
        );
        tokens
    }
}
