// src/normalize.rs
// Folds script variants into the alphabet the symbol table is keyed by

/// Maps raw input text onto the canonical lookup alphabet.
pub trait Normalize {
    fn normalize(&self, text: &str) -> String;
}

/// Canonical form for mixed Japanese/Latin text:
/// hiragana and full-width katakana become half-width katakana (voiced kana
/// split into base + `ﾞ`/`ﾟ`), full-width ASCII becomes ASCII, and
/// everything is upper-cased.
#[derive(Debug, Clone, Copy, Default)]
pub struct KanaNormalizer;

impl Normalize for KanaNormalizer {
    fn normalize(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for ch in text.chars() {
            match to_half_width(hiragana_to_katakana(ch)) {
                Folded::Char(c) => out.extend(c.to_uppercase()),
                Folded::Kana(kana) => out.push_str(kana),
            }
        }
        out
    }
}

enum Folded {
    Char(char),
    Kana(&'static str),
}

const HIRAGANA_START: u32 = 0x3041;
const HIRAGANA_END: u32 = 0x3096;
const KATAKANA_OFFSET: u32 = 0x60;

fn hiragana_to_katakana(ch: char) -> char {
    let code = ch as u32;
    if (HIRAGANA_START..=HIRAGANA_END).contains(&code) {
        char::from_u32(code + KATAKANA_OFFSET).unwrap_or(ch)
    } else {
        ch
    }
}

const FULLWIDTH_ASCII_START: u32 = 0xFF01;
const FULLWIDTH_ASCII_END: u32 = 0xFF5E;
const FULLWIDTH_ASCII_OFFSET: u32 = 0xFEE0;

const KATAKANA_START: u32 = 0x30A1;

/// Half-width forms of U+30A1 (ァ) through U+30F6 (ヶ).
/// ヰ and ヱ have no half-width form and are left alone.
const HALF_WIDTH_KATAKANA: [&str; 86] = [
    "ｧ", "ｱ", "ｨ", "ｲ", "ｩ", "ｳ", "ｪ", "ｴ", "ｫ", "ｵ", // ァ..オ
    "ｶ", "ｶﾞ", "ｷ", "ｷﾞ", "ｸ", "ｸﾞ", "ｹ", "ｹﾞ", "ｺ", "ｺﾞ", // カ..ゴ
    "ｻ", "ｻﾞ", "ｼ", "ｼﾞ", "ｽ", "ｽﾞ", "ｾ", "ｾﾞ", "ｿ", "ｿﾞ", // サ..ゾ
    "ﾀ", "ﾀﾞ", "ﾁ", "ﾁﾞ", "ｯ", "ﾂ", "ﾂﾞ", "ﾃ", "ﾃﾞ", "ﾄ", "ﾄﾞ", // タ..ド
    "ﾅ", "ﾆ", "ﾇ", "ﾈ", "ﾉ", // ナ..ノ
    "ﾊ", "ﾊﾞ", "ﾊﾟ", "ﾋ", "ﾋﾞ", "ﾋﾟ", "ﾌ", "ﾌﾞ", "ﾌﾟ", // ハ..プ
    "ﾍ", "ﾍﾞ", "ﾍﾟ", "ﾎ", "ﾎﾞ", "ﾎﾟ", // ヘ..ポ
    "ﾏ", "ﾐ", "ﾑ", "ﾒ", "ﾓ", // マ..モ
    "ｬ", "ﾔ", "ｭ", "ﾕ", "ｮ", "ﾖ", // ャ..ヨ
    "ﾗ", "ﾘ", "ﾙ", "ﾚ", "ﾛ", // ラ..ロ
    "ﾜ", "ﾜ", "ヰ", "ヱ", "ｦ", "ﾝ", // ヮ..ン
    "ｳﾞ", "ｶ", "ｹ", // ヴ..ヶ
];

fn to_half_width(ch: char) -> Folded {
    let code = ch as u32;
    if (KATAKANA_START..KATAKANA_START + HALF_WIDTH_KATAKANA.len() as u32).contains(&code) {
        return Folded::Kana(HALF_WIDTH_KATAKANA[(code - KATAKANA_START) as usize]);
    }
    if (FULLWIDTH_ASCII_START..=FULLWIDTH_ASCII_END).contains(&code) {
        return Folded::Char(char::from_u32(code - FULLWIDTH_ASCII_OFFSET).unwrap_or(ch));
    }
    match ch {
        '\u{3000}' => Folded::Char(' '),
        '、' => Folded::Kana("､"),
        '。' => Folded::Kana("｡"),
        '「' => Folded::Kana("｢"),
        '」' => Folded::Kana("｣"),
        '・' => Folded::Kana("･"),
        'ー' => Folded::Kana("ｰ"),
        '゛' | '\u{3099}' => Folded::Kana("ﾞ"),
        '゜' | '\u{309A}' => Folded::Kana("ﾟ"),
        _ => Folded::Char(ch),
    }
}
