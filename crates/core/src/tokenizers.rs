//! Text tokenizers
//!
//! Provides the `Tokenizer` trait and the implementations used to split text
//! into comparison units. Every tokenizer is lossless: the returned slices
//! borrow from the input and concatenate back to exactly the input text.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Comparison unit size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Words (with CJK code points split out individually)
    #[default]
    Word,
    /// User-perceived characters (extended grapheme clusters)
    Character,
}

/// Which word segmentation strategy a `TokenizerSet` uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmenterKind {
    /// UAX #29 word boundaries
    #[default]
    Unicode,
    /// Whitespace/CJK regex segmentation
    Fallback,
}

/// Trait for tokenizers that split text into tokens
pub trait Tokenizer: Send + Sync {
    /// Split `text` into an ordered sequence of non-empty slices.
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Get the name of this tokenizer
    fn name(&self) -> &str;

    /// Clone this tokenizer into a Box
    fn clone_box(&self) -> Box<dyn Tokenizer>;
}

impl Clone for Box<dyn Tokenizer> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl std::fmt::Debug for dyn Tokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Tokenizer").field(&self.name()).finish()
    }
}

// ============================================================================
// Built-in Tokenizers
// ============================================================================

/// Character-level tokenizer (one token per grapheme cluster)
#[derive(Debug, Clone, Default)]
pub struct CharacterTokenizer;

impl Tokenizer for CharacterTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.graphemes(true).collect()
    }

    fn name(&self) -> &str {
        "character"
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(self.clone())
    }
}

/// Word tokenizer backed by Unicode word boundaries.
///
/// Segments are the UAX #29 word-bound pieces of the text (words, whitespace
/// runs and punctuation each stand alone). Any segment holding a CJK, Kana or
/// Hangul code point is broken down further so that every such code point is
/// a token of its own, since those scripts carry no inter-word spacing.
#[derive(Debug, Clone, Default)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut tokens = Vec::new();

        for segment in text.split_word_bounds() {
            if segment.chars().any(is_cjk) {
                split_around_cjk(segment, &mut tokens, |run, tokens| tokens.push(run));
            } else {
                tokens.push(segment);
            }
        }

        tokens
    }

    fn name(&self) -> &str {
        "word"
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(self.clone())
    }
}

/// Emit each CJK code point alone and hand the non-CJK runs between them to
/// `split_run`.
fn split_around_cjk<'a>(
    text: &'a str,
    tokens: &mut Vec<&'a str>,
    split_run: impl Fn(&'a str, &mut Vec<&'a str>),
) {
    let mut run_start = 0;

    for (pos, ch) in text.char_indices() {
        if is_cjk(ch) {
            if run_start < pos {
                split_run(&text[run_start..pos], tokens);
            }
            let end = pos + ch.len_utf8();
            tokens.push(&text[pos..end]);
            run_start = end;
        }
    }

    if run_start < text.len() {
        split_run(&text[run_start..], tokens);
    }
}

static FALLBACK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+|\S+\s*")
        .expect("fallback word regex is a compile-time constant and must be valid")
});

/// Word tokenizer used when boundary segmentation is not wanted.
///
/// Tokens are a CJK/Kana/Hangul code point (as decided by [`is_cjk`]), a
/// whitespace run, or a run of other non-whitespace characters together with
/// the whitespace that trails it.
#[derive(Debug, Clone, Default)]
pub struct FallbackWordTokenizer;

impl Tokenizer for FallbackWordTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut tokens = Vec::new();

        split_around_cjk(text, &mut tokens, |run, tokens| {
            tokens.extend(FALLBACK_RUN_RE.find_iter(run).map(|m| m.as_str()));
        });

        tokens
    }

    fn name(&self) -> &str {
        "fallback_word"
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(self.clone())
    }
}

/// The tokenizers picked for one session, one per granularity.
///
/// The strategy is chosen once at construction so that every recompute within
/// a session segments text the same way.
#[derive(Debug, Clone)]
pub struct TokenizerSet {
    kind: SegmenterKind,
    word: Box<dyn Tokenizer>,
    character: Box<dyn Tokenizer>,
}

impl TokenizerSet {
    pub fn new(kind: SegmenterKind) -> Self {
        let word: Box<dyn Tokenizer> = match kind {
            SegmenterKind::Unicode => Box::new(WordTokenizer),
            SegmenterKind::Fallback => Box::new(FallbackWordTokenizer),
        };

        Self {
            kind,
            word,
            character: Box::new(CharacterTokenizer),
        }
    }

    pub fn kind(&self) -> SegmenterKind {
        self.kind
    }

    /// Get the tokenizer for a granularity
    pub fn for_granularity(&self, granularity: Granularity) -> &dyn Tokenizer {
        match granularity {
            Granularity::Word => self.word.as_ref(),
            Granularity::Character => self.character.as_ref(),
        }
    }

    pub fn tokenize<'a>(&self, text: &'a str, granularity: Granularity) -> Vec<&'a str> {
        self.for_granularity(granularity).tokenize(text)
    }
}

impl Default for TokenizerSet {
    fn default() -> Self {
        Self::new(SegmenterKind::default())
    }
}

/// Tokenize `text` at the given granularity using Unicode segmentation.
pub fn tokenize(text: &str, granularity: Granularity) -> Vec<&str> {
    match granularity {
        Granularity::Word => WordTokenizer.tokenize(text),
        Granularity::Character => CharacterTokenizer.tokenize(text),
    }
}

/// Whether `ch` belongs to a script written without inter-word spacing
/// (Han ideographs, Hiragana, Katakana, Hangul).
pub fn is_cjk(ch: char) -> bool {
    matches!(
        ch as u32,
        0x1100..=0x11FF     // Hangul Jamo
            | 0x2E80..=0x2FDF   // CJK radicals, Kangxi radicals
            | 0x3005..=0x3007   // iteration mark, closing mark, ideographic zero
            | 0x3040..=0x309F   // Hiragana
            | 0x30A0..=0x30FF   // Katakana
            | 0x3130..=0x318F   // Hangul compatibility Jamo
            | 0x31F0..=0x31FF   // Katakana phonetic extensions
            | 0x3400..=0x4DBF   // CJK extension A
            | 0x4E00..=0x9FFF   // CJK unified ideographs
            | 0xA960..=0xA97F   // Hangul Jamo extended-A
            | 0xAC00..=0xD7AF   // Hangul syllables
            | 0xD7B0..=0xD7FF   // Hangul Jamo extended-B
            | 0xF900..=0xFAFF   // CJK compatibility ideographs
            | 0xFF66..=0xFF9F   // halfwidth Katakana
            | 0xFFA0..=0xFFDC   // halfwidth Hangul
            | 0x20000..=0x323AF // CJK extensions B-H
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(tokenize("", Granularity::Word).is_empty());
        assert!(tokenize("", Granularity::Character).is_empty());
        assert!(FallbackWordTokenizer.tokenize("").is_empty());
    }

    #[test]
    fn test_character_tokenizer_graphemes() {
        let tokens = tokenize("ae\u{301}🇫🇷", Granularity::Character);

        assert_eq!(tokens, vec!["a", "e\u{301}", "🇫🇷"]);
    }

    #[test]
    fn test_word_tokenizer() {
        let tokens = tokenize("hello, world", Granularity::Word);

        assert_eq!(tokens, vec!["hello", ",", " ", "world"]);
    }

    #[test]
    fn test_word_tokenizer_splits_cjk() {
        let tokens = tokenize("我爱Rust语言", Granularity::Word);

        assert_eq!(tokens, vec!["我", "爱", "Rust", "语", "言"]);
    }

    #[test]
    fn test_word_tokenizer_splits_kana_and_hangul() {
        let tokens = tokenize("カタカナ 한국", Granularity::Word);

        assert_eq!(tokens, vec!["カ", "タ", "カ", "ナ", " ", "한", "국"]);
    }

    #[test]
    fn test_fallback_keeps_trailing_whitespace() {
        let tokens = FallbackWordTokenizer.tokenize("  alpha bravo\n\ncharlie");

        assert_eq!(tokens, vec!["  ", "alpha ", "bravo\n\n", "charlie"]);
    }

    #[test]
    fn test_fallback_splits_cjk() {
        let tokens = FallbackWordTokenizer.tokenize("我们 go");

        assert_eq!(tokens, vec!["我", "们", " ", "go"]);
    }

    #[test]
    fn test_fallback_splits_kana_block_marks() {
        assert_eq!(FallbackWordTokenizer.tokenize("aー"), vec!["a", "ー"]);
        assert_eq!(FallbackWordTokenizer.tokenize("か\u{3099}x"), vec!["か", "\u{3099}", "x"]);
        assert_eq!(FallbackWordTokenizer.tokenize("x・y z"), vec!["x", "・", "y ", "z"]);
    }

    #[test]
    fn test_segmenters_agree_on_cjk_tokens() {
        let text = "データー・ベース と 한국어, 中文ー";
        let cjk_tokens = |tokens: Vec<&str>| -> Vec<String> {
            tokens
                .into_iter()
                .filter(|t| t.chars().any(is_cjk))
                .map(str::to_string)
                .collect()
        };

        let unicode = cjk_tokens(WordTokenizer.tokenize(text));
        let fallback = cjk_tokens(FallbackWordTokenizer.tokenize(text));

        assert_eq!(unicode, fallback);
        assert!(unicode.iter().all(|t| t.chars().count() == 1));
    }

    #[test]
    fn test_tokenizers_are_lossless() {
        let text = "Mixed 文本 with émojis 👍🏽 and\ttabs\n\n  한국어 テスト.";

        for tokenizer in [
            Box::new(CharacterTokenizer) as Box<dyn Tokenizer>,
            Box::new(WordTokenizer),
            Box::new(FallbackWordTokenizer),
        ] {
            let tokens = tokenizer.tokenize(text);
            assert_eq!(tokens.concat(), text, "{} is lossy", tokenizer.name());
            assert!(tokens.iter().all(|t| !t.is_empty()));
        }
    }

    #[test]
    fn test_tokenizer_set_selection() {
        let set = TokenizerSet::new(SegmenterKind::Fallback);

        assert_eq!(set.kind(), SegmenterKind::Fallback);
        assert_eq!(set.for_granularity(Granularity::Word).name(), "fallback_word");
        assert_eq!(set.for_granularity(Granularity::Character).name(), "character");
        assert_eq!(TokenizerSet::default().for_granularity(Granularity::Word).name(), "word");
    }

    #[test]
    fn test_is_cjk() {
        assert!(is_cjk('中'));
        assert!(is_cjk('ひ'));
        assert!(is_cjk('ア'));
        assert!(is_cjk('한'));
        assert!(!is_cjk('a'));
        assert!(!is_cjk('é'));
        assert!(!is_cjk('。'));
    }
}
