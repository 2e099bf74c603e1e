use std::collections::BTreeMap;
use rand::seq::SliceRandom;
use rand::Rng;
use crate::error::{MotError, Result};
use crate::services::signature::MAX_WORD_LEN;

/// Fold a character onto the working alphabet `a..=z`.
/// Case is folded and diacritics are stripped; anything else yields `None`.
pub fn fold_letter(c: char) -> Option<char> {
    let lower = c.to_lowercase().next()?;
    let folded = match lower {
        'a'..='z' => lower,
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ĥ' | 'ħ' => 'h',
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ĵ' => 'j',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' | 'ŧ' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ŵ' => 'w',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        _ => return None,
    };
    Some(folded)
}

/// Multi-letter expansions that `fold_letter` cannot express
fn expand_ligature(c: char) -> Option<&'static str> {
    match c.to_lowercase().next()? {
        'æ' => Some("ae"),
        'œ' => Some("oe"),
        'ß' => Some("ss"),
        _ => None,
    }
}

fn is_word_char(c: char) -> bool {
    fold_letter(c).is_some() || expand_ligature(c).is_some()
}

/// Normalize a raw token into an indexable word: non-letter affixes are
/// trimmed, case and diacritics folded. Inner non-letters, empty tokens and
/// tokens longer than `MAX_WORD_LEN` are rejected.
pub fn normalize_word(raw: &str) -> Result<String> {
    let token = raw.trim_matches(|c: char| !is_word_char(c));
    if token.is_empty() {
        return Err(MotError::invalid_word(raw, "no letters"));
    }

    let mut word = String::with_capacity(token.len());
    for c in token.chars() {
        if let Some(folded) = fold_letter(c) {
            word.push(folded);
        } else if let Some(expanded) = expand_ligature(c) {
            word.push_str(expanded);
        } else {
            return Err(MotError::invalid_word(raw, "contains a non-letter"));
        }
    }

    if word.len() > MAX_WORD_LEN {
        return Err(MotError::invalid_word(raw, "longer than the supported word length"));
    }
    Ok(word)
}

/// First field of a raw dictionary record. Records are whitespace or slash
/// delimited; anything after the first delimiter is an affix rule.
pub fn record_word(line: &str) -> Option<&str> {
    line.split(|c: char| c.is_whitespace() || c == '/')
        .find(|field| !field.is_empty())
}

/// Check if a word can be formed using only the available letters,
/// each letter used at most as often as it is available
pub fn contains_only_letters(word: &str, letters: &str) -> bool {
    let mut available: BTreeMap<char, usize> = BTreeMap::new();
    for ch in letters.chars().filter_map(fold_letter) {
        *available.entry(ch).or_insert(0) += 1;
    }

    for ch in word.chars() {
        let Some(ch) = fold_letter(ch) else {
            return false;
        };
        match available.get_mut(&ch) {
            Some(count) if *count > 0 => *count -= 1,
            _ => return false,
        }
    }

    true
}

/// Count vowels and consonants in a word
pub fn count_vowels_consonants(word: &str, vowels: &[char]) -> (usize, usize) {
    let mut vowel_count = 0;
    let mut consonant_count = 0;

    for ch in word.chars().filter_map(fold_letter) {
        if vowels.contains(&ch) {
            vowel_count += 1;
        } else {
            consonant_count += 1;
        }
    }

    (vowel_count, consonant_count)
}

/// Select random letters from a weighted bag, with replacement
pub fn select_random_from_bag<R: Rng + ?Sized>(
    bag: &BTreeMap<char, usize>,
    count: usize,
    rng: &mut R,
) -> Vec<char> {
    let mut pool: Vec<char> = Vec::new();

    // Create a pool with weighted distribution
    for (&letter, &freq) in bag {
        for _ in 0..freq {
            pool.push(letter);
        }
    }

    (0..count).filter_map(|_| pool.choose(rng).copied()).collect()
}
