use std::fmt;
use serde::{Serialize, Serializer};
use crate::error::{MotError, Result};

/// Number of letters in the working alphabet (`a..=z` once folded)
pub const ALPHABET_SIZE: usize = 26;

/// Longest word admitted into the index. Longer words are rejected,
/// never truncated.
pub const MAX_WORD_LEN: usize = 30;

/// Letter-count key shared by the index builder and the solver.
/// Slot `i` counts the `i`-th letter of the alphabet, so two words have
/// equal signatures iff they are anagrams of each other.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature([u8; ALPHABET_SIZE]);

impl Signature {
    /// Signature of a normalized word (lower-case `a..=z` only)
    pub fn of(word: &str) -> Result<Self> {
        if word.is_empty() {
            return Err(MotError::invalid_word(word, "empty"));
        }
        if word.len() > MAX_WORD_LEN {
            return Err(MotError::invalid_word(word, "longer than the supported word length"));
        }

        let mut counts = [0u8; ALPHABET_SIZE];
        for c in word.chars() {
            let slot = letter_slot(c)
                .ok_or_else(|| MotError::invalid_word(word, "letter outside the alphabet"))?;
            counts[slot] += 1;
        }
        Ok(Signature(counts))
    }

    pub fn from_counts(counts: [u8; ALPHABET_SIZE]) -> Self {
        Signature(counts)
    }

    pub fn counts(&self) -> &[u8; ALPHABET_SIZE] {
        &self.0
    }

    pub fn count(&self, letter: char) -> u8 {
        letter_slot(letter).map(|slot| self.0[slot]).unwrap_or(0)
    }

    /// Number of letters the signature stands for
    pub fn len(&self) -> usize {
        self.0.iter().map(|&n| n as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    /// Component-wise `self <= other`
    pub fn is_subset_of(&self, other: &Signature) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a <= b)
    }

    /// The letters in alphabetical order, e.g. `acst` for "cats"
    pub fn letters(&self) -> String {
        let mut out = String::with_capacity(self.len());
        for (slot, &n) in self.0.iter().enumerate() {
            for _ in 0..n {
                out.push(slot_letter(slot));
            }
        }
        out
    }
}

pub fn letter_slot(c: char) -> Option<usize> {
    if c.is_ascii_lowercase() {
        Some((c as u8 - b'a') as usize)
    } else {
        None
    }
}

pub fn slot_letter(slot: usize) -> char {
    (b'a' + slot as u8) as char
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.letters())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.letters())
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.letters())
    }
}
