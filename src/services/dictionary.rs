use std::collections::HashMap;
use std::io::{self, Write};
use log::trace;
use serde::Serialize;
use crate::error::Result;
use crate::services::signature::Signature;
use crate::utils::normalize_word;

/// Counters collected while building an index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Raw lines that fell inside the requested range
    pub lines_read: usize,
    pub accepted: usize,
    pub duplicates: usize,
    /// Lines dropped because they held no usable word
    pub rejected: usize,
}

/// Anagram index: signature -> words sharing it, in first-seen order.
/// Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct DictionaryIndex {
    buckets: HashMap<Signature, Vec<String>>,
    words: Vec<String>,
    max_word_len: usize,
    stats: BuildStats,
}

impl DictionaryIndex {
    /// Index a list of words. Malformed entries are skipped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = IndexBuilder::new();
        for word in words {
            builder.add_line(word.as_ref());
        }
        builder.build()
    }

    pub fn lookup(&self, signature: &Signature) -> Option<&[String]> {
        self.buckets.get(signature).map(Vec::as_slice)
    }

    /// Whether the word, once normalized, is in the index
    pub fn contains(&self, word: &str) -> bool {
        let Ok(word) = normalize_word(word) else {
            return false;
        };
        Signature::of(&word)
            .ok()
            .and_then(|sig| self.lookup(&sig))
            .map(|bucket| bucket.iter().any(|w| *w == word))
            .unwrap_or(false)
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Length of the longest indexed word, 0 when empty
    pub fn max_word_len(&self) -> usize {
        self.max_word_len
    }

    /// Accepted words in first-seen order
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Signature, &[String])> {
        self.buckets.iter().map(|(sig, bucket)| (sig, bucket.as_slice()))
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Write the flat form: one normalized word per line, first-seen order.
    /// Reloading it rebuilds the same buckets in the same order.
    pub fn write_flat<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for word in &self.words {
            writeln!(writer, "{}", word)?;
        }
        writer.flush()
    }
}

/// Accumulates words into buckets; `build` freezes the result
#[derive(Debug, Default)]
pub struct IndexBuilder {
    index: DictionaryIndex,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw word. Returns `Ok(false)` for a duplicate.
    pub fn insert(&mut self, raw: &str) -> Result<bool> {
        let word = normalize_word(raw)?;
        let signature = Signature::of(&word)?;

        let bucket = self.index.buckets.entry(signature).or_default();
        if bucket.contains(&word) {
            self.index.stats.duplicates += 1;
            return Ok(false);
        }
        bucket.push(word.clone());
        self.index.max_word_len = self.index.max_word_len.max(word.len());
        self.index.words.push(word);
        self.index.stats.accepted += 1;
        Ok(true)
    }

    /// Count a line and insert it, absorbing malformed entries
    pub(crate) fn add_line(&mut self, raw: &str) {
        self.index.stats.lines_read += 1;
        if let Err(e) = self.insert(raw) {
            trace!("Skipping entry: {}", e);
            self.index.stats.rejected += 1;
        }
    }

    pub(crate) fn reject_line(&mut self) {
        self.index.stats.lines_read += 1;
        self.index.stats.rejected += 1;
    }

    pub fn stats(&self) -> BuildStats {
        self.index.stats
    }

    pub fn build(self) -> DictionaryIndex {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MotError;

    #[test]
    fn test_anagrams_land_in_same_bucket() {
        let index = DictionaryIndex::from_words(["chien", "niche", "chine", "chat"]);
        let bucket = index.lookup(&Signature::of("hcien").unwrap()).unwrap();
        assert_eq!(bucket, ["chien", "niche", "chine"]);
        assert_eq!(index.bucket_count(), 2);
        assert_eq!(index.word_count(), 4);
        assert_eq!(index.max_word_len(), 5);
        assert_eq!(DictionaryIndex::default().max_word_len(), 0);
    }

    #[test]
    fn test_words_reachable_only_by_own_signature() {
        let index = DictionaryIndex::from_words(["cat", "act", "cats", "tacs", "banane"]);
        for (sig, bucket) in index.iter() {
            for word in bucket {
                assert_eq!(Signature::of(word).unwrap(), *sig);
            }
        }
        let total: usize = index.iter().map(|(_, b)| b.len()).sum();
        assert_eq!(total, index.word_count());
    }

    #[test]
    fn test_normalizes_and_skips_duplicates() {
        let index = DictionaryIndex::from_words(["Été", "ete", "ÉTÉ", "tee"]);
        let bucket = index.lookup(&Signature::of("eet").unwrap()).unwrap();
        assert_eq!(bucket, ["ete", "tee"]);

        let stats = index.stats();
        assert_eq!(stats.lines_read, 4);
        assert_eq!(stats.accepted, 2);
        assert_eq!(stats.duplicates, 2);
        assert_eq!(stats.rejected, 0);
    }

    #[test]
    fn test_malformed_entries_are_counted_not_fatal() {
        let index = DictionaryIndex::from_words(["", "42", "porte-clef", "maison"]);
        assert_eq!(index.words(), ["maison"]);
        assert_eq!(index.stats().rejected, 3);
    }

    #[test]
    fn test_insert_reports_invalid_word() {
        let mut builder = IndexBuilder::new();
        assert!(builder.insert("chat").unwrap());
        assert!(!builder.insert("CHAT").unwrap());
        assert!(matches!(builder.insert("x-y"), Err(MotError::InvalidWord { .. })));
    }

    #[test]
    fn test_contains() {
        let index = DictionaryIndex::from_words(["élève", "chat"]);
        assert!(index.contains("eleve"));
        assert!(index.contains("ÉLÈVE"));
        assert!(index.contains("chat"));
        assert!(!index.contains("tach"));
        assert!(!index.contains("12"));
    }

    #[test]
    fn test_write_flat() {
        let index = DictionaryIndex::from_words(["Chien", "niche", "chat"]);
        let mut out = Vec::new();
        index.write_flat(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "chien\nniche\nchat\n");
    }
}
