//! Longest-word search over the sub-multisets of a draw.
//!
//! Candidates are enumerated as letter-count vectors, never as tile
//! arrangements: a draw holding the same letter several times yields each
//! multiset once. Lengths are walked from the full draw downwards and the
//! search stops at the first length with a dictionary hit.

use std::collections::HashSet;
use log::debug;
use serde::Serialize;
use crate::error::{MotError, Result};
use crate::services::dictionary::DictionaryIndex;
use crate::services::generator::Draw;
use crate::services::signature::{letter_slot, Signature, ALPHABET_SIZE, MAX_WORD_LEN};
use crate::utils::fold_letter;

/// Largest draw the solver accepts
pub const MAX_DRAW_LEN: usize = 64;

/// Outcome of a solve. `best_length == 0` means no word was found,
/// which is a normal outcome rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    pub best_length: usize,
    pub best_words: Vec<String>,
    /// Letter counts of the whole draw
    pub searched: Signature,
}

impl Solution {
    fn not_found(searched: Signature) -> Self {
        Self { best_length: 0, best_words: Vec::new(), searched }
    }

    pub fn is_found(&self) -> bool {
        self.best_length > 0
    }
}

/// Letter counts of a draw, folding case and diacritics
fn draw_signature(draw: &Draw) -> Result<Signature> {
    if draw.is_empty() {
        return Err(MotError::invalid_draw("", "empty draw"));
    }
    if draw.len() > MAX_DRAW_LEN {
        return Err(MotError::invalid_draw(&draw.as_string(), "too many tiles"));
    }

    let mut counts = [0u8; ALPHABET_SIZE];
    for &tile in draw.letters() {
        let slot = fold_letter(tile)
            .and_then(letter_slot)
            .ok_or_else(|| MotError::invalid_draw(&draw.as_string(), "tile outside the alphabet"))?;
        counts[slot] += 1;
    }
    Ok(Signature::from_counts(counts))
}

/// Walks every distinct sub-multiset of a fixed size
struct SubsetWalker {
    /// (slot, available count) for each distinct letter of the draw
    letters: Vec<(usize, u8)>,
    /// `reach[i]`: tiles still available from `letters[i..]`
    reach: Vec<usize>,
    candidate: [u8; ALPHABET_SIZE],
}

impl SubsetWalker {
    fn new(draw: &Signature) -> Self {
        let letters: Vec<(usize, u8)> = draw
            .counts()
            .iter()
            .enumerate()
            .filter(|&(_, &n)| n > 0)
            .map(|(slot, &n)| (slot, n))
            .collect();

        let mut reach = vec![0; letters.len() + 1];
        for i in (0..letters.len()).rev() {
            reach[i] = reach[i + 1] + letters[i].1 as usize;
        }

        Self { letters, reach, candidate: [0; ALPHABET_SIZE] }
    }

    fn walk<F: FnMut(&Signature)>(&mut self, length: usize, visit: &mut F) {
        self.descend(0, length, visit);
    }

    fn descend<F: FnMut(&Signature)>(&mut self, i: usize, remaining: usize, visit: &mut F) {
        if remaining == 0 {
            visit(&Signature::from_counts(self.candidate));
            return;
        }
        if i == self.letters.len() || self.reach[i] < remaining {
            return;
        }

        let (slot, available) = self.letters[i];
        let most = (available as usize).min(remaining);
        // The letters after this one must be able to cover the rest
        let least = remaining.saturating_sub(self.reach[i + 1]);
        for take in (least..=most).rev() {
            self.candidate[slot] = take as u8;
            self.descend(i + 1, remaining - take, visit);
        }
        self.candidate[slot] = 0;
    }
}

/// Number of sub-multisets of `draw`, all sizes included
fn candidate_space(draw: &Signature) -> u64 {
    draw.counts()
        .iter()
        .fold(1u64, |acc, &n| acc.saturating_mul(n as u64 + 1))
}

/// Append the words of each bucket once, in bucket order
fn collect_words<'a, I: IntoIterator<Item = &'a [String]>>(buckets: I) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut words = Vec::new();
    for bucket in buckets {
        for word in bucket {
            if seen.insert(word.as_str()) {
                words.push(word.clone());
            }
        }
    }
    words
}

/// Look up every candidate of each length, longest first
fn walk_candidates(searched: &Signature, index: &DictionaryIndex, longest: usize) -> Option<(usize, Vec<String>)> {
    let mut walker = SubsetWalker::new(searched);
    let mut lookups = 0usize;

    for length in (1..=longest).rev() {
        let mut hits: Vec<&[String]> = Vec::new();
        walker.walk(length, &mut |candidate| {
            lookups += 1;
            if let Some(bucket) = index.lookup(candidate) {
                hits.push(bucket);
            }
        });

        if !hits.is_empty() {
            debug!("{} lookups for {}", lookups, searched);
            return Some((length, collect_words(hits)));
        }
    }
    debug!("{} lookups for {}", lookups, searched);
    None
}

/// Test every bucket against the draw. Used when the draw has more
/// candidates than the index has buckets; the hits are put back in the
/// order `walk_candidates` would produce them.
fn scan_buckets(searched: &Signature, index: &DictionaryIndex, longest: usize) -> Option<(usize, Vec<String>)> {
    let mut hits: Vec<(&Signature, &[String])> = index
        .iter()
        .filter(|(sig, _)| sig.len() <= longest && sig.is_subset_of(searched))
        .collect();
    let best = hits.iter().map(|(sig, _)| sig.len()).max()?;

    hits.retain(|(sig, _)| sig.len() == best);
    // The walker takes as many copies of each letter as it can, alphabet
    // order first: descending order of the count vectors
    hits.sort_by(|a, b| b.0.cmp(a.0));
    debug!("Scanned {} buckets for {}", index.bucket_count(), searched);
    Some((best, collect_words(hits.into_iter().map(|(_, bucket)| bucket))))
}

/// Find the longest words of `index` formable from the tiles of `draw`.
///
/// All words of the winning length are returned in production order:
/// candidates are generated letter by letter in alphabetical order, taking
/// as many copies of each letter as possible first, and each bucket keeps
/// its first-seen order. Draws with more candidates than the index has
/// buckets are solved by scanning the buckets instead, with the same result.
pub fn solve(draw: &Draw, index: &DictionaryIndex) -> Result<Solution> {
    let searched = draw_signature(draw)?;
    let longest = draw.len().min(MAX_WORD_LEN).min(index.max_word_len());

    let found = if candidate_space(&searched) > index.bucket_count() as u64 {
        scan_buckets(&searched, index, longest)
    } else {
        walk_candidates(&searched, index, longest)
    };

    match found {
        Some((best_length, best_words)) => {
            debug!("Solved {}: {} word(s) of {} letters", searched, best_words.len(), best_length);
            Ok(Solution { best_length, best_words, searched })
        }
        None => {
            debug!("No word found for {}", searched);
            Ok(Solution::not_found(searched))
        }
    }
}
