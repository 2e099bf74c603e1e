use std::collections::BTreeMap;
use serde::Serialize;
use crate::services::dictionary::DictionaryIndex;
use crate::services::letter_classifier::classify_letters;

/// French tile frequencies
const FRENCH_BAG: [(char, usize); 26] = [
    ('a', 9), ('b', 2), ('c', 2), ('d', 3), ('e', 15), ('f', 2), ('g', 2),
    ('h', 2), ('i', 8), ('j', 1), ('k', 1), ('l', 5), ('m', 3), ('n', 6),
    ('o', 6), ('p', 2), ('q', 1), ('r', 6), ('s', 6), ('t', 6), ('u', 6),
    ('v', 2), ('w', 1), ('x', 1), ('y', 1), ('z', 1),
];

/// Weighted vowel and consonant bags a draw is sampled from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LetterPools {
    pub vowels: BTreeMap<char, usize>,
    pub consonants: BTreeMap<char, usize>,
}

impl LetterPools {
    pub fn from_bag(bag: &BTreeMap<char, usize>) -> Self {
        let (vowels, consonants) = classify_letters(bag);
        Self { vowels, consonants }
    }

    pub fn french() -> Self {
        Self::from_bag(&FRENCH_BAG.into_iter().collect())
    }

    /// Pools proportional to the letter frequency of the indexed words
    pub fn from_index(index: &DictionaryIndex, total_tiles: usize) -> Self {
        let freq = calculate_distribution(index);
        Self::from_bag(&compute_tile_bag(&freq, total_tiles))
    }

    pub fn is_usable(&self) -> bool {
        !self.vowels.is_empty() && !self.consonants.is_empty()
    }
}

impl Default for LetterPools {
    fn default() -> Self {
        Self::french()
    }
}

/// Calculate letter frequency over the indexed words
pub fn calculate_distribution(index: &DictionaryIndex) -> BTreeMap<char, usize> {
    let mut freq = BTreeMap::new();
    for word in index.words() {
        for c in word.chars() {
            *freq.entry(c).or_insert(0) += 1;
        }
    }
    freq
}

/// Compute tile bag from letter frequencies
pub fn compute_tile_bag(freq: &BTreeMap<char, usize>, total_tiles: usize) -> BTreeMap<char, usize> {
    let total_chars: usize = freq.values().sum();
    if total_chars == 0 {
        return BTreeMap::new();
    }

    let mut tiles = BTreeMap::new();
    let mut remaining_tiles = total_tiles as isize;
    let pool_size = total_tiles as f64;

    // First pass: Proportional allocation with floor of 1
    for (&c, &count) in freq {
        let proportion = (count as f64) / (total_chars as f64);
        let tile_count = ((proportion * pool_size).round() as usize).max(1);

        tiles.insert(c, tile_count);
        remaining_tiles -= tile_count as isize;
    }

    // Second pass: give leftovers to common letters
    if remaining_tiles > 0 {
        let mut sorted_letters: Vec<_> = freq.keys().cloned().collect();
        sorted_letters.sort_by_key(|&c| std::cmp::Reverse(freq[&c]));
        for i in 0..(remaining_tiles as usize) {
            if let Some(&c) = sorted_letters.get(i % sorted_letters.len()) {
                *tiles.entry(c).or_insert(0) += 1;
            }
        }
    }

    tiles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_french_pools() {
        let pools = LetterPools::french();
        assert_eq!(pools.vowels.len(), 6);
        assert_eq!(pools.consonants.len(), 20);
        assert_eq!(pools.vowels[&'e'], 15);
        assert!(pools.consonants[&'s'] > pools.consonants[&'z']);
        assert!(pools.is_usable());
    }

    #[test]
    fn test_calculate_distribution() {
        let index = DictionaryIndex::from_words(["banane", "ananas"]);
        let freq = calculate_distribution(&index);
        assert_eq!(freq[&'a'], 6);
        assert_eq!(freq[&'n'], 4);
        assert_eq!(freq[&'b'], 1);
        assert_eq!(freq.get(&'z'), None);
    }

    #[test]
    fn test_compute_tile_bag() {
        let freq: BTreeMap<char, usize> = [('e', 70), ('a', 29), ('z', 1)].into_iter().collect();
        let bag = compute_tile_bag(&freq, 100);
        assert_eq!(bag[&'e'], 70);
        assert_eq!(bag[&'a'], 29);
        assert_eq!(bag[&'z'], 1);

        // Rare letters keep at least one tile, leftovers go to common ones
        let freq: BTreeMap<char, usize> = [('e', 1000), ('q', 1)].into_iter().collect();
        let bag = compute_tile_bag(&freq, 10);
        assert_eq!(bag[&'q'], 1);
        assert_eq!(bag[&'e'], 10);

        assert!(compute_tile_bag(&BTreeMap::new(), 10).is_empty());
    }

    #[test]
    fn test_pools_from_index() {
        let index = DictionaryIndex::from_words(["tete", "tres", "rat"]);
        let pools = LetterPools::from_index(&index, 20);
        assert_eq!(pools.vowels.keys().copied().collect::<String>(), "ae");
        assert_eq!(pools.consonants.keys().copied().collect::<String>(), "rst");
    }
}
