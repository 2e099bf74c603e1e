use std::collections::BTreeMap;

/// Vowels of the working alphabet. `y` counts as a vowel in French.
pub const VOWELS: [char; 6] = ['a', 'e', 'i', 'o', 'u', 'y'];

pub fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c)
}

/// Split a weighted letter bag into its vowel and consonant bags
pub fn classify_letters(
    bag: &BTreeMap<char, usize>,
) -> (BTreeMap<char, usize>, BTreeMap<char, usize>) {
    bag.iter()
        .filter(|&(_, &weight)| weight > 0)
        .map(|(&c, &weight)| (c, weight))
        .partition(|&(c, _)| is_vowel(c))
}
