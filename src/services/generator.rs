use std::fmt;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use crate::services::distribution::LetterPools;
use crate::services::letter_classifier::VOWELS;
use crate::utils::{count_vowels_consonants, select_random_from_bag};

/// Tiles dealt for one round. Order only matters for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Draw {
    letters: Vec<char>,
}

impl Draw {
    pub fn new(letters: Vec<char>) -> Self {
        Self { letters }
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn vowel_count(&self) -> usize {
        count_vowels_consonants(&self.as_string(), &VOWELS).0
    }

    pub fn as_string(&self) -> String {
        self.letters.iter().collect()
    }
}

/// Whitespace is dropped; every other character is kept as a tile
impl From<&str> for Draw {
    fn from(s: &str) -> Self {
        Draw::new(s.chars().filter(|c| !c.is_whitespace()).collect())
    }
}

impl fmt::Display for Draw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tiles: Vec<String> = self.letters.iter().map(|c| c.to_uppercase().to_string()).collect();
        write!(f, "{}", tiles.join(" "))
    }
}

/// Deal `tile_count` tiles, `vowel_count` of them vowels.
/// The vowel count is clamped into `[0, tile_count]`.
pub fn generate_draw<R: Rng + ?Sized>(
    pools: &LetterPools,
    vowel_count: usize,
    tile_count: usize,
    rng: &mut R,
) -> Draw {
    let vowel_count = vowel_count.min(tile_count);

    let mut letters = select_random_from_bag(&pools.vowels, vowel_count, rng);
    letters.extend(select_random_from_bag(&pools.consonants, tile_count - vowel_count, rng));
    letters.shuffle(rng);

    let draw = Draw::new(letters);
    debug!("Dealt {} ({} vowels requested)", draw, vowel_count);
    draw
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::letter_classifier::is_vowel;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_draw_has_requested_vowels() {
        let pools = LetterPools::french();
        let mut rng = StdRng::seed_from_u64(42);

        for vowels in 0..=10 {
            let draw = generate_draw(&pools, vowels, 10, &mut rng);
            assert_eq!(draw.len(), 10);
            assert_eq!(draw.vowel_count(), vowels);
            assert!(draw.letters().iter().all(|c| c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_vowel_count_is_clamped() {
        let pools = LetterPools::french();
        let mut rng = StdRng::seed_from_u64(1);

        let draw = generate_draw(&pools, 25, 10, &mut rng);
        assert_eq!(draw.len(), 10);
        assert!(draw.letters().iter().all(|&c| is_vowel(c)));

        assert!(generate_draw(&pools, 3, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_seeded_draws_are_reproducible() {
        let pools = LetterPools::french();
        let a = generate_draw(&pools, 4, 10, &mut StdRng::seed_from_u64(9));
        let b = generate_draw(&pools, 4, 10, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_frequent_letters_drawn_more_often() {
        let pools = LetterPools::french();
        let mut rng = StdRng::seed_from_u64(3);
        let mut e = 0;
        let mut y = 0;
        for _ in 0..200 {
            let draw = generate_draw(&pools, 10, 10, &mut rng);
            e += draw.letters().iter().filter(|&&c| c == 'e').count();
            y += draw.letters().iter().filter(|&&c| c == 'y').count();
        }
        assert!(e > y * 3);
    }

    #[test]
    fn test_draw_from_str_and_display() {
        let draw = Draw::from("ts ca a");
        assert_eq!(draw.letters(), ['t', 's', 'c', 'a', 'a']);
        assert_eq!(draw.to_string(), "T S C A A");
        assert_eq!(draw.vowel_count(), 2);

        // Non-letters survive parsing; the solver rejects them
        assert_eq!(Draw::from("ab3").len(), 3);
    }
}
