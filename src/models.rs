use std::collections::BTreeMap;
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use crate::services::dictionary::{BuildStats, DictionaryIndex};
use crate::services::distribution::LetterPools;
use crate::services::signature::MAX_WORD_LEN;
use crate::services::solver::Solution;

/// Default number of tiles in a draw
pub const DEFAULT_TILES: usize = 10;
/// Default number of vowels requested per draw
pub const DEFAULT_VOWELS: usize = 4;

/// Application state shared across all handlers
pub struct AppState {
    pub index: Arc<DictionaryIndex>,
    pub pools: LetterPools,
    pub tile_count: usize,
    pub default_vowels: usize,
}

impl AppState {
    pub fn new(index: Arc<DictionaryIndex>, pools: LetterPools) -> Self {
        Self {
            index,
            pools,
            tile_count: DEFAULT_TILES,
            default_vowels: DEFAULT_VOWELS,
        }
    }
}

#[derive(Serialize)]
pub struct ConfigResponse {
    pub tiles: usize,
    pub default_vowels: usize,
    pub max_word_len: usize,
    pub vowels: BTreeMap<char, usize>,
    pub consonants: BTreeMap<char, usize>,
    pub word_count: usize,
    pub bucket_count: usize,
    pub build: BuildStats,
}

#[derive(Deserialize)]
pub struct DrawQuery {
    pub vowels: Option<usize>,
    pub tiles: Option<usize>,
}

#[derive(Serialize)]
pub struct DrawResponse {
    pub letters: Vec<char>,
    pub vowels: usize,
}

#[derive(Serialize)]
pub struct SolveResponse {
    pub draw: String,
    #[serde(flatten)]
    pub solution: Solution,
}

impl ConfigResponse {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            tiles: state.tile_count,
            default_vowels: state.default_vowels,
            max_word_len: MAX_WORD_LEN,
            vowels: state.pools.vowels.clone(),
            consonants: state.pools.consonants.clone(),
            word_count: state.index.word_count(),
            bucket_count: state.index.bucket_count(),
            build: state.index.stats(),
        }
    }
}
