//! # Le Mot le plus Long
//!
//! Longest-word puzzle engine: an anagram index over a dictionary, a letter
//! draw generator and a solver that finds the longest words formable from a
//! draw.

pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{MotError, Result};
pub use services::dictionary::{BuildStats, DictionaryIndex, IndexBuilder};
pub use services::distribution::LetterPools;
pub use services::generator::{generate_draw, Draw};
pub use services::signature::{Signature, ALPHABET_SIZE, MAX_WORD_LEN};
pub use services::solver::{solve, Solution, MAX_DRAW_LEN};
pub use services::word_loader::{build_index, load_flat, save_flat, LineRange};
