pub mod dictionary;
pub mod distribution;
pub mod generator;
pub mod letter_classifier;
pub mod round;
pub mod signature;
pub mod solver;
pub mod word_loader;
