//! Ranking policy implementations.

pub mod rating;
pub mod similarity;

pub use rating::RatingPolicy;
pub use similarity::SimilarityPolicy;
