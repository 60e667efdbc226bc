//! Spaced-repetition review scheduler.
//!
//! Decides when each learner should next see each vocabulary word, phrase or
//! flashcard, picks the items that are due now, and keeps per-learner streak,
//! points and level counters in step with every review.

pub mod app;
pub mod config;
pub mod data;
pub mod features;
pub mod handlers;
pub mod schema;

pub use data::db::DbPool;
