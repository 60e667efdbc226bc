pub mod memory_store;
pub mod sqlite_store;
pub mod store;

pub use memory_store::MemoryReviewStore;
pub use sqlite_store::SqliteReviewStore;
pub use store::{ReviewStore, ReviewUpdate};
