pub mod due_queue;
pub mod error_conversions;
pub mod error_responses;
pub mod policy;
pub mod progress;
pub mod scheduler;
pub mod service;

pub use due_queue::DueQueue;
pub use policy::{BooleanPolicy, GradedPolicy, SchedulingPolicy};
pub use progress::ProgressAggregator;
pub use scheduler::{ScheduledReview, Scheduler};
pub use service::{ReviewService, SubmittedReview};
