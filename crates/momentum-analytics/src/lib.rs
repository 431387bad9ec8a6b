//! momentum-analytics
//!
//! The assessment comparison and progress-analytics engine. Everything
//! here is synchronous and pure: callers hand in already-authorized
//! records and get fresh result structures back.

pub mod compare;
pub mod engine;
pub mod error;
pub mod grouping;
pub mod normalize;
pub mod periods;
pub mod progress;

pub use engine::run_comparison;
pub use error::AnalyticsError;
