//! momentum-core
//!
//! Pure domain types for the progress-analytics engine: assessment records,
//! dimension scores, calendar windows, comparison results, the export
//! envelope and the engine settings. No scoring lives here; beyond accessors
//! there is only record validation and settings migration.

pub mod error;
pub mod models;
pub mod settings;
