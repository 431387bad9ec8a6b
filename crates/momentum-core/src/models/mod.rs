pub mod assessment;
pub mod comparison;
pub mod export;
pub mod score;
pub mod time_range;
