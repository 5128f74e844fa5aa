// Domain entities and value objects
pub mod reading;
pub mod date_range;
pub mod notice;
pub mod conversions;

// Re-export common types for easier imports
pub use reading::{Reading, MAX_MEASUREMENT, MIN_MEASUREMENT};
pub use date_range::{DateRange, DateRangePreset};
pub use notice::{Notice, Severity};
