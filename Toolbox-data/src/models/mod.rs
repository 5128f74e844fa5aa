// Storage models
pub mod reading;

pub use reading::StoredReading;
