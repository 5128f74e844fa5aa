// Repository module structure
mod readings;

// Re-export commonly used types
pub use readings::{ReadingsRepository, READINGS_KEY};
