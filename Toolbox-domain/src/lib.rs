// Toolbox Domain
// This crate contains the business logic for the toolbox tools

// Domain entities and value objects
pub mod entities;

// Services that implement business logic
pub mod services;

// Stateless text tools
pub mod tools;

// Domain error types
pub mod errors;

// Timestamp parsing and formatting
pub mod dates;

// Re-export the storage module from toolbox-data for convenience
pub use toolbox_data::storage;

// Testing utilities - only available with mock feature
#[cfg(any(test, feature = "mock"))]
pub mod testing;
