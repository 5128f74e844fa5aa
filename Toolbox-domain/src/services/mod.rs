pub mod insights;
pub mod readings;
pub mod transfer;
pub mod views;

// Domain services
// This module contains business logic implementations.

// Re-export the store and the most used free functions
pub use readings::ReadingsStore;
pub use transfer::{export_to, import_from, ExportPayload, TransferFormat};
pub use views::{filter_by_day, filter_by_range};
