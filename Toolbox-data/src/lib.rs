// Toolbox Data
// This crate handles persistence for the toolbox tools

// Key-value storage backends and their configuration
pub mod storage;

// Repository implementations over the storage backends
pub mod repository;

// Persisted record shapes
pub mod models;
