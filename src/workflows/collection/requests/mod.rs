//! Pickup request intake, assignment, and lifecycle transitions.

pub mod repository;
pub mod service;

#[cfg(test)]
mod tests;

pub use repository::{
    CollectorDirectory, FileStore, NewWasteRequest, RepositoryError, StorageError,
    WasteRequestRepository,
};
pub use service::{WasteRequestService, WorkflowError};
