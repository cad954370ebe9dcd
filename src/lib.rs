pub mod api;
pub mod config;
pub mod directory;
pub mod docs;
pub mod error;
pub mod model;
pub mod routes;
pub mod store;
pub mod workflow;

use directory::InMemoryDirectory;
use store::MemoryStore;
use workflow::Workflow;

/// Concrete engine wiring used by the binary and the HTTP handlers.
pub type LeaveService = Workflow<MemoryStore, InMemoryDirectory>;
