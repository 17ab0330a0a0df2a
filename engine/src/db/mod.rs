//! Storage boundary of the prediction engine.
//!
//! The engine reaches persistence only through the Repository pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │  Service layer (services::*) - business logic   │
//! └───────────────────┬─────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────┐
//! │  Repository traits (repository.rs)              │
//! └───────────────────┬─────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────┐
//! │  Local repository (in-memory, tests and dev)    │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! Production storage is an external collaborator; whatever implements the
//! traits can back the engine.

pub mod checksum;
pub mod repositories;
pub mod repository;

pub use repositories::LocalRepository;
pub use repository::{
    HistoryRepository, ProfileRepository, RepositoryError, RepositoryResult, SightingRepository,
};
