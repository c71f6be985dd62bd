//! # Storage Module
//!
//! Access to the remote profile collection.
//!
//! The domain layer depends only on the [`ProfileSyncGateway`] trait. Two
//! implementations are provided:
//!
//! - **http**: talks to the `/stars` REST collection with `reqwest`
//! - **memory**: a vector-backed collection with failure injection, for tests
//!   and offline runs

pub mod error;
pub mod http;
pub mod memory;
pub mod traits;

pub use error::SyncError;
pub use http::HttpProfileGateway;
pub use memory::InMemoryProfileGateway;
pub use traits::ProfileSyncGateway;
