//! # Storage Traits
//!
//! The boundary to the remote profile collection. The domain layer only talks to
//! [`ProfileSyncGateway`], so the HTTP client can be swapped for the in-memory
//! implementation in tests.

use async_trait::async_trait;
use shared::{Profile, ProfilePayload};

use super::error::SyncError;

/// Create/list/delete contract required of the remote collection
///
/// No ordering is guaranteed across concurrent calls, and `create` is not assumed to
/// be safe to retry: callers issue at most one create per user submission.
#[async_trait]
pub trait ProfileSyncGateway: Send + Sync {
    /// All profiles in the order the server keeps them
    async fn list(&self) -> Result<Vec<Profile>, SyncError>;

    /// Create a profile; the response carries the server-assigned id
    async fn create(&self, payload: &ProfilePayload) -> Result<Profile, SyncError>;

    /// Delete a profile by id
    async fn delete(&self, id: &str) -> Result<(), SyncError>;
}
