//! In-memory profile collection.
//!
//! Behaves like the remote service (server-assigned ids, newest first, `NotFound`
//! on unknown ids) and lets tests inject failures for the next create, the next
//! delete, or every delete of a given id.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use shared::{Profile, ProfilePayload};
use tracing::debug;
use uuid::Uuid;

use super::error::SyncError;
use super::traits::ProfileSyncGateway;

#[derive(Debug, Default)]
struct MemoryState {
    profiles: Vec<Profile>,
    fail_next_list: Option<SyncError>,
    fail_next_create: Option<SyncError>,
    fail_next_delete: Option<SyncError>,
    delete_failures: HashMap<String, SyncError>,
    list_calls: usize,
    create_calls: usize,
    delete_calls: usize,
}

/// Gateway backed by a vector, for tests and offline demos
#[derive(Debug, Default)]
pub struct InMemoryProfileGateway {
    state: Mutex<MemoryState>,
}

impl InMemoryProfileGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with these profiles, in list order
    pub fn with_profiles(profiles: Vec<Profile>) -> Self {
        let gateway = Self::new();
        gateway.state().profiles = profiles;
        gateway
    }

    pub fn fail_next_list(&self, error: SyncError) {
        self.state().fail_next_list = Some(error);
    }

    pub fn fail_next_create(&self, error: SyncError) {
        self.state().fail_next_create = Some(error);
    }

    pub fn fail_next_delete(&self, error: SyncError) {
        self.state().fail_next_delete = Some(error);
    }

    /// Every delete of `id` fails with `error` until cleared
    pub fn fail_deletes_for(&self, id: &str, error: SyncError) {
        self.state().delete_failures.insert(id.to_string(), error);
    }

    pub fn clear_failures(&self) {
        let mut state = self.state();
        state.fail_next_list = None;
        state.fail_next_create = None;
        state.fail_next_delete = None;
        state.delete_failures.clear();
    }

    /// Server-side view of the collection
    pub fn profiles(&self) -> Vec<Profile> {
        self.state().profiles.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.state().list_calls
    }

    pub fn create_calls(&self) -> usize {
        self.state().create_calls
    }

    pub fn delete_calls(&self) -> usize {
        self.state().delete_calls
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ProfileSyncGateway for InMemoryProfileGateway {
    async fn list(&self) -> Result<Vec<Profile>, SyncError> {
        let mut state = self.state();
        state.list_calls += 1;
        if let Some(error) = state.fail_next_list.take() {
            return Err(error);
        }
        Ok(state.profiles.clone())
    }

    async fn create(&self, payload: &ProfilePayload) -> Result<Profile, SyncError> {
        let mut state = self.state();
        state.create_calls += 1;
        if let Some(error) = state.fail_next_create.take() {
            return Err(error);
        }

        let profile = Profile::new(Uuid::new_v4().simple().to_string(), payload.clone());
        debug!("In-memory create of '{}' as {}", profile.name(), profile.id);
        state.profiles.insert(0, profile.clone());
        Ok(profile)
    }

    async fn delete(&self, id: &str) -> Result<(), SyncError> {
        let mut state = self.state();
        state.delete_calls += 1;
        if let Some(error) = state.fail_next_delete.take() {
            return Err(error);
        }
        if let Some(error) = state.delete_failures.get(id) {
            return Err(error.clone());
        }

        let before = state.profiles.len();
        state.profiles.retain(|p| p.id != id);
        if state.profiles.len() == before {
            return Err(SyncError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
