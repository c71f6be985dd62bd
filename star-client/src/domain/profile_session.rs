//! # Profile Session
//!
//! Orchestrates the profile lifecycle between the form, the store and the remote
//! collection.
//!
//! Every remote call follows the same discipline: the optimistic mutation is
//! applied to the store before the request is sent, and the confirm or rollback
//! runs in the continuation of that same request, addressing its own handle. The
//! store lock is only held for those synchronous steps, never across an `.await`,
//! so unrelated creates and deletes can be in flight at the same time.
//!
//! Failures never leave the store half-updated: each ends rolled back with a
//! failure notification. Form validation errors stay on the form and never reach
//! this layer.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shared::{Profile, ProfileCard, ProfileListSnapshot, ProfilePayload};
use tracing::{error, info, warn};

use super::notifications::{self, NotificationSink};
use super::profile_cards::ProfileCardService;
use super::profile_form::ProfileFormController;
use super::profile_store::ProfileStore;
use crate::storage::{ProfileSyncGateway, SyncError};

/// Profile directory session bound to one remote collection
pub struct ProfileSession<G, N> {
    gateway: G,
    notifier: N,
    store: Arc<Mutex<ProfileStore>>,
    card_service: ProfileCardService,
}

impl<G, N> ProfileSession<G, N>
where
    G: ProfileSyncGateway,
    N: NotificationSink,
{
    pub fn new(gateway: G, notifier: N) -> Self {
        Self {
            gateway,
            notifier,
            store: Arc::new(Mutex::new(ProfileStore::new())),
            card_service: ProfileCardService::new(),
        }
    }

    pub fn with_card_service(mut self, card_service: ProfileCardService) -> Self {
        self.card_service = card_service;
        self
    }

    /// Shared handle to the store, for views that render from it directly
    pub fn store(&self) -> Arc<Mutex<ProfileStore>> {
        Arc::clone(&self.store)
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn snapshot(&self) -> ProfileListSnapshot {
        self.lock_store().snapshot()
    }

    pub fn cards(&self) -> Vec<ProfileCard> {
        let store = self.lock_store();
        self.card_service.cards(&store)
    }

    pub fn is_loading(&self) -> bool {
        self.lock_store().is_loading()
    }

    /// Populate the store from the remote collection. Returns the number of profiles loaded.
    pub async fn bootstrap(&self) -> Result<usize, SyncError> {
        info!("📋 Loading profiles from remote collection");
        self.lock_store().begin_loading();

        match self.gateway.list().await {
            Ok(profiles) => {
                let count = profiles.len();
                self.lock_store().initialize(profiles);
                info!("✅ Loaded {} profiles", count);
                Ok(count)
            }
            Err(e) => {
                error!("❌ Failed to load profiles: {}", e);
                self.lock_store().finish_loading();
                self.notifier.notify(notifications::sync_failed(&e));
                Err(e)
            }
        }
    }

    /// Submit the form and, when it validates, create the profile.
    ///
    /// Returns `Ok(None)` when validation failed; the errors are left on the form
    /// and no request is made.
    pub async fn submit_form(
        &self,
        form: &mut ProfileFormController,
    ) -> Result<Option<Profile>, SyncError> {
        match form.submit_with(|payload| self.create_profile(payload)) {
            Some(create) => create.await.map(Some),
            None => {
                info!("📝 Profile form has errors; nothing sent");
                Ok(None)
            }
        }
    }

    /// Optimistically add the profile, then create it remotely
    pub async fn create_profile(&self, payload: ProfilePayload) -> Result<Profile, SyncError> {
        info!("⭐ Creating profile '{}'", payload.name);
        let handle = self.lock_store().optimistic_insert(payload.clone());

        match self.gateway.create(&payload).await {
            Ok(profile) => {
                let confirmed = self.lock_store().confirm(handle, profile.clone());
                if confirmed {
                    info!("✅ Created profile '{}' with id {}", profile.name(), profile.id);
                } else {
                    warn!(
                        "⚠️ Profile {} created after its provisional entry was discarded",
                        profile.id
                    );
                }
                self.notifier.notify(notifications::profile_created(&payload));
                Ok(profile)
            }
            Err(e) => {
                error!("❌ Failed to create profile '{}': {}", payload.name, e);
                self.lock_store().rollback(handle);
                self.notifier.notify(notifications::sync_failed(&e));
                Err(e)
            }
        }
    }

    /// Optimistically remove the profile, then delete it remotely.
    ///
    /// On failure the profile reappears at its original position.
    pub async fn delete_profile(&self, id: &str) -> Result<(), SyncError> {
        info!("🗑️ Deleting profile {}", id);
        let handle = self.lock_store().optimistic_delete(id);
        let handle = match handle {
            Some(handle) => handle,
            None => {
                warn!("⚠️ Profile {} is not in the collection", id);
                let e = SyncError::NotFound(id.to_string());
                self.notifier.notify(notifications::sync_failed(&e));
                return Err(e);
            }
        };

        match self.gateway.delete(id).await {
            Ok(()) => {
                self.lock_store().confirm_delete(handle);
                info!("✅ Deleted profile {}", id);
                self.notifier.notify(notifications::profile_deleted());
                Ok(())
            }
            Err(e) => {
                error!(
                    "❌ Failed to delete profile {}: {}; restoring at index {}",
                    id,
                    e,
                    handle.original_index()
                );
                self.lock_store().rollback_delete(handle);
                self.notifier.notify(notifications::sync_failed(&e));
                Err(e)
            }
        }
    }

    fn lock_store(&self) -> MutexGuard<'_, ProfileStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
