//! # Profile Store
//!
//! Single in-memory source of truth for the ordered profile collection.
//!
//! Mutations are two-phase: an optimistic change is applied immediately and a
//! handle is returned; the handle is later confirmed or rolled back once the
//! remote collection answers. Handles address their own entry by key, never by
//! position, so interleaved mutations on unrelated entries cannot disturb each
//! other.
//!
//! ## Ordering
//!
//! - Newest profile first; an optimistic insert goes to the front.
//! - A pending delete keeps its slot hidden in place, so a rollback puts the
//!   profile back exactly where it was, even if other entries were added or
//!   removed in the meantime.
//!
//! ## Stale handles
//!
//! Confirming or rolling back a handle that already resolved, or that belongs to
//! a collection since replaced by [`ProfileStore::initialize`], is a no-op.

use shared::{Profile, ProfileListSnapshot, ProfilePayload};
use tracing::{debug, warn};
use uuid::Uuid;

/// Prefix of the placeholder id carried by profiles awaiting server confirmation
pub const PROVISIONAL_ID_PREFIX: &str = "pending::";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct EntryKey(u64);

/// Lifecycle of a visible entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Inserted locally, create request not yet answered
    Provisional,
    /// Known to the server
    Confirmed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryState {
    Provisional,
    Confirmed,
    PendingDelete,
}

#[derive(Debug, Clone)]
struct StoreEntry {
    key: EntryKey,
    profile: Profile,
    state: EntryState,
}

/// Targets one optimistic insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InsertHandle {
    key: EntryKey,
}

/// Targets one optimistic delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeleteHandle {
    key: EntryKey,
    original_index: usize,
}

impl DeleteHandle {
    /// Position the profile held in the visible collection when it was removed
    pub fn original_index(&self) -> usize {
        self.original_index
    }
}

/// Ordered profile collection with optimistic mutation and rollback
#[derive(Debug, Default)]
pub struct ProfileStore {
    entries: Vec<StoreEntry>,
    next_key: u64,
    loading: bool,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the initial list request as in flight
    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    /// Mark the initial list request as finished without replacing the collection
    pub fn finish_loading(&mut self) {
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Replace the collection wholesale. Outstanding handles become stale.
    ///
    /// Duplicate ids keep their first occurrence.
    pub fn initialize(&mut self, profiles: Vec<Profile>) {
        let mut entries: Vec<StoreEntry> = Vec::with_capacity(profiles.len());
        for profile in profiles {
            if entries.iter().any(|e| e.profile.id == profile.id) {
                warn!("⚠️ Dropping duplicate profile id {} from initial list", profile.id);
                continue;
            }
            let key = self.allocate_key();
            entries.push(StoreEntry {
                key,
                profile,
                state: EntryState::Confirmed,
            });
        }

        debug!("Profile store initialized with {} profiles", entries.len());
        self.entries = entries;
        self.loading = false;
    }

    /// Visible profiles, newest first
    pub fn profiles(&self) -> impl Iterator<Item = &Profile> {
        self.visible().map(|e| &e.profile)
    }

    /// Visible profiles together with their lifecycle status
    pub fn entries(&self) -> impl Iterator<Item = (&Profile, EntryStatus)> {
        self.visible().map(|e| {
            let status = match e.state {
                EntryState::Provisional => EntryStatus::Provisional,
                _ => EntryStatus::Confirmed,
            };
            (&e.profile, status)
        })
    }

    pub fn snapshot(&self) -> ProfileListSnapshot {
        ProfileListSnapshot {
            profiles: self.profiles().cloned().collect(),
            loading: self.loading,
        }
    }

    pub fn len(&self) -> usize {
        self.visible().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.profiles().find(|p| p.id == id)
    }

    /// Index of a profile in the visible collection
    pub fn position(&self, id: &str) -> Option<usize> {
        self.profiles().position(|p| p.id == id)
    }

    /// Prepend a provisional profile built from the payload
    pub fn optimistic_insert(&mut self, payload: ProfilePayload) -> InsertHandle {
        let key = self.allocate_key();
        let placeholder_id = format!("{}{}", PROVISIONAL_ID_PREFIX, Uuid::new_v4());
        debug!("➕ Optimistically inserting '{}' as {}", payload.name, placeholder_id);

        self.entries.insert(
            0,
            StoreEntry {
                key,
                profile: Profile::new(placeholder_id, payload),
                state: EntryState::Provisional,
            },
        );
        InsertHandle { key }
    }

    /// Replace the provisional entry in place with the server's profile.
    ///
    /// Returns false when the handle is stale. Any other entry already carrying the
    /// server id is dropped so ids stay unique.
    pub fn confirm(&mut self, handle: InsertHandle, server_profile: Profile) -> bool {
        if self.find_index(handle.key, EntryState::Provisional).is_none() {
            debug!("Ignoring confirm for stale insert handle {:?}", handle);
            return false;
        }

        let before = self.entries.len();
        self.entries
            .retain(|e| e.key == handle.key || e.profile.id != server_profile.id);
        if self.entries.len() != before {
            warn!(
                "⚠️ Server returned id {} already present in the collection; keeping the new entry",
                server_profile.id
            );
        }

        match self.find_index(handle.key, EntryState::Provisional) {
            Some(index) => {
                let entry = &mut self.entries[index];
                entry.profile = server_profile;
                entry.state = EntryState::Confirmed;
                true
            }
            None => false,
        }
    }

    /// Remove the provisional entry. Returns false when the handle is stale.
    pub fn rollback(&mut self, handle: InsertHandle) -> bool {
        match self.find_index(handle.key, EntryState::Provisional) {
            Some(index) => {
                let entry = self.entries.remove(index);
                debug!("↩️ Rolled back provisional profile '{}'", entry.profile.name());
                true
            }
            None => {
                debug!("Ignoring rollback for stale insert handle {:?}", handle);
                false
            }
        }
    }

    /// Hide the confirmed profile with this id from the collection.
    ///
    /// Returns `None` when no confirmed profile has the id; provisional entries
    /// carry placeholder ids and cannot be deleted.
    pub fn optimistic_delete(&mut self, id: &str) -> Option<DeleteHandle> {
        let original_index = self.position(id)?;
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.state == EntryState::Confirmed && e.profile.id == id)?;

        entry.state = EntryState::PendingDelete;
        debug!("➖ Optimistically deleting {} from index {}", id, original_index);
        Some(DeleteHandle {
            key: entry.key,
            original_index,
        })
    }

    /// Drop the hidden entry for good. Returns false when the handle is stale.
    pub fn confirm_delete(&mut self, handle: DeleteHandle) -> bool {
        match self.find_index(handle.key, EntryState::PendingDelete) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Bring the hidden entry back in its original slot. Returns false when the handle is stale.
    pub fn rollback_delete(&mut self, handle: DeleteHandle) -> bool {
        match self.find_index(handle.key, EntryState::PendingDelete) {
            Some(index) => {
                let entry = &mut self.entries[index];
                entry.state = EntryState::Confirmed;
                debug!("↩️ Restored profile {}", entry.profile.id);
                true
            }
            None => {
                debug!("Ignoring rollback for stale delete handle {:?}", handle);
                false
            }
        }
    }

    fn visible(&self) -> impl Iterator<Item = &StoreEntry> {
        self.entries
            .iter()
            .filter(|e| e.state != EntryState::PendingDelete)
    }

    fn find_index(&self, key: EntryKey, state: EntryState) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.key == key && e.state == state)
    }

    fn allocate_key(&mut self) -> EntryKey {
        let key = EntryKey(self.next_key);
        self.next_key += 1;
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::SocialLinks;

    fn payload(name: &str) -> ProfilePayload {
        ProfilePayload {
            name: name.to_string(),
            bio: format!("{} bio", name),
            image_url: String::new(),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 3, 14).unwrap(),
            social_links: SocialLinks::default(),
            rating: 3.0,
        }
    }

    fn profile(id: &str) -> Profile {
        Profile::new(id, payload(&format!("Star {}", id)))
    }

    fn store_with(ids: &[&str]) -> ProfileStore {
        let mut store = ProfileStore::new();
        store.initialize(ids.iter().map(|id| profile(id)).collect());
        store
    }

    fn ids(store: &ProfileStore) -> Vec<String> {
        store.profiles().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_initialize_replaces_collection() {
        let mut store = store_with(&["a", "b"]);

        store.initialize(vec![profile("c")]);

        assert_eq!(ids(&store), vec!["c"]);
    }

    #[test]
    fn test_initialize_drops_duplicate_ids() {
        let store = store_with(&["a", "b", "a"]);

        assert_eq!(ids(&store), vec!["a", "b"]);
    }

    #[test]
    fn test_loading_flag() {
        let mut store = ProfileStore::new();
        assert!(!store.is_loading());

        store.begin_loading();
        assert!(store.snapshot().loading);

        store.initialize(vec![profile("a")]);
        assert!(!store.is_loading());
    }

    #[test]
    fn test_optimistic_insert_prepends_provisional_entry() {
        let mut store = store_with(&["a", "b"]);

        store.optimistic_insert(payload("New Star"));

        assert_eq!(store.len(), 3);
        let (first, status) = store.entries().next().unwrap();
        assert_eq!(first.name(), "New Star");
        assert!(first.id.starts_with(PROVISIONAL_ID_PREFIX));
        assert_eq!(status, EntryStatus::Provisional);
    }

    #[test]
    fn test_confirm_assigns_server_identity_in_place() {
        let mut store = store_with(&["a"]);
        let first = store.optimistic_insert(payload("First"));
        let _second = store.optimistic_insert(payload("Second"));

        assert!(store.confirm(first, Profile::new("server-1", payload("First"))));

        assert_eq!(store.position("server-1"), Some(1));
        assert_eq!(store.len(), 3);
        let statuses: Vec<EntryStatus> = store.entries().map(|(_, s)| s).collect();
        assert_eq!(
            statuses,
            vec![EntryStatus::Provisional, EntryStatus::Confirmed, EntryStatus::Confirmed]
        );
    }

    #[test]
    fn test_insert_then_rollback_restores_previous_state() {
        let mut store = store_with(&["a", "b", "c"]);
        let before = store.snapshot();

        let handle = store.optimistic_insert(payload("Temp"));
        assert!(store.rollback(handle));

        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_confirm_and_rollback_are_idempotent() {
        let mut store = store_with(&["a"]);
        let handle = store.optimistic_insert(payload("X"));

        assert!(store.confirm(handle, profile("x")));
        let after_once = store.snapshot();
        assert!(!store.confirm(handle, profile("y")));
        assert!(!store.rollback(handle));
        assert_eq!(store.snapshot(), after_once);

        let handle = store.optimistic_insert(payload("Y"));
        assert!(store.rollback(handle));
        let after_once = store.snapshot();
        assert!(!store.rollback(handle));
        assert!(!store.confirm(handle, profile("y")));
        assert_eq!(store.snapshot(), after_once);
    }

    #[test]
    fn test_interleaved_inserts_resolve_independently() {
        let mut store = store_with(&["a"]);
        let first = store.optimistic_insert(payload("First"));
        let second = store.optimistic_insert(payload("Second"));

        assert!(store.rollback(first));
        assert!(store.confirm(second, profile("s")));

        assert_eq!(ids(&store), vec!["s", "a"]);
    }

    #[test]
    fn test_confirm_with_existing_id_keeps_ids_unique() {
        let mut store = store_with(&["a", "b"]);
        let handle = store.optimistic_insert(payload("Dup"));

        assert!(store.confirm(handle, profile("b")));

        assert_eq!(ids(&store), vec!["b", "a"]);
    }

    #[test]
    fn test_delete_confirmed_removes_entry_preserving_order() {
        let mut store = store_with(&["a", "b", "c", "d", "e"]);

        let handle = store.optimistic_delete("c").unwrap();
        assert_eq!(handle.original_index(), 2);
        assert_eq!(ids(&store), vec!["a", "b", "d", "e"]);

        assert!(store.confirm_delete(handle));
        assert!(!store.confirm_delete(handle));
        assert!(!store.rollback_delete(handle));
        assert_eq!(ids(&store), vec!["a", "b", "d", "e"]);
    }

    #[test]
    fn test_delete_rollback_restores_original_index() {
        let mut store = store_with(&["a", "b", "c", "d", "e"]);
        let before = store.snapshot();

        let handle = store.optimistic_delete("c").unwrap();
        assert!(store.get("c").is_none());
        assert!(store.rollback_delete(handle));

        assert_eq!(store.position("c"), Some(2));
        assert_eq!(store.snapshot(), before);
        assert!(!store.rollback_delete(handle));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_out_of_order_delete_rollbacks_restore_order() {
        let mut store = store_with(&["x", "b", "a", "y"]);

        let delete_a = store.optimistic_delete("a").unwrap();
        let delete_b = store.optimistic_delete("b").unwrap();
        assert_eq!(ids(&store), vec!["x", "y"]);

        assert!(store.rollback_delete(delete_a));
        assert_eq!(ids(&store), vec!["x", "a", "y"]);
        assert!(store.rollback_delete(delete_b));
        assert_eq!(ids(&store), vec!["x", "b", "a", "y"]);
    }

    #[test]
    fn test_delete_rollback_with_interleaved_insert() {
        let mut store = store_with(&["a", "b", "c"]);

        let delete_b = store.optimistic_delete("b").unwrap();
        let insert = store.optimistic_insert(payload("New"));
        assert!(store.confirm(insert, profile("n")));
        assert!(store.rollback_delete(delete_b));

        assert_eq!(ids(&store), vec!["n", "a", "b", "c"]);
    }

    #[test]
    fn test_delete_unknown_or_provisional_id() {
        let mut store = store_with(&["a"]);
        store.optimistic_insert(payload("Pending"));
        let provisional_id = store.profiles().next().unwrap().id.clone();

        assert!(store.optimistic_delete("missing").is_none());
        assert!(store.optimistic_delete(&provisional_id).is_none());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_delete_of_already_pending_id_is_rejected() {
        let mut store = store_with(&["a", "b"]);

        assert!(store.optimistic_delete("a").is_some());
        assert!(store.optimistic_delete("a").is_none());
    }

    #[test]
    fn test_initialize_makes_outstanding_handles_stale() {
        let mut store = store_with(&["a", "b"]);
        let insert = store.optimistic_insert(payload("Temp"));
        let delete = store.optimistic_delete("a").unwrap();

        store.initialize(vec![profile("a"), profile("b")]);

        assert!(!store.rollback(insert));
        assert!(!store.confirm_delete(delete));
        assert!(!store.rollback_delete(delete));
        assert_eq!(ids(&store), vec!["a", "b"]);
    }
}
