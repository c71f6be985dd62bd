//! # Domain Module
//!
//! Business logic for the star profile directory.
//!
//! Everything here is independent of the transport used to reach the remote
//! collection; the session talks to it only through
//! [`crate::storage::ProfileSyncGateway`].
//!
//! ## Module Organization
//!
//! - **profile_schema**: Validation rules that turn raw form input into a payload
//! - **profile_form**: Form state, touched fields and per-field errors
//! - **profile_store**: Ordered local collection with optimistic insert/delete handles
//! - **profile_session**: Orchestrates form, store, gateway and notifications
//! - **profile_cards**: Display formatting for the list view
//! - **notifications**: User-facing success/failure messages and their sinks
//!
//! ## Business Rules
//!
//! - Names are 3 to 255 characters
//! - Date of birth falls between 1900-01-01 and today
//! - Ratings are between 0.1 and 5.0
//! - Every optimistic mutation ends either confirmed or rolled back
//! - A rolled-back delete restores the profile at its original position

pub mod notifications;
pub mod profile_cards;
pub mod profile_form;
pub mod profile_schema;
pub mod profile_session;
pub mod profile_store;

pub use notifications::{NotificationSink, RecordingNotificationSink, TracingNotificationSink};
pub use profile_cards::ProfileCardService;
pub use profile_form::ProfileFormController;
pub use profile_schema::ProfileSchema;
pub use profile_session::ProfileSession;
pub use profile_store::{DeleteHandle, EntryStatus, InsertHandle, ProfileStore};
