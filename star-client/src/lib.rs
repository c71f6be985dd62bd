//! # Star Client
//!
//! Client-side lifecycle for star profiles: validated creation through a form,
//! an ordered local collection kept in step with a remote `/stars` service
//! through optimistic updates, and user-facing notifications for every outcome.
//!
//! ```text
//! Form (ProfileFormController)
//!     ↓
//! Session (ProfileSession)  →  Notifications
//!     ↓                ↓
//! Store (ProfileStore)   Gateway (ProfileSyncGateway)
//! ```

pub mod config;
pub mod domain;
pub mod storage;

pub use config::{ClientConfig, ConfigError};
pub use domain::{
    NotificationSink, ProfileCardService, ProfileFormController, ProfileSchema, ProfileSession,
    ProfileStore,
};
pub use storage::{HttpProfileGateway, InMemoryProfileGateway, ProfileSyncGateway, SyncError};
