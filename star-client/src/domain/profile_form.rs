//! Profile form state and submission.
//!
//! The controller owns transient form state (current values, which fields the user
//! touched, and field errors from the last submit) and never touches the profile
//! collection itself. A successful submit hands the validated payload to a creation
//! intent and resets the form to its declared defaults; a failed submit only
//! surfaces field errors.

use std::collections::BTreeSet;

use shared::{
    ProfileField, ProfileFieldErrors, ProfileFormInput, ProfilePayload, UnknownFieldError,
};
use tracing::debug;

use super::profile_schema::ProfileSchema;

/// Form controller for creating a profile
#[derive(Debug, Clone)]
pub struct ProfileFormController {
    schema: ProfileSchema,
    values: ProfileFormInput,
    touched: BTreeSet<ProfileField>,
    errors: ProfileFieldErrors,
}

impl ProfileFormController {
    pub fn new() -> Self {
        Self::with_schema(ProfileSchema::new())
    }

    pub fn with_schema(schema: ProfileSchema) -> Self {
        Self {
            schema,
            values: ProfileFormInput::with_defaults(),
            touched: BTreeSet::new(),
            errors: ProfileFieldErrors::new(),
        }
    }

    /// Update a field value. Any error shown for that field is cleared until the next submit.
    pub fn set_field(&mut self, field: ProfileField, value: impl Into<String>) {
        self.values.set(field, value.into());
        self.touched.insert(field);
        self.errors.clear_field(field);
    }

    /// Update a field identified by its form or wire name
    pub fn set_field_by_name(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<ProfileField, UnknownFieldError> {
        let field: ProfileField = name.parse()?;
        self.set_field(field, value);
        Ok(field)
    }

    pub fn value(&self, field: ProfileField) -> Option<&str> {
        self.values.get(field)
    }

    pub fn values(&self) -> &ProfileFormInput {
        &self.values
    }

    pub fn is_touched(&self, field: ProfileField) -> bool {
        self.touched.contains(&field)
    }

    pub fn errors(&self) -> &ProfileFieldErrors {
        &self.errors
    }

    /// Messages to display under a field
    pub fn field_errors(&self, field: ProfileField) -> Vec<String> {
        self.errors.messages_for(field)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Validate the current values.
    ///
    /// On success the form is reset and the payload returned. On failure the field
    /// errors are kept for display and `None` is returned.
    pub fn submit(&mut self) -> Option<ProfilePayload> {
        match self.schema.validate(&self.values) {
            Ok(payload) => {
                debug!("📝 Profile form valid for '{}'", payload.name);
                self.reset();
                Some(payload)
            }
            Err(errors) => {
                debug!("📝 Profile form rejected: {}", errors);
                self.touched.extend(errors.fields());
                self.errors = errors;
                None
            }
        }
    }

    /// Validate and, when valid, call the creation intent with the payload.
    ///
    /// The intent runs only for valid input; its return value (for example the
    /// future performing the remote create) is passed back to the caller.
    pub fn submit_with<F, R>(&mut self, intent: F) -> Option<R>
    where
        F: FnOnce(ProfilePayload) -> R,
    {
        self.submit().map(intent)
    }

    /// Restore the declared defaults and forget touched and error state
    pub fn reset(&mut self) {
        self.values = ProfileFormInput::with_defaults();
        self.touched.clear();
        self.errors = ProfileFieldErrors::new();
    }
}

impl Default for ProfileFormController {
    fn default() -> Self {
        Self::new()
    }
}
