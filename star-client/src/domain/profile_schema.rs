//! Profile schema validation for the star directory.
//!
//! This module turns raw, untyped form input into a typed [`ProfilePayload`]
//! or a structured list of field errors. It is pure: no network, no state, and
//! identical input validated against the same reference date always gives the
//! same result.
//!
//! ## Rules
//!
//! - **name**: 3 to 255 characters, counted as Unicode scalar values, untrimmed
//! - **dateOfBirth**: `YYYY-MM-DD`, between 1900-01-01 and today, both inclusive
//! - **rating**: text coerced to a number, between 0.1 and 5.0 inclusive
//! - **social links**: opaque strings; platform root URLs when absent
//! - **bio / imageUrl**: unconstrained

use chrono::{Local, NaiveDate};
use shared::{
    ProfileFieldErrors, ProfileFormInput, ProfilePayload, ProfileSchemaConfig,
    ProfileValidationError, SocialLinks, SocialPlatform,
};

/// Declarative validation rules for a profile
#[derive(Debug, Clone, Default)]
pub struct ProfileSchema {
    config: ProfileSchemaConfig,
}

impl ProfileSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProfileSchemaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProfileSchemaConfig {
        &self.config
    }

    /// Validate raw input against today's local date
    pub fn validate(&self, raw: &ProfileFormInput) -> Result<ProfilePayload, ProfileFieldErrors> {
        self.validate_as_of(raw, Local::now().date_naive())
    }

    /// Validate raw input, treating `today` as the latest acceptable date of birth.
    ///
    /// Every field is checked; the error set lists all failures, not just the first.
    pub fn validate_as_of(
        &self,
        raw: &ProfileFormInput,
        today: NaiveDate,
    ) -> Result<ProfilePayload, ProfileFieldErrors> {
        let name = self.validate_name(&raw.name);
        let date_of_birth = self.validate_date_of_birth(&raw.date_of_birth, today);
        let rating = self.validate_rating(&raw.rating);

        match (name, date_of_birth, rating) {
            (Ok(()), Ok(date_of_birth), Ok(rating)) => Ok(ProfilePayload {
                name: raw.name.clone(),
                bio: raw.bio.clone(),
                image_url: raw.image_url.clone(),
                date_of_birth,
                social_links: Self::resolve_social_links(raw),
                rating,
            }),
            (name, date_of_birth, rating) => {
                let mut errors = ProfileFieldErrors::new();
                if let Err(e) = name {
                    errors.push(e);
                }
                if let Err(e) = date_of_birth {
                    errors.push(e);
                }
                if let Err(e) = rating {
                    errors.push(e);
                }
                Err(errors)
            }
        }
    }

    pub fn validate_name(&self, name: &str) -> Result<(), ProfileValidationError> {
        let length = name.chars().count();
        if length < self.config.name_min_chars {
            return Err(ProfileValidationError::NameTooShort {
                min: self.config.name_min_chars,
                actual: length,
            });
        }
        if length > self.config.name_max_chars {
            return Err(ProfileValidationError::NameTooLong {
                max: self.config.name_max_chars,
                actual: length,
            });
        }
        Ok(())
    }

    pub fn validate_date_of_birth(
        &self,
        date_input: &str,
        today: NaiveDate,
    ) -> Result<NaiveDate, ProfileValidationError> {
        let trimmed = date_input.trim();
        if trimmed.is_empty() {
            return Err(ProfileValidationError::MissingDateOfBirth);
        }

        let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map_err(|_| ProfileValidationError::InvalidDateOfBirth(date_input.to_string()))?;

        if date < self.config.earliest_date_of_birth {
            return Err(ProfileValidationError::DateOfBirthTooEarly {
                earliest: self.config.earliest_date_of_birth,
                actual: date,
            });
        }
        if date > today {
            return Err(ProfileValidationError::DateOfBirthInFuture { today, actual: date });
        }
        Ok(date)
    }

    /// Coerce rating text to a number and check its bounds
    pub fn validate_rating(&self, rating_input: &str) -> Result<f64, ProfileValidationError> {
        let rating = Self::coerce_rating(rating_input)?;

        if rating < self.config.rating_min {
            return Err(ProfileValidationError::RatingTooLow {
                min: self.config.rating_min,
                actual: rating,
            });
        }
        if rating > self.config.rating_max {
            return Err(ProfileValidationError::RatingTooHigh {
                max: self.config.rating_max,
                actual: rating,
            });
        }
        Ok(rating)
    }

    /// Numeric coercion for rating text. Non-numeric and non-finite input is an error.
    pub fn coerce_rating(rating_input: &str) -> Result<f64, ProfileValidationError> {
        let trimmed = rating_input.trim();
        if trimmed.is_empty() {
            return Err(ProfileValidationError::MissingRating);
        }

        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(ProfileValidationError::InvalidRating(rating_input.to_string())),
        }
    }

    fn resolve_social_links(raw: &ProfileFormInput) -> SocialLinks {
        let mut links = SocialLinks::default();
        for platform in SocialPlatform::ALL {
            if let Some(url) = raw.social_link(platform) {
                *links.get_mut(platform) = url.to_string();
            }
        }
        links
    }
}
