use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_INSTAGRAM_URL: &str = "https://instagram.com";
pub const DEFAULT_X_URL: &str = "https://x.com";
pub const DEFAULT_VIDEO_URL: &str = "https://youtube.com";
pub const DEFAULT_ALT_URL: &str = "https://threads.net";
pub const DEFAULT_WEBSITE_URL: &str = "https://yoursite.com";

/// Rating a freshly opened form starts with (the schema minimum)
pub const DEFAULT_RATING_TEXT: &str = "0.1";

/// A public-figure profile ("star") as held by the remote collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Server-assigned identifier
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub details: ProfilePayload,
}

impl Profile {
    pub fn new(id: impl Into<String>, details: ProfilePayload) -> Self {
        Self {
            id: id.into(),
            details,
        }
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }
}

/// Validated profile fields, ready to be sent to the collection service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilePayload {
    /// Display name (3 to 255 characters)
    pub name: String,
    /// Free-form biography, never truncated in storage
    #[serde(default)]
    pub bio: String,
    /// Portrait image URL
    #[serde(rename = "dp", default)]
    pub image_url: String,
    /// Date of birth, between 1900-01-01 and today inclusive
    #[serde(rename = "dob", with = "wire_date")]
    pub date_of_birth: NaiveDate,
    #[serde(flatten)]
    pub social_links: SocialLinks,
    /// Rating between 0.1 and 5.0
    pub rating: f64,
}

/// Serde adapter for dates on the wire.
///
/// Dates are written as `YYYY-MM-DD`. On read, RFC 3339 timestamps are accepted as
/// well since the collection service stores dates of birth as full timestamps.
pub mod wire_date {
    use chrono::{DateTime, Duration, NaiveDate};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {}", raw)))
    }

    /// Parse either a plain date or an RFC 3339 timestamp.
    ///
    /// Browser clients store a picked date as local midnight converted to UTC, so
    /// `1990-04-30T22:00:00Z` from a UTC+2 client means May 1. A timestamp is
    /// rounded to its nearest midnight, which recovers the picked date for
    /// offsets from UTC-11 to UTC+12.
    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, FORMAT).ok().or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| (dt.naive_local() + Duration::hours(12)).date())
        })
    }
}

/// Social platforms every profile links to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SocialPlatform {
    Instagram,
    X,
    Video,
    Alt,
    Website,
}

impl SocialPlatform {
    /// All platforms in display order
    pub const ALL: [SocialPlatform; 5] = [
        SocialPlatform::Instagram,
        SocialPlatform::X,
        SocialPlatform::Video,
        SocialPlatform::Alt,
        SocialPlatform::Website,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SocialPlatform::Instagram => "Instagram",
            SocialPlatform::X => "X (Twitter)",
            SocialPlatform::Video => "Youtube",
            SocialPlatform::Alt => "Threads",
            SocialPlatform::Website => "Website",
        }
    }

    /// Platform root URL used when the user leaves the link out
    pub fn default_url(&self) -> &'static str {
        match self {
            SocialPlatform::Instagram => DEFAULT_INSTAGRAM_URL,
            SocialPlatform::X => DEFAULT_X_URL,
            SocialPlatform::Video => DEFAULT_VIDEO_URL,
            SocialPlatform::Alt => DEFAULT_ALT_URL,
            SocialPlatform::Website => DEFAULT_WEBSITE_URL,
        }
    }
}

/// The fixed set of five social links. URLs are opaque strings, never validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    #[serde(rename = "ig_link")]
    pub instagram: String,
    #[serde(rename = "x_link")]
    pub x: String,
    #[serde(rename = "ph_link")]
    pub video: String,
    #[serde(rename = "of_link")]
    pub alt: String,
    #[serde(rename = "web")]
    pub website: String,
}

impl SocialLinks {
    pub fn get(&self, platform: SocialPlatform) -> &str {
        match platform {
            SocialPlatform::Instagram => &self.instagram,
            SocialPlatform::X => &self.x,
            SocialPlatform::Video => &self.video,
            SocialPlatform::Alt => &self.alt,
            SocialPlatform::Website => &self.website,
        }
    }

    pub fn get_mut(&mut self, platform: SocialPlatform) -> &mut String {
        match platform {
            SocialPlatform::Instagram => &mut self.instagram,
            SocialPlatform::X => &mut self.x,
            SocialPlatform::Video => &mut self.video,
            SocialPlatform::Alt => &mut self.alt,
            SocialPlatform::Website => &mut self.website,
        }
    }
}

impl Default for SocialLinks {
    fn default() -> Self {
        Self {
            instagram: DEFAULT_INSTAGRAM_URL.to_string(),
            x: DEFAULT_X_URL.to_string(),
            video: DEFAULT_VIDEO_URL.to_string(),
            alt: DEFAULT_ALT_URL.to_string(),
            website: DEFAULT_WEBSITE_URL.to_string(),
        }
    }
}

/// Identifies one input field of the profile form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProfileField {
    Name,
    Bio,
    ImageUrl,
    DateOfBirth,
    Social(SocialPlatform),
    Rating,
}

impl ProfileField {
    /// Every form field in display order
    pub const ALL: [ProfileField; 10] = [
        ProfileField::Name,
        ProfileField::Bio,
        ProfileField::ImageUrl,
        ProfileField::DateOfBirth,
        ProfileField::Social(SocialPlatform::Instagram),
        ProfileField::Social(SocialPlatform::X),
        ProfileField::Social(SocialPlatform::Video),
        ProfileField::Social(SocialPlatform::Alt),
        ProfileField::Social(SocialPlatform::Website),
        ProfileField::Rating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Bio => "bio",
            ProfileField::ImageUrl => "imageUrl",
            ProfileField::DateOfBirth => "dateOfBirth",
            ProfileField::Social(SocialPlatform::Instagram) => "instagram",
            ProfileField::Social(SocialPlatform::X) => "x",
            ProfileField::Social(SocialPlatform::Video) => "video",
            ProfileField::Social(SocialPlatform::Alt) => "alt",
            ProfileField::Social(SocialPlatform::Website) => "website",
            ProfileField::Rating => "rating",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown profile field: {0}")]
pub struct UnknownFieldError(pub String);

impl FromStr for ProfileField {
    type Err = UnknownFieldError;

    /// Accepts the camelCase names and the collection service's wire names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(ProfileField::Name),
            "bio" => Ok(ProfileField::Bio),
            "imageUrl" | "dp" => Ok(ProfileField::ImageUrl),
            "dateOfBirth" | "dob" => Ok(ProfileField::DateOfBirth),
            "instagram" | "ig_link" => Ok(ProfileField::Social(SocialPlatform::Instagram)),
            "x" | "x_link" => Ok(ProfileField::Social(SocialPlatform::X)),
            "video" | "ph_link" => Ok(ProfileField::Social(SocialPlatform::Video)),
            "alt" | "of_link" => Ok(ProfileField::Social(SocialPlatform::Alt)),
            "website" | "web" => Ok(ProfileField::Social(SocialPlatform::Website)),
            "rating" => Ok(ProfileField::Rating),
            other => Err(UnknownFieldError(other.to_string())),
        }
    }
}

/// Raw, unvalidated form input exactly as the user typed it
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileFormInput {
    pub name: String,
    pub bio: String,
    pub image_url: String,
    /// `YYYY-MM-DD`, empty when no date was picked
    pub date_of_birth: String,
    /// `None` means the user never supplied the link
    pub instagram: Option<String>,
    pub x: Option<String>,
    pub video: Option<String>,
    pub alt: Option<String>,
    pub website: Option<String>,
    /// Rating as typed; coerced to a number during validation
    pub rating: String,
}

impl ProfileFormInput {
    /// Input a freshly opened form starts with
    pub fn with_defaults() -> Self {
        Self {
            instagram: Some(DEFAULT_INSTAGRAM_URL.to_string()),
            x: Some(DEFAULT_X_URL.to_string()),
            video: Some(DEFAULT_VIDEO_URL.to_string()),
            alt: Some(DEFAULT_ALT_URL.to_string()),
            website: Some(DEFAULT_WEBSITE_URL.to_string()),
            rating: DEFAULT_RATING_TEXT.to_string(),
            ..Self::default()
        }
    }

    pub fn social_link(&self, platform: SocialPlatform) -> Option<&str> {
        match platform {
            SocialPlatform::Instagram => self.instagram.as_deref(),
            SocialPlatform::X => self.x.as_deref(),
            SocialPlatform::Video => self.video.as_deref(),
            SocialPlatform::Alt => self.alt.as_deref(),
            SocialPlatform::Website => self.website.as_deref(),
        }
    }

    fn social_link_mut(&mut self, platform: SocialPlatform) -> &mut Option<String> {
        match platform {
            SocialPlatform::Instagram => &mut self.instagram,
            SocialPlatform::X => &mut self.x,
            SocialPlatform::Video => &mut self.video,
            SocialPlatform::Alt => &mut self.alt,
            SocialPlatform::Website => &mut self.website,
        }
    }

    /// Current value of a field, `None` for a social link that was never supplied
    pub fn get(&self, field: ProfileField) -> Option<&str> {
        match field {
            ProfileField::Name => Some(&self.name),
            ProfileField::Bio => Some(&self.bio),
            ProfileField::ImageUrl => Some(&self.image_url),
            ProfileField::DateOfBirth => Some(&self.date_of_birth),
            ProfileField::Social(platform) => self.social_link(platform),
            ProfileField::Rating => Some(&self.rating),
        }
    }

    pub fn set(&mut self, field: ProfileField, value: String) {
        match field {
            ProfileField::Name => self.name = value,
            ProfileField::Bio => self.bio = value,
            ProfileField::ImageUrl => self.image_url = value,
            ProfileField::DateOfBirth => self.date_of_birth = value,
            ProfileField::Social(platform) => *self.social_link_mut(platform) = Some(value),
            ProfileField::Rating => self.rating = value,
        }
    }
}

/// Field-scoped validation failures for the profile form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum ProfileValidationError {
    #[error("Name must contain at least {min} characters")]
    NameTooShort { min: usize, actual: usize },
    #[error("Name must contain at most {max} characters")]
    NameTooLong { max: usize, actual: usize },
    #[error("Date of birth is required")]
    MissingDateOfBirth,
    #[error("Date of birth must be in YYYY-MM-DD format (got {0:?})")]
    InvalidDateOfBirth(String),
    #[error("Date of birth cannot be before {earliest}")]
    DateOfBirthTooEarly { earliest: NaiveDate, actual: NaiveDate },
    #[error("Date of birth cannot be in the future")]
    DateOfBirthInFuture { today: NaiveDate, actual: NaiveDate },
    #[error("Rating is required")]
    MissingRating,
    #[error("Rating must be a number (got {0:?})")]
    InvalidRating(String),
    #[error("Rating must be at least {min}")]
    RatingTooLow { min: f64, actual: f64 },
    #[error("Rating must be at most {max}")]
    RatingTooHigh { max: f64, actual: f64 },
}

impl ProfileValidationError {
    /// The form field this error belongs to
    pub fn field(&self) -> ProfileField {
        match self {
            ProfileValidationError::NameTooShort { .. } | ProfileValidationError::NameTooLong { .. } => {
                ProfileField::Name
            }
            ProfileValidationError::MissingDateOfBirth
            | ProfileValidationError::InvalidDateOfBirth(_)
            | ProfileValidationError::DateOfBirthTooEarly { .. }
            | ProfileValidationError::DateOfBirthInFuture { .. } => ProfileField::DateOfBirth,
            ProfileValidationError::MissingRating
            | ProfileValidationError::InvalidRating(_)
            | ProfileValidationError::RatingTooLow { .. }
            | ProfileValidationError::RatingTooHigh { .. } => ProfileField::Rating,
        }
    }
}

/// All validation failures produced for one form submission
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileFieldErrors {
    errors: Vec<ProfileValidationError>,
}

impl ProfileFieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ProfileValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProfileValidationError> {
        self.errors.iter()
    }

    pub fn for_field(&self, field: ProfileField) -> impl Iterator<Item = &ProfileValidationError> {
        self.errors.iter().filter(move |e| e.field() == field)
    }

    pub fn has_field(&self, field: ProfileField) -> bool {
        self.for_field(field).next().is_some()
    }

    /// Fields carrying at least one error
    pub fn fields(&self) -> BTreeSet<ProfileField> {
        self.errors.iter().map(|e| e.field()).collect()
    }

    /// User-facing messages for a single field
    pub fn messages_for(&self, field: ProfileField) -> Vec<String> {
        self.for_field(field).map(|e| e.to_string()).collect()
    }

    pub fn clear_field(&mut self, field: ProfileField) {
        self.errors.retain(|e| e.field() != field);
    }
}

impl fmt::Display for ProfileFieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field(), error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProfileFieldErrors {}

/// Bounds enforced by the profile schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSchemaConfig {
    pub name_min_chars: usize,
    pub name_max_chars: usize,
    pub rating_min: f64,
    pub rating_max: f64,
    pub earliest_date_of_birth: NaiveDate,
}

impl Default for ProfileSchemaConfig {
    fn default() -> Self {
        Self {
            name_min_chars: 3,
            name_max_chars: 255,
            rating_min: 0.1,
            rating_max: 5.0,
            earliest_date_of_birth: NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN),
        }
    }
}

/// Read model handed to the list view
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileListSnapshot {
    /// Profiles newest first, including ones still waiting on the server
    pub profiles: Vec<Profile>,
    /// True only while the initial list request is in flight
    pub loading: bool,
}

/// A single social link as rendered on a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileCardLink {
    pub platform: SocialPlatform,
    pub label: String,
    pub url: String,
}

/// Display-ready representation of a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileCard {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub date_label: String,
    pub rating: f64,
    /// Rating scaled to 0-100 for a progress bar
    pub rating_percent: f64,
    pub links: Vec<ProfileCardLink>,
    pub bio_excerpt: String,
    /// Text of the irreversible-delete confirmation dialog
    pub delete_prompt: String,
    /// True while the create request for this profile has not been confirmed
    pub pending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Success,
    Failure,
}

/// User-visible feedback raised after a remote operation settles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn failure(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Failure,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.kind == NotificationKind::Failure
    }
}
