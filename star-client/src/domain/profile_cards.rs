//! Profile card formatting.
//!
//! Converts profiles from the store into display-ready cards for the list view.
//! Truncation and image URL resolution here are display-only; stored profiles
//! are never modified.

use shared::{Profile, ProfileCard, ProfileCardLink, SocialPlatform};

use super::profile_store::{EntryStatus, ProfileStore};
use crate::config::DEFAULT_API_BASE_URL;

/// Default number of bio characters shown on a card
pub const DEFAULT_BIO_EXCERPT_CHARS: usize = 250;

/// Builds [`ProfileCard`]s from profiles
#[derive(Debug, Clone)]
pub struct ProfileCardService {
    bio_excerpt_chars: usize,
    image_base_url: String,
}

impl ProfileCardService {
    pub fn new() -> Self {
        Self::with_bio_excerpt_chars(DEFAULT_BIO_EXCERPT_CHARS)
    }

    pub fn with_bio_excerpt_chars(bio_excerpt_chars: usize) -> Self {
        Self {
            bio_excerpt_chars,
            image_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Resolve server-relative image paths against this base URL
    pub fn with_image_base_url(mut self, base_url: &str) -> Self {
        self.image_base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Cards for every visible profile, in store order
    pub fn cards(&self, store: &ProfileStore) -> Vec<ProfileCard> {
        store
            .entries()
            .map(|(profile, status)| self.card(profile, status == EntryStatus::Provisional))
            .collect()
    }

    pub fn card(&self, profile: &Profile, pending: bool) -> ProfileCard {
        let details = &profile.details;
        ProfileCard {
            id: profile.id.clone(),
            title: details.name.clone(),
            image_url: self.image_url(&details.image_url),
            date_label: details.date_of_birth.format("%B %-d, %Y").to_string(),
            rating: details.rating,
            rating_percent: Self::rating_percent(details.rating),
            links: SocialPlatform::ALL
                .iter()
                .map(|platform| ProfileCardLink {
                    platform: *platform,
                    label: platform.label().to_string(),
                    url: details.social_links.get(*platform).to_string(),
                })
                .collect(),
            bio_excerpt: self.bio_excerpt(&details.bio),
            delete_prompt: Self::delete_prompt(&details.name),
            pending,
        }
    }

    /// Image URL a view can load: absolute URLs pass through, paths stored by the
    /// collection service are joined to the base URL. An empty value stays empty.
    pub fn image_url(&self, stored: &str) -> String {
        let stored = stored.trim();
        if stored.is_empty() || stored.contains("://") || stored.starts_with("data:") {
            return stored.to_string();
        }
        format!("{}/{}", self.image_base_url, stored.trim_start_matches('/'))
    }

    /// First characters of the bio, with "..." when anything was cut
    pub fn bio_excerpt(&self, bio: &str) -> String {
        match bio.char_indices().nth(self.bio_excerpt_chars) {
            Some((cut, _)) => format!("{}...", &bio[..cut]),
            None => bio.to_string(),
        }
    }

    /// Rating on a 0-100 scale (5.0 is full)
    pub fn rating_percent(rating: f64) -> f64 {
        (rating * 20.0).clamp(0.0, 100.0)
    }

    pub fn delete_prompt(name: &str) -> String {
        format!(
            "This action cannot be undone. This will permanently delete {} and remove your data from our servers.",
            name
        )
    }
}

impl Default for ProfileCardService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::{ProfilePayload, SocialLinks};

    fn profile(id: &str, bio: &str) -> Profile {
        Profile::new(
            id,
            ProfilePayload {
                name: "Jane Doe".to_string(),
                bio: bio.to_string(),
                image_url: "/jane.jpg".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 1).unwrap(),
                social_links: SocialLinks::default(),
                rating: 4.5,
            },
        )
    }

    #[test]
    fn test_card_fields() {
        let service = ProfileCardService::new();

        let card = service.card(&profile("abc", "Short bio"), false);

        assert_eq!(card.id, "abc");
        assert_eq!(card.title, "Jane Doe");
        assert_eq!(card.image_url, "http://localhost:3000/jane.jpg");
        assert_eq!(card.date_label, "May 1, 1990");
        assert_eq!(card.rating_percent, 90.0);
        assert_eq!(card.bio_excerpt, "Short bio");
        assert_eq!(card.links.len(), 5);
        assert_eq!(card.links[0].label, "Instagram");
        assert_eq!(card.links[4].url, "https://yoursite.com");
        assert!(card.delete_prompt.contains("permanently delete Jane Doe"));
        assert!(!card.pending);
    }

    #[test]
    fn test_image_url_resolution() {
        let service = ProfileCardService::new().with_image_base_url("https://stars.example.com/");

        assert_eq!(
            service.image_url("/uploads/jane.jpg"),
            "https://stars.example.com/uploads/jane.jpg"
        );
        assert_eq!(service.image_url("jane.jpg"), "https://stars.example.com/jane.jpg");
        assert_eq!(
            service.image_url("https://cdn.example.com/jane.jpg"),
            "https://cdn.example.com/jane.jpg"
        );
        assert_eq!(service.image_url(""), "");
    }

    #[test]
    fn test_card_keeps_stored_image_path() {
        let service = ProfileCardService::new().with_image_base_url("http://api:8080");
        let stored = profile("abc", "");

        let card = service.card(&stored, false);

        assert_eq!(card.image_url, "http://api:8080/jane.jpg");
        assert_eq!(stored.details.image_url, "/jane.jpg");
    }

    #[test]
    fn test_bio_excerpt_truncates_for_display_only() {
        let service = ProfileCardService::with_bio_excerpt_chars(5);
        let stored = profile("abc", "Ångström units");

        let card = service.card(&stored, false);

        assert_eq!(card.bio_excerpt, "Ångst...");
        assert_eq!(stored.details.bio, "Ångström units");
        assert_eq!(service.bio_excerpt("tiny"), "tiny");
        assert_eq!(service.bio_excerpt("exact"), "exact");
    }

    #[test]
    fn test_cards_follow_store_order_and_flag_pending() {
        let service = ProfileCardService::new();
        let mut store = ProfileStore::new();
        store.initialize(vec![profile("a", ""), profile("b", "")]);
        store.optimistic_insert(profile("ignored", "").details);

        let cards = service.cards(&store);

        assert_eq!(cards.len(), 3);
        assert!(cards[0].pending);
        assert_eq!(cards[1].id, "a");
        assert_eq!(cards[2].id, "b");
        assert!(!cards[2].pending);
    }

    #[test]
    fn test_rating_percent_is_clamped() {
        assert_eq!(ProfileCardService::rating_percent(0.1), 2.0);
        assert_eq!(ProfileCardService::rating_percent(5.0), 100.0);
        assert_eq!(ProfileCardService::rating_percent(7.0), 100.0);
    }
}
