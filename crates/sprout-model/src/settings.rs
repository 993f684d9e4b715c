// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every key the settings screen persists, in save order. The store
/// keeps one key/value row per entry and upserts on save.
pub const SETTING_KEYS: &[&str] = &[
    "site_title",
    "site_description",
    "contact_email",
    "contact_phone",
    "footer_text",
    "social_links",
];

/// Site-wide settings as one denormalized object. `social_links` maps
/// platform name to URL and is stored as a JSON value row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteSettings {
    pub site_title: String,
    pub site_description: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub footer_text: String,
    pub social_links: BTreeMap<String, String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_title: "Sprout".to_string(),
            site_description: String::new(),
            contact_email: String::new(),
            contact_phone: String::new(),
            footer_text: String::new(),
            social_links: BTreeMap::new(),
        }
    }
}

impl SiteSettings {
    /// Flattens into key/value rows for persistence; `social_links`
    /// serializes to its JSON object form.
    #[must_use]
    pub fn to_rows(&self) -> Vec<(String, String)> {
        vec![
            ("site_title".to_string(), self.site_title.clone()),
            (
                "site_description".to_string(),
                self.site_description.clone(),
            ),
            ("contact_email".to_string(), self.contact_email.clone()),
            ("contact_phone".to_string(), self.contact_phone.clone()),
            ("footer_text".to_string(), self.footer_text.clone()),
            (
                "social_links".to_string(),
                serde_json::to_string(&self.social_links).unwrap_or_else(|_| "{}".to_string()),
            ),
        ]
    }

    /// Rebuilds from key/value rows; unknown keys are ignored, missing
    /// keys fall back to defaults.
    #[must_use]
    pub fn from_rows(rows: &[(String, String)]) -> Self {
        let mut settings = Self::default();
        for (key, value) in rows {
            match key.as_str() {
                "site_title" => settings.site_title = value.clone(),
                "site_description" => settings.site_description = value.clone(),
                "contact_email" => settings.contact_email = value.clone(),
                "contact_phone" => settings.contact_phone = value.clone(),
                "footer_text" => settings.footer_text = value.clone(),
                "social_links" => {
                    settings.social_links = serde_json::from_str(value).unwrap_or_default();
                }
                _ => {}
            }
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_round_trip() {
        let mut settings = SiteSettings {
            site_title: "고구마팜".to_string(),
            contact_email: "hello@example.com".to_string(),
            ..SiteSettings::default()
        };
        settings
            .social_links
            .insert("instagram".to_string(), "https://instagram.com/x".to_string());

        let rows = settings.to_rows();
        assert_eq!(rows.len(), SETTING_KEYS.len());
        assert_eq!(SiteSettings::from_rows(&rows), settings);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let rows = vec![
            ("site_title".to_string(), "x".to_string()),
            ("legacy_key".to_string(), "y".to_string()),
        ];
        let settings = SiteSettings::from_rows(&rows);
        assert_eq!(settings.site_title, "x");
    }
}
