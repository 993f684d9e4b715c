// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

pub const BADGE_TEXT_MAX_LEN: usize = 64;

/// Style class every normalized badge receives. Style is never
/// inferred from content.
pub const DEFAULT_BADGE_CLASS: &str = "badge-purple";

/// A display tag attached to hero slides and articles. Stored as a
/// JSON array column; `class_name` selects the presentation style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Badge {
    pub text: String,
    #[serde(rename = "className")]
    pub class_name: String,
}

impl Badge {
    /// Text past [`BADGE_TEXT_MAX_LEN`] characters is truncated; a
    /// badge is a short display tag, not a content field.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let mut text: String = text.into();
        if text.chars().count() > BADGE_TEXT_MAX_LEN {
            text = text.chars().take(BADGE_TEXT_MAX_LEN).collect();
        }
        Self {
            text,
            class_name: DEFAULT_BADGE_CLASS.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_shape_uses_camel_case_class_name() {
        let badge = Badge::new("SNS");
        let json = serde_json::to_value(&badge).expect("badge json");
        assert_eq!(
            json,
            serde_json::json!({"text": "SNS", "className": "badge-purple"})
        );
    }

    #[test]
    fn overlong_text_is_truncated_on_char_boundaries() {
        let badge = Badge::new("x".repeat(BADGE_TEXT_MAX_LEN + 20));
        assert_eq!(badge.text.len(), BADGE_TEXT_MAX_LEN);

        // Multi-byte text counts characters, not bytes.
        let badge = Badge::new("바".repeat(BADGE_TEXT_MAX_LEN + 1));
        assert_eq!(badge.text.chars().count(), BADGE_TEXT_MAX_LEN);

        let badge = Badge::new("짧은 태그");
        assert_eq!(badge.text, "짧은 태그");
    }
}
