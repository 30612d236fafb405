//! Requirement classification
//!
//! Derives feature flags from a free-text description by plain substring
//! containment on the lower-cased text. No tokenization or stemming, so
//! "email" counts as mentioning "ai".

use serde::{Deserialize, Serialize};

const REALTIME_KEYWORDS: &[&str] = &["realtime", "chat", "live", "socket"];
const HEAVY_DATA_KEYWORDS: &[&str] = &["analytics", "ai", "video", "big data"];
const ALERT_KEYWORDS: &[&str] = &["alert", "threshold", "notification"];

/// Requirement signals that shape the synthesized architecture
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub realtime: bool,
    pub heavy_data: bool,
    pub alerts: bool,
}

impl FeatureFlags {
    /// All eight flag combinations
    pub fn all_combinations() -> impl Iterator<Item = FeatureFlags> {
        (0u8..8).map(|bits| FeatureFlags {
            realtime: bits & 0b001 != 0,
            heavy_data: bits & 0b010 != 0,
            alerts: bits & 0b100 != 0,
        })
    }
}

/// Classifies a description into feature flags
pub fn classify(description: &str) -> FeatureFlags {
    let text = description.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|k| text.contains(k));

    FeatureFlags {
        realtime: mentions(REALTIME_KEYWORDS),
        heavy_data: mentions(HEAVY_DATA_KEYWORDS),
        alerts: mentions(ALERT_KEYWORDS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_keywords_is_all_false() {
        assert_eq!(classify("a simple todo app"), FeatureFlags::default());
    }

    #[test]
    fn realtime_keywords() {
        assert!(classify("Realtime collaboration").realtime);
        assert!(classify("team CHAT").realtime);
        assert!(classify("live scores").realtime);
        assert!(classify("websocket feed").realtime);
    }

    #[test]
    fn heavy_data_keywords() {
        assert!(classify("video streaming").heavy_data);
        assert!(classify("Big Data lake").heavy_data);
        assert!(classify("usage analytics").heavy_data);
    }

    #[test]
    fn substring_matching_has_no_word_boundaries() {
        // "ai" inside "email"
        assert!(classify("send email receipts").heavy_data);
        // "live" inside "delivery"
        assert!(classify("food delivery").realtime);
    }

    #[test]
    fn alert_keywords() {
        let flags = classify("realtime chat with alerts");
        assert!(flags.realtime);
        assert!(flags.alerts);
        assert!(!flags.heavy_data);

        assert!(classify("temperature threshold").alerts);
        assert!(classify("push Notification service").alerts);
    }

    #[test]
    fn combinations_are_distinct() {
        let all: Vec<_> = FeatureFlags::all_combinations().collect();
        assert_eq!(all.len(), 8);
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
