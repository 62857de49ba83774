//! Options for conditional probes.

use serde::{Deserialize, Serialize};

use crate::health::HealthStatus;

pub const DEFAULT_SKIPPED_TAG_NAME: &str = "NotChecked";
pub const DEFAULT_STATUS_WHEN_SKIPPED: HealthStatus = HealthStatus::Healthy;

/// Overrides for how a skipped probe is reported.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConditionalOptions {
    /// Tag added to the context when the probe is skipped.
    pub skipped_tag_name: String,

    /// Status reported when the probe is skipped.
    pub status_when_skipped: HealthStatus,
}

impl Default for ConditionalOptions {
    fn default() -> Self {
        Self {
            skipped_tag_name: DEFAULT_SKIPPED_TAG_NAME.to_string(),
            status_when_skipped: DEFAULT_STATUS_WHEN_SKIPPED,
        }
    }
}

impl ConditionalOptions {
    pub fn with_skipped_tag_name(mut self, tag: impl Into<String>) -> Self {
        self.skipped_tag_name = tag.into();
        self
    }

    pub fn with_status_when_skipped(mut self, status: HealthStatus) -> Self {
        self.status_when_skipped = status;
        self
    }

    /// Merge user options with the defaults. An empty tag name falls back to
    /// the default tag.
    pub fn merged(options: Option<ConditionalOptions>) -> Self {
        let options = options.unwrap_or_default();
        Self {
            skipped_tag_name: if options.skipped_tag_name.is_empty() {
                DEFAULT_SKIPPED_TAG_NAME.to_string()
            } else {
                options.skipped_tag_name
            },
            status_when_skipped: options.status_when_skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged_defaults() {
        let options = ConditionalOptions::merged(None);
        assert_eq!(options.skipped_tag_name, "NotChecked");
        assert_eq!(options.status_when_skipped, HealthStatus::Healthy);
    }

    #[test]
    fn test_merged_keeps_overrides() {
        let options = ConditionalOptions::merged(Some(
            ConditionalOptions::default()
                .with_skipped_tag_name("MyTag")
                .with_status_when_skipped(HealthStatus::Degraded),
        ));
        assert_eq!(options.skipped_tag_name, "MyTag");
        assert_eq!(options.status_when_skipped, HealthStatus::Degraded);
    }

    #[test]
    fn test_merged_replaces_empty_tag() {
        let options = ConditionalOptions::merged(Some(
            ConditionalOptions::default().with_skipped_tag_name(""),
        ));
        assert_eq!(options.skipped_tag_name, DEFAULT_SKIPPED_TAG_NAME);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let options: ConditionalOptions = toml::from_str(r#"status_when_skipped = "degraded""#).unwrap();
        assert_eq!(options.skipped_tag_name, "NotChecked");
        assert_eq!(options.status_when_skipped, HealthStatus::Degraded);
    }
}
