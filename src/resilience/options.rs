//! Options for retried probes.

use serde::{Deserialize, Serialize};

pub const DEFAULT_RETRIED_TAG_NAME: &str = "Retried";

/// Overrides for how a retried probe is tagged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryOptions {
    /// Tag added to the context of every retried probe.
    pub retried_tag_name: String,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            retried_tag_name: DEFAULT_RETRIED_TAG_NAME.to_string(),
        }
    }
}

impl RetryOptions {
    pub fn with_retried_tag_name(mut self, tag: impl Into<String>) -> Self {
        self.retried_tag_name = tag.into();
        self
    }

    /// Merge user options with the defaults. An empty tag name falls back to
    /// the default tag.
    pub fn merged(options: Option<RetryOptions>) -> Self {
        match options {
            Some(options) if !options.retried_tag_name.is_empty() => options,
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged() {
        assert_eq!(RetryOptions::merged(None).retried_tag_name, "Retried");
        assert_eq!(
            RetryOptions::merged(Some(RetryOptions::default().with_retried_tag_name("Again")))
                .retried_tag_name,
            "Again"
        );
        assert_eq!(
            RetryOptions::merged(Some(RetryOptions::default().with_retried_tag_name("")))
                .retried_tag_name,
            "Retried"
        );
    }
}
