//! Error types for probe registration and evaluation.

use thiserror::Error;

/// Configuration-time errors raised while decorating registrations.
///
/// These are fatal: they indicate the registry was wired incorrectly and are
/// never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// A target probe name was empty.
    #[error("probe registration name cannot be empty")]
    EmptyName,

    /// A multi-name decoration was requested with no names.
    #[error("at least one probe registration name must be provided")]
    EmptyNames,

    /// No registration matched the requested name.
    #[error(
        "a probe registration named `{}` was not found in the registry, so it cannot be decorated. \
         The registration must be added before it is decorated. The existing registrations are: \n{}",
        .name,
        format_known(.known)
    )]
    NotFound { name: String, known: Vec<String> },

    /// A decorator builder was finished without a required argument.
    #[error("missing required argument `{0}`")]
    MissingArgument(&'static str),
}

fn format_known(known: &[String]) -> String {
    known
        .iter()
        .map(|name| format!("        `{}`", name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Errors surfaced while evaluating a probe.
///
/// Decorators propagate these unchanged to the host.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The probe was wired with a configuration that cannot be evaluated,
    /// e.g. its policy could not be resolved.
    #[error("probe `{probe}` is misconfigured: {reason}")]
    InvalidConfiguration { probe: String, reason: String },

    /// A retry strategy returned without ever running the wrapped probe.
    #[error("the probe `{probe}` was not executed by its retry strategy")]
    StrategyNeverInvoked { probe: String },

    /// The evaluation was cancelled before it completed.
    #[error("probe evaluation cancelled")]
    Cancelled,

    #[error("{0}")]
    Failed(String),

    #[error(transparent)]
    Source(Box<dyn std::error::Error + Send + Sync>),
}

impl ProbeError {
    /// Wrap an arbitrary error raised by a probe, predicate or strategy.
    pub fn other<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ProbeError::Source(Box::new(error))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ProbeError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_lists_known_names() {
        let err = RegistrationError::NotFound {
            name: "X".into(),
            known: vec!["redis".into(), "rabbitmq".into()],
        };
        let message = err.to_string();

        assert!(message.contains("`X`"));
        assert!(message.contains("        `redis`\n        `rabbitmq`"));
    }

    #[test]
    fn test_source_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = ProbeError::other(io);
        assert_eq!(err.to_string(), "refused");
        assert!(!err.is_cancelled());
    }
}
