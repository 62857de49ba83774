//! Per-evaluation probe context.
//!
//! # Design Decisions
//! - A context is created fresh for every probe evaluation
//! - Tags are snapshotted from the registration, so decorators mutating them
//!   never affect the registry or concurrent evaluations
//! - Clones of one context share its tag set; the host reads the final tags
//!   from its own clone after the evaluation returns

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::health::registration::ProbeRegistration;
use crate::health::types::HealthStatus;

/// Tag set owned by a single evaluation.
#[derive(Debug, Clone, Default)]
pub struct TagSet {
    inner: Arc<Mutex<BTreeSet<String>>>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeSet<String>> {
        // A panic while holding the lock cannot leave a set half-updated.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Add a tag. Returns `false` if it was already present.
    pub fn insert(&self, tag: impl Into<String>) -> bool {
        self.lock().insert(tag.into())
    }

    /// Remove a tag. Returns `false` if it was not present.
    pub fn remove(&self, tag: &str) -> bool {
        self.lock().remove(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.lock().contains(tag)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Sorted copy of the current tags.
    pub fn to_vec(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            inner: Arc::new(Mutex::new(iter.into_iter().map(Into::into).collect())),
        }
    }
}

/// Identity of the registration being evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationInfo {
    pub name: String,
    pub failure_status: HealthStatus,
}

/// Context handed to a probe for one evaluation.
#[derive(Debug, Clone)]
pub struct ProbeContext {
    registration: RegistrationInfo,
    tags: TagSet,
}

impl ProbeContext {
    /// Build a context for one evaluation of `registration`.
    pub fn new(registration: &ProbeRegistration) -> Self {
        Self {
            registration: RegistrationInfo {
                name: registration.name().to_string(),
                failure_status: registration.failure_status(),
            },
            tags: registration.tags().iter().cloned().collect(),
        }
    }

    /// Build a context without a backing registration.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            registration: RegistrationInfo {
                name: name.into(),
                failure_status: HealthStatus::Unhealthy,
            },
            tags: TagSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.registration.name
    }

    pub fn registration(&self) -> &RegistrationInfo {
        &self.registration
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }
}
