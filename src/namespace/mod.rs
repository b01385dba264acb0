//! Deterministic id derivation
//!
//! Ids are name-based UUIDs (version 5, SHA-1) chained through namespaces:
//! parent namespace → file namespace → row id. The same
//! `(parent, file name, local name)` triple always yields the same id,
//! across runs and processes, with no registry.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Namespace for name-based ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdNamespace(Uuid);

impl IdNamespace {
    /// Wrap an existing UUID
    pub const fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Root namespace derived from a plain seed name
    ///
    /// The seed is hashed under the standard URL namespace.
    pub fn from_seed(seed: &str) -> Self {
        Self(Uuid::new_v5(&Uuid::NAMESPACE_URL, seed.as_bytes()))
    }

    /// Parse a namespace from UUID text, or derive one from a seed otherwise
    pub fn parse_or_seed(value: &str) -> Self {
        value
            .parse::<Uuid>()
            .map_or_else(|_| Self::from_seed(value), Self)
    }

    /// Namespace nested under this one
    pub fn child(&self, name: &str) -> Self {
        Self(self.create_id(name))
    }

    /// Deterministic id for a name within this namespace
    pub fn create_id(&self, local_name: &str) -> Uuid {
        Uuid::new_v5(&self.0, local_name.as_bytes())
    }
}

impl From<Uuid> for IdNamespace {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for IdNamespace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<Uuid>()
            .map(Self)
            .map_err(|e| Error::namespace(s, e.to_string()))
    }
}

impl fmt::Display for IdNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
