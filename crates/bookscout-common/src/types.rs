//! Small value types shared by the pipeline and its callers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Identifier of one search run.
///
/// Generations are issued in increasing order by a pipeline; a delivery whose
/// generation is not the latest issued one has been superseded.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    /// The generation before any run has been issued.
    pub const ZERO: Generation = Generation(0);

    /// The generation following this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for Generation {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Generation> for u64 {
    fn from(generation: Generation) -> Self {
        generation.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of results requested from the catalog for a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct MaxResults(u32);

impl MaxResults {
    /// Smallest page size the catalog accepts.
    pub const MIN: u32 = 1;
    /// Largest page size the catalog accepts.
    pub const MAX: u32 = 40;
    /// Page size used when the caller does not ask for one.
    pub const DEFAULT: MaxResults = MaxResults(10);

    /// Validate a requested page size.
    pub fn new(value: u32) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidMaxResults(value))
        }
    }

    /// Clamp any requested page size into the accepted range.
    pub fn clamped(value: u32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for MaxResults {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for MaxResults {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<MaxResults> for u32 {
    fn from(value: MaxResults) -> Self {
        value.0
    }
}

impl fmt::Display for MaxResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
