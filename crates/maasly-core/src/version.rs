// ── API versions and the per-kind read table ──
//
// Each entity kind registers its decoders against the first API version
// they apply to. Lookup picks the newest entry not newer than the request,
// so servers newer than anything registered get the newest known decoder,
// while servers older than the first entry are refused.

use std::fmt;
use std::str::FromStr;

use tracing::trace;

use maasly_api::Error;

/// A `major.minor.patch` API version. Parsed from `major.minor[.patch]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub const fn major_minor(self) -> (u32, u32) {
        (self.major, self.minor)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid version {input:?}: expected major.minor[.patch]")]
pub struct VersionParseError {
    pub input: String,
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VersionParseError { input: s.to_owned() };
        let mut parts = s.trim().split('.');
        let mut next = |required: bool| -> Result<u32, VersionParseError> {
            match parts.next() {
                Some(p) => p.parse().map_err(|_| invalid()),
                None if required => Err(invalid()),
                None => Ok(0),
            }
        };
        let major = next(true)?;
        let minor = next(true)?;
        let patch = next(false)?;
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self::new(major, minor, patch))
    }
}

// ── VersionTable ────────────────────────────────────────────────────

/// Ordered table of `(first version, entry)` pairs for one entity kind.
///
/// Entry `i` covers `[min_i, min_{i+1})` on major.minor; the last entry is
/// open-ended.
#[derive(Debug)]
pub struct VersionTable<T> {
    kind: &'static str,
    entries: Vec<(Version, T)>,
}

impl<T> VersionTable<T> {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    /// Register `entry` for `since` and later. Keeps the table sorted.
    #[must_use]
    pub fn with(mut self, since: Version, entry: T) -> Self {
        let at = self
            .entries
            .partition_point(|(v, _)| v.major_minor() <= since.major_minor());
        self.entries.insert(at, (since, entry));
        self
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// The entry that applies to `version`.
    pub fn resolve(&self, version: &Version) -> Result<&T, Error> {
        let idx = self
            .entries
            .partition_point(|(v, _)| v.major_minor() <= version.major_minor());
        let Some((since, entry)) = idx.checked_sub(1).and_then(|i| self.entries.get(i)) else {
            return Err(Error::unsupported_version(format!(
                "no {} read func for version {version}",
                self.kind
            )));
        };
        trace!(kind = self.kind, %version, %since, "resolved read func");
        Ok(entry)
    }
}
