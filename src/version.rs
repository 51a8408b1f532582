// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Release tag parsing
//!
//! This module turns release tags such as `v3.4.1` into structured versions
//! and exposes the `(major, minor)` key used to group patch releases into
//! minor lines.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::unwrap_used)]
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^v(\d+)\.(\d+)\.(\d+)").unwrap());

/// A release line: every patch release sharing the same major and minor number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MinorLine {
    pub major: u64,
    pub minor: u64,
}

impl fmt::Display for MinorLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}", self.major, self.minor)
    }
}

/// Version parsed from a release tag
///
/// Ordering is numeric on `(major, minor, patch)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Parse a release tag of the form `v<major>.<minor>.<patch>`
    ///
    /// The match is anchored at the start of the tag only, so trailing text
    /// such as a pre-release suffix is ignored. Anything else yields `None`;
    /// callers skip such tags.
    ///
    /// # Examples
    /// ```
    /// use release_eol::version::Version;
    /// let v = Version::parse("v3.4.1").unwrap();
    /// assert_eq!((v.major, v.minor, v.patch), (3, 4, 1));
    /// assert!(Version::parse("3.4.1").is_none());
    /// assert!(Version::parse("not-a-version").is_none());
    /// ```
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        let caps = TAG_RE.captures(tag)?;
        // Components too large for u64 are treated as unparseable.
        let major = caps[1].parse().ok()?;
        let minor = caps[2].parse().ok()?;
        let patch = caps[3].parse().ok()?;
        Some(Self {
            major,
            minor,
            patch,
        })
    }

    /// Key of the minor line this version belongs to
    #[must_use]
    pub fn minor_line(&self) -> MinorLine {
        MinorLine {
            major: self.major,
            minor: self.minor,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}
