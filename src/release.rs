// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Grouping of a repository's release listing into minor lines
//!
//! The listing is the tab-delimited output of `gh release list`. Each line
//! carries the tag in its first field and the publish time in its fourth.
//! Entries are kept in listing order within a group, which is expected to be
//! newest-first; that expectation is checked while grouping.

use std::collections::BTreeMap;
use std::error::Error;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::version::{MinorLine, Version};

/// Publish timestamp format used by the release listing
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A published release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Release {
    /// Tag as listed (e.g. "v3.4.1")
    pub tag: String,
    /// Publish time in UTC
    pub published_at: DateTime<Utc>,
}

impl Release {
    #[must_use]
    pub fn new(tag: impl Into<String>, published_at: DateTime<Utc>) -> Self {
        Self {
            tag: tag.into(),
            published_at,
        }
    }
}

/// Parse a listing timestamp such as `2023-04-27T22:28:06Z`
///
/// # Errors
/// Returns error if the string does not match [`TIMESTAMP_FORMAT`] exactly
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, Box<dyn Error>> {
    let naive = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map_err(|e| format!("Invalid publish timestamp {s:?}: {e}"))?;
    Ok(naive.and_utc())
}

/// Releases grouped by minor line, each group in listing order (newest first)
#[derive(Debug, Clone, Default)]
pub struct ReleaseGroups {
    groups: BTreeMap<MinorLine, Vec<Release>>,
}

impl ReleaseGroups {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build groups from raw `gh release list` output
    ///
    /// Lines whose tag is not a `v<major>.<minor>.<patch>` version are
    /// skipped. Blank lines are ignored.
    ///
    /// # Errors
    /// Returns error if a versioned line has a missing or malformed publish
    /// timestamp, or if the listing is not newest-first within a minor line
    pub fn from_listing(listing: &str) -> Result<Self, Box<dyn Error>> {
        let mut groups = Self::new();

        for line in listing.lines() {
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').collect();
            let tag = fields[0];
            let Some(version) = Version::parse(tag) else {
                continue;
            };

            let published = fields
                .get(3)
                .ok_or_else(|| format!("Missing publish timestamp in release line: {line:?}"))?;
            let published_at = parse_timestamp(published)?;

            groups.push(version.minor_line(), Release::new(tag, published_at))?;
        }

        Ok(groups)
    }

    /// Append a release to the end of its minor line
    ///
    /// # Errors
    /// Returns error if the release is newer than the entry listed before it
    /// in the same minor line
    pub fn push(&mut self, line: MinorLine, release: Release) -> Result<(), Box<dyn Error>> {
        let group = self.groups.entry(line).or_default();
        if let Some(previous) = group.last()
            && previous.published_at < release.published_at
        {
            return Err(format!(
                "Release listing is not newest-first: {} ({}) is listed after older {} ({})",
                release.tag,
                release.published_at.format("%Y-%m-%d"),
                previous.tag,
                previous.published_at.format("%Y-%m-%d"),
            )
            .into());
        }
        group.push(release);
        Ok(())
    }

    /// Releases of a single minor line, newest first
    #[must_use]
    pub fn get(&self, line: &MinorLine) -> Option<&[Release]> {
        self.groups.get(line).map(Vec::as_slice)
    }

    /// Minor lines from newest to oldest, with their releases
    pub fn newest_first(&self) -> impl Iterator<Item = (&MinorLine, &[Release])> {
        self.groups
            .iter()
            .rev()
            .map(|(line, releases)| (line, releases.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of releases across all minor lines
    #[must_use]
    pub fn release_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}
