// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! End-of-life policy for minor release lines
//!
//! The newest minor line is always supported. An older line stays supported
//! while its first release is younger than one year, and after that for as
//! long as it keeps receiving patch releases within the last three months.
//! For each supported line the most recent patch release is reported.

use std::error::Error;

use chrono::{DateTime, Duration, Utc};

use crate::release::{Release, ReleaseGroups};

/// Days a minor line is supported after its first release
pub const DEFAULT_MAX_AGE_DAYS: i64 = 365;

/// Days an older minor line stays supported after its latest patch release
pub const DEFAULT_PATCH_WINDOW_DAYS: i64 = 90;

/// Support windows applied to each minor line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportPolicy {
    /// Window measured from the oldest listed release of a line
    pub max_age: Duration,
    /// Window measured from the newest listed release of a line
    pub patch_window: Duration,
}

impl Default for SupportPolicy {
    fn default() -> Self {
        Self::from_days(DEFAULT_MAX_AGE_DAYS, DEFAULT_PATCH_WINDOW_DAYS)
    }
}

impl SupportPolicy {
    #[must_use]
    pub fn from_days(max_age_days: i64, patch_window_days: i64) -> Self {
        Self {
            max_age: Duration::days(max_age_days),
            patch_window: Duration::days(patch_window_days),
        }
    }

    /// Compute the supported releases of a repository as of `now`
    ///
    /// Lines are visited newest first. The newest line contributes its last
    /// listed release without any age check. Every other line contributes its
    /// first listed (most recent) release when either window still holds.
    ///
    /// # Errors
    /// Returns error if `groups` is empty
    pub fn supported_releases(
        &self,
        groups: &ReleaseGroups,
        now: DateTime<Utc>,
    ) -> Result<Vec<Release>, Box<dyn Error>> {
        self.evaluate(groups, now, |_, _| {})
    }

    /// Same as [`Self::supported_releases`], reporting each decision to `log`
    ///
    /// # Errors
    /// Returns error if `groups` is empty
    pub fn evaluate(
        &self,
        groups: &ReleaseGroups,
        now: DateTime<Utc>,
        mut log: impl FnMut(&str, Decision),
    ) -> Result<Vec<Release>, Box<dyn Error>> {
        let mut lines = groups.newest_first();

        let Some((line, newest)) = lines.next() else {
            return Err("no releases found for repository".into());
        };
        let mut supported = Vec::with_capacity(groups.len());

        // Groups built through ReleaseGroups::push are never empty.
        if let Some(release) = newest.last() {
            log(&line.to_string(), Decision::Newest);
            supported.push(release.clone());
        }

        for (line, releases) in lines {
            let (Some(last_release), Some(first_release)) = (releases.first(), releases.last())
            else {
                continue;
            };

            let decision = if now - first_release.published_at < self.max_age {
                Decision::WithinMaxAge
            } else if now - last_release.published_at < self.patch_window {
                Decision::RecentPatch
            } else {
                Decision::EndOfLife
            };

            log(&line.to_string(), decision);
            if decision.is_supported() {
                supported.push(last_release.clone());
            }
        }

        Ok(supported)
    }
}

/// Outcome of the policy for one minor line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Newest minor line, supported regardless of age
    Newest,
    /// First release is younger than the max age
    WithinMaxAge,
    /// Older than the max age but patched within the patch window
    RecentPatch,
    /// Not supported
    EndOfLife,
}

impl Decision {
    #[must_use]
    pub fn is_supported(self) -> bool {
        !matches!(self, Self::EndOfLife)
    }

    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::Newest => "newest minor line",
            Self::WithinMaxAge => "first release within max age",
            Self::RecentPatch => "recent patch release",
            Self::EndOfLife => "end of life",
        }
    }
}
