// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Per-repository reporting
//!
//! Drives one repository through listing, grouping and the support policy,
//! then writes the text report. Text is written as soon as it is known so
//! that whatever was printed before a failure stays visible.

use std::error::Error;
use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::client::{ReleaseClient, extract_image};
use crate::humanize::duration_ago;
use crate::policy::SupportPolicy;
use crate::release::ReleaseGroups;

/// Heading of the image section
pub const DOC_HEADING: &str = "Supported Versions with docker images for each end of life version:";

/// Output toggles and policy for a run
#[derive(Debug, Clone, Copy)]
#[allow(clippy::struct_excessive_bools)]
pub struct ReportOptions {
    /// Print supported versions with date and age
    pub display: bool,
    /// Resolve and print the container image of each supported version
    pub doc: bool,
    /// Suppress text output; results are only returned
    pub json: bool,
    /// Progress diagnostics on stderr
    pub verbose: bool,
    pub policy: SupportPolicy,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            display: true,
            doc: false,
            json: false,
            verbose: false,
            policy: SupportPolicy::default(),
        }
    }
}

/// One supported release as reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportedRelease {
    pub tag: String,
    pub published: NaiveDate,
    pub published_at: DateTime<Utc>,
    pub age: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Supported releases of one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryReport {
    pub repo: String,
    pub supported: Vec<SupportedRelease>,
}

/// Runs the support report for repositories through a [`ReleaseClient`]
pub struct Reporter<'a, C: ReleaseClient> {
    client: &'a C,
    options: ReportOptions,
    now: DateTime<Utc>,
}

impl<'a, C: ReleaseClient> Reporter<'a, C> {
    #[must_use]
    pub fn new(client: &'a C, options: ReportOptions, now: DateTime<Utc>) -> Self {
        Self {
            client,
            options,
            now,
        }
    }

    /// Report on a single repository, writing text output to `out`
    ///
    /// # Errors
    /// Returns error if the listing cannot be fetched or parsed, if the
    /// repository has no versioned releases, if an image cannot be resolved,
    /// or if writing to `out` fails
    pub fn report(
        &self,
        repo: &str,
        out: &mut impl Write,
    ) -> Result<RepositoryReport, Box<dyn Error>> {
        let verbose = self.options.verbose;
        let text = !self.options.json;

        let listing = self.client.list_releases(repo)?;
        let groups = ReleaseGroups::from_listing(&listing).map_err(|e| format!("{repo}: {e}"))?;

        if verbose {
            eprintln!(
                "{repo}: {} versioned releases in {} minor lines",
                groups.release_count(),
                groups.len()
            );
        }

        let releases = self
            .options
            .policy
            .evaluate(&groups, self.now, |line, decision| {
                if verbose {
                    eprintln!("{repo}: {line}: {}", decision.describe());
                }
            })
            .map_err(|e| format!("{repo}: {e}"))?;

        let mut supported: Vec<SupportedRelease> = releases
            .into_iter()
            .map(|release| SupportedRelease {
                age: duration_ago(release.published_at, self.now),
                published: release.published_at.date_naive(),
                published_at: release.published_at,
                tag: release.tag,
                image: None,
            })
            .collect();

        if self.options.display && text {
            writeln!(
                out,
                "Supported versions with release date and age of `{repo}`:\n"
            )?;
            for release in &supported {
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    release.tag,
                    release.published.format("%Y-%m-%d"),
                    release.age
                )?;
            }
        }

        if self.options.doc {
            if text {
                writeln!(out, "\n{DOC_HEADING}\n")?;
            }
            for release in &mut supported {
                let description = self.client.view_release(repo, &release.tag)?;
                let image = extract_image(&description)
                    .map_err(|e| format!("{repo} {}: {e}", release.tag))?;
                if text {
                    writeln!(out, "{}\t{image}", release.tag)?;
                }
                release.image = Some(image);
            }
        }

        if text {
            writeln!(out)?;
        }
        out.flush()?;

        Ok(RepositoryReport {
            repo: repo.to_string(),
            supported,
        })
    }

    /// Report on each repository in order, stopping at the first failure
    ///
    /// # Errors
    /// Returns the first error encountered; later repositories are not processed
    pub fn report_all(
        &self,
        repos: &[String],
        out: &mut impl Write,
    ) -> Result<Vec<RepositoryReport>, Box<dyn Error>> {
        let mut reports = Vec::with_capacity(repos.len());
        for repo in repos {
            reports.push(self.report(repo, out)?);
        }

        if self.options.json {
            serde_json::to_writer_pretty(&mut *out, &reports)?;
            writeln!(out)?;
        }

        Ok(reports)
    }
}
