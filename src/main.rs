// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Release End-of-Life (release-eol) - Main Application
//!
//! Lists the currently supported versions of one or more GitHub repositories,
//! optionally with the docker image published for each of them. Release data
//! is fetched with the GitHub CLI, which must be installed and authenticated.

use std::error::Error;
use std::io;
use std::process::exit;

use chrono::Utc;
use clap::Parser;

use release_eol::{GhClient, ReportOptions, Reporter, SupportPolicy};

mod cli;

use cli::Cli;

/// Main application entry point
///
/// Verifies that `gh` is available, then reports on every repository in the
/// order given. Any failure is printed to stderr and exits with status 1.
fn main() {
    let cli = Cli::parse();

    // Verify pre-reqs before touching any repository
    let client = match GhClient::locate() {
        Ok(client) => client.with_limit(cli.limit).with_verbose(cli.verbose),
        Err(e) => {
            eprintln!("{e}");
            exit(1);
        }
    };

    if let Err(e) = run(&cli, &client) {
        eprintln!("Error: {e}");
        exit(1);
    }
}

fn run(cli: &Cli, client: &GhClient) -> Result<(), Box<dyn Error>> {
    let options = ReportOptions {
        display: cli.display(),
        doc: cli.doc,
        json: cli.json,
        verbose: cli.verbose,
        policy: SupportPolicy::from_days(i64::from(cli.max_age), i64::from(cli.patch_window)),
    };

    if cli.verbose {
        eprintln!(
            "Support policy: {} days from first release, {} days from latest patch",
            cli.max_age, cli.patch_window
        );
    }

    let reporter = Reporter::new(client, options, Utc::now());
    let mut stdout = io::stdout().lock();
    reporter.report_all(&cli.repos, &mut stdout)?;
    Ok(())
}
