//! `import-dashboards` -- pull the published catalog into organizations.

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tabled::Tabled;
use tracing::warn;

use o2ctl_core::Reconciler;
use o2ctl_core::dashboards::DASHBOARD_SOURCES;
use o2ctl_core::plan::default_org_names;

use crate::cli::{GlobalOpts, ImportDashboardsArgs};
use crate::error::CliError;
use crate::output;

// ── Per-org summary ─────────────────────────────────────────────────

#[derive(Serialize)]
struct ImportSummary {
    org: String,
    imported: usize,
    failed: usize,
    titles: Vec<String>,
}

#[derive(Tabled)]
struct ImportRow {
    #[tabled(rename = "Org")]
    org: String,
    #[tabled(rename = "Imported")]
    imported: usize,
    #[tabled(rename = "Failed")]
    failed: usize,
}

impl From<&ImportSummary> for ImportRow {
    fn from(s: &ImportSummary) -> Self {
        Self {
            org: s.org.clone(),
            imported: s.imported,
            failed: s.failed,
        }
    }
}

fn progress_bar(message: String, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let total = u64::try_from(DASHBOARD_SOURCES.len()).unwrap_or(u64::MAX);
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_message(message);
    bar
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    rec: &Reconciler,
    args: ImportDashboardsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let names = if args.orgs.is_empty() { default_org_names() } else { args.orgs };

    let targets = rec.resolve_import_targets(&names).await?;
    if targets.is_empty() {
        if !global.quiet {
            eprintln!("No matching organizations found.");
        }
        return Ok(());
    }

    // A dashboard that fails to download or post is logged and skipped;
    // the rest of the catalog still goes in.
    let mut summaries = Vec::with_capacity(targets.len());
    for (name, org_id) in &targets {
        let bar = progress_bar(format!("importing into {name}"), global.quiet);
        let mut summary = ImportSummary {
            org: name.clone(),
            imported: 0,
            failed: 0,
            titles: Vec::new(),
        };

        for source in &DASHBOARD_SOURCES {
            match rec.import_dashboard(org_id, source.url).await {
                Ok(title) => {
                    bar.set_message(format!("{name}: {title}"));
                    summary.titles.push(title);
                    summary.imported += 1;
                }
                Err(e) => {
                    warn!("import into {name} ({}): {e}", source.category);
                    summary.failed += 1;
                }
            }
            bar.inc(1);
        }

        bar.finish_and_clear();
        summaries.push(summary);
    }

    let out =
        output::render_list(&global.output, &summaries, |s| ImportRow::from(s), |s| s.org.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}
