//! `purge-org` / `cleanup-all` -- destructive teardown.
//!
//! Both commands gate on a typed literal rather than a y/n prompt; the
//! bulk path demands a different, uglier word. Skip lists (admin user,
//! system roles, internal streams) live in the core purge logic.

use tabled::Tabled;

use o2ctl_core::{CoreError, PurgeSummary, Reconciler};

use crate::cli::{GlobalOpts, PurgeOrgArgs};
use crate::error::CliError;
use crate::output;

use super::util;

const PURGE_LITERAL: &str = "CONFIRM";
const CLEANUP_LITERAL: &str = "NUKE";

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PurgeRow {
    #[tabled(rename = "Org")]
    org: String,
    #[tabled(rename = "SAs")]
    service_accounts: usize,
    #[tabled(rename = "Users")]
    users: usize,
    #[tabled(rename = "Roles")]
    roles: usize,
    #[tabled(rename = "Streams")]
    streams: usize,
    #[tabled(rename = "Skipped")]
    skipped: usize,
    #[tabled(rename = "Failures")]
    failures: usize,
}

impl From<&PurgeSummary> for PurgeRow {
    fn from(s: &PurgeSummary) -> Self {
        Self {
            org: s.org.clone(),
            service_accounts: s.service_accounts,
            users: s.users,
            roles: s.roles,
            streams: s.streams,
            skipped: s.skipped,
            failures: s.failures.len(),
        }
    }
}

fn format_summary(s: &PurgeSummary) -> String {
    use std::fmt::Write as _;

    let mut out = format!(
        "{}: deleted {} service accounts, {} users, {} roles, {} streams ({} skipped)",
        s.org, s.service_accounts, s.users, s.roles, s.streams, s.skipped
    );
    for failure in &s.failures {
        let _ = write!(out, "\n  failed: {failure}");
    }
    out
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn handle_purge_org(
    rec: &Reconciler,
    args: PurgeOrgArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // Resolve before prompting -- a typo should fail fast, not after
    // the operator typed the scary word.
    if rec.resolve_org_id(&args.org).await?.is_none() {
        return Err(CoreError::OrgNotFound { name: args.org }.into());
    }

    let proceed = util::typed_confirmation(
        &format!(
            "About to delete service accounts, users, custom roles, and streams \
             in '{}'. Type {PURGE_LITERAL} to proceed",
            args.org
        ),
        PURGE_LITERAL,
        &format!("purge-org {}", args.org),
        global.yes,
    )?;
    if !proceed {
        eprintln!("Aborted.");
        return Ok(());
    }

    let summary = rec.purge_org(&args.org).await?;
    let out = output::render_single(&global.output, &summary, format_summary, |s| s.org.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle_cleanup_all(rec: &Reconciler, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    let targets = rec.cleanup_targets().await?;
    if targets.is_empty() {
        if !global.quiet {
            eprintln!("Nothing to purge.");
        }
        return Ok(());
    }

    let proceed = util::typed_confirmation(
        &format!(
            "About to purge {} organization(s): {}. Type {CLEANUP_LITERAL} to proceed",
            targets.len(),
            targets.join(", ")
        ),
        CLEANUP_LITERAL,
        "cleanup-all",
        global.yes,
    )?;
    if !proceed {
        eprintln!("Aborted.");
        return Ok(());
    }

    // One failed org never stops the sweep.
    let mut summaries = Vec::with_capacity(targets.len());
    for name in &targets {
        match rec.purge_org(name).await {
            Ok(summary) => {
                if !global.quiet {
                    eprintln!(
                        "{} purged '{name}' ({} deleted, {} skipped)",
                        output::marker_ok(color),
                        summary.deleted(),
                        summary.skipped
                    );
                }
                summaries.push(summary);
            }
            Err(e) => {
                eprintln!("{} purge '{name}' failed: {e}", output::marker_fail(color));
            }
        }
    }

    let out =
        output::render_list(&global.output, &summaries, |s| PurgeRow::from(s), |s| s.org.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}
