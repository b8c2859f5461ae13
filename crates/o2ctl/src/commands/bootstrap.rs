//! `bootstrap` -- reconcile the full desired-state plan.

use std::fs;
use std::path::Path;
use std::time::Duration;

use o2ctl_config::Config;
use o2ctl_core::{DesiredOrg, OrgReport, Reconciler};

use crate::cli::{BootstrapArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::report;

pub async fn handle(
    rec: &Reconciler,
    config: &Config,
    args: BootstrapArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    if let Some(secs) = args.wait_secs {
        if !global.quiet {
            eprintln!("Waiting up to {secs}s for the server to become ready");
        }
        rec.wait_ready(Duration::from_secs(secs)).await?;
    }

    let domain = rec.email_domain().to_owned();
    let plan: Vec<DesiredOrg> = o2ctl_config::bootstrap_plan(config)
        .into_iter()
        .map(|org| org.with_sample_users(&domain))
        .collect();

    // Per-resource failures land in the report as statuses; the batch
    // always runs to completion.
    let mut reports = Vec::with_capacity(plan.len());
    for desired in &plan {
        if !global.quiet {
            eprintln!("Reconciling organization '{}'", desired.name);
        }
        reports.push(rec.apply_org(desired).await);
    }

    write_report(&args.out, &reports)?;

    let out = output::render_single(
        &global.output,
        &reports,
        |r| report::format_reports(r),
        |r| r.iter().map(|o| o.org.clone()).collect::<Vec<_>>().join("\n"),
    );
    output::print_output(&out, global.quiet);

    if !global.quiet {
        // An org that never resolved leaves all sections empty; no row
        // inside it failed, but the org itself did.
        let failures = plan
            .iter()
            .zip(&reports)
            .filter(|(desired, report)| {
                let wanted = desired.streams.len()
                    + desired.roles.len()
                    + desired.service_accounts.len()
                    + desired.users.len();
                report.has_failures() || (wanted > 0 && report.is_empty())
            })
            .count();
        if failures == 0 {
            eprintln!(
                "{} Report written to {}",
                output::marker_ok(color),
                args.out.display()
            );
        } else {
            eprintln!(
                "{} {failures} organization(s) had failures -- report written to {}",
                output::marker_fail(color),
                args.out.display()
            );
        }
    }

    Ok(())
}

/// Persist the credentials report. Generated passwords and tokens exist
/// nowhere else, so this file is the handoff artifact.
fn write_report(path: &Path, reports: &[OrgReport]) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(reports)?;
    fs::write(path, json)?;
    Ok(())
}
