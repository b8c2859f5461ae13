//! `apply` -- reconcile a single organization.

use o2ctl_core::{DesiredOrg, Reconciler};

use crate::cli::{ApplyArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::report;

pub async fn handle(
    rec: &Reconciler,
    args: ApplyArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    let mut desired = DesiredOrg::standard(args.org);
    if args.users {
        desired = desired.with_sample_users(rec.email_domain());
    }

    // A single-org run fails hard when its org cannot be resolved;
    // only batch bootstrap degrades to an empty report instead.
    rec.ensure_org(&desired.name).await?;

    let org_report = rec.apply_org(&desired).await;

    let out = output::render_single(
        &global.output,
        &org_report,
        |r| report::format_reports(std::slice::from_ref(r)),
        |r| r.org.clone(),
    );
    output::print_output(&out, global.quiet);

    // Failures are statuses, not exit codes -- the run itself succeeded.
    if org_report.has_failures() && !global.quiet {
        eprintln!(
            "{} some resources failed; see their statuses above",
            output::marker_fail(color)
        );
    }

    Ok(())
}
