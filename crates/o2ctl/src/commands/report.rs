//! Tabular rendering of reconcile reports.
//!
//! JSON and YAML output serialize the full report (credentials
//! included); the table flattens it to one row per touched resource
//! and leaves generated secrets to the report file.

use tabled::Tabled;

use o2ctl_core::OrgReport;

use crate::output;

#[derive(Tabled)]
pub struct ReportRow {
    #[tabled(rename = "Org")]
    pub org: String,
    #[tabled(rename = "Kind")]
    pub kind: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Status")]
    pub status: String,
}

/// Flatten org reports into rows, in reconcile order.
pub fn report_rows(reports: &[OrgReport]) -> Vec<ReportRow> {
    let mut rows = Vec::new();
    for report in reports {
        for stream in &report.streams {
            rows.push(ReportRow {
                org: report.org.clone(),
                kind: "stream".into(),
                name: stream.name.clone(),
                status: stream.status.to_string(),
            });
        }
        for role in &report.roles {
            rows.push(ReportRow {
                org: report.org.clone(),
                kind: "role".into(),
                name: role.name.clone(),
                status: role.status.to_string(),
            });
        }
        for account in &report.service_accounts {
            rows.push(ReportRow {
                org: report.org.clone(),
                kind: "service-account".into(),
                name: account.name.clone(),
                status: account.status.to_string(),
            });
        }
        for user in &report.users {
            rows.push(ReportRow {
                org: report.org.clone(),
                kind: "user".into(),
                name: user.email.clone(),
                status: user.status.to_string(),
            });
        }
    }
    rows
}

/// Table form of one or more org reports.
pub fn format_reports(reports: &[OrgReport]) -> String {
    output::render_table(&report_rows(reports))
}
