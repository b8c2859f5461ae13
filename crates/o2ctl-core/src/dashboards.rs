// ── Dashboard import ──
//
// A fixed catalog of public dashboard definitions, downloaded and
// reposted into target organizations. Any `dashboardId` carried by the
// export is stripped before repost so the server mints a fresh copy.

use serde_json::Value;
use tracing::warn;

use crate::error::CoreError;
use crate::reconciler::Reconciler;

/// One downloadable dashboard definition.
#[derive(Debug, Clone, Copy)]
pub struct DashboardSource {
    pub category: &'static str,
    pub url: &'static str,
}

macro_rules! source {
    ($category:literal, $path:literal) => {
        DashboardSource {
            category: $category,
            url: concat!(
                "https://raw.githubusercontent.com/openobserve/dashboards/refs/heads/main/",
                $path
            ),
        }
    };
}

/// The import catalog. URLs are percent-encoded exactly as published.
pub const DASHBOARD_SOURCES: [DashboardSource; 17] = [
    source!(
        "kubernetes",
        "Kubernetes(openobserve-collector)/Kubernetes%20%20_%20Namespace%20(Pod).dashboard.json"
    ),
    source!(
        "kubernetes",
        "Kubernetes(openobserve-collector)/Kubernetes%20%20_%20Namespace%20(Pods).dashboard.json"
    ),
    source!(
        "kubernetes",
        "Kubernetes(openobserve-collector)/Kubernetes%20%20_%20Namespaces.dashboard.json"
    ),
    source!(
        "kubernetes",
        "Kubernetes(openobserve-collector)/Kubernetes%20%20_%20Nodes.dashboard.json"
    ),
    source!(
        "kubernetes",
        "Kubernetes(openobserve-collector)/Kubernetes%20Nodes%20Pressure.dashboard.json"
    ),
    source!(
        "kubernetes",
        "Kubernetes(openobserve-collector)/Kubernetes%20_%20Events.dashboard.json"
    ),
    source!(
        "kubernetes",
        "Kubernetes(openobserve-collector)/Kubernetes%20_%20Namespace%20(Objects).dashboard.json"
    ),
    source!(
        "kubernetes",
        "Kubernetes(openobserve-collector)/Kubernetes%20_%20Node%20(Pods).dashboard.json"
    ),
    source!("kubernetes", "ArgoCD/ArgoCD%20Monitoring.dashboard.json"),
    source!("openobserve", "OpenObserve/OpenObserve%20Infrastructure.dashboard.json"),
    source!("openobserve", "OpenObserve/OpenObserve%20Internals.dashboard.json"),
    source!("openobserve", "Usage/Usage%20_%20Org.dashboard.json"),
    source!("openobserve", "Usage/Usage%20_%20Overall.dashboard.json"),
    source!("openobserve", "hostmetrics/Host%20Metrics.dashboard.json"),
    source!("openobserve", "Uptime_Monitor/Uptime_Monitoring_Dashboard.json"),
    source!("github", "Github/Github.dashboard.json"),
    source!("postgres", "PostgreSQL%20Metrics/PostgreSQL.dashboard.json"),
];

/// Title embedded in a dashboard export, for progress display.
#[must_use]
pub fn dashboard_title(dashboard: &Value) -> &str {
    dashboard.get("title").and_then(Value::as_str).unwrap_or("Unknown")
}

/// Remove an exported `dashboardId` so the repost creates a new copy.
pub fn strip_dashboard_id(dashboard: &mut Value) {
    if let Some(object) = dashboard.as_object_mut() {
        object.remove("dashboardId");
    }
}

impl Reconciler {
    /// Resolve import target names to `(name, org_id)` pairs with one
    /// listing. Names the server does not know are warned about and
    /// dropped, matching the rest of the batch tooling.
    pub async fn resolve_import_targets(
        &self,
        names: &[String],
    ) -> Result<Vec<(String, String)>, CoreError> {
        let orgs = self.api.list_organizations().await?;

        let mut targets = Vec::with_capacity(names.len());
        for name in names {
            let id = orgs
                .iter()
                .find(|org| org.name.as_deref() == Some(name.as_str()))
                .and_then(|org| org.org_id());
            match id {
                Some(id) => targets.push((name.clone(), id.to_owned())),
                None => warn!("organization {name} not found, skipping dashboard import"),
            }
        }
        Ok(targets)
    }

    /// Download one catalog entry and post it into an organization.
    /// Returns the dashboard title.
    pub async fn import_dashboard(&self, org_id: &str, url: &str) -> Result<String, CoreError> {
        let mut dashboard = self.api.download_dashboard(url).await?;
        let title = dashboard_title(&dashboard).to_owned();
        strip_dashboard_id(&mut dashboard);
        self.api.create_dashboard(org_id, &dashboard).await?;
        Ok(title)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const CATALOG_BASE: &str =
        "https://raw.githubusercontent.com/openobserve/dashboards/refs/heads/main";

    #[test]
    fn catalog_entries_are_well_formed() {
        assert_eq!(DASHBOARD_SOURCES.len(), 17);
        for source in &DASHBOARD_SOURCES {
            assert!(source.url.starts_with(CATALOG_BASE));
            assert!(source.url.ends_with(".json"));
            assert!(!source.category.is_empty());
        }
    }

    #[test]
    fn catalog_covers_expected_categories() {
        let count = |cat: &str| DASHBOARD_SOURCES.iter().filter(|s| s.category == cat).count();
        assert_eq!(count("kubernetes"), 9);
        assert_eq!(count("openobserve"), 6);
        assert_eq!(count("github"), 1);
        assert_eq!(count("postgres"), 1);
    }

    #[test]
    fn strips_exported_id_and_keeps_the_rest() {
        let mut dashboard = json!({
            "dashboardId": "72344017085651456",
            "title": "Host Metrics",
            "panels": [],
        });
        strip_dashboard_id(&mut dashboard);
        assert_eq!(dashboard.get("dashboardId"), None);
        assert_eq!(dashboard_title(&dashboard), "Host Metrics");
        assert!(dashboard.get("panels").is_some());
    }

    #[test]
    fn title_falls_back_when_missing() {
        assert_eq!(dashboard_title(&json!({"panels": []})), "Unknown");
        assert_eq!(dashboard_title(&json!(42)), "Unknown");
    }
}
