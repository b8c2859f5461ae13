// ── Desired-state plan ──
//
// A `DesiredOrg` describes everything the reconciler should converge an
// organization toward. The built-in plan reproduces the standard
// platform layout (three retention tiers, a GitOps service account);
// config profiles can override any part of it.

use o2ctl_api::models::RoleGrant;
use serde::{Deserialize, Serialize};

/// A managed log stream and its retention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSpec {
    pub name: String,
    pub retention_hours: u32,
}

/// A custom role and its full grant list.
///
/// Grants are authoritative: reconciling replaces whatever grant list
/// the role currently has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSpec {
    pub name: String,
    #[serde(default)]
    pub grants: Vec<RoleGrant>,
}

/// A service account to keep present, at the given role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaSpec {
    pub name: String,
    #[serde(default = "default_admin_role")]
    pub role: String,
}

/// A human user to keep present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSpec {
    pub email: String,
    #[serde(default = "default_admin_role")]
    pub role: String,
}

/// Everything one organization should converge toward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesiredOrg {
    pub name: String,
    #[serde(default = "default_streams")]
    pub streams: Vec<StreamSpec>,
    #[serde(default)]
    pub roles: Vec<RoleSpec>,
    #[serde(default = "default_service_accounts")]
    pub service_accounts: Vec<SaSpec>,
    #[serde(default)]
    pub users: Vec<UserSpec>,
}

impl DesiredOrg {
    /// The standard layout for one org: the three retention tiers and
    /// the GitOps service account. No custom roles, no sample users.
    pub fn standard(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            streams: default_streams(),
            roles: Vec::new(),
            service_accounts: default_service_accounts(),
            users: Vec::new(),
        }
    }

    /// Attach the numbered sample users (`user1-{org}@{domain}`, ...)
    /// unless the plan already names users of its own.
    pub fn with_sample_users(mut self, domain: &str) -> Self {
        if self.users.is_empty() {
            self.users = sample_users(&self.name, domain);
        }
        self
    }

    /// The stream name as provisioned remotely: `{org}_{stream}`.
    pub fn prefixed_stream(&self, spec: &StreamSpec) -> String {
        format!("{}_{}", self.name, spec.name)
    }
}

/// Built-in retention tiers: one day, ten days, thirty-five days.
pub fn default_streams() -> Vec<StreamSpec> {
    vec![
        StreamSpec { name: "short_term".into(), retention_hours: 24 },
        StreamSpec { name: "default".into(), retention_hours: 240 },
        StreamSpec { name: "long_term".into(), retention_hours: 840 },
    ]
}

/// Built-in service-account set: the GitOps deployer.
pub fn default_service_accounts() -> Vec<SaSpec> {
    vec![SaSpec { name: "sa-gitops".into(), role: "admin".into() }]
}

/// Built-in bootstrap org set.
pub fn default_org_names() -> Vec<String> {
    ["platform_observability", "platform_kubernetes", "team1", "team2"]
        .map(String::from)
        .to_vec()
}

/// Numbered sample users for an org. Admin within their own org only.
pub fn sample_users(org: &str, domain: &str) -> Vec<UserSpec> {
    (1..=3)
        .map(|i| UserSpec {
            email: format!("user{i}-{org}@{domain}"),
            role: default_admin_role(),
        })
        .collect()
}

/// The login a service account gets: `{name}-{org}@{domain}`. The
/// human-readable org name stays in the address on purpose -- it is
/// what operators grep audit logs for.
pub fn service_account_email(name: &str, org: &str, domain: &str) -> String {
    format!("{name}-{org}@{domain}")
}

fn default_admin_role() -> String {
    "admin".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_plan_matches_platform_layout() {
        let plan = DesiredOrg::standard("team1");

        let tiers: Vec<(String, u32)> = plan
            .streams
            .iter()
            .map(|s| (plan.prefixed_stream(s), s.retention_hours))
            .collect();
        assert_eq!(
            tiers,
            vec![
                ("team1_short_term".to_owned(), 24),
                ("team1_default".to_owned(), 240),
                ("team1_long_term".to_owned(), 840),
            ]
        );

        assert!(plan.roles.is_empty());
        assert!(plan.users.is_empty());
        assert_eq!(plan.service_accounts.len(), 1);
        assert_eq!(plan.service_accounts[0].name, "sa-gitops");
        assert_eq!(plan.service_accounts[0].role, "admin");
    }

    #[test]
    fn sample_users_are_numbered_per_org() {
        let users = sample_users("team2", "example.com");
        assert_eq!(users.len(), 3);
        assert_eq!(users[0].email, "user1-team2@example.com");
        assert_eq!(users[2].email, "user3-team2@example.com");
        assert!(users.iter().all(|u| u.role == "admin"));
    }

    #[test]
    fn service_account_email_keeps_org_name() {
        assert_eq!(
            service_account_email("sa-gitops", "platform_kubernetes", "example.com"),
            "sa-gitops-platform_kubernetes@example.com"
        );
    }

    #[test]
    fn desired_org_deserializes_with_defaults() {
        let plan: DesiredOrg = serde_json::from_str(r#"{ "name": "team9" }"#).expect("parse");
        assert_eq!(plan.streams.len(), 3);
        assert_eq!(plan.service_accounts.len(), 1);
        assert!(plan.users.is_empty());
    }

    #[test]
    fn explicit_plan_users_survive_sample_attachment() {
        let mut plan = DesiredOrg::standard("acme");
        plan.users = vec![UserSpec { email: "ops@acme.dev".into(), role: "admin".into() }];

        let plan = plan.with_sample_users("example.com");
        assert_eq!(plan.users.len(), 1);
        assert_eq!(plan.users[0].email, "ops@acme.dev");
    }
}
