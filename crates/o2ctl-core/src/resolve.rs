// ── List-then-match resolution ──
//
// The management API has no get-by-name endpoints, so every lookup is a
// list followed by a scan. `Named` + `find_named` capture the idiom
// once instead of once per resource.

use o2ctl_api::models::{Organization, RoleEntry, ServiceAccount};

/// A listed resource addressable by display name.
///
/// `display_name` is `Option` because several list payloads can omit
/// the name field entirely; nameless entries simply never match.
pub trait Named {
    fn display_name(&self) -> Option<&str>;
}

impl Named for Organization {
    fn display_name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Named for ServiceAccount {
    fn display_name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Named for RoleEntry {
    fn display_name(&self) -> Option<&str> {
        self.name()
    }
}

/// Find the first item whose display name matches exactly.
pub fn find_named<'a, T: Named>(items: &'a [T], name: &str) -> Option<&'a T> {
    items.iter().find(|item| item.display_name() == Some(name))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn find_named_matches_exact_and_skips_nameless() {
        let orgs: Vec<Organization> = serde_json::from_str(
            r#"[
                { "identifier": "anon" },
                { "name": "team1", "identifier": "team1_id" },
                { "name": "team10", "identifier": "team10_id" }
            ]"#,
        )
        .unwrap();

        let hit = find_named(&orgs, "team1").unwrap();
        assert_eq!(hit.org_id(), Some("team1_id"));
        assert!(find_named(&orgs, "team3").is_none());
    }

    #[test]
    fn find_named_resolves_role_shapes() {
        let roles: Vec<RoleEntry> =
            serde_json::from_str(r#"["ops", { "role": "ingest", "id": "7" }]"#).unwrap();

        assert!(find_named(&roles, "ops").is_some());
        assert_eq!(find_named(&roles, "ingest").unwrap().id(), Some("7"));
    }
}
