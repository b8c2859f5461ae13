// Schema-generation adapter for version-dependent wire encodings.
//
// The management API changed its RBAC payload shape between server
// generations. Every generation-specific question is answered here, so
// endpoint methods and the reconciler stay branch-free.

use serde_json::Value;

use crate::models::RoleGrant;

/// Which generation of the management-API schema the server speaks.
///
/// Determines how role grants are encoded on the wire. Configured per
/// profile; defaults to the current generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaGeneration {
    /// Older builds: grants travel as serialized `"object:permission"`
    /// strings.
    V1,
    /// Current builds: grants travel as structured objects.
    #[default]
    V2,
}

impl SchemaGeneration {
    /// Parse from a config string (`"v1"` / `"v2"`, case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "v1" => Some(Self::V1),
            "v2" => Some(Self::V2),
            _ => None,
        }
    }

    /// The canonical config string for this generation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }

    /// Encode a grant list for a role create/update payload.
    pub fn encode_grants(&self, grants: &[RoleGrant]) -> Value {
        match self {
            Self::V1 => Value::Array(
                grants
                    .iter()
                    .map(|g| Value::String(format!("{}:{}", g.object, g.permission)))
                    .collect(),
            ),
            Self::V2 => serde_json::json!(grants),
        }
    }
}

impl std::fmt::Display for SchemaGeneration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_both_generations() {
        assert_eq!(SchemaGeneration::parse("v1"), Some(SchemaGeneration::V1));
        assert_eq!(SchemaGeneration::parse("V2"), Some(SchemaGeneration::V2));
        assert_eq!(SchemaGeneration::parse("v3"), None);
    }

    #[test]
    fn v1_encodes_grants_as_strings() {
        let grants = vec![
            RoleGrant { object: "stream:team1_default".into(), permission: "AllowAll".into() },
            RoleGrant { object: "dashboard:ops".into(), permission: "AllowGet".into() },
        ];
        let encoded = SchemaGeneration::V1.encode_grants(&grants);
        assert_eq!(
            encoded,
            serde_json::json!(["stream:team1_default:AllowAll", "dashboard:ops:AllowGet"])
        );
    }

    #[test]
    fn v2_encodes_grants_as_objects() {
        let grants = vec![RoleGrant {
            object: "stream:team1_default".into(),
            permission: "AllowAll".into(),
        }];
        let encoded = SchemaGeneration::V2.encode_grants(&grants);
        assert_eq!(
            encoded,
            serde_json::json!([{ "object": "stream:team1_default", "permission": "AllowAll" }])
        );
    }
}
