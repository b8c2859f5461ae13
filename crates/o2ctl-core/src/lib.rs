// o2ctl-core: reconciliation engine between o2ctl-api and the CLI.

pub mod config;
pub mod dashboards;
pub mod error;
pub mod inventory;
pub mod password;
pub mod plan;
pub mod purge;
pub mod reconciler;
pub mod report;
pub mod resolve;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{InstanceConfig, TlsVerification};
pub use error::CoreError;
pub use o2ctl_api::SchemaGeneration;
pub use reconciler::Reconciler;

pub use inventory::OrgInventory;
pub use plan::{DesiredOrg, RoleSpec, SaSpec, StreamSpec, UserSpec};
pub use purge::PurgeSummary;
pub use report::{OrgReport, Outcome};
