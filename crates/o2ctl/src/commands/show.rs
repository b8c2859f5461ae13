//! `show-all` -- read-only inventory across organizations.

use tabled::Tabled;

use o2ctl_core::{OrgInventory, Reconciler};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct InventoryRow {
    #[tabled(rename = "Org")]
    org: String,
    #[tabled(rename = "Streams")]
    streams: String,
    #[tabled(rename = "Roles")]
    roles: String,
    #[tabled(rename = "Users")]
    users: String,
    #[tabled(rename = "Service Accounts")]
    service_accounts: String,
}

impl From<&OrgInventory> for InventoryRow {
    fn from(inv: &OrgInventory) -> Self {
        Self {
            org: inv.name.clone(),
            streams: inv.streams.join("\n"),
            roles: inv.roles.join("\n"),
            users: inv.users.join("\n"),
            service_accounts: inv.service_accounts.join("\n"),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(rec: &Reconciler, global: &GlobalOpts) -> Result<(), CliError> {
    let inventory = rec.inventory().await?;

    if inventory.is_empty() && !global.quiet {
        eprintln!("No organizations found.");
    }

    let out = output::render_list(
        &global.output,
        &inventory,
        |inv| InventoryRow::from(inv),
        |inv| inv.name.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
