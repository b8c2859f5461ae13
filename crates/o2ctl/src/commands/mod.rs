//! Command handlers, one module per top-level command.

pub mod apply;
pub mod bootstrap;
pub mod config_cmd;
pub mod dashboards;
pub mod purge;
pub mod report;
pub mod show;
pub mod util;

use o2ctl_config::Config;
use o2ctl_core::Reconciler;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: Command,
    rec: &Reconciler,
    config: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        Command::Bootstrap(args) => bootstrap::handle(rec, config, args, global).await,
        Command::Apply(args) => apply::handle(rec, args, global).await,
        Command::ShowAll => show::handle(rec, global).await,
        Command::ImportDashboards(args) => dashboards::handle(rec, args, global).await,
        Command::PurgeOrg(args) => purge::handle_purge_org(rec, args, global).await,
        Command::CleanupAll => purge::handle_cleanup_all(rec, global).await,

        // Handled in main before a connection is built.
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
