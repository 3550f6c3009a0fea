use msn_config::MissionConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: &MissionConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Pull(args) => commands::pull::handle(&args, config, flags).await,
        Commands::Plan(args) => commands::plan::handle(&args, config, flags),
        Commands::Push(args) => commands::push::handle(&args, config, flags).await,
        Commands::Create(args) => commands::create::handle(&args, config, flags).await,
        Commands::Mcq(args) => commands::mcq::handle(&args, flags),
    }
}
