use esi_config::EsiConfig;

use crate::cli::{Commands, GlobalFlags};
use crate::commands;

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: Commands,
    config: EsiConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Serve(args) => commands::serve::handle(&args, config).await,
        Commands::Inbox { action } => commands::inbox::handle(&action, &config, flags),
        Commands::Schema => commands::schema::handle(flags),
        Commands::Config => commands::config::handle(&config, flags),
    }
}
