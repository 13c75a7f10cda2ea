use anyhow::Context;
use esi_config::EsiConfig;
use esi_service::ContactService;

use crate::cli::ServeArgs;

/// Handle `esi serve`.
pub async fn handle(args: &ServeArgs, mut config: EsiConfig) -> anyhow::Result<()> {
    apply_overrides(&mut config, args);

    let service = ContactService::from_config(&config).context("failed to prepare inbox")?;
    esi_server::run(&config, service)
        .await
        .context("contact server failed")
}

fn apply_overrides(config: &mut EsiConfig, args: &ServeArgs) {
    if let Some(bind) = &args.bind {
        config.server.bind.clone_from(bind);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
}
