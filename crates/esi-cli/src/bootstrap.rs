use anyhow::Context;
use esi_config::EsiConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered configuration.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<EsiConfig> {
    let config = EsiConfig::load_with_dotenv(flags.config.as_deref())
        .context("failed to load esi configuration")?;

    if !config.smtp.is_configured() {
        tracing::debug!("SMTP settings incomplete; email relay disabled");
    }
    Ok(config)
}
