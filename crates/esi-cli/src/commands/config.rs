use esi_config::{EsiConfig, InboxConfig, ServerConfig, SmtpConfig};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

const REDACTED: &str = "********";

#[derive(Debug, Serialize)]
struct ConfigReport {
    relay_enabled: bool,
    server: ServerConfig,
    inbox: InboxConfig,
    smtp: SmtpConfig,
}

/// Handle `esi config`.
pub fn handle(config: &EsiConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&report(config), flags.format)
}

fn report(config: &EsiConfig) -> ConfigReport {
    let mut smtp = config.smtp.clone();
    if !smtp.pass.is_empty() {
        smtp.pass = REDACTED.to_string();
    }

    ConfigReport {
        relay_enabled: config.smtp.is_configured(),
        server: config.server.clone(),
        inbox: config.inbox.clone(),
        smtp,
    }
}
