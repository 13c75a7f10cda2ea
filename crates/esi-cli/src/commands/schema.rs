use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `esi schema`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&esi_core::schema::inbox_record_schema(), flags.format)
}
