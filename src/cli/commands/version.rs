//! `stagehand version` - version information

use crate::cli::Output;
use anyhow::Result;

/// Execute the version command
pub async fn execute(output: &Output) -> Result<i32> {
    output.header(crate::PKG_NAME);
    output.table_row("version", crate::VERSION);
    output.table_row("description", crate::PKG_DESCRIPTION);
    Ok(0)
}
