//! Discard an uploaded module archive

use anyhow::Result;
use modhost_lifecycle::discard_module_archive;

use crate::cli::DiscardArgs;
use crate::output;

pub async fn run(args: DiscardArgs) -> Result<()> {
    discard_module_archive(&args.archive).await;
    output::success(&format!("Discarded {}", args.archive));
    Ok(())
}
