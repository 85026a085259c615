//! Handler for the `publish` command.

use std::path::PathBuf;

use crate::adapter::inbound::cli::command::PublishArgs;
use crate::adapter::inbound::cli::{operator, output};
use crate::application::ingest::decode::decode_valid;
use crate::error::Result;
use crate::port::inbound::operator::publish::PublishRequest;

/// Execute the publish command.
pub async fn execute(args: &PublishArgs) -> Result<()> {
    let config_toml = operator::read_config_toml(&args.config.config)?;
    let payloads = read_payloads(&args.files)?;

    let receipt = operator::operator()
        .publish(PublishRequest {
            config_toml,
            subject: args.subject.clone(),
            payloads,
        })
        .await?;

    output::success(&format!(
        "Published {} message(s) to {}",
        receipt.published, receipt.subject
    ));
    Ok(())
}

/// Read each file as one payload.
///
/// Files the consumer would reject are still returned, with a warning, so
/// malformed input can be exercised end to end.
fn read_payloads(files: &[PathBuf]) -> Result<Vec<Vec<u8>>> {
    files
        .iter()
        .map(|path| {
            let payload = std::fs::read(path)?;
            if let Err(e) = decode_valid(&payload) {
                output::warning(&format!("{}: {e}", path.display()));
            }
            Ok(payload)
        })
        .collect()
}
