//! NATS client connection.

use tracing::info;

use crate::error::{Error, Result};

/// Open a client connection to a NATS server.
///
/// # Errors
/// Returns [`Error::Connection`] if the server cannot be reached.
pub async fn connect(url: &str, client_name: &str) -> Result<async_nats::Client> {
    info!(url = %url, client = %client_name, "Connecting to NATS");
    let client = async_nats::ConnectOptions::new()
        .name(client_name)
        .connect(url)
        .await
        .map_err(|e| Error::Connection(format!("nats connect to {url}: {e}")))?;
    info!(url = %url, "NATS connected");
    Ok(client)
}
