//! Shared helper routines for operator implementations.

use tracing::error;

use crate::error::{Error, Result};

pub(super) fn map_app_result(
    result: std::result::Result<Result<()>, tokio::task::JoinError>,
) -> Result<()> {
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(error)) => {
            error!(error = %error, "Service exited with error");
            Err(error)
        }
        Err(error) => {
            error!(error = %error, "Service task join failed");
            Err(Error::Connection(error.to_string()))
        }
    }
}
