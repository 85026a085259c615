//! Handlers for the `order` and `orders` commands.

use crate::adapter::inbound::cli::command::{ConfigPathArg, OrderArgs};
use crate::adapter::inbound::cli::{operator, output};
use crate::domain::id::OrderUid;
use crate::error::Result;

/// Execute the `order` command.
pub async fn execute_order(args: &OrderArgs) -> Result<()> {
    let config_toml = operator::read_config_toml(&args.config.config)?;
    let order_uid = OrderUid::new(args.order_uid.as_str());
    let order = operator::operator().order(&config_toml, &order_uid).await?;
    output::document("order", &order)?;
    Ok(())
}

/// Execute the `orders` command.
pub async fn execute_orders(args: &ConfigPathArg) -> Result<()> {
    let config_toml = operator::read_config_toml(&args.config)?;
    let orders = operator::operator().orders(&config_toml).await?;
    output::document("orders", &orders)?;
    Ok(())
}
