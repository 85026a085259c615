//! Orders operator implementation.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::cache::order::OrderCache;
use crate::application::query::facade::OrderQueryService;
use crate::domain::{id::OrderUid, order::Order};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::operator::orders::OrdersOperator;
use crate::port::inbound::query::OrderQuery;

use super::entry::Operator;

#[async_trait]
impl OrdersOperator for Operator {
    async fn order(&self, config_toml: &str, order_uid: &OrderUid) -> Result<Order> {
        open_query(config_toml).await?.get_order(order_uid).await
    }

    async fn orders(&self, config_toml: &str) -> Result<Vec<Order>> {
        open_query(config_toml).await?.list_orders().await
    }
}

// A one-shot read has nothing to gain from warming: start cold and let
// point reads fall through to storage.
async fn open_query(config_toml: &str) -> Result<OrderQueryService> {
    let config = Config::parse_toml(config_toml)?;
    let repository = bootstrap::open_repository(&config.database).await?;
    Ok(OrderQueryService::new(repository, Arc::new(OrderCache::new())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::database::DatabaseConfig;
    use crate::port::outbound::store::OrderRepository;
    use crate::testkit::domain::{model_order, MODEL_ORDER_UID};

    fn config_for(path: &std::path::Path) -> String {
        format!("[database]\nurl = \"{}\"\n", path.display())
    }

    #[tokio::test]
    async fn fresh_database_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let toml = config_for(&dir.path().join("orders.db"));

        assert!(Operator::new().orders(&toml).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_order_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let toml = config_for(&dir.path().join("orders.db"));

        let err = Operator::new()
            .order(&toml, &OrderUid::new("nonexistent-id"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn reads_orders_written_by_another_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.db");
        let writer = bootstrap::open_repository(&DatabaseConfig {
            url: path.display().to_string(),
            ..DatabaseConfig::default()
        })
        .await
        .unwrap();
        writer.add_order(&model_order()).await.unwrap();

        let toml = config_for(&path);
        let order = Operator::new()
            .order(&toml, &OrderUid::new(MODEL_ORDER_UID))
            .await
            .unwrap();

        assert_eq!(order, model_order());
        assert_eq!(Operator::new().orders(&toml).await.unwrap().len(), 1);
    }
}
