//! Unified operator capability surface for inbound adapters.

use super::orders::OrdersOperator;
use super::publish::PublishOperator;
use super::runtime::RuntimeOperator;

/// Unified operator capability surface consumed by inbound adapters.
pub trait OperatorPort: OrdersOperator + PublishOperator + RuntimeOperator {}

impl<T> OperatorPort for T where T: OrdersOperator + PublishOperator + RuntimeOperator {}
