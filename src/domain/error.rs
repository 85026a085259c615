//! Domain validation errors for inbound orders.
//!
//! An order is rejected as a whole when its header or its delivery fails
//! validation; [`DomainError::InvalidOrder`] names the failing part.
//!
//! # Examples
//!
//! ```
//! use orderhub::domain::error::{DomainError, OrderPart};
//!
//! let part = OrderPart::Delivery;
//! assert_eq!(part.to_string(), "delivery");
//! ```

use std::fmt;

use thiserror::Error;
use validator::ValidationErrors;

/// The part of a composite order that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderPart {
    /// Order-level fields. Only `order_uid` is checked.
    Order,
    /// The owned delivery.
    Delivery,
}

impl fmt::Display for OrderPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Order => write!(f, "order"),
            Self::Delivery => write!(f, "delivery"),
        }
    }
}

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    /// The header or delivery violates its field rules.
    #[error("order '{order_uid}' has invalid {part}: {source}")]
    InvalidOrder {
        /// The order UID as received (may be empty).
        order_uid: String,
        /// The failing part.
        part: OrderPart,
        /// Field-level failures reported by the validator.
        #[source]
        source: ValidationErrors,
    },
}

impl DomainError {
    /// The part of the order that failed.
    #[must_use]
    pub const fn part(&self) -> OrderPart {
        match self {
            Self::InvalidOrder { part, .. } => *part,
        }
    }
}
