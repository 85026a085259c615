//! Concrete operator installed into the CLI at startup.

/// Operator backed by the infrastructure layer.
///
/// Stateless: every call loads its own configuration from the request.
#[derive(Debug, Default, Clone, Copy)]
pub struct Operator;

impl Operator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}
