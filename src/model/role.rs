use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Caller role as resolved through the directory. Closed enum so a role
/// check can never coerce from a raw string or integer id.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
pub enum Role {
    Employee,
    Manager,
}

impl Role {
    pub fn is_manager(&self) -> bool {
        *self == Role::Manager
    }
}
