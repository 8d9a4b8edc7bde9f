//! Permission enforcement for gated operations.

use shophub_core::error::AppError;
use shophub_entity::user::{Permission, PermissionSet};

/// Message returned to callers when a permission check fails.
pub const PERMISSION_DENIED: &str = "You do not have permission to do that";

/// Checks a caller's permission set against an operation's requirements.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionGuard;

impl PermissionGuard {
    /// Succeeds iff `held` contains at least one of `required`.
    pub fn require_any_permission(
        held: &PermissionSet,
        required: &[Permission],
    ) -> Result<(), AppError> {
        let required: PermissionSet = required.iter().copied().collect();
        if held.intersects(&required) {
            return Ok(());
        }

        tracing::debug!(required = %required, held = %held, "Permission check failed");
        Err(AppError::authorization(format!(
            "{PERMISSION_DENIED}. You need one of {required}, you have {held}"
        )))
    }
}
