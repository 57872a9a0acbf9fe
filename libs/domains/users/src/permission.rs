//! Authorization decisions for user-owned resources.

use axum_helpers::JwtClaims;
use std::fmt;

use crate::models::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Read,
    Write,
    Delete,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Permission::Read => f.write_str("read"),
            Permission::Write => f.write_str("write"),
            Permission::Delete => f.write_str("delete"),
        }
    }
}

pub trait PermissionEvaluator: Send + Sync {
    /// Decide whether `principal` may act on `target`.
    fn has_permission(&self, principal: &JwtClaims, target: &User, permission: Permission) -> bool;

    /// Decide by target identifier and type, without loading the target.
    fn has_permission_for_id(
        &self,
        principal: &JwtClaims,
        target_id: &str,
        target_type: &str,
        permission: Permission,
    ) -> bool;
}

/// Users may only act on their own account.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelfAccessEvaluator;

impl PermissionEvaluator for SelfAccessEvaluator {
    fn has_permission(&self, principal: &JwtClaims, target: &User, permission: Permission) -> bool {
        let granted = principal.sub == target.username;
        tracing::debug!(
            principal = %principal.sub,
            target = %target.username,
            %permission,
            granted,
            "Permission evaluated"
        );
        granted
    }

    fn has_permission_for_id(
        &self,
        _principal: &JwtClaims,
        _target_id: &str,
        _target_type: &str,
        _permission: Permission,
    ) -> bool {
        false
    }
}
