//! Caller identity and authorization policy.
//!
//! Authentication itself lives upstream (session layer / API gateway); by
//! the time a request reaches this service the gateway has stamped it with
//! `X-User-Id` and `X-User-Role` headers. This module extracts that
//! identity and is the single place every mutating handler asks "may this
//! caller touch this resource?".

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::error::{AppError, Result};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Role granted by the upstream auth layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::User),
            _ => None,
        }
    }
}

/// The authenticated caller of the current request.
#[derive(Debug, Clone, Copy)]
pub struct Caller {
    pub user_id: Uuid,
    pub role: Role,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admins may act on anything; everyone else only on what they own.
    pub fn owns_or_admin(&self, owner_id: Uuid) -> bool {
        self.is_admin() || self.user_id == owner_id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v).ok())
            .ok_or(AppError::Unauthenticated)?;

        let role = parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(Role::parse)
            .ok_or(AppError::Unauthenticated)?;

        Ok(Caller { user_id, role })
    }
}

/// Reject callers without the admin role.
pub fn require_admin(caller: &Caller) -> Result<()> {
    if caller.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Reject callers that neither own the resource nor hold the admin role.
pub fn authorize_owner_or_admin(caller: &Caller, owner_id: Uuid) -> Result<()> {
    if caller.owns_or_admin(owner_id) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
