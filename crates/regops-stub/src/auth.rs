//! Bearer-token handling for the stub.
//!
//! Tokens take the form `<tenant>:<principal>:<secret>`. The tenant and
//! principal segments are trusted as-is — the stub exists for development,
//! not access control. The secret segment is only checked when the server
//! was started with one configured, and that check runs in constant time.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use subtle::ConstantTimeEq;

/// The identity a request acts as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Tenant every touched record is scoped to.
    pub tenant: String,
    /// Actor name stamped into `deleted_by` on soft deletes.
    pub name: String,
}

/// Why a request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization` header while a secret is configured.
    MissingToken,
    /// Header present but not `Bearer <tenant>:<principal>:<secret>`.
    MalformedToken,
    /// Secret segment did not match the configured secret.
    BadSecret,
}

impl AuthError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingToken => "missing bearer token",
            Self::MalformedToken => "bearer token must be <tenant>:<principal>:<secret>",
            Self::BadSecret => "invalid credentials",
        }
    }
}

/// Authenticate a request against the optional shared secret.
///
/// Without a configured secret the stub runs in open development mode:
/// any well-formed token is accepted and a missing header falls back to
/// the `dev` tenant.
pub fn authenticate(headers: &HeaderMap, secret: Option<&str>) -> Result<Principal, AuthError> {
    let header = match headers.get(AUTHORIZATION) {
        Some(value) => value.to_str().map_err(|_| AuthError::MalformedToken)?,
        None if secret.is_none() => {
            return Ok(Principal {
                tenant: "dev".to_string(),
                name: "dev".to_string(),
            })
        }
        None => return Err(AuthError::MissingToken),
    };

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MalformedToken)?;
    let mut segments = token.splitn(3, ':');
    let (tenant, name, supplied) = match (segments.next(), segments.next(), segments.next()) {
        (Some(t), Some(p), Some(s)) if !t.is_empty() && !p.is_empty() && !s.is_empty() => {
            (t, p, s)
        }
        _ => return Err(AuthError::MalformedToken),
    };

    if let Some(expected) = secret {
        let matches: bool = supplied.as_bytes().ct_eq(expected.as_bytes()).into();
        if !matches {
            return Err(AuthError::BadSecret);
        }
    }

    Ok(Principal {
        tenant: tenant.to_string(),
        name: name.to_string(),
    })
}
