//! Identity extractor.
//!
//! The fronting auth layer terminates sessions and forwards the
//! authenticated user id in the `X-User-Id` header. This extractor turns
//! that signal into an [`Identity`] value: a valid UUID header means an
//! authenticated user, anything else means anonymous. The core never sees
//! cookies or session mechanics.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tracing::warn;
use uuid::Uuid;

use parley_types::identity::{Identity, UserId};

/// Header carrying the authenticated user id, set by the auth collaborator.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The caller's identity, derived from request headers. Never fails:
/// requests without a usable id are anonymous.
pub struct CurrentIdentity(pub Identity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(USER_ID_HEADER) else {
            return Ok(CurrentIdentity(Identity::Anonymous));
        };

        let identity = match value.to_str().map(str::trim).map(Uuid::parse_str) {
            Ok(Ok(uuid)) => Identity::User(UserId::from_uuid(uuid)),
            _ => {
                warn!("unparseable {USER_ID_HEADER} header, treating request as anonymous");
                Identity::Anonymous
            }
        };

        Ok(CurrentIdentity(identity))
    }
}
