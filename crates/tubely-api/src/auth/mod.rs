//! Bearer token authentication
//!
//! Access tokens are HS256 JWTs signed with the configured secret. The token subject
//! is the user id; the middleware turns it into a `UserContext` request extension.

pub mod jwt;
pub mod middleware;
pub mod models;

pub use jwt::{get_bearer_token, make_jwt, validate_jwt, TOKEN_ISSUER};
pub use middleware::{auth_middleware, AuthState};
pub use models::{JwtClaims, UserContext};
