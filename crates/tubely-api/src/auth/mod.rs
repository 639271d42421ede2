//! Bearer-token identity.
//!
//! Access tokens are HS256 JWTs issued by `tubely-access`; the subject is the
//! user's UUID.

pub mod jwt;

pub use jwt::{extract_bearer_token, issue_access_token, validate_jwt, AuthError, Claims};
