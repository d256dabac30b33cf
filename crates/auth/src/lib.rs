//! `courier-auth`: pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it turns
//! verified token claims into a [`Principal`] and decides what that principal
//! may do with a message.

pub mod authorize;
pub mod claims;
pub mod principal;
pub mod roles;

pub use authorize::{
    AccessAction, AccessDecision, AccessExplanation, AccessRequest, AuthzError, DecisionRule,
    MessageOwnership, decide, enforce, explain,
};
pub use claims::{Hs256JwtValidator, JwtClaims, JwtValidator, TokenValidationError, validate_claims};
pub use principal::Principal;
pub use roles::{Role, RoleParseError};
