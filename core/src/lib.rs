//! Synchronous API client core for the policies, rules and identity
//! providers API of an identity-management service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). Hosts either run the
//! round-trip themselves between `build_*` and `parse_*`, or plug a
//! `Transport` into `ApiService` for one-call operations.
//!
//! # Design
//! - `PolicyClient` is stateless; it holds the base URL and default headers.
//! - The data model in `types` names every level of the remote schema.
//!   People conditions are sum types (`PeopleCondition`, `Selection`) so the
//!   users/groups and include/exclude exclusivity holds by construction.
//! - Raw string arguments are validated once, by `people_condition` and
//!   friends or by the enums' `FromStr` impls, and rejected with
//!   `ApiError::InvalidArgument`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod types;

pub use client::PolicyClient;
pub use config::ClientConfig;
pub use error::{ApiError, RemoteError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::{ApiService, Transport};
pub use types::{
    groups_condition, people_condition, users_condition, IdentityProvider, MfaPolicy, MfaRule,
    PasswordPolicy, PasswordRule, PeopleCondition, PeopleConditioned, PeopleTarget, Policy,
    PolicyType, Rule, RuleType, Selection, SelectionMode, SignOnPolicy, SignOnRule, Status,
};
