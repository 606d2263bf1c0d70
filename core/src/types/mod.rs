//! Domain DTOs for the policies, rules and identity providers API.
//!
//! # Design
//! Every nesting level of the remote schema is a named record. Optional
//! fields are `Option` or `Vec` and are skipped when unset, so a default
//! value serializes to `{}` and decodes back to itself. The mock server
//! keeps its own untyped documents; integration tests catch schema drift.

pub mod common;
pub mod conditions;
pub mod idp;
pub mod policy;
pub mod rule;

pub use common::{Access, Link, LinkHints, Links, Status};
pub use conditions::{
    groups_condition, people_condition, users_condition, AuthProviderCondition, IdFilter,
    NetworkCondition, NetworkConnection, People, PeopleCondition, PeopleConditioned,
    PeopleTarget, Selection, SelectionMode,
};
pub use idp::IdentityProvider;
pub use policy::{
    MfaPolicy, PasswordPolicy, Policy, PolicyConditions, PolicyPayload, PolicySettings,
    PolicyType, SignOnPolicy,
};
pub use rule::{
    MfaRule, PasswordRule, Rule, RuleActions, RuleConditions, RulePayload, RuleType, SignOnRule,
};
