//! Enumerations and hypermedia records shared by policies, rules and IdPs.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a policy, rule, IdP or recovery factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Active,
    Inactive,
}

/// Permission granted by a rule action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Access {
    Allow,
    Deny,
}

/// Server-supplied hypermedia references on policy and rule responses.
///
/// Never sent on requests; the request variants have no `_links` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activate: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deactivate: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hints: Option<LinkHints>,
}

/// HTTP methods the server allows on a link target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkHints {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allow: Vec<String>,
}
