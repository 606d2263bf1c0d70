//! Rule records.
//!
//! Rules belong to one policy, referenced by the policy id in the request
//! path. `Rule` is the full response shape; `PasswordRule`, `SignOnRule` and
//! `MfaRule` are the per-type request shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::common::{Access, Links, Status};
use crate::types::conditions::{
    AuthProviderCondition, NetworkCondition, People, PeopleCondition, PeopleConditioned,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleType {
    SignOn,
    Password,
    MfaEnroll,
    ResourceAccess,
}

/// Payloads accepted by `PolicyClient::build_create_policy_rule` and
/// `build_update_policy_rule`.
pub trait RulePayload: Serialize {}

impl RulePayload for Rule {}
impl RulePayload for PasswordRule {}
impl RulePayload for SignOnRule {}
impl RulePayload for MfaRule {}

/// A rule as returned by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<RuleType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<RuleConditions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<RuleActions>,
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub people: Option<People>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_provider: Option<AuthProviderCondition>,
}

/// Union of every type-specific actions block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleActions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signon: Option<SignOnAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enroll: Option<RuleEnroll>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_change: Option<PasswordAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_service_password_reset: Option<PasswordAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_service_unlock: Option<PasswordAction>,
}

/// Conditions block of password and MFA rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeopleNetworkConditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub people: Option<PeopleCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkCondition>,
}

// --- password rule -----------------------------------------------------------

/// Request shape for a `PASSWORD` rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<RuleType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<PeopleNetworkConditions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<PasswordRuleActions>,
}

impl PasswordRule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            rule_type: Some(RuleType::Password),
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordRuleActions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_change: Option<PasswordAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_service_password_reset: Option<PasswordAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_service_unlock: Option<PasswordAction>,
}

/// Access flag shared by the password change, reset and unlock actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,
}

impl PasswordAction {
    pub fn allow() -> Self {
        Self {
            access: Some(Access::Allow),
        }
    }

    pub fn deny() -> Self {
        Self {
            access: Some(Access::Deny),
        }
    }
}

// --- sign-on rule ------------------------------------------------------------

/// Request shape for a `SIGN_ON` rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignOnRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<RuleType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<SignOnRuleConditions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<SignOnRuleActions>,
}

impl SignOnRule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            rule_type: Some(RuleType::SignOn),
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignOnRuleConditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub people: Option<PeopleCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkCondition>,
    /// `ANY` or `RADIUS`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignOnRuleActions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signon: Option<SignOnAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignOnAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_factor: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factor_prompt_mode: Option<FactorPromptMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remember_device_by_default: Option<bool>,
    /// Minutes; only meaningful with `factor_prompt_mode` `SESSION`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factor_lifetime: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionSettings>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FactorPromptMode {
    Always,
    Device,
    Session,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_session_idle_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_session_lifetime_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_persistent_cookie: Option<bool>,
}

// --- mfa rule ----------------------------------------------------------------

/// Request shape for an `MFA_ENROLL` rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MfaRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<RuleType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<PeopleNetworkConditions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<MfaRuleActions>,
}

impl MfaRule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            rule_type: Some(RuleType::MfaEnroll),
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MfaRuleActions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enroll: Option<RuleEnroll>,
}

/// Enrollment challenge of an MFA rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEnroll {
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<RuleEnrollMode>,
}

impl RuleEnroll {
    pub fn new(mode: RuleEnrollMode) -> Self {
        Self { mode: Some(mode) }
    }
}

/// When users are prompted to enroll in the factors their MFA policy
/// requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleEnrollMode {
    Challenge,
    Login,
    Never,
}

impl PeopleConditioned for PasswordRule {
    fn people(&self) -> Option<&PeopleCondition> {
        self.conditions.as_ref()?.people.as_ref()
    }

    fn set_people(&mut self, people: PeopleCondition) {
        self.conditions.get_or_insert_with(Default::default).people = Some(people);
    }
}

impl PeopleConditioned for SignOnRule {
    fn people(&self) -> Option<&PeopleCondition> {
        self.conditions.as_ref()?.people.as_ref()
    }

    fn set_people(&mut self, people: PeopleCondition) {
        self.conditions.get_or_insert_with(Default::default).people = Some(people);
    }
}

impl PeopleConditioned for MfaRule {
    fn people(&self) -> Option<&PeopleCondition> {
        self.conditions.as_ref()?.people.as_ref()
    }

    fn set_people(&mut self, people: PeopleCondition) {
        self.conditions.get_or_insert_with(Default::default).people = Some(people);
    }
}
