//! Policy records.
//!
//! `Policy` is the full shape returned by the server. `PasswordPolicy`,
//! `SignOnPolicy` and `MfaPolicy` are the request shapes for creating and
//! updating each policy type; they carry only the conditions and settings
//! that type accepts.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::types::common::{Links, Status};
use crate::types::conditions::{
    AuthProviderCondition, NetworkCondition, People, PeopleCondition, PeopleConditioned,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyType {
    OktaSignOn,
    Password,
    MfaEnroll,
    OauthAuthorizationPolicy,
}

impl PolicyType {
    pub const ALL: [PolicyType; 4] = [
        PolicyType::OktaSignOn,
        PolicyType::Password,
        PolicyType::MfaEnroll,
        PolicyType::OauthAuthorizationPolicy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyType::OktaSignOn => "OKTA_SIGN_ON",
            PolicyType::Password => "PASSWORD",
            PolicyType::MfaEnroll => "MFA_ENROLL",
            PolicyType::OauthAuthorizationPolicy => "OAUTH_AUTHORIZATION_POLICY",
        }
    }
}

impl FromStr for PolicyType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ApiError::invalid_argument(format!("unknown policy type {s:?}")))
    }
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payloads accepted by `PolicyClient::build_create_policy` and
/// `build_update_policy`.
pub trait PolicyPayload: Serialize {}

impl PolicyPayload for Policy {}
impl PolicyPayload for PasswordPolicy {}
impl PolicyPayload for SignOnPolicy {}
impl PolicyPayload for MfaPolicy {}

/// A policy as returned by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub policy_type: Option<PolicyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    /// Lower values take precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    /// True for built-in policies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<PolicyConditions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<PolicySettings>,
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub people: Option<People>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_provider: Option<AuthProviderCondition>,
}

/// Union of every type-specific settings block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factors: Option<MfaFactors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<PasswordSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery: Option<RecoverySettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegation: Option<DelegationSettings>,
}

// --- request variants -------------------------------------------------------

/// Request shape for a `PASSWORD` policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub policy_type: Option<PolicyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<PasswordPolicyConditions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<PasswordPolicySettings>,
}

impl PasswordPolicy {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            policy_type: Some(PolicyType::Password),
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordPolicyConditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub people: Option<PeopleCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_provider: Option<AuthProviderCondition>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordPolicySettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<PasswordSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery: Option<RecoverySettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegation: Option<DelegationSettings>,
}

/// Request shape for an `OKTA_SIGN_ON` policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignOnPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub policy_type: Option<PolicyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<PeopleConditions>,
}

impl SignOnPolicy {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            policy_type: Some(PolicyType::OktaSignOn),
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Request shape for an `MFA_ENROLL` policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MfaPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub policy_type: Option<PolicyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<PeopleConditions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<MfaPolicySettings>,
}

impl MfaPolicy {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            policy_type: Some(PolicyType::MfaEnroll),
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Conditions block holding only a people condition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeopleConditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub people: Option<PeopleCondition>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MfaPolicySettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factors: Option<MfaFactors>,
}

impl PeopleConditioned for PasswordPolicy {
    fn people(&self) -> Option<&PeopleCondition> {
        self.conditions.as_ref()?.people.as_ref()
    }

    fn set_people(&mut self, people: PeopleCondition) {
        self.conditions.get_or_insert_with(Default::default).people = Some(people);
    }
}

impl PeopleConditioned for SignOnPolicy {
    fn people(&self) -> Option<&PeopleCondition> {
        self.conditions.as_ref()?.people.as_ref()
    }

    fn set_people(&mut self, people: PeopleCondition) {
        self.conditions.get_or_insert_with(Default::default).people = Some(people);
    }
}

impl PeopleConditioned for MfaPolicy {
    fn people(&self) -> Option<&PeopleCondition> {
        self.conditions.as_ref()?.people.as_ref()
    }

    fn set_people(&mut self, people: PeopleCondition) {
        self.conditions.get_or_insert_with(Default::default).people = Some(people);
    }
}

// --- password settings -------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<PasswordComplexity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<PasswordAge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lockout: Option<PasswordLockout>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordComplexity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_lower_case: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_upper_case: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_symbol: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_username: Option<bool>,
    /// Profile attributes the password may not contain, e.g. `firstName`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_attributes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<PasswordDictionary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordDictionary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common: Option<CommonDictionary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonDictionary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordAge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_warn_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_age_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordLockout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_unlock_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_lockout_failures: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoverySettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factors: Option<RecoveryFactors>,
}

// Factor keys are snake_case on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryFactors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_question: Option<RecoveryQuestionFactor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub okta_email: Option<EmailRecoveryFactor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub okta_sms: Option<SmsRecoveryFactor>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryQuestionFactor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<RecoveryQuestionProperties>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryQuestionProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<RecoveryQuestionComplexity>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryQuestionComplexity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRecoveryFactor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<EmailRecoveryProperties>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRecoveryProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_token: Option<RecoveryToken>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryToken {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_lifetime_minutes: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsRecoveryFactor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<DelegationOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegationOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_unlock: Option<bool>,
}

// --- mfa settings ------------------------------------------------------------

/// Per-factor enrollment settings of an MFA policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MfaFactors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_otp: Option<FactorSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub okta_otp: Option<FactorSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub okta_push: Option<FactorSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub okta_question: Option<FactorSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub okta_sms: Option<FactorSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsa_token: Option<FactorSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symantec_vip: Option<FactorSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consent: Option<Consent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enroll: Option<FactorEnroll>,
}

impl FactorSettings {
    pub fn enroll(mode: FactorEnrollMode) -> Self {
        Self {
            consent: None,
            enroll: Some(FactorEnroll::new(mode)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<ConsentTerms>,
    /// `NONE` or `TERMS_OF_SERVICE`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub consent_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentTerms {
    /// `TEXT`, `RTF`, `MARKDOWN` or `URL`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Enrollment requirement for one factor of an MFA policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorEnroll {
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<FactorEnrollMode>,
}

impl FactorEnroll {
    pub fn new(mode: FactorEnrollMode) -> Self {
        Self { mode: Some(mode) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FactorEnrollMode {
    NotAllowed,
    Optional,
    Required,
}
