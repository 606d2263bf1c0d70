//! Identity provider records. Read-only: the client only fetches them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::common::{Link, Status};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProvider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `GOOGLE`, `FACEBOOK`, `LINKEDIN`, `MICROSOFT`, `OIDC`, `SAML2`, ...
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub idp_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<IdpProtocol>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<IdpPolicy>,
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<IdpLinks>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdpProtocol {
    /// `OAUTH2`, `OIDC` or `SAML2`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub protocol_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<IdpEndpoints>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<IdpCredentials>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdpEndpoints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization: Option<IdpEndpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<IdpEndpoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdpEndpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// `HTTP-POST` or `HTTP-REDIRECT`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdpCredentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<IdpClientCredentials>,
}

// snake_case keys on the wire.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdpClientCredentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
}

impl std::fmt::Debug for IdpClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdpClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdpPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning: Option<Provisioning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_link: Option<AccountLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<IdpSubject>,
    /// Milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_clock_skew: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provisioning {
    /// `AUTO`, `CALLOUT` or `DISABLED`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_master: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<ProvisioningAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<ProvisioningConditions>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisioningConditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprovisioned: Option<ProvisioningAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspended: Option<ProvisioningAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisioningAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// `AUTO` or `DISABLED`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdpSubject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name_template: Option<UserNameTemplate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// `USERNAME`, `EMAIL` or `USERNAME_OR_EMAIL`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserNameTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdpLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorize: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_redirect_uri: Option<Link>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_oauth_identity_provider() {
        let idp: IdentityProvider = serde_json::from_value(json!({
            "id": "0oa62b57p7c8PaGpU0h7",
            "type": "GOOGLE",
            "name": "Google",
            "status": "ACTIVE",
            "created": "2016-03-24T23:21:49.000Z",
            "lastUpdated": "2016-03-24T23:21:49.000Z",
            "protocol": {
                "type": "OAUTH2",
                "endpoints": {
                    "authorization": {"url": "https://accounts.google.com/o/oauth2/auth", "binding": "HTTP-REDIRECT"},
                    "token": {"url": "https://www.googleapis.com/oauth2/v3/token", "binding": "HTTP-POST"}
                },
                "scopes": ["profile", "email", "openid"],
                "credentials": {"client": {"client_id": "abc.apps.example.com", "client_secret": "s3cr3t"}}
            },
            "policy": {
                "provisioning": {
                    "action": "AUTO",
                    "profileMaster": true,
                    "groups": {"action": "NONE"},
                    "conditions": {
                        "deprovisioned": {"action": "NONE"},
                        "suspended": {"action": "NONE"}
                    }
                },
                "accountLink": {"filter": null, "action": "AUTO"},
                "subject": {
                    "userNameTemplate": {"template": "idpuser.email"},
                    "filter": null,
                    "matchType": "USERNAME"
                },
                "maxClockSkew": 0
            },
            "_links": {
                "authorize": {
                    "href": "https://org/oauth2/v1/authorize?idp=0oa62b57p7c8PaGpU0h7",
                    "templated": true,
                    "hints": {"allow": ["GET"]}
                },
                "clientRedirectUri": {"href": "https://org/oauth2/v1/authorize/callback", "hints": {"allow": ["POST"]}}
            }
        }))
        .unwrap();

        let protocol = idp.protocol.as_ref().unwrap();
        assert_eq!(protocol.scopes, vec!["profile", "email", "openid"]);
        let token = protocol.endpoints.as_ref().unwrap().token.as_ref().unwrap();
        assert_eq!(token.binding.as_deref(), Some("HTTP-POST"));
        let client = protocol.credentials.as_ref().unwrap().client.as_ref().unwrap();
        assert_eq!(client.client_id.as_deref(), Some("abc.apps.example.com"));

        let policy = idp.policy.as_ref().unwrap();
        assert_eq!(policy.account_link.as_ref().unwrap().filter, None);
        assert_eq!(policy.max_clock_skew, Some(0));
        assert_eq!(
            policy.provisioning.as_ref().unwrap().profile_master,
            Some(true)
        );

        let links = idp.links.as_ref().unwrap();
        assert_eq!(links.authorize.as_ref().unwrap().templated, Some(true));
        assert!(links.client_redirect_uri.is_some());
    }

    #[test]
    fn debug_redacts_client_secret() {
        let creds = IdpClientCredentials {
            client_id: Some("id".into()),
            client_secret: Some("s3cr3t".into()),
        };
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("s3cr3t"));
        assert!(rendered.contains("***"));
    }
}
