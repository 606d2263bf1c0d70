//! One-call operations over a host-supplied transport.
//!
//! `ApiService` runs `build_*`, hands the request to a `Transport`, and feeds
//! the response to the matching `parse_*`. It adds no retries, caching or
//! pagination; every error from the transport or the parser is returned
//! unchanged.

use crate::client::PolicyClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{IdentityProvider, Policy, PolicyPayload, PolicyType, Rule, RulePayload};

/// Executes one HTTP exchange.
///
/// Implementations return non-2xx responses as data; only failures to
/// complete the exchange are errors, reported as `ApiError::Transport`.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<F> Transport for F
where
    F: Fn(HttpRequest) -> Result<HttpResponse, ApiError>,
{
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self(request)
    }
}

#[derive(Debug, Clone)]
pub struct ApiService<T> {
    client: PolicyClient,
    transport: T,
}

impl<T: Transport> ApiService<T> {
    pub fn new(client: PolicyClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &PolicyClient {
        &self.client
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = %request.method, path = %request.path, "dispatching request");
        let response = self.transport.execute(request)?;
        if !response.is_success() {
            tracing::debug!(status = response.status, "request failed");
        }
        Ok(response)
    }

    // --- policies ---

    pub fn get_policy(&self, id: &str) -> Result<Policy, ApiError> {
        let response = self.send(self.client.build_get_policy(id))?;
        self.client.parse_get_policy(response)
    }

    pub fn list_policies(&self, policy_type: PolicyType) -> Result<Vec<Policy>, ApiError> {
        let response = self.send(self.client.build_list_policies(policy_type))?;
        self.client.parse_list_policies(response)
    }

    pub fn create_policy<P: PolicyPayload>(&self, policy: &P) -> Result<Policy, ApiError> {
        let response = self.send(self.client.build_create_policy(policy)?)?;
        self.client.parse_create_policy(response)
    }

    pub fn update_policy<P: PolicyPayload>(&self, id: &str, policy: &P) -> Result<Policy, ApiError> {
        let response = self.send(self.client.build_update_policy(id, policy)?)?;
        self.client.parse_update_policy(response)
    }

    pub fn delete_policy(&self, id: &str) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_policy(id))?;
        self.client.parse_delete_policy(response)
    }

    pub fn activate_policy(&self, id: &str) -> Result<(), ApiError> {
        let response = self.send(self.client.build_activate_policy(id))?;
        self.client.parse_activate_policy(response)
    }

    pub fn deactivate_policy(&self, id: &str) -> Result<(), ApiError> {
        let response = self.send(self.client.build_deactivate_policy(id))?;
        self.client.parse_deactivate_policy(response)
    }

    // --- rules ---

    pub fn list_policy_rules(&self, policy_id: &str) -> Result<Vec<Rule>, ApiError> {
        let response = self.send(self.client.build_list_policy_rules(policy_id))?;
        self.client.parse_list_policy_rules(response)
    }

    pub fn get_policy_rule(&self, policy_id: &str, rule_id: &str) -> Result<Rule, ApiError> {
        let response = self.send(self.client.build_get_policy_rule(policy_id, rule_id))?;
        self.client.parse_get_policy_rule(response)
    }

    pub fn create_policy_rule<R: RulePayload>(&self, policy_id: &str, rule: &R) -> Result<Rule, ApiError> {
        let response = self.send(self.client.build_create_policy_rule(policy_id, rule)?)?;
        self.client.parse_create_policy_rule(response)
    }

    pub fn update_policy_rule<R: RulePayload>(
        &self,
        policy_id: &str,
        rule_id: &str,
        rule: &R,
    ) -> Result<Rule, ApiError> {
        let request = self.client.build_update_policy_rule(policy_id, rule_id, rule)?;
        let response = self.send(request)?;
        self.client.parse_update_policy_rule(response)
    }

    pub fn delete_policy_rule(&self, policy_id: &str, rule_id: &str) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_policy_rule(policy_id, rule_id))?;
        self.client.parse_delete_policy_rule(response)
    }

    pub fn activate_policy_rule(&self, policy_id: &str, rule_id: &str) -> Result<(), ApiError> {
        let response = self.send(self.client.build_activate_policy_rule(policy_id, rule_id))?;
        self.client.parse_activate_policy_rule(response)
    }

    pub fn deactivate_policy_rule(&self, policy_id: &str, rule_id: &str) -> Result<(), ApiError> {
        let response = self.send(self.client.build_deactivate_policy_rule(policy_id, rule_id))?;
        self.client.parse_deactivate_policy_rule(response)
    }

    // --- identity providers ---

    pub fn get_identity_provider(&self, id: &str) -> Result<IdentityProvider, ApiError> {
        let response = self.send(self.client.build_get_identity_provider(id))?;
        self.client.parse_get_identity_provider(response)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::http::HttpMethod;
    use crate::types::{PeopleConditioned, SignOnPolicy};

    /// Transport that records requests and replays one canned response.
    struct Canned {
        status: u16,
        body: &'static str,
        seen: RefCell<Vec<HttpRequest>>,
    }

    impl Canned {
        fn new(status: u16, body: &'static str) -> Self {
            Self {
                status,
                body,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for Canned {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.borrow_mut().push(request);
            Ok(HttpResponse {
                status: self.status,
                headers: Vec::new(),
                body: self.body.to_string(),
            })
        }
    }

    fn service(transport: Canned) -> ApiService<Canned> {
        ApiService::new(PolicyClient::new("http://localhost:3000/api/v1"), transport)
    }

    #[test]
    fn list_policies_with_zero_results_is_empty_not_error() {
        let svc = service(Canned::new(200, "[]"));
        let policies = svc.list_policies(PolicyType::MfaEnroll).unwrap();
        assert!(policies.is_empty());
        let seen = svc.transport.seen.borrow();
        assert_eq!(seen[0].path, "http://localhost:3000/api/v1/policies?type=MFA_ENROLL");
    }

    #[test]
    fn get_policy_404_is_not_found() {
        let svc = service(Canned::new(404, r#"{"errorCode":"E0000007"}"#));
        let result = svc.get_policy("00pmissing");
        assert!(matches!(result, Err(ApiError::NotFound)));
    }

    #[test]
    fn create_policy_sends_payload_and_returns_server_entity() {
        let svc = service(Canned::new(
            200,
            r#"{"id":"00pnew","type":"OKTA_SIGN_ON","name":"Sign on","status":"ACTIVE","_links":{"self":{"href":"http://localhost:3000/api/v1/policies/00pnew"}}}"#,
        ));
        let mut policy = SignOnPolicy::new("Sign on");
        policy.set_people_condition("groups", "include", ["00g1"]).unwrap();
        let created = svc.create_policy(&policy).unwrap();
        assert_eq!(created.id.as_deref(), Some("00pnew"));
        assert!(created.links.is_some());

        let seen = svc.transport.seen.borrow();
        assert_eq!(seen[0].method, HttpMethod::Post);
        let body: serde_json::Value = serde_json::from_str(seen[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["conditions"]["people"]["groups"]["include"][0], "00g1");
    }

    #[test]
    fn rule_lifecycle_sends_posts() {
        let svc = service(Canned::new(200, ""));
        svc.activate_policy_rule("00p1", "0pr1").unwrap();
        svc.deactivate_policy_rule("00p1", "0pr1").unwrap();
        let seen = svc.transport.seen.borrow();
        assert!(seen.iter().all(|r| r.method == HttpMethod::Post && r.body.is_none()));
        assert!(seen[1].path.ends_with("/rules/0pr1/lifecycle/deactivate"));
    }

    #[test]
    fn transport_error_is_propagated_unchanged() {
        let failing = |_req: HttpRequest| -> Result<HttpResponse, ApiError> {
            Err(ApiError::Transport("connection refused".to_string()))
        };
        let svc = ApiService::new(PolicyClient::new("http://localhost:1"), failing);
        match svc.get_identity_provider("0oa1") {
            Err(ApiError::Transport(msg)) => assert_eq!(msg, "connection refused"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn remote_error_surfaces_status_and_document() {
        let svc = service(Canned::new(
            409,
            r#"{"errorCode":"E0000096","errorSummary":"Policy name already in use"}"#,
        ));
        let err = svc
            .update_policy("00p1", &Policy::default())
            .unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.remote_error().unwrap().error_code, "E0000096");
    }
}
