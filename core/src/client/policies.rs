use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Policy, PolicyPayload, PolicyType};

use super::{decode, decode_list, expect_no_content, segment, PolicyClient};

impl PolicyClient {
    pub fn build_get_policy(&self, id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("policies/{}", segment(id)))
    }

    pub fn build_list_policies(&self, policy_type: PolicyType) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("policies?type={policy_type}"))
    }

    pub fn build_create_policy<P: PolicyPayload>(&self, policy: &P) -> Result<HttpRequest, ApiError> {
        self.request_with_body(HttpMethod::Post, "policies", policy)
    }

    pub fn build_update_policy<P: PolicyPayload>(&self, id: &str, policy: &P) -> Result<HttpRequest, ApiError> {
        self.request_with_body(HttpMethod::Put, &format!("policies/{}", segment(id)), policy)
    }

    pub fn build_delete_policy(&self, id: &str) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("policies/{}", segment(id)))
    }

    pub fn build_activate_policy(&self, id: &str) -> HttpRequest {
        let path = format!("policies/{}/lifecycle/activate", segment(id));
        self.request(HttpMethod::Post, &path)
    }

    pub fn build_deactivate_policy(&self, id: &str) -> HttpRequest {
        let path = format!("policies/{}/lifecycle/deactivate", segment(id));
        self.request(HttpMethod::Post, &path)
    }

    pub fn parse_get_policy(&self, response: HttpResponse) -> Result<Policy, ApiError> {
        decode(response)
    }

    /// Policies in server order; empty when none match.
    pub fn parse_list_policies(&self, response: HttpResponse) -> Result<Vec<Policy>, ApiError> {
        decode_list(response)
    }

    pub fn parse_create_policy(&self, response: HttpResponse) -> Result<Policy, ApiError> {
        decode(response)
    }

    pub fn parse_update_policy(&self, response: HttpResponse) -> Result<Policy, ApiError> {
        decode(response)
    }

    pub fn parse_delete_policy(&self, response: HttpResponse) -> Result<(), ApiError> {
        expect_no_content(response)
    }

    pub fn parse_activate_policy(&self, response: HttpResponse) -> Result<(), ApiError> {
        expect_no_content(response)
    }

    pub fn parse_deactivate_policy(&self, response: HttpResponse) -> Result<(), ApiError> {
        expect_no_content(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PasswordPolicy, PeopleConditioned, Status};

    const BASE: &str = "http://localhost:3000/api/v1";

    fn client() -> PolicyClient {
        PolicyClient::new(BASE)
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn policy_id_with_query_characters_stays_in_path() {
        let req = client().build_get_policy("00p1?type=PASSWORD");
        assert_eq!(req.path, format!("{BASE}/policies/00p1%3Ftype%3DPASSWORD"));
        let req = client().build_deactivate_policy("00p1#frag");
        assert_eq!(req.path, format!("{BASE}/policies/00p1%23frag/lifecycle/deactivate"));
    }

    #[test]
    fn build_get_policy_produces_correct_request() {
        let req = client().build_get_policy("00p1");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, format!("{BASE}/policies/00p1"));
        assert!(req.body.is_none());
        assert_eq!(req.header("accept"), Some("application/json"));
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn build_list_policies_puts_type_in_query() {
        let req = client().build_list_policies(PolicyType::OauthAuthorizationPolicy);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.path,
            format!("{BASE}/policies?type=OAUTH_AUTHORIZATION_POLICY")
        );
    }

    #[test]
    fn build_create_policy_serializes_variant() {
        let mut policy = PasswordPolicy::new("Contractors");
        policy
            .set_people_condition("groups", "include", ["00g1"])
            .unwrap();
        let req = client().build_create_policy(&policy).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, format!("{BASE}/policies"));
        assert_eq!(req.header("content-type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "type": "PASSWORD",
                "name": "Contractors",
                "conditions": {"people": {"groups": {"include": ["00g1"]}}}
            })
        );
    }

    #[test]
    fn build_update_policy_accepts_full_policy() {
        let policy = Policy {
            name: Some("Renamed".into()),
            status: Some(Status::Inactive),
            ..Policy::default()
        };
        let req = client().build_update_policy("00p1", &policy).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, format!("{BASE}/policies/00p1"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"name": "Renamed", "status": "INACTIVE"}));
    }

    #[test]
    fn lifecycle_requests_have_no_body() {
        let c = client();
        let activate = c.build_activate_policy("00p1");
        assert_eq!(activate.method, HttpMethod::Post);
        assert_eq!(activate.path, format!("{BASE}/policies/00p1/lifecycle/activate"));
        assert!(activate.body.is_none());
        let deactivate = c.build_deactivate_policy("00p1");
        assert_eq!(deactivate.path, format!("{BASE}/policies/00p1/lifecycle/deactivate"));
        let delete = c.build_delete_policy("00p1");
        assert_eq!(delete.method, HttpMethod::Delete);
        assert!(delete.body.is_none());
    }

    #[test]
    fn parse_list_policies_empty() {
        let policies = client().parse_list_policies(response(200, "[]")).unwrap();
        assert!(policies.is_empty());
    }

    #[test]
    fn parse_list_policies_keeps_server_order() {
        let policies = client()
            .parse_list_policies(response(
                200,
                r#"[{"id":"00p2","priority":2},{"id":"00p1","priority":1}]"#,
            ))
            .unwrap();
        let ids: Vec<_> = policies.iter().map(|p| p.id.as_deref().unwrap()).collect();
        assert_eq!(ids, ["00p2", "00p1"]);
    }

    #[test]
    fn parse_get_policy_not_found() {
        let err = client()
            .parse_get_policy(response(
                404,
                r#"{"errorCode":"E0000007","errorSummary":"Not found: Resource not found: 00p9 (Policy)"}"#,
            ))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_policy_validation_error() {
        let err = client()
            .parse_create_policy(response(
                400,
                r#"{"errorCode":"E0000001","errorSummary":"Api validation failed: type"}"#,
            ))
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.remote_error().unwrap().error_code, "E0000001");
    }

    #[test]
    fn parse_update_policy_success() {
        let policy = client()
            .parse_update_policy(response(200, r#"{"id":"00p1","name":"Renamed","type":"PASSWORD"}"#))
            .unwrap();
        assert_eq!(policy.name.as_deref(), Some("Renamed"));
        assert_eq!(policy.policy_type, Some(PolicyType::Password));
    }

    #[test]
    fn parse_lifecycle_ignores_body() {
        let c = client();
        assert!(c.parse_activate_policy(response(200, "")).is_ok());
        assert!(c.parse_deactivate_policy(response(200, "{}")).is_ok());
        assert!(c.parse_delete_policy(response(204, "")).is_ok());
        assert!(matches!(
            c.parse_delete_policy(response(404, "")).unwrap_err(),
            ApiError::NotFound
        ));
    }
}
