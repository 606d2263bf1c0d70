use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Rule, RulePayload};

use super::{decode, decode_list, expect_no_content, segment, PolicyClient};

impl PolicyClient {
    pub fn build_list_policy_rules(&self, policy_id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("policies/{}/rules", segment(policy_id)))
    }

    pub fn build_get_policy_rule(&self, policy_id: &str, rule_id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, &rule_path(policy_id, rule_id))
    }

    pub fn build_create_policy_rule<R: RulePayload>(
        &self,
        policy_id: &str,
        rule: &R,
    ) -> Result<HttpRequest, ApiError> {
        let path = format!("policies/{}/rules", segment(policy_id));
        self.request_with_body(HttpMethod::Post, &path, rule)
    }

    pub fn build_update_policy_rule<R: RulePayload>(
        &self,
        policy_id: &str,
        rule_id: &str,
        rule: &R,
    ) -> Result<HttpRequest, ApiError> {
        self.request_with_body(HttpMethod::Put, &rule_path(policy_id, rule_id), rule)
    }

    pub fn build_delete_policy_rule(&self, policy_id: &str, rule_id: &str) -> HttpRequest {
        self.request(HttpMethod::Delete, &rule_path(policy_id, rule_id))
    }

    pub fn build_activate_policy_rule(&self, policy_id: &str, rule_id: &str) -> HttpRequest {
        let path = format!("{}/lifecycle/activate", rule_path(policy_id, rule_id));
        self.request(HttpMethod::Post, &path)
    }

    pub fn build_deactivate_policy_rule(&self, policy_id: &str, rule_id: &str) -> HttpRequest {
        let path = format!("{}/lifecycle/deactivate", rule_path(policy_id, rule_id));
        self.request(HttpMethod::Post, &path)
    }

    /// Rules in server order; empty when the policy has none.
    pub fn parse_list_policy_rules(&self, response: HttpResponse) -> Result<Vec<Rule>, ApiError> {
        decode_list(response)
    }

    pub fn parse_get_policy_rule(&self, response: HttpResponse) -> Result<Rule, ApiError> {
        decode(response)
    }

    pub fn parse_create_policy_rule(&self, response: HttpResponse) -> Result<Rule, ApiError> {
        decode(response)
    }

    pub fn parse_update_policy_rule(&self, response: HttpResponse) -> Result<Rule, ApiError> {
        decode(response)
    }

    pub fn parse_delete_policy_rule(&self, response: HttpResponse) -> Result<(), ApiError> {
        expect_no_content(response)
    }

    pub fn parse_activate_policy_rule(&self, response: HttpResponse) -> Result<(), ApiError> {
        expect_no_content(response)
    }

    pub fn parse_deactivate_policy_rule(&self, response: HttpResponse) -> Result<(), ApiError> {
        expect_no_content(response)
    }
}

fn rule_path(policy_id: &str, rule_id: &str) -> String {
    format!("policies/{}/rules/{}", segment(policy_id), segment(rule_id))
}
