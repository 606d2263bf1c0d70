use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::IdentityProvider;

use super::{decode, segment, PolicyClient};

impl PolicyClient {
    pub fn build_get_identity_provider(&self, id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("idps/{}", segment(id)))
    }

    pub fn parse_get_identity_provider(&self, response: HttpResponse) -> Result<IdentityProvider, ApiError> {
        decode(response)
    }
}
