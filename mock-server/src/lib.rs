//! In-memory emulation of the policies, rules and identity providers API.
//!
//! Documents are stored as untyped JSON so the server stays independent of
//! the client's DTOs. The server assigns ids, timestamps, default status and
//! priority, and hypermedia links, and answers unknown ids with the remote
//! API's 404 error document.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const API_PREFIX: &str = "/api/v1";

/// Id of the identity provider every fresh server is seeded with.
pub const FIXTURE_IDP_ID: &str = "0oamockgoogle000001";

const POLICY_TYPES: [&str; 4] = ["OKTA_SIGN_ON", "PASSWORD", "MFA_ENROLL", "OAUTH_AUTHORIZATION_POLICY"];
const RULE_TYPES: [&str; 4] = ["SIGN_ON", "PASSWORD", "MFA_ENROLL", "RESOURCE_ACCESS"];

#[derive(Debug, Default)]
pub struct Store {
    policies: Vec<StoredPolicy>,
    idps: Vec<Value>,
}

#[derive(Debug)]
struct StoredPolicy {
    doc: Value,
    rules: Vec<Value>,
}

impl Store {
    pub fn seeded() -> Self {
        Self {
            policies: Vec::new(),
            idps: vec![fixture_idp()],
        }
    }

    fn policy(&self, id: &str) -> Result<&StoredPolicy, ApiError> {
        self.policies
            .iter()
            .find(|p| doc_id(&p.doc) == Some(id))
            .ok_or_else(|| ApiError::not_found(id, "Policy"))
    }

    fn policy_mut(&mut self, id: &str) -> Result<&mut StoredPolicy, ApiError> {
        self.policies
            .iter_mut()
            .find(|p| doc_id(&p.doc) == Some(id))
            .ok_or_else(|| ApiError::not_found(id, "Policy"))
    }
}

impl StoredPolicy {
    fn rule(&self, id: &str) -> Result<&Value, ApiError> {
        self.rules
            .iter()
            .find(|r| doc_id(r) == Some(id))
            .ok_or_else(|| ApiError::not_found(id, "PolicyRule"))
    }

    fn rule_mut(&mut self, id: &str) -> Result<&mut Value, ApiError> {
        self.rules
            .iter_mut()
            .find(|r| doc_id(r) == Some(id))
            .ok_or_else(|| ApiError::not_found(id, "PolicyRule"))
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded()));
    let api = Router::new()
        .route("/policies", get(list_policies).post(create_policy))
        .route(
            "/policies/{id}",
            get(get_policy).put(update_policy).delete(delete_policy),
        )
        .route("/policies/{id}/lifecycle/{action}", post(policy_lifecycle))
        .route("/policies/{id}/rules", get(list_rules).post(create_rule))
        .route(
            "/policies/{id}/rules/{rule_id}",
            get(get_rule).put(update_rule).delete(delete_rule),
        )
        .route(
            "/policies/{id}/rules/{rule_id}/lifecycle/{action}",
            post(rule_lifecycle),
        )
        .route("/idps/{id}", get(get_idp))
        .with_state(db);
    Router::new().nest(API_PREFIX, api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// --- errors ---

/// Error document in the remote API's format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_code: String,
    pub error_summary: String,
    pub error_link: String,
    pub error_id: String,
    pub error_causes: Vec<ErrorCause>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorCause {
    pub error_summary: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, code: &str, summary: String, causes: Vec<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error_code: code.to_string(),
                error_summary: summary,
                error_link: code.to_string(),
                error_id: new_id("oae"),
                error_causes: causes
                    .into_iter()
                    .map(|error_summary| ErrorCause { error_summary })
                    .collect(),
            },
        }
    }

    fn not_found(id: &str, kind: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "E0000007",
            format!("Not found: Resource not found: {id} ({kind})"),
            Vec::new(),
        )
    }

    fn validation(field: &str, cause: &str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "E0000001",
            format!("Api validation failed: {field}"),
            vec![format!("{field}: {cause}")],
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

// --- policies ---

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "type")]
    pub policy_type: Option<String>,
}

async fn list_policies(
    State(db): State<Db>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let policy_type = query
        .policy_type
        .ok_or_else(|| ApiError::validation("type", "The field cannot be left blank"))?;
    if !POLICY_TYPES.contains(&policy_type.as_str()) {
        return Err(ApiError::validation("type", "Unsupported policy type"));
    }
    let store = db.read().await;
    let policies = store
        .policies
        .iter()
        .filter(|p| p.doc["type"] == policy_type.as_str())
        .map(|p| p.doc.clone())
        .collect();
    Ok(Json(policies))
}

async fn create_policy(
    State(db): State<Db>,
    Json(input): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let mut doc = validated_object(input, &POLICY_TYPES)?;
    let mut store = db.write().await;
    let policy_type = doc["type"].clone();
    let id = new_id("00p");
    let now = timestamp();
    let next_priority = store
        .policies
        .iter()
        .filter(|p| p.doc["type"] == policy_type)
        .count()
        + 1;

    doc.insert("id".into(), json!(id));
    doc.entry("status").or_insert_with(|| json!("ACTIVE"));
    doc.entry("priority").or_insert_with(|| json!(next_priority));
    doc.insert("system".into(), json!(false));
    doc.insert("created".into(), json!(now));
    doc.insert("lastUpdated".into(), json!(now));
    let mut doc = Value::Object(doc);
    refresh_policy_links(&mut doc);

    tracing::debug!(%id, "created policy");
    store.policies.push(StoredPolicy {
        doc: doc.clone(),
        rules: Vec::new(),
    });
    Ok(Json(doc))
}

async fn get_policy(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let store = db.read().await;
    Ok(Json(store.policy(&id)?.doc.clone()))
}

async fn update_policy(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let mut store = db.write().await;
    let stored = store.policy_mut(&id)?;
    let doc = replace_document(&stored.doc, input, &POLICY_TYPES)?;
    stored.doc = doc;
    refresh_policy_links(&mut stored.doc);
    tracing::debug!(%id, "updated policy");
    Ok(Json(stored.doc.clone()))
}

async fn delete_policy(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut store = db.write().await;
    let before = store.policies.len();
    store.policies.retain(|p| doc_id(&p.doc) != Some(id.as_str()));
    if store.policies.len() == before {
        return Err(ApiError::not_found(&id, "Policy"));
    }
    tracing::debug!(%id, "deleted policy");
    Ok(StatusCode::NO_CONTENT)
}

async fn policy_lifecycle(
    State(db): State<Db>,
    Path((id, action)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let status = lifecycle_status(&action)?;
    let mut store = db.write().await;
    let stored = store.policy_mut(&id)?;
    set_status(&mut stored.doc, status);
    refresh_policy_links(&mut stored.doc);
    Ok(StatusCode::OK)
}

// --- rules ---

async fn list_rules(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let store = db.read().await;
    Ok(Json(store.policy(&id)?.rules.clone()))
}

async fn create_rule(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let mut store = db.write().await;
    let stored = store.policy_mut(&id)?;
    let mut doc = validated_object(input, &RULE_TYPES)?;
    let rule_id = new_id("0pr");
    let now = timestamp();
    let next_priority = stored.rules.len() + 1;

    doc.insert("id".into(), json!(rule_id));
    doc.entry("status").or_insert_with(|| json!("ACTIVE"));
    doc.entry("priority").or_insert_with(|| json!(next_priority));
    doc.insert("system".into(), json!(false));
    doc.insert("created".into(), json!(now));
    doc.insert("lastUpdated".into(), json!(now));
    let mut doc = Value::Object(doc);
    refresh_rule_links(&id, &mut doc);

    tracing::debug!(policy_id = %id, %rule_id, "created rule");
    stored.rules.push(doc.clone());
    Ok(Json(doc))
}

async fn get_rule(
    State(db): State<Db>,
    Path((id, rule_id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let store = db.read().await;
    let rule = store.policy(&id)?.rule(&rule_id)?;
    Ok(Json(rule.clone()))
}

async fn update_rule(
    State(db): State<Db>,
    Path((id, rule_id)): Path<(String, String)>,
    Json(input): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let mut store = db.write().await;
    let rule = store.policy_mut(&id)?.rule_mut(&rule_id)?;
    *rule = replace_document(rule, input, &RULE_TYPES)?;
    refresh_rule_links(&id, rule);
    tracing::debug!(policy_id = %id, %rule_id, "updated rule");
    Ok(Json(rule.clone()))
}

async fn delete_rule(
    State(db): State<Db>,
    Path((id, rule_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let mut store = db.write().await;
    let stored = store.policy_mut(&id)?;
    let before = stored.rules.len();
    stored.rules.retain(|r| doc_id(r) != Some(rule_id.as_str()));
    if stored.rules.len() == before {
        return Err(ApiError::not_found(&rule_id, "PolicyRule"));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn rule_lifecycle(
    State(db): State<Db>,
    Path((id, rule_id, action)): Path<(String, String, String)>,
) -> Result<StatusCode, ApiError> {
    let status = lifecycle_status(&action)?;
    let mut store = db.write().await;
    let rule = store.policy_mut(&id)?.rule_mut(&rule_id)?;
    set_status(rule, status);
    refresh_rule_links(&id, rule);
    Ok(StatusCode::OK)
}

// --- identity providers ---

async fn get_idp(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    let store = db.read().await;
    store
        .idps
        .iter()
        .find(|idp| doc_id(idp) == Some(id.as_str()))
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found(&id, "IdentityProvider"))
}

// --- helpers ---

fn doc_id(doc: &Value) -> Option<&str> {
    doc.get("id").and_then(Value::as_str)
}

pub fn new_id(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{prefix}{}", &suffix[..17])
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Require a JSON object with a non-blank `name` and a known `type`.
fn validated_object(input: Value, types: &[&str]) -> Result<Map<String, Value>, ApiError> {
    let Value::Object(doc) = input else {
        return Err(ApiError::validation("body", "Expected a JSON object"));
    };
    match doc.get("name").and_then(Value::as_str) {
        Some(name) if !name.trim().is_empty() => {}
        _ => return Err(ApiError::validation("name", "The field cannot be left blank")),
    }
    match doc.get("type").and_then(Value::as_str) {
        Some(t) if types.contains(&t) => {}
        Some(_) => return Err(ApiError::validation("type", "Unsupported type")),
        None => return Err(ApiError::validation("type", "The field cannot be left blank")),
    }
    if let Some(status) = doc.get("status") {
        if status != "ACTIVE" && status != "INACTIVE" {
            return Err(ApiError::validation("status", "Must be ACTIVE or INACTIVE"));
        }
    }
    Ok(doc)
}

/// Full replacement keeping server-owned fields from `current`.
fn replace_document(current: &Value, input: Value, types: &[&str]) -> Result<Value, ApiError> {
    let mut doc = validated_object(input, types)?;
    for key in ["id", "created", "system"] {
        if let Some(v) = current.get(key) {
            doc.insert(key.into(), v.clone());
        }
    }
    for key in ["status", "priority"] {
        if let Some(v) = current.get(key) {
            doc.entry(key).or_insert_with(|| v.clone());
        }
    }
    doc.insert("lastUpdated".into(), json!(timestamp()));
    Ok(Value::Object(doc))
}

fn lifecycle_status(action: &str) -> Result<&'static str, ApiError> {
    match action {
        "activate" => Ok("ACTIVE"),
        "deactivate" => Ok("INACTIVE"),
        other => Err(ApiError::not_found(other, "LifecycleOperation")),
    }
}

fn set_status(doc: &mut Value, status: &str) {
    doc["status"] = json!(status);
    doc["lastUpdated"] = json!(timestamp());
}

fn link(href: String, allow: &[&str]) -> Value {
    json!({"href": href, "hints": {"allow": allow}})
}

fn lifecycle_link(base: &str, status: &Value) -> (&'static str, Value) {
    if status == "ACTIVE" {
        ("deactivate", link(format!("{base}/lifecycle/deactivate"), &["POST"]))
    } else {
        ("activate", link(format!("{base}/lifecycle/activate"), &["POST"]))
    }
}

fn refresh_policy_links(doc: &mut Value) {
    let Some(id) = doc_id(doc).map(str::to_string) else {
        return;
    };
    let base = format!("{API_PREFIX}/policies/{id}");
    let (name, lifecycle) = lifecycle_link(&base, &doc["status"]);
    let mut links = Map::new();
    links.insert("self".into(), link(base.clone(), &["GET", "PUT", "DELETE"]));
    links.insert(name.into(), lifecycle);
    links.insert("rules".into(), link(format!("{base}/rules"), &["GET", "POST"]));
    doc["_links"] = Value::Object(links);
}

fn refresh_rule_links(policy_id: &str, doc: &mut Value) {
    let Some(id) = doc_id(doc).map(str::to_string) else {
        return;
    };
    let base = format!("{API_PREFIX}/policies/{policy_id}/rules/{id}");
    let (name, lifecycle) = lifecycle_link(&base, &doc["status"]);
    let mut links = Map::new();
    links.insert("self".into(), link(base.clone(), &["GET", "PUT", "DELETE"]));
    links.insert(name.into(), lifecycle);
    doc["_links"] = Value::Object(links);
}

fn fixture_idp() -> Value {
    json!({
        "id": FIXTURE_IDP_ID,
        "type": "GOOGLE",
        "name": "Google",
        "status": "ACTIVE",
        "created": "2016-03-24T23:21:49.000Z",
        "lastUpdated": "2016-03-24T23:21:49.000Z",
        "protocol": {
            "type": "OAUTH2",
            "endpoints": {
                "authorization": {
                    "url": "https://accounts.google.com/o/oauth2/auth",
                    "binding": "HTTP-REDIRECT"
                },
                "token": {
                    "url": "https://www.googleapis.com/oauth2/v3/token",
                    "binding": "HTTP-POST"
                }
            },
            "scopes": ["profile", "email", "openid"],
            "credentials": {
                "client": {
                    "client_id": "mock-client.apps.googleusercontent.com",
                    "client_secret": "mock-secret"
                }
            }
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
                "href": format!("/oauth2/v1/authorize?idp={FIXTURE_IDP_ID}"),
                "templated": true,
                "hints": {"allow": ["GET"]}
            },
            "clientRedirectUri": {
                "href": "/oauth2/v1/authorize/callback",
                "hints": {"allow": ["POST"]}
            }
        }
    })
}
