// ABOUTME: In-process fake Mealie and Letta servers for integration tests
// ABOUTME: Serve the REST endpoints the bootstrap uses on 127.0.0.1:0 and count every call

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Session token the fake Mealie hands out on a successful login
pub const SESSION_TOKEN: &str = "session-token";
/// API token the fake Mealie mints
pub const MINTED_TOKEN: &str = "minted-api-token";
/// Password the fake Mealie accepts
pub const GOOD_PASSWORD: &str = "MyPassword";

/// Serve `app` on an ephemeral local port, returning its base URL
pub async fn spawn_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{address}")
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_owned)
}

// ============================================================================
// Mealie
// ============================================================================

/// Malformed or failing responses the fake Mealie can give while minting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MintFault {
    /// Login answers 200 without `access_token`
    LoginWithoutAccessToken,
    /// API token creation answers 500
    ApiTokenServerError,
    /// API token creation answers 200 with a token instead of 201
    ApiTokenWrongSuccessStatus,
    /// API token creation answers 201 without `token`
    ApiTokenWithoutToken,
}

/// Call counters and accepted tokens of the fake Mealie
#[derive(Default)]
pub struct MealieState {
    /// Tokens `/api/users/self` accepts
    pub valid_tokens: Mutex<HashSet<String>>,
    /// `GET /api/users/self` calls
    pub self_checks: AtomicUsize,
    /// `POST /api/auth/token` calls
    pub logins: AtomicUsize,
    /// `POST /api/users/api-tokens` calls
    pub mints: AtomicUsize,
    /// `GET /api/recipes` calls
    pub searches: AtomicUsize,
    /// Query string of the last recipe search
    pub last_search: Mutex<Vec<(String, String)>>,
    /// Injected minting failure, if any
    pub mint_fault: Mutex<Option<MintFault>>,
}

impl MealieState {
    /// Number of calls that could mutate credentials (login + mint)
    pub fn auth_calls(&self) -> usize {
        self.logins.load(Ordering::SeqCst) + self.mints.load(Ordering::SeqCst)
    }
}

/// A running fake Mealie
pub struct FakeMealie {
    /// Base URL
    pub base_url: String,
    /// Shared state
    pub state: Arc<MealieState>,
}

impl FakeMealie {
    /// Start a fake Mealie that accepts `valid_tokens`
    pub async fn start(valid_tokens: &[&str]) -> Self {
        let state = Arc::new(MealieState::default());
        state
            .valid_tokens
            .lock()
            .unwrap()
            .extend(valid_tokens.iter().map(|t| (*t).to_owned()));

        let app = Router::new()
            .route("/api/users/self", get(users_self))
            .route("/api/auth/token", post(auth_token))
            .route("/api/users/api-tokens", post(api_tokens))
            .route("/api/recipes", get(search_recipes))
            .route("/api/recipes/:slug", get(get_recipe))
            .with_state(Arc::clone(&state));

        Self {
            base_url: spawn_server(app).await,
            state,
        }
    }

    /// Make every later login or API token call fail with `fault`
    pub fn fail_minting(&self, fault: MintFault) {
        *self.state.mint_fault.lock().unwrap() = Some(fault);
    }
}

fn mint_fault(state: &MealieState) -> Option<MintFault> {
    *state.mint_fault.lock().unwrap()
}

async fn users_self(State(state): State<Arc<MealieState>>, headers: HeaderMap) -> Response {
    state.self_checks.fetch_add(1, Ordering::SeqCst);
    let accepted = bearer(&headers)
        .is_some_and(|token| state.valid_tokens.lock().unwrap().contains(&token));
    if accepted {
        Json(json!({"id": "user-1", "username": "changeme"})).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Not authenticated"}))).into_response()
    }
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn auth_token(State(state): State<Arc<MealieState>>, Form(form): Form<LoginForm>) -> Response {
    state.logins.fetch_add(1, Ordering::SeqCst);
    if mint_fault(&state) == Some(MintFault::LoginWithoutAccessToken) {
        return Json(json!({"token_type": "bearer"})).into_response();
    }
    if form.password == GOOD_PASSWORD && !form.username.is_empty() {
        Json(json!({"access_token": SESSION_TOKEN, "token_type": "bearer"})).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Unauthorized"}))).into_response()
    }
}

async fn api_tokens(
    State(state): State<Arc<MealieState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.mints.fetch_add(1, Ordering::SeqCst);
    if bearer(&headers).as_deref() != Some(SESSION_TOKEN) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match mint_fault(&state) {
        Some(MintFault::ApiTokenServerError) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
        }
        Some(MintFault::ApiTokenWrongSuccessStatus) => {
            return Json(json!({"id": 7, "token": MINTED_TOKEN})).into_response();
        }
        Some(MintFault::ApiTokenWithoutToken) => {
            return (StatusCode::CREATED, Json(json!({"id": 7, "name": body["name"]})))
                .into_response();
        }
        Some(MintFault::LoginWithoutAccessToken) | None => {}
    }
    state
        .valid_tokens
        .lock()
        .unwrap()
        .insert(MINTED_TOKEN.to_owned());
    (
        StatusCode::CREATED,
        Json(json!({"id": 7, "name": body["name"], "token": MINTED_TOKEN})),
    )
        .into_response()
}

async fn search_recipes(
    State(state): State<Arc<MealieState>>,
    Query(query): Query<Vec<(String, String)>>,
) -> Json<Value> {
    state.searches.fetch_add(1, Ordering::SeqCst);
    *state.last_search.lock().unwrap() = query;
    Json(json!({
        "items": [{
            "id": "r-1",
            "name": "Chicken Soup",
            "slug": "chicken-soup",
            "description": "Warm and simple",
            "recipeCategory": [{"name": "Soup"}],
            "tags": [],
        }]
    }))
}

async fn get_recipe(Path(slug): Path<String>) -> Response {
    if slug != "chicken-soup" {
        return (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found"}))).into_response();
    }
    Json(json!({
        "id": "r-1",
        "name": "Chicken Soup",
        "slug": "chicken-soup",
        "recipeIngredient": [{"display": "1 chicken"}, {"display": "2 l water"}],
        "recipeInstructions": [{"text": "Boil."}],
        "notes": [],
    }))
    .into_response()
}

// ============================================================================
// Letta
// ============================================================================

/// Agents, models, tools and call counters of the fake Letta
#[derive(Default)]
pub struct LettaState {
    /// Existing agents as `(id, name)`
    pub agents: Mutex<Vec<(String, String)>>,
    /// Offered model handles
    pub models: Vec<String>,
    /// Tools the gateway's MCP server can resolve
    pub resolvable_tools: HashSet<String>,
    /// Registered MCP servers by name
    pub servers: Mutex<BTreeMap<String, Value>>,
    /// Agent lookups
    pub lookups: AtomicUsize,
    /// Agent creations
    pub creates: AtomicUsize,
    /// Tool attach attempts
    pub attaches: AtomicUsize,
    /// MCP server registrations
    pub registrations: AtomicUsize,
    /// Body of the last create-agent request
    pub last_create: Mutex<Option<Value>>,
}

/// A running fake Letta
pub struct FakeLetta {
    /// Base URL
    pub base_url: String,
    /// Shared state
    pub state: Arc<LettaState>,
}

impl FakeLetta {
    /// Start a fake Letta offering `models` and able to resolve `tools`
    pub async fn start(models: &[&str], tools: &[&str]) -> Self {
        let state = Arc::new(LettaState {
            models: models.iter().map(|m| (*m).to_owned()).collect(),
            resolvable_tools: tools.iter().map(|t| (*t).to_owned()).collect(),
            ..LettaState::default()
        });

        let app = Router::new()
            .route("/v1/agents/", get(list_agents).post(create_agent))
            .route("/v1/models/", get(list_models))
            .route("/v1/tools/mcp/servers", get(list_servers).put(register_server))
            .route("/v1/tools/mcp/servers/:server/:tool", post(attach_tool))
            .with_state(Arc::clone(&state));

        Self {
            base_url: spawn_server(app).await,
            state,
        }
    }

    /// Pretend an agent already exists
    pub fn seed_agent(&self, id: &str, name: &str) {
        self.state
            .agents
            .lock()
            .unwrap()
            .push((id.to_owned(), name.to_owned()));
    }

    /// Agent creations so far
    pub fn creates(&self) -> usize {
        self.state.creates.load(Ordering::SeqCst)
    }
}

#[derive(Deserialize)]
struct NameQuery {
    name: Option<String>,
}

async fn list_agents(
    State(state): State<Arc<LettaState>>,
    Query(query): Query<NameQuery>,
) -> Json<Value> {
    state.lookups.fetch_add(1, Ordering::SeqCst);
    let agents: Vec<Value> = state
        .agents
        .lock()
        .unwrap()
        .iter()
        .filter(|(_, name)| query.name.as_ref().map_or(true, |q| q == name))
        .map(|(id, name)| json!({"id": id, "name": name}))
        .collect();
    Json(Value::Array(agents))
}

async fn create_agent(State(state): State<Arc<LettaState>>, Json(body): Json<Value>) -> Json<Value> {
    let count = state.creates.fetch_add(1, Ordering::SeqCst) + 1;
    let id = format!("agent-{count}");
    let name = body["name"].as_str().unwrap_or_default().to_owned();
    state.agents.lock().unwrap().push((id.clone(), name.clone()));
    *state.last_create.lock().unwrap() = Some(body.clone());
    Json(json!({"id": id, "name": name, "timezone": body["timezone"]}))
}

async fn list_models(State(state): State<Arc<LettaState>>) -> Json<Value> {
    let models: Vec<Value> = state
        .models
        .iter()
        .map(|handle| json!({"handle": handle, "model": handle}))
        .collect();
    Json(Value::Array(models))
}

async fn attach_tool(
    State(state): State<Arc<LettaState>>,
    Path((_server, tool)): Path<(String, String)>,
) -> Response {
    state.attaches.fetch_add(1, Ordering::SeqCst);
    if state.resolvable_tools.contains(&tool) {
        Json(json!({"id": format!("tool-{tool}"), "name": tool})).into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(json!({"detail": "tool not found"}))).into_response()
    }
}

async fn list_servers(State(state): State<Arc<LettaState>>) -> Json<Value> {
    let servers = state.servers.lock().unwrap().clone();
    Json(json!(servers))
}

async fn register_server(State(state): State<Arc<LettaState>>, Json(body): Json<Value>) -> Json<Value> {
    state.registrations.fetch_add(1, Ordering::SeqCst);
    let name = body["server_name"].as_str().unwrap_or_default().to_owned();
    state.servers.lock().unwrap().insert(name, body.clone());
    Json(body)
}
