//! Stub CMS for integration tests.
//!
//! An axum server on an ephemeral port that serves canned records, accepts
//! admin writes, and records every request so tests can assert what did
//! (or did not) reach the network.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Multipart, Path, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use folio_client::{AdminSession, CmsApi, MemoryTokenStore, TokenStore};

pub const ADMIN_TOKEN: &str = "test-token";
pub const EXPIRED_TOKEN: &str = "expired-token";

type Rejection = (StatusCode, Json<Value>);

#[derive(Default)]
struct Recorder {
    hits: HashMap<String, usize>,
    requests: Vec<String>,
    events: Vec<String>,
    bodies: Vec<(String, Value)>,
}

pub struct StubState {
    pub base_url: String,
    recorder: Mutex<Recorder>,
    likes: AtomicI64,
    clicks: AtomicI64,
    next_asset_id: AtomicI64,
    /// Make `GET /api/admin/projects` fail with 500.
    pub fail_admin_projects: AtomicBool,
}

impl StubState {
    fn hit(&self, method: &str, path: &str, full: &str) {
        let mut rec = self.recorder.lock().unwrap();
        *rec.hits.entry(format!("{method} {path}")).or_default() += 1;
        rec.requests.push(format!("{method} {full}"));
    }

    fn event(&self, event: String) {
        self.recorder.lock().unwrap().events.push(event);
    }

    fn body(&self, route: &str, body: Value) {
        self.recorder.lock().unwrap().bodies.push((route.to_string(), body));
    }
}

/// Handle to a running stub.
pub struct StubCms {
    pub base_url: String,
    pub state: Arc<StubState>,
}

impl StubCms {
    pub fn api(&self) -> Arc<CmsApi> {
        Arc::new(CmsApi::new(self.base_url.clone()))
    }

    pub fn session(&self, token: Option<&str>) -> (AdminSession, Arc<MemoryTokenStore>) {
        let store = Arc::new(match token {
            Some(token) => MemoryTokenStore::with_token(token),
            None => MemoryTokenStore::new(),
        });
        let dyn_store: Arc<dyn TokenStore> = store.clone();
        (AdminSession::new(self.api(), dyn_store), store)
    }

    /// Requests seen for `"METHOD /path"` (path without query).
    pub fn hits(&self, route: &str) -> usize {
        let rec = self.state.recorder.lock().unwrap();
        rec.hits.get(route).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.state.recorder.lock().unwrap().requests.len()
    }

    /// Every request as `"METHOD /path?query"`, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.state.recorder.lock().unwrap().requests.clone()
    }

    /// Handler-level events in order (upload start/end and the like).
    pub fn events(&self) -> Vec<String> {
        self.state.recorder.lock().unwrap().events.clone()
    }

    /// JSON bodies received on a route, in order.
    pub fn bodies(&self, route: &str) -> Vec<Value> {
        let rec = self.state.recorder.lock().unwrap();
        rec.bodies
            .iter()
            .filter(|(r, _)| r == route)
            .map(|(_, body)| body.clone())
            .collect()
    }
}

/// Start a stub CMS on `127.0.0.1:0`.
pub async fn spawn() -> StubCms {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let state = Arc::new(StubState {
        base_url: base_url.clone(),
        recorder: Mutex::new(Recorder::default()),
        likes: AtomicI64::new(3),
        clicks: AtomicI64::new(10),
        next_asset_id: AtomicI64::new(1),
        fail_admin_projects: AtomicBool::new(false),
    });

    let app = router(Arc::clone(&state));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubCms { base_url, state }
}

fn router(state: Arc<StubState>) -> Router {
    Router::new()
        .route("/api/blogs", get(list_blogs))
        .route("/api/blogs/{slug}", get(get_blog))
        .route("/api/blogs/{slug}/like", post(like_blog))
        .route("/api/projects", get(list_projects))
        .route("/api/projects/{slug}", get(get_project))
        .route("/api/services", get(list_services))
        .route("/api/services/{slug}", get(get_service))
        .route("/api/tools", get(list_tools))
        .route("/api/tools/{slug}/click", post(click_tool))
        .route("/api/stats", get(stats))
        .route("/api/categories", get(categories))
        .route("/api/tags", get(broken_tags))
        .route("/api/contact", post(contact))
        .route("/api/resumes/presigned/{slug}", get(presigned_resume))
        .route("/api/resumes/{slug}", get(direct_resume))
        .route("/files/{name}", get(stored_file))
        .route("/api/admin/login", post(login))
        .route("/api/admin/blogs", get(admin_blogs).post(create_blog))
        .route("/api/admin/blogs/{key}", get(admin_blog).put(update_blog).delete(delete_entry))
        .route("/api/admin/projects", get(admin_projects).post(create_project))
        .route("/api/admin/projects/{key}", put(update_project).delete(delete_entry))
        .route("/api/admin/services", get(admin_services).post(create_service))
        .route("/api/admin/services/{key}", put(update_service).delete(delete_entry))
        .route("/api/admin/upload", post(upload))
        .layer(middleware::from_fn_with_state(Arc::clone(&state), record))
        .with_state(state)
}

async fn record(State(state): State<Arc<StubState>>, req: Request, next: Next) -> Response {
    let full = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_default();
    state.hit(req.method().as_str(), req.uri().path(), &full);
    next.run(req).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn blog_json(id: i64, slug: &str, published: bool) -> Value {
    json!({
        "id": id,
        "title": format!("Post {id}"),
        "slug": slug,
        "excerpt": "An excerpt",
        "content": "<p>Hi</p><img src=\"/uploads/blogs/a.png\">",
        "author": "Admin",
        "featured_image": "/uploads/blogs/cover.png",
        "thumbnail_image": "https://cdn.example.com/thumb.png",
        "published": published,
        "featured": false,
        "views": 12,
        "likes": 3,
        "created_at": "2024-05-01T10:00:00",
        "published_at": null
    })
}

pub fn published_blogs() -> Value {
    json!([blog_json(1, "hello-world", true)])
}

fn admin_blog_list() -> Vec<Value> {
    vec![blog_json(1, "hello-world", true), blog_json(2, "draft-post", false)]
}

pub fn project_json(id: i64, slug: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Project {id}"),
        "slug": slug,
        "description": "A project",
        "long_description": "<img src='uploads/projects/shot.png'>",
        "featured_image": "uploads/projects/cover.png",
        "tech_stack": "[\"Rust\",\"Axum\"]",
        "status": "completed",
        "published": true,
        "created_at": "2024-05-01T10:00:00Z"
    })
}

pub fn service_json(id: i64, slug: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "slug": slug,
        "description": "A service",
        "long_description": "<img src=\"/uploads/services/s.png\">",
        "icon": "/uploads/services/icon.png",
        "price": 900.0,
        "currency": "USD",
        "features": "[\"Review\"]",
        "active": true
    })
}

fn not_found(what: &str) -> Rejection {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": format!("{what} not found") })))
}

fn authorize(headers: &HeaderMap) -> Result<(), Rejection> {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    match token {
        Some(ADMIN_TOKEN) => Ok(()),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Could not validate credentials" })),
        )),
    }
}

fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Merge `body` over `base`, the way the CMS applies a write.
fn merged(mut base: Value, body: &Value) -> Value {
    if let (Some(base), Some(body)) = (base.as_object_mut(), body.as_object()) {
        for (k, v) in body {
            base.insert(k.clone(), v.clone());
        }
    }
    base
}

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

async fn list_blogs() -> Json<Value> {
    Json(published_blogs())
}

async fn get_blog(Path(slug): Path<String>) -> Result<Json<Value>, Rejection> {
    match slug.as_str() {
        "hello-world" => Ok(Json(blog_json(1, "hello-world", true))),
        "exploding" => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "Database unavailable" })),
        )),
        _ => Err(not_found("Blog")),
    }
}

async fn like_blog(State(state): State<Arc<StubState>>, Path(_slug): Path<String>) -> Json<Value> {
    tokio::time::sleep(Duration::from_millis(50)).await;
    let likes = state.likes.fetch_add(1, Ordering::SeqCst) + 1;
    Json(json!({ "likes": likes }))
}

async fn list_projects() -> Json<Value> {
    Json(json!([project_json(1, "folio")]))
}

async fn get_project(Path(slug): Path<String>) -> Result<Json<Value>, Rejection> {
    if slug == "folio" {
        Ok(Json(project_json(1, "folio")))
    } else {
        Err(not_found("Project"))
    }
}

async fn list_services() -> Json<Value> {
    Json(json!([
        service_json(1, "rust-audit", "Rust Audit"),
        service_json(2, "api-design", "API Design")
    ]))
}

async fn get_service(Path(slug): Path<String>) -> Result<Json<Value>, Rejection> {
    if slug == "rust-audit" {
        Ok(Json(service_json(1, "rust-audit", "Rust Audit")))
    } else {
        Err(not_found("Service"))
    }
}

async fn list_tools() -> Json<Value> {
    Json(json!([{
        "id": 1, "name": "Crate Radar", "slug": "crate-radar",
        "website_url": "https://radar.example.com", "clicks": 10, "active": true
    }]))
}

async fn click_tool(State(state): State<Arc<StubState>>, Path(_slug): Path<String>) -> Json<Value> {
    let clicks = state.clicks.fetch_add(1, Ordering::SeqCst) + 1;
    Json(json!({ "clicks": clicks }))
}

async fn stats() -> Json<Value> {
    Json(json!({
        "blogs": 1, "projects": 1, "services": 2, "tools": 1,
        "blog_views": 12, "project_views": 40, "total_views": 52
    }))
}

async fn categories() -> Json<Value> {
    Json(json!([
        {
            "id": 1,
            "name": "Rust",
            "slug": "rust",
            "description": "Systems posts",
            "created_at": "2024-05-01T10:00:00.123456"
        },
        { "id": 2, "name": "Web", "slug": "web" }
    ]))
}

async fn broken_tags() -> &'static str {
    "definitely not json"
}

async fn contact(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> Response {
    state.body("/api/contact", body.clone());
    let name = body["name"].as_str().unwrap_or_default();
    match name {
        "Broken" => (StatusCode::INTERNAL_SERVER_ERROR, "Mail server unavailable").into_response(),
        "Silent" => StatusCode::BAD_GATEWAY.into_response(),
        "Quiet" => Json(json!({ "message": "" })).into_response(),
        _ => Json(json!({ "message": "Thanks, talk soon!" })).into_response(),
    }
}

async fn presigned_resume(
    State(state): State<Arc<StubState>>,
    Path(slug): Path<String>,
) -> Json<Value> {
    Json(json!({
        "url": format!("{}/files/{slug}.pdf", state.base_url),
        "expires_in": 300
    }))
}

async fn direct_resume(Path(slug): Path<String>) -> Vec<u8> {
    format!("%PDF-direct-{slug}").into_bytes()
}

async fn stored_file(Path(name): Path<String>) -> Vec<u8> {
    format!("%PDF-stored-{name}").into_bytes()
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

async fn login(Json(body): Json<Value>) -> Result<Json<Value>, Rejection> {
    if body["username"] == "admin" && body["password"] == "secret" {
        Ok(Json(json!({ "access_token": ADMIN_TOKEN, "token_type": "bearer" })))
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Incorrect username or password" })),
        ))
    }
}

async fn admin_blogs(headers: HeaderMap) -> Result<Json<Value>, Rejection> {
    authorize(&headers)?;
    Ok(Json(Value::Array(admin_blog_list())))
}

async fn admin_blog(headers: HeaderMap, Path(key): Path<String>) -> Result<Json<Value>, Rejection> {
    authorize(&headers)?;
    admin_blog_list()
        .into_iter()
        .find(|b| b["slug"] == key.as_str())
        .map(Json)
        .ok_or_else(|| not_found("Blog"))
}

async fn create_blog(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, Rejection> {
    authorize(&headers)?;
    state.body("POST /api/admin/blogs", body.clone());
    let slug = slugify(body["title"].as_str().unwrap_or("untitled"));
    Ok(Json(merged(blog_json(100, &slug, false), &body)))
}

async fn update_blog(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(key): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, Rejection> {
    authorize(&headers)?;
    state.body("PUT /api/admin/blogs", body.clone());
    let id: i64 = key.parse().unwrap_or(0);
    let slug = slugify(body["title"].as_str().unwrap_or("untitled"));
    Ok(Json(merged(blog_json(id, &slug, false), &body)))
}

async fn admin_projects(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, Rejection> {
    authorize(&headers)?;
    if state.fail_admin_projects.load(Ordering::SeqCst) {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "boom" })),
        ));
    }
    Ok(Json(json!([project_json(1, "folio"), project_json(2, "secret-wip")])))
}

async fn create_project(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, Rejection> {
    authorize(&headers)?;
    state.body("POST /api/admin/projects", body.clone());
    let slug = slugify(body["title"].as_str().unwrap_or("untitled"));
    Ok(Json(merged(project_json(200, &slug), &body)))
}

async fn update_project(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(key): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, Rejection> {
    authorize(&headers)?;
    state.body("PUT /api/admin/projects", body.clone());
    let id: i64 = key.parse().unwrap_or(0);
    let slug = slugify(body["title"].as_str().unwrap_or("untitled"));
    Ok(Json(merged(project_json(id, &slug), &body)))
}

async fn admin_services(headers: HeaderMap) -> Result<Json<Value>, Rejection> {
    authorize(&headers)?;
    let mut inactive = service_json(3, "retired", "Retired");
    inactive["active"] = json!(false);
    Ok(Json(json!([service_json(1, "rust-audit", "Rust Audit"), inactive])))
}

async fn create_service(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, Rejection> {
    authorize(&headers)?;
    state.body("POST /api/admin/services", body.clone());
    let title = body["title"].as_str().unwrap_or("untitled").to_string();
    Ok(Json(merged(service_json(300, &slugify(&title), &title), &body)))
}

async fn update_service(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(key): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, Rejection> {
    authorize(&headers)?;
    state.body("PUT /api/admin/services", body.clone());
    let id: i64 = key.parse().unwrap_or(0);
    let title = body["title"].as_str().unwrap_or("untitled").to_string();
    Ok(Json(merged(service_json(id, &slugify(&title), &title), &body)))
}

async fn delete_entry(
    headers: HeaderMap,
    Path(key): Path<String>,
) -> Result<Json<Value>, Rejection> {
    authorize(&headers)?;
    if key == "404" {
        return Err(not_found("Entry"));
    }
    Ok(Json(json!({ "message": "Deleted successfully" })))
}

async fn upload(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<Value>, Rejection> {
    authorize(&headers)?;

    let mut file_name = String::from("upload.bin");
    let mut folder = String::from("general");
    let mut used_in = String::new();
    let mut size = 0usize;
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                file_name = field.file_name().unwrap_or("upload.bin").to_string();
                size = field.bytes().await.map(|b| b.len()).unwrap_or(0);
            }
            "folder" => folder = field.text().await.unwrap_or_default(),
            "used_in" => used_in = field.text().await.unwrap_or_default(),
            _ => {}
        }
    }

    state.event(format!("upload start {used_in}"));
    tokio::time::sleep(Duration::from_millis(30)).await;
    state.event(format!("upload end {used_in}"));

    let id = state.next_asset_id.fetch_add(1, Ordering::SeqCst);
    Ok(Json(json!({
        "id": id,
        "filename": file_name,
        "storage_url": format!("/uploads/{folder}/{id}-{file_name}"),
        "thumbnail_url": null,
        "file_type": "image/png",
        "file_size": size
    })))
}
