//! REST client for the portfolio CMS.
//!
//! Wraps every endpoint the site and the admin console use. Public reads
//! need no credentials; admin calls take the bearer token explicitly (see
//! [`crate::auth::AdminSession`] for the token-managing wrapper).

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

use folio_core::contact::{ContactMessage, ContactReceipt};
use folio_core::models::{
    Blog, Category, ClickCount, CreateBlog, CreateProject, CreateService, LikeCount, LoginRequest,
    Project, Service, Stats, Tag, TokenResponse, Tool, UpdateBlog, UpdateProject, UpdateService,
    UploadMeta, UploadedAsset,
};
use folio_core::resume::{PresignedLink, ResumeKind};
use folio_core::types::DbId;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::query::{BlogQuery, ProjectQuery, ServiceQuery, ToolQuery};
use crate::upload::ImageFile;

/// Longest raw (non-JSON) error body shown to a user as-is.
const MAX_RAW_ERROR_LEN: usize = 300;

/// HTTP client for one CMS deployment.
#[derive(Debug, Clone)]
pub struct CmsApi {
    client: reqwest::Client,
    api_url: String,
}

impl CmsApi {
    /// Create a client for the CMS at `api_url`, e.g. `http://localhost:8000`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    /// Build a client with the configured base URL and request timeout.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(client, config.api_url.clone()))
    }

    /// Base URL without a trailing slash.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    // ---- blogs ----

    pub async fn blogs(&self, query: &BlogQuery) -> ClientResult<Vec<Blog>> {
        let request = self.request(Method::GET, "/api/blogs").query(query);
        Self::fetch(request, "Failed to fetch blogs").await
    }

    pub async fn blog(&self, slug: &str) -> ClientResult<Blog> {
        let request = self.request(Method::GET, &format!("/api/blogs/{slug}"));
        Self::fetch(request, "Blog not found").await
    }

    /// Increment a post's like counter, returning the new total.
    pub async fn like_blog(&self, slug: &str) -> ClientResult<LikeCount> {
        let request = self.request(Method::POST, &format!("/api/blogs/{slug}/like"));
        Self::fetch(request, "Failed to like blog").await
    }

    // ---- projects ----

    pub async fn projects(&self, query: &ProjectQuery) -> ClientResult<Vec<Project>> {
        let request = self.request(Method::GET, "/api/projects").query(query);
        Self::fetch(request, "Failed to fetch projects").await
    }

    pub async fn project(&self, slug: &str) -> ClientResult<Project> {
        let request = self.request(Method::GET, &format!("/api/projects/{slug}"));
        Self::fetch(request, "Project not found").await
    }

    // ---- services ----

    pub async fn services(&self, query: &ServiceQuery) -> ClientResult<Vec<Service>> {
        let request = self.request(Method::GET, "/api/services").query(query);
        Self::fetch(request, "Failed to fetch services").await
    }

    pub async fn service(&self, slug: &str) -> ClientResult<Service> {
        let request = self.request(Method::GET, &format!("/api/services/{slug}"));
        Self::fetch(request, "Service not found").await
    }

    // ---- tools ----

    pub async fn tools(&self, query: &ToolQuery) -> ClientResult<Vec<Tool>> {
        let request = self.request(Method::GET, "/api/tools").query(query);
        Self::fetch(request, "Failed to fetch tools").await
    }

    pub async fn tool(&self, slug: &str) -> ClientResult<Tool> {
        let request = self.request(Method::GET, &format!("/api/tools/{slug}"));
        Self::fetch(request, "Tool not found").await
    }

    /// Record an outbound click on a tool, returning the new total.
    pub async fn track_tool_click(&self, slug: &str) -> ClientResult<ClickCount> {
        let request = self.request(Method::POST, &format!("/api/tools/{slug}/click"));
        Self::fetch(request, "Failed to track click").await
    }

    // ---- misc public ----

    pub async fn stats(&self) -> ClientResult<Stats> {
        Self::fetch(self.request(Method::GET, "/api/stats"), "Failed to fetch stats").await
    }

    pub async fn categories(&self) -> ClientResult<Vec<Category>> {
        Self::fetch(
            self.request(Method::GET, "/api/categories"),
            "Failed to fetch categories",
        )
        .await
    }

    pub async fn tags(&self) -> ClientResult<Vec<Tag>> {
        Self::fetch(self.request(Method::GET, "/api/tags"), "Failed to fetch tags").await
    }

    /// Submit the contact form. Validation is the caller's job.
    pub async fn send_contact(&self, message: &ContactMessage) -> ClientResult<ContactReceipt> {
        let request = self.request(Method::POST, "/api/contact").json(message);
        Self::fetch(request, "Failed to send contact message").await
    }

    /// Direct download URL of a resume variant.
    pub fn resume_url(&self, kind: ResumeKind) -> String {
        format!("{}{}", self.api_url, kind.direct_path())
    }

    /// Ask the CMS for a short-lived storage URL for a resume variant.
    pub async fn presigned_resume(&self, kind: ResumeKind) -> ClientResult<PresignedLink> {
        let request = self.request(Method::GET, &kind.presigned_path());
        Self::fetch(request, "Failed to get resume link").await
    }

    /// Download an absolute URL (resume files, stored assets).
    pub async fn download(&self, url: &str) -> ClientResult<Vec<u8>> {
        tracing::debug!(url, "Downloading");
        let response = self.client.get(url).send().await?;
        let response = Self::ensure_success(response, "Download failed").await?;
        Ok(response.bytes().await?.to_vec())
    }

    // ---- admin ----

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, credentials: &LoginRequest) -> ClientResult<TokenResponse> {
        let request = self.request(Method::POST, "/api/admin/login").json(credentials);
        Self::fetch(request, "Invalid username or password.").await
    }

    /// All posts, drafts included.
    pub async fn admin_blogs(&self, token: &str) -> ClientResult<Vec<Blog>> {
        let request = self.authed(Method::GET, "/api/admin/blogs", token);
        Self::fetch(request, "Failed to fetch blogs").await
    }

    /// A single post by slug, drafts included (used for previews).
    pub async fn admin_blog(&self, token: &str, slug: &str) -> ClientResult<Blog> {
        let request = self.authed(Method::GET, &format!("/api/admin/blogs/{slug}"), token);
        Self::fetch(request, "Blog not found").await
    }

    pub async fn create_blog(&self, token: &str, data: &CreateBlog) -> ClientResult<Blog> {
        let request = self.authed(Method::POST, "/api/admin/blogs", token).json(data);
        Self::fetch(request, "Failed to create blog").await
    }

    pub async fn update_blog(
        &self,
        token: &str,
        id: DbId,
        data: &UpdateBlog,
    ) -> ClientResult<Blog> {
        let request = self
            .authed(Method::PUT, &format!("/api/admin/blogs/{id}"), token)
            .json(data);
        Self::fetch(request, "Failed to update blog").await
    }

    pub async fn delete_blog(&self, token: &str, id: DbId) -> ClientResult<()> {
        let response = self
            .authed(Method::DELETE, &format!("/api/admin/blogs/{id}"), token)
            .send()
            .await?;
        Self::check_status(response, "Failed to delete blog").await
    }

    pub async fn admin_projects(&self, token: &str) -> ClientResult<Vec<Project>> {
        let request = self.authed(Method::GET, "/api/admin/projects", token);
        Self::fetch(request, "Failed to fetch projects").await
    }

    pub async fn admin_project(&self, token: &str, slug: &str) -> ClientResult<Project> {
        let request = self.authed(Method::GET, &format!("/api/admin/projects/{slug}"), token);
        Self::fetch(request, "Project not found").await
    }

    pub async fn create_project(&self, token: &str, data: &CreateProject) -> ClientResult<Project> {
        let request = self.authed(Method::POST, "/api/admin/projects", token).json(data);
        Self::fetch(request, "Failed to create project").await
    }

    pub async fn update_project(
        &self,
        token: &str,
        id: DbId,
        data: &UpdateProject,
    ) -> ClientResult<Project> {
        let request = self
            .authed(Method::PUT, &format!("/api/admin/projects/{id}"), token)
            .json(data);
        Self::fetch(request, "Failed to update project").await
    }

    pub async fn delete_project(&self, token: &str, id: DbId) -> ClientResult<()> {
        let response = self
            .authed(Method::DELETE, &format!("/api/admin/projects/{id}"), token)
            .send()
            .await?;
        Self::check_status(response, "Failed to delete project").await
    }

    pub async fn admin_services(&self, token: &str) -> ClientResult<Vec<Service>> {
        let request = self.authed(Method::GET, "/api/admin/services", token);
        Self::fetch(request, "Failed to fetch services").await
    }

    pub async fn admin_service(&self, token: &str, slug: &str) -> ClientResult<Service> {
        let request = self.authed(Method::GET, &format!("/api/admin/services/{slug}"), token);
        Self::fetch(request, "Service not found").await
    }

    pub async fn create_service(&self, token: &str, data: &CreateService) -> ClientResult<Service> {
        let request = self.authed(Method::POST, "/api/admin/services", token).json(data);
        Self::fetch(request, "Failed to create service").await
    }

    pub async fn update_service(
        &self,
        token: &str,
        id: DbId,
        data: &UpdateService,
    ) -> ClientResult<Service> {
        let request = self
            .authed(Method::PUT, &format!("/api/admin/services/{id}"), token)
            .json(data);
        Self::fetch(request, "Failed to update service").await
    }

    pub async fn delete_service(&self, token: &str, id: DbId) -> ClientResult<()> {
        let response = self
            .authed(Method::DELETE, &format!("/api/admin/services/{id}"), token)
            .send()
            .await?;
        Self::check_status(response, "Failed to delete service").await
    }

    /// Upload an image as `multipart/form-data`. The CMS stores the original
    /// and generates the resized variants.
    pub async fn upload_image(
        &self,
        token: &str,
        file: &ImageFile,
        meta: &UploadMeta,
    ) -> ClientResult<UploadedAsset> {
        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;

        let mut form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("folder", meta.folder.clone());
        if let Some(used_in) = &meta.used_in {
            form = form.text("used_in", used_in.clone());
        }
        if let Some(id) = meta.used_in_id {
            form = form.text("used_in_id", id.to_string());
        }
        if let Some(alt) = &meta.alt_text {
            form = form.text("alt_text", alt.clone());
        }

        let request = self
            .authed(Method::POST, "/api/admin/upload", token)
            .multipart(form);
        Self::fetch(request, "Upload failed").await
    }

    // ---- private helpers ----

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(%method, path, "CMS request");
        self.client.request(method, format!("{}{}", self.api_url, path))
    }

    fn authed(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.request(method, path).bearer_auth(token)
    }

    /// Send the request and parse a JSON body.
    async fn fetch<T: DeserializeOwned>(
        request: RequestBuilder,
        context: &'static str,
    ) -> ClientResult<T> {
        let response = request.send().await?;
        Self::parse_response(response, context).await
    }

    /// Ensure the response has a success status code. On failure the error
    /// carries the body's message, or `context` when the body has none.
    async fn ensure_success(
        response: reqwest::Response,
        context: &'static str,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body, context);
            tracing::warn!(status = status.as_u16(), %message, "CMS request failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
        context: &'static str,
    ) -> ClientResult<T> {
        let response = Self::ensure_success(response, context).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response, context: &'static str) -> ClientResult<()> {
        Self::ensure_success(response, context).await?;
        Ok(())
    }
}

/// Pick the user-facing message out of an error body.
///
/// JSON bodies are searched for `detail`, `error` and `message` (a list of
/// validation errors under `detail` is joined). Short plain-text bodies are
/// used verbatim. Anything else yields `fallback`.
pub fn error_message(body: &str, fallback: &'static str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["detail", "error", "message"] {
            match value.get(key) {
                Some(Value::String(text)) if !text.trim().is_empty() => return text.clone(),
                Some(Value::Array(items)) => {
                    let messages: Vec<&str> = items
                        .iter()
                        .filter_map(|item| item.get("msg").and_then(Value::as_str))
                        .collect();
                    if !messages.is_empty() {
                        return messages.join("; ");
                    }
                }
                _ => {}
            }
        }
        return fallback.to_string();
    }

    let text = body.trim();
    if text.is_empty() || text.starts_with('<') || text.len() > MAX_RAW_ERROR_LEN {
        fallback.to_string()
    } else {
        text.to_string()
    }
}
