//! Admin session: login, token persistence, and authenticated calls.
//!
//! The token is opaque. It is never inspected for expiry; the first 401
//! from the CMS clears it and the caller must log in again.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use folio_core::models::{
    Blog, CreateBlog, CreateProject, CreateService, LoginRequest, Project, Service, UpdateBlog,
    UpdateProject, UpdateService, UploadMeta, UploadedAsset,
};
use folio_core::types::DbId;

use crate::api::CmsApi;
use crate::error::{ClientError, ClientResult};
use crate::upload::ImageFile;

/// Shown when the CMS rejects a login for any reason other than transport.
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid username or password.";

/// Where the admin bearer token lives between calls.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> ClientResult<Option<String>>;
    fn save(&self, token: &str) -> ClientResult<()>;
    fn clear(&self) -> ClientResult<()>;
}

/// Token persisted in a single file (mode 0600 on unix).
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> ClientResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, token: &str) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Process-local token, for tests and one-shot tooling.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> ClientResult<Option<String>> {
        Ok(self
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, token: &str) -> ClientResult<()> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// The logged-in (or not) admin.
///
/// Every admin operation checks for a token before touching the network
/// and clears it when the CMS answers 401.
#[derive(Clone)]
pub struct AdminSession {
    api: Arc<CmsApi>,
    store: Arc<dyn TokenStore>,
}

impl AdminSession {
    pub fn new(api: Arc<CmsApi>, store: Arc<dyn TokenStore>) -> Self {
        Self { api, store }
    }

    pub fn api(&self) -> &CmsApi {
        &self.api
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.store.load(), Ok(Some(_)))
    }

    /// The stored token, or [`ClientError::NotAuthenticated`].
    pub fn token(&self) -> ClientResult<String> {
        self.store.load()?.ok_or(ClientError::NotAuthenticated)
    }

    /// Log in and persist the returned token.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<()> {
        let credentials = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let token = match self.api.login(&credentials).await {
            Ok(token) => token,
            Err(ClientError::Api { status, .. }) => {
                tracing::warn!(username, status, "Admin login rejected");
                return Err(ClientError::Api {
                    status,
                    message: LOGIN_FAILED_MESSAGE.to_string(),
                });
            }
            Err(err) => return Err(err),
        };
        self.store.save(&token.access_token)?;
        tracing::info!(username, "Admin logged in");
        Ok(())
    }

    pub fn logout(&self) -> ClientResult<()> {
        self.store.clear()?;
        tracing::info!("Admin logged out");
        Ok(())
    }

    /// Run an admin call with the stored token. A 401 clears the token
    /// before the error is returned.
    pub async fn authorized<T, F, Fut>(&self, call: F) -> ClientResult<T>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let token = self.token()?;
        match call(token).await {
            Err(err) if err.is_unauthorized() => {
                tracing::warn!("Admin token rejected, clearing session");
                if let Err(clear_err) = self.store.clear() {
                    tracing::error!(error = %clear_err, "Failed to clear rejected token");
                }
                Err(err)
            }
            other => other,
        }
    }

    // ---- blogs ----

    pub async fn blogs(&self) -> ClientResult<Vec<Blog>> {
        self.authorized(|token| async move { self.api.admin_blogs(&token).await })
            .await
    }

    pub async fn blog(&self, slug: &str) -> ClientResult<Blog> {
        self.authorized(|token| async move { self.api.admin_blog(&token, slug).await })
            .await
    }

    pub async fn create_blog(&self, data: &CreateBlog) -> ClientResult<Blog> {
        let blog = self
            .authorized(|token| async move { self.api.create_blog(&token, data).await })
            .await?;
        tracing::info!(id = blog.id, slug = %blog.slug, "Blog created");
        Ok(blog)
    }

    pub async fn update_blog(&self, id: DbId, data: &UpdateBlog) -> ClientResult<Blog> {
        let blog = self
            .authorized(|token| async move { self.api.update_blog(&token, id, data).await })
            .await?;
        tracing::info!(id, slug = %blog.slug, "Blog updated");
        Ok(blog)
    }

    pub async fn delete_blog(&self, id: DbId) -> ClientResult<()> {
        self.authorized(|token| async move { self.api.delete_blog(&token, id).await })
            .await?;
        tracing::info!(id, "Blog deleted");
        Ok(())
    }

    // ---- projects ----

    pub async fn projects(&self) -> ClientResult<Vec<Project>> {
        self.authorized(|token| async move { self.api.admin_projects(&token).await })
            .await
    }

    pub async fn project(&self, slug: &str) -> ClientResult<Project> {
        self.authorized(|token| async move { self.api.admin_project(&token, slug).await })
            .await
    }

    pub async fn create_project(&self, data: &CreateProject) -> ClientResult<Project> {
        let project = self
            .authorized(|token| async move { self.api.create_project(&token, data).await })
            .await?;
        tracing::info!(id = project.id, slug = %project.slug, "Project created");
        Ok(project)
    }

    pub async fn update_project(&self, id: DbId, data: &UpdateProject) -> ClientResult<Project> {
        let project = self
            .authorized(|token| async move { self.api.update_project(&token, id, data).await })
            .await?;
        tracing::info!(id, slug = %project.slug, "Project updated");
        Ok(project)
    }

    pub async fn delete_project(&self, id: DbId) -> ClientResult<()> {
        self.authorized(|token| async move { self.api.delete_project(&token, id).await })
            .await?;
        tracing::info!(id, "Project deleted");
        Ok(())
    }

    // ---- services ----

    pub async fn services(&self) -> ClientResult<Vec<Service>> {
        self.authorized(|token| async move { self.api.admin_services(&token).await })
            .await
    }

    pub async fn service(&self, slug: &str) -> ClientResult<Service> {
        self.authorized(|token| async move { self.api.admin_service(&token, slug).await })
            .await
    }

    pub async fn create_service(&self, data: &CreateService) -> ClientResult<Service> {
        let service = self
            .authorized(|token| async move { self.api.create_service(&token, data).await })
            .await?;
        tracing::info!(id = service.id, slug = %service.slug, "Service created");
        Ok(service)
    }

    pub async fn update_service(&self, id: DbId, data: &UpdateService) -> ClientResult<Service> {
        let service = self
            .authorized(|token| async move { self.api.update_service(&token, id, data).await })
            .await?;
        tracing::info!(id, slug = %service.slug, "Service updated");
        Ok(service)
    }

    pub async fn delete_service(&self, id: DbId) -> ClientResult<()> {
        self.authorized(|token| async move { self.api.delete_service(&token, id).await })
            .await?;
        tracing::info!(id, "Service deleted");
        Ok(())
    }

    // ---- uploads ----

    pub async fn upload_image(
        &self,
        file: &ImageFile,
        meta: &UploadMeta,
    ) -> ClientResult<UploadedAsset> {
        file.validate()?;
        let asset = self
            .authorized(|token| async move { self.api.upload_image(&token, file, meta).await })
            .await?;
        tracing::info!(
            id = asset.id,
            url = %asset.storage_url,
            folder = %meta.folder,
            "Image uploaded"
        );
        Ok(asset)
    }
}
