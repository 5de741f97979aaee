//! Admin dashboard data: the lists behind the overview and content tabs.

use folio_core::models::{Blog, Project, Service, Stats};
use folio_core::types::DbId;

use crate::auth::AdminSession;
use crate::error::{ClientError, ClientResult};

pub const LOAD_FAILED_MESSAGE: &str =
    "Failed to load data. Please check your connection or try again.";

/// Everything the admin lists show, drafts and inactive entries included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminOverview {
    pub services: Vec<Service>,
    pub blogs: Vec<Blog>,
    pub projects: Vec<Project>,
}

impl AdminOverview {
    /// Load services, blogs and projects concurrently. Any failure fails
    /// the whole load.
    pub async fn load(session: &AdminSession) -> ClientResult<Self> {
        let (services, blogs, projects) =
            tokio::try_join!(session.services(), session.blogs(), session.projects())?;
        tracing::debug!(
            services = services.len(),
            blogs = blogs.len(),
            projects = projects.len(),
            "Admin overview loaded"
        );
        Ok(Self {
            services,
            blogs,
            projects,
        })
    }

    /// Counts derived from the loaded lists.
    pub fn summary(&self) -> OverviewSummary {
        OverviewSummary {
            blogs: self.blogs.len(),
            published_blogs: self.blogs.iter().filter(|b| b.published).count(),
            projects: self.projects.len(),
            published_projects: self.projects.iter().filter(|p| p.published).count(),
            services: self.services.len(),
            active_services: self.services.iter().filter(|s| s.active).count(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverviewSummary {
    pub blogs: usize,
    pub published_blogs: usize,
    pub projects: usize,
    pub published_projects: usize,
    pub services: usize,
    pub active_services: usize,
}

/// What can be deleted from the admin lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentRef {
    Blog(DbId),
    Project(DbId),
    Service(DbId),
}

/// Admin dashboard state: the loaded lists plus the banner error.
pub struct Dashboard {
    session: AdminSession,
    overview: AdminOverview,
    stats: Option<Stats>,
    error: Option<String>,
}

impl Dashboard {
    pub fn new(session: AdminSession) -> Self {
        Self {
            session,
            overview: AdminOverview::default(),
            stats: None,
            error: None,
        }
    }

    pub fn overview(&self) -> &AdminOverview {
        &self.overview
    }

    pub fn stats(&self) -> Option<&Stats> {
        self.stats.as_ref()
    }

    /// Banner message from the last failed refresh.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Reload the lists and the site stats.
    ///
    /// Without a token nothing is requested. On failure the previous lists
    /// stay and the banner shows [`LOAD_FAILED_MESSAGE`].
    pub async fn refresh(&mut self) -> ClientResult<()> {
        if !self.session.is_authenticated() {
            return Err(ClientError::NotAuthenticated);
        }
        match AdminOverview::load(&self.session).await {
            Ok(overview) => {
                self.overview = overview;
                self.error = None;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to load admin data");
                self.error = Some(LOAD_FAILED_MESSAGE.to_string());
                return Err(err);
            }
        }
        match self.session.api().stats().await {
            Ok(stats) => self.stats = Some(stats),
            Err(err) => tracing::warn!(error = %err, "Failed to load stats"),
        }
        Ok(())
    }

    /// Delete an entry, then reload the lists.
    ///
    /// Once the CMS confirms the delete this succeeds; a failed reload only
    /// sets the banner.
    pub async fn delete(&mut self, target: ContentRef) -> ClientResult<()> {
        match target {
            ContentRef::Blog(id) => self.session.delete_blog(id).await?,
            ContentRef::Project(id) => self.session.delete_project(id).await?,
            ContentRef::Service(id) => self.session.delete_service(id).await?,
        }
        if let Err(err) = self.refresh().await {
            tracing::warn!(error = %err, ?target, "Reload after delete failed");
        }
        Ok(())
    }
}
