//! Page loaders: what a detail page does with a slug before rendering.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use folio_core::media::{resolve_content_media, resolve_media_url};
use folio_core::models::{Blog, Project, Service, Tool};
use folio_core::routes::Route;

use crate::api::CmsApi;
use crate::auth::AdminSession;
use crate::error::ClientResult;

pub const PREVIEW_REQUIRES_AUTH_MESSAGE: &str = "Preview requires admin authentication";

/// Result of loading a page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome<T> {
    Render(T),
    /// Leave this page for another route.
    Redirect(Route),
    /// Show an error view with this (non-empty) message.
    Error(String),
}

/// Load a blog post for the detail page.
///
/// Previews go through the admin endpoint so drafts are visible, and need a
/// logged-in session. A missing post sends the reader back to the list.
pub async fn blog_post(
    api: &CmsApi,
    session: Option<&AdminSession>,
    slug: &str,
    preview: bool,
) -> PageOutcome<Blog> {
    let result = if preview {
        match session.filter(|session| session.is_authenticated()) {
            Some(session) => session.blog(slug).await,
            None => return PageOutcome::Error(PREVIEW_REQUIRES_AUTH_MESSAGE.to_string()),
        }
    } else {
        api.blog(slug).await
    };

    match result {
        Ok(mut blog) => {
            resolve_blog_media(&mut blog, api.api_url());
            PageOutcome::Render(blog)
        }
        Err(err) if err.is_not_found() => {
            tracing::info!(slug, "Blog post not found, redirecting to list");
            PageOutcome::Redirect(Route::BlogList)
        }
        Err(err) => PageOutcome::Error(err.user_message()),
    }
}

/// A project with its images and long description media made absolute.
pub async fn project_detail(api: &CmsApi, slug: &str) -> ClientResult<Project> {
    let mut project = api.project(slug).await?;
    let base = api.api_url();
    project.long_description = project
        .long_description
        .map(|html| resolve_content_media(&html, base));
    resolve_image(&mut project.featured_image, base);
    resolve_image(&mut project.thumbnail_image, base);
    Ok(project)
}

/// A service with its images and long description media made absolute.
pub async fn service_detail(api: &CmsApi, slug: &str) -> ClientResult<Service> {
    let mut service = api.service(slug).await?;
    let base = api.api_url();
    service.long_description = service
        .long_description
        .map(|html| resolve_content_media(&html, base));
    resolve_image(&mut service.featured_image, base);
    resolve_image(&mut service.icon, base);
    Ok(service)
}

pub(crate) fn resolve_blog_media(blog: &mut Blog, api_url: &str) {
    blog.content = resolve_content_media(&blog.content, api_url);
    resolve_image(&mut blog.featured_image, api_url);
    resolve_image(&mut blog.thumbnail_image, api_url);
}

/// Blank values stay as they are.
fn resolve_image(url: &mut Option<String>, api_url: &str) {
    if let Some(value) = url.as_mut().filter(|value| !value.trim().is_empty()) {
        *value = resolve_media_url(value, api_url);
    }
}

// ---------------------------------------------------------------------------
// Engagement counters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Counter {
    BlogLikes,
    ToolClicks,
}

/// A like or click counter shown on a detail page.
///
/// Only one increment may be in flight at a time; a second trigger while
/// the first is pending does nothing.
#[derive(Debug)]
pub struct Engagement {
    counter: Counter,
    slug: String,
    count: AtomicI64,
    in_flight: AtomicBool,
}

impl Engagement {
    pub fn likes(blog: &Blog) -> Self {
        Self::new(Counter::BlogLikes, &blog.slug, blog.likes)
    }

    pub fn clicks(tool: &Tool) -> Self {
        Self::new(Counter::ToolClicks, &tool.slug, tool.clicks)
    }

    fn new(counter: Counter, slug: &str, count: i64) -> Self {
        Self {
            counter,
            slug: slug.to_string(),
            count: AtomicI64::new(count),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn count(&self) -> i64 {
        self.count.load(Ordering::SeqCst)
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Increment on the CMS and adopt the count it returns.
    ///
    /// Returns `Ok(None)` when another increment is already in flight.
    pub async fn trigger(&self, api: &CmsApi) -> ClientResult<Option<i64>> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            tracing::debug!(slug = %self.slug, "Increment already in flight");
            return Ok(None);
        }
        let _release = InFlight(&self.in_flight);

        let count = match self.counter {
            Counter::BlogLikes => api.like_blog(&self.slug).await?.likes,
            Counter::ToolClicks => api.track_tool_click(&self.slug).await?.clicks,
        };
        self.count.store(count, Ordering::SeqCst);
        Ok(Some(count))
    }
}

/// Clears the in-flight flag however the call ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
