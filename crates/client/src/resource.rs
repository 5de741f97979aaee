//! Per-screen fetch state.
//!
//! A [`Resource`] owns one fetch function and the `{data, loading, error}`
//! state of the screen that uses it. Loads are triggered by a key change or
//! an explicit refetch. There is no caching, deduplication or retry.
//! Requests are never cancelled; a result that is no longer wanted (the key
//! moved on, a newer load started, or the screen was unmounted) is dropped
//! instead of being written to the state.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::BoxFuture;
use futures::FutureExt;

use folio_core::models::{Blog, Project, Service, Stats, Tool};

use crate::api::CmsApi;
use crate::error::{ClientError, ClientResult};
use crate::pages;
use crate::query::{BlogQuery, ProjectQuery, ServiceQuery, ToolQuery};

type Fetcher<K, T> = Arc<dyn Fn(K) -> BoxFuture<'static, ClientResult<T>> + Send + Sync>;

/// Why the last load failed, reduced to what a screen needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub message: String,
    pub not_found: bool,
}

impl From<&ClientError> for FetchError {
    fn from(err: &ClientError) -> Self {
        Self {
            message: err.user_message(),
            not_found: err.is_not_found(),
        }
    }
}

/// Snapshot of a resource's state.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<FetchError>,
}

impl<T> Default for FetchState<T> {
    /// A freshly mounted screen is loading.
    fn default() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }
}

struct Slot<K, T> {
    key: Option<K>,
    state: FetchState<T>,
    generation: u64,
    mounted: bool,
}

pub struct Resource<K, T> {
    fetcher: Fetcher<K, T>,
    slot: Mutex<Slot<K, T>>,
}

impl<K, T> Resource<K, T>
where
    K: Clone + PartialEq + Send + 'static,
    T: Clone + Send + 'static,
{
    pub fn new<F, Fut>(fetcher: F) -> Self
    where
        F: Fn(K) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ClientResult<T>> + Send + 'static,
    {
        Self {
            fetcher: Arc::new(move |key| fetcher(key).boxed()),
            slot: Mutex::new(Slot {
                key: None,
                state: FetchState::default(),
                generation: 0,
                mounted: true,
            }),
        }
    }

    /// Point the resource at `key`, loading only if the key changed.
    pub async fn set_key(&self, key: K) -> FetchState<T> {
        {
            let slot = self.lock();
            if slot.key.as_ref() == Some(&key) {
                return slot.state.clone();
            }
        }
        self.load(key).await
    }

    /// Reload the current key. Before any key is set this is a no-op.
    pub async fn refetch(&self) -> FetchState<T> {
        let key = self.lock().key.clone();
        match key {
            Some(key) => self.load(key).await,
            None => self.state(),
        }
    }

    pub fn state(&self) -> FetchState<T> {
        self.lock().state.clone()
    }

    /// Stop accepting results. In-flight loads finish but are ignored, and
    /// later `set_key`/`refetch` calls send nothing.
    pub fn unmount(&self) {
        self.lock().mounted = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.lock().mounted
    }

    async fn load(&self, key: K) -> FetchState<T> {
        let generation = {
            let mut slot = self.lock();
            if !slot.mounted {
                return slot.state.clone();
            }
            slot.generation += 1;
            slot.key = Some(key.clone());
            slot.state.loading = true;
            slot.state.error = None;
            slot.generation
        };

        let result = (self.fetcher)(key).await;

        let mut slot = self.lock();
        if !slot.mounted || slot.generation != generation {
            tracing::debug!(generation, current = slot.generation, "Discarding stale fetch result");
            return slot.state.clone();
        }
        match result {
            Ok(data) => slot.state.data = Some(data),
            Err(err) => {
                tracing::warn!(error = %err, "Fetch failed");
                slot.state.error = Some(FetchError::from(&err));
            }
        }
        slot.state.loading = false;
        slot.state.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Slot<K, T>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ---------------------------------------------------------------------------
// Screen resources
// ---------------------------------------------------------------------------

pub fn blogs(api: Arc<CmsApi>) -> Resource<BlogQuery, Vec<Blog>> {
    Resource::new(move |query: BlogQuery| {
        let api = Arc::clone(&api);
        async move { api.blogs(&query).await }
    })
}

/// A published post by slug, with its media made absolute.
pub fn blog(api: Arc<CmsApi>) -> Resource<String, Blog> {
    Resource::new(move |slug: String| {
        let api = Arc::clone(&api);
        async move {
            let mut blog = api.blog(&slug).await?;
            pages::resolve_blog_media(&mut blog, api.api_url());
            Ok(blog)
        }
    })
}

pub fn projects(api: Arc<CmsApi>) -> Resource<ProjectQuery, Vec<Project>> {
    Resource::new(move |query: ProjectQuery| {
        let api = Arc::clone(&api);
        async move { api.projects(&query).await }
    })
}

pub fn project(api: Arc<CmsApi>) -> Resource<String, Project> {
    Resource::new(move |slug: String| {
        let api = Arc::clone(&api);
        async move { pages::project_detail(&api, &slug).await }
    })
}

pub fn services(api: Arc<CmsApi>) -> Resource<ServiceQuery, Vec<Service>> {
    Resource::new(move |query: ServiceQuery| {
        let api = Arc::clone(&api);
        async move { api.services(&query).await }
    })
}

pub fn service(api: Arc<CmsApi>) -> Resource<String, Service> {
    Resource::new(move |slug: String| {
        let api = Arc::clone(&api);
        async move { pages::service_detail(&api, &slug).await }
    })
}

pub fn tools(api: Arc<CmsApi>) -> Resource<ToolQuery, Vec<Tool>> {
    Resource::new(move |query: ToolQuery| {
        let api = Arc::clone(&api);
        async move { api.tools(&query).await }
    })
}

pub fn tool(api: Arc<CmsApi>) -> Resource<String, Tool> {
    Resource::new(move |slug: String| {
        let api = Arc::clone(&api);
        async move { api.tool(&slug).await }
    })
}

pub fn stats(api: Arc<CmsApi>) -> Resource<(), Stats> {
    Resource::new(move |()| {
        let api = Arc::clone(&api);
        async move { api.stats().await }
    })
}
