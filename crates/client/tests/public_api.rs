//! Public read endpoints, error mapping and fetch-state behaviour against
//! the stub CMS.

mod common;

use assert_matches::assert_matches;

use folio_client::query::{BlogQuery, ServiceQuery};
use folio_client::resource;
use folio_client::ClientError;
use folio_core::models::Blog;

// ---------------------------------------------------------------------------
// Wrapper
// ---------------------------------------------------------------------------

/// A 200 with valid JSON comes back as exactly what the CMS sent.
#[tokio::test]
async fn test_success_returns_parsed_body_unchanged() {
    let cms = common::spawn().await;
    let blogs = cms.api().blogs(&BlogQuery::default()).await.unwrap();

    let expected: Vec<Blog> = serde_json::from_value(common::published_blogs()).unwrap();
    assert_eq!(blogs, expected);
    assert_eq!(cms.hits("GET /api/blogs"), 1);
}

/// A non-2xx becomes an `Api` error carrying the body's message.
#[tokio::test]
async fn test_non_2xx_is_an_error_with_message() {
    let cms = common::spawn().await;
    let err = cms.api().blog("nope").await.unwrap_err();

    assert_matches!(&err, ClientError::Api { status: 404, message } if message == "Blog not found");
    assert!(err.is_not_found());
    assert!(!err.user_message().is_empty());
}

/// A 2xx whose body is not JSON is a decode error, not a panic.
#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let cms = common::spawn().await;
    assert_matches!(cms.api().tags().await, Err(ClientError::Decode(_)));
}

/// Categories tolerate a missing description and offset-less timestamps.
#[tokio::test]
async fn test_categories_are_listed() {
    let cms = common::spawn().await;
    let categories = cms.api().categories().await.unwrap();

    let slugs: Vec<&str> = categories.iter().map(|c| c.slug.as_str()).collect();
    assert_eq!(slugs, ["rust", "web"]);
    assert_eq!(categories[0].description.as_deref(), Some("Systems posts"));
    assert!(categories[0].created_at.is_some());
    assert_eq!(categories[1].description, None);
    assert_eq!(categories[1].created_at, None);
    assert_eq!(cms.hits("GET /api/categories"), 1);
}

/// An unreachable host is a transport error.
#[tokio::test]
async fn test_unreachable_host_is_request_error() {
    let api = folio_client::CmsApi::new("http://127.0.0.1:9");
    let err = api.stats().await.unwrap_err();
    assert_matches!(err, ClientError::Request(_));
    assert!(!err.user_message().is_empty());
}

/// Unset query fields are omitted; service lists default to active only.
#[tokio::test]
async fn test_query_parameters() {
    let cms = common::spawn().await;
    let api = cms.api();

    api.blogs(&BlogQuery::default()).await.unwrap();
    api.blogs(&BlogQuery {
        limit: Some(3),
        search: Some("rust".into()),
        ..Default::default()
    })
    .await
    .unwrap();
    api.services(&ServiceQuery::default()).await.unwrap();

    assert_eq!(
        cms.requests(),
        vec![
            "GET /api/blogs".to_string(),
            "GET /api/blogs?limit=3&search=rust".to_string(),
            "GET /api/services?active_only=true".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_stats() {
    let cms = common::spawn().await;
    let stats = cms.api().stats().await.unwrap();
    assert_eq!(stats.total_views, 52);
    assert_eq!(stats.services, 2);
}

// ---------------------------------------------------------------------------
// Screen resources
// ---------------------------------------------------------------------------

/// A failed load leaves the screen in an error state with a message.
#[tokio::test]
async fn test_resource_error_state() {
    let cms = common::spawn().await;
    let blog = resource::blog(cms.api());

    let state = blog.set_key("exploding".to_string()).await;
    assert!(!state.loading);
    assert!(state.data.is_none());
    let error = state.error.unwrap();
    assert_eq!(error.message, "Database unavailable");
    assert!(!error.not_found);
}

/// The blog resource resolves relative upload paths in the content.
#[tokio::test]
async fn test_blog_resource_resolves_media() {
    let cms = common::spawn().await;
    let blog = resource::blog(cms.api());

    let state = blog.set_key("hello-world".to_string()).await;
    let content = state.data.unwrap().content;
    assert!(content.contains(&format!("src=\"{}/uploads/blogs/a.png\"", cms.base_url)));
}

/// Same key twice is one request; refetch is another.
#[tokio::test]
async fn test_resource_loads_per_key_change() {
    let cms = common::spawn().await;
    let services = resource::services(cms.api());

    services.set_key(ServiceQuery::default()).await;
    services.set_key(ServiceQuery::default()).await;
    assert_eq!(cms.hits("GET /api/services"), 1);

    let state = services.refetch().await;
    assert_eq!(cms.hits("GET /api/services"), 2);
    assert_eq!(state.data.unwrap().len(), 2);
}

/// Project and service resources resolve media in the long description.
#[tokio::test]
async fn test_detail_resources_resolve_long_description() {
    let cms = common::spawn().await;

    let project = resource::project(cms.api()).set_key("folio".into()).await.data.unwrap();
    assert_eq!(
        project.long_description.unwrap(),
        format!("<img src='{}/uploads/projects/shot.png'>", cms.base_url)
    );

    let service = resource::service(cms.api()).set_key("rust-audit".into()).await.data.unwrap();
    assert!(service.long_description.unwrap().contains(&cms.base_url));
}
