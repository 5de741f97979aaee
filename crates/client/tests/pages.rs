//! Detail page loaders and engagement counters.

mod common;

use assert_matches::assert_matches;

use folio_client::pages::{self, Engagement, PageOutcome, PREVIEW_REQUIRES_AUTH_MESSAGE};
use folio_client::query::ToolQuery;
use folio_core::routes::Route;

/// A missing post sends the reader back to the blog list.
#[tokio::test]
async fn test_missing_blog_redirects_to_list() {
    let cms = common::spawn().await;
    let outcome = pages::blog_post(&cms.api(), None, "my-post", false).await;

    assert_eq!(outcome, PageOutcome::Redirect(Route::BlogList));
    assert_eq!(cms.hits("GET /api/blogs/my-post"), 1);
}

/// Other failures show an error view with a non-empty message.
#[tokio::test]
async fn test_server_error_shows_error_view() {
    let cms = common::spawn().await;
    let outcome = pages::blog_post(&cms.api(), None, "exploding", false).await;
    assert_matches!(outcome, PageOutcome::Error(message) if message == "Database unavailable");
}

#[tokio::test]
async fn test_published_post_renders_with_resolved_media() {
    let cms = common::spawn().await;
    let outcome = pages::blog_post(&cms.api(), None, "hello-world", false).await;

    let PageOutcome::Render(blog) = outcome else {
        panic!("expected the post to render, got {outcome:?}");
    };
    assert!(blog.content.contains(&format!("{}/uploads/blogs/a.png", cms.base_url)));
}

/// Relative image fields point at the CMS host; absolute ones are untouched.
#[tokio::test]
async fn test_detail_pages_resolve_image_fields() {
    let cms = common::spawn().await;
    let api = cms.api();

    let PageOutcome::Render(blog) = pages::blog_post(&api, None, "hello-world", false).await else {
        panic!("expected the post to render");
    };
    assert_eq!(
        blog.featured_image.as_deref(),
        Some(format!("{}/uploads/blogs/cover.png", cms.base_url).as_str())
    );
    assert_eq!(blog.thumbnail_image.as_deref(), Some("https://cdn.example.com/thumb.png"));

    let project = pages::project_detail(&api, "folio").await.unwrap();
    assert_eq!(
        project.featured_image,
        Some(format!("{}/uploads/projects/cover.png", cms.base_url))
    );
    assert_eq!(project.thumbnail_image, None);

    let service = pages::service_detail(&api, "rust-audit").await.unwrap();
    assert_eq!(service.icon, Some(format!("{}/uploads/services/icon.png", cms.base_url)));
}

/// Preview without a session fails before any request is made.
#[tokio::test]
async fn test_preview_requires_admin() {
    let cms = common::spawn().await;
    let (session, _) = cms.session(None);

    let outcome = pages::blog_post(&cms.api(), Some(&session), "draft-post", true).await;
    assert_eq!(outcome, PageOutcome::Error(PREVIEW_REQUIRES_AUTH_MESSAGE.to_string()));

    let outcome = pages::blog_post(&cms.api(), None, "draft-post", true).await;
    assert_eq!(outcome, PageOutcome::Error(PREVIEW_REQUIRES_AUTH_MESSAGE.to_string()));
    assert_eq!(cms.total_hits(), 0);
}

/// Preview reads drafts through the admin endpoint.
#[tokio::test]
async fn test_preview_uses_admin_endpoint() {
    let cms = common::spawn().await;
    let (session, _) = cms.session(Some(common::ADMIN_TOKEN));

    let outcome = pages::blog_post(&cms.api(), Some(&session), "draft-post", true).await;
    assert_matches!(outcome, PageOutcome::Render(blog) if !blog.published);
    assert_eq!(cms.hits("GET /api/admin/blogs/draft-post"), 1);
    assert_eq!(cms.hits("GET /api/blogs/draft-post"), 0);
}

/// A second like while the first is in flight is ignored.
#[tokio::test]
async fn test_like_is_guarded_against_reentry() {
    let cms = common::spawn().await;
    let api = cms.api();
    let PageOutcome::Render(blog) = pages::blog_post(&api, None, "hello-world", false).await else {
        panic!("expected the post to render");
    };
    let likes = Engagement::likes(&blog);
    assert_eq!(likes.count(), 3);

    let (first, second) = tokio::join!(likes.trigger(&api), likes.trigger(&api));
    assert_eq!(first.unwrap(), Some(4));
    assert_eq!(second.unwrap(), None);
    assert_eq!(likes.count(), 4);
    assert!(!likes.is_in_flight());
    assert_eq!(cms.hits("POST /api/blogs/hello-world/like"), 1);

    assert_eq!(likes.trigger(&api).await.unwrap(), Some(5));
}

#[tokio::test]
async fn test_tool_click_updates_counter() {
    let cms = common::spawn().await;
    let api = cms.api();
    let tools = api.tools(&ToolQuery::default()).await.unwrap();
    let clicks = Engagement::clicks(&tools[0]);

    assert_eq!(clicks.trigger(&api).await.unwrap(), Some(11));
    assert_eq!(clicks.count(), 11);
    assert_eq!(tools[0].primary_link(), Some("https://radar.example.com"));
    assert_eq!(cms.requests()[0], "GET /api/tools?active_only=true");
}
