//! Blog, project and service commands, public and admin.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context as _};
use serde::Serialize;

use folio_client::admin::{ContentRef, Dashboard};
use folio_client::editor::{
    self, BlogDraft, ContentDraft, ContentKind, PendingImages, Preview, ProjectDraft, ServiceDraft,
};
use folio_client::pages::{self, Engagement, PageOutcome};
use folio_client::query::{BlogQuery, ProjectQuery, ServiceQuery};
use folio_client::resource::{self, Resource};
use folio_client::upload::ImageFile;

use super::Context;
use crate::cli::{
    BlogAction, BlogFields, ImageArgs, ProjectAction, ProjectFields, SaveArgs, ServiceAction,
    ServiceFields,
};
use crate::render;

// ---------------------------------------------------------------------------
// Blogs
// ---------------------------------------------------------------------------

pub(super) async fn blogs(ctx: &Context, action: BlogAction) -> anyhow::Result<()> {
    match action {
        BlogAction::List {
            search,
            limit,
            featured,
            all,
        } => {
            let blogs = if all {
                ctx.session.blogs().await?
            } else {
                let query = BlogQuery {
                    search,
                    limit,
                    featured: featured.then_some(true),
                    ..Default::default()
                };
                load(resource::blogs(Arc::clone(&ctx.api)), query).await?
            };
            ctx.emit_list(&blogs, render::blog_line)
        }
        BlogAction::Show { slug, preview } => {
            match pages::blog_post(&ctx.api, Some(&ctx.session), &slug, preview).await {
                PageOutcome::Render(blog) => ctx.emit(&blog, render::blog_detail),
                PageOutcome::Redirect(route) => {
                    eprintln!(
                        "Blog post '{slug}' not found; showing {}",
                        route.url(&ctx.config.site_url)
                    );
                    let list = resource::blogs(Arc::clone(&ctx.api));
                    let blogs = load(list, BlogQuery::default()).await?;
                    ctx.emit_list(&blogs, render::blog_line)
                }
                PageOutcome::Error(message) => bail!(message),
            }
        }
        BlogAction::Like { slug } => {
            let blog = match pages::blog_post(&ctx.api, None, &slug, false).await {
                PageOutcome::Render(blog) => blog,
                PageOutcome::Redirect(_) => bail!("Blog not found"),
                PageOutcome::Error(message) => bail!(message),
            };
            let likes = Engagement::likes(&blog);
            if let Some(count) = likes.trigger(&ctx.api).await? {
                println!("{} now has {count} likes", blog.title);
            }
            Ok(())
        }
        BlogAction::New {
            fields,
            images,
            save,
        } => {
            let mut draft = BlogDraft::new();
            apply_blog_fields(&mut draft, fields).await?;
            attach_images(&mut draft.images, images).await?;
            finish(ctx, &mut draft, save).await
        }
        BlogAction::Edit {
            slug,
            fields,
            images,
            save,
        } => {
            let blog = ctx.session.blog(&slug).await?;
            let mut draft = BlogDraft::edit(&blog);
            apply_blog_fields(&mut draft, fields).await?;
            attach_images(&mut draft.images, images).await?;
            finish(ctx, &mut draft, save).await
        }
        BlogAction::Delete { id } => delete(ctx, ContentRef::Blog(id)).await,
    }
}

async fn apply_blog_fields(draft: &mut BlogDraft, fields: BlogFields) -> anyhow::Result<()> {
    set(&mut draft.title, fields.title);
    set(&mut draft.excerpt, fields.excerpt);
    if let Some(path) = fields.content_file {
        draft.content = read_text(&path).await?;
    }
    set(&mut draft.author, fields.author);
    set(&mut draft.meta_title, fields.meta_title);
    set(&mut draft.meta_description, fields.meta_description);
    set(&mut draft.meta_keywords, fields.meta_keywords);
    set(&mut draft.featured, fields.featured);
    if fields.read_time.is_some() {
        draft.read_time = fields.read_time;
    }
    if fields.category_id.is_some() {
        draft.category_id = fields.category_id;
    }
    if !fields.tag_ids.is_empty() {
        draft.tag_ids = fields.tag_ids;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

pub(super) async fn projects(ctx: &Context, action: ProjectAction) -> anyhow::Result<()> {
    match action {
        ProjectAction::List {
            status,
            limit,
            featured,
            all,
        } => {
            let projects = if all {
                ctx.session.projects().await?
            } else {
                let query = ProjectQuery {
                    status,
                    limit,
                    featured: featured.then_some(true),
                    ..Default::default()
                };
                load(resource::projects(Arc::clone(&ctx.api)), query).await?
            };
            ctx.emit_list(&projects, render::project_line)
        }
        ProjectAction::Show { slug } => {
            let project = load(resource::project(Arc::clone(&ctx.api)), slug).await?;
            ctx.emit(&project, render::project_detail)
        }
        ProjectAction::New {
            fields,
            images,
            save,
        } => {
            let mut draft = ProjectDraft::new();
            apply_project_fields(&mut draft, fields).await?;
            attach_images(&mut draft.images, images).await?;
            finish(ctx, &mut draft, save).await
        }
        ProjectAction::Edit {
            slug,
            fields,
            images,
            save,
        } => {
            let project = ctx.session.project(&slug).await?;
            let mut draft = ProjectDraft::edit(&project)?;
            apply_project_fields(&mut draft, fields).await?;
            attach_images(&mut draft.images, images).await?;
            finish(ctx, &mut draft, save).await
        }
        ProjectAction::Delete { id } => delete(ctx, ContentRef::Project(id)).await,
    }
}

async fn apply_project_fields(
    draft: &mut ProjectDraft,
    fields: ProjectFields,
) -> anyhow::Result<()> {
    set(&mut draft.title, fields.title);
    set(&mut draft.description, fields.description);
    if let Some(path) = fields.long_description_file {
        draft.long_description = read_text(&path).await?;
    }
    set(&mut draft.demo_url, fields.demo_url);
    set(&mut draft.github_url, fields.github_url);
    set(&mut draft.live_url, fields.live_url);
    set(&mut draft.demo_video_url, fields.demo_video_url);
    set(&mut draft.client, fields.client);
    set(&mut draft.duration, fields.duration);
    set(&mut draft.status, fields.status);
    set(&mut draft.featured, fields.featured);
    if fields.team_size.is_some() {
        draft.team_size = fields.team_size;
    }
    if fields.category_id.is_some() {
        draft.category_id = fields.category_id;
    }
    if !fields.tag_ids.is_empty() {
        draft.tag_ids = fields.tag_ids;
    }
    for tech in &fields.remove_tech {
        draft.tech_stack.remove(tech);
    }
    for tech in &fields.add_tech {
        draft.tech_stack.add(tech);
    }
    for url in &fields.remove_gallery {
        draft.gallery_images.remove(url);
    }
    for url in &fields.add_gallery {
        draft.gallery_images.add(url);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

pub(super) async fn services(ctx: &Context, action: ServiceAction) -> anyhow::Result<()> {
    match action {
        ServiceAction::List { featured, all } => {
            let services = if all {
                ctx.session.services().await?
            } else {
                let query = ServiceQuery {
                    featured: featured.then_some(true),
                    ..Default::default()
                };
                load(resource::services(Arc::clone(&ctx.api)), query).await?
            };
            ctx.emit_list(&services, render::service_line)
        }
        ServiceAction::Show { slug } => {
            let service = load(resource::service(Arc::clone(&ctx.api)), slug).await?;
            ctx.emit(&service, render::service_detail)
        }
        ServiceAction::New {
            fields,
            images,
            save,
        } => {
            let mut draft = ServiceDraft::new();
            apply_service_fields(&mut draft, fields).await?;
            attach_images(&mut draft.images, images).await?;
            finish(ctx, &mut draft, save).await
        }
        ServiceAction::Edit {
            slug,
            fields,
            images,
            save,
        } => {
            let service = ctx.session.service(&slug).await?;
            let mut draft = ServiceDraft::edit(&service)?;
            apply_service_fields(&mut draft, fields).await?;
            attach_images(&mut draft.images, images).await?;
            finish(ctx, &mut draft, save).await
        }
        ServiceAction::Delete { id } => delete(ctx, ContentRef::Service(id)).await,
    }
}

async fn apply_service_fields(
    draft: &mut ServiceDraft,
    fields: ServiceFields,
) -> anyhow::Result<()> {
    set(&mut draft.title, fields.title);
    set(&mut draft.description, fields.description);
    if let Some(path) = fields.long_description_file {
        draft.long_description = read_text(&path).await?;
    }
    if fields.price.is_some() {
        draft.price = fields.price;
    }
    set(&mut draft.price_range, fields.price_range);
    set(&mut draft.currency, fields.currency);
    set(&mut draft.pricing_model, fields.pricing_model);
    set(&mut draft.duration, fields.duration);
    set(&mut draft.active, fields.active);
    set(&mut draft.featured, fields.featured);
    set(&mut draft.order, fields.order);
    for feature in &fields.remove_feature {
        draft.features.remove(feature);
    }
    for feature in &fields.add_feature {
        draft.features.add(feature);
    }
    for item in &fields.remove_deliverable {
        draft.deliverables.remove(item);
    }
    for item in &fields.add_deliverable {
        draft.deliverables.add(item);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

/// Load a screen resource once, turning its error state into an error.
async fn load<K, T>(resource: Resource<K, T>, key: K) -> anyhow::Result<T>
where
    K: Clone + PartialEq + Send + 'static,
    T: Clone + Send + 'static,
{
    let state = resource.set_key(key).await;
    if let Some(error) = state.error {
        bail!(error.message);
    }
    state.data.context("No data returned")
}

fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

async fn read_text(path: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

async fn attach_images(pending: &mut PendingImages, images: ImageArgs) -> anyhow::Result<()> {
    if let Some(path) = images.featured_image {
        pending.featured = Some(ImageFile::from_path(&path).await?);
    }
    if let Some(path) = images.secondary_image {
        pending.secondary = Some(ImageFile::from_path(&path).await?);
    }
    Ok(())
}

/// Save or preview a draft, then return to the list like the admin screen.
async fn finish<D>(ctx: &Context, draft: &mut D, save: SaveArgs) -> anyhow::Result<()>
where
    D: ContentDraft,
    D::Record: Serialize,
{
    if save.preview {
        match editor::preview(&ctx.session, draft, &ctx.config.site_url).await? {
            Preview::Url(url) => println!("Preview: {url}"),
            Preview::Document { title, html } => {
                let path = save.preview_out.unwrap_or_else(|| preview_path(&title));
                tokio::fs::write(&path, html)
                    .await
                    .with_context(|| format!("Failed to write preview to {}", path.display()))?;
                println!("Preview written to {}", path.display());
            }
        }
        return Ok(());
    }

    let outcome = editor::save(&ctx.session, draft, save.publish).await?;
    if ctx.json {
        println!("{}", render::json(&outcome.record)?);
        return Ok(());
    }
    println!("{}", outcome.message);
    tokio::time::sleep(outcome.return_after).await;
    show_admin_list(ctx, D::KIND).await
}

async fn show_admin_list(ctx: &Context, kind: ContentKind) -> anyhow::Result<()> {
    match kind {
        ContentKind::Blog => ctx.emit_list(&ctx.session.blogs().await?, render::blog_line),
        ContentKind::Project => ctx.emit_list(&ctx.session.projects().await?, render::project_line),
        ContentKind::Service => ctx.emit_list(&ctx.session.services().await?, render::service_line),
    }
}

async fn delete(ctx: &Context, target: ContentRef) -> anyhow::Result<()> {
    let mut dashboard = Dashboard::new(ctx.session.clone());
    dashboard.delete(target).await?;
    println!("Deleted.");
    if let Some(banner) = dashboard.error() {
        eprintln!("{banner}");
        return Ok(());
    }
    let kind = match target {
        ContentRef::Blog(_) => ContentKind::Blog,
        ContentRef::Project(_) => ContentKind::Project,
        ContentRef::Service(_) => ContentKind::Service,
    };
    let overview = dashboard.overview();
    match kind {
        ContentKind::Blog => ctx.emit_list(&overview.blogs, render::blog_line),
        ContentKind::Project => ctx.emit_list(&overview.projects, render::project_line),
        ContentKind::Service => ctx.emit_list(&overview.services, render::service_line),
    }
}

fn preview_path(title: &str) -> PathBuf {
    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let stem = match stem.trim_matches('-') {
        "" => "untitled",
        stem => stem,
    };
    std::env::temp_dir().join(format!("folio-preview-{stem}.html"))
}
