//! Admin edit-and-publish workflow.
//!
//! A draft holds the form values of one blog post, project or service.
//! Saving uploads any newly picked images first, one after another, then
//! issues a single create or update with the resulting URLs. Previewing
//! does the same save and returns what should be opened instead of a
//! confirmation.

mod blog;
mod project;
mod service;

use std::time::Duration;

use futures::future::BoxFuture;

use folio_core::error::CoreError;
use folio_core::models::UploadMeta;
use folio_core::types::DbId;

use crate::auth::AdminSession;
use crate::error::ClientResult;
use crate::upload::ImageFile;

pub use blog::BlogDraft;
pub use project::ProjectDraft;
pub use service::ServiceDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Blog,
    Project,
    Service,
}

impl ContentKind {
    pub fn label(self) -> &'static str {
        match self {
            ContentKind::Blog => "Blog",
            ContentKind::Project => "Project",
            ContentKind::Service => "Service",
        }
    }

    /// How long the success message stays up before the list view returns.
    pub fn return_delay(self) -> Duration {
        match self {
            ContentKind::Blog => Duration::from_millis(1200),
            ContentKind::Project | ContentKind::Service => Duration::from_millis(1500),
        }
    }
}

/// Upload settings for one image field of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSlot {
    pub folder: &'static str,
    pub used_in: &'static str,
    /// Appended to the title to form the alt text.
    pub alt_suffix: Option<&'static str>,
}

impl ImageSlot {
    pub fn meta(&self, title: &str, used_in_id: Option<DbId>) -> UploadMeta {
        let alt_text = match self.alt_suffix {
            Some(suffix) => format!("{title} {suffix}"),
            None => title.to_string(),
        };
        UploadMeta {
            folder: self.folder.to_string(),
            used_in: Some(self.used_in.to_string()),
            used_in_id,
            alt_text: Some(alt_text),
        }
    }
}

/// Images picked in the form and not yet uploaded. The second slot is the
/// thumbnail (blogs, projects) or the icon (services).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingImages {
    pub featured: Option<ImageFile>,
    pub secondary: Option<ImageFile>,
}

/// Image URLs that go into the saved record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageUrls {
    pub featured: Option<String>,
    pub secondary: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// Regular save. `publish` forces the record live.
    Submit { publish: bool },
    /// Save for preview.
    Preview,
}

/// What a preview opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// A page of the public site.
    Url(String),
    /// A standalone HTML document.
    Document { title: String, html: String },
}

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome<R> {
    pub record: R,
    pub message: String,
    /// Delay before returning to the list view.
    pub return_after: Duration,
}

/// Form state for one kind of content.
pub trait ContentDraft: Send + Sync {
    type Record: Send;

    const KIND: ContentKind;

    /// Featured slot first, then the secondary slot.
    const SLOTS: [ImageSlot; 2];

    /// Id of the record being edited; `None` for a new one.
    fn id(&self) -> Option<DbId>;

    fn title(&self) -> &str;

    /// Required-field checks run before any upload.
    fn validate(&self) -> Result<(), CoreError>;

    fn pending_images(&self) -> &PendingImages;

    /// URLs the record has now, used for slots with no new file.
    fn current_images(&self) -> ImageUrls;

    /// Issue the create or update call.
    fn persist<'a>(
        &'a self,
        session: &'a AdminSession,
        images: ImageUrls,
        mode: SaveMode,
    ) -> BoxFuture<'a, ClientResult<Self::Record>>;

    /// Point the draft at the saved record so the next save updates it.
    fn adopt(&mut self, record: &Self::Record);

    fn preview_of(record: &Self::Record, site_url: &str, api_url: &str) -> Preview;
}

/// Save a draft: uploads, then one create/update call.
///
/// On failure nothing about the draft changes, so the form stays as the
/// admin left it.
pub async fn save<D: ContentDraft>(
    session: &AdminSession,
    draft: &mut D,
    publish_on_save: bool,
) -> ClientResult<SaveOutcome<D::Record>> {
    draft.validate()?;
    let verb = if draft.id().is_some() { "updated" } else { "created" };

    let images = upload_images(session, draft).await?;
    let record = draft
        .persist(
            session,
            images,
            SaveMode::Submit {
                publish: publish_on_save,
            },
        )
        .await?;
    draft.adopt(&record);

    Ok(SaveOutcome {
        record,
        message: format!("{} {verb} successfully!", D::KIND.label()),
        return_after: D::KIND.return_delay(),
    })
}

/// Save a draft for preview and return what to open.
pub async fn preview<D: ContentDraft>(
    session: &AdminSession,
    draft: &mut D,
    site_url: &str,
) -> ClientResult<Preview> {
    draft.validate()?;
    let images = upload_images(session, draft).await?;
    let record = draft.persist(session, images, SaveMode::Preview).await?;
    draft.adopt(&record);
    Ok(D::preview_of(&record, site_url, session.api().api_url()))
}

/// Upload new images in slot order, one at a time.
async fn upload_images<D: ContentDraft>(
    session: &AdminSession,
    draft: &D,
) -> ClientResult<ImageUrls> {
    let current = draft.current_images();
    let pending = draft.pending_images();
    let [featured_slot, secondary_slot] = D::SLOTS;

    let featured = match &pending.featured {
        Some(file) => {
            let meta = featured_slot.meta(draft.title(), draft.id());
            Some(session.upload_image(file, &meta).await?.storage_url)
        }
        None => current.featured,
    };
    let secondary = match &pending.secondary {
        Some(file) => {
            let meta = secondary_slot.meta(draft.title(), draft.id());
            Some(session.upload_image(file, &meta).await?.storage_url)
        }
        None => current.secondary,
    };

    Ok(ImageUrls {
        featured,
        secondary,
    })
}

/// Standalone page for previewing a project or service.
fn preview_document(title: &str, body_html: &str, api_url: &str) -> Preview {
    let body = folio_core::media::resolve_content_media(body_html, api_url);
    let escaped = escape_html(title);
    Preview::Document {
        title: title.to_string(),
        html: format!(
            concat!(
                "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n",
                "<title>{escaped}</title>\n</head>\n<body>\n",
                "<h1>{escaped}</h1>\n<div>{body}</div>\n</body>\n</html>\n",
            ),
            escaped = escaped,
            body = body,
        ),
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn blank_to_none(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn require(value: &str, message: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(message.to_string()));
    }
    Ok(())
}
