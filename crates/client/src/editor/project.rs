use futures::future::BoxFuture;
use futures::FutureExt;

use folio_core::error::CoreError;
use folio_core::json_list::StringList;
use folio_core::models::project::DEFAULT_PROJECT_STATUS;
use folio_core::models::{CreateProject, Project, UpdateProject};
use folio_core::types::DbId;

use super::{
    blank_to_none, preview_document, require, ContentDraft, ContentKind, ImageSlot, ImageUrls,
    PendingImages, Preview, SaveMode,
};
use crate::auth::AdminSession;
use crate::error::ClientResult;

/// Form values for a portfolio project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub id: Option<DbId>,
    pub title: String,
    pub description: String,
    /// HTML body.
    pub long_description: String,
    pub featured_image: Option<String>,
    pub thumbnail_image: Option<String>,
    pub demo_video_url: String,
    pub gallery_images: StringList,
    pub demo_url: String,
    pub github_url: String,
    pub live_url: String,
    pub tech_stack: StringList,
    pub client: String,
    pub duration: String,
    pub team_size: Option<i32>,
    pub status: String,
    pub published: bool,
    pub featured: bool,
    pub category_id: Option<DbId>,
    pub tag_ids: Vec<DbId>,
    pub images: PendingImages,
}

impl Default for ProjectDraft {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            description: String::new(),
            long_description: String::new(),
            featured_image: None,
            thumbnail_image: None,
            demo_video_url: String::new(),
            gallery_images: StringList::new(),
            demo_url: String::new(),
            github_url: String::new(),
            live_url: String::new(),
            tech_stack: StringList::new(),
            client: String::new(),
            duration: String::new(),
            team_size: None,
            status: DEFAULT_PROJECT_STATUS.to_string(),
            published: false,
            featured: false,
            category_id: None,
            tag_ids: Vec::new(),
            images: PendingImages::default(),
        }
    }
}

impl ProjectDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing an existing project. Fails if a list field holds
    /// something other than a JSON array.
    pub fn edit(project: &Project) -> Result<Self, CoreError> {
        Ok(Self {
            id: Some(project.id),
            title: project.title.clone(),
            description: project.description.clone(),
            long_description: project.long_description.clone().unwrap_or_default(),
            featured_image: project.featured_image.clone(),
            thumbnail_image: project.thumbnail_image.clone(),
            demo_video_url: project.demo_video_url.clone().unwrap_or_default(),
            gallery_images: StringList::from_json(
                "gallery_images",
                project.gallery_images.as_deref(),
            )?,
            demo_url: project.demo_url.clone().unwrap_or_default(),
            github_url: project.github_url.clone().unwrap_or_default(),
            live_url: project.live_url.clone().unwrap_or_default(),
            tech_stack: StringList::from_json("tech_stack", project.tech_stack.as_deref())?,
            client: project.client.clone().unwrap_or_default(),
            duration: project.duration.clone().unwrap_or_default(),
            team_size: project.team_size,
            status: project.status.clone(),
            published: project.published,
            featured: project.featured,
            category_id: project.category_id,
            tag_ids: Vec::new(),
            images: PendingImages::default(),
        })
    }

    fn published_for(&self, mode: SaveMode) -> bool {
        match mode {
            SaveMode::Submit { publish } => publish || self.published,
            SaveMode::Preview => self.published,
        }
    }

    fn status(&self) -> String {
        blank_to_none(&self.status).unwrap_or_else(|| DEFAULT_PROJECT_STATUS.to_string())
    }

    pub fn to_create(&self, images: ImageUrls, mode: SaveMode) -> CreateProject {
        CreateProject {
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            long_description: blank_to_none(&self.long_description),
            featured_image: images.featured,
            thumbnail_image: images.secondary,
            demo_video_url: blank_to_none(&self.demo_video_url),
            gallery_images: Some(self.gallery_images.to_json()),
            demo_url: blank_to_none(&self.demo_url),
            github_url: blank_to_none(&self.github_url),
            live_url: blank_to_none(&self.live_url),
            tech_stack: Some(self.tech_stack.to_json()),
            client: blank_to_none(&self.client),
            duration: blank_to_none(&self.duration),
            team_size: self.team_size,
            published: self.published_for(mode),
            featured: self.featured,
            status: Some(self.status()),
            category_id: self.category_id,
            tag_ids: (!self.tag_ids.is_empty()).then(|| self.tag_ids.clone()),
        }
    }

    pub fn to_update(&self, images: ImageUrls, mode: SaveMode) -> UpdateProject {
        UpdateProject {
            title: Some(self.title.trim().to_string()),
            description: Some(self.description.clone()),
            long_description: Some(self.long_description.clone()),
            featured_image: images.featured,
            thumbnail_image: images.secondary,
            demo_video_url: Some(self.demo_video_url.clone()),
            gallery_images: Some(self.gallery_images.to_json()),
            demo_url: Some(self.demo_url.clone()),
            github_url: Some(self.github_url.clone()),
            live_url: Some(self.live_url.clone()),
            tech_stack: Some(self.tech_stack.to_json()),
            client: Some(self.client.clone()),
            duration: Some(self.duration.clone()),
            team_size: self.team_size,
            published: Some(self.published_for(mode)),
            featured: Some(self.featured),
            status: Some(self.status()),
            category_id: self.category_id,
            tag_ids: (!self.tag_ids.is_empty()).then(|| self.tag_ids.clone()),
        }
    }
}

impl ContentDraft for ProjectDraft {
    type Record = Project;

    const KIND: ContentKind = ContentKind::Project;

    const SLOTS: [ImageSlot; 2] = [
        ImageSlot {
            folder: "projects",
            used_in: "project",
            alt_suffix: None,
        },
        ImageSlot {
            folder: "projects",
            used_in: "project_thumbnail",
            alt_suffix: Some("thumbnail"),
        },
    ];

    fn id(&self) -> Option<DbId> {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn validate(&self) -> Result<(), CoreError> {
        require(&self.title, "Title is required")?;
        require(&self.description, "Description is required")
    }

    fn pending_images(&self) -> &PendingImages {
        &self.images
    }

    fn current_images(&self) -> ImageUrls {
        ImageUrls {
            featured: self.featured_image.clone(),
            secondary: self.thumbnail_image.clone(),
        }
    }

    fn persist<'a>(
        &'a self,
        session: &'a AdminSession,
        images: ImageUrls,
        mode: SaveMode,
    ) -> BoxFuture<'a, ClientResult<Project>> {
        async move {
            match self.id {
                Some(id) => session.update_project(id, &self.to_update(images, mode)).await,
                None => session.create_project(&self.to_create(images, mode)).await,
            }
        }
        .boxed()
    }

    fn adopt(&mut self, record: &Project) {
        self.id = Some(record.id);
        self.published = record.published;
        self.featured_image = record.featured_image.clone();
        self.thumbnail_image = record.thumbnail_image.clone();
        self.images = PendingImages::default();
    }

    fn preview_of(record: &Project, _site_url: &str, api_url: &str) -> Preview {
        let body = record
            .long_description
            .as_deref()
            .filter(|html| !html.trim().is_empty())
            .unwrap_or(&record.description);
        preview_document(&record.title, body, api_url)
    }
}

#[cfg(test)]
mod tests {
    use folio_core::json_list;

    use super::*;

    fn draft() -> ProjectDraft {
        let mut d = ProjectDraft {
            title: "Folio".into(),
            description: "Portfolio CMS client".into(),
            ..ProjectDraft::new()
        };
        d.tech_stack.add("Rust");
        d.tech_stack.add("Tokio");
        d.tech_stack.add("Axum");
        d
    }

    #[test]
    fn tech_stack_is_sent_as_json_text_in_order() {
        let dto = draft().to_create(ImageUrls::default(), SaveMode::Submit { publish: false });
        let raw = dto.tech_stack.unwrap();
        assert_eq!(raw, r#"["Rust","Tokio","Axum"]"#);
        assert_eq!(json_list::decode("tech_stack", Some(&raw)).unwrap(), ["Rust", "Tokio", "Axum"]);
    }

    #[test]
    fn blank_status_defaults() {
        let d = ProjectDraft {
            status: " ".into(),
            ..draft()
        };
        let dto = d.to_update(ImageUrls::default(), SaveMode::Preview);
        assert_eq!(dto.status.as_deref(), Some(DEFAULT_PROJECT_STATUS));
        assert_eq!(dto.published, Some(false));
    }

    #[test]
    fn edit_reads_lists_back() {
        let project: Project = serde_json::from_value(serde_json::json!({
            "id": 9, "title": "Folio", "slug": "folio", "description": "d",
            "tech_stack": "[\"Rust\",\"Axum\"]",
            "created_at": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        let d = ProjectDraft::edit(&project).unwrap();
        assert_eq!(d.id, Some(9));
        assert_eq!(d.tech_stack.as_slice(), ["Rust", "Axum"]);
        assert!(d.gallery_images.is_empty());
    }

    #[test]
    fn preview_falls_back_to_description() {
        let project: Project = serde_json::from_value(serde_json::json!({
            "id": 9, "title": "Folio", "slug": "folio", "description": "Short one",
            "long_description": "", "created_at": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        let preview = ProjectDraft::preview_of(&project, "", "http://cms");
        let Preview::Document { html, .. } = preview else {
            panic!("expected a document");
        };
        assert!(html.contains("<div>Short one</div>"));
    }
}
