use futures::future::BoxFuture;
use futures::FutureExt;

use folio_core::error::CoreError;
use folio_core::models::{Blog, CreateBlog, UpdateBlog};
use folio_core::routes::Route;
use folio_core::types::DbId;

use super::{
    blank_to_none, require, ContentDraft, ContentKind, ImageSlot, ImageUrls, PendingImages,
    Preview, SaveMode,
};
use crate::auth::AdminSession;
use crate::error::ClientResult;

/// Form values for a blog post.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogDraft {
    pub id: Option<DbId>,
    pub title: String,
    pub excerpt: String,
    /// HTML body.
    pub content: String,
    pub author: String,
    pub featured_image: Option<String>,
    pub thumbnail_image: Option<String>,
    pub read_time: Option<i32>,
    pub meta_title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub published: bool,
    pub featured: bool,
    pub category_id: Option<DbId>,
    pub tag_ids: Vec<DbId>,
    pub images: PendingImages,
}

impl BlogDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing an existing post.
    pub fn edit(blog: &Blog) -> Self {
        Self {
            id: Some(blog.id),
            title: blog.title.clone(),
            excerpt: blog.excerpt.clone(),
            content: blog.content.clone(),
            author: blog.author.clone(),
            featured_image: blog.featured_image.clone(),
            thumbnail_image: blog.thumbnail_image.clone(),
            read_time: blog.read_time,
            meta_title: blog.meta_title.clone().unwrap_or_default(),
            meta_description: blog.meta_description.clone().unwrap_or_default(),
            meta_keywords: blog.meta_keywords.clone().unwrap_or_default(),
            published: blog.published,
            featured: blog.featured,
            category_id: blog.category_id,
            tag_ids: Vec::new(),
            images: PendingImages::default(),
        }
    }

    fn published_for(&self, mode: SaveMode) -> bool {
        match mode {
            SaveMode::Submit { publish } => publish || self.published,
            SaveMode::Preview => false,
        }
    }

    pub fn to_create(&self, images: ImageUrls, mode: SaveMode) -> CreateBlog {
        CreateBlog {
            title: self.title.trim().to_string(),
            excerpt: self.excerpt.clone(),
            content: self.content.clone(),
            author: blank_to_none(&self.author),
            featured_image: images.featured,
            thumbnail_image: images.secondary,
            read_time: self.read_time,
            meta_title: blank_to_none(&self.meta_title),
            meta_description: blank_to_none(&self.meta_description),
            meta_keywords: blank_to_none(&self.meta_keywords),
            published: self.published_for(mode),
            featured: self.featured,
            category_id: self.category_id,
            tag_ids: (!self.tag_ids.is_empty()).then(|| self.tag_ids.clone()),
        }
    }

    /// Full update: every form field is sent, so cleared fields are cleared
    /// on the CMS too.
    pub fn to_update(&self, images: ImageUrls, mode: SaveMode) -> UpdateBlog {
        UpdateBlog {
            title: Some(self.title.trim().to_string()),
            excerpt: Some(self.excerpt.clone()),
            content: Some(self.content.clone()),
            author: blank_to_none(&self.author),
            featured_image: images.featured,
            thumbnail_image: images.secondary,
            read_time: self.read_time,
            meta_title: Some(self.meta_title.clone()),
            meta_description: Some(self.meta_description.clone()),
            meta_keywords: Some(self.meta_keywords.clone()),
            published: Some(self.published_for(mode)),
            featured: Some(self.featured),
            category_id: self.category_id,
            tag_ids: (!self.tag_ids.is_empty()).then(|| self.tag_ids.clone()),
        }
    }
}

impl ContentDraft for BlogDraft {
    type Record = Blog;

    const KIND: ContentKind = ContentKind::Blog;

    const SLOTS: [ImageSlot; 2] = [
        ImageSlot {
            folder: "blogs",
            used_in: "blog",
            alt_suffix: None,
        },
        ImageSlot {
            folder: "blogs",
            used_in: "blog_thumbnail",
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
        require(&self.excerpt, "Excerpt is required")?;
        require(&self.content, "Content is required")
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
    ) -> BoxFuture<'a, ClientResult<Blog>> {
        async move {
            match self.id {
                Some(id) => session.update_blog(id, &self.to_update(images, mode)).await,
                None => session.create_blog(&self.to_create(images, mode)).await,
            }
        }
        .boxed()
    }

    fn adopt(&mut self, record: &Blog) {
        self.id = Some(record.id);
        self.published = record.published;
        self.featured_image = record.featured_image.clone();
        self.thumbnail_image = record.thumbnail_image.clone();
        self.images = PendingImages::default();
    }

    fn preview_of(record: &Blog, site_url: &str, _api_url: &str) -> Preview {
        let route = Route::BlogPost {
            slug: record.slug.clone(),
            preview: true,
        };
        Preview::Url(route.url(site_url))
    }
}
