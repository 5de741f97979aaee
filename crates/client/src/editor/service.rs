use futures::future::BoxFuture;
use futures::FutureExt;

use folio_core::error::CoreError;
use folio_core::json_list::StringList;
use folio_core::models::service::DEFAULT_CURRENCY;
use folio_core::models::{CreateService, Service, UpdateService};
use folio_core::types::DbId;

use super::{
    blank_to_none, preview_document, require, ContentDraft, ContentKind, ImageSlot, ImageUrls,
    PendingImages, Preview, SaveMode,
};
use crate::auth::AdminSession;
use crate::error::ClientResult;

/// Form values for a service offering. The secondary image is the icon.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDraft {
    pub id: Option<DbId>,
    pub title: String,
    pub description: String,
    pub long_description: String,
    pub price: Option<f64>,
    pub price_range: String,
    pub currency: String,
    pub pricing_model: String,
    pub featured_image: Option<String>,
    pub icon: Option<String>,
    pub features: StringList,
    pub deliverables: StringList,
    pub duration: String,
    pub active: bool,
    pub featured: bool,
    pub order: i32,
    pub images: PendingImages,
}

impl Default for ServiceDraft {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            description: String::new(),
            long_description: String::new(),
            price: None,
            price_range: String::new(),
            currency: DEFAULT_CURRENCY.to_string(),
            pricing_model: String::new(),
            featured_image: None,
            icon: None,
            features: StringList::new(),
            deliverables: StringList::new(),
            duration: String::new(),
            active: true,
            featured: false,
            order: 0,
            images: PendingImages::default(),
        }
    }
}

impl ServiceDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit(service: &Service) -> Result<Self, CoreError> {
        Ok(Self {
            id: Some(service.id),
            title: service.title.clone(),
            description: service.description.clone(),
            long_description: service.long_description.clone().unwrap_or_default(),
            price: service.price,
            price_range: service.price_range.clone().unwrap_or_default(),
            currency: service.currency.clone(),
            pricing_model: service.pricing_model.clone().unwrap_or_default(),
            featured_image: service.featured_image.clone(),
            icon: service.icon.clone(),
            features: StringList::from_json("features", service.features.as_deref())?,
            deliverables: StringList::from_json("deliverables", service.deliverables.as_deref())?,
            duration: service.duration.clone().unwrap_or_default(),
            active: service.active,
            featured: service.featured,
            order: service.order,
            images: PendingImages::default(),
        })
    }

    fn active_for(&self, mode: SaveMode) -> bool {
        match mode {
            SaveMode::Submit { publish } => publish || self.active,
            SaveMode::Preview => self.active,
        }
    }

    fn currency(&self) -> String {
        blank_to_none(&self.currency).unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
    }

    pub fn to_create(&self, images: ImageUrls, mode: SaveMode) -> CreateService {
        CreateService {
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            long_description: blank_to_none(&self.long_description),
            price: self.price,
            price_range: blank_to_none(&self.price_range),
            currency: self.currency(),
            pricing_model: blank_to_none(&self.pricing_model),
            icon: images.secondary,
            featured_image: images.featured,
            features: Some(self.features.to_json()),
            deliverables: Some(self.deliverables.to_json()),
            duration: blank_to_none(&self.duration),
            active: self.active_for(mode),
            featured: self.featured,
            order: self.order,
        }
    }

    pub fn to_update(&self, images: ImageUrls, mode: SaveMode) -> UpdateService {
        UpdateService {
            title: Some(self.title.trim().to_string()),
            description: Some(self.description.clone()),
            long_description: Some(self.long_description.clone()),
            price: self.price,
            price_range: Some(self.price_range.clone()),
            currency: Some(self.currency()),
            pricing_model: Some(self.pricing_model.clone()),
            icon: images.secondary,
            featured_image: images.featured,
            features: Some(self.features.to_json()),
            deliverables: Some(self.deliverables.to_json()),
            duration: Some(self.duration.clone()),
            active: Some(self.active_for(mode)),
            featured: Some(self.featured),
            order: Some(self.order),
        }
    }
}

impl ContentDraft for ServiceDraft {
    type Record = Service;

    const KIND: ContentKind = ContentKind::Service;

    const SLOTS: [ImageSlot; 2] = [
        ImageSlot {
            folder: "services",
            used_in: "service",
            alt_suffix: None,
        },
        ImageSlot {
            folder: "services",
            used_in: "service_icon",
            alt_suffix: Some("icon"),
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
            secondary: self.icon.clone(),
        }
    }

    fn persist<'a>(
        &'a self,
        session: &'a AdminSession,
        images: ImageUrls,
        mode: SaveMode,
    ) -> BoxFuture<'a, ClientResult<Service>> {
        async move {
            match self.id {
                Some(id) => session.update_service(id, &self.to_update(images, mode)).await,
                None => session.create_service(&self.to_create(images, mode)).await,
            }
        }
        .boxed()
    }

    fn adopt(&mut self, record: &Service) {
        self.id = Some(record.id);
        self.active = record.active;
        self.featured_image = record.featured_image.clone();
        self.icon = record.icon.clone();
        self.images = PendingImages::default();
    }

    fn preview_of(record: &Service, _site_url: &str, api_url: &str) -> Preview {
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
    use super::*;

    #[test]
    fn publish_on_save_activates() {
        let d = ServiceDraft {
            title: "Audit".into(),
            description: "Code review".into(),
            active: false,
            ..ServiceDraft::new()
        };
        assert!(d.to_create(ImageUrls::default(), SaveMode::Submit { publish: true }).active);
        assert!(!d.to_create(ImageUrls::default(), SaveMode::Submit { publish: false }).active);
    }

    #[test]
    fn icon_goes_to_secondary_slot() {
        let d = ServiceDraft {
            title: "Audit".into(),
            description: "Code review".into(),
            ..ServiceDraft::new()
        };
        let images = ImageUrls {
            featured: Some("/uploads/services/hero.png".into()),
            secondary: Some("/uploads/services/icon.png".into()),
        };
        let dto = d.to_update(images, SaveMode::Preview);
        assert_eq!(dto.icon.as_deref(), Some("/uploads/services/icon.png"));
        assert_eq!(dto.featured_image.as_deref(), Some("/uploads/services/hero.png"));
    }

    #[test]
    fn lists_survive_edit_round_trip() {
        let mut d = ServiceDraft::new();
        d.features.add("Threat model");
        d.features.add("Report");
        d.deliverables.add("PDF");
        let dto = d.to_create(ImageUrls::default(), SaveMode::Submit { publish: false });

        let service: Service = serde_json::from_value(serde_json::json!({
            "id": 2, "title": "Audit", "slug": "audit",
            "features": dto.features, "deliverables": dto.deliverables
        }))
        .unwrap();
        let back = ServiceDraft::edit(&service).unwrap();
        assert_eq!(back.features, d.features);
        assert_eq!(back.deliverables.as_slice(), ["PDF"]);
    }
}
