#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found: {slug}")]
    NotFound { entity: &'static str, slug: String },

    #[error("{0}")]
    Validation(String),
}
