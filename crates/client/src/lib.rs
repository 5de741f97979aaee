//! Folio CMS client.
//!
//! Typed access to the portfolio CMS REST API plus the client-side flows
//! built on it: the admin session and its token store, per-screen fetch
//! state, page loaders, the admin edit-and-publish workflow, contact form
//! submission and resume links.

pub mod admin;
pub mod api;
pub mod auth;
pub mod config;
pub mod contact;
pub mod editor;
pub mod error;
pub mod pages;
pub mod query;
pub mod resource;
pub mod resume;
pub mod upload;

pub use api::CmsApi;
pub use auth::{AdminSession, FileTokenStore, MemoryTokenStore, TokenStore};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
