//! Folio content model.
//!
//! Record and DTO types for the portfolio CMS, plus the small pieces of
//! pure logic the site needs around them: JSON-array field encoding, media
//! URL resolution, contact form validation, site routes and the resume
//! catalog. Nothing in this crate performs I/O.

pub mod contact;
pub mod error;
pub mod json_list;
pub mod media;
pub mod models;
pub mod resume;
pub mod routes;
pub mod types;
