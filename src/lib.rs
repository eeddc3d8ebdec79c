//! Admin front-end for product records.
//!
//! Products are created by asking the backend to extract them from a URL,
//! a block of text, or an uploaded PDF, and listed straight from the
//! backend's collection endpoint.
//!
//! - [`api`] - HTTP access to the backend
//! - [`resource`] - Data provider operations and the extraction dispatch
//! - [`model`] - Product and location records
//! - [`view`] - Schema-less list/show rendering
//! - [`config`] - Persistent settings
//! - [`import`] - Batch import files

pub mod api;
pub mod config;
pub mod error;
pub mod import;
pub mod model;
pub mod resource;
pub mod view;

pub use error::{ExtractionFailure, ProviderError, TransportError, UnsupportedExtractionMethod};
pub use resource::{
    CreatePayload, DataProvider, Envelope, ExtractionBody, ExtractionRequest, PdfFile, Resource,
};
