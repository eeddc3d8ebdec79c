//! Resource adapter
//!
//! Exposes the generic data-provider surface (list, create, and the
//! unimplemented read/update/delete operations) for the resources the
//! backend serves.
//!
//! # Architecture
//!
//! - [`extraction`] - Create payloads and the url/text/pdf dispatch rule
//! - [`provider`] - The data provider itself
//!
//! # Example
//!
//! ```ignore
//! use product_admin::resource::{CreatePayload, DataProvider};
//!
//! async fn create(provider: &DataProvider) -> Result<(), product_admin::ProviderError> {
//!     let envelope = provider
//!         .create("products", CreatePayload::url("https://shop.test/beanie"))
//!         .await?;
//!     println!("{}", envelope.data);
//!     Ok(())
//! }
//! ```

pub mod extraction;
pub mod provider;

pub use extraction::{CreatePayload, ExtractionBody, ExtractionRequest, PdfFile, PDF_FIELD};
pub use provider::{DataProvider, Envelope};

use crate::error::ProviderError;
use std::fmt;
use std::str::FromStr;

/// Resources the backend serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Products,
}

impl Resource {
    pub const ALL: &'static [Resource] = &[Resource::Products];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Products => "products",
        }
    }

    /// Collection path relative to the API base URL
    pub fn collection_path(&self) -> &'static str {
        match self {
            Self::Products => "products",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "products" => Ok(Self::Products),
            other => Err(ProviderError::UnsupportedResource(other.to_string())),
        }
    }
}
