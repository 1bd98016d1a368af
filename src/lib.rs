//! dbxtf - Terraform provider resource helpers
//!
//! Binds composite `left|right` identifiers to resource lifecycles backed by a
//! workspace REST API.

pub mod client;
pub mod pair;
pub mod resource;
pub mod schema;

mod error;

pub use client::{ApiClient, ApiError, ClientConfig};
pub use error::DbxError;
pub use pair::{BindResource, Lifecycle, PairError, PairId, PairResource};
pub use resource::{ResourceData, generate_import};
pub use schema::{FieldSchema, FieldType, Schema};
