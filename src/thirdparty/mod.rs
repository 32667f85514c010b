//! Clients for custom (third party) resource types.
//!
//! A [`RestConfig`] is turned into a config for one group/version by [`new_rest_config`],
//! which also registers the object types in a [`TypeRegistry`]. [`new_rest_client`] then
//! creates a [`ResourceClient`] performing the actual requests.

mod client;
mod config;
mod registry;

pub use client::*;
pub use config::*;
pub use registry::*;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Kube(#[from] kube::Error),
    #[error("No group/version configured")]
    MissingGroupVersion,
    #[error("Object types are not registered for {0}")]
    NotRegistered(String),
    #[error("Received object of unknown type: {0}")]
    UnknownType(String),
    #[error("Invalid group/version: {0}")]
    InvalidGroupVersion(String),
    #[error("Invalid content type: {0}")]
    ContentType(#[from] http::header::InvalidHeaderValue),
    #[error("Failed to process object: {0}")]
    Json(#[from] serde_json::Error),
}
