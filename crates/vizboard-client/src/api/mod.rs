//! The REST boundary.
//!
//! [`VisualisationApi`] is the seam the lifecycle controller talks through.
//! [`HttpApi`] implements it with `reqwest`; tests supply an in-memory double.

mod http;

use serde::{Deserialize, Serialize};
use vizboard_model::{Collection, Dataset, Visualisation, VisualisationDraft};

use crate::error::Result;

pub use http::HttpApi;

/// Body of `POST /api/shares`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    pub visualisation_id: String,
}

/// Response of `POST /api/shares`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub id: String,
}

/// Response of `GET /api/export`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedFile {
    /// Location of the rendered file.
    pub file: String,
}

/// Operations the Vizboard server exposes to the client.
#[allow(async_fn_in_trait)]
pub trait VisualisationApi {
    /// `GET /api/visualisations`
    async fn list_visualisations(&self) -> Result<Vec<Visualisation>>;

    /// `POST /api/visualisations`
    async fn create_visualisation(&self, draft: &VisualisationDraft) -> Result<Visualisation>;

    /// `GET /api/visualisations/{id}`
    async fn fetch_visualisation(&self, id: &str) -> Result<Visualisation>;

    /// `PUT /api/visualisations/{id}`
    async fn update_visualisation(&self, visualisation: &Visualisation) -> Result<()>;

    /// `DELETE /api/visualisations/{id}`
    async fn delete_visualisation(&self, id: &str) -> Result<()>;

    /// `POST /api/shares`
    async fn create_share(&self, visualisation_id: &str) -> Result<Share>;

    /// `GET /api/export?format=..&target=..`
    async fn export(&self, format: &str, target: &str) -> Result<ExportedFile>;

    /// `GET /api/datasets/{id}`
    async fn fetch_dataset(&self, id: &str) -> Result<Dataset>;

    /// `GET /api/collections/{id}`
    async fn fetch_collection(&self, id: &str) -> Result<Collection>;

    /// `PUT /api/collections/{id}`
    async fn update_collection(&self, collection: &Collection) -> Result<()>;
}
