//! `reqwest` implementation of the API.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use vizboard_model::{Collection, Dataset, Visualisation, VisualisationDraft};

use super::{ExportedFile, Share, ShareRequest, VisualisationApi};
use crate::error::{ClientError, Result};

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("vizboard-client/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Vizboard API.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpApi {
    /// Creates a client for the server at `base_url` (e.g. `http://localhost:3000`).
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of an API path such as `["api", "visualisations", id]`.
    ///
    /// Each segment is percent-encoded, so an id cannot escape its segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// URL of the export endpoint, with `target` form-encoded.
    pub fn export_url(&self, format: &str, target: &str) -> Result<Url> {
        let mut url = self.endpoint(&["api", "export"])?;
        url.query_pairs_mut()
            .append_pair("format", format)
            .append_pair("target", target);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%method, %url, "api request");
        Ok(self.client.request(method, url))
    }

    /// Checks the status and parses the JSON body.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = self.check_status(response).await?;
        let parsed = response.json::<T>().await?;
        Ok(parsed)
    }

    /// Maps non-success statuses to [`ClientError::Http`].
    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(%status, "api request failed");
        Err(ClientError::Http {
            status: status.as_u16(),
            body,
        })
    }
}

impl VisualisationApi for HttpApi {
    async fn list_visualisations(&self) -> Result<Vec<Visualisation>> {
        let response = self
            .request(Method::GET, &["api", "visualisations"])?
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn create_visualisation(&self, draft: &VisualisationDraft) -> Result<Visualisation> {
        let response = self
            .request(Method::POST, &["api", "visualisations"])?
            .json(draft)
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn fetch_visualisation(&self, id: &str) -> Result<Visualisation> {
        let response = self
            .request(Method::GET, &["api", "visualisations", id])?
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn update_visualisation(&self, visualisation: &Visualisation) -> Result<()> {
        let response = self
            .request(
                Method::PUT,
                &["api", "visualisations", visualisation.id.as_str()],
            )?
            .json(visualisation)
            .send()
            .await?;
        self.check_status(response).await?;
        Ok(())
    }

    async fn delete_visualisation(&self, id: &str) -> Result<()> {
        let response = self
            .request(Method::DELETE, &["api", "visualisations", id])?
            .send()
            .await?;
        self.check_status(response).await?;
        Ok(())
    }

    async fn create_share(&self, visualisation_id: &str) -> Result<Share> {
        let body = ShareRequest {
            visualisation_id: visualisation_id.to_string(),
        };
        let response = self
            .request(Method::POST, &["api", "shares"])?
            .json(&body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn export(&self, format: &str, target: &str) -> Result<ExportedFile> {
        let url = self.export_url(format, target)?;
        tracing::debug!(%url, "api request");
        let response = self.client.get(url).send().await?;
        self.handle_response(response).await
    }

    async fn fetch_dataset(&self, id: &str) -> Result<Dataset> {
        let response = self
            .request(Method::GET, &["api", "datasets", id])?
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn fetch_collection(&self, id: &str) -> Result<Collection> {
        let response = self
            .request(Method::GET, &["api", "collections", id])?
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn update_collection(&self, collection: &Collection) -> Result<()> {
        let response = self
            .request(Method::PUT, &["api", "collections", collection.id.as_str()])?
            .json(collection)
            .send()
            .await?;
        self.check_status(response).await?;
        Ok(())
    }
}
