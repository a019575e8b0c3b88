//! REST API client for the HRMS backend.
//!
//! Every resource shares one endpoint family, and every response is wrapped
//! in an [`ApiEnvelope`]. Requests carry a fresh `x-request-id` so backend
//! logs can be correlated with ours.

use std::path::{Path, PathBuf};

use hrms_core::resource::Resource;
use hrms_core::types::DbId;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::envelope::ApiEnvelope;
use crate::error::ApiError;

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client for one HRMS backend.
#[derive(Debug, Clone)]
pub struct HrmsApi {
    client: reqwest::Client,
    api_url: String,
    file_base_url: String,
}

impl HrmsApi {
    /// Build a client with the configured request timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(
            client,
            config.api_url.clone(),
            config.file_base_url.clone(),
        ))
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String, file_base_url: String) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            file_base_url,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Public URL of a stored document filename.
    pub fn file_url(&self, stored: &str) -> String {
        format!("{}{}", self.file_base_url, stored)
    }

    /// Create a record. `POST {resource}/add`.
    pub async fn add<B, R>(&self, resource: Resource, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.client.post(self.url(&resource.add_path())).json(body);
        let envelope = self.send(request).await?;
        Self::require_result(envelope)
    }

    /// Update a record; the body carries its id. `POST {resource}/update`.
    pub async fn update<B, R>(&self, resource: Resource, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self
            .client
            .post(self.url(&resource.update_path()))
            .json(body);
        let envelope = self.send(request).await?;
        Self::require_result(envelope)
    }

    /// Every record of a resource. `GET {resource}/getAll`.
    pub async fn get_all<R: DeserializeOwned>(&self, resource: Resource) -> Result<Vec<R>, ApiError> {
        let request = self.client.get(self.url(&resource.get_all_path()));
        let envelope = self.send(request).await?;
        Self::many(envelope)
    }

    /// One record by primary key. `GET {resource}/by-id/{id}`.
    pub async fn get_by_id<R: DeserializeOwned>(
        &self,
        resource: Resource,
        id: DbId,
    ) -> Result<R, ApiError> {
        let request = self.client.get(self.url(&resource.by_id_path(id)));
        let envelope = self.send(request).await?;
        Self::require_result(envelope)
    }

    /// Records owned by an employee. `GET {resource}/employee/{employee_id}`.
    ///
    /// Single-record resources may answer with one object instead of a list;
    /// either shape is returned as a `Vec`.
    pub async fn list_for_employee<R: DeserializeOwned>(
        &self,
        resource: Resource,
        employee_id: DbId,
    ) -> Result<Vec<R>, ApiError> {
        let request = self
            .client
            .get(self.url(&resource.by_employee_path(employee_id)));
        let envelope = self.send(request).await?;
        Self::many(envelope)
    }

    /// Delete a record. `DELETE {resource}/delete/{id}`.
    pub async fn delete(&self, resource: Resource, id: DbId) -> Result<(), ApiError> {
        let request = self.client.delete(self.url(&resource.delete_path(id)));
        self.send(request).await?;
        Ok(())
    }

    /// Save the document checklist as multipart form data.
    ///
    /// Text fields go in as-is; each file is sent under its field name with
    /// its original filename. The result carries `<field>_url` entries.
    pub async fn upload_documents(
        &self,
        update: bool,
        fields: &[(String, String)],
        files: &[(String, PathBuf)],
    ) -> Result<Value, ApiError> {
        let resource = Resource::DocumentChecklist;
        let path = if update {
            resource.update_path()
        } else {
            resource.add_path()
        };

        let mut form = Form::new();
        for (name, value) in fields {
            form = form.text(name.clone(), value.clone());
        }
        for (name, file) in files {
            form = form.part(name.clone(), Self::file_part(file).await?);
        }

        let request = self.client.post(self.url(&path)).multipart(form);
        let envelope = self.send(request).await?;
        Self::require_result(envelope)
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path)
    }

    async fn file_part(path: &Path) -> Result<Part, ApiError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Part::bytes(bytes).file_name(file_name))
    }

    /// Send a request and unwrap the envelope.
    ///
    /// `{ success: false }` becomes [`ApiError::Rejected`] whatever the HTTP
    /// status; a non-2xx status without an envelope becomes
    /// [`ApiError::Status`].
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<ApiEnvelope<Value>, ApiError> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let response = request
            .header(REQUEST_ID_HEADER, &request_id)
            .send()
            .await
            .inspect_err(|e| {
                tracing::warn!(request_id = %request_id, error = %e, "Backend request failed");
            })?;

        let status = response.status();
        let url = response.url().to_string();
        let body = response.text().await?;

        let envelope = match serde_json::from_str::<ApiEnvelope<Value>>(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                tracing::warn!(request_id = %request_id, %url, status = status.as_u16(), "Backend returned an error status");
                return Err(ApiError::Status {
                    status: status.as_u16(),
                    body,
                });
            }
            Err(e) => return Err(ApiError::Decode(e)),
        };

        if !envelope.success {
            let message = envelope.message.unwrap_or_default();
            tracing::info!(request_id = %request_id, %url, message = %message, "Backend rejected request");
            return Err(ApiError::Rejected { message });
        }

        tracing::debug!(request_id = %request_id, %url, "Backend request succeeded");
        Ok(envelope)
    }

    fn require_result<R: DeserializeOwned>(envelope: ApiEnvelope<Value>) -> Result<R, ApiError> {
        match envelope.result {
            Some(Value::Null) | None => Err(ApiError::MissingResult),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    fn many<R: DeserializeOwned>(envelope: ApiEnvelope<Value>) -> Result<Vec<R>, ApiError> {
        match envelope.result {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|v| serde_json::from_value(v).map_err(ApiError::from))
                .collect(),
            Some(single) => Ok(vec![serde_json::from_value(single)?]),
        }
    }
}
