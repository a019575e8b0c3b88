//! The seam between the onboarding wizard and the backend.
//!
//! The wizard only needs create, update, fetch, list-by-employee, delete and
//! the document upload, all at the JSON level. [`HrmsApi`] implements it over
//! HTTP; tests implement it in memory.

use std::path::PathBuf;

use async_trait::async_trait;
use hrms_core::resource::Resource;
use hrms_core::types::DbId;
use serde_json::Value;

use crate::api::HrmsApi;
use crate::error::ApiError;

/// A document checklist save, ready to send as multipart form data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentForm {
    /// `true` once the checklist has an id.
    pub update: bool,
    pub fields: Vec<(String, String)>,
    /// `(field name, local path)` pairs.
    pub files: Vec<(String, PathBuf)>,
}

#[async_trait]
pub trait OnboardingBackend: Send + Sync {
    async fn create(&self, resource: Resource, body: Value) -> Result<Value, ApiError>;

    async fn update(&self, resource: Resource, body: Value) -> Result<Value, ApiError>;

    async fn get_by_id(&self, resource: Resource, id: DbId) -> Result<Value, ApiError>;

    async fn list_for_employee(
        &self,
        resource: Resource,
        employee_id: DbId,
    ) -> Result<Vec<Value>, ApiError>;

    async fn delete(&self, resource: Resource, id: DbId) -> Result<(), ApiError>;

    async fn save_documents(&self, form: DocumentForm) -> Result<Value, ApiError>;
}

#[async_trait]
impl OnboardingBackend for HrmsApi {
    async fn create(&self, resource: Resource, body: Value) -> Result<Value, ApiError> {
        self.add(resource, &body).await
    }

    async fn update(&self, resource: Resource, body: Value) -> Result<Value, ApiError> {
        HrmsApi::update(self, resource, &body).await
    }

    async fn get_by_id(&self, resource: Resource, id: DbId) -> Result<Value, ApiError> {
        HrmsApi::get_by_id(self, resource, id).await
    }

    async fn list_for_employee(
        &self,
        resource: Resource,
        employee_id: DbId,
    ) -> Result<Vec<Value>, ApiError> {
        HrmsApi::list_for_employee(self, resource, employee_id).await
    }

    async fn delete(&self, resource: Resource, id: DbId) -> Result<(), ApiError> {
        HrmsApi::delete(self, resource, id).await
    }

    async fn save_documents(&self, form: DocumentForm) -> Result<Value, ApiError> {
        self.upload_documents(form.update, &form.fields, &form.files)
            .await
    }
}
