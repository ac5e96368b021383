use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared::{
    BloodRequest, BloodType, BloodUnit, DashboardSummary, Donor, DonorsByDrive, EntityId, InventoryByType,
    LowStock, MarkExpiredResponse, RequestStatus, Resource, UnitStatus,
};
use thiserror::Error;

use crate::services::config::DEFAULT_API_BASE_URL;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status { status: u16, message: Option<String> },
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("failed to encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Text for an alert: the fallback, followed by the backend's own message
    /// when it sent one.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                message: Some(message), ..
            } => format!("{fallback}: {message}"),
            _ => fallback.to_string(),
        }
    }
}

/// Pull a display string out of an error body.
///
/// The backend answers either `{"message": "..."}` or, when field validation
/// fails, `{"message": {"field": "help", ...}}`.
pub fn extract_backend_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("message")? {
        Value::String(message) if !message.trim().is_empty() => Some(message.clone()),
        Value::Object(fields) if !fields.is_empty() => Some(
            fields
                .iter()
                .map(|(field, help)| match help {
                    Value::String(help) => format!("{field}: {help}"),
                    other => format!("{field}: {other}"),
                })
                .collect::<Vec<_>>()
                .join("; "),
        ),
        _ => None,
    }
}

/// Path under the API base plus its query parameters. Values are encoded
/// when the request is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub path: String,
    pub query: Vec<(&'static str, String)>,
}

impl Endpoint {
    pub fn collection<R: Resource>() -> Self {
        Self::at(format!("/{}/", R::COLLECTION))
    }

    pub fn record<R: Resource>(id: EntityId) -> Self {
        Self::at(format!("/{}/{}", R::COLLECTION, id))
    }

    pub fn function(name: &str) -> Self {
        Self::at(format!("/function/{name}"))
    }

    fn at(path: String) -> Self {
        Self {
            path,
            query: Vec::new(),
        }
    }

    pub fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }
}

#[derive(Debug, Clone, Copy)]
enum Verb {
    Get,
    Post,
    Patch,
    Delete,
}

/// API client for the blood bank backend
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path)
    }

    fn builder(&self, verb: Verb, endpoint: &Endpoint) -> RequestBuilder {
        let url = self.url(endpoint);
        let builder = match verb {
            Verb::Get => Request::get(&url),
            Verb::Post => Request::post(&url),
            Verb::Patch => Request::patch(&url),
            Verb::Delete => Request::delete(&url),
        };
        let builder = builder.query(endpoint.query.iter().map(|(key, value)| (*key, value.as_str())));

        match verb {
            Verb::Get => builder,
            _ => builder.header("Content-Type", "application/json"),
        }
    }

    async fn send(&self, verb: Verb, endpoint: &Endpoint, body: Option<&impl Serialize>) -> Result<Response, ApiError> {
        let builder = self.builder(verb, endpoint);
        let sent = match body {
            Some(body) => {
                builder
                    .json(body)
                    .map_err(|e| ApiError::Encode(e.to_string()))?
                    .send()
                    .await
            }
            None => builder.send().await,
        };
        let response = sent.map_err(|e| ApiError::Network(e.to_string()))?;

        if response.ok() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = extract_backend_message(&body);
            log::warn!(target: "api", "{:?} {} failed with {}", verb, endpoint.path, status);
            Err(ApiError::Status { status, message })
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        let response = self.send(Verb::Get, &endpoint, None::<&()>).await?;
        response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, ApiError> {
        self.get_json(Endpoint::collection::<R>()).await
    }

    pub async fn get<R: Resource>(&self, id: EntityId) -> Result<R, ApiError> {
        self.get_json(Endpoint::record::<R>(id)).await
    }

    /// The backend answers a create with the whole collection; callers reload
    /// instead of reading it.
    pub async fn create<R: Resource>(&self, draft: &R::Draft) -> Result<(), ApiError> {
        self.send(Verb::Post, &Endpoint::collection::<R>(), Some(draft)).await?;
        Ok(())
    }

    /// PATCH with the full draft; the backend rejects partial field sets.
    pub async fn update<R: Resource>(&self, id: EntityId, draft: &R::Draft) -> Result<(), ApiError> {
        self.send(Verb::Patch, &Endpoint::record::<R>(id), Some(draft)).await?;
        Ok(())
    }

    pub async fn delete<R: Resource>(&self, id: EntityId) -> Result<(), ApiError> {
        self.send(Verb::Delete, &Endpoint::record::<R>(id), None::<&()>).await?;
        Ok(())
    }

    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, ApiError> {
        self.get_json(Endpoint::function("summary")).await
    }

    pub async fn expiring_units(&self, days: u32) -> Result<Vec<BloodUnit>, ApiError> {
        self.get_json(Endpoint::function("expiring").param("days", days)).await
    }

    pub async fn expired_units(&self) -> Result<Vec<BloodUnit>, ApiError> {
        self.get_json(Endpoint::function("expired")).await
    }

    /// Set every past-expiry unit to Expired
    pub async fn mark_expired(&self) -> Result<MarkExpiredResponse, ApiError> {
        let response = self
            .send(Verb::Post, &Endpoint::function("mark-expired"), None::<&()>)
            .await?;
        response
            .json::<MarkExpiredResponse>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn inventory_by_type(&self) -> Result<InventoryByType, ApiError> {
        self.get_json(Endpoint::function("inventory")).await
    }

    pub async fn units_by_type(&self, blood_type: BloodType, status: UnitStatus) -> Result<Vec<BloodUnit>, ApiError> {
        self.get_json(
            Endpoint::function("units-by-type")
                .param("blood_type", blood_type)
                .param("status", status),
        )
        .await
    }

    pub async fn donors_by_type(&self, blood_type: BloodType) -> Result<Vec<Donor>, ApiError> {
        self.get_json(Endpoint::function("donors-by-type").param("blood_type", blood_type))
            .await
    }

    pub async fn donors_by_drive(&self, drive_id: EntityId) -> Result<DonorsByDrive, ApiError> {
        self.get_json(Endpoint::function("donors-by-drive").param("drive_id", drive_id))
            .await
    }

    pub async fn eligible_donors(&self) -> Result<Vec<Donor>, ApiError> {
        self.get_json(Endpoint::function("eligible-donors")).await
    }

    pub async fn urgent_requests(&self) -> Result<Vec<BloodRequest>, ApiError> {
        self.get_json(Endpoint::function("urgent-requests")).await
    }

    pub async fn requests_by_status(&self, status: RequestStatus) -> Result<Vec<BloodRequest>, ApiError> {
        self.get_json(Endpoint::function("requests-by-status").param("status", status))
            .await
    }

    pub async fn low_stock(&self, amount: u32) -> Result<LowStock, ApiError> {
        self.get_json(Endpoint::function("low-stock").param("amount", amount)).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{BloodDrive, Hospital};

    #[test]
    fn test_resource_paths() {
        let api = ApiClient::new();
        assert_eq!(
            api.url(&Endpoint::collection::<BloodUnit>()),
            "http://localhost:5000/api/bloodunits/"
        );
        assert_eq!(api.url(&Endpoint::record::<Hospital>(4)), "http://localhost:5000/api/hospitals/4");
        assert_eq!(Endpoint::collection::<BloodRequest>().path, "/requests/");
        assert_eq!(Endpoint::record::<BloodDrive>(2).path, "/blooddrives/2");
    }

    #[test]
    fn test_function_params_keep_raw_labels() {
        let endpoint = Endpoint::function("units-by-type")
            .param("blood_type", BloodType::APositive)
            .param("status", UnitStatus::Available);

        assert_eq!(endpoint.path, "/function/units-by-type");
        assert_eq!(
            endpoint.query,
            vec![("blood_type", "A+".to_string()), ("status", "Available".to_string())]
        );
    }

    #[test]
    fn test_backend_message_string() {
        assert_eq!(
            extract_backend_message(r#"{"message": "Donor not found"}"#).as_deref(),
            Some("Donor not found")
        );
    }

    #[test]
    fn test_backend_message_field_map() {
        let body = r#"{"message": {"phone_num": "Phone number is required", "first_name": "First name is required"}}"#;
        assert_eq!(
            extract_backend_message(body).as_deref(),
            Some("first_name: First name is required; phone_num: Phone number is required")
        );
    }

    #[test]
    fn test_backend_message_absent() {
        assert_eq!(extract_backend_message("<html>502</html>"), None);
        assert_eq!(extract_backend_message(r#"{"error": "x"}"#), None);
        assert_eq!(extract_backend_message(r#"{"message": ""}"#), None);
    }

    #[test]
    fn test_user_message() {
        let with_message = ApiError::Status {
            status: 400,
            message: Some("Invalid blood type".to_string()),
        };
        let without = ApiError::Status {
            status: 500,
            message: None,
        };

        assert_eq!(
            with_message.user_message("Failed to save donor"),
            "Failed to save donor: Invalid blood type"
        );
        assert_eq!(without.user_message("Failed to save donor"), "Failed to save donor");
        assert_eq!(
            ApiError::Network("offline".to_string()).user_message("Failed to delete donor"),
            "Failed to delete donor"
        );
        assert_eq!(with_message.to_string(), "server returned 400: Invalid blood type");
    }
}
