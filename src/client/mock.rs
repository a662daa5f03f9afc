//! Mock API client for testing
//!
//! Keeps an in-memory tenant (applications, microservices, releases and
//! reference data) so create flows can be exercised end to end without HTTP.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use super::api::{ApplicationApi, AuthApi, LookupApi, MicroserviceApi, ReleaseApi};
use super::models::{
    AccessToken, AppCreateRequest, AppCreated, ApplicationDescriptor, AttributeDefinition,
    MicroserviceDescriptor, ReleaseCreateRequest, ReleaseDescriptor, UserDescriptor,
    UserGroupDescriptor,
};
use super::pagination::{PagedResponse, PaginationParams};
use super::query::FilterParams;
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// ```ignore
/// let mock = MockFodClient::new()
///     .with_apps(vec![ApplicationBuilder::new(1, "X").build()])
///     .await;
/// ```
#[derive(Default)]
pub struct MockFodClient {
    apps: Arc<Mutex<Vec<ApplicationDescriptor>>>,
    microservices: Arc<Mutex<Vec<MicroserviceDescriptor>>>,
    releases: Arc<Mutex<Vec<ReleaseDescriptor>>>,
    users: Arc<Mutex<Vec<UserDescriptor>>>,
    user_groups: Arc<Mutex<Vec<UserGroupDescriptor>>>,
    attributes: Arc<Mutex<Vec<AttributeDefinition>>>,
    /// Scripted raw records per release; the last one repeats
    records: Arc<Mutex<HashMap<i64, VecDeque<Value>>>>,
    /// Create-application succeeds but the release never becomes visible
    hide_created_releases: Arc<Mutex<bool>>,
    next_id: Arc<Mutex<i64>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    call_count: Arc<Mutex<CallCounts>>,
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub authenticate: usize,
    pub list_applications: usize,
    pub get_application: usize,
    pub create_application: usize,
    pub list_microservices: usize,
    pub create_microservice: usize,
    pub list_releases: usize,
    pub get_release: usize,
    pub get_release_record: usize,
    pub create_release: usize,
    pub list_users: usize,
    pub list_user_groups: usize,
    pub list_attributes: usize,
}

impl CallCounts {
    /// Total number of API calls made.
    pub fn total(&self) -> usize {
        self.authenticate
            + self.list_applications
            + self.get_application
            + self.create_application
            + self.list_microservices
            + self.create_microservice
            + self.list_releases
            + self.get_release
            + self.get_release_record
            + self.create_release
            + self.list_users
            + self.list_user_groups
            + self.list_attributes
    }

    /// Number of calls that changed server state.
    pub fn mutations(&self) -> usize {
        self.create_application + self.create_microservice + self.create_release
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// The API method called (e.g. "create_release")
    pub method: String,
    /// Request body of create calls
    pub payload: Option<Value>,
    /// Filters of list calls
    pub filters: Option<FilterParams>,
}

fn str_field<'a>(payload: &'a Value, field: &str) -> Option<&'a str> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

impl MockFodClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_apps(self, apps: Vec<ApplicationDescriptor>) -> Self {
        *self.apps.lock().await = apps;
        self
    }

    pub async fn with_microservices(self, microservices: Vec<MicroserviceDescriptor>) -> Self {
        *self.microservices.lock().await = microservices;
        self
    }

    pub async fn with_releases(self, releases: Vec<ReleaseDescriptor>) -> Self {
        *self.releases.lock().await = releases;
        self
    }

    pub async fn with_users(self, users: Vec<UserDescriptor>) -> Self {
        *self.users.lock().await = users;
        self
    }

    pub async fn with_user_groups(self, groups: Vec<UserGroupDescriptor>) -> Self {
        *self.user_groups.lock().await = groups;
        self
    }

    pub async fn with_attributes(self, attributes: Vec<AttributeDefinition>) -> Self {
        *self.attributes.lock().await = attributes;
        self
    }

    /// Script the raw records returned by successive `get_release_record` calls.
    pub async fn with_record_sequence(self, release_id: i64, records: Vec<Value>) -> Self {
        self.records
            .lock()
            .await
            .insert(release_id, records.into_iter().collect());
        self
    }

    /// Simulate a create-application response whose release cannot be found afterwards.
    pub async fn hiding_created_releases(self) -> Self {
        *self.hide_created_releases.lock().await = true;
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Payloads of captured calls to `method`, in call order.
    pub async fn payloads(&self, method: &str) -> Vec<Value> {
        self.captured_requests
            .lock()
            .await
            .iter()
            .filter(|r| r.method == method)
            .filter_map(|r| r.payload.clone())
            .collect()
    }

    pub async fn releases(&self) -> Vec<ReleaseDescriptor> {
        self.releases.lock().await.clone()
    }

    async fn check_error(&self) -> Result<()> {
        if let Some(e) = self.error.lock().await.take() {
            return Err(e.into());
        }
        Ok(())
    }

    async fn capture(&self, method: &str, payload: Option<Value>, filters: Option<&FilterParams>) {
        self.captured_requests.lock().await.push(CapturedRequest {
            method: method.to_string(),
            payload,
            filters: filters.cloned(),
        });
    }

    async fn allocate_id(&self) -> i64 {
        let mut next = self.next_id.lock().await;
        *next += 1;
        1000 + *next
    }

    async fn insert_microservice(&self, application_id: i64, name: &str) -> MicroserviceDescriptor {
        let ms = MicroserviceDescriptor {
            microservice_id: self.allocate_id().await,
            microservice_name: name.to_string(),
            application_id: Some(application_id),
        };
        self.microservices.lock().await.push(ms.clone());
        ms
    }
}

fn matches_filter(filters: &FilterParams, field: &str, value: &str) -> bool {
    filters.get(field).is_none_or(|f| f == value)
}

fn page<T: Clone>(items: Vec<T>, pagination: &PaginationParams) -> PagedResponse<T> {
    let total = items.len();
    let offset = pagination.offset.unwrap_or(0);
    let limit = pagination.page_size();
    let items = items.into_iter().skip(offset).take(limit).collect();
    PagedResponse::new(items, Some(total), limit, offset)
}

// ============================================================================
// AuthApi Implementation
// ============================================================================

#[async_trait]
impl AuthApi for MockFodClient {
    async fn authenticate(&self) -> Result<AccessToken> {
        self.check_error().await?;
        self.call_count.lock().await.authenticate += 1;

        Ok(AccessToken {
            token: "mock-token".to_string(),
            expires_at: chrono::Utc::now() + chrono::Duration::hours(1),
        })
    }
}

// ============================================================================
// ApplicationApi Implementation
// ============================================================================

#[async_trait]
impl ApplicationApi for MockFodClient {
    async fn list_applications(
        &self,
        filters: &FilterParams,
        pagination: &PaginationParams,
    ) -> Result<PagedResponse<ApplicationDescriptor>> {
        self.capture("list_applications", None, Some(filters)).await;
        self.check_error().await?;
        self.call_count.lock().await.list_applications += 1;

        let apps: Vec<_> = self
            .apps
            .lock()
            .await
            .iter()
            .filter(|a| matches_filter(filters, "applicationName", &a.application_name))
            .cloned()
            .collect();
        Ok(page(apps, pagination))
    }

    async fn get_application(&self, application_id: i64) -> Result<Option<ApplicationDescriptor>> {
        self.check_error().await?;
        self.call_count.lock().await.get_application += 1;

        Ok(self
            .apps
            .lock()
            .await
            .iter()
            .find(|a| a.application_id == application_id)
            .cloned())
    }

    async fn create_application(&self, request: &AppCreateRequest) -> Result<AppCreated> {
        let payload = request.payload()?;
        self.capture("create_application", Some(payload.clone()), None)
            .await;
        self.check_error().await?;
        self.call_count.lock().await.create_application += 1;

        let app_name = str_field(&payload, "applicationName").unwrap_or_default();
        let has_microservices = payload
            .get("hasMicroservices")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let app = ApplicationDescriptor {
            application_id: self.allocate_id().await,
            application_name: app_name.to_string(),
            has_microservices,
            application_type: str_field(&payload, "applicationType").map(str::to_string),
            business_criticality_type: str_field(&payload, "businessCriticalityType")
                .map(str::to_string),
            extra: Map::new(),
        };
        self.apps.lock().await.push(app.clone());

        let ms = match str_field(&payload, "releaseMicroserviceName") {
            Some(name) => Some(self.insert_microservice(app.application_id, name).await),
            None => None,
        };

        if !*self.hide_created_releases.lock().await {
            let release = ReleaseDescriptor {
                release_id: self.allocate_id().await,
                release_name: str_field(&payload, "releaseName")
                    .unwrap_or_default()
                    .to_string(),
                application_id: app.application_id,
                application_name: app.application_name.clone(),
                microservice_id: ms.as_ref().map(|m| m.microservice_id),
                microservice_name: ms.map(|m| m.microservice_name),
                sdlc_status_type: str_field(&payload, "sdlcStatusType").map(str::to_string),
                suspended: false,
                extra: Map::new(),
            };
            self.releases.lock().await.push(release);
        }

        Ok(AppCreated {
            application_id: app.application_id,
        })
    }
}

// ============================================================================
// MicroserviceApi Implementation
// ============================================================================

#[async_trait]
impl MicroserviceApi for MockFodClient {
    async fn list_microservices(&self, application_id: i64) -> Result<Vec<MicroserviceDescriptor>> {
        self.check_error().await?;
        self.call_count.lock().await.list_microservices += 1;

        Ok(self
            .microservices
            .lock()
            .await
            .iter()
            .filter(|m| m.application_id == Some(application_id))
            .cloned()
            .collect())
    }

    async fn create_microservice(
        &self,
        application_id: i64,
        name: &str,
    ) -> Result<MicroserviceDescriptor> {
        let payload = serde_json::json!({ "applicationId": application_id, "microserviceName": name });
        self.capture("create_microservice", Some(payload), None).await;
        self.check_error().await?;
        self.call_count.lock().await.create_microservice += 1;

        Ok(self.insert_microservice(application_id, name).await)
    }
}

// ============================================================================
// ReleaseApi Implementation
// ============================================================================

#[async_trait]
impl ReleaseApi for MockFodClient {
    async fn list_releases(
        &self,
        filters: &FilterParams,
        pagination: &PaginationParams,
    ) -> Result<PagedResponse<ReleaseDescriptor>> {
        self.capture("list_releases", None, Some(filters)).await;
        self.check_error().await?;
        self.call_count.lock().await.list_releases += 1;

        let include_suspended = filters.has_flag("includeSuspended");
        let releases: Vec<_> = self
            .releases
            .lock()
            .await
            .iter()
            .filter(|r| include_suspended || !r.suspended)
            .filter(|r| matches_filter(filters, "applicationName", &r.application_name))
            .filter(|r| matches_filter(filters, "applicationId", &r.application_id.to_string()))
            .filter(|r| matches_filter(filters, "releaseName", &r.release_name))
            .filter(|r| {
                matches_filter(filters, "microserviceName", r.microservice().unwrap_or_default())
            })
            .cloned()
            .collect();
        Ok(page(releases, pagination))
    }

    async fn get_release(&self, release_id: i64) -> Result<Option<ReleaseDescriptor>> {
        self.check_error().await?;
        self.call_count.lock().await.get_release += 1;

        Ok(self
            .releases
            .lock()
            .await
            .iter()
            .find(|r| r.release_id == release_id)
            .cloned())
    }

    async fn get_release_record(&self, release_id: i64) -> Result<Option<Value>> {
        self.check_error().await?;
        self.call_count.lock().await.get_release_record += 1;

        let mut records = self.records.lock().await;
        if let Some(queue) = records.get_mut(&release_id) {
            let record = if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            };
            return Ok(record);
        }
        drop(records);

        let release = self
            .releases
            .lock()
            .await
            .iter()
            .find(|r| r.release_id == release_id)
            .cloned();
        Ok(release.map(serde_json::to_value).transpose()?)
    }

    async fn create_release(&self, request: &ReleaseCreateRequest) -> Result<ReleaseDescriptor> {
        let payload = request.payload()?;
        self.capture("create_release", Some(payload.clone()), None)
            .await;
        self.check_error().await?;
        self.call_count.lock().await.create_release += 1;

        let application_id = payload
            .get("applicationId")
            .and_then(Value::as_i64)
            .ok_or_else(|| ApiError::BadRequest("applicationId is required".to_string()))?;
        let app = self
            .apps
            .lock()
            .await
            .iter()
            .find(|a| a.application_id == application_id)
            .cloned()
            .ok_or_else(|| ApiError::BadRequest(format!("Unknown application {}", application_id)))?;

        let microservice_id = payload.get("microserviceId").and_then(Value::as_i64);
        let microservice_name = match microservice_id {
            Some(id) => self
                .microservices
                .lock()
                .await
                .iter()
                .find(|m| m.microservice_id == id)
                .map(|m| m.microservice_name.clone()),
            None => None,
        };

        let release = ReleaseDescriptor {
            release_id: self.allocate_id().await,
            release_name: str_field(&payload, "releaseName")
                .unwrap_or_default()
                .to_string(),
            application_id,
            application_name: app.application_name,
            microservice_id,
            microservice_name,
            sdlc_status_type: str_field(&payload, "sdlcStatusType").map(str::to_string),
            suspended: false,
            extra: Map::new(),
        };
        self.releases.lock().await.push(release.clone());
        Ok(release)
    }
}

// ============================================================================
// LookupApi Implementation
// ============================================================================

#[async_trait]
impl LookupApi for MockFodClient {
    async fn list_users(&self, filters: &FilterParams) -> Result<Vec<UserDescriptor>> {
        self.capture("list_users", None, Some(filters)).await;
        self.check_error().await?;
        self.call_count.lock().await.list_users += 1;

        Ok(self
            .users
            .lock()
            .await
            .iter()
            .filter(|u| matches_filter(filters, "userName", &u.user_name))
            .cloned()
            .collect())
    }

    async fn list_user_groups(&self, filters: &FilterParams) -> Result<Vec<UserGroupDescriptor>> {
        self.capture("list_user_groups", None, Some(filters)).await;
        self.check_error().await?;
        self.call_count.lock().await.list_user_groups += 1;

        Ok(self
            .user_groups
            .lock()
            .await
            .iter()
            .filter(|g| matches_filter(filters, "name", &g.name))
            .cloned()
            .collect())
    }

    async fn list_attributes(&self) -> Result<Vec<AttributeDefinition>> {
        self.check_error().await?;
        self.call_count.lock().await.list_attributes += 1;

        Ok(self.attributes.lock().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::*;
    use crate::client::models::SdlcStatus;

    #[tokio::test]
    async fn test_mock_one_shot_error() {
        let mock = MockFodClient::new()
            .with_error(ApiError::ServerError("boom".to_string()))
            .await;

        assert!(mock.list_attributes().await.is_err());
        assert!(mock.list_attributes().await.is_ok());
        assert_eq!(mock.call_counts().await.list_attributes, 1);
    }

    #[tokio::test]
    async fn test_mock_list_releases_hides_suspended_by_default() {
        let app = ApplicationBuilder::new(1, "X").build();
        let mock = MockFodClient::new()
            .with_releases(vec![
                ReleaseBuilder::new(1, "R1").application(&app).build(),
                ReleaseBuilder::new(2, "R2").application(&app).suspended().build(),
            ])
            .await;

        let active = mock
            .list_releases(&FilterParams::new(), &PaginationParams::new())
            .await
            .unwrap();
        assert_eq!(active.items.len(), 1);

        let all = mock
            .list_releases(
                &FilterParams::new().flags(["includeSuspended"]),
                &PaginationParams::new(),
            )
            .await
            .unwrap();
        assert_eq!(all.items.len(), 2);
    }

    #[tokio::test]
    async fn test_mock_record_sequence_repeats_last() {
        let mock = MockFodClient::new()
            .with_record_sequence(
                5,
                vec![
                    serde_json::json!({"suspended": false}),
                    serde_json::json!({"suspended": true}),
                ],
            )
            .await;

        for expected in [false, true, true] {
            let record = mock.get_release_record(5).await.unwrap().unwrap();
            assert_eq!(record["suspended"], expected);
        }
    }

    #[tokio::test]
    async fn test_mock_create_release_records_payload() {
        let app = ApplicationBuilder::new(1, "X").build();
        let mock = MockFodClient::new().with_apps(vec![app]).await;

        let request = ReleaseCreateRequest::builder()
            .application_id(1)
            .release_name("R1")
            .sdlc_status(SdlcStatus::Development)
            .build();
        let release = mock.create_release(&request).await.unwrap();

        assert_eq!(release.application_name, "X");
        assert_eq!(mock.payloads("create_release").await[0]["releaseName"], "R1");
        assert_eq!(mock.call_counts().await.mutations(), 1);
    }
}
