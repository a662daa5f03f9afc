//! Fortify on Demand API client implementation

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, Method, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::sync::RwLock;

use super::api::{ApplicationApi, AuthApi, LookupApi, MicroserviceApi, ReleaseApi};
use super::models::{
    AccessToken, AppCreateRequest, AppCreated, ApplicationDescriptor, AttributeDefinition,
    MicroserviceDescriptor, ReleaseCreateRequest, ReleaseCreated, ReleaseDescriptor,
    UserDescriptor, UserGroupDescriptor,
};
use super::pagination::{ItemsEnvelope, MAX_PAGE_SIZE, PagedResponse, PaginationParams};
use super::query::FilterParams;
use crate::config::Config;
use crate::error::{ApiError, ConfigError, Error, Result};

const API_PREFIX: &str = "/api/v3";

/// Client-side request budget
const RATE_LIMIT_PER_SECOND: NonZeroU32 = match NonZeroU32::new(8) {
    Some(n) => n,
    None => unreachable!(),
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fortify on Demand API client
pub struct FodClient {
    http: HttpClient,
    base_url: String,
    credentials: Credentials,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    token: Arc<RwLock<Option<AccessToken>>>,
}

#[derive(Debug, Clone)]
struct Credentials {
    client_id: String,
    client_secret: String,
    scope: String,
}

impl FodClient {
    /// Create a client for `base_url` using the client credentials grant
    pub fn new(
        base_url: &str,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        scope: impl Into<String>,
    ) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: Credentials {
                client_id: client_id.into(),
                client_secret: client_secret.into(),
                scope: scope.into(),
            },
            rate_limiter: Arc::new(RateLimiter::direct(Quota::per_second(
                RATE_LIMIT_PER_SECOND,
            ))),
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Create a client from loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate_auth()?;
        let (Some(url), Some(id), Some(secret)) = (
            config.url.as_deref(),
            config.client_id.as_deref(),
            config.client_secret.as_deref(),
        ) else {
            return Err(ConfigError::MissingCredentials.into());
        };
        Self::new(url, id, secret, config.scope.as_str())
    }

    async fn set_token(&self, token: Option<AccessToken>) {
        *self.token.write().await = token;
    }

    /// Current bearer token, fetching a new one when missing or about to expire
    async fn valid_token(&self) -> Result<String> {
        {
            let token = self.token.read().await;
            if let Some(t) = token.as_ref().filter(|t| !t.is_expired()) {
                return Ok(t.token.clone());
            }
        }

        let fresh = self.authenticate().await?;
        let value = fresh.token.clone();
        self.set_token(Some(fresh)).await;
        Ok(value)
    }

    /// Send an authenticated request, re-authenticating once on 401.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Response> {
        let url = format!("{}{}{}", self.base_url, API_PREFIX, path);
        let mut reauthenticated = false;

        loop {
            self.rate_limiter.until_ready().await;
            let token = self.valid_token().await?;

            debug!("{} {}", method, url);
            let mut request = self
                .http
                .request(method.clone(), &url)
                .bearer_auth(&token)
                .query(query);
            if let Some(body) = body {
                request = request.json(body);
            }
            let response = request.send().await.map_err(ApiError::from)?;

            if response.status() == StatusCode::UNAUTHORIZED && !reauthenticated {
                debug!("Access token rejected, re-authenticating");
                self.set_token(None).await;
                reauthenticated = true;
                continue;
            }

            return check_status(response).await;
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(String, String)]) -> Result<T> {
        let response = self.execute(Method::GET, path, query, None).await?;
        parse_json(response).await
    }

    /// GET that maps 404 to `None`
    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        match self.execute(Method::GET, path, &[], None).await {
            Ok(response) => parse_json(response).await.map(Some),
            Err(Error::Api(ApiError::NotFound(_))) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T> {
        let response = self.execute(Method::POST, path, &[], Some(body)).await?;
        parse_json(response).await
    }

    async fn list_paged<T: DeserializeOwned>(
        &self,
        path: &str,
        filters: &FilterParams,
        pagination: &PaginationParams,
    ) -> Result<PagedResponse<T>> {
        let mut query = filters.to_query_params();
        query.extend(pagination.to_query_params());
        let envelope: ItemsEnvelope<T> = self.get(path, &query).await?;
        Ok(PagedResponse::from_envelope(envelope, pagination))
    }

    /// Items of a name lookup.
    ///
    /// Exact filters fit in one page; otherwise every page is read.
    async fn list_lookup<T: DeserializeOwned>(
        &self,
        path: &str,
        filters: &FilterParams,
    ) -> Result<Vec<T>> {
        let pagination = PaginationParams::new().limit(MAX_PAGE_SIZE);
        let first = self.list_paged(path, filters, &pagination).await?;
        if filters.is_exact() {
            return Ok(first.items);
        }

        let offsets = first.remaining_offsets();
        let mut items = first.items;
        for offset in offsets {
            let params = PaginationParams::new().limit(MAX_PAGE_SIZE).offset(offset);
            let page: PagedResponse<T> = self.list_paged(path, filters, &params).await?;
            items.extend(page.items);
        }
        Ok(items)
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let data = response
        .json::<T>()
        .await
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
    Ok(data)
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
        StatusCode::FORBIDDEN => Err(ApiError::Forbidden.into()),
        StatusCode::NOT_FOUND => {
            let msg = response
                .text()
                .await
                .unwrap_or_else(|_| "Resource not found".to_string());
            Err(ApiError::NotFound(msg).into())
        }
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            Err(ApiError::RateLimit(Duration::from_secs(retry_after)).into())
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            let msg = response
                .text()
                .await
                .unwrap_or_else(|_| "Bad request".to_string());
            Err(ApiError::BadRequest(msg).into())
        }
        status if status.is_server_error() => {
            let msg = response
                .text()
                .await
                .unwrap_or_else(|_| format!("Server error: {}", status));
            Err(ApiError::ServerError(msg).into())
        }
        _ => Err(ApiError::InvalidResponse(format!("Unexpected status code: {}", status)).into()),
    }
}

// ============================================================================
// AuthApi
// ============================================================================

#[async_trait]
impl AuthApi for FodClient {
    async fn authenticate(&self) -> Result<AccessToken> {
        self.rate_limiter.until_ready().await;

        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
            #[serde(default = "default_expires_in")]
            expires_in: i64,
        }

        fn default_expires_in() -> i64 {
            6 * 60 * 60
        }

        let url = format!("{}/oauth/token", self.base_url);
        debug!("POST {}", url);
        let response = self
            .http
            .post(&url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("scope", self.credentials.scope.as_str()),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(ApiError::from)?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::BAD_REQUEST
        ) {
            return Err(ApiError::Unauthorized.into());
        }
        let response = check_status(response).await?;
        let token: TokenResponse = parse_json(response).await?;

        Ok(AccessToken {
            token: token.access_token,
            expires_at: Utc::now() + chrono::Duration::seconds(token.expires_in),
        })
    }
}

// ============================================================================
// ApplicationApi
// ============================================================================

#[async_trait]
impl ApplicationApi for FodClient {
    async fn list_applications(
        &self,
        filters: &FilterParams,
        pagination: &PaginationParams,
    ) -> Result<PagedResponse<ApplicationDescriptor>> {
        self.list_paged("/applications", filters, pagination).await
    }

    async fn get_application(&self, application_id: i64) -> Result<Option<ApplicationDescriptor>> {
        self.get_optional(&format!("/applications/{}", application_id))
            .await
    }

    async fn create_application(&self, request: &AppCreateRequest) -> Result<AppCreated> {
        self.post("/applications", &request.payload()?).await
    }
}

// ============================================================================
// MicroserviceApi
// ============================================================================

#[async_trait]
impl MicroserviceApi for FodClient {
    async fn list_microservices(&self, application_id: i64) -> Result<Vec<MicroserviceDescriptor>> {
        let path = format!("/applications/{}/microservices", application_id);
        let envelope: ItemsEnvelope<MicroserviceDescriptor> = self.get(&path, &[]).await?;
        Ok(envelope
            .items
            .into_iter()
            .map(|mut ms| {
                ms.application_id.get_or_insert(application_id);
                ms
            })
            .collect())
    }

    async fn create_microservice(
        &self,
        application_id: i64,
        name: &str,
    ) -> Result<MicroserviceDescriptor> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct MicroserviceCreated {
            microservice_id: i64,
        }

        let path = format!("/applications/{}/microservices", application_id);
        let created: MicroserviceCreated = self
            .post(&path, &json!({ "microserviceName": name }))
            .await?;

        Ok(MicroserviceDescriptor {
            microservice_id: created.microservice_id,
            microservice_name: name.to_string(),
            application_id: Some(application_id),
        })
    }
}

// ============================================================================
// ReleaseApi
// ============================================================================

#[async_trait]
impl ReleaseApi for FodClient {
    async fn list_releases(
        &self,
        filters: &FilterParams,
        pagination: &PaginationParams,
    ) -> Result<PagedResponse<ReleaseDescriptor>> {
        self.list_paged("/releases", filters, pagination).await
    }

    async fn get_release(&self, release_id: i64) -> Result<Option<ReleaseDescriptor>> {
        self.get_optional(&format!("/releases/{}", release_id)).await
    }

    async fn get_release_record(&self, release_id: i64) -> Result<Option<Value>> {
        self.get_optional(&format!("/releases/{}", release_id)).await
    }

    async fn create_release(&self, request: &ReleaseCreateRequest) -> Result<ReleaseDescriptor> {
        let created: ReleaseCreated = self.post("/releases", &request.payload()?).await?;
        self.get_release(created.release_id).await?.ok_or_else(|| {
            ApiError::InvalidResponse(format!(
                "Release {} not found after creation",
                created.release_id
            ))
            .into()
        })
    }
}

// ============================================================================
// LookupApi
// ============================================================================

#[async_trait]
impl LookupApi for FodClient {
    async fn list_users(&self, filters: &FilterParams) -> Result<Vec<UserDescriptor>> {
        self.list_lookup("/users", filters).await
    }

    async fn list_user_groups(&self, filters: &FilterParams) -> Result<Vec<UserGroupDescriptor>> {
        self.list_lookup("/user-management/user-groups", filters)
            .await
    }

    async fn list_attributes(&self) -> Result<Vec<AttributeDefinition>> {
        let envelope: ItemsEnvelope<AttributeDefinition> = self.get("/attributes", &[]).await?;
        Ok(envelope.items)
    }
}
