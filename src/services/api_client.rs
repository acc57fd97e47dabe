//! Graduation backend API client.
//!
//! Provides an HTTP client for the backend's REST API with bearer
//! authentication, transparent token refresh and pagination.

use crate::config::ClientSettings;
use crate::error::AppError;
use crate::models::approval::{ApprovalGate, ApprovalRecord};
use crate::models::ceremony::{Ceremony, CeremonyInput};
use crate::models::message::{Message, NewMessage};
use crate::models::student::Student;
use crate::models::user::UserProfile;
use crate::services::credentials::AuthTokens;
use crate::services::session::SessionContext;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

/// API client configuration.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL of the backend API (e.g., `https://grad.example.edu/api`).
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Items requested per page when walking collections.
    pub page_size: u32,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self::from(&ClientSettings::default())
    }
}

impl From<&ClientSettings> for ApiClientConfig {
    fn from(settings: &ClientSettings) -> Self {
        Self {
            base_url: settings.api_base_url.clone(),
            timeout_secs: settings.timeout_secs,
            page_size: settings.page_size,
        }
    }
}

/// One page of a paginated collection (zero-based page index).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
}

impl<T> Page<T> {
    /// Whether another page follows page `index`.
    ///
    /// The index is the one requested; the echoed `page` field is optional.
    pub fn has_next_after(&self, index: u32) -> bool {
        index + 1 < self.total_pages
    }
}

/// Response from the login endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: UserProfile,
}

impl LoginResponse {
    pub fn tokens(&self) -> AuthTokens {
        AuthTokens {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordChangeRequest<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

#[derive(Serialize)]
struct DecisionRequest {
    approved: bool,
}

/// Backend API client.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiClientConfig,
    session: SessionContext,
    /// Serializes token refreshes across concurrent requests.
    refresh_lock: Arc<Mutex<()>>,
}

impl ApiClient {
    /// Create a new API client reading tokens from `session`.
    pub fn new(config: ApiClientConfig, session: SessionContext) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            session,
            refresh_lock: Arc::new(Mutex::new(())),
        })
    }

    /// The session this client authenticates with.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Build the full URL for an API path.
    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Attach a bearer token, if any.
    fn with_bearer(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send an authenticated request.
    ///
    /// A 401 triggers one token refresh and one retry. Concurrent 401s share
    /// a single refresh: a request whose token was already replaced while it
    /// waited retries with the new one. If no refresh is possible the session
    /// is cleared and `AuthenticationExpired` returned.
    async fn send<F>(&self, endpoint: &str, build: F) -> Result<Response, AppError>
    where
        F: Fn(&Client, &str) -> RequestBuilder,
    {
        let url = self.api_url(endpoint);

        let sent_token = self.session.access_token().await;
        let response = Self::with_bearer(build(&self.client, &url), sent_token.as_deref())
            .send()
            .await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let retry_token = {
            let _guard = self.refresh_lock.lock().await;
            let current = self.session.access_token().await;
            if current.is_some() && current != sent_token {
                log::debug!("[api] Session refreshed by another request, retrying {}", endpoint);
                current
            } else if self.refresh_session().await? {
                self.session.access_token().await
            } else {
                return Err(self.expire_session().await);
            }
        };

        let retried = Self::with_bearer(build(&self.client, &url), retry_token.as_deref())
            .send()
            .await?;
        if retried.status() == StatusCode::UNAUTHORIZED {
            return Err(self.expire_session().await);
        }
        Ok(retried)
    }

    /// Exchange the refresh token for a new token pair.
    async fn refresh_session(&self) -> Result<bool, AppError> {
        let Some(refresh_token) = self.session.refresh_token().await else {
            return Ok(false);
        };

        log::info!("[api] Access token rejected, refreshing session");
        let response = self
            .client
            .post(self.api_url("/auth/refresh"))
            .json(&RefreshRequest {
                refresh_token: &refresh_token,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            log::warn!("[api] Token refresh failed ({})", response.status());
            return Ok(false);
        }

        let mut tokens: AuthTokens = response
            .json()
            .await
            .map_err(|e| AppError::internal(format!("Failed to parse refresh response: {}", e)))?;
        if tokens.refresh_token.is_none() {
            tokens.refresh_token = Some(refresh_token);
        }
        self.session.update_tokens(tokens).await?;
        Ok(true)
    }

    /// Clear the session and build the error the UI redirects on.
    async fn expire_session(&self) -> AppError {
        if let Err(e) = self.session.logout().await {
            log::warn!("[api] Failed to clear expired session: {}", e);
        }
        AppError::authentication_expired("Session expired. Please sign in again.")
    }

    /// Turn a non-success response into an error.
    async fn error_from_response(response: Response, endpoint: &str) -> AppError {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return AppError::authentication_expired("Session expired. Please sign in again.");
        }

        let status_code = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        let body_message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                // Errors come back as {"message": "..."} or {"error": "..."}
                v.get("message")
                    .or_else(|| v.get("error"))
                    .and_then(|m| m.as_str().map(String::from))
            });

        let message = match (status, body_message) {
            (_, Some(msg)) if !msg.is_empty() => msg,
            (StatusCode::FORBIDDEN, _) => "Access denied".to_string(),
            (StatusCode::NOT_FOUND, _) => "Resource not found".to_string(),
            _ => format!("Request failed ({}): {}", status_code, body),
        };

        AppError::api_full(message, status_code, endpoint)
    }

    /// Decode a successful response or convert the failure.
    async fn handle_response<T: DeserializeOwned>(
        response: Response,
        endpoint: &str,
    ) -> Result<T, AppError> {
        if response.status().is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| AppError::internal(format!("Failed to parse response: {}", e)))
        } else {
            Err(Self::error_from_response(response, endpoint).await)
        }
    }

    /// Accept any success status, ignoring the body.
    async fn expect_success(response: Response, endpoint: &str) -> Result<(), AppError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from_response(response, endpoint).await)
        }
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, AppError> {
        let response = self.send(endpoint, |c, url| c.get(url)).await?;
        Self::handle_response(response, endpoint).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self.send(endpoint, |c, url| c.post(url).json(body)).await?;
        Self::handle_response(response, endpoint).await
    }

    async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self.send(endpoint, |c, url| c.put(url).json(body)).await?;
        Self::handle_response(response, endpoint).await
    }

    /// Fetch one page of a collection.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        page: u32,
    ) -> Result<Page<T>, AppError> {
        let size = self.config.page_size;
        let response = self
            .send(endpoint, |c, url| {
                c.get(url)
                    .query(&[("page", page.to_string()), ("size", size.to_string())])
            })
            .await?;
        Self::handle_response(response, endpoint).await
    }

    /// Fetch all pages of a paginated endpoint.
    pub async fn get_all_pages<T: DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<Vec<T>, AppError> {
        let mut all_data = Vec::new();
        let mut page = 0u32;

        loop {
            let current: Page<T> = self.get_page(endpoint, page).await?;
            let has_next = current.has_next_after(page) && !current.content.is_empty();
            all_data.extend(current.content);

            if !has_next {
                break;
            }
            page += 1;
        }

        Ok(all_data)
    }

    // --- Authentication ---

    /// Exchange credentials for a token pair. Does not touch the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        let endpoint = "/auth/login";
        let response = self
            .client
            .post(self.api_url(endpoint))
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::BAD_REQUEST => {
                Err(AppError::authentication("Invalid email or password"))
            }
            _ => Self::handle_response(response, endpoint).await,
        }
    }

    /// Tell the backend the session ends.
    pub async fn logout(&self) -> Result<(), AppError> {
        let endpoint = "/auth/logout";
        let response = self.send(endpoint, |c, url| c.post(url)).await?;
        Self::expect_success(response, endpoint).await
    }

    /// Fetch the signed-in user's profile.
    pub async fn current_user(&self) -> Result<UserProfile, AppError> {
        self.get("/users/me").await
    }

    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let endpoint = "/users/me/password";
        let body = PasswordChangeRequest {
            current_password,
            new_password,
        };
        let response = self.send(endpoint, |c, url| c.put(url).json(&body)).await?;
        Self::expect_success(response, endpoint).await
    }

    // --- Student rosters ---

    pub async fn list_all_students(&self) -> Result<Vec<Student>, AppError> {
        self.get_all_pages("/students").await
    }

    pub async fn list_students_by_department(
        &self,
        department: &str,
    ) -> Result<Vec<Student>, AppError> {
        let endpoint = format!("/students/department/{}", urlencoding::encode(department));
        self.get_all_pages(&endpoint).await
    }

    pub async fn list_students_by_faculty(&self, faculty: &str) -> Result<Vec<Student>, AppError> {
        let endpoint = format!("/students/faculty/{}", urlencoding::encode(faculty));
        self.get_all_pages(&endpoint).await
    }

    pub async fn list_advisees(&self, advisor_id: i64) -> Result<Vec<Student>, AppError> {
        self.get_all_pages(&format!("/advisors/{}/students", advisor_id))
            .await
    }

    // --- Approvals ---

    /// Look up a student's approval record.
    ///
    /// A 404 or an empty (`null`) body both mean the record does not exist.
    pub async fn get_student_approval(&self, student_id: i64) -> Result<ApprovalRecord, AppError> {
        let endpoint = format!("/approvals/student/{}", student_id);
        let missing = || AppError::not_found_with_id("ApprovalRecord", student_id.to_string());

        match self.get::<Option<ApprovalRecord>>(&endpoint).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => Err(missing()),
            Err(e) if e.status_code() == Some(404) => Err(missing()),
            Err(e) => Err(e),
        }
    }

    /// Submit a decision for one gate of a record.
    pub async fn submit_decision(
        &self,
        record_id: i64,
        gate: ApprovalGate,
        approved: bool,
    ) -> Result<ApprovalRecord, AppError> {
        let endpoint = format!("/approvals/{}/{}", record_id, gate.endpoint_segment());
        self.put(&endpoint, &DecisionRequest { approved }).await
    }

    // --- Ceremonies ---

    pub async fn list_ceremonies(&self) -> Result<Vec<Ceremony>, AppError> {
        self.get("/ceremonies").await
    }

    pub async fn create_ceremony(&self, input: &CeremonyInput) -> Result<Ceremony, AppError> {
        self.post("/ceremonies", input).await
    }

    pub async fn update_ceremony(
        &self,
        ceremony_id: i64,
        input: &CeremonyInput,
    ) -> Result<Ceremony, AppError> {
        self.put(&format!("/ceremonies/{}", ceremony_id), input).await
    }

    pub async fn delete_ceremony(&self, ceremony_id: i64) -> Result<(), AppError> {
        let endpoint = format!("/ceremonies/{}", ceremony_id);
        let response = self.send(&endpoint, |c, url| c.delete(url)).await?;
        Self::expect_success(response, &endpoint).await
    }

    // --- Messages ---

    pub async fn inbox(&self) -> Result<Vec<Message>, AppError> {
        self.get_all_pages("/messages/inbox").await
    }

    pub async fn sent_messages(&self) -> Result<Vec<Message>, AppError> {
        self.get_all_pages("/messages/sent").await
    }

    pub async fn send_message(&self, message: &NewMessage) -> Result<Message, AppError> {
        self.post("/messages", message).await
    }

    pub async fn mark_message_read(&self, message_id: i64) -> Result<(), AppError> {
        let endpoint = format!("/messages/{}/read", message_id);
        let response = self.send(&endpoint, |c, url| c.put(url)).await?;
        Self::expect_success(response, &endpoint).await
    }
}
