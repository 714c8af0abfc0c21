//! HTTP client with automatic token attachment and silent refresh.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::watch;
use tracing::debug;

use super::error::ClientError;
use super::session::{Session, SessionStore};
use crate::web::dto::{
    ApiResponse, AuthData, LoginRequest, RefreshData, RefreshRequest, RegisterRequest, UserDetail,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<Vec<String>>,
}

/// Typed client for the minera API.
///
/// Authorized calls attach the stored access token. On a 401, the client
/// refreshes the access token once and resubmits the request once; if the
/// refresh itself fails, the session is cleared, the sign-out signal is
/// raised, and the call returns `SessionExpired`.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
    signout_tx: watch::Sender<u64>,
}

impl ApiClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: impl Into<String>, store: Arc<dyn SessionStore>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let (signout_tx, _) = watch::channel(0);

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
            signout_tx,
        })
    }

    /// Subscribe to the sign-out signal.
    ///
    /// The value increments each time the session is invalidated because
    /// a refresh failed. UIs watch this to route back to the login screen.
    pub fn signed_out(&self) -> watch::Receiver<u64> {
        self.signout_tx.subscribe()
    }

    /// The current session, if signed in.
    pub fn session(&self) -> Option<Session> {
        self.store.get()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sign in and persist the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let resp = self
            .http
            .post(self.url("/auth/login"))
            .json(&LoginRequest::new(email, password))
            .send()
            .await?;

        let data: AuthData = parse(resp).await?;
        let session = Session {
            access_token: data.access_token,
            refresh_token: data.refresh_token,
            user: data.user,
        };
        self.store.set(session.clone());

        debug!("Signed in as {}", session.user.email);
        Ok(session)
    }

    /// Register a new account and persist the session.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, ClientError> {
        let resp = self
            .http
            .post(self.url("/auth/register"))
            .json(&RegisterRequest::new(name, email, password))
            .send()
            .await?;

        let data: AuthData = parse(resp).await?;
        let session = Session {
            access_token: data.access_token,
            refresh_token: data.refresh_token,
            user: data.user,
        };
        self.store.set(session.clone());
        Ok(session)
    }

    /// Sign out: notify the server (best effort) and discard the session.
    pub async fn logout(&self) -> Result<(), ClientError> {
        if let Some(session) = self.store.get() {
            // Tokens are stateless; a failed logout call changes nothing
            let _ = self
                .http
                .post(self.url("/auth/logout"))
                .bearer_auth(&session.access_token)
                .send()
                .await;
        }
        self.store.clear();
        Ok(())
    }

    /// Fetch the signed-in user's profile.
    pub async fn me(&self) -> Result<UserDetail, ClientError> {
        self.get("/auth/me").await
    }

    /// Authorized GET returning the envelope's data payload.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path);
        let resp = self
            .send_authorized(|| self.http.get(&url))
            .await?;
        parse(resp).await
    }

    /// Authorized POST returning the envelope's data payload.
    pub async fn post<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = self.url(path);
        let resp = self
            .send_authorized(|| self.http.post(&url).json(body))
            .await?;
        parse(resp).await
    }

    /// Authorized DELETE returning the envelope's data payload.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path);
        let resp = self
            .send_authorized(|| self.http.delete(&url))
            .await?;
        parse(resp).await
    }

    /// Send a request with the access token, refreshing it once on 401.
    ///
    /// The builder closure is called again for the retry so the request
    /// body is rebuilt rather than cloned.
    async fn send_authorized<F>(&self, build: F) -> Result<Response, ClientError>
    where
        F: Fn() -> RequestBuilder,
    {
        let session = self.store.get();

        let mut req = build();
        if let Some(s) = &session {
            req = req.bearer_auth(&s.access_token);
        }

        let resp = req.send().await?;
        if resp.status() != StatusCode::UNAUTHORIZED {
            return Ok(resp);
        }

        // Without a session there is nothing to refresh with; surface the
        // 401 as a plain API error.
        let Some(session) = session else {
            return Err(api_error(resp).await);
        };

        debug!("Access token rejected, attempting silent refresh");

        let new_access = match self.refresh_access_token(&session).await {
            Ok(token) => token,
            Err(_) => {
                self.force_sign_out();
                return Err(ClientError::SessionExpired);
            }
        };

        // Exactly one resubmission; a second 401 propagates as-is
        let resp = build().bearer_auth(&new_access).send().await?;
        Ok(resp)
    }

    /// Exchange the refresh token for a new access token and persist it.
    ///
    /// The refresh token itself is not rotated and stays in the store.
    async fn refresh_access_token(&self, session: &Session) -> Result<String, ClientError> {
        let resp = self
            .http
            .post(self.url("/auth/refresh"))
            .json(&RefreshRequest {
                refresh_token: session.refresh_token.clone(),
            })
            .send()
            .await?;

        let data: RefreshData = parse(resp).await?;

        self.store.set(Session {
            access_token: data.access_token.clone(),
            refresh_token: session.refresh_token.clone(),
            user: data.user,
        });

        Ok(data.access_token)
    }

    /// Clear the session and raise the sign-out signal.
    pub fn force_sign_out(&self) {
        self.store.clear();
        self.signout_tx.send_modify(|n| *n += 1);
    }
}

/// Unwrap the success envelope or convert the error body.
async fn parse<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    if resp.status().is_success() {
        let envelope: ApiResponse<T> = resp.json().await?;
        Ok(envelope.data)
    } else {
        Err(api_error(resp).await)
    }
}

async fn api_error(resp: Response) -> ClientError {
    let status = resp.status().as_u16();
    let body = resp.json::<ErrorBody>().await.unwrap_or(ErrorBody {
        message: None,
        errors: None,
    });

    ClientError::Api {
        status,
        message: body
            .message
            .unwrap_or_else(|| "Unexpected server error".to_string()),
        errors: body.errors,
    }
}
