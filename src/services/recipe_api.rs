//! Recipe server client for PantryChef.
//!
//! [`RecipeApi`] is the network seam of the recipe board: `POST /generate`
//! returns the raw reply for the board to classify, `POST /favorite` only
//! reports success or failure, and `POST /login` opens the session both of
//! them need. [`HttpRecipeApi`] implements it with `reqwest`.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};

use crate::types::errors::ApiError;
use crate::types::recipe::{ApiResponse, FavoriteRequest, GenerateRequest, LoginRequest};
use crate::types::settings::ServerSettings;

/// Trait defining the calls made to the recipe server.
#[allow(async_fn_in_trait)]
pub trait RecipeApi {
    /// Sends the pantry query. Any HTTP status is returned as a response;
    /// only transport failures are errors.
    async fn generate(&self, request: &GenerateRequest) -> Result<ApiResponse, ApiError>;
    /// Saves a favorite. Non-success statuses are errors; the body is ignored.
    async fn save_favorite(&self, favorite: &FavoriteRequest) -> Result<(), ApiError>;
    /// Signs in. On success later calls carry the session cookie.
    async fn login(&self, credentials: &LoginRequest) -> Result<(), ApiError>;

    /// Session cookies as a `Cookie` header value, if the server set any.
    fn session(&self) -> Option<String> {
        None
    }

    /// Puts cookies from an earlier [`RecipeApi::session`] back in place.
    fn restore_session(&self, _cookies: &str) {}
}

/// `reqwest`-backed client keeping a cookie jar, so the server session survives between calls.
pub struct HttpRecipeApi {
    client: Client,
    jar: Arc<Jar>,
    generate_url: Url,
    favorite_url: Url,
    login_url: Url,
}

impl HttpRecipeApi {
    pub fn new(settings: &ServerSettings) -> Result<Self, ApiError> {
        let jar = Arc::new(Jar::default());
        let mut builder = Client::builder().cookie_provider(jar.clone());
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::ClientError(e.to_string()))?;

        Ok(Self {
            client,
            jar,
            generate_url: endpoint(&settings.base_url, &settings.generate_path)?,
            favorite_url: endpoint(&settings.base_url, &settings.favorite_path)?,
            login_url: endpoint(&settings.base_url, &settings.login_path)?,
        })
    }

    pub fn generate_url(&self) -> &Url {
        &self.generate_url
    }
}

/// Joins a base URL and an absolute endpoint path.
pub fn endpoint(base_url: &str, path: &str) -> Result<Url, ApiError> {
    let raw = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&raw).map_err(|_| ApiError::InvalidUrl(raw))
}

impl RecipeApi for HttpRecipeApi {
    async fn generate(&self, request: &GenerateRequest) -> Result<ApiResponse, ApiError> {
        debug!("POST {}", self.generate_url);
        let response = self
            .client
            .post(self.generate_url.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        Ok(ApiResponse {
            status,
            content_type,
            body,
        })
    }

    async fn save_favorite(&self, favorite: &FavoriteRequest) -> Result<(), ApiError> {
        debug!("POST {}", self.favorite_url);
        let response = self
            .client
            .post(self.favorite_url.clone())
            .json(favorite)
            .send()
            .await
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }
        Ok(())
    }

    /// Posts the login form. The server redirects away from the login page on
    /// success and renders the form again on failure, so a reply that ends on
    /// the login path is a rejection.
    async fn login(&self, credentials: &LoginRequest) -> Result<(), ApiError> {
        debug!("POST {} as {}", self.login_url, credentials.username);
        let response = self
            .client
            .post(self.login_url.clone())
            .form(credentials)
            .send()
            .await
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }
        if response.url().path() == self.login_url.path() {
            return Err(ApiError::LoginRejected);
        }
        Ok(())
    }

    fn session(&self) -> Option<String> {
        let header = self.jar.cookies(&self.generate_url)?;
        header.to_str().ok().map(str::to_string)
    }

    fn restore_session(&self, cookies: &str) {
        for pair in cookies.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            self.jar
                .add_cookie_str(&format!("{}; Path=/", pair), &self.generate_url);
        }
    }
}
