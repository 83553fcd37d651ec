//! Sign-in and registration.
//!
//! The local authenticator only requires credentials that pass validation.
//! The remote one exchanges them with the API for a session key, which the
//! remote store then sends with every request.

use crate::config::{ApiConfig, ShopConfig, StorageBackend};
use crate::domain::{Email, Password, Username};
use crate::errors::AppError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const UNKNOWN_USER: &str = "This user does not exist!";
pub const USER_EXISTS: &str = "This user already exists!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub key: Option<String>,
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(&self, username: &Username, password: &Password) -> Result<Session, AppError>;
    async fn register(
        &self,
        username: &Username,
        email: &Email,
        password: &Password,
    ) -> Result<Session, AppError>;
}

/// Accepts any well formed credentials.
#[derive(Debug, Default)]
pub struct LocalAuthenticator;

#[async_trait]
impl Authenticator for LocalAuthenticator {
    async fn login(&self, username: &Username, _password: &Password) -> Result<Session, AppError> {
        log::info!("Local login for {}", username);
        Ok(Session {
            username: username.to_string(),
            key: None,
        })
    }

    async fn register(
        &self,
        username: &Username,
        _email: &Email,
        _password: &Password,
    ) -> Result<Session, AppError> {
        log::info!("Local registration for {}", username);
        Ok(Session {
            username: username.to_string(),
            key: None,
        })
    }
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegistrationRequest<'a> {
    username: &'a str,
    email: &'a str,
    password1: &'a str,
    password2: &'a str,
}

#[derive(Debug, Deserialize)]
struct KeyResponse {
    key: String,
}

pub struct RemoteAuthenticator {
    client: Client,
    base_url: String,
}

impl RemoteAuthenticator {
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Posts `body` and pulls the session key out of a successful reply.
    /// A client error status is reported as `rejection`.
    async fn exchange<T: Serialize + Sync>(
        &self,
        path: &str,
        body: &T,
        rejection: &str,
    ) -> Result<String, AppError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.post(&url).json(body).send().await?;
        let status = resp.status();

        if status.is_client_error() && status != StatusCode::TOO_MANY_REQUESTS {
            log::warn!("POST {} rejected with {}", url, status);
            return Err(AppError::Auth(rejection.to_string()));
        }
        if !status.is_success() {
            let error = format!("POST {} returned {}", url, status);
            log::error!("{}", error);
            return Err(AppError::Http(error));
        }

        let body = resp
            .json::<KeyResponse>()
            .await
            .map_err(|e| AppError::Http(format!("Failed to parse response from {}: {}", url, e)))?;
        Ok(body.key)
    }
}

#[async_trait]
impl Authenticator for RemoteAuthenticator {
    async fn login(&self, username: &Username, password: &Password) -> Result<Session, AppError> {
        let request = LoginRequest {
            username: username.value(),
            password: password.expose(),
        };
        let key = self.exchange("/auth/login/", &request, UNKNOWN_USER).await?;
        log::info!("Logged in as {}", username);
        Ok(Session {
            username: username.to_string(),
            key: Some(key),
        })
    }

    async fn register(
        &self,
        username: &Username,
        email: &Email,
        password: &Password,
    ) -> Result<Session, AppError> {
        let request = RegistrationRequest {
            username: username.value(),
            email: email.value(),
            password1: password.expose(),
            password2: password.expose(),
        };
        let key = self
            .exchange("/auth/registration/", &request, USER_EXISTS)
            .await?;
        log::info!("Registered {}", username);
        Ok(Session {
            username: username.to_string(),
            key: Some(key),
        })
    }
}

/// The remote backend signs in against the API; the file backend needs no
/// server.
pub fn from_config(config: &ShopConfig) -> Result<Box<dyn Authenticator>, AppError> {
    match config.storage.backend {
        StorageBackend::File => Ok(Box::new(LocalAuthenticator)),
        StorageBackend::Remote => Ok(Box::new(RemoteAuthenticator::new(&config.api)?)),
    }
}
