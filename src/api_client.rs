use crate::configuration::ApiSettings;
use crate::domain::{Credentials, SessionToken, SoilReading, UserProfile};
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;

pub const REGISTER_PATH: &str = "/api/auth/register";
pub const LOGIN_PATH: &str = "/api/auth/login";
pub const FERTILIZER_RECOMMENDATION_PATH: &str = "/api/soil-health/fertilizer-recommendation";

#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    http_client: Client,
}

#[derive(serde::Serialize)]
struct RegisterRequest<'a> {
    email: &'a str,
    password: &'a str,
    name: &'a str,
    phone: &'a str,
    lat: f64,
    lon: f64,
    region: &'a str,
}

#[derive(serde::Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Status and fully-read body of a response.
#[derive(Debug)]
pub struct ApiReply {
    pub status: StatusCode,
    pub body: String,
}

impl ApiReply {
    async fn read(response: reqwest::Response) -> Result<Self, reqwest::Error> {
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(status = status.as_u16(), "Received response");
        Ok(Self { status, body })
    }
}

impl ApiClient {
    pub fn new(
        base_url: String,
        timeout: std::time::Duration,
        accept_invalid_certs: bool,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn from_settings(settings: &ApiSettings) -> Result<Self, reqwest::Error> {
        Self::new(
            settings.base_url.clone(),
            settings.timeout(),
            settings.accept_invalid_certs,
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    #[tracing::instrument(
        name = "Registering account",
        skip(self, credentials, profile),
        fields(email = %credentials.email)
    )]
    pub async fn register(
        &self,
        credentials: &Credentials,
        profile: &UserProfile,
    ) -> Result<ApiReply, reqwest::Error> {
        let request_body = RegisterRequest {
            email: credentials.email.as_ref(),
            password: credentials.password.expose_secret(),
            name: &profile.name,
            phone: &profile.phone,
            lat: profile.location.latitude(),
            lon: profile.location.longitude(),
            region: &profile.region,
        };
        let response = self
            .http_client
            .post(self.url(REGISTER_PATH))
            .json(&request_body)
            .send()
            .await?;
        ApiReply::read(response).await
    }

    #[tracing::instrument(
        name = "Logging in",
        skip(self, credentials),
        fields(email = %credentials.email)
    )]
    pub async fn login(&self, credentials: &Credentials) -> Result<ApiReply, reqwest::Error> {
        let request_body = LoginRequest {
            email: credentials.email.as_ref(),
            password: credentials.password.expose_secret(),
        };
        let response = self
            .http_client
            .post(self.url(LOGIN_PATH))
            .json(&request_body)
            .send()
            .await?;
        ApiReply::read(response).await
    }

    #[tracing::instrument(name = "Requesting fertilizer recommendation", skip(self, token))]
    pub async fn fertilizer_recommendation(
        &self,
        token: &SessionToken,
        reading: &SoilReading,
    ) -> Result<ApiReply, reqwest::Error> {
        let response = self
            .http_client
            .post(self.url(FERTILIZER_RECOMMENDATION_PATH))
            .bearer_auth(token.expose_secret())
            .json(reading)
            .send()
            .await?;
        ApiReply::read(response).await
    }
}
