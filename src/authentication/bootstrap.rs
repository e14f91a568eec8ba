use crate::api_client::{ApiClient, ApiReply};
use crate::domain::{Credentials, SessionToken, UserProfile};
use crate::telemetry::error_chain_fmt;
use anyhow::Context;
use reqwest::StatusCode;
use secrecy::Secret;

#[derive(thiserror::Error)]
pub enum AuthError {
    #[error("The server answered with status {status}.")]
    Rejected { status: StatusCode, body: String },
    #[error("The response did not carry a usable access token.")]
    MissingToken(#[source] anyhow::Error),
    #[error("Failed to reach the server.")]
    Transport(#[source] reqwest::Error),
}

impl std::fmt::Debug for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Neither registration nor login produced a token.
#[derive(thiserror::Error)]
#[error("Both registration and login failed.")]
pub struct BootstrapError {
    pub registration: AuthError,
    #[source]
    pub login: AuthError,
}

impl std::fmt::Debug for BootstrapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
    Registration,
    Login,
}

#[derive(Debug)]
pub struct Session {
    pub token: SessionToken,
    pub source: SessionSource,
    /// Set when login had to step in for a failed registration.
    pub registration_failure: Option<AuthError>,
}

#[derive(serde::Deserialize)]
struct TokenResponse {
    access_token: Secret<String>,
}

fn extract_token(reply: ApiReply) -> Result<SessionToken, AuthError> {
    if reply.status != StatusCode::OK {
        return Err(AuthError::Rejected {
            status: reply.status,
            body: reply.body,
        });
    }
    let response: TokenResponse = serde_json::from_str(&reply.body)
        .context("Failed to parse the auth response body.")
        .map_err(AuthError::MissingToken)?;
    SessionToken::parse(response.access_token)
        .map_err(|e| AuthError::MissingToken(anyhow::anyhow!(e)))
}

fn log_failure(step: &str, e: &AuthError) {
    match e {
        AuthError::Transport(source) => tracing::warn!(
            step = %step,
            timeout = source.is_timeout(),
            connect = source.is_connect(),
            error.cause_chain = ?e,
            "Could not reach the auth endpoint"
        ),
        _ => tracing::warn!(
            step = %step,
            error.cause_chain = ?e,
            error.message = %e,
            "Auth step did not yield a token"
        ),
    }
}

/// Registers the account, falling back to a single login attempt when
/// registration yields no token.
#[tracing::instrument(
    name = "Acquire session",
    skip(client, credentials, profile),
    fields(email = %credentials.email, source = tracing::field::Empty)
)]
pub async fn acquire_session(
    client: &ApiClient,
    credentials: &Credentials,
    profile: &UserProfile,
) -> Result<Session, BootstrapError> {
    let registration = client
        .register(credentials, profile)
        .await
        .map_err(AuthError::Transport)
        .and_then(extract_token);
    let registration_failure = match registration {
        Ok(token) => {
            tracing::Span::current().record("source", "registration");
            return Ok(Session {
                token,
                source: SessionSource::Registration,
                registration_failure: None,
            });
        }
        Err(e) => {
            log_failure("registration", &e);
            e
        }
    };

    let login = client
        .login(credentials)
        .await
        .map_err(AuthError::Transport)
        .and_then(extract_token);
    match login {
        Ok(token) => {
            tracing::Span::current().record("source", "login");
            Ok(Session {
                token,
                source: SessionSource::Login,
                registration_failure: Some(registration_failure),
            })
        }
        Err(e) => {
            log_failure("login", &e);
            Err(BootstrapError {
                registration: registration_failure,
                login: e,
            })
        }
    }
}
