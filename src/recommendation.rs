use crate::api_client::ApiClient;
use crate::domain::{SessionToken, SoilReading};
use crate::telemetry::error_chain_fmt;
use reqwest::StatusCode;

#[derive(Debug)]
pub enum RecommendationOutcome {
    /// Status 200 with a JSON body. The structure belongs to the service.
    Recommended(serde_json::Value),
    Rejected { status: StatusCode, body: String },
}

#[derive(thiserror::Error)]
pub enum RecommendationError {
    #[error("Failed to reach the recommendation endpoint.")]
    Transport(#[source] reqwest::Error),
    #[error("The response body is not valid JSON.")]
    InvalidBody(#[source] serde_json::Error),
}

impl std::fmt::Debug for RecommendationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Sends one reading to the fertilizer-recommendation endpoint. No retries.
#[tracing::instrument(name = "Request recommendation", skip(client, token, reading))]
pub async fn request_recommendation(
    client: &ApiClient,
    token: &SessionToken,
    reading: &SoilReading,
) -> Result<RecommendationOutcome, RecommendationError> {
    let reply = client
        .fertilizer_recommendation(token, reading)
        .await
        .map_err(|e| {
            tracing::error!(
                timeout = e.is_timeout(),
                connect = e.is_connect(),
                error.cause_chain = ?e,
                "Failed to send the recommendation request"
            );
            RecommendationError::Transport(e)
        })?;

    if reply.status != StatusCode::OK {
        tracing::warn!(
            status = reply.status.as_u16(),
            "Recommendation request was not accepted"
        );
        return Ok(RecommendationOutcome::Rejected {
            status: reply.status,
            body: reply.body,
        });
    }
    let recommendation =
        serde_json::from_str(&reply.body).map_err(RecommendationError::InvalidBody)?;
    Ok(RecommendationOutcome::Recommended(recommendation))
}
