use crate::authentication::{AuthError, BootstrapError, Session, SessionSource};
use crate::recommendation::{RecommendationError, RecommendationOutcome};
use crate::telemetry::error_chain_line;
use std::io::Write;

/// Human-readable transcript of a probe run.
pub struct Report<W> {
    out: W,
}

fn describe(e: &AuthError) -> String {
    match e {
        AuthError::Rejected { body, .. } => body.clone(),
        AuthError::MissingToken(source) => format!("no access token in response: {:#}", source),
        AuthError::Transport(source) => {
            format!("could not reach the server: {}", error_chain_line(source))
        }
    }
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn session_acquired(&mut self, session: &Session) -> std::io::Result<()> {
        if let Some(e) = &session.registration_failure {
            writeln!(self.out, "Registration failed: {}", describe(e))?;
        }
        match session.source {
            SessionSource::Registration => {
                writeln!(self.out, "Registration successful, got token")
            }
            SessionSource::Login => writeln!(self.out, "Login successful, got token"),
        }
    }

    pub fn bootstrap_failed(&mut self, e: &BootstrapError) -> std::io::Result<()> {
        writeln!(self.out, "Registration failed: {}", describe(&e.registration))?;
        writeln!(self.out, "Login also failed: {}", describe(&e.login))
    }

    pub fn recommendation(
        &mut self,
        outcome: &Result<RecommendationOutcome, RecommendationError>,
    ) -> std::io::Result<()> {
        match outcome {
            Ok(RecommendationOutcome::Recommended(value)) => {
                writeln!(self.out, "Status Code: 200")?;
                writeln!(self.out, "API Response:")?;
                let pretty = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
                writeln!(self.out, "{}", pretty)
            }
            Ok(RecommendationOutcome::Rejected { status, body }) => {
                writeln!(self.out, "Status Code: {}", status.as_u16())?;
                writeln!(self.out, "Error: {}", body)
            }
            Err(RecommendationError::InvalidBody(source)) => {
                writeln!(self.out, "Status Code: 200")?;
                writeln!(self.out, "Error: response body is not valid JSON: {}", source)
            }
            Err(RecommendationError::Transport(source)) => {
                writeln!(
                    self.out,
                    "Error connecting to API: {}",
                    error_chain_line(source)
                )
            }
        }
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
