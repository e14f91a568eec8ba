use crate::api_client::ApiClient;
use crate::authentication::acquire_session;
use crate::configuration::Settings;
use crate::recommendation::request_recommendation;
use crate::report::Report;
use anyhow::Context;
use std::io::Write;
use std::process::ExitCode;
use uuid::Uuid;

/// How a probe run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// A session was acquired and the recommendation call was attempted,
    /// whatever its result.
    Completed,
    /// Neither registration nor login produced a token.
    Aborted,
}

impl ProbeOutcome {
    pub fn code(self) -> u8 {
        match self {
            ProbeOutcome::Completed => 0,
            ProbeOutcome::Aborted => 1,
        }
    }

    pub fn exit_code(self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

/// Bootstraps a session, then requests one recommendation, writing the
/// transcript to `out`.
///
/// Only configuration and I/O problems surface as `Err`; every HTTP
/// failure is reported and folded into the returned [`ProbeOutcome`].
#[tracing::instrument(
    name = "Probe run",
    skip(settings, out),
    fields(run_id = %Uuid::new_v4(), base_url = %settings.api.base_url)
)]
pub async fn run_probe<W: Write>(
    settings: &Settings,
    out: W,
) -> Result<ProbeOutcome, anyhow::Error> {
    let account = &settings.fixture.account;
    let credentials = account
        .credentials()
        .map_err(anyhow::Error::msg)
        .context("Invalid account fixture.")?;
    let profile = account
        .profile()
        .map_err(anyhow::Error::msg)
        .context("Invalid account fixture.")?;
    let client =
        ApiClient::from_settings(&settings.api).context("Failed to build the HTTP client.")?;
    let mut report = Report::new(out);

    let session = match acquire_session(&client, &credentials, &profile).await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(error.cause_chain = ?e, "Aborting: no session could be acquired");
            report.bootstrap_failed(&e)?;
            report.flush()?;
            return Ok(ProbeOutcome::Aborted);
        }
    };
    report.session_acquired(&session)?;

    let outcome = request_recommendation(&client, &session.token, &settings.fixture.reading).await;
    report.recommendation(&outcome)?;
    report.flush()?;
    Ok(ProbeOutcome::Completed)
}
