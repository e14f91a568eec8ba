use crate::helpers::{
    ProbeRun, spawn_probe, test_settings, token_response, too_slow, when_logging_in,
    when_registering, when_requesting_a_recommendation,
};
use fertilizer_probe::probe::{ProbeOutcome, run_probe};
use wiremock::ResponseTemplate;
use wiremock::matchers::header;

#[tokio::test]
async fn a_successful_registration_skips_login() {
    // Arrange
    let probe = spawn_probe().await;
    when_registering()
        .respond_with(token_response("registration-token"))
        .expect(1)
        .mount(&probe.mock_server)
        .await;
    when_logging_in()
        .respond_with(token_response("login-token"))
        .expect(0)
        .mount(&probe.mock_server)
        .await;
    when_requesting_a_recommendation()
        .and(header("Authorization", "Bearer registration-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&probe.mock_server)
        .await;

    // Act
    let ProbeRun { outcome, output } = probe.run().await;

    // Assert
    assert_eq!(outcome, ProbeOutcome::Completed);
    assert!(output.starts_with("Registration successful, got token\n"));
}

#[tokio::test]
async fn a_rejected_registration_triggers_exactly_one_login() {
    // Arrange
    let probe = spawn_probe().await;
    when_registering()
        .respond_with(ResponseTemplate::new(400).set_body_string("Email already registered"))
        .expect(1)
        .mount(&probe.mock_server)
        .await;
    when_logging_in()
        .respond_with(token_response("login-token"))
        .expect(1)
        .mount(&probe.mock_server)
        .await;
    when_requesting_a_recommendation()
        .and(header("Authorization", "Bearer login-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&probe.mock_server)
        .await;

    // Act
    let ProbeRun { outcome, output } = probe.run().await;

    // Assert
    assert_eq!(outcome, ProbeOutcome::Completed);
    assert!(output.starts_with(
        "Registration failed: Email already registered\nLogin successful, got token\n"
    ));
}

#[tokio::test]
async fn a_registration_200_without_a_token_falls_back_to_login() {
    // Arrange
    let probe = spawn_probe().await;
    when_registering()
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 42})))
        .expect(1)
        .mount(&probe.mock_server)
        .await;
    when_logging_in()
        .respond_with(token_response("login-token"))
        .expect(1)
        .mount(&probe.mock_server)
        .await;
    when_requesting_a_recommendation()
        .and(header("Authorization", "Bearer login-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&probe.mock_server)
        .await;

    // Act
    let ProbeRun { outcome, .. } = probe.run().await;

    // Assert
    assert_eq!(outcome, ProbeOutcome::Completed);
}

#[tokio::test]
async fn a_registration_timeout_falls_back_to_login() {
    // Arrange
    let probe = spawn_probe().await;
    when_registering()
        .respond_with(too_slow())
        .expect(1)
        .mount(&probe.mock_server)
        .await;
    when_logging_in()
        .respond_with(token_response("login-token"))
        .expect(1)
        .mount(&probe.mock_server)
        .await;
    when_requesting_a_recommendation()
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&probe.mock_server)
        .await;

    // Act
    let ProbeRun { outcome, output } = probe.run().await;

    // Assert
    assert_eq!(outcome, ProbeOutcome::Completed);
    assert!(output.starts_with("Registration failed: could not reach the server"));
    assert!(output.contains("Login successful, got token\n"));
}

#[tokio::test]
async fn the_probe_aborts_without_a_recommendation_call_when_both_steps_fail() {
    // Arrange
    let probe = spawn_probe().await;
    when_registering()
        .respond_with(ResponseTemplate::new(400).set_body_string("Email already registered"))
        .expect(1)
        .mount(&probe.mock_server)
        .await;
    when_logging_in()
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid credentials"))
        .expect(1)
        .mount(&probe.mock_server)
        .await;
    when_requesting_a_recommendation()
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&probe.mock_server)
        .await;

    // Act
    let ProbeRun { outcome, output } = probe.run().await;

    // Assert
    assert_eq!(outcome, ProbeOutcome::Aborted);
    assert_eq!(outcome.code(), 1);
    assert_eq!(
        output,
        "Registration failed: Email already registered\n\
         Login also failed: Invalid credentials\n"
    );
}

#[tokio::test]
async fn a_login_timeout_is_fatal() {
    // Arrange
    let probe = spawn_probe().await;
    when_registering()
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&probe.mock_server)
        .await;
    when_logging_in()
        .respond_with(too_slow())
        .expect(1)
        .mount(&probe.mock_server)
        .await;
    when_requesting_a_recommendation()
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&probe.mock_server)
        .await;

    // Act
    let ProbeRun { outcome, output } = probe.run().await;

    // Assert
    assert_eq!(outcome, ProbeOutcome::Aborted);
    assert!(output.contains("Login also failed: could not reach the server"));
}

#[tokio::test]
async fn an_unreachable_service_aborts_the_probe() {
    // Arrange
    // Grab a free port and release it, so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let settings = test_settings(format!("http://127.0.0.1:{}", port));
    let mut output = Vec::new();

    // Act
    let outcome = run_probe(&settings, &mut output).await.unwrap();

    // Assert
    let output = String::from_utf8(output).unwrap();
    assert_eq!(outcome, ProbeOutcome::Aborted);
    assert!(output.starts_with("Registration failed: could not reach the server"));
    assert!(output.contains("Login also failed: could not reach the server"));
}
