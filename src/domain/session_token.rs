use secrecy::{ExposeSecret, Secret};

/// Bearer token issued by the auth endpoints. Never logged.
#[derive(Debug, Clone)]
pub struct SessionToken(Secret<String>);

impl SessionToken {
    pub fn parse(token: Secret<String>) -> Result<SessionToken, String> {
        if token.expose_secret().trim().is_empty() {
            Err("The access token is empty.".to_string())
        } else {
            Ok(Self(token))
        }
    }
}

impl ExposeSecret<String> for SessionToken {
    fn expose_secret(&self) -> &String {
        self.0.expose_secret()
    }
}
