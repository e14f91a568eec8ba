use validator::ValidateEmail;

#[derive(Debug, Clone)]
pub struct AccountEmail(String);

impl AccountEmail {
    pub fn parse(s: String) -> Result<AccountEmail, String> {
        if s.validate_email() {
            Ok(Self(s))
        } else {
            Err(format!("{} is not a valid account email.", s))
        }
    }
}

impl AsRef<str> for AccountEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
