use crate::domain::{AccountEmail, GeoPoint};
use secrecy::Secret;

/// What the service needs to log an existing account in.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: AccountEmail,
    pub password: Secret<String>,
}

/// Extra fields sent along with [`Credentials`] when registering.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub name: String,
    pub phone: String,
    pub location: GeoPoint,
    pub region: String,
}
