use crate::domain::{AccountEmail, Credentials, GeoPoint, SoilReading, UserProfile};
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;

// Compiled-in defaults, so the binary runs from any working directory.
const BASE_CONFIGURATION: &str = include_str!("../configuration/base.yaml");

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub api: ApiSettings,
    pub fixture: FixtureSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApiSettings {
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl ApiSettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct FixtureSettings {
    pub account: AccountSettings,
    pub reading: SoilReading,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct AccountSettings {
    pub email: String,
    pub password: Secret<String>,
    pub name: String,
    pub phone: String,
    pub latitude: f64,
    pub longitude: f64,
    pub region: String,
}

impl AccountSettings {
    pub fn credentials(&self) -> Result<Credentials, String> {
        let email = AccountEmail::parse(self.email.clone())?;
        Ok(Credentials {
            email,
            password: self.password.clone(),
        })
    }

    pub fn profile(&self) -> Result<UserProfile, String> {
        let location = GeoPoint::new(self.latitude, self.longitude)?;
        Ok(UserProfile {
            name: self.name.clone(),
            phone: self.phone.clone(),
            location,
            region: self.region.clone(),
        })
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {}", e))
    })?;
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from_str(
            BASE_CONFIGURATION,
            config::FileFormat::Yaml,
        ))
        .add_source(
            config::File::from(configuration_directory.join(environment_filename)).required(false),
        )
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_API__BASE_URL=http://10.0.0.5:8000` would set `Settings.api.base_url`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let settings = settings.try_deserialize::<Settings>()?;
    settings
        .fixture
        .account
        .credentials()
        .and(settings.fixture.account.profile())
        .map_err(|e| config::ConfigError::Message(format!("Invalid account fixture: {}", e)))?;
    Ok(settings)
}

/// The possible runtime environment for our application.
#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
