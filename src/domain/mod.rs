mod account_email;
mod credentials;
mod geo_point;
mod measurement;
mod session_token;
mod soil_reading;

pub use account_email::AccountEmail;
pub use credentials::{Credentials, UserProfile};
pub use geo_point::GeoPoint;
pub use measurement::Measurement;
pub use session_token::SessionToken;
pub use soil_reading::SoilReading;
