mod bootstrap;

pub use bootstrap::{AuthError, BootstrapError, Session, SessionSource, acquire_session};
