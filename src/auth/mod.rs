// Authentication module
// Manages access token lifecycle against an LM environment

mod clock;
mod controller;
mod credentials;
mod login;
mod refresh;
mod tracker;
mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::LmSecurityCtrl;
pub use credentials::{select_auth_method, CredentialSet, CredentialSetBuilder};
pub use login::LmSecurityDriver;
pub use refresh::{Authenticator, HttpAuthenticator};
pub use tracker::{AuthTracker, SAFETY_MARGIN_SECS};
pub use types::{AuthMethod, AuthResponse};
