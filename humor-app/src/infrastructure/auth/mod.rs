mod google_oauth;
pub mod session;

pub use google_oauth::{GoogleOAuth, GoogleUserInfo};
