pub mod token;
pub mod user;

pub use token::{Credentials, TokenResponse};
pub use user::{ResponseBody, ResponseEnvelope, UserStatus, UserStatusRequest};
