mod backend;
mod errors;
mod manager;
mod types;

pub use backend::{CacheSessionBackend, SessionBackend};
pub use errors::SessionError;
pub use manager::{FLASH_COOKIE_NAME, SessionManager};
pub use types::{Flash, FlashLevel};
