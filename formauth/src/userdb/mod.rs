mod errors;
mod storage;
mod types;

pub use errors::UserError;
pub(crate) use storage::UserSearchField;
pub use storage::UserStore;
pub use types::{EMAIL_MAX_LEN, NewUser, USERNAME_MAX_LEN, User, UserId};
