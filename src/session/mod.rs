//! Game sessions: tokens, persisted records and share links.

mod link;
mod record;
mod state;
mod store;
mod token;

pub use link::{GAME_PARAM, build_share_link, token_from_link};
pub use record::SessionRecord;
pub use state::{SessionPhase, SessionState};
pub use store::SessionStore;
pub use token::{SessionToken, TokenError};
