//! Per-user conversation state and the in-memory store that owns it.

mod model;
mod store;

pub use model::{Mode, Session, Turn, DEFAULT_HISTORY_CAP};
pub use store::{SessionHandle, SessionStore};
