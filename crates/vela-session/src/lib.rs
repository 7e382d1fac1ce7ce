//! Vela Session Persistence
//!
//! - A Session is the ordered list of open tabs restored at launch
//! - Corrupt or unreadable session data costs the tabs, never the app
//! - Sessions written by older releases are migrated on first load
//! - Opening the backing store is the only fatal step

mod codec;
mod error;
mod session;
mod store;

pub use codec::{JsonSessionCodec, SessionCodec, CODEC_VERSION};
pub use error::{DecodeError, EncodeError, SessionError};
pub use session::{Session, TabEntry};
pub use store::{SessionStateStore, LEGACY_SESSION_KEY, PRIMARY_SESSION_KEY};

pub type Result<T> = std::result::Result<T, SessionError>;
