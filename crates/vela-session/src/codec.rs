//! Session wire format
//!
//! Current layout is a JSON envelope `{"version":1,"session":{...}}`.
//! Releases before the envelope wrote the bare session object; decoding
//! still accepts that layout so legacy blobs can be migrated as-is.

use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, EncodeError};
use crate::session::Session;

pub const CODEC_VERSION: u32 = 1;

pub trait SessionCodec: Send + Sync {
    fn encode(&self, session: &Session) -> Result<Vec<u8>, EncodeError>;
    fn decode(&self, bytes: &[u8]) -> Result<Session, DecodeError>;
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    session: &'a Session,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredSession {
    Versioned {
        version: u32,
        session: serde_json::Value,
    },
    Bare(Session),
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSessionCodec;

impl SessionCodec for JsonSessionCodec {
    fn encode(&self, session: &Session) -> Result<Vec<u8>, EncodeError> {
        let envelope = EnvelopeRef {
            version: CODEC_VERSION,
            session,
        };
        Ok(serde_json::to_vec(&envelope)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Session, DecodeError> {
        match serde_json::from_slice::<StoredSession>(bytes)? {
            StoredSession::Versioned { version, session } if version == CODEC_VERSION => {
                Ok(serde_json::from_value(session)?)
            }
            StoredSession::Versioned { version, .. } => {
                Err(DecodeError::UnsupportedVersion(version))
            }
            StoredSession::Bare(session) => Ok(session),
        }
    }
}
