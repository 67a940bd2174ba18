use std::path::Path;

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::ChatStoreError;
use crate::kv::KvStore;
use crate::schema::{SessionState, StateRecord};

/// Key holding the serialized transcript markup.
pub const TRANSCRIPT_KEY: &str = "chat_history";
/// Key holding the session-state record.
pub const STATE_KEY: &str = "app_state";

/// The widget's two logical records over a [`KvStore`].
#[derive(Debug, Clone)]
pub struct ChatStore {
    kv: KvStore,
}

impl ChatStore {
    pub fn open(root: &Path) -> Result<Self, ChatStoreError> {
        Ok(Self {
            kv: KvStore::open(root)?,
        })
    }

    #[must_use]
    pub fn kv(&self) -> &KvStore {
        &self.kv
    }

    /// Stores the transcript markup verbatim.
    pub fn save_transcript(&self, markup: &str) -> Result<(), ChatStoreError> {
        self.kv.set(TRANSCRIPT_KEY, markup)
    }

    pub fn load_transcript(&self) -> Result<Option<String>, ChatStoreError> {
        self.kv.get(TRANSCRIPT_KEY)
    }

    /// Stores the session state as a version-1 record stamped with the
    /// current UTC time.
    pub fn save_state(&self, state: &SessionState) -> Result<(), ChatStoreError> {
        let saved_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(ChatStoreError::ClockFormat)?;
        let record = StateRecord::v1(state.clone(), saved_at);
        let path = self.kv.path_for(STATE_KEY);
        let json = serde_json::to_string(&record)
            .map_err(|source| ChatStoreError::json_serialize(path, source))?;
        self.kv.set(STATE_KEY, &json)
    }

    /// Loads and validates the session-state record.
    pub fn load_state(&self) -> Result<Option<SessionState>, ChatStoreError> {
        let Some(json) = self.kv.get(STATE_KEY)? else {
            return Ok(None);
        };

        let path = self.kv.path_for(STATE_KEY);
        let record: StateRecord = serde_json::from_str(&json)
            .map_err(|source| ChatStoreError::json_parse(path.clone(), source))?;

        if record.version != 1 {
            return Err(ChatStoreError::UnsupportedVersion {
                path,
                found: record.version,
            });
        }
        if OffsetDateTime::parse(&record.saved_at, &Rfc3339).is_err() {
            return Err(ChatStoreError::InvalidTimestamp {
                path,
                value: record.saved_at,
            });
        }

        Ok(Some(record.state))
    }

    /// Removes both persisted records.
    pub fn clear_all(&self) -> Result<(), ChatStoreError> {
        self.kv.clear(&[TRANSCRIPT_KEY, STATE_KEY])
    }
}
