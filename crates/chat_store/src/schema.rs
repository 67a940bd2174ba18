use serde::{Deserialize, Serialize};

/// Study PDF carried through the study flow.
///
/// Bytes round-trip base64-encoded so a resumed session can still attach the
/// file to the eventual study-plan request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StudyAttachment {
    pub file_name: String,
    #[serde(with = "base64_bytes")]
    pub bytes: Vec<u8>,
}

impl StudyAttachment {
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// Multi-step flow state persisted after every mutation.
///
/// Invariant: `study_subject` and `study_pdf` are set only while
/// `is_studying` is true.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SessionState {
    pub is_studying: bool,
    pub study_subject: Option<String>,
    pub study_pdf: Option<StudyAttachment>,
}

impl SessionState {
    #[must_use]
    pub fn studying(subject: impl Into<String>, pdf: Option<StudyAttachment>) -> Self {
        Self {
            is_studying: true,
            study_subject: Some(subject.into()),
            study_pdf: pdf,
        }
    }

    /// Returns to the default idle state, dropping subject and attachment.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn upholds_study_invariant(&self) -> bool {
        self.is_studying || (self.study_subject.is_none() && self.study_pdf.is_none())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StateRecord {
    pub version: u32,
    pub saved_at: String,
    pub state: SessionState,
}

impl StateRecord {
    #[must_use]
    pub fn v1(state: SessionState, saved_at: impl Into<String>) -> Self {
        Self {
            version: 1,
            saved_at: saved_at.into(),
            state,
        }
    }
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_idle_and_consistent() {
        let state = SessionState::default();
        assert!(!state.is_studying);
        assert!(state.study_subject.is_none());
        assert!(state.study_pdf.is_none());
        assert!(state.upholds_study_invariant());
    }

    #[test]
    fn reset_clears_subject_and_attachment() {
        let mut state = SessionState::studying(
            "redes neurais",
            Some(StudyAttachment::new("apostila.pdf", vec![1, 2, 3])),
        );
        state.reset();

        assert_eq!(state, SessionState::default());
        assert!(state.upholds_study_invariant());
    }

    #[test]
    fn attachment_bytes_round_trip_through_base64() {
        let attachment = StudyAttachment::new("apostila.pdf", vec![0, 159, 146, 150]);
        let json = serde_json::to_string(&attachment).expect("attachment should serialize");
        assert!(json.contains("\"fileName\":\"apostila.pdf\""));

        let decoded: StudyAttachment =
            serde_json::from_str(&json).expect("attachment should deserialize");
        assert_eq!(decoded, attachment);
    }

    #[test]
    fn state_serializes_with_widget_field_names() {
        let state = SessionState::studying("grafos", None);
        let json = serde_json::to_string(&state).expect("state should serialize");

        assert!(json.contains("\"isStudying\":true"));
        assert!(json.contains("\"studySubject\":\"grafos\""));
        assert!(json.contains("\"studyPdf\":null"));
    }
}
