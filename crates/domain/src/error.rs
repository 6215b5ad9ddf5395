/// Failures while turning an agent reply into structured JSON.
#[derive(thiserror::Error, Debug)]
pub enum ExtractionError {
    #[error("agent response did not include an assistant message")]
    NoAssistantMessage,

    #[error("assistant message content was not a string")]
    NonStringContent,

    #[error("assistant message was not valid JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("assistant message JSON was not an object")]
    NotAnObject,
}

/// Shared error type used across all Phoenix Scout crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP: {0}")]
    Http(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("config: {0}")]
    Config(String),

    #[error("auth: {0}")]
    Auth(String),

    #[error("Letta: {0}")]
    AgentPlatform(String),

    #[error("created {kind} missing id for {name}")]
    MissingIdentifier { kind: &'static str, name: String },

    #[error("extraction: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("persistence: {0}")]
    Persistence(String),

    #[error("dataset {path}: {message}")]
    Dataset { path: String, message: String },

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether the failure came from a remote collaborator (agent platform
    /// or datastore) rather than from local input or configuration.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Error::Http(_)
                | Error::Timeout(_)
                | Error::Auth(_)
                | Error::AgentPlatform(_)
                | Error::MissingIdentifier { .. }
                | Error::Persistence(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_identifier_names_the_resource() {
        let err = Error::MissingIdentifier {
            kind: "Letta source",
            name: "match:m-1".into(),
        };
        assert_eq!(err.to_string(), "created Letta source missing id for match:m-1");
        assert!(err.is_remote());
    }

    #[test]
    fn extraction_errors_convert_and_are_local() {
        let err: Error = ExtractionError::NoAssistantMessage.into();
        assert!(matches!(
            err,
            Error::Extraction(ExtractionError::NoAssistantMessage)
        ));
        assert!(!err.is_remote());
    }
}
