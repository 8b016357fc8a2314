/// Convenience result type used across mapf-replay.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// Top-level error taxonomy.
///
/// All variants except `Other` are raised during ingestion; once a
/// [`crate::session::ReplaySession`] has been constructed, playback is total
/// and produces no further errors of its own.
#[derive(thiserror::Error, Debug)]
pub enum ReplayError {
    /// An `Agent` line in the trajectory log could not be decoded.
    #[error("malformed log: {0}")]
    MalformedLog(String),

    /// The trajectory log contains no `Map:` directive.
    #[error("missing map reference: {0}")]
    MissingMapReference(String),

    /// The map file is missing a directive or its grid body is undersized.
    #[error("malformed map: {0}")]
    MalformedMap(String),

    /// The log or map file is absent or unreadable.
    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReplayError {
    /// Build a [`ReplayError::MalformedLog`] value.
    pub fn malformed_log(msg: impl Into<String>) -> Self {
        Self::MalformedLog(msg.into())
    }

    /// Build a [`ReplayError::MissingMapReference`] value.
    pub fn missing_map_reference(msg: impl Into<String>) -> Self {
        Self::MissingMapReference(msg.into())
    }

    /// Build a [`ReplayError::MalformedMap`] value.
    pub fn malformed_map(msg: impl Into<String>) -> Self {
        Self::MalformedMap(msg.into())
    }

    /// Build a [`ReplayError::ResourceNotFound`] value.
    pub fn resource_not_found(msg: impl Into<String>) -> Self {
        Self::ResourceNotFound(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            ReplayError::malformed_log("x")
                .to_string()
                .contains("malformed log:")
        );
        assert!(
            ReplayError::missing_map_reference("x")
                .to_string()
                .contains("missing map reference:")
        );
        assert!(
            ReplayError::malformed_map("x")
                .to_string()
                .contains("malformed map:")
        );
        assert!(
            ReplayError::resource_not_found("x")
                .to_string()
                .contains("resource not found:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = ReplayError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
