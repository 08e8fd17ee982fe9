/// Convenience result type used across the engine.
pub type ShowreelResult<T> = Result<T, ShowreelError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum ShowreelError {
    /// Invalid user-provided or project data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while normalizing or sampling animated properties.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while evaluating timeline state for a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Lookup of a render job id that does not exist in the registry.
    #[error("render job not found: {0}")]
    JobNotFound(String),

    /// A job transition rejected by the lifecycle state machine.
    #[error("job lifecycle error: {0}")]
    JobLifecycle(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShowreelError {
    /// Build a [`ShowreelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ShowreelError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`ShowreelError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`ShowreelError::JobLifecycle`] value.
    pub fn job_lifecycle(msg: impl Into<String>) -> Self {
        Self::JobLifecycle(msg.into())
    }

    /// Build a [`ShowreelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            ShowreelError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            ShowreelError::evaluation("x")
                .to_string()
                .contains("evaluation error:")
        );
        assert!(
            ShowreelError::job_lifecycle("x")
                .to_string()
                .contains("job lifecycle error:")
        );
        assert!(
            ShowreelError::JobNotFound("job-1".to_string())
                .to_string()
                .contains("render job not found: job-1")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = ShowreelError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
