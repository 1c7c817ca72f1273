use thiserror::Error;

/// `Result<T>` provides a simplified result type with the crate's error type
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop `wmlayout` from arranging windows
#[derive(Debug, Error)]
pub enum Error {
    /// Conflicting or missing command line options
    #[error("{0}")]
    Usage(String),

    #[error("unknown layout: {0}")]
    UnknownLayout(String),

    // Window system failures, a run is never retried
    #[error(transparent)]
    Ewmh(#[from] libewmh::ErrorWrapper),

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} failed with {status}: {stderr}")]
    CommandFailed {
        program: &'static str,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("unexpected output from {program}: {output:?}")]
    UnexpectedOutput { program: &'static str, output: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn usage(msg: impl Into<String>) -> Self {
        Error::Usage(msg.into())
    }

    /// True for failures reported by the window system rather than by the user's input
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            Error::Ewmh(_) | Error::Spawn { .. } | Error::CommandFailed { .. } | Error::UnexpectedOutput { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(Error::usage("pick one layout").to_string(), "pick one layout");
        assert_eq!(Error::UnknownLayout("spiral".to_owned()).to_string(), "unknown layout: spiral");
        let err = Error::UnexpectedOutput { program: "wmctrl", output: "garbage".to_owned() };
        assert_eq!(err.to_string(), "unexpected output from wmctrl: \"garbage\"");
    }

    #[test]
    fn test_is_external() {
        assert!(!Error::usage("x").is_external());
        assert!(!Error::UnknownLayout("x".to_owned()).is_external());
        let err: Error = libewmh::ErrorWrapper::from(libewmh::WindowManagerError::NameNotFound(1)).into();
        assert!(err.is_external());
    }
}
