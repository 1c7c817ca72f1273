use thiserror::Error;

/// `WindowManagerResult<T>` provides a simplified result type with a common error type
pub type WindowManagerResult<T> = std::result::Result<T, ErrorWrapper>;

/// WindowManagerError defines all the internal errors that `libewmh` might return
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Error)]
pub enum WindowManagerError {
    #[error("desktop {0} has no work area")]
    WorkAreaNotFound(u32),

    #[error("property {0} was not found")]
    PropertyNotFound(String),

    #[error("window {0} has no name")]
    NameNotFound(u32),
}

/// ErrorWrapper provides wrapper around all the underlying library dependencys that `libewmh` uses
/// such that we can easily surface all errors from `libewmh` in a single easy way.
#[derive(Debug, Error)]
pub enum ErrorWrapper {
    #[error(transparent)]
    WindowManager(#[from] WindowManagerError),

    // x11rb errors
    #[error(transparent)]
    Connect(#[from] x11rb::errors::ConnectError),

    #[error(transparent)]
    Connection(#[from] x11rb::errors::ConnectionError),

    #[error(transparent)]
    Reply(#[from] x11rb::errors::ReplyError),
}

impl ErrorWrapper {
    /// Check if the wrapped error is the given `libewmh` error
    pub fn is_wm(&self, err: &WindowManagerError) -> bool {
        matches!(self, ErrorWrapper::WindowManager(inner) if inner == err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors() {
        let err: ErrorWrapper = WindowManagerError::PropertyNotFound("_NET_WORKAREA".to_owned()).into();
        assert_eq!(err.to_string(), "property _NET_WORKAREA was not found");
        assert!(err.is_wm(&WindowManagerError::PropertyNotFound("_NET_WORKAREA".to_owned())));
        assert!(!err.is_wm(&WindowManagerError::NameNotFound(1)));

        let err: ErrorWrapper = WindowManagerError::WorkAreaNotFound(3).into();
        assert_eq!(err.to_string(), "desktop 3 has no work area");
    }
}
