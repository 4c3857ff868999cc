//! Error types for the bridge orchestrator.

use std::path::PathBuf;
use trestle_gen::GenError;
use trestle_ir::LowerError;

/// Errors that can abort a generation request.
///
/// There is no partial-failure recovery: any error aborts the whole request
/// and no artifact written so far is considered usable.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// Wrapper synthesis failed.
    #[error(transparent)]
    Gen(#[from] GenError),

    /// The external lowering step failed.
    #[error(transparent)]
    Lower(#[from] LowerError),

    /// An artifact could not be written.
    #[error("artifact I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display() {
        let err = BridgeError::Io {
            path: PathBuf::from("build/Counter.v"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("artifact I/O error"));
        assert!(msg.contains("Counter.v"));
    }

    #[test]
    fn gen_error_passes_through() {
        let err: BridgeError = GenError::UnresolvedPort {
            name: "mystery".into(),
        }
        .into();
        assert!(err.to_string().contains("mystery"));
    }

    #[test]
    fn lower_error_passes_through() {
        let err: BridgeError = LowerError::new("boom").into();
        assert!(err.to_string().contains("boom"));
    }
}
