use derive_more as dm;

use crate::context::Status;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The error state reported by the engine right after a failing call.
#[derive(Debug, Clone, PartialEq, Eq, dm::Display, dm::Error)]
#[display("{message} (error code {code})")]
pub struct EngineError {
    pub code: i32,
    pub message: String,
}

#[derive(Debug, dm::Display, dm::Error, dm::From)]
pub enum Error {
    /// A term constructor returned a non-positive handle.
    #[display("`{op}` did not produce a valid term: {cause}")]
    Construction {
        op: &'static str,
        #[error(source)]
        cause: EngineError,
    },
    /// An engine object constructor returned a null pointer.
    #[display("`{op}` returned a null handle: {cause}")]
    NullHandle {
        op: &'static str,
        #[error(source)]
        cause: EngineError,
    },
    /// An engine call reported a failing status code.
    #[display("`{op}` returned non-zero status {status}: {cause}")]
    EngineStatus {
        op: &'static str,
        status: i32,
        #[error(source)]
        cause: EngineError,
    },
    /// Satisfiability check ended in a state other than SAT or UNSAT.
    #[display("Satisfiability check ended with unexpected status `{_0}`")]
    UnexpectedStatus(#[error(not(source))] Status),
    #[display(
        "`{op}` requires a model but satisfiability was not checked yet or is not SAT. Call `check_sat()` first"
    )]
    NotChecked { op: &'static str },
    #[display("Variable `{name}` is not defined")]
    ValueNotFound { name: String },
    #[display("Failed to read the value of `{name}` from the model: {cause}")]
    ModelValue {
        name: String,
        #[error(source)]
        cause: EngineError,
    },
    #[display("Namespace mismatch: expected `{expected}`, found `{found}`")]
    NamespaceMismatch { expected: String, found: String },
    #[display("The context is already released")]
    ContextReleased,
    #[display("The handle belongs to an engine session that has been reset")]
    StaleHandle,
    #[display("Failed to open the diagnostic stream for `{op}`")]
    DiagnosticStream { op: &'static str },
    #[display("Invalid name: {_0}")]
    #[from]
    InvalidName(std::ffi::NulError),
    #[display("Failed to load solver configurations: {_0}")]
    #[from]
    Config(config::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cause() -> EngineError {
        EngineError {
            code: 400,
            message: "invalid operation".to_string(),
        }
    }

    #[test]
    fn precondition_failure_names_the_required_call() {
        let message = Error::NotChecked {
            op: "get_real_value",
        }
        .to_string();
        assert!(message.contains("get_real_value"));
        assert!(message.contains("check_sat()"));
    }

    #[test]
    fn engine_status_failure_carries_call_and_code() {
        let message = Error::EngineStatus {
            op: "yices_pop",
            status: -1,
            cause: cause(),
        }
        .to_string();
        assert!(message.contains("yices_pop"));
        assert!(message.contains("-1"));
        assert!(message.contains("error code 400"));
    }

    #[test]
    fn engine_error_is_exposed_as_source() {
        use std::error::Error as _;

        let error = Error::ModelValue {
            name: "x".to_string(),
            cause: cause(),
        };
        let source = error.source().expect("missing source");
        assert_eq!(source.to_string(), cause().to_string());
    }

    #[test]
    fn nul_in_name_is_converted() {
        let error: Error = std::ffi::CString::new("a\0b").unwrap_err().into();
        assert!(matches!(error, Error::InvalidName(_)));
    }
}
