use derive_more as dm;
use yices_sys as sys;

/// The status of an engine context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, dm::Display)]
pub enum Status {
    #[display("idle")]
    Idle,
    #[display("searching")]
    Searching,
    #[display("unknown")]
    Unknown,
    #[display("sat")]
    Sat,
    #[display("unsat")]
    Unsat,
    #[display("interrupted")]
    Interrupted,
    #[display("error")]
    Error,
    #[display("unrecognized({_0})")]
    Unrecognized(sys::smt_status_t),
}

impl From<sys::smt_status_t> for Status {
    fn from(value: sys::smt_status_t) -> Self {
        match value {
            sys::STATUS_IDLE => Status::Idle,
            sys::STATUS_SEARCHING => Status::Searching,
            sys::STATUS_UNKNOWN => Status::Unknown,
            sys::STATUS_SAT => Status::Sat,
            sys::STATUS_UNSAT => Status::Unsat,
            sys::STATUS_INTERRUPTED => Status::Interrupted,
            sys::STATUS_ERROR => Status::Error,
            other => Status::Unrecognized(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_codes_are_decoded() {
        assert_eq!(Status::from(3), Status::Sat);
        assert_eq!(Status::from(4), Status::Unsat);
        assert_eq!(Status::from(0), Status::Idle);
        assert_eq!(Status::from(2), Status::Unknown);
        assert_eq!(Status::from(42), Status::Unrecognized(42));
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(Status::Interrupted.to_string(), "interrupted");
        assert_eq!(Status::Unrecognized(-7).to_string(), "unrecognized(-7)");
    }
}
