//! Satisfiability checking over boolean and real arithmetic terms, backed by
//! the Yices engine.
//!
//! Terms are built from variables and constants registered in a namespace,
//! combined with the usual operators, and asserted into a [`Context`] that
//! checks them incrementally.
//!
//! ```ignore
//! let x = Term::from_real_var("x", "ns__", false)?;
//! let y = Term::from_real_var("y", "ns__", false)?;
//! let mut ctx = Context::from_term(&(&x + &y)._eq(3))?;
//! ctx.add_assertion(&x._eq(1))?;
//! assert!(ctx.check_sat()?);
//! assert_eq!(ctx.get_real_value("y")?, 2.0);
//! ```

pub mod config;
mod context;
pub mod engine;
mod error;
mod term;

pub use config::{PrettyLayout, SolverConfig};
pub use context::{Context, Status};
pub use error::{EngineError, Error, Result};
pub use term::{BinaryOp, Operand, Term, UnaryOp};

const TAG: &str = "ryices";
