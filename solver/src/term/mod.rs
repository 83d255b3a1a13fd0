mod ops;

use std::{
    ffi::{CString, c_char},
    fmt::{self, Display},
    sync::Arc,
};

use const_format::concatcp;
use yices_sys as sys;

use common::{log_trace, utils::qualified_name};

use crate::{
    Context, Error, Result,
    config::{PrettyLayout, SolverConfig},
    engine::{self, EngineGuard},
};

pub use ops::{BinaryOp, Operand, UnaryOp};

const TAG: &str = concatcp!(crate::TAG, "::term");

/// An immutable handle to a term in the engine's global term table.
///
/// Terms are never released individually; they live until the engine is
/// reset or torn down. The namespace is the prefix under which the variables
/// of this term are registered in the engine's name table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term {
    handle: sys::term_t,
    namespace: Arc<str>,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sort {
    Bool,
    Real,
}

impl Sort {
    fn native(self) -> sys::type_t {
        match self {
            Sort::Bool => unsafe { sys::yices_bool_type() },
            Sort::Real => unsafe { sys::yices_real_type() },
        }
    }
}

impl Term {
    /// Wraps a handle just returned by `op`, failing if it signals an error.
    fn wrap(
        engine: &EngineGuard,
        op: &'static str,
        handle: sys::term_t,
        namespace: Arc<str>,
    ) -> Result<Self> {
        // Negative values are used to report errors.
        if handle <= 0 {
            return Err(Error::Construction {
                op,
                cause: engine.last_error(),
            });
        }
        Ok(Self {
            handle,
            namespace,
            generation: engine.generation(),
        })
    }

    pub fn as_true_const(namespace: &str) -> Result<Self> {
        let engine = engine::lock();
        Self::wrap(
            &engine,
            "yices_true",
            unsafe { sys::yices_true() },
            namespace.into(),
        )
    }

    pub fn as_false_const(namespace: &str) -> Result<Self> {
        let engine = engine::lock();
        Self::wrap(
            &engine,
            "yices_false",
            unsafe { sys::yices_false() },
            namespace.into(),
        )
    }

    /// Returns a term for the boolean variable `name` in `namespace`.
    ///
    /// Unless `fresh` is set, a variable already registered under the same
    /// qualified name is reused, so repeated calls refer to the same variable.
    pub fn from_bool_var(name: &str, namespace: &str, fresh: bool) -> Result<Self> {
        Self::from_var(name, namespace, fresh, Sort::Bool)
    }

    /// Returns a term for the real variable `name` in `namespace`.
    ///
    /// See [`Term::from_bool_var`] for the meaning of `fresh`.
    pub fn from_real_var(name: &str, namespace: &str, fresh: bool) -> Result<Self> {
        Self::from_var(name, namespace, fresh, Sort::Real)
    }

    fn from_var(name: &str, namespace: &str, fresh: bool, sort: Sort) -> Result<Self> {
        let qualified = CString::new(qualified_name(namespace, name))?;
        let engine = engine::lock();

        if !fresh {
            let existing = unsafe { sys::yices_get_term_by_name(qualified.as_ptr()) };
            if existing > 0 {
                log_trace!(target: TAG, var = name, namespace, handle = existing, "Reusing variable");
                return Self::wrap(&engine, "yices_get_term_by_name", existing, namespace.into());
            }
        }

        let handle = unsafe { sys::yices_new_uninterpreted_term(sort.native()) };
        let term = Self::wrap(
            &engine,
            "yices_new_uninterpreted_term",
            handle,
            namespace.into(),
        )?;

        let status = unsafe { sys::yices_set_term_name(term.handle, qualified.as_ptr()) };
        if status < 0 {
            return Err(Error::EngineStatus {
                op: "yices_set_term_name",
                status,
                cause: engine.last_error(),
            });
        }
        log_trace!(target: TAG, var = name, namespace, ?sort, handle, "New variable");
        Ok(term)
    }

    /// Returns a constant term for the real number written as `value`.
    ///
    /// Decimal and scientific notations are accepted, as well as rationals in
    /// the form `numerator/denominator`.
    pub fn from_real_constant(value: impl Display, namespace: &str) -> Result<Self> {
        let engine = engine::lock();
        Self::parse_constant(&engine, &value.to_string(), namespace.into())
    }

    fn parse_constant(engine: &EngineGuard, text: &str, namespace: Arc<str>) -> Result<Self> {
        let text = CString::new(text)?;
        let parse = |f: unsafe extern "C" fn(*const c_char) -> sys::term_t| unsafe {
            f(text.as_ptr())
        };
        let mut handle = parse(sys::yices_parse_float);
        let mut op = "yices_parse_float";
        if handle <= 0 {
            handle = parse(sys::yices_parse_rational);
            op = "yices_parse_rational";
        }
        Self::wrap(engine, op, handle, namespace)
    }

    #[inline]
    pub fn handle(&self) -> sys::term_t {
        self.handle
    }

    #[inline]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub(crate) fn ensure_alive(&self, engine: &EngineGuard) -> Result<()> {
        engine.ensure_current(self.generation)
    }

    /// Builds a context whose only assertion is this term.
    pub fn to_context(&self) -> Result<Context> {
        Context::from_term(self)
    }

    /// Debugging helper.
    ///
    /// Prints the term to the standard error stream.
    pub fn term_to_stderr(&self, layout: PrettyLayout) -> Result<()> {
        let mut engine = engine::lock();
        self.ensure_alive(&engine)?;
        let status = engine.print_to_stderr("yices_pp_term", |stream| unsafe {
            sys::yices_pp_term(
                stream,
                self.handle,
                layout.width,
                layout.height,
                layout.offset,
            )
        })?;
        if status < 0 {
            return Err(Error::EngineStatus {
                op: "yices_pp_term",
                status,
                cause: engine.last_error(),
            });
        }
        Ok(())
    }

    /// Same as [`Term::term_to_stderr`] with the layout of [`SolverConfig::global`].
    pub fn pp_to_stderr(&self) -> Result<()> {
        self.term_to_stderr(SolverConfig::global()?.pretty)
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = {
            let engine = engine::lock();
            if self.ensure_alive(&engine).is_ok() {
                engine::take_engine_string(unsafe {
                    sys::yices_term_to_string(self.handle, u32::MAX, 1, 0)
                })
            } else {
                None
            }
        };
        match rendered {
            Some(text) => write!(f, "{text}"),
            None => write!(f, "<term #{}>", self.handle),
        }
    }
}
