mod model;
mod status;

use std::{ffi::CString, ptr::NonNull, sync::Arc};

use const_format::concatcp;
use yices_sys as sys;

use common::{
    log_debug, log_trace,
    utils::{UnsafeSend, qualified_name},
};

use crate::{
    Error, Result, Term,
    config::SolverConfig,
    engine::{self, EngineGuard},
};

use self::model::Model;
pub use status::Status;

const TAG: &str = concatcp!(crate::TAG, "::context");

struct RawContext {
    ptr: UnsafeSend<NonNull<sys::context_t>>,
    generation: u64,
}

/// An assertion set in the engine, checked incrementally.
///
/// All asserted terms must share the namespace of the context, which is
/// fixed by the first assertion unless given at construction.
/// The engine-side context is released by [`Context::del_context`] or on drop.
pub struct Context {
    /// `None` once released.
    raw: Option<RawContext>,
    namespace: Option<Arc<str>>,
    model: Option<Model>,
    keep_subst: bool,
}

impl Context {
    /// Creates an empty context configured by [`SolverConfig::global`].
    pub fn new() -> Result<Self> {
        Self::with_config(SolverConfig::global()?)
    }

    /// Creates an empty context with a fixed namespace.
    pub fn with_namespace(namespace: &str) -> Result<Self> {
        let mut context = Self::new()?;
        context.namespace = Some(namespace.into());
        Ok(context)
    }

    pub fn with_config(config: &SolverConfig) -> Result<Self> {
        let engine = engine::lock();
        let ptr = config
            .context
            .with_native(&engine, |cfg| unsafe { sys::yices_new_context(cfg) })?;
        let ptr = NonNull::new(ptr).ok_or_else(|| Error::NullHandle {
            op: "yices_new_context",
            cause: engine.last_error(),
        })?;
        log_debug!(target: TAG, logic = ?config.context.logic, "Created context");

        Ok(Self {
            raw: Some(RawContext {
                ptr: UnsafeSend::new(ptr),
                generation: engine.generation(),
            }),
            namespace: None,
            model: None,
            keep_subst: config.model.keep_subst,
        })
    }

    /// Creates a context asserting `term`, in the namespace of `term`.
    pub fn from_term(term: &Term) -> Result<Self> {
        let mut context = Self::new()?;
        context.add_assertion(term)?;
        Ok(context)
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn raw_ptr(&self, engine: &EngineGuard) -> Result<*mut sys::context_t> {
        let raw = self.raw.as_ref().ok_or(Error::ContextReleased)?;
        engine.ensure_current(raw.generation)?;
        Ok(raw.ptr.as_ptr())
    }

    fn discard_model(&mut self, engine: &EngineGuard) {
        if let Some(model) = self.model.take() {
            model.release(engine);
        }
    }

    pub fn add_assertion(&mut self, term: &Term) -> Result<()> {
        let engine = engine::lock();
        let ctx = self.raw_ptr(&engine)?;
        term.ensure_alive(&engine)?;

        if let Some(namespace) = &self.namespace {
            if **namespace != *term.namespace() {
                return Err(Error::NamespaceMismatch {
                    expected: namespace.to_string(),
                    found: term.namespace().to_string(),
                });
            }
        }

        let status = unsafe { sys::yices_assert_formula(ctx, term.handle()) };
        log_trace!(target: TAG, term = term.handle(), status, "Asserted formula");
        if status != 0 {
            return Err(Error::EngineStatus {
                op: "yices_assert_formula",
                status,
                cause: engine.last_error(),
            });
        }

        if self.namespace.is_none() {
            self.namespace = Some(term.namespace().into());
        }
        Ok(())
    }

    /// Checks the satisfiability of the active assertions.
    ///
    /// Returns `true` and retains a model if they are satisfiable, `false` if
    /// they are not. Any other outcome of the engine (e.g., interruption) is
    /// reported as [`Error::UnexpectedStatus`].
    #[tracing::instrument(level = "debug", target = "ryices::context", skip(self))]
    pub fn check_sat(&mut self) -> Result<bool> {
        let engine = engine::lock();
        let ctx = self.raw_ptr(&engine)?;
        self.discard_model(&engine);

        let status = Status::from(unsafe { sys::yices_check_context(ctx, core::ptr::null()) });
        log_debug!(target: TAG, %status, "Checked satisfiability");
        match status {
            Status::Sat => {
                let model = unsafe { sys::yices_get_model(ctx, self.keep_subst as i32) };
                let model = NonNull::new(model).ok_or_else(|| Error::NullHandle {
                    op: "yices_get_model",
                    cause: engine.last_error(),
                })?;
                self.model = Some(Model::new(&engine, model));
                Ok(true)
            }
            Status::Unsat => Ok(false),
            other => Err(Error::UnexpectedStatus(other)),
        }
    }

    #[tracing::instrument(level = "debug", target = "ryices::context", skip(self))]
    pub fn push(&mut self) -> Result<()> {
        let engine = engine::lock();
        let ctx = self.raw_ptr(&engine)?;
        let status = unsafe { sys::yices_push(ctx) };
        if status != 0 {
            return Err(Error::EngineStatus {
                op: "yices_push",
                status,
                cause: engine.last_error(),
            });
        }
        Ok(())
    }

    /// Restores the assertions to the state of the matching [`Context::push`].
    /// The retained model, if any, is discarded.
    #[tracing::instrument(level = "debug", target = "ryices::context", skip(self))]
    pub fn pop(&mut self) -> Result<()> {
        let engine = engine::lock();
        let ctx = self.raw_ptr(&engine)?;
        let status = unsafe { sys::yices_pop(ctx) };
        if status != 0 {
            return Err(Error::EngineStatus {
                op: "yices_pop",
                status,
                cause: engine.last_error(),
            });
        }
        self.discard_model(&engine);
        Ok(())
    }

    pub fn get_bool_value(&self, var_name: &str) -> Result<bool> {
        let engine = engine::lock();
        let (model, qualified, term) = self.resolve(&engine, "get_bool_value", var_name)?;
        model.bool_value(&engine, &qualified, term)
    }

    pub fn get_real_value(&self, var_name: &str) -> Result<f64> {
        let engine = engine::lock();
        let (model, qualified, term) = self.resolve(&engine, "get_real_value", var_name)?;
        model.double_value(&engine, &qualified, term)
    }

    /// Finds the model and the term of a variable for a value getter.
    fn resolve(
        &self,
        engine: &EngineGuard,
        op: &'static str,
        var_name: &str,
    ) -> Result<(&Model, String, sys::term_t)> {
        let ctx = self.raw_ptr(engine)?;
        let status = Status::from(unsafe { sys::yices_context_status(ctx) });
        let model = match &self.model {
            Some(model) if status == Status::Sat => model,
            _ => return Err(Error::NotChecked { op }),
        };

        let qualified = qualified_name(self.namespace().unwrap_or_default(), var_name);
        let c_name = CString::new(qualified.as_str())?;
        let term = unsafe { sys::yices_get_term_by_name(c_name.as_ptr()) };
        if term <= 0 {
            return Err(Error::ValueNotFound { name: qualified });
        }
        Ok((model, qualified, term))
    }

    /// The current status of the engine-side context.
    pub fn status(&self) -> Result<Status> {
        let engine = engine::lock();
        let ctx = self.raw_ptr(&engine)?;
        Ok(Status::from(unsafe { sys::yices_context_status(ctx) }))
    }

    pub fn is_unsat(&self) -> Result<bool> {
        self.status().map(|s| s == Status::Unsat)
    }

    pub fn is_released(&self) -> bool {
        self.raw.is_none()
    }

    /// Releases the engine-side context and the retained model.
    ///
    /// Calling it more than once has no effect. Any other operation on a
    /// released context fails with [`Error::ContextReleased`].
    pub fn del_context(&mut self) {
        let engine = engine::lock();
        self.release(&engine);
    }

    fn release(&mut self, engine: &EngineGuard) {
        self.discard_model(engine);
        let Some(raw) = self.raw.take() else {
            return;
        };
        if engine.is_current(raw.generation) {
            unsafe { sys::yices_free_context(raw.ptr.as_ptr()) };
            log_debug!(target: TAG, "Released context");
        } else {
            log_debug!(target: TAG, "Context was already released by an engine reset");
        }
    }

    /// Debugging helper.
    ///
    /// Prints the retained model to the standard error stream.
    pub fn model_to_stderr(&self) -> Result<()> {
        let mut engine = engine::lock();
        self.raw_ptr(&engine)?;
        let model = self.model.as_ref().ok_or(Error::NotChecked {
            op: "model_to_stderr",
        })?;
        engine.print_to_stderr("yices_print_model", |stream| unsafe {
            sys::yices_print_model(stream, model.as_ptr())
        })
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        if self.raw.is_none() && self.model.is_none() {
            return;
        }
        let engine = engine::lock();
        self.release(&engine);
    }
}
