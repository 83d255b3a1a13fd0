use std::ptr::NonNull;

use yices_sys as sys;

use common::utils::UnsafeSend;

use crate::{
    Error, Result,
    engine::{self, EngineGuard},
};

/// A model produced by a satisfiable check, released on drop.
pub(super) struct Model {
    ptr: UnsafeSend<NonNull<sys::model_t>>,
    generation: u64,
}

impl Model {
    pub(super) fn new(engine: &EngineGuard, ptr: NonNull<sys::model_t>) -> Self {
        Self {
            ptr: UnsafeSend::new(ptr),
            generation: engine.generation(),
        }
    }

    #[inline]
    pub(super) fn as_ptr(&self) -> *mut sys::model_t {
        self.ptr.as_ptr()
    }

    pub(super) fn bool_value(
        &self,
        engine: &EngineGuard,
        name: &str,
        term: sys::term_t,
    ) -> Result<bool> {
        let mut value: i32 = 0;
        self.read(engine, name, |mdl| unsafe {
            sys::yices_get_bool_value(mdl, term, &mut value)
        })?;
        Ok(value != 0)
    }

    pub(super) fn double_value(
        &self,
        engine: &EngineGuard,
        name: &str,
        term: sys::term_t,
    ) -> Result<f64> {
        let mut value: f64 = 0.0;
        self.read(engine, name, |mdl| unsafe {
            sys::yices_get_double_value(mdl, term, &mut value)
        })?;
        Ok(value)
    }

    fn read(
        &self,
        engine: &EngineGuard,
        name: &str,
        getter: impl FnOnce(*mut sys::model_t) -> i32,
    ) -> Result<()> {
        engine.ensure_current(self.generation)?;
        if getter(self.as_ptr()) != 0 {
            return Err(Error::ModelValue {
                name: name.to_string(),
                cause: engine.last_error(),
            });
        }
        Ok(())
    }

    /// Releases the model with the engine already locked.
    pub(super) fn release(self, engine: &EngineGuard) {
        let this = core::mem::ManuallyDrop::new(self);
        this.free(engine);
    }

    fn free(&self, engine: &EngineGuard) {
        // Models of a reset engine are already gone.
        if engine.is_current(self.generation) {
            unsafe { sys::yices_free_model(self.as_ptr()) };
        }
    }
}

impl Drop for Model {
    fn drop(&mut self) {
        self.free(&engine::lock());
    }
}
