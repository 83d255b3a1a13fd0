//! Process-wide lifecycle of the native engine.
//!
//! The engine keeps a single global term and name table, so every call into it
//! goes through one lock. The engine is initialized lazily on first use and
//! torn down once at process exit.

use std::{
    ffi::{CStr, c_char},
    ptr::NonNull,
    sync::{Mutex, MutexGuard, Once, PoisonError},
};

use const_format::concatcp;
use yices_sys as sys;

use common::{log_debug, log_info, log_warn, utils::UnsafeSend};

use crate::{EngineError, Error, Result};

pub(crate) const TAG: &str = concatcp!(crate::TAG, "::engine");
const LOG_ENV: &str = concatcp!(crate::config::CONFIG_ENV_PREFIX, "_LOG");

pub(crate) struct EngineState {
    /// Bumped by every reset, so handles from before can be told apart.
    generation: u64,
    torn_down: bool,
    stderr: Option<UnsafeSend<NonNull<sys::FILE>>>,
}

static INIT: Once = Once::new();
static ENGINE: Mutex<EngineState> = Mutex::new(EngineState {
    generation: 0,
    torn_down: false,
    stderr: None,
});

/// Exclusive access to the engine.
/// Objects that lock the engine on drop must not be dropped while holding it.
pub(crate) struct EngineGuard(MutexGuard<'static, EngineState>);

pub(crate) fn lock() -> EngineGuard {
    init();
    acquire()
}

fn acquire() -> EngineGuard {
    EngineGuard(ENGINE.lock().unwrap_or_else(PoisonError::into_inner))
}

impl EngineGuard {
    #[inline]
    pub(crate) fn generation(&self) -> u64 {
        self.0.generation
    }

    #[inline]
    pub(crate) fn is_current(&self, generation: u64) -> bool {
        !self.0.torn_down && self.0.generation == generation
    }

    pub(crate) fn ensure_current(&self, generation: u64) -> Result<()> {
        if self.is_current(generation) {
            Ok(())
        } else {
            Err(Error::StaleHandle)
        }
    }

    pub(crate) fn last_error(&self) -> EngineError {
        let code = unsafe { sys::yices_error_code() };
        let message = if code == sys::NO_ERROR {
            "no error reported".to_string()
        } else {
            take_engine_string(unsafe { sys::yices_error_string() })
                .unwrap_or_else(|| "unknown error".to_string())
        };
        EngineError { code, message }
    }

    /// The C stream of the process's standard error, opened on first use.
    pub(crate) fn stderr(&mut self, op: &'static str) -> Result<*mut sys::FILE> {
        if let Some(stream) = self.0.stderr {
            return Ok(stream.as_ptr());
        }

        let stream =
            unsafe { sys::stdio::fdopen(sys::stdio::STDERR_FILENO, c"w".as_ptr()) };
        let stream = NonNull::new(stream).ok_or(Error::DiagnosticStream { op })?;
        self.0.stderr = Some(UnsafeSend::new(stream));
        Ok(stream.as_ptr())
    }

    /// Runs a printer of the engine on the standard error stream.
    pub(crate) fn print_to_stderr<T>(
        &mut self,
        op: &'static str,
        print: impl FnOnce(*mut sys::FILE) -> T,
    ) -> Result<T> {
        let stream = self.stderr(op)?;
        let result = print(stream);
        unsafe { sys::stdio::fflush(stream) };
        Ok(result)
    }
}

/// Converts a string allocated by the engine and releases it.
pub(crate) fn take_engine_string(ptr: *mut c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    let value = unsafe { CStr::from_ptr(ptr) }
        .to_string_lossy()
        .into_owned();
    unsafe { sys::yices_free_string(ptr) };
    Some(value)
}

/// Initializes the engine if it is not already initialized.
///
/// Every operation of the crate calls this implicitly, so an explicit call is
/// only needed to control when the initialization happens.
pub fn init() {
    INIT.call_once(|| {
        common::logging::init_logging(LOG_ENV);

        let _guard = acquire();
        unsafe { sys::yices_init() };
        if unsafe { sys::stdio::atexit(teardown) } != 0 {
            log_warn!(
                target: TAG,
                "Failed to register the engine teardown, it will not be released at exit"
            );
        }
        log_info!(target: TAG, "Initialized Yices {}", version_string());
    });
}

extern "C" fn teardown() {
    let mut guard = acquire();
    if guard.0.torn_down {
        return;
    }
    if let Some(stream) = guard.0.stderr {
        unsafe { sys::stdio::fflush(stream.as_ptr()) };
    }
    unsafe { sys::yices_exit() };
    guard.0.torn_down = true;
}

/// Resets the engine: all terms, names, contexts, and models are deleted.
///
/// Every [`Term`](crate::Term) and [`Context`](crate::Context) created before
/// the reset becomes stale. Using them afterwards fails with
/// [`Error::StaleHandle`].
pub fn reset() {
    let mut guard = lock();
    unsafe { sys::yices_reset() };
    guard.0.generation += 1;
    log_debug!(target: TAG, generation = guard.0.generation, "Engine reset");
}

/// The version of the linked engine.
pub fn version() -> String {
    init();
    version_string()
}

fn version_string() -> String {
    let version = unsafe { sys::yices_version };
    if version.is_null() {
        return "unknown".to_string();
    }
    unsafe { CStr::from_ptr(version) }
        .to_string_lossy()
        .into_owned()
}

/// The error state of the engine as left by the last failing call.
pub fn last_error() -> EngineError {
    lock().last_error()
}

/// Debugging helper.
///
/// Prints the last engine error to the standard error stream.
pub fn print_error_to_stderr() -> Result<()> {
    lock()
        .print_to_stderr("yices_print_error", |stream| unsafe {
            sys::yices_print_error(stream)
        })
        .map(|_| ())
}
