use std::{collections::BTreeMap, ffi::CString, ptr, sync::OnceLock};

use serde::Deserialize;
use yices_sys as sys;

use common::{log_debug, log_warn};

use crate::{Error, Result, engine::EngineGuard};

pub const CONFIG_ENV_PREFIX: &str = "RYICES";
const CONFIG_FILENAME: &str = "ryices_config";

impl TryFrom<::config::Config> for SolverConfig {
    type Error = ::config::ConfigError;

    fn try_from(value: ::config::Config) -> Result<Self, Self::Error> {
        let config: SolverConfig = value.try_deserialize()?;
        log_debug!("Loaded configurations: {:?}", config);

        if !config.model.keep_subst {
            log_warn!(
                "Models are built without keeping substitutions, values of eliminated variables may not be available."
            );
        }

        Ok(config)
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct SolverConfig {
    #[serde(default)]
    pub context: ContextConfig,

    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub pretty: PrettyLayout,
}

/// Settings of the engine-side context configuration.
/// Leaving both fields empty creates contexts with the engine defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ContextConfig {
    /// An SMT-LIB logic name (e.g., `QF_LRA`) to tune the context for.
    #[serde(default)]
    pub logic: Option<String>,
    /// Raw `name = value` pairs passed to the engine configuration.
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Whether models keep the values of variables eliminated during simplification.
    #[serde(default = "default_keep_subst")]
    pub keep_subst: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            keep_subst: default_keep_subst(),
        }
    }
}

fn default_keep_subst() -> bool {
    true
}

/// Layout of the engine's pretty printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PrettyLayout {
    #[serde(default = "PrettyLayout::default_width")]
    pub width: u32,
    #[serde(default = "PrettyLayout::default_height")]
    pub height: u32,
    #[serde(default)]
    pub offset: u32,
}

impl PrettyLayout {
    fn default_width() -> u32 {
        80
    }

    fn default_height() -> u32 {
        20
    }
}

impl Default for PrettyLayout {
    fn default() -> Self {
        Self {
            width: Self::default_width(),
            height: Self::default_height(),
            offset: 0,
        }
    }
}

impl SolverConfig {
    /// Loads the configurations from `ryices_config.*` and `RYICES_*` variables.
    pub fn load() -> Result<Self> {
        let config = common::config::load_config(CONFIG_FILENAME, CONFIG_ENV_PREFIX, |b| Ok(b))?;
        Ok(SolverConfig::try_from(config)?)
    }

    /// The configurations loaded once per process.
    pub fn global() -> Result<&'static SolverConfig> {
        static GLOBAL: OnceLock<SolverConfig> = OnceLock::new();
        if let Some(config) = GLOBAL.get() {
            return Ok(config);
        }
        let config = Self::load()?;
        Ok(GLOBAL.get_or_init(|| config))
    }
}

/// An engine-side context configuration, released on drop.
struct NativeConfig(ptr::NonNull<sys::ctx_config_t>);

impl Drop for NativeConfig {
    fn drop(&mut self) {
        unsafe { sys::yices_free_config(self.0.as_ptr()) };
    }
}

impl ContextConfig {
    pub(crate) fn is_default(&self) -> bool {
        self.logic.is_none() && self.params.is_empty()
    }

    /// Calls `f` with the native configuration equivalent to this one.
    /// The configuration pointer is only valid during the call.
    pub(crate) fn with_native<T>(
        &self,
        engine: &EngineGuard,
        f: impl FnOnce(*const sys::ctx_config_t) -> T,
    ) -> Result<T> {
        if self.is_default() {
            return Ok(f(ptr::null()));
        }

        let native = ptr::NonNull::new(unsafe { sys::yices_new_config() })
            .map(NativeConfig)
            .ok_or_else(|| Error::NullHandle {
                op: "yices_new_config",
                cause: engine.last_error(),
            })?;

        if let Some(logic) = &self.logic {
            let logic = CString::new(logic.as_str())?;
            let status =
                unsafe { sys::yices_default_config_for_logic(native.0.as_ptr(), logic.as_ptr()) };
            if status != 0 {
                return Err(Error::EngineStatus {
                    op: "yices_default_config_for_logic",
                    status,
                    cause: engine.last_error(),
                });
            }
        }

        for (name, value) in &self.params {
            let name = CString::new(name.as_str())?;
            let value = CString::new(value.as_str())?;
            let status =
                unsafe { sys::yices_set_config(native.0.as_ptr(), name.as_ptr(), value.as_ptr()) };
            if status != 0 {
                return Err(Error::EngineStatus {
                    op: "yices_set_config",
                    status,
                    cause: engine.last_error(),
                });
            }
        }

        Ok(f(native.0.as_ptr()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::config::{Config, File, FileFormat};

    fn from_toml(content: &str) -> SolverConfig {
        Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()
            .and_then(SolverConfig::try_from)
            .unwrap()
    }

    #[test]
    fn defaults_without_any_source() {
        let config = from_toml("");
        assert!(config.context.is_default());
        assert!(config.model.keep_subst);
        assert_eq!(config.pretty, PrettyLayout::default());
        assert_eq!(config.pretty.width, 80);
        assert_eq!(config.pretty.height, 20);
    }

    #[test]
    fn context_settings_are_read() {
        let config = from_toml(
            r#"
            [context]
            logic = "QF_LRA"

            [context.params]
            mode = "push-pop"
            arith-solver = "simplex"

            [model]
            keep_subst = false

            [pretty]
            width = 120
            "#,
        );
        assert_eq!(config.context.logic.as_deref(), Some("QF_LRA"));
        assert_eq!(config.context.params.len(), 2);
        assert_eq!(config.context.params["mode"], "push-pop");
        assert!(!config.context.is_default());
        assert!(!config.model.keep_subst);
        assert_eq!(config.pretty.width, 120);
        assert_eq!(config.pretty.height, 20);
    }
}
