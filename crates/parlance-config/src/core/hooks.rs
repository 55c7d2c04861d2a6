//! Exception-hook configuration
//!
//! The `Logging` section may carry an `excepthook` mapping telling external
//! collaborators which process-wide exception hook to install and which
//! logger to attach. This module only parses the options object; installing
//! the hook is the collaborator's responsibility.

use std::fmt;

use crate::core::error::{ConfigError, ConfigResult};
use crate::core::value::Value;

/// Canonical location of the options object inside a configuration.
pub const EXCEPTHOOK_KEY_PATH: &str = "Logging.excepthook";

/// Which exception hook to install.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// Log the exception through the attached logger.
    Log,
    /// Drop the process into an interactive debugger.
    Debugger,
    /// Install nothing.
    #[default]
    Disabled,
}

impl HookKind {
    /// Stable name of this hook kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            HookKind::Log => "log",
            HookKind::Debugger => "debugger",
            HookKind::Disabled => "disabled",
        }
    }

    /// Look a hook kind up by its stable name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "log" => Some(HookKind::Log),
            "debugger" => Some(HookKind::Debugger),
            "disabled" => Some(HookKind::Disabled),
            _ => None,
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options object for the exception hook: `{hook_type, logger}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExceptionHookConfig {
    /// Which hook to install; absent means [`HookKind::Disabled`].
    pub hook_type: HookKind,
    /// Optional name of the logger handle to attach.
    pub logger: Option<String>,
}

impl ExceptionHookConfig {
    /// Parse the options object from a configuration value.
    ///
    /// The value must be a mapping. A missing or null `hook_type` reads as
    /// [`HookKind::Disabled`]; an unknown name is an evaluation error.
    pub fn from_value(value: &Value) -> ConfigResult<Self> {
        let Value::Map(options) = value else {
            return Err(ConfigError::evaluation(
                EXCEPTHOOK_KEY_PATH,
                format!("hook options must be a mapping, found {}", value.kind()),
            ));
        };

        let hook_type = match options.get("hook_type") {
            None | Some(Value::Null) => HookKind::Disabled,
            Some(Value::String(name)) => HookKind::from_name(name).ok_or_else(|| {
                ConfigError::evaluation(
                    EXCEPTHOOK_KEY_PATH,
                    format!("unknown hook_type {name:?} (expected log, debugger or disabled)"),
                )
            })?,
            Some(other) => {
                return Err(ConfigError::evaluation(
                    EXCEPTHOOK_KEY_PATH,
                    format!("hook_type must be a string, found {}", other.kind()),
                ));
            }
        };

        let logger = match options.get("logger") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name.clone()),
            Some(other) => {
                return Err(ConfigError::evaluation(
                    EXCEPTHOOK_KEY_PATH,
                    format!("logger must be a string, found {}", other.kind()),
                ));
            }
        };

        Ok(Self { hook_type, logger })
    }
}
