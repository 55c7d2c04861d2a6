//! Core configuration types

pub mod binding;
pub mod context;
pub mod error;
pub mod hooks;
pub mod source;
pub mod value;

pub(crate) mod path;

// Re-export core types
pub use binding::{Binding, Capability, ProviderId, ProviderRegistry, ProviderSpec, TYPE_KEY};
pub use context::{PROJECT_ROOT_ENV, ProjectContext};
pub use error::{ConfigError, ConfigResult, ErrorCategory};
pub use hooks::{EXCEPTHOOK_KEY_PATH, ExceptionHookConfig, HookKind};
pub use source::{ConfigFormat, ConfigSource, SourceId};
pub use value::{Map, Value};
