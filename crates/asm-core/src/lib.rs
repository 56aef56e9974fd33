//! asm-core: parámetros, compilación por etapa y cache de workspaces.
pub mod config;
pub mod constants;
pub mod errors;
pub mod hashing;
pub mod params;
pub mod workspace;

pub use config::RuntimeConfig;
pub use errors::{ConfigError, UsageError, WorkspaceError};
pub use params::{ids, lists, ParamId, ParamValue, ParameterRegistry, Setting, WorkflowConfiguration};
pub use workspace::{RunHandle, RunManifest};
