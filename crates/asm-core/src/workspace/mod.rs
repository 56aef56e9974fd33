//! Cache de workspaces: hash de entradas + parámetros → directorio reutilizable.

pub mod cache;
mod handle;

pub use cache::{latest_hash, resolve_or_create, workspace_hash};
pub use handle::{RunHandle, RunManifest};
