//! Errores del job de reducción. Todos son fatales para el job completo.

use asm_core::ConfigError;
use asm_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReduceError {
    /// Clave referenciada ausente en un store de búsqueda.
    #[error("could not find key {key} in {store} store")]
    Lookup { key: String, store: &'static str },
    #[error("result store has no record at index {0}")]
    MissingRecord(usize),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
