//! Errores de los stores.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not open {path}: {source}")]
    Open { path: PathBuf, source: std::io::Error },
    #[error("corrupt store {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },
    #[error("write slot {slot} out of range (store has {slots})")]
    InvalidSlot { slot: usize, slots: usize },
    #[error("key {0} written more than once")]
    DuplicateKey(String),
    #[error("write slot {0} poisoned by a panicking writer")]
    Poisoned(usize),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
