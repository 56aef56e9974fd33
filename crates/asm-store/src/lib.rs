//! asm-store: stores clave-valor con acceso por índice y por clave.
//!
//! - `StoreReader` / `StoreWriter`: contrato usado por los jobs.
//! - `MemoryStore` / `MemoryWriter`: implementación en memoria.
//! - `FileStoreReader` / `FileStoreWriter`: datos + índice en disco, un
//!   fichero temporal por slot de escritura.

pub mod error;
pub mod file;
pub mod keys;
pub mod memory;
pub mod traits;

pub use error::StoreError;
pub use file::{index_path, FileStoreReader, FileStoreWriter};
pub use memory::{MemoryStore, MemoryWriter};
pub use traits::{KeyedRecord, StoreReader, StoreWriter};
