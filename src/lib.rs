//! asmflow Rust Library
//!
//! Fachada del workspace:
//! - `asm_core`: parámetros, compilación por etapa, cache de workspaces.
//! - `asm_store`: stores clave-valor (memoria y disco).
//! - `asm_reduce`: job `summarize`.
//! - `asm_workflow`: lanzador y workflow `easy-hybrid-assemble`.
//!
//! El binario `asmflow` vive en `crates/asm-cli`.

pub use asm_core;
pub use asm_reduce;
pub use asm_store;
pub use asm_workflow;
