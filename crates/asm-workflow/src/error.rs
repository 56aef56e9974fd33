//! Errores del lanzador y del workflow.

use std::path::PathBuf;

use asm_core::{ConfigError, UsageError, WorkspaceError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("could not write pipeline script {path}: {source}")]
    Materialize { path: PathBuf, source: std::io::Error },
    #[error("could not start {path}: {source}")]
    Spawn { path: PathBuf, source: std::io::Error },
    /// El pipeline terminó con estado distinto de cero.
    #[error("pipeline exited with status {code}")]
    ChildProcess { code: i32 },
    #[error("pipeline terminated by a signal")]
    Terminated,
}

impl LaunchError {
    /// Código de salida a propagar al proceso que invocó el workflow.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::ChildProcess { code } => *code,
            _ => 1,
        }
    }
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("unknown pipeline script {0}")]
    Unknown(String),
    #[error("could not read pipeline script {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Usage(#[from] UsageError),
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error(transparent)]
    Launch(#[from] LaunchError),
}
