//! Errores del núcleo: configuración, uso y workspace.

use std::path::PathBuf;

use thiserror::Error;

/// Errores de configuración. Se reportan antes de cualquier efecto lateral.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("invalid value '{value}' for option {option}")]
    InvalidValue { option: String, value: String },
    #[error("unrecognized option {0}")]
    UnknownOption(String),
    #[error("option {0} expects a value")]
    MissingValue(String),
    #[error("parameter {0} registered twice")]
    DuplicateParameter(String),
    #[error("unknown parameter {0}")]
    UnknownParameter(String),
    #[error("unknown parameter list {0}")]
    UnknownList(String),
    #[error("option {option} appears twice in list {list}")]
    AmbiguousOption { list: String, option: String },
    #[error("invalid validation pattern for {option}: {reason}")]
    InvalidPattern { option: String, reason: String },
    #[error("option {option} has kind {expected}, got {found}")]
    KindMismatch { option: String, expected: &'static str, found: &'static str },
    #[error("malformed argument string: {0}")]
    MalformedArguments(String),
}

/// Forma incorrecta de los argumentos posicionales.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum UsageError {
    #[error("too few input files provided ({0})")]
    TooFewInputs(usize),
    #[error("too many input files provided ({0}); for paired-end input provide READSETA_1.fastq READSETA_2.fastq ... OUTPUT.fasta tmpDir, for single input use READSET.fast(q|a) OUTPUT.fasta tmpDir")]
    TooManyInputs(usize),
    #[error("expected {expected} positional arguments, got {found}")]
    WrongArity { expected: usize, found: usize },
}

/// Fallos al resolver o crear el directorio de trabajo. Siempre fatales.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("could not create workspace {path}: {source}")]
    Create { path: PathBuf, source: std::io::Error },
    #[error("could not get real path of {path}: {source}")]
    RealPath { path: PathBuf, source: std::io::Error },
    #[error("could not read latest marker in {path}: {source}")]
    Latest { path: PathBuf, source: std::io::Error },
    #[error("latest marker in {0} does not name a workspace")]
    InvalidLatest(PathBuf),
    #[error("could not write manifest {path}: {source}")]
    Manifest { path: PathBuf, source: std::io::Error },
}
