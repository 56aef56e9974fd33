//! Scripts de pipeline como recursos con nombre y versión.
//!
//! El contenido es opaco para el driver: se escribe al workspace tal cual y
//! las variables se entregan por entorno, nunca por sustitución de texto.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use asm_core::RuntimeConfig;
use log::debug;

use crate::error::ScriptError;

pub const EASY_HYBRID_ASSEMBLER_SCRIPT: &str = "easyhybridassembler.sh";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineScript {
    pub name: String,
    pub version: String,
    pub body: Cow<'static, str>,
}

pub trait ScriptSource {
    fn load(&self, name: &str) -> Result<PipelineScript, ScriptError>;
}

/// Scripts incluidos en el binario al compilar.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedScripts;

const EMBEDDED: &[(&str, &str)] = &[(EASY_HYBRID_ASSEMBLER_SCRIPT, include_str!("../scripts/easyhybridassembler.sh"))];

impl ScriptSource for EmbeddedScripts {
    fn load(&self, name: &str) -> Result<PipelineScript, ScriptError> {
        let (_, body) = EMBEDDED.iter()
                                .find(|(n, _)| *n == name)
                                .ok_or_else(|| ScriptError::Unknown(name.to_string()))?;
        Ok(PipelineScript { name: name.to_string(),
                            version: env!("CARGO_PKG_VERSION").to_string(),
                            body: Cow::Borrowed(*body) })
    }
}

/// Scripts leídos de un directorio configurado al desplegar.
#[derive(Debug, Clone)]
pub struct ScriptDirectory {
    dir: PathBuf,
}

impl ScriptDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ScriptSource for ScriptDirectory {
    fn load(&self, name: &str) -> Result<PipelineScript, ScriptError> {
        let path = self.dir.join(name);
        let body = fs::read_to_string(&path).map_err(|source| ScriptError::Read { path: path.clone(), source })?;
        debug!("loaded pipeline script {}", path.display());
        Ok(PipelineScript { name: name.to_string(),
                            version: format!("file:{}", path.display()),
                            body: Cow::Owned(body) })
    }
}

/// Directorio configurado si existe; si no, los scripts embebidos.
pub fn script_source(config: &RuntimeConfig) -> Box<dyn ScriptSource> {
    match &config.script_dir {
        Some(dir) => Box::new(ScriptDirectory::new(dir.clone())),
        None => Box::new(EmbeddedScripts),
    }
}
