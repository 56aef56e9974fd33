use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::cache::{latest_hash, resolve_or_create, workspace_hash};
use crate::constants::{ENGINE_VERSION, MANIFEST_FILE};
use crate::errors::WorkspaceError;

/// Identidad de una ejecución: entradas, workspace resuelto y su hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunHandle {
    pub inputs: Vec<String>,
    /// Ruta absoluta y canónica del workspace.
    pub workspace: PathBuf,
    pub hash: String,
    /// `true` si el hash se tomó del marcador `latest`.
    pub from_latest: bool,
    /// `true` si el directorio ya existía (ejecución retomada).
    pub resumed: bool,
}

impl RunHandle {
    /// Resuelve (o crea) el workspace bajo `base`.
    ///
    /// Con `reuse_latest` el hash no se recalcula a partir de los argumentos:
    /// se lee del marcador que dejó la ejecución anterior.
    pub fn open(base: &Path, inputs: &[String], compiled_params: &str, reuse_latest: bool) -> Result<Self, WorkspaceError> {
        let hash = if reuse_latest {
            latest_hash(base)?
        } else {
            workspace_hash(inputs, compiled_params)
        };
        let resumed = base.join(&hash).is_dir();
        let workspace = resolve_or_create(base, &hash)?;
        let handle = Self { inputs: inputs.to_vec(),
                            workspace,
                            hash,
                            from_latest: reuse_latest,
                            resumed };
        handle.write_manifest(compiled_params)?;
        info!("workspace {} (hash {}, resumed: {})", handle.workspace.display(), handle.hash, handle.resumed);
        Ok(handle)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.workspace.join(MANIFEST_FILE)
    }

    /// Escribe `run.json` sólo si el workspace aún no tiene uno.
    fn write_manifest(&self, compiled_params: &str) -> Result<(), WorkspaceError> {
        let path = self.manifest_path();
        if path.exists() {
            return Ok(());
        }
        let manifest = RunManifest { hash: self.hash.clone(),
                                     engine_version: ENGINE_VERSION.to_string(),
                                     inputs: self.inputs.clone(),
                                     params: compiled_params.to_string(),
                                     created_at: Utc::now() };
        let body = match serde_json::to_string_pretty(&manifest) {
            Ok(b) => b,
            Err(e) => {
                warn!("manifest not serializable: {e}");
                return Ok(());
            }
        };
        fs::write(&path, body).map_err(|source| WorkspaceError::Manifest { path, source })
    }

    pub fn read_manifest(&self) -> Option<RunManifest> {
        let raw = fs::read_to_string(self.manifest_path()).ok()?;
        serde_json::from_str(&raw).ok()
    }
}

/// Registro de la invocación que creó un workspace.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub hash: String,
    pub engine_version: String,
    pub inputs: Vec<String>,
    pub params: String,
    pub created_at: DateTime<Utc>,
}
