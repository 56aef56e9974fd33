//! Workspace direccionado por contenido.
//!
//! El nombre del directorio es el hash de (inputs, parámetros compilados).
//! Un directorio existente con el mismo hash se reutiliza tal cual: las
//! salidas parciales de una ejecución interrumpida se conservan y el
//! pipeline puede retomar etapa por etapa.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_json::json;

use crate::constants::{ENGINE_VERSION, LATEST_MARKER, WORKSPACE_HASH_LEN};
use crate::errors::WorkspaceError;
use crate::hashing::hash_value;

/// Hash puro de las rutas de entrada (en su orden) y la cadena de parámetros.
pub fn workspace_hash<S: AsRef<str>>(inputs: &[S], compiled_params: &str) -> String {
    let inputs: Vec<&str> = inputs.iter().map(|s| s.as_ref()).collect();
    let fp = json!({
        "engine_version": ENGINE_VERSION,
        "inputs": inputs,
        "params": compiled_params,
    });
    let mut h = hash_value(&fp);
    h.truncate(WORKSPACE_HASH_LEN);
    h
}

/// Devuelve la ruta canónica de `base/<hash>`, creándola si no existe, y
/// apunta el marcador `latest` a ella.
pub fn resolve_or_create(base: &Path, hash: &str) -> Result<PathBuf, WorkspaceError> {
    let dir = base.join(hash);
    if dir.is_dir() {
        info!("reusing workspace {}", dir.display());
    } else {
        fs::create_dir_all(&dir).map_err(|source| WorkspaceError::Create { path: dir.clone(), source })?;
        debug!("created workspace {}", dir.display());
    }
    point_latest(base, hash).map_err(|source| WorkspaceError::Create { path: base.join(LATEST_MARKER), source })?;
    fs::canonicalize(&dir).map_err(|source| WorkspaceError::RealPath { path: dir, source })
}

/// Lee el hash al que apunta el marcador `latest` de `base`.
pub fn latest_hash(base: &Path) -> Result<String, WorkspaceError> {
    let marker = base.join(LATEST_MARKER);
    let meta = fs::symlink_metadata(&marker).map_err(|source| WorkspaceError::Latest { path: marker.clone(), source })?;
    let target = if meta.file_type().is_symlink() {
        fs::read_link(&marker).map_err(|source| WorkspaceError::Latest { path: marker.clone(), source })?
    } else {
        let raw = fs::read_to_string(&marker).map_err(|source| WorkspaceError::Latest { path: marker.clone(), source })?;
        PathBuf::from(raw.trim())
    };
    target.file_name()
          .and_then(|n| n.to_str())
          .filter(|n| !n.is_empty())
          .map(str::to_string)
          .ok_or(WorkspaceError::InvalidLatest(marker))
}

#[cfg(unix)]
fn point_latest(base: &Path, hash: &str) -> io::Result<()> {
    let marker = base.join(LATEST_MARKER);
    match fs::symlink_metadata(&marker) {
        Ok(_) => fs::remove_file(&marker)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    std::os::unix::fs::symlink(hash, &marker)
}

#[cfg(not(unix))]
fn point_latest(base: &Path, hash: &str) -> io::Result<()> {
    fs::write(base.join(LATEST_MARKER), hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_has_fixed_length() {
        let h = workspace_hash(&["r1.fq", "out.fa", "tmp"], "--threads 4");
        assert_eq!(h.len(), WORKSPACE_HASH_LEN);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn path_boundaries_matter() {
        assert_ne!(workspace_hash(&["ab", "c"], ""), workspace_hash(&["a", "bc"], ""));
    }

    #[test]
    fn latest_follows_most_recent_workspace() {
        let tmp = tempfile::tempdir().unwrap();
        resolve_or_create(tmp.path(), "aaaa").unwrap();
        resolve_or_create(tmp.path(), "bbbb").unwrap();
        assert_eq!(latest_hash(tmp.path()).unwrap(), "bbbb");
    }

    #[test]
    fn missing_latest_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(latest_hash(tmp.path()), Err(WorkspaceError::Latest { .. })));
    }

    #[test]
    fn base_that_is_a_file_cannot_hold_workspaces() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path().join("not-a-dir");
        fs::write(&base, "x").unwrap();
        match resolve_or_create(&base, "aaaa") {
            Err(WorkspaceError::Create { path, .. }) => assert_eq!(path, base.join("aaaa")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn latest_marker_blocked_by_directory() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join(LATEST_MARKER).join("inner")).unwrap();
        match resolve_or_create(tmp.path(), "aaaa") {
            Err(WorkspaceError::Create { path, .. }) => assert_eq!(path, tmp.path().join(LATEST_MARKER)),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
