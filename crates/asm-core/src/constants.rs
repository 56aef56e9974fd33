//! Constantes del núcleo.
//!
//! `ENGINE_VERSION` forma parte del input del hash de workspace: cambiarla
//! invalida todos los workspaces previos aunque inputs y parámetros no cambien.

/// Versión lógica del driver. Incluida en el hash de workspace.
pub const ENGINE_VERSION: &str = "A1.0";

/// Longitud (en caracteres hex) del hash que nombra un workspace.
pub const WORKSPACE_HASH_LEN: usize = 32;

/// Nombre del marcador que apunta al último workspace creado en un directorio base.
pub const LATEST_MARKER: &str = "latest";

/// Manifest escrito en cada workspace nuevo.
pub const MANIFEST_FILE: &str = "run.json";

/// Registros reclamados por worker en cada vuelta del job de reducción.
pub const DEFAULT_BATCH_SIZE: usize = 100;
