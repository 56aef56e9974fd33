//! Configuración de ejecución desde variables de entorno (.env opcional).
//!
//! Sólo cubre lo que no es un parámetro de línea de comandos: dónde buscar
//! los scripts de pipeline, con qué intérprete lanzarlos y la granularidad
//! del job de reducción.

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

use crate::constants::DEFAULT_BATCH_SIZE;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

pub const DEFAULT_SHELL: &str = "/bin/sh";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Directorio con scripts de pipeline (sobre-escribe los embebidos).
    pub script_dir: Option<PathBuf>,
    /// Intérprete del script materializado; `None` lo ejecuta directamente.
    pub shell: Option<PathBuf>,
    /// Registros reclamados por worker en cada vuelta.
    pub batch_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { script_dir: None,
               shell: Some(PathBuf::from(DEFAULT_SHELL)),
               batch_size: DEFAULT_BATCH_SIZE }
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Self
        where F: Fn(&str) -> Option<String>
    {
        let script_dir = lookup("ASMFLOW_SCRIPT_DIR").filter(|v| !v.is_empty()).map(PathBuf::from);
        let shell = match lookup("ASMFLOW_SHELL") {
            Some(v) if v.is_empty() => None,
            Some(v) => Some(PathBuf::from(v)),
            None => Some(PathBuf::from(DEFAULT_SHELL)),
        };
        let batch_size = lookup("ASMFLOW_BATCH_SIZE").and_then(|v| v.parse().ok())
                                                     .filter(|n: &usize| *n > 0)
                                                     .unwrap_or(DEFAULT_BATCH_SIZE);
        Self { script_dir, shell, batch_size }
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
