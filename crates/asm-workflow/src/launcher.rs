//! Escritura del script al workspace y ejecución como proceso hijo.
//!
//! Las cadenas de parámetros compiladas viajan siempre por variables de
//! entorno; la línea de argumentos del hijo sólo lleva los ficheros de
//! lectura.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use indexmap::IndexMap;
use log::{debug, info};

use crate::error::LaunchError;
use crate::scripts::PipelineScript;

/// Variables para el entorno del hijo. `None` elimina la variable aunque
/// el proceso padre la tenga definida.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionEnv {
    vars: IndexMap<String, Option<String>>,
}

impl ExecutionEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.vars.insert(name.to_string(), Some(value.into()));
        self
    }

    pub fn unset(&mut self, name: &str) -> &mut Self {
        self.vars.insert(name.to_string(), None);
        self
    }

    pub fn set_opt(&mut self, name: &str, value: Option<impl Into<String>>) -> &mut Self {
        match value {
            Some(v) => self.set(name, v),
            None => self.unset(name),
        }
    }

    /// `Some(None)` si la variable se eliminará, `None` si no se toca.
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.vars.get(name).map(|v| v.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    fn apply(&self, cmd: &mut Command) {
        for (name, value) in &self.vars {
            match value {
                Some(v) => cmd.env(name, v),
                None => cmd.env_remove(name),
            };
        }
    }
}

/// Escribe el script tal cual en `dir` y lo deja ejecutable. Devuelve la ruta.
pub fn materialize(script: &PipelineScript, dir: &Path) -> Result<PathBuf, LaunchError> {
    let path = dir.join(&script.name);
    let err = |source| LaunchError::Materialize { path: path.clone(), source };
    fs::write(&path, script.body.as_bytes()).map_err(err)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).map_err(err)?;
    }
    debug!("materialized {} ({}) at {}", script.name, script.version, path.display());
    Ok(path)
}

/// Ejecuta el script y bloquea hasta que termine. Con `interpreter` el
/// script se pasa como primer argumento del intérprete; sin él se ejecuta
/// directamente. stdin/stdout/stderr se heredan.
pub fn launch<S: AsRef<str>>(script: &Path, args: &[S], env: &ExecutionEnv, interpreter: Option<&Path>) -> Result<(), LaunchError> {
    let mut cmd = match interpreter {
        Some(shell) => {
            let mut c = Command::new(shell);
            c.arg(script);
            c
        }
        None => Command::new(script),
    };
    cmd.args(args.iter().map(|a| a.as_ref()));
    env.apply(&mut cmd);

    info!("launching {} with {} input file(s)", script.display(), args.len());
    let status = cmd.status()
                    .map_err(|source| LaunchError::Spawn { path: script.to_path_buf(), source })?;
    match status.code() {
        Some(0) => Ok(()),
        Some(code) => Err(LaunchError::ChildProcess { code }),
        None => Err(LaunchError::Terminated),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keeps_insertion_order_and_removals() {
        let mut env = ExecutionEnv::new();
        env.set("B", "1").unset("A").set_opt("C", Some("x")).set_opt("D", None::<String>);
        let names: Vec<&str> = env.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["B", "A", "C", "D"]);
        assert_eq!(env.get("A"), Some(None));
        assert_eq!(env.get("C"), Some(Some("x")));
        assert_eq!(env.get("Z"), None);
    }

    #[cfg(unix)]
    #[test]
    fn materialized_script_is_executable() {
        use std::borrow::Cow;
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let script = PipelineScript { name: "run.sh".into(), version: "t".into(), body: Cow::Borrowed("#!/bin/sh\nexit 0\n") };
        let path = materialize(&script, tmp.path()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "#!/bin/sh\nexit 0\n");
        assert_eq!(fs::metadata(&path).unwrap().permissions().mode() & 0o777, 0o755);
    }
}
