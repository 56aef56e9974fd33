//! Workflow `easy-hybrid-assemble`.
//!
//! `prepare` hace todo lo que no lanza procesos: defaults del workflow,
//! parseo, opciones forzadas, clasificación de entradas, workspace,
//! entorno del hijo y script materializado. `easy_hybrid_assemble` además
//! ejecuta el pipeline y espera a que termine.

use std::env;
use std::path::{Path, PathBuf};

use asm_core::{ids, lists, ParameterRegistry, RunHandle, RuntimeConfig, WorkflowConfiguration};
use log::{debug, info};

use crate::classify::{classify_inputs, InputMode};
use crate::error::WorkflowError;
use crate::launcher::{launch, materialize, ExecutionEnv};
use crate::scripts::{script_source, ScriptSource, EASY_HYBRID_ASSEMBLER_SCRIPT};

/// Módulo que el script invoca para la etapa de ensamblado.
pub const ASSEMBLY_MODULE: &str = "hybridassembledb";

/// Ejecución lista para lanzar.
#[derive(Debug)]
pub struct PreparedRun {
    pub handle: RunHandle,
    pub mode: InputMode,
    pub output: String,
    /// Ficheros de lectura; único contenido de la línea de argumentos.
    pub reads: Vec<String>,
    pub script_path: PathBuf,
    pub env: ExecutionEnv,
}

pub fn prepare<S: AsRef<str>>(registry: &mut ParameterRegistry, args: &[S], scripts: &dyn ScriptSource) -> Result<PreparedRun, WorkflowError> {
    let workflow = WorkflowConfiguration::easy_hybrid_assembler();
    registry.apply_defaults(&workflow)?;
    let mut files = registry.parse(lists::EASY_HYBRID_ASSEMBLER, args)?;
    registry.force_pass_along(&workflow.pass_along)?;

    // antes de tocar el disco
    let mode = classify_inputs(&files)?;
    debug!("{} input mode: {mode:?}", workflow.name);

    let hashed_params = registry.compile(lists::EASY_HYBRID_ASSEMBLER, false)?;
    let reuse_latest = registry.bool_value(ids::REUSE_LATEST)?;
    let tmp_dir = files.last().cloned().unwrap_or_default();
    let handle = RunHandle::open(Path::new(&tmp_dir), &files, &hashed_params, reuse_latest)?;

    files.pop();
    let output = files.pop().unwrap_or_default();
    let reads = files;

    let mut child_env = ExecutionEnv::new();
    child_env.set_opt("PAIRED_END", mode.env_value())
             .set("TMP_PATH", handle.workspace.to_string_lossy())
             .set("OUT_FILE", output.as_str())
             .set_opt("REMOVE_TMP", registry.env_flag(ids::REMOVE_TMP_FILES)?)
             .set("RUNNER", registry.str_value(ids::RUNNER)?)
             .set("CREATEDB_PAR", registry.compile(lists::CREATEDB, false)?)
             .set("ASSEMBLY_PAR", registry.compile(lists::HYBRIDASSEMBLEWORKFLOW, true)?)
             .set("ASSEMBLY_MODULE", ASSEMBLY_MODULE)
             .set("VERBOSITY_PAR", registry.compile(lists::ONLY_VERBOSITY, false)?);
    if let Ok(exe) = env::current_exe() {
        child_env.set("ASMFLOW", exe.to_string_lossy());
    }

    let script = scripts.load(EASY_HYBRID_ASSEMBLER_SCRIPT)?;
    let script_path = materialize(&script, &handle.workspace)?;

    Ok(PreparedRun { handle,
                     mode,
                     output,
                     reads,
                     script_path,
                     env: child_env })
}

/// Ejecuta el workflow completo con un registro recién construido.
pub fn easy_hybrid_assemble<S: AsRef<str>>(args: &[S], config: &RuntimeConfig) -> Result<PreparedRun, WorkflowError> {
    let mut registry = ParameterRegistry::new()?;
    let scripts = script_source(config);
    let run = prepare(&mut registry, args, scripts.as_ref())?;
    info!("running {} in {}", EASY_HYBRID_ASSEMBLER_SCRIPT, run.handle.workspace.display());
    launch(&run.script_path, &run.reads, &run.env, config.shell.as_deref())?;
    Ok(run)
}
