//! asm-workflow: clasificación de entradas, scripts de pipeline, lanzador
//! y el workflow `easy-hybrid-assemble`.

pub mod classify;
pub mod error;
pub mod hybrid;
pub mod launcher;
pub mod scripts;

pub use classify::{classify_inputs, InputMode};
pub use error::{LaunchError, ScriptError, WorkflowError};
pub use hybrid::{easy_hybrid_assemble, prepare, PreparedRun, ASSEMBLY_MODULE};
pub use launcher::{launch, materialize, ExecutionEnv};
pub use scripts::{script_source, EmbeddedScripts, PipelineScript, ScriptDirectory, ScriptSource, EASY_HYBRID_ASSEMBLER_SCRIPT};
