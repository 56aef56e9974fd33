//! Workflow `easy-hybrid-assemble`: preparación, workspace y lanzamiento.

use std::fs;
use std::path::Path;

use asm_core::{ConfigError, ParameterRegistry, RuntimeConfig, UsageError};
use asm_workflow::{easy_hybrid_assemble, prepare, EmbeddedScripts, InputMode, LaunchError, WorkflowError, ASSEMBLY_MODULE};

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn tmp_str(base: &Path, name: &str) -> String {
    base.join(name).to_string_lossy().into_owned()
}

#[test]
fn single_read_set_environment() {
    let tmp = tempfile::tempdir().unwrap();
    let work = tmp_str(tmp.path(), "work");
    let mut registry = ParameterRegistry::new().unwrap();
    let run = prepare(&mut registry, &args(&["reads.fq", "out.fasta", &work]), &EmbeddedScripts).unwrap();

    assert_eq!(run.mode, InputMode::Single);
    assert_eq!(run.reads, vec!["reads.fq"]);
    assert_eq!(run.output, "out.fasta");
    assert!(run.script_path.starts_with(&run.handle.workspace));
    assert!(run.script_path.is_file());

    let env = &run.env;
    assert_eq!(env.get("PAIRED_END"), Some(None));
    assert_eq!(env.get("REMOVE_TMP"), Some(None));
    assert_eq!(env.get("OUT_FILE"), Some(Some("out.fasta")));
    assert_eq!(env.get("ASSEMBLY_MODULE"), Some(Some(ASSEMBLY_MODULE)));
    assert_eq!(env.get("VERBOSITY_PAR"), Some(Some("-v 3")));
    let tmp_path = env.get("TMP_PATH").flatten().unwrap();
    assert_eq!(Path::new(tmp_path), fs::canonicalize(&run.handle.workspace).unwrap());

    let assembly = env.get("ASSEMBLY_PAR").flatten().unwrap();
    assert!(assembly.contains("--zdrop 200"));
    assert!(assembly.contains("--num-iterations aa:12,nucl:20"));
    assert!(!assembly.contains("--threads"));
    assert!(!assembly.contains("--remove-tmp-files"));
}

#[test]
fn paired_reads_and_user_flags() {
    let tmp = tempfile::tempdir().unwrap();
    let work = tmp_str(tmp.path(), "work");
    let mut registry = ParameterRegistry::new().unwrap();
    let run = prepare(&mut registry,
                      &args(&["r_1.fq", "--remove-tmp-files", "r_2.fq", "out.fasta", &work, "--threads", "3"]),
                      &EmbeddedScripts).unwrap();

    assert_eq!(run.mode, InputMode::Paired);
    assert_eq!(run.reads, vec!["r_1.fq", "r_2.fq"]);
    assert_eq!(run.env.get("PAIRED_END"), Some(Some("1")));
    assert_eq!(run.env.get("REMOVE_TMP"), Some(Some("TRUE")));
    let assembly = run.env.get("ASSEMBLY_PAR").flatten().unwrap();
    assert!(assembly.contains("--threads 3"));
    assert!(assembly.contains("--remove-tmp-files 1"));
}

#[test]
fn bad_read_count_leaves_no_workspace() {
    let tmp = tempfile::tempdir().unwrap();
    let work = tmp_str(tmp.path(), "work");
    let mut registry = ParameterRegistry::new().unwrap();
    let err = prepare(&mut registry, &args(&["a.fq", "b.fq", "c.fq", "out.fasta", &work]), &EmbeddedScripts).unwrap_err();

    assert!(matches!(err, WorkflowError::Usage(UsageError::TooManyInputs(5))));
    assert!(!Path::new(&work).exists());
}

#[test]
fn unknown_option_fails_before_side_effects() {
    let tmp = tempfile::tempdir().unwrap();
    let work = tmp_str(tmp.path(), "work");
    let mut registry = ParameterRegistry::new().unwrap();
    let err = prepare(&mut registry, &args(&["r.fq", "out.fasta", &work, "--summary-prefix", "x"]), &EmbeddedScripts).unwrap_err();

    assert!(matches!(err, WorkflowError::Config(ConfigError::UnknownOption(ref o)) if o == "--summary-prefix"));
    assert!(!Path::new(&work).exists());
}

#[test]
fn reuse_latest_returns_to_previous_workspace() {
    let tmp = tempfile::tempdir().unwrap();
    let work = tmp_str(tmp.path(), "work");

    let mut first = ParameterRegistry::new().unwrap();
    let a = prepare(&mut first, &args(&["r.fq", "out.fasta", &work]), &EmbeddedScripts).unwrap();
    fs::write(a.handle.workspace.join("partial.db"), "x").unwrap();

    // otros parámetros: sin reuse el hash cambia
    let mut second = ParameterRegistry::new().unwrap();
    let b = prepare(&mut second, &args(&["r.fq", "out.fasta", &work, "-k", "17"]), &EmbeddedScripts).unwrap();
    assert_ne!(a.handle.hash, b.handle.hash);

    let mut third = ParameterRegistry::new().unwrap();
    let c = prepare(&mut third, &args(&["other.fq", "out2.fasta", &work, "--reuse-latest"]), &EmbeddedScripts).unwrap();
    assert_eq!(c.handle.hash, b.handle.hash);
    assert!(c.handle.resumed);

    // mismos argumentos que la primera: mismo workspace, contenido intacto
    let mut fourth = ParameterRegistry::new().unwrap();
    let d = prepare(&mut fourth, &args(&["r.fq", "out.fasta", &work]), &EmbeddedScripts).unwrap();
    assert_eq!(d.handle.workspace, a.handle.workspace);
    assert!(d.handle.workspace.join("partial.db").exists());
}

#[cfg(unix)]
fn script_config(dir: &Path, body: &str) -> RuntimeConfig {
    fs::write(dir.join(asm_workflow::EASY_HYBRID_ASSEMBLER_SCRIPT), body).unwrap();
    RuntimeConfig { script_dir: Some(dir.to_path_buf()), ..RuntimeConfig::default() }
}

#[cfg(unix)]
#[test]
fn child_sees_environment_and_reads_only() {
    let tmp = tempfile::tempdir().unwrap();
    let scripts = tmp.path().join("scripts");
    fs::create_dir(&scripts).unwrap();
    let config = script_config(&scripts,
                               "printf '%s|%s|%s|%s\\n' \"${PAIRED_END-unset}\" \"$OUT_FILE\" \"$ASSEMBLY_MODULE\" \"$*\" > \"$TMP_PATH/seen\"\n");
    let work = tmp_str(tmp.path(), "work");

    let run = easy_hybrid_assemble(&args(&["r_1.fq", "r_2.fq", "out.fasta", &work]), &config).unwrap();
    let seen = fs::read_to_string(run.handle.workspace.join("seen")).unwrap();
    assert_eq!(seen, "1|out.fasta|hybridassembledb|r_1.fq r_2.fq\n");
}

#[cfg(unix)]
#[test]
fn child_exit_status_is_propagated() {
    let tmp = tempfile::tempdir().unwrap();
    let scripts = tmp.path().join("scripts");
    fs::create_dir(&scripts).unwrap();
    let config = script_config(&scripts, "exit 7\n");
    let work = tmp_str(tmp.path(), "work");

    let err = easy_hybrid_assemble(&args(&["r.fq", "out.fasta", &work]), &config).unwrap_err();
    match err {
        WorkflowError::Launch(e @ LaunchError::ChildProcess { code: 7 }) => assert_eq!(e.exit_code(), 7),
        other => panic!("unexpected error: {other}"),
    }
}

#[cfg(unix)]
#[test]
fn quoted_stage_string_keeps_runner_as_one_word() {
    let tmp = tempfile::tempdir().unwrap();
    let scripts = tmp.path().join("scripts");
    fs::create_dir(&scripts).unwrap();
    let config = script_config(&scripts,
                               "eval \"set -- $ASSEMBLY_PAR\"\n\
                                while [ $# -gt 0 ]; do\n\
                                [ \"$1\" = --mpi-runner ] && printf '%s\\n' \"$2\" > \"$TMP_PATH/runner\"\n\
                                shift\n\
                                done\n");
    let work = tmp_str(tmp.path(), "work");

    let run = easy_hybrid_assemble(&args(&["r.fq", "out.fasta", &work, "--mpi-runner", "mpirun -np 42"]), &config).unwrap();
    assert_eq!(run.env.get("RUNNER"), Some(Some("mpirun -np 42")));
    assert!(run.env.get("ASSEMBLY_PAR").flatten().unwrap().contains("--mpi-runner 'mpirun -np 42'"));
    let seen = fs::read_to_string(run.handle.workspace.join("runner")).unwrap();
    assert_eq!(seen, "mpirun -np 42\n");
}
