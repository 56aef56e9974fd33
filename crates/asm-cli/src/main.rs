use std::env;
use std::path::Path;
use std::process;

use asm_core::{lists, ConfigError, ParameterRegistry, RuntimeConfig, UsageError, WorkflowConfiguration};
use asm_reduce::{ReduceError, SummarizeJob, SummarizeOptions, UniprotHeaderSummarizer};
use asm_workflow::{easy_hybrid_assemble, WorkflowError};
use log::{error, info};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const DEFAULT_VERBOSITY: i64 = 3;

// (comando, lista de parámetros, posicionales)
const COMMANDS: &[(&str, &str, &str)] = &[("easy-hybrid-assemble",
                                           lists::EASY_HYBRID_ASSEMBLER,
                                           "<i:reads.fast(q|a)> ... <o:output.fasta> <tmpDir>"),
                                          ("summarize", lists::SUMMARIZE, "<queryHeaderDB> <targetHeaderDB> <resultDB> <outDB>")];

#[derive(Debug, Error)]
enum CliError {
    #[error("no command given")]
    MissingCommand,
    #[error("unknown command {0}")]
    UnknownCommand(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Usage(#[from] UsageError),
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
    #[error(transparent)]
    Reduce(#[from] ReduceError),
}

impl CliError {
    /// 2: uso/configuración; hijo: su propio código; resto: 1.
    fn exit_code(&self) -> i32 {
        match self {
            CliError::MissingCommand | CliError::UnknownCommand(_) | CliError::Config(_) | CliError::Usage(_) => 2,
            CliError::Workflow(WorkflowError::Config(_) | WorkflowError::Usage(_)) => 2,
            CliError::Workflow(WorkflowError::Launch(e)) => e.exit_code(),
            CliError::Reduce(ReduceError::Config(_)) => 2,
            CliError::Workflow(_) | CliError::Reduce(_) => 1,
        }
    }
}

fn main() {
    asm_core::config::init_dotenv();
    let args: Vec<String> = env::args().skip(1).collect();
    init_logging(verbosity_hint(&args));

    let code = match run(&args) {
        Ok(()) => 0,
        Err(e) => {
            error!("{e}");
            e.exit_code()
        }
    };
    process::exit(code);
}

/// `-v N` leído antes del parseo completo para poder loguear sus errores.
fn verbosity_hint(args: &[String]) -> i64 {
    args.iter()
        .position(|a| a == "-v")
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_VERBOSITY)
}

fn init_logging(verbosity: i64) {
    let level = match verbosity {
        i64::MIN..=0 => "off",
        1 => "error",
        2 => "warn",
        _ => "info",
    };
    // RUST_LOG tiene prioridad sobre -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}

fn run(args: &[String]) -> Result<(), CliError> {
    let Some(command) = args.first() else {
        print_usage();
        return Err(CliError::MissingCommand);
    };
    let rest = &args[1..];
    match command.as_str() {
        "easy-hybrid-assemble" => {
            let config = RuntimeConfig::from_env();
            let run = easy_hybrid_assemble(rest, &config)?;
            info!("assembly written to {}", run.output);
            Ok(())
        }
        "summarize" => summarize(rest),
        "help" | "-h" | "--help" => help(rest),
        other => {
            print_usage();
            Err(CliError::UnknownCommand(other.to_string()))
        }
    }
}

fn summarize(args: &[String]) -> Result<(), CliError> {
    let mut registry = ParameterRegistry::new()?;
    let files = registry.parse(lists::SUMMARIZE, args)?;
    let [query, target, result, out] = files.as_slice() else {
        return Err(UsageError::WrongArity { expected: 4, found: files.len() }.into());
    };
    let config = RuntimeConfig::from_env();
    let options = SummarizeOptions::from_registry(&registry, config.batch_size)?;
    let job = SummarizeJob::new(options, UniprotHeaderSummarizer);
    let report = job.run_on_paths(Path::new(query), Path::new(target), Path::new(result), Path::new(out))?;
    info!("wrote {} summaries to {out}", report.records);
    Ok(())
}

fn help(args: &[String]) -> Result<(), CliError> {
    let include_expert = args.iter().any(|a| a == "--help-all");
    let Some(name) = args.iter().find(|a| !a.starts_with('-')) else {
        print_usage();
        return Ok(());
    };
    let (_, list, positional) = COMMANDS.iter()
                                        .find(|(cmd, _, _)| *cmd == name.as_str())
                                        .ok_or_else(|| CliError::UnknownCommand(name.clone()))?;

    let mut registry = ParameterRegistry::new()?;
    if name == "easy-hybrid-assemble" {
        // ayuda y categorías propias del workflow
        registry.apply_defaults(&WorkflowConfiguration::easy_hybrid_assembler())?;
    }
    println!("usage: asmflow {name} {positional} [options]\n");
    for d in registry.options(list, include_expert)? {
        println!("  {:<28} {} [{}]", d.name, d.help, d.value());
    }
    if !include_expert {
        println!("\nuse --help-all to list expert options");
    }
    Ok(())
}

fn print_usage() {
    println!("usage: asmflow <command> [args]\n\ncommands:");
    for (name, _, positional) in COMMANDS {
        println!("  {name} {positional}");
    }
    println!("  help <command> [--help-all]");
}
