mod script;

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, CommandFactory, Parser, Subcommand};
use command_complete_core::{CommandSpec, validate_command};
use command_complete_engine::CompletionTree;
use command_complete_loader::{CompleterConfig, load_schema};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::script::{ScriptTarget, Shell};

const BIN_NAME: &str = "schema-complete";
const LOG_ENV: &str = "SCHEMA_COMPLETE_LOG";

static TREE: CompletionTree = CompletionTree::new();

#[derive(Debug, Parser)]
#[command(name = "schema-complete", version)]
#[command(about = "Schema-driven shell completion for command-line programs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a shell completion script.
    Completion(CompletionArgs),
    /// Validate one or more schema files.
    Validate(ValidateArgs),
    /// Print completions for a partially typed command line.
    #[command(name = "__complete", hide = true)]
    Complete(CompleteArgs),
}

/// Where the command schema comes from. Without `--schema` or a configured
/// schema, this program completes itself.
#[derive(Debug, Clone, Args)]
struct SourceArgs {
    /// Schema file (JSON, or YAML with a .yaml/.yml extension).
    #[arg(long)]
    schema: Option<PathBuf>,
    /// YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct CompletionArgs {
    /// Target shell.
    shell: Shell,
    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Schema files to validate.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct CompleteArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Index of the word being completed; negative means the last word.
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    cword: isize,
    /// Words of the command line, program name first.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    words: Vec<String>,
}

impl SourceArgs {
    fn load_config(&self) -> Result<CompleterConfig, String> {
        match &self.config {
            Some(path) => CompleterConfig::load(path).map_err(|e| format!("{}: {e}", path.display())),
            None => Ok(CompleterConfig::default()),
        }
    }

    fn load_spec(&self) -> Result<CommandSpec, String> {
        let config = self.load_config()?;
        let mut spec = match self.schema.as_ref().or(config.schema.as_ref()) {
            Some(path) => {
                debug!(path = %path.display(), "loading schema");
                load_schema(path).map_err(|e| format!("{}: {e}", path.display()))?
            }
            None => CommandSpec::from(&Cli::command()),
        };
        config.apply(&mut spec);
        Ok(spec)
    }

    /// Arguments that reproduce this source in a later process, with paths
    /// made absolute so the script works from any directory.
    fn to_args(&self) -> Result<Vec<String>, String> {
        let mut args = Vec::new();
        for (flag, path) in [("--schema", &self.schema), ("--config", &self.config)] {
            if let Some(path) = path {
                args.push(flag.to_string());
                args.push(absolute(path)?);
            }
        }
        Ok(args)
    }
}

fn absolute(path: &Path) -> Result<String, String> {
    std::path::absolute(path)
        .map(|p| p.display().to_string())
        .map_err(|e| format!("{}: {e}", path.display()))
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Completion(args) => run_completion(args),
        Command::Validate(args) => run_validate(args),
        Command::Complete(args) => run_complete(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_complete(args: CompleteArgs) -> Result<(), String> {
    let completions = TREE
        .complete(|| args.source.load_spec(), args.cword, &args.words)
        .map_err(|e| e.to_string())?;

    let mut stdout = std::io::stdout().lock();
    for completion in completions {
        writeln!(stdout, "{completion}").map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn run_completion(args: CompletionArgs) -> Result<(), String> {
    // Fail here, not on first <TAB>, if the schema is unusable.
    let spec = args.source.load_spec()?;
    validate_command(&spec).map_err(|e| format!("invalid command schema: {e}"))?;

    let mut completer = vec![BIN_NAME.to_string(), "__complete".to_string()];
    completer.extend(args.source.to_args()?);
    let target = ScriptTarget {
        programs: spec.names().map(String::from).collect(),
        completer,
    };

    print!("{}", script::render(args.shell, &target));
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let mut failed = 0;
    for path in &args.inputs {
        let checked = load_schema(path)
            .map_err(|e| e.to_string())
            .and_then(|spec| validate_command(&spec).map_err(|e| e.to_string()));
        if let Err(err) = checked {
            eprintln!("{}: {err}", path.display());
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(format!(
            "{failed} of {} schema file(s) failed validation",
            args.inputs.len()
        ));
    }
    println!("Validated {} schema file(s).", args.inputs.len());
    Ok(())
}
