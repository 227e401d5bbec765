//! Command-line interface for groovy-fmt
//! This binary formats Groovy sources and Gradle build scripts, or dumps the intermediate
//! stages of the pipeline for inspection.
//!
//! Usage:
//!   groovy-fmt `<paths>...`                 - Print formatted files
//!   groovy-fmt `<paths>...` --write         - Rewrite files in place
//!   groovy-fmt `<paths>...` --check         - Exit with 1 if any file would change
//!   groovy-fmt `<path>` --stage `<stage>`   - Dump tokens, cst, cst-json or doc instead
//!
//! With no paths, source is read from stdin. Syntax errors exit with 2.

mod files;
mod stages;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use groovy_config::{FmtConfig, Loader, PROJECT_FILE};
use groovy_printer::{Format, FormatError, FormatOptions, FormatRegistry, GroovyFormat};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// What a run found, worst outcome wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Outcome {
    Clean,
    WouldChange,
    Failed,
}

impl Outcome {
    fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Clean => ExitCode::SUCCESS,
            Outcome::WouldChange => ExitCode::from(1),
            Outcome::Failed => ExitCode::from(2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Print,
    Check,
    Write,
}

fn build_cli() -> Command {
    Command::new("groovy-fmt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A formatter for Groovy sources and Gradle build scripts")
        .arg(
            Arg::new("paths")
                .help("Files or directories to format (stdin if omitted)")
                .value_parser(value_parser!(PathBuf))
                .action(ArgAction::Append)
                .index(1),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Report files that would change and exit with 1 if any would")
                .action(ArgAction::SetTrue)
                .conflicts_with("write"),
        )
        .arg(
            Arg::new("write")
                .long("write")
                .short('w')
                .help("Rewrite files in place")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stage")
                .long("stage")
                .short('s')
                .help("Pipeline stage to print")
                .value_parser(stages::AVAILABLE_STAGES.to_vec())
                .default_value("format"),
        )
        .arg(
            Arg::new("print-width")
                .long("print-width")
                .help("Column limit (overrides configuration)")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("indent-width")
                .long("indent-width")
                .help("Spaces per indentation level (overrides configuration)")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log more (-v debug, -vv trace)")
                .action(ArgAction::Count),
        )
}

fn main() -> ExitCode {
    let matches = build_cli().get_matches();
    init_logging(matches.get_count("verbose"));

    let config = match load_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::from(2);
        }
    };

    let stage = matches
        .get_one::<String>("stage")
        .map(String::as_str)
        .unwrap_or("format");
    let mode = if matches.get_flag("check") {
        Mode::Check
    } else if matches.get_flag("write") {
        Mode::Write
    } else {
        Mode::Print
    };
    if stage != "format" && mode != Mode::Print {
        eprintln!("--check and --write only apply to the format stage");
        return ExitCode::from(2);
    }

    let paths: Vec<PathBuf> = matches
        .get_many::<PathBuf>("paths")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let outcome = if paths.is_empty() {
        run_stdin(stage, mode, &config)
    } else {
        run_paths(&paths, stage, mode, &config)
    };
    outcome.exit_code()
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Could not install logger: {}", e);
    }
}

/// Defaults, then `groovy-fmt.toml` in the working directory, then `--config`, then flags.
fn load_config(matches: &ArgMatches) -> Result<FmtConfig, groovy_config::ConfigError> {
    let mut loader = Loader::new().with_optional_file(PROJECT_FILE);
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        loader = loader.with_file(path);
    }
    if let Some(width) = matches.get_one::<usize>("print-width") {
        loader = loader.set_override("format.print_width", *width as i64)?;
    }
    if let Some(width) = matches.get_one::<usize>("indent-width") {
        loader = loader.set_override("format.indent_width", *width as i64)?;
    }
    loader.build()
}

fn run_stdin(stage: &str, mode: Mode, config: &FmtConfig) -> Outcome {
    let mut source = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut source) {
        eprintln!("Error reading stdin: {}", e);
        return Outcome::Failed;
    }
    let mode = if mode == Mode::Write {
        warn!("--write has no effect on stdin, printing instead");
        Mode::Print
    } else {
        mode
    };
    process(Path::new("<stdin>"), &source, &GroovyFormat, stage, mode, config)
}

fn run_paths(paths: &[PathBuf], stage: &str, mode: Mode, config: &FmtConfig) -> Outcome {
    let registry = FormatRegistry::with_defaults();
    let files = files::collect_files(paths, config);
    let mut outcome = Outcome::Clean;

    for path in &files {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                warn!("skipping {}: not valid UTF-8", path.display());
                continue;
            }
            Err(e) => {
                eprintln!("Error reading {}: {}", path.display(), e);
                outcome = outcome.max(Outcome::Failed);
                continue;
            }
        };
        let format = match registry.for_path(path) {
            Ok(format) => format,
            Err(_) => {
                debug!(path = %path.display(), "no format claims extension, using groovy");
                &GroovyFormat as &dyn Format
            }
        };
        if files.len() > 1 && mode == Mode::Print {
            println!("==> {} <==", path.display());
        }
        outcome = outcome.max(process(path, &source, format, stage, mode, config));
    }
    outcome
}

fn process(
    path: &Path,
    source: &str,
    format: &dyn Format,
    stage: &str,
    mode: Mode,
    config: &FmtConfig,
) -> Outcome {
    let options: FormatOptions = config.format_options();
    let output = match stages::execute_stage(source, stage, format, &options) {
        Ok(output) => output,
        Err(FormatError::Syntax(err)) => {
            eprintln!("{}: {}", path.display(), err.render_with_source(source));
            return Outcome::Failed;
        }
        Err(e) => {
            eprintln!("{}: {}", path.display(), e);
            return Outcome::Failed;
        }
    };

    match mode {
        Mode::Print => {
            print!("{}", output);
            if stage != "format" && !output.ends_with('\n') {
                println!();
            }
            Outcome::Clean
        }
        Mode::Check if output != source => {
            eprintln!("Would reformat: {}", path.display());
            Outcome::WouldChange
        }
        Mode::Check => Outcome::Clean,
        Mode::Write if output != source && !format.is_lossless(source, &output) => {
            warn!(
                "not writing {}: formatting would drop source text it cannot print",
                path.display()
            );
            Outcome::Clean
        }
        Mode::Write if output != source => match std::fs::write(path, &output) {
            Ok(()) => {
                info!("formatted {}", path.display());
                Outcome::Clean
            }
            Err(e) => {
                eprintln!("Error writing {}: {}", path.display(), e);
                Outcome::Failed
            }
        },
        Mode::Write => Outcome::Clean,
    }
}
