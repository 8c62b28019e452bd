use anyhow::{Context, Result};
use argh::FromArgs;
use dotnet_commands::config::load_step;
use dotnet_commands::env::Environment;
use dotnet_commands::lexer::tokenize;
use dotnet_commands::runner::ProcessRunner;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(FromArgs)]
/// Assemble and run dotnet command lines from step configuration files.
struct Cli {
    #[argh(switch, short = 'v')]
    /// log at debug level (RUST_LOG takes precedence)
    verbose: bool,

    #[argh(subcommand)]
    command: Subcommand,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Subcommand {
    Show(Show),
    Run(Run),
    Tokenize(Tokenize),
}

#[derive(FromArgs)]
#[argh(subcommand, name = "show")]
/// print the command lines a step would run, with secrets redacted.
struct Show {
    #[argh(positional)]
    /// step configuration file (TOML)
    step: PathBuf,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "run")]
/// assemble a step and run its command lines in order.
/// Credential references name environment variables.
struct Run {
    #[argh(positional)]
    /// step configuration file (TOML)
    step: PathBuf,
}

#[derive(FromArgs)]
#[argh(subcommand, name = "tokenize")]
/// split an extra-options string the way build steps do.
/// Without a value, starts an interactive prompt.
struct Tokenize {
    #[argh(positional)]
    /// the options string to split
    line: Option<String>,
}

fn main() -> Result<()> {
    let cli: Cli = argh::from_env();
    init_tracing(cli.verbose);

    match cli.command {
        Subcommand::Show(show) => {
            let env = Environment::new();
            let step = load_step(&show.step)?;
            let lists = step
                .invocations(&env)
                .with_context(|| format!("cannot assemble {}", show.step.display()))?;
            for list in &lists {
                println!("{list}");
            }
        }
        Subcommand::Run(run) => {
            let env = Environment::new();
            let step = load_step(&run.step)?;
            let lists = step
                .invocations(&env)
                .with_context(|| format!("cannot assemble {}", run.step.display()))?;
            let code = ProcessRunner::new(env).run_all(&lists)?;
            if code != 0 {
                std::process::exit(code);
            }
        }
        Subcommand::Tokenize(Tokenize { line: Some(line) }) => print_tokens(&line),
        Subcommand::Tokenize(Tokenize { line: None }) => tokenize_repl()?,
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_tokens(line: &str) {
    for (i, token) in tokenize(Some(line)).iter().enumerate() {
        println!("[{i}] {token}");
    }
}

fn tokenize_repl() -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    loop {
        match rl.readline("options> ") {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                print_tokens(&line);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}
