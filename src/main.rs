use clap::{Parser as ClapParser, Subcommand};
use logix::cli::{self, CheckOptions, CheckResult, CliError};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "logix")]
#[command(about = "Logix - evaluate indentation-structured boolean rules against JSON context")]
#[command(version)]
struct Cli {
    /// Log evaluation steps to stderr (overrides LOGIX_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate rules against a JSON context; exits 0 when true, 1 when false
    Check {
        /// Rule file ('-' reads stdin)
        rules: String,

        /// JSON context file (reads stdin if neither context flag is given)
        #[arg(short, long)]
        context: Option<PathBuf>,

        /// Inline JSON context
        #[arg(long, conflicts_with = "context")]
        context_json: Option<String>,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,
    },

    /// Print the token stream of a rule file
    Tokens {
        /// Rule file ('-' reads stdin)
        rules: String,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("logix=debug")
    } else {
        EnvFilter::try_from_env("LOGIX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            rules,
            context,
            context_json,
            syntax_only,
        } => run_check(rules, context, context_json, syntax_only),
        Commands::Tokens { rules } => cli::load_rules(&rules).map(|text| {
            println!("{}", cli::format_tokens(&text));
            true
        }),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(2)
        }
    }
}

fn run_check(
    rules_path: String,
    context_path: Option<PathBuf>,
    context_json: Option<String>,
    syntax_only: bool,
) -> Result<bool, CliError> {
    let rules = cli::load_rules(&rules_path)?;

    let context = match (context_path, context_json) {
        (Some(path), _) => Some(cli::read_file(&path)?),
        (None, Some(json)) => Some(json),
        // stdin can only be read once
        (None, None) if rules_path != "-" && !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        (None, None) => None,
    };

    let options = CheckOptions {
        rules,
        context,
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid { statements } => {
            println!("Syntax is valid ({} statements)", statements);
            Ok(true)
        }
        CheckResult::Evaluated(result) => {
            println!("{}", result);
            Ok(result)
        }
    }
}
