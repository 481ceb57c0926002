use clap::{CommandFactory, Parser, Subcommand, error::ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use storyblok_hugo::config::{self, DEFAULT_CONFIG_FILE, SyncConfig};
use storyblok_hugo::output::{self, SyncPrinter};
use storyblok_hugo::source::{HttpTransport, Mode};
use storyblok_hugo::sync::{self, SyncError, SyncEvent};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "storyblok-hugo")]
#[command(about = "Export Storyblok stories as Hugo markdown files")]
#[command(long_about = "\
Export Storyblok stories as Hugo markdown files

Fetches every story from the Storyblok CDN and writes one <slug>.md file per
story into --dir, each starting with a YAML frontmatter block:

  ---
  title: \"Hi\"
  slug: \"hello-world\"
  date: 2023-01-02T03:04:00Z
  description: \"d\"
  keywords: [\"k1\"]
  tags: [\"t1\",\"t2\"]
  draft: false
  toc: true
  ---
  Body text.

Set DEV=1 to read stories.json from the working directory instead of the API.
Run 'storyblok-hugo gen-config' to print a documented config file.")]
#[command(version)]
#[command(subcommand_negates_reqs = true)]
struct Cli {
    /// Storyblok API token (required unless offline)
    #[arg(long, env = "STORYBLOK_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Hugo content directory to write into; must already exist
    #[arg(long, required = true)]
    dir: Option<PathBuf>,

    /// Config file (missing file = stock defaults)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Log debug detail to stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch and decode stories, list them, write nothing
    Check,
    /// Print a stock config file with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), SyncError> {
    match cli.command {
        Some(Command::GenConfig) => {
            print!("{}", config::stock_config_toml());
        }
        Some(Command::Check) => {
            let config = config::load_config(&cli.config)?;
            let mode = Mode::from_env(&config.source.offline_var);
            let records =
                sync::fetch_records(&config, mode, cli.token.as_deref(), &HttpTransport::new())?;
            output::print_check_output(&records);
        }
        None => {
            let Some(dir) = cli.dir.as_deref() else {
                Cli::command()
                    .error(ErrorKind::MissingRequiredArgument, "--dir <DIR> is required")
                    .exit();
            };
            let config = config::load_config(&cli.config)?;
            run_sync(&config, cli.token.as_deref(), dir)?;
        }
    }
    Ok(())
}

fn run_sync(config: &SyncConfig, token: Option<&str>, dir: &Path) -> Result<(), SyncError> {
    let mode = Mode::from_env(&config.source.offline_var);
    let mut printer = SyncPrinter::default();
    sync::sync(
        config,
        mode,
        token,
        dir,
        &HttpTransport::new(),
        &mut |event: SyncEvent<'_>| printer.print(&event),
    )?;
    println!("{}", output::format_success());
    Ok(())
}

/// Initialise tracing on stderr.
///
/// `RUST_LOG` wins when set; otherwise `--quiet` → warn, `--verbose` → debug,
/// default info.
fn init_logging(verbose: bool, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if quiet {
        EnvFilter::new("warn")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
