use clap::{ArgAction, Parser, Subcommand};
use readme_tree::builder::TreeBuilder;
use readme_tree::config::{self, DEFAULT_CONFIG_FILE};
use readme_tree::output;
use readme_tree::writer::{DiskWriter, MemoryWriter};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "readme-tree")]
#[command(about = "Generate a numbered tree of README.md files from a structure file")]
#[command(long_about = "\
Generate a numbered tree of README.md files from a structure file

Every node in the structure file becomes a directory holding a README.md.
Siblings are numbered by declaration order (00_, 10_, 20_, ...), parents list
their children, and children can link back to their parent.

Structure file (YAML, JSON or TOML):

  main_title: Rule Book
  structure:
    intro:                         # -> 00_intro/README.md
      readme: \"Welcome!\\n{img:cover.png}\"
    rules:                         # -> 10_rules/README.md
      go_back: true
      contents:
        setup:                     # -> 10_rules/00_setup/README.md
        turns:                     # -> 10_rules/10_turns/README.md

Placeholders:
  {img:<file>}   becomes image markup pointing at image_base_url
  {other:<id>}   is kept as written
  \\n             becomes a line break

Run 'readme-tree gen-config' to print a documented structure file.")]
#[command(version)]
struct Cli {
    /// Structure file (.yaml, .yml, .json or .toml)
    #[arg(long, short, default_value = DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Directory that receives the root README.md and the generated tree
    #[arg(long, short, default_value = ".", global = true)]
    output: PathBuf,

    /// Worker threads for sibling subtrees (1 = sequential, 0 = all cores)
    #[arg(long, short, default_value_t = 1, global = true)]
    jobs: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the README tree and the root index
    Generate,
    /// Validate the structure file and show the tree without writing
    Check,
    /// Print a stock structure file with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Command::Generate => {
            let structure = config::load_config(&cli.config)?;
            let parallel = init_thread_pool(cli.jobs);
            println!(
                "==> Generating {} from {}",
                cli.output.display(),
                cli.config.display()
            );
            let report = TreeBuilder::new(&cli.output, &structure)
                .parallel(parallel)
                .generate(&DiskWriter)?;
            output::print_generate_output(&report);
        }
        Command::Check => {
            println!("==> Checking {}", cli.config.display());
            let structure = config::load_config(&cli.config)?;
            let writer = MemoryWriter::new();
            let report = TreeBuilder::new(&cli.output, &structure).generate(&writer)?;
            output::print_check_output(&report);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_yaml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool from `--jobs`.
///
/// Returns whether sibling subtrees should be generated in parallel. Caps at
/// the number of available CPU cores.
fn init_thread_pool(jobs: usize) -> bool {
    let threads = config::effective_jobs(jobs);
    if threads <= 1 {
        return false;
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
    true
}

fn setup_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    // RUST_LOG, when set, takes precedence over -v.
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_env_filter(filter)
        .init();
}
