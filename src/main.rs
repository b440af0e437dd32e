//! CLI entry point for fileinfo

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use fileinfo::{
    BuilderConfig, DEFAULT_MAX_DEPTH, FailurePolicy, OutputConfig, TreeBuilder, TreePrinter,
    print_json,
};
use tracing_subscriber::{EnvFilter, fmt};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "fileinfo")]
#[command(about = "List files, directories and other entries under a path")]
#[command(version)]
struct Args {
    /// Paths to list
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Descend only N levels deep
    #[arg(short = 'L', long = "level")]
    level: Option<usize>,

    /// Skip names matching pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore")]
    ignore: Vec<String>,

    /// Do not follow symlinks; list them as other entries
    #[arg(short = 'P', long = "no-follow")]
    no_follow: bool,

    /// Keep the readable entries of a directory when some of them fail
    #[arg(short = 'k', long = "keep-partial")]
    keep_partial: bool,

    /// Do not mark unreadable, incomplete or depth-limited directories
    #[arg(long = "no-status")]
    no_status: bool,

    /// Output in JSON format
    #[arg(long = "json")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Increase log output (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let builder_config = BuilderConfig {
        follow_symlinks: !args.no_follow,
        max_depth: Some(args.level.unwrap_or(DEFAULT_MAX_DEPTH)),
        failure_policy: if args.keep_partial {
            FailurePolicy::KeepPartial
        } else {
            FailurePolicy::Discard
        },
        ignore_patterns: args.ignore.clone(),
    };
    let builder = TreeBuilder::new(builder_config);

    let printer = TreePrinter::new(OutputConfig {
        use_color: !args.json && should_use_color(args.color),
        show_status: !args.no_status,
        ..Default::default()
    });

    let mut failed = false;
    for path in &args.paths {
        let tree = match builder.build(path) {
            Ok(tree) => tree,
            Err(e) => {
                eprintln!("fileinfo: {}", e);
                failed = true;
                continue;
            }
        };
        tracing::info!(path = %path.display(), entries = tree.count(), "built tree");

        let result = if args.json {
            print_json(&tree)
        } else {
            printer.print(&tree)
        };
        tree.release();

        if let Err(e) = result {
            eprintln!("fileinfo: error writing output: {}", e);
            process::exit(1);
        }
    }

    if failed {
        process::exit(1);
    }
}
