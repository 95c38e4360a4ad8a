//! CLI entry point for skeleton

use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skeleton::{
    Format, Language, ParserConfig, SkeletonError, SyntaxErrorPolicy, create_parser,
};

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

/// Determine whether to color status messages based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            // Status messages go to stderr
            std::io::stderr().is_terminal()
        }
    }
}

/// Behaviour when a source file does not parse
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OnSyntaxError {
    /// Stop and report the first unparseable file
    #[default]
    Abort,
    /// Leave unparseable files out and keep going
    Skip,
}

impl From<OnSyntaxError> for SyntaxErrorPolicy {
    fn from(value: OnSyntaxError) -> Self {
        match value {
            OnSyntaxError::Abort => SyntaxErrorPolicy::Abort,
            OnSyntaxError::Skip => SyntaxErrorPolicy::Skip,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "skeleton")]
#[command(about = "Generate a readable skeleton of your project")]
#[command(version)]
struct Args {
    /// Path to the project or file
    #[arg(short = 'p', long = "path")]
    path: PathBuf,

    /// Programming language
    #[arg(short = 'l', long = "language", default_value = "python")]
    language: String,

    /// Output format: markdown or json
    #[arg(short = 'o', long = "output-format", default_value = "markdown")]
    output_format: String,

    /// Output path (prints to stdout when omitted)
    #[arg(short = 'f', long = "output-file")]
    output_file: Option<PathBuf>,

    /// Extra folders to exclude, e.g. `-e build dist` (names or glob patterns)
    #[arg(short = 'e', long = "exclude-dir", num_args = 1..)]
    exclude_dir: Vec<String>,

    /// Use file paths relative to the project root
    #[arg(short = 'r', long = "relative-paths")]
    relative_paths: bool,

    /// Include class docstrings (function docstrings are always included)
    #[arg(short = 'd', long = "include-docstrings")]
    include_docstrings: bool,

    /// What to do with files that fail to parse
    #[arg(long = "on-syntax-error", value_name = "POLICY", default_value = "abort")]
    on_syntax_error: OnSyntaxError,

    /// Number of parallel workers for file parsing
    /// (0 = auto-detect, 1 = sequential, N = use N workers)
    #[arg(short = 'j', long = "jobs", default_value = "0")]
    jobs: usize,

    /// Control color of status messages: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Show debug logging
    #[arg(short = 'v', long = "verbose", conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

/// Colored status lines on stderr.
struct Console {
    stderr: StandardStream,
}

impl Console {
    fn new(use_color: bool) -> Self {
        let choice = if use_color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        Self {
            stderr: StandardStream::stderr(choice),
        }
    }

    fn success(&mut self, message: &str) {
        self.write(message, Color::Green);
    }

    fn notice(&mut self, message: &str) {
        self.write(message, Color::Yellow);
    }

    fn error(&mut self, message: &str) {
        self.write(message, Color::Red);
    }

    fn write(&mut self, message: &str, color: Color) {
        // Failing to print a status line is not worth failing the run
        let _ = self.stderr.set_color(ColorSpec::new().set_fg(Some(color)));
        let _ = writeln!(self.stderr, "{}", message);
        let _ = self.stderr.reset();
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    let mut console = Console::new(should_use_color(args.color));

    if let Err(e) = run(&args, &mut console) {
        match e {
            SkeletonError::UnsupportedLanguage(_) | SkeletonError::UnsupportedFormat(_) => {
                console.error(&format!("❌ {}", e));
            }
            _ => console.error(&format!("skeleton: {}", e)),
        }
        process::exit(1);
    }
}

fn run(args: &Args, console: &mut Console) -> Result<(), SkeletonError> {
    // Both variants are resolved before anything is read
    let language = Language::from_id(&args.language)?;
    let format = Format::from_id(&args.output_format)?;

    let config = ParserConfig {
        extra_ignore: args.exclude_dir.clone(),
        use_relative_paths: args.relative_paths,
        include_docstrings: args.include_docstrings,
        on_syntax_error: args.on_syntax_error.into(),
        jobs: args.jobs,
    };

    let parser = create_parser(language, config)?;
    let report = parser.scan(&args.path)?;

    if !report.ignored_dirs.is_empty() {
        let names: Vec<&str> = report.ignored_dirs.iter().map(String::as_str).collect();
        console.notice(&format!(
            "🔍 Ignored virtual environment directories: {}",
            names.join(", ")
        ));
    }
    for skipped in &report.skipped {
        console.notice(&format!("⚠️  Skipped {}", skipped.error));
    }

    let rendered = format.export(&report.project);

    match &args.output_file {
        Some(output_path) => {
            std::fs::write(output_path, &rendered)
                .map_err(|e| SkeletonError::io(output_path, e))?;
            console.success(&format!(
                "✅ Skeleton generated in '{}'",
                output_path.display()
            ));
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
