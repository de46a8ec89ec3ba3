/// BSON command-line tool: inspect, validate, extract ids, encode, and
/// analyse files of back-to-back BSON documents.
///
/// # Command overview
///
/// ```text
/// bson <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print every document in a file
///   validate   Check a file for structural correctness
///   id         Print each document's _id using the raw fast path
///   encode     Create a BSON file from extended JSON
///   stats      Print size and element-type statistics
///   help       Print help information
///
/// Global options:
///   -v, --verbose            Log decoder activity to stderr
///   --max-depth <N>          Nesting limit for embedded documents [default: 100]
///   --inverted-booleans      Read and write booleans with 0 = true, 1 = false
///   -h, --help               Print help
///   -V, --version            Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                 |
/// |------|-----------------------------------------|
/// | 0    | Success                                 |
/// | 1    | Error (I/O failure, invalid file, etc.) |
///
/// Errors and logs go to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use bson_decoder::{BsonDecoder, DecoderOptions};
use bson_decoder::config::DEFAULT_MAX_DEPTH;
use bson_encoder::{BsonEncoder, EncoderOptions};
use bson_wire::BooleanEncoding;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd_encode;
mod cmd_id;
mod cmd_inspect;
mod cmd_stats;
mod cmd_validate;
mod ext_json;
mod input;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Inspect and produce BSON document files.
#[derive(Parser)]
#[command(name = "bson", version, about = "BSON document tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,
}

/// Options shared by every sub-command.
#[derive(clap::Args)]
pub struct GlobalArgs {
    /// Log decoder activity (debug level) to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Reject documents nested deeper than this.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Use the legacy boolean mapping (0x00 = true, 0x01 = false).
    #[arg(long, global = true)]
    pub inverted_booleans: bool,
}

impl GlobalArgs {
    fn boolean_encoding(&self) -> BooleanEncoding {
        if self.inverted_booleans {
            BooleanEncoding::Inverted
        } else {
            BooleanEncoding::Standard
        }
    }

    /// Decoder configured from the global flags.
    #[must_use]
    pub fn decoder(&self) -> BsonDecoder {
        BsonDecoder::new(
            DecoderOptions::default()
                .with_max_depth(self.max_depth)
                .with_boolean_encoding(self.boolean_encoding()),
        )
    }

    /// Encoder configured from the global flags.
    #[must_use]
    pub fn encoder(&self) -> BsonEncoder {
        BsonEncoder::with_options(
            EncoderOptions::default().with_boolean_encoding(self.boolean_encoding()),
        )
    }
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print every document in a BSON file.
    Inspect(InspectArgs),
    /// Check a BSON file for structural correctness.
    Validate(ValidateArgs),
    /// Print each document's `_id` without decoding the rest.
    Id(IdArgs),
    /// Create a BSON file from extended JSON.
    Encode(EncodeArgs),
    /// Print size and element-type statistics.
    Stats(StatsArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `bson inspect`.
///
/// ```text
/// ┌──────────┬───────────────────────────────────────────────────────┐
/// │ Flag     │ Effect                                                │
/// ├──────────┼───────────────────────────────────────────────────────┤
/// │ --json   │ Print extended JSON instead of shell-style text       │
/// │ --doc N  │ Show only the document at index N                     │
/// └──────────┴───────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the BSON file to inspect.
    pub file: PathBuf,

    /// Print each document as pretty extended JSON.
    #[arg(long)]
    pub json: bool,

    /// Inspect only the document at this zero-based index.
    #[arg(long)]
    pub doc: Option<usize>,
}

/// Arguments for `bson validate`.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the BSON file to validate.
    pub file: PathBuf,
}

/// Arguments for `bson id`.
///
/// Streams the file and scans each document only as far as its `_id`.
#[derive(clap::Args)]
pub struct IdArgs {
    /// Path to the BSON file.
    pub file: PathBuf,
}

/// Arguments for `bson encode`.
///
/// The input is a JSON object (one document) or an array of objects
/// (one document each), in the extended JSON described in `ext_json`.
#[derive(clap::Args)]
pub struct EncodeArgs {
    /// Path to the JSON input.
    pub input: PathBuf,

    /// Output BSON file path.
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for `bson stats`.
#[derive(clap::Args)]
pub struct StatsArgs {
    /// Path to the BSON file to analyse.
    pub file: PathBuf,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args, &cli.global),
        Commands::Validate(args) => cmd_validate::run(&args, &cli.global),
        Commands::Id(args) => cmd_id::run(&args, &cli.global),
        Commands::Encode(args) => cmd_encode::run(&args, &cli.global),
        Commands::Stats(args) => cmd_stats::run(&args, &cli.global),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
