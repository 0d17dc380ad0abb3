//! Crackbox CLI - classical cipher toolkit
//!
//! Encode and decode with fourteen classical ciphers, brute-force a
//! ciphertext, inspect letter statistics, or generate a random key.

use clap::{Args, Parser, Subcommand};
use std::fmt::Write as _;
use std::io;
use std::path::PathBuf;
use std::process;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crackbox::analysis::{TextStats, rank_key_lengths};
use crackbox::key_source::{ConstantKeyReader, KeyReader, ReaderKeyReader};
use crackbox::{
    CandidateResult, CipherKey, CipherType, CrackEngine, CrackJob, CrackTarget, CrackboxError,
    EngineConfig, ProductOptions, Result, file_ops, leading,
};

#[derive(Parser)]
#[command(name = "crackbox")]
#[command(version)]
#[command(about = "Classical cipher toolkit.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode text with a cipher and key
    #[command(alias = "e")]
    Encode(TransformArgs),

    /// Decode text with a cipher and key
    #[command(alias = "d")]
    Decode(TransformArgs),

    /// Recover plaintext by searching the cipher's key space
    #[command(alias = "c")]
    Crack {
        /// Cipher to attack (also accepts rsa, des, aes, merkle)
        #[arg(long, value_name = "CIPHER")]
        cipher: CrackTarget,

        #[command(flatten)]
        legs: LegArgs,

        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        search: SearchArgs,

        /// Path to write the ranking to instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print letter frequencies, Index of Coincidence and likely key lengths
    #[command(alias = "a")]
    Analyze {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print a random valid key
    #[command(alias = "k")]
    Keygen {
        #[arg(long, value_name = "CIPHER")]
        cipher: CipherType,

        #[command(flatten)]
        legs: LegArgs,

        /// Letter count of the message (sets the one-time pad length)
        #[arg(long, value_name = "N", default_value_t = 26)]
        length: usize,
    },
}

#[derive(Args)]
struct TransformArgs {
    #[arg(long, value_name = "CIPHER")]
    cipher: CipherType,

    /// Key text, e.g. 3, 5,8, LEMON, 3,3,2,5, ZEBRA,LEMON or SUB;TRANS
    #[arg(long, value_name = "KEY", required_unless_present = "key_stdin")]
    key: Option<String>,

    /// Read the key from stdin instead
    #[arg(long, conflicts_with = "key")]
    key_stdin: bool,

    #[command(flatten)]
    legs: LegArgs,

    #[command(flatten)]
    source: SourceArgs,

    /// Path to write the result to instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct LegArgs {
    /// Substitution leg of a product cipher
    #[arg(long = "sub", value_name = "CIPHER")]
    sub_type: Option<CipherType>,

    /// Transposition leg of a product cipher
    #[arg(long = "trans", value_name = "CIPHER")]
    trans_type: Option<CipherType>,
}

impl LegArgs {
    fn options(&self) -> ProductOptions {
        ProductOptions {
            sub_type: self.sub_type,
            trans_type: self.trans_type,
        }
    }
}

#[derive(Args)]
struct SearchArgs {
    /// Number of ranked candidates to keep
    #[arg(long, value_name = "N", default_value_t = 50)]
    max_results: usize,

    /// Number of leading candidates to mark
    #[arg(long, value_name = "N", default_value_t = 5)]
    top: usize,

    /// Longest Vigenère key length to consider
    #[arg(long, value_name = "N", default_value_t = 15)]
    max_key_len: usize,

    /// Number of Hill matrices to try
    #[arg(long, value_name = "N", default_value_t = 100)]
    hill_candidates: usize,
}

impl SearchArgs {
    fn config(&self) -> EngineConfig {
        EngineConfig::default()
            .with_max_results(self.max_results)
            .with_leading_candidates(self.top)
            .with_vigenere_max_key_len(self.max_key_len)
            .with_hill_max_candidates(self.hill_candidates)
    }
}

#[derive(Args)]
struct SourceArgs {
    /// Path to the file holding the input text
    #[arg(short, long, value_name = "FILE", required_unless_present = "text")]
    input: Option<PathBuf>,

    /// Input text given inline
    #[arg(long, value_name = "TEXT", conflicts_with = "input")]
    text: Option<String>,
}

impl SourceArgs {
    fn read(&self) -> Result<String> {
        match (&self.input, &self.text) {
            (_, Some(text)) => Ok(text.clone()),
            (Some(path), None) => file_ops::read_text(path),
            (None, None) => Err(CrackboxError::invalid_input("no input text given")),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crackbox=warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Encode(args) => transform(&args, |key, text| key.encode(text)),
        Commands::Decode(args) => transform(&args, |key, text| key.decode(text)),
        Commands::Crack {
            cipher,
            legs,
            source,
            search,
            output,
        } => crack(cipher, legs.options(), &source, search.config(), output),
        Commands::Analyze { source } => analyze(&source),
        Commands::Keygen {
            cipher,
            legs,
            length,
        } => keygen(cipher, legs.options(), length),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn key_reader(args: &TransformArgs) -> Box<dyn KeyReader> {
    match &args.key {
        Some(key) if !args.key_stdin => Box::new(ConstantKeyReader::new(key.as_str())),
        _ => Box::new(ReaderKeyReader::new(Box::new(io::stdin()))),
    }
}

fn transform(
    args: &TransformArgs,
    apply: impl Fn(&CipherKey, &str) -> Result<String>,
) -> Result<()> {
    let text = args.source.read()?;
    let key_text = key_reader(args).read_key()?;
    let key = CipherKey::parse(args.cipher, &key_text, &args.legs.options())?;
    let result = apply(&key, &text)?;
    emit(args.output.as_ref(), &result)
}

fn crack(
    target: CrackTarget,
    options: ProductOptions,
    source: &SourceArgs,
    config: EngineConfig,
    output: Option<PathBuf>,
) -> Result<()> {
    let ciphertext = source.read()?;
    let mut engine = CrackEngine::new(config);
    engine.submit(CrackJob::new(target, ciphertext).with_options(options))?;
    let results = engine.wait(|status| info!(status, "progress"))?;
    emit(output.as_ref(), &render_ranking(&results, engine.config().leading_candidates))
}

/// One line per candidate; the leading ones are starred.
fn render_ranking(results: &[CandidateResult], top: usize) -> String {
    let marked = leading(results, top).len();
    let mut out = String::new();
    for (i, result) in results.iter().enumerate() {
        let mark = if i < marked { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{}{:>3} {:>3}%  {:<24} {}",
            mark,
            i + 1,
            result.confidence,
            result.key_display,
            result.plaintext
        );
    }
    out
}

fn analyze(source: &SourceArgs) -> Result<()> {
    let text = source.read()?;
    let stats = TextStats::of(&text);
    let mut report = stats.to_string();
    report.push_str("likely key lengths:\n");
    for estimate in rank_key_lengths(&text, EngineConfig::default().vigenere_max_key_len)
        .into_iter()
        .take(5)
    {
        let _ = writeln!(
            report,
            "{:>3}  average IC {:.4}",
            estimate.length, estimate.average_ic
        );
    }
    emit(None, &report)
}

fn keygen(cipher: CipherType, options: ProductOptions, length: usize) -> Result<()> {
    let key = CipherKey::random(cipher, &options, length, &mut rand::thread_rng())?;
    emit(None, &key.to_key_text())
}

fn emit(output: Option<&PathBuf>, text: &str) -> Result<()> {
    let mut text = text.to_string();
    if !text.ends_with('\n') {
        text.push('\n');
    }
    match output {
        Some(path) => file_ops::write_text(path, &text)
            .map_err(|e| e.with_context(format!("failed to write to {}", path.display()))),
        None => {
            print!("{}", text);
            Ok(())
        }
    }
}
