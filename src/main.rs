//! thaiseg command line: segment Thai text given as arguments or on stdin.
use clap::{Parser, ValueEnum};
use env_logger::Builder;
use log::LevelFilter;
use std::{
    error::Error,
    io::{self, BufRead, Write},
    path::PathBuf,
    process,
};
use thaiseg::{Segmenter, Settings, TokenizeRequest, TokenizeResult};

/// Dictionary-driven Thai word segmentation
#[derive(Parser, Debug, Clone)]
#[command(name = "thaiseg")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
struct Args {
    /// Dictionary file, one word per line (overrides the settings file)
    #[arg(short, long, env = "THAISEG_DICTIONARY")]
    dict: Option<PathBuf>,

    /// Settings file (JSON)
    #[arg(short, long, env = "THAISEG_SETTINGS")]
    settings: Option<PathBuf>,

    /// Visible separator placed between tokens, before the word-break marker
    #[arg(long, default_value = "")]
    separator: String,

    /// Do not insert the word-break marker
    #[arg(long)]
    no_break: bool,

    /// Treat `<` and `>` as ordinary characters instead of markup tags
    #[arg(long)]
    no_markup: bool,

    /// Print the word count of each input to stderr
    #[arg(short, long)]
    count: bool,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    quiet: bool,

    /// Text to segment; stdin is read line by line when omitted
    text: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl Args {
    fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

fn main() {
    let args = Args::parse();

    let log_level = match args.verbosity() {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    Builder::new()
        .filter_level(log_level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(dict) = &args.dict {
        settings = settings.with_dictionary_path(dict);
    }
    let segmenter = Segmenter::builder()
        .settings(settings.with_load_on_start(true))
        .build()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.text.is_empty() {
        for line in io::stdin().lock().lines() {
            emit(&segmenter, &args, &line?, &mut out)?;
        }
    } else {
        for text in &args.text {
            emit(&segmenter, &args, text, &mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn emit(
    segmenter: &Segmenter,
    args: &Args,
    text: &str,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let request = TokenizeRequest::new(text)
        .separator(args.separator.as_str())
        .break_words(!args.no_break)
        .supports_markup(!args.no_markup);
    let result: TokenizeResult = segmenter.try_tokenize(&request)?;

    match args.format {
        OutputFormat::Text => writeln!(out, "{}", result.text)?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&result)?)?,
    }
    if args.count {
        eprintln!("{}", result.word_count);
    }
    Ok(())
}
