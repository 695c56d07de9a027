use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use werval::config::WervalConfig;
use werval::{
    evaluate_batch, load_samples, load_samples_as, render_alignment, BatchReport, DatasetFormat,
    EvalConfig, PreprocessOptions,
};

#[derive(Clone, Debug, ValueEnum)]
enum FormatArg {
    Csv,
    Tsv,
    Json,
}

impl From<FormatArg> for DatasetFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => DatasetFormat::Delimited { delimiter: ',' },
            FormatArg::Tsv => DatasetFormat::Delimited { delimiter: '\t' },
            FormatArg::Json => DatasetFormat::Json,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Dataset file with reference/prediction pairs (csv, tsv, or json).
    dataset: PathBuf,

    /// Dataset format override (default: inferred from the extension).
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Optional YAML configuration file; CLI flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep original casing (disable lowercase folding).
    #[arg(long)]
    keep_case: bool,

    /// Keep punctuation (disable punctuation removal).
    #[arg(long)]
    keep_punctuation: bool,

    /// Keep whitespace as-is (disable collapsing).
    #[arg(long)]
    keep_extra_spaces: bool,

    /// Override the per-side token limit for alignment.
    #[arg(long)]
    max_tokens: Option<usize>,

    /// Score samples on the rayon thread pool.
    #[arg(long)]
    parallel: bool,

    /// Print the three-line REF/HYP/OPS alignment for every sample.
    #[arg(long)]
    show_alignment: bool,

    /// Emit the full batch report as JSON instead of the text summary.
    #[arg(long)]
    json: bool,

    /// Exit non-zero when the aggregate WER exceeds this threshold.
    #[arg(long)]
    wer_threshold: Option<f64>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode, Box<dyn Error>> {
    let cfg = build_config(args)?;

    let samples = match &args.format {
        Some(format) => load_samples_as(&args.dataset, format.clone().into())?,
        None => load_samples(&args.dataset)?,
    };
    let batch = evaluate_batch(&samples, &cfg)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&batch)?);
    } else {
        print_summary(&batch, args.show_alignment);
    }

    if let Some(threshold) = args.wer_threshold {
        let wer = batch.totals.wer();
        if wer > threshold {
            eprintln!(
                "aggregate WER {:.2}% exceeds threshold {:.2}%",
                wer * 100.0,
                threshold * 100.0
            );
            return Ok(ExitCode::FAILURE);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn build_config(args: &Args) -> Result<EvalConfig, Box<dyn Error>> {
    // Interactive runs default to fully normalized scoring; a config file
    // replaces those defaults, and explicit flags win over both.
    let mut cfg = match &args.config {
        Some(path) => WervalConfig::from_file(path)?.to_eval_config(),
        None => EvalConfig {
            preprocess: PreprocessOptions::all(),
            ..Default::default()
        },
    };

    if args.keep_case {
        cfg.preprocess.lowercase = false;
    }
    if args.keep_punctuation {
        cfg.preprocess.remove_punctuation = false;
    }
    if args.keep_extra_spaces {
        cfg.preprocess.remove_extra_spaces = false;
    }
    if let Some(max_tokens) = args.max_tokens {
        cfg.align.max_tokens = max_tokens;
    }
    if args.parallel {
        cfg.use_parallel = true;
    }
    Ok(cfg)
}

fn print_summary(batch: &BatchReport, show_alignment: bool) {
    for (index, report) in batch.reports.iter().enumerate() {
        println!(
            "sample {index}: wer {:6.2}%  (S:{} I:{} D:{} / {} words)",
            report.wer * 100.0,
            report.substitutions,
            report.insertions,
            report.deletions,
            report.total_words
        );
        if show_alignment {
            println!("{}", render_alignment(&report.alignment));
        }
    }

    let totals = &batch.totals;
    println!(
        "overall: wer {:6.2}%  accuracy {:6.2}%  (S:{} I:{} D:{} / {} words, {} samples)",
        totals.wer() * 100.0,
        totals.accuracy() * 100.0,
        totals.substitutions,
        totals.insertions,
        totals.deletions,
        totals.total_words,
        totals.samples
    );
}
