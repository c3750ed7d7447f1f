use clap::{Parser, Subcommand, ValueEnum};
use scoreboard_ocr::convert::{self, ImageIoError};
use scoreboard_ocr::core::{binarize, BinarizeParams};
use scoreboard_ocr::flags::{FlagCatalog, FlagCatalogError, FlagEntry, FlagMatcher, RgbBitmap};
use scoreboard_ocr::text::{
    CatalogError, GlyphCatalog, GlyphEntry, LineRecognizer, OverlayPainter, RunLengthBitmap,
};
use scoreboard_ocr::{
    read_flag, read_line, read_score, scan_screen, ConfigError, ConfigIoError, RecognizeError,
    RecognizerParams, ScanReport, ScreenConfig,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "scoreboard-ocr", version)]
#[command(about = "Read player names, flags and scores from game results screenshots")]
struct Cli {
    /// Log verbosity on stderr. `RUST_LOG` overrides it in tracing builds.
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    /// Emit logs as JSON lines (tracing builds only).
    #[cfg(feature = "tracing")]
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan a full results screenshot and print one record per row.
    Scan {
        image: PathBuf,
        /// Screen config JSON (catalog paths, rows, parameters).
        #[arg(long)]
        config: PathBuf,
        /// Also write the report here (overrides the config's output path).
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Read one pre-cropped line of text.
    Line {
        image: PathBuf,
        /// Glyph catalog JSON.
        #[arg(long)]
        catalog: PathBuf,
        /// Recognizer parameters JSON.
        #[arg(long)]
        params: Option<PathBuf>,
        /// Write a match overlay PNG here.
        #[arg(long)]
        overlay: Option<PathBuf>,
    },
    /// Read one pre-cropped score.
    Digits {
        image: PathBuf,
        #[arg(long)]
        params: Option<PathBuf>,
    },
    /// Identify one pre-cropped flag; prints an empty line when none matches.
    Flag {
        image: PathBuf,
        /// Flag catalog JSON.
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long)]
        params: Option<PathBuf>,
    },
    /// Print a glyph catalog entry for a reference crop.
    EncodeGlyph {
        image: PathBuf,
        #[arg(long)]
        label: String,
        /// Skip the glyph during line scanning.
        #[arg(long)]
        excluded: bool,
        #[arg(long)]
        params: Option<PathBuf>,
    },
    /// Print a flag catalog entry for a reference crop.
    EncodeFlag {
        image: PathBuf,
        #[arg(long)]
        code: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigIoError,
    },
    #[error(transparent)]
    Build(#[from] ConfigError),
    #[error("image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: ImageIoError,
    },
    #[error(transparent)]
    Glyphs(#[from] CatalogError),
    #[error(transparent)]
    Flags(#[from] FlagCatalogError),
    #[error(transparent)]
    Recognize(#[from] RecognizeError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn init_logging(cli: &Cli) {
    #[cfg(feature = "tracing")]
    {
        scoreboard_ocr::core::init_tracing(cli.log_level.into(), cli.log_json);
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = scoreboard_ocr::core::init_with_level(cli.log_level.into());
    }
}

fn load_image(path: &Path) -> Result<scoreboard_ocr::RgbaImage, CliError> {
    convert::load_rgba(path).map_err(|source| CliError::Image {
        path: path.to_path_buf(),
        source,
    })
}

fn load_params(path: Option<&Path>) -> Result<RecognizerParams, CliError> {
    let Some(path) = path else {
        return Ok(RecognizerParams::default());
    };
    let raw = std::fs::read_to_string(path).map_err(|e| CliError::Config {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    serde_json::from_str(&raw).map_err(|e| CliError::Config {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

fn base_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}

fn run_scan(image: &Path, config: &Path, output: Option<&Path>) -> Result<(), CliError> {
    let cfg = ScreenConfig::load_json(config).map_err(|source| CliError::Config {
        path: config.to_path_buf(),
        source,
    })?;
    let recognizer = cfg.build_recognizer(base_dir(config))?;
    let screen = load_image(image)?;
    let players = scan_screen(&recognizer, &screen, &cfg.layout)?;
    let report = ScanReport {
        image_path: Some(image.display().to_string()),
        players,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    let out = output
        .map(Path::to_path_buf)
        .or_else(|| cfg.output_path(base_dir(config)));
    if let Some(out) = out {
        report.write_json(&out).map_err(|source| CliError::Config {
            path: out.clone(),
            source,
        })?;
        log::info!("report written to {}", out.display());
    }
    Ok(())
}

fn run_line(
    image: &Path,
    catalog: &Path,
    params: Option<&Path>,
    overlay: Option<&Path>,
) -> Result<(), CliError> {
    let params = load_params(params)?;
    let lines = LineRecognizer::new(GlyphCatalog::load_json(catalog)?, params.line);
    let region = load_image(image)?;
    let result = match overlay {
        Some(path) => {
            let mut painter = OverlayPainter::new(&binarize(&region, &params.text));
            let result = read_line(&lines, &params.text, &region, &mut painter)
                .map_err(RecognizeError::from)?;
            convert::save_image(painter.image(), path).map_err(|source| CliError::Image {
                path: path.to_path_buf(),
                source,
            })?;
            result
        }
        None => read_line(&lines, &params.text, &region, &mut ()).map_err(RecognizeError::from)?,
    };
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

fn run_digits(image: &Path, params: Option<&Path>) -> Result<(), CliError> {
    let params = load_params(params)?;
    let region = load_image(image)?;
    let score = read_score(&params.digit_layout, &params.digits, &region)
        .map_err(RecognizeError::from)?;
    println!("{score}");
    Ok(())
}

fn run_flag(image: &Path, catalog: &Path, params: Option<&Path>) -> Result<(), CliError> {
    let params = load_params(params)?;
    let matcher = FlagMatcher::new(FlagCatalog::load_json(catalog)?, params.flag);
    let region = load_image(image)?;
    let code = read_flag(&matcher, &region).map_err(RecognizeError::from)?;
    println!("{code}");
    Ok(())
}

fn run_encode_glyph(
    image: &Path,
    label: String,
    excluded: bool,
    params: Option<&Path>,
) -> Result<(), CliError> {
    let text: BinarizeParams = load_params(params)?.text;
    let region = binarize(&load_image(image)?, &text);
    let entry = GlyphEntry {
        label,
        bitmap: RunLengthBitmap::from_image(&region),
        excluded,
    };
    println!("{}", serde_json::to_string(&entry)?);
    Ok(())
}

fn run_encode_flag(image: &Path, code: String) -> Result<(), CliError> {
    let region = load_image(image)?;
    let entry = FlagEntry {
        code,
        bitmap: RgbBitmap::from_image(&region),
    };
    println!("{}", serde_json::to_string(&entry)?);
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Scan {
            image,
            config,
            output,
        } => run_scan(&image, &config, output.as_deref()),
        Command::Line {
            image,
            catalog,
            params,
            overlay,
        } => run_line(&image, &catalog, params.as_deref(), overlay.as_deref()),
        Command::Digits { image, params } => run_digits(&image, params.as_deref()),
        Command::Flag {
            image,
            catalog,
            params,
        } => run_flag(&image, &catalog, params.as_deref()),
        Command::EncodeGlyph {
            image,
            label,
            excluded,
            params,
        } => run_encode_glyph(&image, label, excluded, params.as_deref()),
        Command::EncodeFlag { image, code } => run_encode_flag(&image, code),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = std::error::Error::source(&err);
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
