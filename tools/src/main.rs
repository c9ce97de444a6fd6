use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codec::{PackedModel, Preset, Settings, Transport};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;
use watchkit_tools::{
    decode_model, decode_state, encode_model, format_layout, format_model_pretty,
    out_of_range_colors, ModelReport, StringForm,
};

#[derive(Parser)]
#[command(
    name = "watchkit",
    version,
    about = "watch-face state string inspection tools"
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a preset string and print its fields.
    Decode {
        /// Preset string in display form (or fast form with --fast).
        string: String,
        /// Treat the input as an untransformed hex string.
        #[arg(long)]
        fast: bool,
        /// Decode a settings string instead of a preset.
        #[arg(long)]
        settings: bool,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
    /// Encode a preset read from JSON.
    Encode {
        /// Path to the preset JSON.
        json_file: PathBuf,
    },
    /// Decode a combined `preset~settings` string.
    State {
        string: String,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
    /// Print the current bit layout.
    Layout {
        /// Describe the settings layout instead of the preset layout.
        #[arg(long)]
        settings: bool,
    },
    /// Print random presets.
    Random {
        /// Seed for reproducible output.
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Number of presets to print.
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;
    let transport = Transport::default();

    match cli.command {
        Command::Decode {
            string,
            fast,
            settings,
            format,
        } => {
            let form = if fast {
                StringForm::Fast
            } else {
                StringForm::Display
            };
            if settings {
                let report: ModelReport<Settings> =
                    decode_model(&string, form, &transport).context("decode settings")?;
                print_report("settings", &report, format)?;
            } else {
                let report: ModelReport<Preset> =
                    decode_model(&string, form, &transport).context("decode preset")?;
                print_report("preset", &report, format)?;
            }
        }
        Command::Encode { json_file } => {
            let contents = fs::read_to_string(&json_file)
                .with_context(|| format!("read preset {}", json_file.display()))?;
            let preset: Preset =
                serde_json::from_str(&contents).context("parse preset json")?;
            let wide = out_of_range_colors(&preset);
            if !wide.is_empty() {
                let listed: Vec<String> =
                    wide.iter().map(|(name, value)| format!("{name}={value}")).collect();
                bail!("colours must be below 64: {}", listed.join(", "));
            }
            let report = encode_model(preset, &transport);
            println!("display: {}", report.display);
            println!("fast: {}", report.fast);
            println!("hash: {}", report.hash);
        }
        Command::State { string, format } => {
            let report = decode_state(&string, &transport).context("decode state")?;
            match format {
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&report).context("serialize json")?;
                    println!("{json}");
                }
                OutputFormat::Pretty => {
                    print!("{}", format_model_pretty("preset", &report.preset));
                    print!("{}", format_model_pretty("settings", &report.settings));
                }
            }
        }
        Command::Layout { settings } => {
            let layout = if settings {
                Settings::default().layout()
            } else {
                Preset::default().layout()
            };
            print!("{}", format_layout(&layout));
        }
        Command::Random { seed, count } => {
            debug!(seed, count, "generating random presets");
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for _ in 0..count {
                let preset = Preset::random(&mut rng);
                println!("{}", preset.to_display_string(&transport));
            }
        }
    }
    Ok(())
}

fn print_report<T>(label: &str, report: &ModelReport<T>, format: OutputFormat) -> Result<()>
where
    T: PackedModel + serde::Serialize,
{
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report).context("serialize json")?;
            println!("{json}");
        }
        OutputFormat::Pretty => print!("{}", format_model_pretty(label, report)),
    }
    Ok(())
}

fn init_logging(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("install tracing subscriber")?;
    Ok(())
}
