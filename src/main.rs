use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eltek_doctor::plugin::SourceRole;
use eltek_doctor::{report, ChannelSource, DataSource, Doctor, DoctorConfig, FileSource, State};

#[derive(Parser, Debug)]
#[command(name = "eltek-doctor")]
#[command(about = "Evaluate SNMP polls of Eltek power systems as monitoring checks")]
struct Args {
    /// Path to the poll snapshot (JSON: section -> string table)
    #[arg(short, long, default_value = "poll.json")]
    file: PathBuf,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep running and re-evaluate whenever the poll file changes
    #[arg(short, long, conflicts_with_all = ["export", "list_oids"])]
    watch: bool,

    /// Read poll snapshots as JSON lines from stdin instead of a file
    #[arg(long, requires = "watch")]
    stdin: bool,

    /// Refresh interval in seconds (only used with --watch)
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Rectifier temperature warning level (°C)
    #[arg(long)]
    rectifier_warn: Option<f64>,

    /// Rectifier temperature critical level (°C)
    #[arg(long)]
    rectifier_crit: Option<f64>,

    /// Battery temperature warning level (°C)
    #[arg(long)]
    battery_warn: Option<f64>,

    /// Battery temperature critical level (°C)
    #[arg(long)]
    battery_crit: Option<f64>,

    /// Export the evaluated poll to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Print the SNMP fetch declaration of every variant and exit
    #[arg(long)]
    list_oids: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays parseable by the host
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if args.list_oids {
        println!("{}", report::render_oids());
        return Ok(());
    }

    let config = load_config(&args)?;

    if let Some(export_path) = &args.export {
        return export_to_file(&args.file, export_path, &config);
    }

    if args.stdin {
        let stdin = std::io::BufReader::new(std::io::stdin());
        let source = ChannelSource::spawn_reader(stdin, "stdin");
        return run_watch(Box::new(source), &config, Duration::from_millis(100));
    }

    if args.watch {
        let refresh = Duration::from_secs(config.refresh);
        return run_watch(Box::new(FileSource::new(&args.file)), &config, refresh);
    }

    let state = run_once(&args.file, &config)?;
    std::process::exit(state.exit_code());
}

/// Merge file, environment and command line settings.
fn load_config(args: &Args) -> Result<DoctorConfig> {
    let mut config = DoctorConfig::load(args.config.as_deref())?;
    config.override_levels(SourceRole::Rectifier, args.rectifier_warn, args.rectifier_crit);
    config.override_levels(SourceRole::Battery, args.battery_warn, args.battery_crit);
    if let Some(refresh) = args.refresh {
        config.refresh = refresh;
    }
    config.validate()?;
    info!(?config, "configuration ready");
    Ok(config)
}

/// Evaluate the poll file once and print one line per service.
fn run_once(path: &Path, config: &DoctorConfig) -> Result<State> {
    let mut doctor = Doctor::new(Box::new(FileSource::new(path)), config.temperature);
    doctor.reload_data()?;

    match &doctor.report {
        Some(report) if report.services().next().is_some() => {
            println!("{}", report::render_text(report));
        }
        Some(_) => println!("UNKNOWN - eltek-doctor - No data"),
        None => {
            let reason = doctor.load_error.as_deref().unwrap_or("No data");
            println!("UNKNOWN - eltek-doctor - {}", reason);
        }
    }
    Ok(doctor.state())
}

/// Re-evaluate on every new snapshot until interrupted or the input ends.
fn run_watch(source: Box<dyn DataSource>, config: &DoctorConfig, refresh: Duration) -> Result<()> {
    let mut doctor = Doctor::new(source, config.temperature);
    info!(source = doctor.source_description(), ?refresh, "watching");

    let mut last_error: Option<String> = None;
    loop {
        if doctor.reload_data()? {
            if let Some(report) = &doctor.report {
                println!("{}\n", report::render_text(report));
            }
        }
        if doctor.load_error != last_error {
            if let Some(err) = &doctor.load_error {
                warn!(error = %err, "poll input unreadable");
            }
            last_error = doctor.load_error.clone();
        }
        if doctor.is_exhausted() {
            info!("input closed");
            return Ok(());
        }
        std::thread::sleep(refresh);
    }
}

/// Export the evaluated poll to a JSON file.
fn export_to_file(poll_path: &Path, export_path: &Path, config: &DoctorConfig) -> Result<()> {
    let mut doctor = Doctor::new(Box::new(FileSource::new(poll_path)), config.temperature);
    doctor.reload_data()?;

    let report = match &doctor.report {
        Some(report) => report,
        None => anyhow::bail!(
            "{}",
            doctor.load_error.as_deref().unwrap_or("no poll data available")
        ),
    };

    let json = serde_json::to_string_pretty(&report::export_json(report))?;
    std::fs::write(export_path, json)
        .with_context(|| format!("writing {}", export_path.display()))?;

    info!(path = %export_path.display(), "export written");
    println!("Exported poll report to: {}", export_path.display());
    Ok(())
}
