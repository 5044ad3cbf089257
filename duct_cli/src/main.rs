//! # Ductwise CLI Application
//!
//! Terminal front end for the duct sizing engine. Values on the command line
//! are read in the selected unit system, canonicalized, run through the
//! pipeline, and printed back in the same system.
//!
//! ```text
//! duct_cli --airflow 1000 --mode velocity --velocity 1200 --side 12
//! duct_cli --units si --airflow 470 --friction 0.8 --json
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use duct_core::advisory::{AdvisoryKind, AdvisorySnapshot};
use duct_core::report::SizingReport;
use duct_core::{
    compute_sizing_with, load_settings, to_canonical, CalcError, CalcResult, Quantity,
    SizingInput, SizingMode, SizingSettings, UnitSystem,
};

#[derive(Debug, Parser)]
#[command(name = "duct_cli", version, about = "Size round and rectangular HVAC ducts")]
struct Cli {
    /// Settings file (JSON) providing defaults
    #[arg(long, env = "DUCTWISE_CONFIG")]
    config: Option<PathBuf>,

    /// Unit system for inputs and output: ip or si
    #[arg(long, value_parser = parse_units)]
    units: Option<UnitSystem>,

    /// Design driver: friction or velocity
    #[arg(long, value_parser = parse_mode)]
    mode: Option<SizingMode>,

    /// Airflow (CFM or L/s); prompted for when omitted
    #[arg(long)]
    airflow: Option<f64>,

    /// Friction target (in.wg/100ft or Pa/m)
    #[arg(long)]
    friction: Option<f64>,

    /// Velocity target (FPM or m/s)
    #[arg(long)]
    velocity: Option<f64>,

    /// Fixed rectangular side (in or mm)
    #[arg(long)]
    side: Option<f64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Also print an advisory prompt: review or install
    #[arg(long, value_parser = parse_advisory)]
    advisory: Option<AdvisoryKind>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn parse_units(s: &str) -> Result<UnitSystem, String> {
    s.parse().map_err(|e: CalcError| e.to_string())
}

fn parse_mode(s: &str) -> Result<SizingMode, String> {
    s.parse().map_err(|e: CalcError| e.to_string())
}

fn parse_advisory(s: &str) -> Result<AdvisoryKind, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "review" => Ok(AdvisoryKind::DesignReview),
        "install" | "installation" => Ok(AdvisoryKind::InstallationGuide),
        other => Err(format!("unknown advisory kind '{}', expected 'review' or 'install'", other)),
    }
}

fn init_logging(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

/// Merge settings with command line overrides.
fn effective_settings(cli: &Cli) -> CalcResult<SizingSettings> {
    let mut settings = match &cli.config {
        Some(path) => load_settings(path)?,
        None => SizingSettings::default(),
    };

    if let Some(units) = cli.units {
        settings.unit_system = units;
    }
    if let Some(mode) = cli.mode {
        settings.mode = mode;
    }

    let system = settings.unit_system;
    if let Some(friction) = cli.friction {
        settings.friction_target = to_canonical(friction, Quantity::FrictionRate, system);
    }
    if let Some(velocity) = cli.velocity {
        settings.velocity_target_fpm = to_canonical(velocity, Quantity::Velocity, system);
    }
    if let Some(side) = cli.side {
        settings.constraint_side_in = to_canonical(side, Quantity::Length, system);
    }
    Ok(settings)
}

fn print_report(report: &SizingReport) {
    let derived = |quantity: Quantity| {
        if report.mode.derived_quantity() == quantity {
            " (derived)"
        } else {
            ""
        }
    };

    println!("═══════════════════════════════════════");
    println!("  DUCT SIZING RESULTS ({})", report.unit_system);
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Airflow:     {}", report.airflow.format(0));
    println!("  Sized by:    {}", report.mode);
    println!();
    println!("Round Duct:");
    println!("  Diameter:    {}", report.diameter.format(1));
    println!("  Nominal:     {}", report.nominal_diameter.format(0));
    println!(
        "  Velocity:    {}{}",
        report.velocity.format(report.velocity_decimals()),
        derived(Quantity::Velocity)
    );
    println!(
        "  Friction:    {}{}",
        report.friction_rate.format(2),
        derived(Quantity::FrictionRate)
    );
    println!();
    println!("Rectangular Equivalent:");
    println!("  Size:        {}", report.rectangular_callout());
    println!(
        "  Aspect:      {:.2} {}",
        report.aspect_ratio,
        if report.compliant { "[OK]" } else { "[FAIL] exceeds 4:1" }
    );
    println!();
    println!("═══════════════════════════════════════");
}

fn run(cli: Cli) -> CalcResult<()> {
    let settings = effective_settings(&cli)?;

    let system = settings.unit_system;
    let airflow_display = match cli.airflow {
        Some(airflow) => airflow,
        None => prompt_f64(
            &format!("Enter airflow ({}) [1000]: ", Quantity::Airflow.unit_label(system)),
            1000.0,
        ),
    };

    let input = SizingInput {
        airflow_cfm: to_canonical(airflow_display, Quantity::Airflow, system),
        ..settings.input_for(0.0)
    };
    debug!(?input, %system, "canonical sizing input");

    if let Err(e) = input.validate() {
        warn!(code = e.error_code(), "{}", e);
    }

    let result = compute_sizing_with(&input, &settings.rect_search);
    let report = SizingReport::new(&input, &result, system);

    if cli.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| CalcError::serialization(e.to_string()))?;
        println!("{}", json);
    } else {
        print_report(&report);
    }

    if let Some(kind) = cli.advisory {
        println!();
        println!("Advisory prompt:");
        println!("{}", AdvisorySnapshot::from_report(&report).prompt(kind));
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}
