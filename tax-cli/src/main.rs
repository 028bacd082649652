use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, info};

use tax_cli::config::AppConfig;
use tax_cli::history::{CalculationHistory, HistoryEntry};
use tax_cli::logging;
use tax_cli::report::{
    BatchReport, ComparisonReport, HistoryReport, SlabTableReport, SuggestionsReport,
};
use tax_cli::utils::parse_decimal;
use tax_core::{AgeGroup, Deductions, HraDetails, Location, Regime, TaxEngine, TaxpayerProfile};
use tax_data::ProfileLoader;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Indian income tax calculator for FY 2025-26.
///
/// Computes tax under the old and new regimes, recommends the cheaper one
/// and suggests deductions that are not fully used.
#[derive(Debug, Parser)]
#[command(name = "tax-compare", version)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare both regimes for one taxpayer.
    Compare(CompareArgs),

    /// Compare both regimes for every profile in a CSV file.
    Batch {
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print the slab table for an age group and regime.
    Slabs {
        #[arg(long, default_value = "below60")]
        age_group: AgeGroup,

        #[arg(long, default_value = "new")]
        regime: Regime,
    },

    /// List or clear saved calculations.
    History {
        #[arg(long)]
        clear: bool,
    },
}

/// Amounts accept digit grouping, e.g. `12,00,000` or `1,200,000`.
#[derive(Debug, Args)]
struct CompareArgs {
    /// Gross annual salary.
    #[arg(long, value_parser = parse_decimal)]
    salary: Decimal,

    /// `below60`, `60-80` or `above80`.
    #[arg(long, default_value = "below60")]
    age_group: AgeGroup,

    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    section_80c: Decimal,

    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    section_80d: Decimal,

    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    home_loan_interest: Decimal,

    /// Annual basic salary, for the HRA exemption.
    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    basic_salary: Decimal,

    /// Annual HRA received.
    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    hra_received: Decimal,

    /// Annual rent paid.
    #[arg(long, value_parser = parse_decimal, default_value = "0")]
    rent_paid: Decimal,

    /// `metro` or `non-metro`.
    #[arg(long, default_value = "metro")]
    location: Location,

    /// Do not record this calculation in the history file.
    #[arg(long)]
    no_history: bool,
}

impl CompareArgs {
    fn profile(&self) -> TaxpayerProfile {
        TaxpayerProfile {
            annual_salary: self.salary,
            age_group: self.age_group,
            regime: Regime::Old,
            deductions: Deductions {
                section_80c: self.section_80c,
                section_80d: self.section_80d,
                home_loan_interest: self.home_loan_interest,
            },
            hra_details: HraDetails {
                basic_salary: self.basic_salary,
                hra_received: self.hra_received,
                rent_paid: self.rent_paid,
                location: self.location,
            },
        }
    }
}

// ─── commands ────────────────────────────────────────────────────────────────

fn compare(
    engine: &TaxEngine,
    config: &AppConfig,
    args: &CompareArgs,
) -> anyhow::Result<()> {
    let profile = args.profile();
    let comparison = engine
        .compare_regimes(&profile)
        .context("failed to compute tax")?;
    let suggestions = engine.suggest_savings(&profile.deductions, profile.annual_salary);

    println!("{}", ComparisonReport(&comparison));
    print!("{}", SuggestionsReport(&suggestions));

    if args.no_history {
        return Ok(());
    }
    let mut history = CalculationHistory::load(&config.history_file, config.history_capacity)?;
    history.push(HistoryEntry::new(Utc::now(), profile, &comparison));
    history.save(&config.history_file)?;
    debug!(entries = history.len(), "recorded calculation");
    Ok(())
}

fn batch(
    engine: &TaxEngine,
    file: &Path,
) -> anyhow::Result<()> {
    let profiles = ProfileLoader::load_from_file(file)
        .with_context(|| format!("failed to load profiles from {}", file.display()))?;
    info!(count = profiles.len(), "comparing regimes for batch");

    let rows = profiles
        .into_iter()
        .map(|p| {
            let comparison = engine
                .compare_regimes(&p.profile)
                .with_context(|| format!("failed to compute tax for '{}'", p.label))?;
            Ok((p.label, comparison))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    print!("{}", BatchReport(&rows));
    Ok(())
}

fn show_history(
    config: &AppConfig,
    clear: bool,
) -> anyhow::Result<()> {
    let mut history = CalculationHistory::load(&config.history_file, config.history_capacity)?;
    if clear {
        history.clear();
        history.save(&config.history_file)?;
        println!("History cleared.");
    } else {
        print!("{}", HistoryReport(&history));
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    logging::init_logging(&config.log_level);
    if let Some(log_file) = &config.log_file {
        logging::enable_file_logging(log_file)?;
    }

    let engine = config
        .build_engine()
        .context("failed to set up tax rules")?;

    match &cli.command {
        Command::Compare(args) => compare(&engine, &config, args),
        Command::Batch { file } => batch(&engine, file),
        Command::Slabs { age_group, regime } => {
            let report = SlabTableReport {
                table: engine.slab_table(*age_group, *regime),
                age_group: *age_group,
                regime: *regime,
            };
            print!("{report}");
            Ok(())
        }
        Command::History { clear } => show_history(&config, *clear),
    }
}
