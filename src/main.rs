//! Loan Amortization CLI
//!
//! Prints the level payment, the amortization schedule and totals for a
//! fixed-rate loan, optionally exporting the schedule as CSV.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --principal 20000000 --rate 10 --years 10 --csv schedule.csv
//! cargo run -- -p 250000 -r 6.5 -m 360 --income 9000 --summary
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use clap::{ArgGroup, Parser};
use loan_amortization::{
    assess, export_csv_file, AmortizationEngine, LoanRequest, Precision, Report, ReportOptions,
    Result, TermSpec,
};
use std::io;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(author, version, about = "Loan amortization calculator", long_about = None)]
#[command(group(ArgGroup::new("term").required(true).args(["years", "months"])))]
struct Cli {
    /// Loan principal amount
    #[arg(short, long)]
    principal: f64,

    /// Annual interest rate (percent)
    #[arg(short, long)]
    rate: f64,

    /// Loan term in years (can be fractional)
    #[arg(long)]
    years: Option<f64>,

    /// Loan term in months
    #[arg(short, long, allow_negative_numbers = true)]
    months: Option<i64>,

    /// Optional output CSV file for the schedule
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Monthly income used for the affordability check
    #[arg(long, value_name = "AMOUNT")]
    income: Option<f64>,

    /// Currency symbol used in the report
    #[arg(long, value_name = "SYMBOL", default_value = "$")]
    currency: String,

    /// Fractional digits schedule values are rounded to
    #[arg(long, value_name = "DIGITS", default_value_t = Precision::DEFAULT_DIGITS)]
    precision: u32,

    /// Print totals without the period-by-period table
    #[arg(long)]
    summary: bool,
}

impl Cli {
    fn term(&self) -> TermSpec {
        match (self.months, self.years) {
            (Some(months), _) => TermSpec::Months(months),
            (None, Some(years)) => TermSpec::Years(years),
            // The "term" group guarantees one of the two is present.
            (None, None) => TermSpec::Months(0),
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let request = LoanRequest {
        principal: cli.principal,
        annual_rate_percent: cli.rate,
        term: cli.term(),
    };
    let terms = request.validate()?;

    let engine = AmortizationEngine::with_precision(Precision::new(cli.precision));
    let payment = engine.payment(&terms)?;
    let schedule = engine.schedule(&terms)?;

    let affordability = cli
        .income
        .map(|income| assess(payment, income))
        .transpose()?;

    let report = Report {
        terms: &terms,
        payment,
        schedule: &schedule,
        affordability: affordability.as_ref(),
    };
    let options = ReportOptions {
        currency_symbol: cli.currency,
        show_schedule: !cli.summary,
    };

    let stdout = io::stdout();
    report.write_to(stdout.lock(), &options)?;

    if let Some(path) = cli.csv {
        export_csv_file(&schedule, &path)?;
        println!("Schedule written to {}", path.display());
    }

    Ok(())
}
