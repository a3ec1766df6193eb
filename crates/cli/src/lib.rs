pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use insureflow_core::catalog::InsurerCategory;
use insureflow_core::stats::{BusinessLine, CategorySelector, StatsFilter};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "insureflow",
    about = "InsureFlow operator CLI",
    long_about = "Operate the InsureFlow quote-management engine: seed demo books, run insurer \
                  performance reports, inspect configuration, and smoke-test the request lifecycle.",
    after_help = "Examples:\n  insureflow seed --count 500\n  insureflow report --category health --comprehensive\n  insureflow smoke"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum BusinessLineArg {
    All,
    Eb,
    NonEb,
}

impl From<BusinessLineArg> for BusinessLine {
    fn from(value: BusinessLineArg) -> Self {
        match value {
            BusinessLineArg::All => Self::All,
            BusinessLineArg::Eb => Self::EmployeeBenefits,
            BusinessLineArg::NonEb => Self::NonEmployeeBenefits,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CategoryArg {
    All,
    General,
    Health,
    Life,
}

impl From<CategoryArg> for CategorySelector {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::All => Self::All,
            CategoryArg::General => Self::Only(InsurerCategory::General),
            CategoryArg::Health => Self::Only(InsurerCategory::Health),
            CategoryArg::Life => Self::Only(InsurerCategory::Life),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Generate the deterministic demo request book and summarize it")]
    Seed {
        #[arg(long, default_value_t = 200, help = "Number of demo requests to generate")]
        count: usize,
        #[arg(long, default_value_t = 42, help = "Seed for the deterministic generator")]
        seed: u64,
        #[arg(long, help = "Emit the full book as JSON")]
        json: bool,
    },
    #[command(about = "Run the insurer performance reducers over a demo book")]
    Report {
        #[arg(long, value_enum, default_value = "all", help = "Business line filter")]
        business_line: BusinessLineArg,
        #[arg(long, value_enum, default_value = "all", help = "Insurer category filter")]
        category: CategoryArg,
        #[arg(long, help = "Use the comprehensive multi-metric reducer")]
        comprehensive: bool,
        #[arg(long, default_value_t = 200)]
        count: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, help = "Emit rows as JSON")]
        json: bool,
    },
    #[command(about = "Portfolio overview: KPIs, weekly trend, product mix, TAT distribution")]
    Overview {
        #[arg(long, default_value_t = 200)]
        count: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, help = "Emit the overview as JSON")]
        json: bool,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Run the request lifecycle end-to-end with per-check results")]
    Smoke,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Seed { count, seed, json } => commands::seed::run(count, seed, json),
        Command::Report { business_line, category, comprehensive, count, seed, json } => {
            commands::report::run(commands::report::ReportOptions {
                filter: StatsFilter {
                    business_line: business_line.into(),
                    category: category.into(),
                },
                comprehensive,
                count,
                seed,
                json,
            })
        }
        Command::Overview { count, seed, json } => commands::overview::run(count, seed, json),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Smoke => commands::smoke::run(),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
