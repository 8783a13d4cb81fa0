use clap::{Parser, Subcommand};
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::adapters::table::{read_rs_table, write_result_csv};
use crate::error::AppError;
use crate::models::{ReservoirInputs, SweepOptions};
use crate::pvt::fvf::{FvfSummary, SaturatedFvf, UndersaturatedFvf};
use crate::pvt::series::{CorrelationResult, RsTable};
use crate::pvt::solubility::{RsCorrelation, SolubilitySummary};
use crate::pvt::viscosity::{DeadOilViscosity, SaturatedViscosity, ViscositySummary};

#[derive(Parser, Debug)]
#[command(author, version, about = "Black-oil PVT correlations (Rs, Pb, Bo, uo) with optional JSON output", long_about = None)]
pub struct Args {
    #[arg(long, global = true)]
    pub json: bool,
    #[arg(
        long,
        value_name = "FILE",
        global = true,
        help = "JSON file with inputs and optional sweep options; '-' reads from stdin"
    )]
    pub input: Option<String>,
    #[arg(
        long,
        value_name = "JSON",
        global = true,
        help = "Inline JSON for reservoir inputs (overrides --input)"
    )]
    pub inputs_json: Option<String>,
    #[arg(
        long,
        value_name = "JSON",
        global = true,
        help = "Inline JSON for sweep options (optional, supplements --inputs-json)"
    )]
    pub options_json: Option<String>,
    #[arg(
        long,
        value_name = "FILE",
        global = true,
        help = "Write the computed series as CSV (full range when available)"
    )]
    pub export: Option<PathBuf>,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Gas solubility over the sweep from 500 psia to reservoir pressure
    Rs {
        #[arg(long, value_enum, default_value = "standing")]
        correlation: RsCorrelation,
    },
    /// Bubble-point pressure for every row of a pressure/Rs table
    Pb {
        #[arg(long, value_enum, default_value = "standing")]
        correlation: RsCorrelation,
        #[arg(long, value_name = "FILE")]
        table: PathBuf,
    },
    /// Formation volume factor below and above the bubble point
    Bo {
        #[arg(long, value_enum, value_delimiter = ',')]
        below: Vec<SaturatedFvf>,
        #[arg(long, value_enum, value_delimiter = ',')]
        above: Vec<UndersaturatedFvf>,
        #[arg(long, value_name = "FILE")]
        table: Option<PathBuf>,
    },
    /// Dead, saturated and undersaturated oil viscosity
    Uo {
        #[arg(long, value_enum, value_delimiter = ',')]
        dead: Vec<DeadOilViscosity>,
        #[arg(long, value_enum, value_delimiter = ',')]
        saturated: Vec<SaturatedViscosity>,
        #[arg(long, value_name = "FILE")]
        table: Option<PathBuf>,
    },
    /// Rs at the bubble point for every solubility correlation
    Compare,
}

fn parse_inline_inputs(
    inputs_json: &str,
    options_json: Option<&String>,
) -> Result<(ReservoirInputs, SweepOptions), AppError> {
    let inputs: ReservoirInputs =
        serde_json::from_str(inputs_json).map_err(|source| AppError::ParseInputsJson { source })?;

    let options = match options_json {
        Some(s) => serde_json::from_str::<SweepOptions>(s)
            .map_err(|source| AppError::ParseOptionsJson { source })?,
        None => SweepOptions::default(),
    };

    Ok((inputs, options))
}

fn parse_cmd_input_doc(doc: &str) -> Result<(ReservoirInputs, SweepOptions), AppError> {
    let parsed: CmdInput =
        serde_json::from_str(doc).map_err(|source| AppError::ParseCmdInputJson { source })?;
    Ok((parsed.inputs, parsed.options.unwrap_or_default()))
}

pub fn parse_inputs(args: &Args) -> Result<(ReservoirInputs, SweepOptions), AppError> {
    match (&args.inputs_json, &args.input) {
        (Some(inputs_json), _) => parse_inline_inputs(inputs_json, args.options_json.as_ref()),
        (None, Some(path)) if path == "-" => {
            let mut s = String::new();
            io::stdin()
                .read_to_string(&mut s)
                .map_err(|source| AppError::ReadStdin { source })?;
            parse_cmd_input_doc(&s)
        }
        (None, Some(path)) => {
            let s = fs::read_to_string(path).map_err(|source| AppError::ReadFile {
                path: path.clone(),
                source,
            })?;
            parse_cmd_input_doc(&s)
        }
        (None, None) => Err(AppError::MissingInputData),
    }
}

#[derive(serde::Deserialize)]
struct CmdInput {
    inputs: ReservoirInputs,
    #[serde(default)]
    options: Option<SweepOptions>,
}

pub fn load_table(path: &Path) -> Result<RsTable, AppError> {
    let file = File::open(path).map_err(|source| AppError::OpenTable {
        path: path.display().to_string(),
        source,
    })?;
    read_rs_table(BufReader::new(file))
}

pub fn export_series(result: &CorrelationResult, path: &Path) -> Result<(), AppError> {
    let file = File::create(path).map_err(|source| AppError::CreateExport {
        path: path.display().to_string(),
        source,
    })?;
    write_result_csv(result, file)?;
    log::info!("Wrote {} rows to {}", result.len(), path.display());
    Ok(())
}

/// Everything a subcommand produces, ready to print or serialize.
#[derive(serde::Serialize, Debug)]
#[serde(untagged)]
pub enum CalculationOutput {
    Solubility(SolubilitySummary),
    BubblePoint(CorrelationResult),
    Fvf(FvfSummary),
    Viscosity(ViscositySummary),
    Comparison(Vec<ComparisonRow>),
}

#[derive(serde::Serialize, Debug)]
pub struct ComparisonRow {
    pub correlation: &'static str,
    pub bubble_point_psig: f64,
    pub rs_scf_stb: f64,
}

impl CalculationOutput {
    /// The series written by `--export`, if this output has one.
    pub fn primary_series(&self) -> Option<&CorrelationResult> {
        match self {
            CalculationOutput::Solubility(s) => Some(&s.series),
            CalculationOutput::BubblePoint(r) => Some(r),
            CalculationOutput::Fvf(s) => Some(s.full_range.as_ref().unwrap_or(&s.above)),
            CalculationOutput::Viscosity(s) => Some(s.full_range.as_ref().unwrap_or(&s.above)),
            CalculationOutput::Comparison(_) => None,
        }
    }
}

fn fmt_opt(v: Option<f64>, precision: usize) -> String {
    v.map(|x| format!("{x:.precision$}"))
        .unwrap_or_else(|| "n/a".to_string())
}

pub fn print_output(out: &CalculationOutput, args: &Args) -> Result<(), AppError> {
    if args.json {
        let s = serde_json::to_string_pretty(&out)
            .map_err(|source| AppError::SerializeOutput { source })?;
        println!("{}", s);
        return Ok(());
    }

    match out {
        CalculationOutput::Solubility(s) => {
            println!("Correlation: {}", s.correlation);
            println!("Points: {}", s.series.len());
            println!(
                "Rs at bubble point ({:.1} psia): {:.2} scf/STB",
                s.bubble_point_pressure, s.rs_at_bubble_point
            );
        }
        CalculationOutput::BubblePoint(r) => {
            println!("Correlation: {}", r.correlation);
            for (rs, pb) in r.points() {
                println!("Rs {:.2} scf/STB -> Pb {:.1} psia", rs, pb);
            }
        }
        CalculationOutput::Fvf(s) => {
            println!("Correlations: {} / {}", s.saturated, s.undersaturated);
            println!("Bo at bubble point: {} rb/STB", fmt_opt(s.boundary.bo, 4));
            println!("Rs at bubble point: {} scf/STB", fmt_opt(s.boundary.rs, 2));
            if let Some(dev) = s.measured_bo_deviation_pct {
                println!("Deviation from measured Bo: {dev:+.2} %");
            }
            println!(
                "Bo at {:.1} psia: {} rb/STB",
                s.above.axis_values.last().copied().unwrap_or(s.boundary.pressure),
                fmt_opt(s.above.last_value(), 4)
            );
            println!(
                "Points: {}",
                s.full_range.as_ref().map_or(s.above.len(), |f| f.len())
            );
        }
        CalculationOutput::Viscosity(s) => {
            println!("Correlations: {} / {} / Vasquez-Beggs", s.dead_oil, s.saturated);
            println!("Dead oil viscosity: {:.4} cp", s.dead_oil_viscosity);
            println!(
                "Viscosity at bubble point: {} cp",
                fmt_opt(s.boundary.viscosity, 4)
            );
            println!(
                "Viscosity at {:.1} psia: {} cp",
                s.above.axis_values.last().copied().unwrap_or(s.boundary.pressure),
                fmt_opt(s.above.last_value(), 4)
            );
        }
        CalculationOutput::Comparison(rows) => {
            for row in rows {
                println!(
                    "{:<18} Pb {:.1} psig  Rs {:.2} scf/STB",
                    row.correlation, row.bubble_point_psig, row.rs_scf_stb
                );
            }
        }
    }

    Ok(())
}
