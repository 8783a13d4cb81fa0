#[cfg(feature = "cli")]
pub mod cli;
pub mod table;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    // A second init (e.g. from tests driving `run` twice) keeps the first logger.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}

#[cfg(feature = "cli")]
pub fn run() -> Result<(), crate::error::AppError> {
    use crate::adapters::cli::{
        Args, CalculationOutput, Command, ComparisonRow, export_series, load_table, parse_inputs,
    };
    use crate::correlations::ATMOSPHERIC_PSI;
    use crate::pvt::bubble_point::bubble_point_from_table;
    use crate::pvt::fvf::{SaturatedFvf, UndersaturatedFvf, fvf_summary};
    use crate::pvt::selection::single_choice;
    use crate::pvt::solubility::{bubble_point_comparison, solubility_summary};
    use crate::pvt::viscosity::{DeadOilViscosity, SaturatedViscosity, viscosity_summary};

    let args = Args::parse();
    init_logging(args.verbose);

    let (inputs, options) = parse_inputs(&args)?;
    let cond = inputs.normalized()?;
    options.validate()?;

    let out = match &args.command {
        Command::Rs { correlation } => {
            CalculationOutput::Solubility(solubility_summary(&cond, *correlation, &options)?)
        }
        Command::Pb { correlation, table } => {
            let table = load_table(table)?;
            CalculationOutput::BubblePoint(bubble_point_from_table(&cond, *correlation, &table))
        }
        Command::Bo {
            below,
            above,
            table,
        } => {
            let saturated = single_choice("Bo below bubble point", below, SaturatedFvf::Standing)?;
            let undersaturated = single_choice(
                "Bo above bubble point",
                above,
                UndersaturatedFvf::VasquezBeggs,
            )?;
            let table = table.as_deref().map(load_table).transpose()?;
            CalculationOutput::Fvf(fvf_summary(
                &cond,
                saturated,
                undersaturated,
                table.as_ref(),
                &options,
            )?)
        }
        Command::Uo {
            dead,
            saturated,
            table,
        } => {
            let dead = single_choice("dead oil viscosity", dead, DeadOilViscosity::Beal)?;
            let saturated = single_choice(
                "saturated oil viscosity",
                saturated,
                SaturatedViscosity::ChewConnally,
            )?;
            let table = table.as_deref().map(load_table).transpose()?;
            CalculationOutput::Viscosity(viscosity_summary(
                &cond,
                dead,
                saturated,
                table.as_ref(),
                &options,
            )?)
        }
        Command::Compare => CalculationOutput::Comparison(
            bubble_point_comparison(&cond)
                .into_iter()
                .map(|(correlation, rs_scf_stb)| ComparisonRow {
                    correlation,
                    bubble_point_psig: cond.bubble_point_pressure - ATMOSPHERIC_PSI,
                    rs_scf_stb,
                })
                .collect(),
        ),
    };

    match (&args.export, out.primary_series()) {
        (Some(path), Some(series)) => export_series(series, path)?,
        (Some(path), None) => log::warn!(
            "Nothing to export to {}: this command produces no series",
            path.display()
        ),
        (None, _) => {}
    }

    crate::adapters::cli::print_output(&out, &args)?;

    Ok(())
}
