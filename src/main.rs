use clap::Parser;
use env_logger::Env;
use std::process::ExitCode;
use lensmaker::{
    console::{Cli, Command, FovArgs, LensArgs, PartialLensArgs},
    error::{LensmakerError, LmResult},
    plottable::{LensProfile, Plottable},
    reporter::{AnalysisReport, Evaluation},
};

fn run_lens(args: LensArgs) -> LmResult<()> {
    let result = args.spec.evaluate_with(args.model)?;
    println!("{result}");
    if let Some(plot_path) = &args.plot {
        LensProfile::from(&args.spec).to_plot(plot_path)?;
    }
    if let Some(report_path) = &args.report {
        AnalysisReport::new(Evaluation::Lens {
            model: args.model,
            spec: args.spec,
            result,
        })
        .to_file(report_path)?;
    }
    Ok(())
}

fn run_fov(args: FovArgs) -> LmResult<()> {
    let result = args.spec.evaluate()?;
    println!("{result}");
    if let Some(report_path) = &args.report {
        AnalysisReport::new(Evaluation::FieldOfView {
            spec: args.spec,
            result,
        })
        .to_file(report_path)?;
    }
    Ok(())
}

fn run(cli: Cli) -> LmResult<()> {
    match cli
        .command
        .unwrap_or_else(|| Command::Lens(PartialLensArgs::default()))
    {
        Command::Lens(part_args) => run_lens(LensArgs::try_from(part_args)?),
        Command::Fov(part_args) => run_fov(FovArgs::try_from(part_args)?),
    }
}

/// Message shown to the user when the program stops with an error.
fn error_message(error: &LensmakerError) -> String {
    match error {
        LensmakerError::Parse(m) => format!("Error: {m}"),
        _ => format!("Error: {error}"),
    }
}

fn main() -> ExitCode {
    env_logger::init_from_env(Env::default().default_filter_or("warn"));

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error_message(&e));
            ExitCode::FAILURE
        }
    }
}
