use super::VERSION;
use crate::error::Result;
use crate::scripts::Recipe;
use clap::{App, Arg};
use log::{error, info};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub csvin: PathBuf,
    pub imgout: PathBuf,
    pub verbose: bool,
}

/// Takes the CLI arguments of a plotting script,
/// the recipe's input and output files are the defaults.
pub fn parse_cli(recipe: &Recipe) -> Args {
    parse_cli_from(recipe, std::env::args_os()).unwrap_or_else(|e| e.exit())
}

pub fn parse_cli_from<I, T>(recipe: &Recipe, args: I) -> clap::Result<Args>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let arg_csvin = Arg::with_name("input_csvfile")
        .help("name of the input csv file")
        .short("f")
        .long("csvfile")
        .takes_value(true)
        .default_value(recipe.input);
    let arg_imgout = Arg::with_name("output_imgfile")
        .help("name of the output image, png or svg")
        .short("o")
        .long("imgfile")
        .takes_value(true)
        .default_value(recipe.output);
    let arg_verbose = Arg::with_name("verbose")
        .help("log the loaded series and the axis ranges")
        .short("v")
        .long("verbose");
    let cli_args = App::new(recipe.name)
        .version(VERSION.unwrap_or("unknown"))
        .about(recipe.about)
        .arg(arg_csvin)
        .arg(arg_imgout)
        .arg(arg_verbose)
        .get_matches_from_safe(args)?;
    let csvin = PathBuf::from(cli_args.value_of("input_csvfile").unwrap_or(recipe.input));
    let imgout = PathBuf::from(cli_args.value_of("output_imgfile").unwrap_or(recipe.output));
    Ok(Args {
        csvin,
        imgout,
        verbose: cli_args.is_present("verbose"),
    })
}

/// RUST_LOG takes precedence over the verbose flag.
pub fn init_logger(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}

/// Entry point shared by the script binaries.
/// Errors are logged once here, the process only gets the exit code.
pub fn run_script(recipe: Result<Recipe>) -> ExitCode {
    let recipe = match recipe {
        Ok(r) => r,
        Err(e) => {
            init_logger(false);
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let args = parse_cli(&recipe);
    init_logger(args.verbose);
    match run_with_args(&recipe, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

/// Runs the recipe on the parsed files, logging the error if any.
pub fn run_with_args(recipe: &Recipe, args: &Args) -> Result<()> {
    info!(
        "read data from {} and plot to {}",
        args.csvin.display(),
        args.imgout.display()
    );
    match recipe.run(&args.csvin, &args.imgout) {
        Ok(_) => Ok(()),
        Err(e) => {
            error!("{}: {}", recipe.name, e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlotError;
    use crate::scripts::v2x_200_cbr_itt;

    #[test]
    fn defaults_are_the_hardcoded_files() {
        let recipe = v2x_200_cbr_itt().unwrap();
        let args = parse_cli_from(&recipe, vec!["v2x_200_cbr_itt"]).unwrap();
        assert_eq!(args.csvin, PathBuf::from("V2X_200_0.08.csv"));
        assert_eq!(args.imgout, PathBuf::from("V2X_200_0.08_CBR_ITT.png"));
        assert!(!args.verbose);
    }

    #[test]
    fn files_can_be_overridden() {
        let recipe = v2x_200_cbr_itt().unwrap();
        let args = parse_cli_from(
            &recipe,
            vec!["v2x_200_cbr_itt", "-f", "run2.csv", "--imgfile", "run2.svg", "-v"],
        )
        .unwrap();
        assert_eq!(args.csvin, PathBuf::from("run2.csv"));
        assert_eq!(args.imgout, PathBuf::from("run2.svg"));
        assert!(args.verbose);
    }

    #[test]
    fn failed_run_returns_the_error() {
        let dir = tempfile::tempdir().unwrap();
        let recipe = v2x_200_cbr_itt().unwrap();
        let args = Args {
            csvin: dir.path().join("V2X_200_0.08.csv"),
            imgout: dir.path().join("V2X_200_0.08_CBR_ITT.png"),
            verbose: false,
        };
        assert!(matches!(
            run_with_args(&recipe, &args),
            Err(PlotError::FileNotFound { .. })
        ));
        assert!(!args.imgout.exists());
    }

    #[test]
    fn unknown_flags_are_rejected() {
        let recipe = v2x_200_cbr_itt().unwrap();
        assert!(parse_cli_from(&recipe, vec!["v2x_200_cbr_itt", "--nope"]).is_err());
    }
}
