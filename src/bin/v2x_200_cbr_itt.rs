use std::process::ExitCode;
use v2x_plot::cli::run_script;
use v2x_plot::scripts::v2x_200_cbr_itt;

fn main() -> ExitCode {
    run_script(v2x_200_cbr_itt())
}
