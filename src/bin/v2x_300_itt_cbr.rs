use std::process::ExitCode;
use v2x_plot::cli::run_script;
use v2x_plot::scripts::v2x_300_itt_cbr;

fn main() -> ExitCode {
    run_script(v2x_300_itt_cbr())
}
