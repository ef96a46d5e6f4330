use std::process::ExitCode;
use v2x_plot::cli::run_script;
use v2x_plot::scripts::book_column;

fn main() -> ExitCode {
    run_script(book_column())
}
