use std::process::ExitCode;

fn main() -> ExitCode {
    match termplot::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("termplot: {e}");
            ExitCode::FAILURE
        }
    }
}
