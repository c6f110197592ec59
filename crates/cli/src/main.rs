use std::process::ExitCode;

fn main() -> ExitCode {
    neuroboutique_cli::run()
}
