use std::io;
use std::process::ExitCode;

use lapcas::{EvaluatorConfig, TextReporter, run};
use log::error;

fn main() -> ExitCode {
    env_logger::init();

    let stdout = io::stdout();
    let mut reporter = TextReporter::new(stdout.lock());
    match run(&mut reporter, &EvaluatorConfig::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("evaluation failed: {err}");
            eprintln!("lapcas: {err}");
            ExitCode::FAILURE
        }
    }
}
