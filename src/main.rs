//! dupsweep - content-based duplicate file sweeper
//!
//! Entry point for the dupsweep CLI application.

use clap::Parser;
use dupsweep::{
    cli::Cli,
    console::Console,
    error::{ExitCode, StructuredError},
    logging::init_logging,
};

fn main() {
    let cli = Cli::parse();
    let json_errors = cli.json_errors;
    let pause = !cli.no_pause;

    init_logging(cli.verbose, cli.quiet);

    let exit_code = match dupsweep::run_app(cli) {
        Ok(code) => code,
        Err(err) => {
            let exit_code = ExitCode::GeneralError;
            if json_errors {
                let structured = StructuredError::new(&err, exit_code);
                match serde_json::to_string_pretty(&structured) {
                    Ok(json) => eprintln!("{}", json),
                    Err(_) => eprintln!("[{}] Error: {:#}", exit_code.code_prefix(), err),
                }
            } else {
                eprintln!("[{}] Error: {:#}", exit_code.code_prefix(), err);
            }
            exit_code
        }
    };

    if pause {
        Console::stdio().pause();
    }

    std::process::exit(exit_code.as_i32());
}
