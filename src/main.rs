// main.rs - CLI entry point

use clap::error::ErrorKind;
use clap::Parser;

use attotree::cli::Config;
use attotree::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("attotree error: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<()> {
    let mut args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{}", e);
                return Ok(());
            }
            _ => {
                eprint!("{}", e);
                std::process::exit(1);
            }
        },
    };

    // Handle generate config first
    if args.generate_config {
        print!("{}", Config::generate_sample());
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    let options = validate_args(&args)?;
    let diag = Diagnostics::stderr(options.verbose);
    let runner = SystemRunner::new();

    Pipeline::new(&options, &runner, &diag).run()?;
    Ok(())
}
