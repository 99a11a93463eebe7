use std::{path::PathBuf, process::ExitCode};

use bmca_cli::{config::Config, evaluate, setup_logger};
use clap::Parser;

const DEFAULT_CONFIG_PATH: &str = "/etc/bmca/bmca.toml";

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Configuration file describing the instance and what its ports hear
    #[clap(long = "config", short = 'c', default_value = DEFAULT_CONFIG_PATH)]
    config_file: PathBuf,

    /// Set desired logging level, overriding the configuration file
    #[clap(short, long)]
    loglevel: Option<log::LevelFilter>,

    /// Print the recommended port states as JSON
    #[clap(long)]
    json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match Config::from_file(&args.config_file) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Could not load configuration {}: {e}",
                args.config_file.display()
            );
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = setup_logger(args.loglevel.unwrap_or(config.loglevel)) {
        eprintln!("Could not setup logging: {e}");
        return ExitCode::FAILURE;
    }

    if !config.check() {
        log::error!("Refusing to run with an invalid configuration");
        return ExitCode::FAILURE;
    }

    let reports = evaluate(&config);

    if args.json {
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                log::error!("Could not serialize the recommended states: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for report in &reports {
            println!("{report}");
        }
    }

    ExitCode::SUCCESS
}
