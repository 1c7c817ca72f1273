use std::{io, process};

use clap::error::ErrorKind;
use tracing::{debug, Level};
use wmlayout::{
    config::{cli, Config},
    driver,
};

fn main() {
    let matches = match cli().try_get_matches() {
        Ok(matches) => matches,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                eprint!("{}", err);
                process::exit(1);
            },
        },
    };

    let config = match Config::from_matches(&matches) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(1);
        },
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .without_time()
        .with_max_level(if config.debug { Level::DEBUG } else { Level::WARN })
        .init();
    debug!("main: {:?}", config);

    let result = config.backend.connect().and_then(|ws| driver::run(&*ws, &config, &mut io::stdout()));
    if let Err(err) = result {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
