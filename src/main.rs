pub mod base85;
pub mod base_common;
pub mod chronometer;
pub mod configuration;
pub mod create_server;
pub mod error;
pub mod hex;
pub mod logger;
pub mod server;
pub mod vectors;

use self::{
    chronometer::Chronometer,
    configuration::{Configuration, ReportFormat},
    create_server::create_server,
    error::Error,
    logger::Logger,
    server::Server,
};
use std::{env, net::SocketAddr, process, sync::Arc};
use tokio::runtime::Runtime;

const USAGE: &str = "Usage: lex85 encode <hex> | decode <text> | verify [file] | serve";

enum Command {
    Encode(String),
    Decode(String),
    Verify(Option<String>),
    Serve,
}

impl Command {
    fn parse(mut arguments: impl Iterator<Item = String>) -> Result<Self, Error> {
        let command = match (arguments.next().as_deref(), arguments.next()) {
            (Some("encode"), Some(input)) => Self::Encode(input),
            (Some("decode"), Some(input)) => Self::Decode(input),
            (Some("verify"), path) => Self::Verify(path),
            (Some("serve"), None) => Self::Serve,
            _ => return Err(Error::new(USAGE)),
        };
        match arguments.next() {
            Some(_) => Err(Error::new(USAGE)),
            None => Ok(command),
        }
    }
}

/// Returns whether the command succeeded.
fn run(command: Command, configuration: &Configuration, logger: Logger) -> Result<bool, Error> {
    match command {
        Command::Encode(input) => {
            println!("{}", base85::encode(hex::decode(input)?)?);
        }
        Command::Decode(input) => {
            println!("{}", hex::encode(base85::decode(input)?));
        }
        Command::Verify(path) => {
            let path = path.as_deref().unwrap_or(configuration.vectors_file_path());
            let vectors = vectors::read(path)?;
            let report = vectors::verify(&vectors);
            match configuration.report_format() {
                ReportFormat::Text => {
                    println!("{}", report.progress());
                    for failure in &report.failures {
                        println!("{}", failure);
                    }
                }
                ReportFormat::Json => {
                    println!("{}", serde_json::to_string(&report).map_err(|error| Error::new(error.to_string()))?);
                }
            }
            logger.log(format!("Checked {} vectors from {}", vectors.len(), path));
            return Ok(report.is_success());
        }
        Command::Serve => {
            let address = SocketAddr::new(configuration.host(), configuration.port());
            let server = create_server(logger);
            logger.log(format!("Listening on http://{}", address));
            Runtime::new()?
                .block_on(server.run(address))
                .map_err(|error| Error::new(format!("Server error: {}", error)))?;
        }
    }
    Ok(true)
}

fn main() {
    let logger = Logger::new();
    let result = Configuration::new()
        .and_then(|configuration| Ok((Command::parse(env::args().skip(1))?, configuration)))
        .and_then(|(command, configuration)| run(command, &configuration, logger));
    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(error) => {
            eprintln!("{}", error);
            process::exit(1);
        }
    }
}
