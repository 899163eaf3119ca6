use crate::Error;
use std::{env, net::IpAddr, str::FromStr};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(Error::new(format!("Unknown report format {}", value))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Configuration {
    host: IpAddr,
    port: u16,
    vectors_file_path: String,
    report_format: ReportFormat,
}

fn var(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn var_parse<T: FromStr>(key: &str, default: T) -> Result<T, Error> {
    match env::var(key) {
        Ok(value) => value.parse().map_err(|_| Error::new(format!("Invalid {} {}", key, value))),
        Err(_) => Ok(default),
    }
}

impl Configuration {
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            host: var_parse("HOST", IpAddr::from([127, 0, 0, 1]))?,
            port: var_parse("PORT", 8085)?,
            vectors_file_path: var("VECTORS_FILE_PATH", "data/vectors.txt"),
            report_format: var_parse("REPORT_FORMAT", ReportFormat::Text)?,
        })
    }

    pub fn host(&self) -> IpAddr {
        self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn vectors_file_path(&self) -> &str {
        &self.vectors_file_path
    }

    pub fn report_format(&self) -> ReportFormat {
        self.report_format
    }
}
