use std::io;

use crate::Id;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Can't read config file {0}: {1}")]
    ConfigRead(String, io::Error),
    #[error("JSON: can't deserialize config {0}: {1}")]
    ConfigParse(String, serde_json::Error),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
    #[error("Unknown body id: {0}")]
    UnknownBody(Id),
}
