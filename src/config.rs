use std::{env, path::PathBuf};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub files_directory: PathBuf,
    pub cors_origins: Vec<String>,
    pub log_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("SERVER_PORT")
            .unwrap_or_else(|| "8000".into())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid SERVER_PORT: {err}")))?;

        let files_directory = lookup("FILES_DIRECTORY").unwrap_or_else(|| "./files".into());
        if files_directory.trim().is_empty() {
            return Err(AppError::Config("FILES_DIRECTORY must not be empty".into()));
        }

        let cors_origins = parse_origins(&lookup("CORS_ORIGINS").unwrap_or_else(|| "*".into()));

        let log_dir =
            PathBuf::from(lookup("FILE_PICKER_LOG_DIR").unwrap_or_else(|| "./log".into()));

        Ok(Self {
            host,
            port,
            files_directory: PathBuf::from(files_directory),
            cors_origins,
            log_dir,
        })
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|origin| origin == "*")
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect();
    if origins.is_empty() {
        vec!["*".into()]
    } else {
        origins
    }
}
