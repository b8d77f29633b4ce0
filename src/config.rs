// src/config.rs

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::storage::file_storage::DEFAULT_QUOTA_BYTES;

pub struct AppConfig {
    pub store_file: PathBuf,
    pub quota_bytes: usize,
}

pub fn load() -> Result<AppConfig> {
    let data_dir = env::var("ZYNK_DATA_DIR").unwrap_or_else(|_| ".zynk".to_string());
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create data dir {data_dir}"))?;

    let quota_bytes = match env::var("ZYNK_QUOTA_BYTES") {
        Ok(raw) => raw
            .parse()
            .context("ZYNK_QUOTA_BYTES must be a byte count")?,
        Err(_) => DEFAULT_QUOTA_BYTES,
    };

    Ok(AppConfig {
        store_file: PathBuf::from(data_dir).join("store.json"),
        quota_bytes,
    })
}
