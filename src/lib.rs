pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod keyring;
pub mod logging;
pub mod platform;
pub mod state;
pub mod stats;
pub mod storage;
pub mod store;
pub mod sync;
pub mod timer;

use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, ValueEnum, Debug, Default, Serialize)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
