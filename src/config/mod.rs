// src/config/mod.rs
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ExperimentError, Result};
use crate::sequencer::StimulusDef;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExperimentConfig {
    pub board: BoardConfig,
    pub timing: TimingConfig,
    pub stimuli: Vec<StimulusDef>,
    pub output: OutputConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BoardConfig {
    pub board_id: i32,
    pub serial_port: Option<String>,
    pub ip_address: Option<String>,
    pub enable_debug_logging: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TimingConfig {
    pub rest_s: f64,
    pub ready_s: f64,
    pub stimulus_s: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    pub data_dir: String,
    pub abort_key: String,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            board: BoardConfig {
                board_id: crate::acquisition::board::SYNTHETIC_BOARD_ID,
                serial_port: None,
                ip_address: None,
                enable_debug_logging: false,
            },
            timing: TimingConfig {
                rest_s: 1.5,
                ready_s: 1.0,
                stimulus_s: 2.0,
            },
            stimuli: vec![
                StimulusDef::new("left", 1),
                StimulusDef::new("right", 2),
                StimulusDef::new("L", 3),
                StimulusDef::new("R", 4),
                StimulusDef::new("←", 5),
                StimulusDef::new("→", 6),
            ],
            output: OutputConfig {
                data_dir: "data".to_string(),
                abort_key: "escape".to_string(),
            },
        }
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ExperimentConfig> {
    let config_str = fs::read_to_string(path)
        .map_err(|e| ExperimentError::Config(format!("Failed to read config file: {}", e)))?;

    serde_yaml::from_str(&config_str)
        .map_err(|e| ExperimentError::Config(format!("Failed to parse config file: {}", e)))
}

pub fn save_config<P: AsRef<Path>>(config: &ExperimentConfig, path: P) -> Result<()> {
    let yaml = serde_yaml::to_string(config)
        .map_err(|e| ExperimentError::Config(format!("Failed to serialize config: {}", e)))?;

    fs::write(path, yaml)
        .map_err(|e| ExperimentError::Config(format!("Failed to write config file: {}", e)))
}
