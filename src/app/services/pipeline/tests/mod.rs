//! Fixtures for whole-run pipeline tests

use crate::app::models::InstrumentMode;
use crate::config::Config;
use std::fs;
use std::path::Path;
use tempfile::TempDir;


pub use crate::app::services::temperature_csv::tests::{
    dual_sensor_export, single_sensor_export,
};

/// Input and output directories for one run
pub struct RunDirs {
    pub root: TempDir,
}

impl RunDirs {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("input")).unwrap();
        Self { root }
    }

    pub fn input(&self) -> std::path::PathBuf {
        self.root.path().join("input")
    }

    pub fn output(&self) -> std::path::PathBuf {
        self.root.path().join("output")
    }

    /// Write an input file, creating parent directories
    pub fn add_input(&self, relative: &str, contents: &str) {
        let path = self.input().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    pub fn config(&self, mode: InstrumentMode) -> Config {
        Config::default()
            .with_input_dir(self.input())
            .with_output_dir(self.output())
            .with_mode(mode)
    }

    pub fn read_output(&self, name: &str) -> String {
        read(&self.output().join(name))
    }
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}
