use crate::defaults::*;
use crate::error::{BasisError, Result};
use crate::io::{FieldFormat, Layout};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

fn default_max_params() -> usize {
    MAX_PARAMS
}
fn default_opt_tol() -> f64 {
    OPT_TOL
}
fn default_save() -> bool {
    SAVE_BASIS
}
fn default_output_directory() -> PathBuf {
    PathBuf::from(".")
}
fn default_precision() -> u32 {
    PRECISION
}
fn default_exponent_width() -> usize {
    EXPONENT_WIDTH
}
fn default_exponent_precision() -> usize {
    EXPONENT_PRECISION
}
fn default_coefficient_width() -> usize {
    COEFFICIENT_WIDTH
}
fn default_coefficient_precision() -> usize {
    COEFFICIENT_PRECISION
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Configuration {
    #[serde(default)]
    pub saturation: SaturationConfig,
    #[serde(default)]
    pub merge: MergeConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Configuration {
    /// Read the configuration from the default file in the working directory.
    pub fn from_default_file() -> Result<Self> {
        Self::from_file(CONFIG_FILE_NAME)
    }

    /// Read the configuration file at `path`. If it does not exist the default settings
    /// are used and written to `path`, so that the user can see all the used options.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_file_path: &Path = path.as_ref();
        if config_file_path.exists() {
            let config_string: String = fs::read_to_string(config_file_path)?;
            config_string.parse()
        } else {
            let config: Self = Self::default();
            let config_string: String =
                toml::to_string(&config).map_err(|err| BasisError::Value(err.to_string()))?;
            fs::write(config_file_path, config_string)?;
            Ok(config)
        }
    }
}

impl FromStr for Configuration {
    type Err = BasisError;

    fn from_str(config_string: &str) -> Result<Self> {
        toml::from_str(config_string).map_err(|err| {
            let line: usize = err.line_col().map(|(line, _)| line + 1).unwrap_or(0);
            BasisError::parse(line, err.to_string())
        })
    }
}

/// Settings of the shell saturation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SaturationConfig {
    #[serde(default = "default_max_params")]
    pub max_params: usize,
    #[serde(default = "default_opt_tol")]
    pub opt_tol: f64,
    #[serde(default = "default_save")]
    pub save: bool,
    #[serde(default = "default_output_directory", alias = "output")]
    pub output_directory: PathBuf,
}

impl Default for SaturationConfig {
    fn default() -> Self {
        SaturationConfig {
            max_params: default_max_params(),
            opt_tol: default_opt_tol(),
            save: default_save(),
            output_directory: default_output_directory(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct MergeConfig {
    /// Number of significant digits used in exponent comparisons.
    #[serde(default = "default_precision")]
    pub precision: u32,
}

impl Default for MergeConfig {
    fn default() -> Self {
        MergeConfig {
            precision: default_precision(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_exponent_width")]
    pub exponent_width: usize,
    #[serde(default = "default_exponent_precision")]
    pub exponent_precision: usize,
    #[serde(default = "default_coefficient_width")]
    pub coefficient_width: usize,
    #[serde(default = "default_coefficient_precision")]
    pub coefficient_precision: usize,
}

impl OutputConfig {
    pub fn layout(&self) -> Layout {
        Layout {
            exponent: FieldFormat::new(self.exponent_width, self.exponent_precision),
            coefficient: FieldFormat::new(self.coefficient_width, self.coefficient_precision),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            exponent_width: default_exponent_width(),
            exponent_precision: default_exponent_precision(),
            coefficient_width: default_coefficient_width(),
            coefficient_precision: default_coefficient_precision(),
        }
    }
}
