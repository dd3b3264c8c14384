//! Scenario configuration: root pair, split parameters, depth, sample size
//!
//! Loaded from a TOML file, with `SIMPSON_*` environment variables as
//! explicit overrides (e.g. `SIMPSON_DEPTH=6`,
//! `SIMPSON_PARAMETERS__A=0.3`). Compiled defaults reproduce the classic
//! drug-trial example.

use std::path::Path;

use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    column::approx, Column, DomainError, FixedPolicy, SiblingPair, SplitParameters,
};

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("serialize scenario: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("environment override: {0}")]
    Env(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// One root column in a scenario file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ColumnConfig {
    pub height: f64,
    pub width: f64,
}

/// The four split parameters in a scenario file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ParametersConfig {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

/// A complete scenario: what to generate and how deep.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Scenario {
    /// Root treatment column (recovery rate, population share)
    pub treatment: ColumnConfig,
    /// Root control column
    pub control: ColumnConfig,
    /// Split parameters, fixed across the tree
    pub parameters: ParametersConfig,
    /// Deepest layer to generate
    pub depth: usize,
    /// Total population for count realization
    pub sample_size: u64,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            treatment: ColumnConfig {
                height: 0.6,
                width: 0.5,
            },
            control: ColumnConfig {
                height: 0.4,
                width: 0.5,
            },
            parameters: ParametersConfig {
                a: 0.45,
                b: 0.55,
                c: 0.45,
                d: 0.55,
            },
            depth: 4,
            sample_size: 2000,
        }
    }
}

impl Scenario {
    /// Load a scenario with layered precedence: compiled defaults, then the
    /// optional TOML file, then `SIMPSON_*` environment variables.
    pub fn load(path: Option<&Path>) -> ScenarioResult<Self> {
        let mut scenario = match path {
            Some(p) => {
                let content =
                    std::fs::read_to_string(p).map_err(|source| ScenarioError::Read {
                        path: p.display().to_string(),
                        source,
                    })?;
                toml::from_str(&content).map_err(|source| ScenarioError::Parse {
                    path: p.display().to_string(),
                    source,
                })?
            }
            None => Self::default(),
        };
        scenario.apply_env_overrides()?;
        Ok(scenario)
    }

    /// Apply `SIMPSON_*` environment variables as explicit overrides.
    fn apply_env_overrides(&mut self) -> ScenarioResult<()> {
        let cfg = Config::builder()
            .add_source(Environment::with_prefix("SIMPSON").separator("__"))
            .build()?;

        if let Ok(v) = cfg.get_int("depth") {
            self.depth = v as usize;
        }
        if let Ok(v) = cfg.get_int("sample_size") {
            self.sample_size = v as u64;
        }
        if let Ok(v) = cfg.get_float("parameters.a") {
            self.parameters.a = v;
        }
        if let Ok(v) = cfg.get_float("parameters.b") {
            self.parameters.b = v;
        }
        if let Ok(v) = cfg.get_float("parameters.c") {
            self.parameters.c = v;
        }
        if let Ok(v) = cfg.get_float("parameters.d") {
            self.parameters.d = v;
        }
        Ok(())
    }

    /// The validated layer-0 pair. Root widths must sum to 1.0 so that layer
    /// widths stay a partition of the whole population.
    pub fn root_pair(&self) -> ScenarioResult<SiblingPair> {
        let total = self.treatment.width + self.control.width;
        if !approx(total, 1.0) {
            return Err(DomainError::InvalidParameters {
                reason: format!("root widths must sum to 1.0, got {total}"),
            }
            .into());
        }
        Ok(SiblingPair::new(
            Column::new(self.treatment.height, self.treatment.width)?,
            Column::new(self.control.height, self.control.width)?,
        ))
    }

    /// The validated fixed parameter policy.
    pub fn policy(&self) -> ScenarioResult<FixedPolicy> {
        let params = SplitParameters::new(
            self.parameters.a,
            self.parameters.b,
            self.parameters.c,
            self.parameters.d,
        )?;
        Ok(FixedPolicy::new(params))
    }

    /// Show the effective scenario as TOML.
    pub fn to_toml(&self) -> ScenarioResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Generate a commented template scenario file.
    pub fn template() -> String {
        r#"# simpson-tree scenario
#
# All fields are optional; omitted fields fall back to the classic
# drug-trial defaults. SIMPSON_* environment variables override the file
# (SIMPSON_DEPTH, SIMPSON_SAMPLE_SIZE, SIMPSON_PARAMETERS__A, ...).

# Deepest layer to generate (layer k holds 2^k pairs)
# depth = 4

# Total population for `simpson data`
# sample_size = 2000

# Root recovery rates and population shares; widths must sum to 1.0
# [treatment]
# height = 0.6
# width = 0.5

# [control]
# height = 0.4
# width = 0.5

# Split parameters: each in (0, 1), a < b and c < d
# [parameters]
# a = 0.45
# b = 0.55
# c = 0.45
# d = 0.55
"#
        .to_string()
    }
}
