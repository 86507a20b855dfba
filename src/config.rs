use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the worker pool runs its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    Serial,
    #[serde(alias = "multiprocessing")]
    Multithreading,
}

impl FromStr for ExecutionMode {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "serial" | "none" => Ok(ExecutionMode::Serial),
            "multithreading" | "multiprocessing" => Ok(ExecutionMode::Multithreading),
            _ => Err(eyre::eyre!("Unknown execution mode: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionParams {
    pub max_variants_per_compound: usize,
    /// Effort knob forwarded to variant selection.
    pub thoroughness: usize,
    /// Zero means one worker per available core.
    pub num_workers: usize,
    pub mode: ExecutionMode,
    pub seed: u64,
}

impl Default for ConversionParams {
    fn default() -> Self {
        Self {
            max_variants_per_compound: 5,
            thoroughness: 3,
            num_workers: 0,
            mode: ExecutionMode::Multithreading,
            seed: 0,
        }
    }
}

impl ConversionParams {
    pub fn from_json_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let params: ConversionParams = serde_json::from_str(&contents)?;
        params.validate()?;
        Ok(params)
    }

    /// Seed in the signed form embedders take.
    pub fn embedding_seed(&self) -> eyre::Result<i64> {
        i64::try_from(self.seed)
            .map_err(|_| eyre::eyre!("seed {} does not fit in an i64", self.seed))
    }

    pub fn validate(&self) -> eyre::Result<()> {
        if self.max_variants_per_compound == 0 {
            return Err(eyre::eyre!("max_variants_per_compound must be at least 1"));
        }
        if self.thoroughness == 0 {
            return Err(eyre::eyre!("thoroughness must be at least 1"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_takes_defaults() {
        let params: ConversionParams =
            serde_json::from_str(r#"{"max_variants_per_compound": 2, "mode": "multiprocessing"}"#)
                .unwrap();

        assert_eq!(params.max_variants_per_compound, 2);
        assert_eq!(params.thoroughness, 3);
        assert_eq!(params.mode, ExecutionMode::Multithreading);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("Serial".parse::<ExecutionMode>().unwrap(), ExecutionMode::Serial);
        assert_eq!(
            "multithreading".parse::<ExecutionMode>().unwrap(),
            ExecutionMode::Multithreading
        );
        assert!("gpu".parse::<ExecutionMode>().is_err());
    }

    #[test]
    fn test_embedding_seed_rejects_overflow() {
        let mut params = ConversionParams {
            seed: 42,
            ..ConversionParams::default()
        };
        assert_eq!(params.embedding_seed().unwrap(), 42);

        params.seed = u64::MAX;
        assert!(params.embedding_seed().is_err());
    }

    #[test]
    fn test_validate() {
        let mut params = ConversionParams::default();
        assert!(params.validate().is_ok());

        params.max_variants_per_compound = 0;
        assert!(params.validate().is_err());
    }
}
