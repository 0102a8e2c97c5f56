use thiserror::Error;

pub const SEED_VAR: &str = "SWAPPER_SEED";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SWAPPER_SEED must be an unsigned 64-bit integer, got {value:?}")]
    InvalidSeed { value: String },
}

/// Runtime settings taken from the environment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Pins the priority stream. Unset means entropy seeding.
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let seed = match lookup(SEED_VAR) {
            Some(value) => {
                let parsed = value.trim().parse::<u64>();
                Some(parsed.map_err(|_| ConfigError::InvalidSeed { value })?)
            }
            None => None,
        };
        Ok(Self { seed })
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, ConfigError, SEED_VAR};

    #[test]
    fn unset_seed_means_entropy() {
        assert_eq!(Config::from_lookup(|_| None), Ok(Config { seed: None }));
    }

    #[test]
    fn seed_is_parsed() {
        let config = Config::from_lookup(|key| (key == SEED_VAR).then(|| " 1234 ".to_string()));
        assert_eq!(config, Ok(Config { seed: Some(1234) }));
    }

    #[test]
    fn bad_seed_is_rejected() {
        let config = Config::from_lookup(|_| Some("-1".to_string()));
        assert_eq!(
            config,
            Err(ConfigError::InvalidSeed {
                value: "-1".to_string()
            })
        );
    }
}
