//! Configuration for a generation run

use filmfact_domain::EntityKind;
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Settings for one generation run
///
/// Controls how many root entities to emit, which kind drives the
/// traversal, and how candidate enumeration behaves.
///
/// # Examples
///
/// ```
/// use filmfact_engine::GenerationConfig;
///
/// let config = GenerationConfig::default();
/// assert_eq!(config.quota, 10);
/// assert_eq!(config.max_refill_rounds, 64);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// How many root entities to accept before stopping
    /// Default: 10
    pub quota: usize,

    /// The entity kind the traversal starts from
    /// Default: Work
    #[serde(with = "kind_name")]
    pub root: EntityKind,

    /// Enumerate candidates in random order instead of by ascending ID
    /// Default: false
    #[serde(default)]
    pub random: bool,

    /// Upper bound on candidate-batch requests per run. A source that
    /// keeps replaying already-seen IDs would otherwise never terminate.
    /// Default: 64
    #[serde(default = "default_max_refill_rounds")]
    pub max_refill_rounds: usize,
}

fn default_max_refill_rounds() -> usize {
    64
}

/// The domain crate carries no serde dependency, so the kind crosses the
/// config boundary by name.
mod kind_name {
    use filmfact_domain::EntityKind;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(kind: &EntityKind, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(kind.fact_name())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<EntityKind, D::Error> {
        let name = String::deserialize(de)?;
        EntityKind::parse(&name)
            .ok_or_else(|| de::Error::custom(format!("unknown entity kind: {name}")))
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            quota: 10,
            root: EntityKind::Work,
            random: false,
            max_refill_rounds: default_max_refill_rounds(),
        }
    }
}

impl GenerationConfig {
    /// Reject configurations that could never produce output or never stop
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.quota == 0 {
            return Err(EngineError::Config("quota must be at least 1".into()));
        }
        if self.max_refill_rounds == 0 {
            return Err(EngineError::Config(
                "max_refill_rounds must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
