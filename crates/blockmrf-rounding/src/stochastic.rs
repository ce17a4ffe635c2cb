//! Independent Bernoulli rounding.

use blockmrf_config::RoundingConfig;
use blockmrf_core::error::Result;
use blockmrf_core::{ConstraintBlockerStore, ModelError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{RoundingReport, RoundingStrategy};

/// Sets each variable to `1.0` with probability equal to its current value.
///
/// Ignores ground rules entirely. With a fixed seed the outcome is
/// reproducible; otherwise the generator is seeded from OS entropy.
#[derive(Debug, Clone, Copy, Default)]
pub struct StochasticRounding {
    seed: Option<u64>,
}

impl StochasticRounding {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    pub fn from_config(config: &RoundingConfig) -> Self {
        Self::new(config.random_seed)
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

impl RoundingStrategy for StochasticRounding {
    fn round(&self, store: &ConstraintBlockerStore) -> Result<RoundingReport> {
        let model = store.model();
        let mut rng = self.rng();
        let mut ones = 0;

        for id in model.variable_ids() {
            let value = model.get(id).ok_or(ModelError::UnknownVariable(id))?;
            let u = rng.random::<f64>();
            if u <= value {
                model.set_value(id, 1.0)?;
                ones += 1;
            } else {
                model.set_value(id, 0.0)?;
            }
        }

        Ok(RoundingReport {
            rounded: model.variable_count(),
            ones,
            components: 0,
            violated_blocks: model.violated_blocks(),
        })
    }
}
