//! Simulation parameters and validation.
//!
//! The three disease sliders are user-facing values in [0, 1]. The
//! demographic model consumes them rescaled to [0, 2]; the `*_factor`
//! accessors are the only place that rescaling happens.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub width: u32,
    pub height: u32,

    pub initial_normal_adults: u32,
    pub initial_carrier_adults: u32,
    pub initial_sickle_adults: u32,
    pub initial_normal_children: u32,
    pub initial_carrier_children: u32,
    pub initial_sickle_children: u32,

    /// Soft population ceiling enforced by the overflow valve.
    pub carrying_capacity: u32,

    /// Slider in [0, 1].
    pub malaria_prevalence: f64,
    /// Slider in [0, 1].
    pub sickle_cell_deadliness: f64,
    /// Slider in [0, 1]. 1.0 means the heterozygous advantage fully
    /// cancels the carrier disease terms.
    pub heterozygous_advantage: f64,

    /// Adult age threshold for natural death.
    pub life_expectancy: u32,

    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            initial_normal_adults: 100,
            initial_carrier_adults: 100,
            initial_sickle_adults: 100,
            initial_normal_children: 0,
            initial_carrier_children: 0,
            initial_sickle_children: 0,
            carrying_capacity: 3000,
            malaria_prevalence: 0.5,
            sickle_cell_deadliness: 0.5,
            heterozygous_advantage: 0.5,
            life_expectancy: 70,
            seed: 42,
        }
    }
}

impl SimConfig {
    /// Reject out-of-range parameters before any tick runs.
    pub fn validate(&self) -> SimResult<()> {
        if self.width == 0 {
            return Err(SimError::ConfigOutOfRange { parameter: "width", value: 0.0 });
        }
        if self.height == 0 {
            return Err(SimError::ConfigOutOfRange { parameter: "height", value: 0.0 });
        }
        if self.carrying_capacity == 0 {
            return Err(SimError::ConfigOutOfRange {
                parameter: "carrying_capacity",
                value: 0.0,
            });
        }
        if self.life_expectancy == 0 {
            return Err(SimError::ConfigOutOfRange {
                parameter: "life_expectancy",
                value: 0.0,
            });
        }
        for (name, value) in [
            ("malaria_prevalence", self.malaria_prevalence),
            ("sickle_cell_deadliness", self.sickle_cell_deadliness),
            ("heterozygous_advantage", self.heterozygous_advantage),
        ] {
            if !(0.0..=1.0).contains(&value) || value.is_nan() {
                return Err(SimError::ConfigOutOfRange { parameter: name, value });
            }
        }
        Ok(())
    }

    /// Malaria prevalence rescaled to [0, 2].
    pub fn malaria_factor(&self) -> f64 {
        2.0 * self.malaria_prevalence
    }

    /// Sickle-cell deadliness rescaled to [0, 2].
    pub fn deadliness_factor(&self) -> f64 {
        2.0 * self.sickle_cell_deadliness
    }

    /// Heterozygous-advantage multiplier on the carrier disease terms,
    /// rescaled to [0, 2]. Inverted: a slider value of 1 removes the
    /// heterozygous terms entirely.
    pub fn advantage_factor(&self) -> f64 {
        2.0 * (1.0 - self.heterozygous_advantage)
    }

    /// Config with small hardcoded values for use in unit tests.
    pub fn default_test() -> Self {
        Self {
            width: 20,
            height: 20,
            initial_normal_adults: 30,
            initial_carrier_adults: 30,
            initial_sickle_adults: 30,
            carrying_capacity: 500,
            ..Self::default()
        }
    }
}
