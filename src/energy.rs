//! # Energy Module
//!
//! Converts aggregated token usage into energy, CO2 and tree-day estimates.
//!
//! ## Cost Structure
//!
//! - Input, output, reasoning and cache-creation tokens cost the full
//!   per-token energy of the model's category
//! - Cache reads cost `cache_read_factor` (1%) of that, being memory
//!   retrieval rather than fresh computation
//!
//! Constants can be overridden via environment variables:
//! - `CCWATT_CACHE_READ_FACTOR`
//! - `CCWATT_CO2_PER_KWH` (kg CO2 per kWh)
//! - `CCWATT_TREE_CO2_KG_PER_YEAR` (kg CO2 absorbed by one tree per year)

use crate::classify::classify;
use crate::models::{EnergyResult, TokenUsage};
use crate::utils::parse_f64_env;

pub const CACHE_READ_ENERGY_FACTOR: f64 = 0.01;
/// Global average grid intensity, kg CO2 per kWh
pub const CO2_PER_KWH_KG: f64 = 0.5;
pub const CO2_PER_TREE_PER_YEAR_KG: f64 = 14.0;

/// Tunable constants of the energy model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyModel {
    pub cache_read_factor: f64,
    pub co2_kg_per_kwh: f64,
    pub tree_co2_kg_per_year: f64,
}

impl Default for EnergyModel {
    fn default() -> Self {
        Self {
            cache_read_factor: CACHE_READ_ENERGY_FACTOR,
            co2_kg_per_kwh: CO2_PER_KWH_KG,
            tree_co2_kg_per_year: CO2_PER_TREE_PER_YEAR_KG,
        }
    }
}

impl EnergyModel {
    /// Defaults with any valid `CCWATT_*` overrides applied.
    /// Negative values are ignored, and so is a zero tree absorption rate.
    pub fn from_env() -> Self {
        let mut model = Self::default();
        if let Some(v) = parse_f64_env("CCWATT_CACHE_READ_FACTOR").filter(|v| *v >= 0.0) {
            model.cache_read_factor = v;
        }
        if let Some(v) = parse_f64_env("CCWATT_CO2_PER_KWH").filter(|v| *v >= 0.0) {
            model.co2_kg_per_kwh = v;
        }
        if let Some(v) = parse_f64_env("CCWATT_TREE_CO2_KG_PER_YEAR").filter(|v| *v > 0.0) {
            model.tree_co2_kg_per_year = v;
        }
        model
    }

    /// Grams of CO2 a single tree absorbs per day
    pub fn tree_grams_per_day(&self) -> f64 {
        (self.tree_co2_kg_per_year * 1000.0) / 365.0
    }
}

/// Estimate with the default constants.
pub fn calculate_energy(usage: &TokenUsage) -> EnergyResult {
    calculate_energy_with(usage, &EnergyModel::default())
}

/// Estimate energy, CO2 and tree-days for `usage`. No rounding is applied.
pub fn calculate_energy_with(usage: &TokenUsage, model: &EnergyModel) -> EnergyResult {
    let cache_tokens = usage.cache_tokens();
    let total_tokens = usage.total_tokens();

    let base = classify(&usage.model).energy_per_token();

    let compute_energy = usage.compute_tokens() as f64 * base;
    let cache_read_energy = usage.cache_read_tokens as f64 * base * model.cache_read_factor;
    let energy_wh = compute_energy + cache_read_energy;

    let co2_kg = (energy_wh / 1000.0) * model.co2_kg_per_kwh;
    let co2_grams = co2_kg * 1000.0;
    let tree_days = co2_grams / model.tree_grams_per_day();

    EnergyResult {
        total_tokens,
        input_tokens: usage.input_tokens,
        output_tokens: usage.output_tokens,
        cache_tokens,
        reasoning_tokens: usage.reasoning_tokens,
        energy_wh,
        co2_grams,
        tree_days,
        model: usage.model.clone(),
        provider: usage.provider.clone(),
    }
}
