//! Appliance energy and CO2 savings accounting.

use std::collections::BTreeMap;

/// Average appliance power draw lookup (kWh per hour of runtime).
///
/// Injected into the optimizer and schedule validator rather than read from
/// a process-wide table. Unknown appliance names fall back to a nominal
/// draw instead of erroring, so free-form appliance labels from the client
/// still produce an estimate.
#[derive(Debug, Clone)]
pub struct AppliancePowerTable {
    draws: BTreeMap<String, f64>,
    default_draw_kwh: f64,
}

impl Default for AppliancePowerTable {
    fn default() -> Self {
        let draws = [
            ("washer", 0.5),
            ("dryer", 3.0),
            ("dishwasher", 1.8),
            ("ev_charger", 7.2),
            ("oven", 2.3),
            ("microwave", 1.2),
            ("refrigerator", 0.1),
            ("ac", 1.5),
            ("heater", 1.5),
            ("water_heater", 4.0),
        ]
        .into_iter()
        .map(|(name, draw)| (name.to_string(), draw))
        .collect();

        Self {
            draws,
            default_draw_kwh: 1.0,
        }
    }
}

impl AppliancePowerTable {
    pub fn new(draws: BTreeMap<String, f64>, default_draw_kwh: f64) -> Self {
        Self {
            draws,
            default_draw_kwh,
        }
    }

    /// Power draw for an appliance in kWh per hour; unknown names get the
    /// default draw.
    pub fn power_draw(&self, appliance: &str) -> f64 {
        self.draws
            .get(appliance)
            .copied()
            .unwrap_or(self.default_draw_kwh)
    }

    /// Combined draw of a set of appliances in kWh per hour.
    pub fn total_draw(&self, appliances: &[String]) -> f64 {
        appliances.iter().map(|a| self.power_draw(a)).sum()
    }

    /// Estimated CO2 savings in kg for running the appliances for
    /// `duration_hours` at the given carbon intensity.
    pub fn savings_kg(
        &self,
        carbon_intensity: f64,
        appliances: &[String],
        duration_hours: f64,
    ) -> f64 {
        let total_kwh = self.total_draw(appliances) * duration_hours;
        carbon_intensity * total_kwh / 1000.0
    }
}

/// Share of the load covered by renewables, as a percentage.
/// Zero when the load is not positive.
pub fn renewable_percentage(load_mw: f64, renewable_mw: f64) -> f64 {
    if load_mw > 0.0 {
        renewable_mw / load_mw * 100.0
    } else {
        0.0
    }
}
