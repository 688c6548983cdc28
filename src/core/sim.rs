//! Simulated outcomes. No I/O; only temperature and humidity are random.

use rand::Rng;

use super::action::{Action, COMMAND_KEY, Verb};

pub const TEMPERATURE_RANGE: (f32, f32) = (20.0, 30.0);
pub const HUMIDITY_RANGE: (f32, f32) = (40.0, 60.0);

/// Produces the simulated outcome text using the thread-local RNG.
pub fn simulate(action: &Action) -> String {
    simulate_with(action, &mut rand::rng())
}

pub fn simulate_with<R: Rng + ?Sized>(action: &Action, rng: &mut R) -> String {
    match action.verb {
        Verb::Get => match action.key.as_str() {
            "temperature" => {
                let v = rng.random_range(TEMPERATURE_RANGE.0..=TEMPERATURE_RANGE.1);
                format!("Temp {v:.1} °C (sim)")
            }
            "humidity" => {
                let v = rng.random_range(HUMIDITY_RANGE.0..=HUMIDITY_RANGE.1);
                format!("Humidity {v:.1}% (sim)")
            }
            COMMAND_KEY => "✓ Simulated command success".to_string(),
            other => format!("Fetched {other} (sim)"),
        },
        Verb::Post => match action.key.as_str() {
            "light" => {
                let body = action.body.as_deref().unwrap_or_default();
                if body.contains("on") {
                    "Light switched ON (sim)".to_string()
                } else {
                    "Light switched OFF (sim)".to_string()
                }
            }
            other => format!("Posted {other} (sim)"),
        },
    }
}
