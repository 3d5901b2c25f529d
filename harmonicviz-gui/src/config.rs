//! Runtime settings for the GUI.
//!
//! Defaults can be overridden through environment variables:
//! - `HARMONICVIZ_GAIN` - tone amplitude, 0.0 to 1.0
//! - `HARMONICVIZ_TICK_MS` - animation tick interval in milliseconds
//!
//! Log filtering uses the usual `RUST_LOG`.

use std::str::FromStr;
use std::time::Duration;

const GAIN_VAR: &str = "HARMONICVIZ_GAIN";
const TICK_VAR: &str = "HARMONICVIZ_TICK_MS";

#[derive(Debug, Clone, PartialEq)]
pub struct GuiConfig {
    /// Interval between animation ticks (16 ms is about 60 FPS)
    pub tick_interval: Duration,
    /// Amplitude of the sine tone
    pub tone_gain: f32,
    /// Peak displacement of the drawn string, in pixels
    pub string_amplitude: f64,
    /// Preferred output sample rate
    pub sample_rate: u32,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(16),
            tone_gain: 0.3,
            string_amplitude: 8.0,
            sample_rate: 44_100,
        }
    }
}

impl GuiConfig {
    /// Defaults with overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(gain) = parse_var::<f32>(&lookup, GAIN_VAR) {
            config.tone_gain = gain.clamp(0.0, 1.0);
        }
        if let Some(ms) = parse_var::<u64>(&lookup, TICK_VAR) {
            config.tick_interval = Duration::from_millis(ms.max(1));
        }

        config
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable setting");
            None
        }
    }
}
