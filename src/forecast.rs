//! The fixed cities and weather conditions, and the [`Reading`] produced for each city.

use std::{fmt::Display, time::Duration};

use once_cell::sync::Lazy;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Cities a reading is printed for, in print order.
pub const CITIES: [&str; 5] = ["Tehran", "Shiraz", "Mashhad", "Isfahan", "Tabriz"];

/// Inclusive lower bound of a generated temperature (°C).
pub const MIN_TEMPERATURE: i32 = -5;
/// Inclusive upper bound of a generated temperature (°C).
pub const MAX_TEMPERATURE: i32 = 40;

/// Pause after each printed reading.
pub const READING_DELAY: Duration = Duration::from_millis(500);

/// First line of output, followed by a blank line.
pub const HEADER: &str = "🌍 Simple Weather Forecast Program";

/// A weather condition, rendered as a glyph followed by a word.
#[derive(EnumIter, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    /// `☀ Sunny`
    Sunny,
    /// `🌧 Rainy`
    Rainy,
    /// `⛅ Cloudy`
    Cloudy,
    /// `🌩 Stormy`
    Stormy,
    /// `❄ Snowy`
    Snowy,
}

static CONDITION_VARIANTS: Lazy<Vec<Condition>> = Lazy::new(|| Condition::iter().collect());

impl Condition {
    /// Enumerate all variants of [`Condition`], in list order.
    #[must_use]
    pub fn enumerate() -> &'static [Condition] {
        CONDITION_VARIANTS.as_slice()
    }

    /// The glyph and word for this condition, e.g. `☀ Sunny`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Condition::Sunny => "☀ Sunny",
            Condition::Rainy => "🌧 Rainy",
            Condition::Cloudy => "⛅ Cloudy",
            Condition::Stormy => "🌩 Stormy",
            Condition::Snowy => "❄ Snowy",
        }
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One city's generated weather, rendered to a single output line and then discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reading {
    /// Name of the city, one of [`CITIES`].
    pub city: &'static str,
    /// Randomly selected condition.
    pub condition: Condition,
    /// Randomly selected temperature in °C, within
    /// [`MIN_TEMPERATURE`]`..=`[`MAX_TEMPERATURE`].
    pub temperature: i32,
}

impl Display for Reading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} | 🌡 Temp: {}°C",
            self.city, self.condition, self.temperature
        )
    }
}
