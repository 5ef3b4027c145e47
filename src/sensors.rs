//! Sensor conditioning for the LM35 temperature sensor and gas detector.

use crate::config::{ADC_FULL_SCALE_VOLTS, ADC_MAX_COUNTS, LM35_AVERAGE_SAMPLES};
use crate::hal::SensorReadings;

/// LM35 output: 10 mV per °C.
const LM35_VOLTS_PER_DEGREE: f32 = 0.01;

/// Convert a raw SAADC count to degrees Celsius.
pub fn lm35_celsius(raw: i16) -> f32 {
    let volts = f32::from(raw.max(0)) * ADC_FULL_SCALE_VOLTS / ADC_MAX_COUNTS;
    volts / LM35_VOLTS_PER_DEGREE
}

/// Moving average over the last `LM35_AVERAGE_SAMPLES` readings.
pub struct TemperatureFilter {
    samples: [f32; LM35_AVERAGE_SAMPLES],
    next: usize,
    filled: usize,
}

impl TemperatureFilter {
    pub const fn new() -> Self {
        Self {
            samples: [0.0; LM35_AVERAGE_SAMPLES],
            next: 0,
            filled: 0,
        }
    }

    pub fn push(&mut self, raw: i16) {
        self.samples[self.next] = lm35_celsius(raw);
        self.next = (self.next + 1) % LM35_AVERAGE_SAMPLES;
        if self.filled < LM35_AVERAGE_SAMPLES {
            self.filled += 1;
        }
    }

    /// Average of the samples seen so far, 0 °C before the first one.
    pub fn celsius(&self) -> f32 {
        if self.filled == 0 {
            return 0.0;
        }
        let sum: f32 = self.samples[..self.filled].iter().sum();
        sum / self.filled as f32
    }
}

impl Default for TemperatureFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Sensor values sampled once at the start of a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Readings {
    pub temperature_c: f32,
    pub gas: bool,
}

impl Readings {
    pub const fn new(temperature_c: f32, gas: bool) -> Self {
        Self { temperature_c, gas }
    }
}

impl SensorReadings for Readings {
    fn temperature_celsius(&mut self) -> f32 {
        self.temperature_c
    }

    fn gas_detected(&mut self) -> bool {
        self.gas
    }
}
