//! Fatigue level → stimulation pulse parameters.
//!
//! Only the parameters are computed here; driving the stimulator output
//! stage is outside the firmware core.

use super::fatigue::FatigueLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StimulationParams {
    /// Pulse amplitude (mA).
    pub amplitude_ma: u16,
    /// Pulse width (µs).
    pub pulse_width_us: u16,
    /// Pulse repetition frequency (Hz).
    pub frequency_hz: u16,
}

impl StimulationParams {
    /// Output disabled.
    pub const OFF: Self = Self::new(0, 0, 0);

    pub const fn new(amplitude_ma: u16, pulse_width_us: u16, frequency_hz: u16) -> Self {
        Self {
            amplitude_ma,
            pulse_width_us,
            frequency_hz,
        }
    }

    pub fn is_off(&self) -> bool {
        *self == Self::OFF
    }
}

/// Keyed by fatigue level code.  Amplitude and frequency are fixed; pulse
/// width grows with fatigue.
const STIMULATION_TABLE: [(u8, StimulationParams); 6] = [
    (0, StimulationParams::new(10, 100, 25)),
    (1, StimulationParams::new(10, 120, 25)),
    (2, StimulationParams::new(10, 140, 25)),
    (4, StimulationParams::new(10, 160, 25)),
    (8, StimulationParams::new(10, 180, 25)),
    (10, StimulationParams::new(10, 200, 25)),
];

/// Look up a raw level code.  Unknown codes map to [`StimulationParams::OFF`].
pub fn params_for_code(code: u8) -> StimulationParams {
    STIMULATION_TABLE
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(StimulationParams::OFF, |&(_, p)| p)
}

pub fn params_for(level: FatigueLevel) -> StimulationParams {
    params_for_code(level.code())
}
