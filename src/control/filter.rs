//! Single-pole IIR low-pass filter + block average.
//!
//! `y[0] = x[0]`, `y[i] = α·y[i-1] + (1-α)·x[i]` with
//! `α = 1 / (1 + RC·Fs)` and `RC = 1 / (2π·Fc)`.
//!
//! The recurrence is evaluated as `y[i-1] + (1-α)(x[i] - y[i-1])`, which
//! is algebraically identical but keeps a constant input exactly constant
//! (no rounding drift, so a flat window averages to its own value).

use core::f32::consts::PI;

use heapless::Vec;

use crate::error::SignalError;

/// Largest window the filter buffer can hold.
pub const FILTER_CAPACITY: usize = 1000;

pub const DEFAULT_CUTOFF_HZ: f32 = 70.0;
pub const DEFAULT_SAMPLE_RATE_HZ: f32 = 1000.0;

/// Smoothing factor for a first-order RC low-pass.
pub fn smoothing_alpha(cutoff_hz: f32, sample_rate_hz: f32) -> f32 {
    let rc = 1.0 / (2.0 * PI * cutoff_hz);
    1.0 / (1.0 + rc * sample_rate_hz)
}

pub struct SignalConditioner<const CAP: usize = FILTER_CAPACITY> {
    alpha: f32,
    /// Filtered copy of the last processed window.
    filtered: Vec<f32, CAP>,
}

impl<const CAP: usize> SignalConditioner<CAP> {
    pub fn new(cutoff_hz: f32, sample_rate_hz: f32) -> Self {
        Self {
            alpha: smoothing_alpha(cutoff_hz, sample_rate_hz),
            filtered: Vec::new(),
        }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Filtered series from the most recent successful call.
    pub fn filtered(&self) -> &[f32] {
        &self.filtered
    }

    /// Low-pass the window and return the truncated mean of the filtered
    /// series.  Oversized or empty input is rejected before the buffer is
    /// touched.
    pub fn filter_and_average(&mut self, samples: &[i32]) -> Result<i32, SignalError> {
        if samples.len() > CAP {
            return Err(SignalError::Overflow {
                count: samples.len(),
                capacity: CAP,
            });
        }
        let Some(&first) = samples.first() else {
            return Err(SignalError::EmptyWindow);
        };

        let gain = 1.0 - self.alpha;
        let mut y = first as f32;
        let mut sum = 0.0_f64;

        self.filtered.clear();
        for (i, &x) in samples.iter().enumerate() {
            if i > 0 {
                y += gain * (x as f32 - y);
            }
            // Length already checked against CAP.
            let _ = self.filtered.push(y);
            sum += f64::from(y);
        }

        Ok((sum / samples.len() as f64) as i32)
    }
}

impl Default for SignalConditioner<FILTER_CAPACITY> {
    fn default() -> Self {
        Self::new(DEFAULT_CUTOFF_HZ, DEFAULT_SAMPLE_RATE_HZ)
    }
}
