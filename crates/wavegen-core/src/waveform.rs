//! Waveform catalog.
//!
//! Each [`Waveform`] produces one value per position within a cycle of
//! `samples_per_cycle` buffer entries, at unit amplitude. The catalog order in
//! [`WAVEFORMS`] is significant: lookups resolve abbreviations to the first
//! matching entry, and the first entry is the default for implicit `add`.

use core::f64::consts::PI;
use libm::sin;

use crate::args::matches_prefix;

/// Periodic waveform shapes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Waveform {
    /// `sin(2π·n/N)`.
    #[default]
    Sine,
    /// Unipolar ramp `n/N`, rising from 0 toward 1 each cycle.
    Sawtooth,
    /// `+1` for the first half-cycle, `-1` for the second.
    Square,
    /// Linear rise from -1 to +1 over the first half-cycle, then back down.
    Triangle,
}

/// All waveforms in lookup order.
pub const WAVEFORMS: [Waveform; 4] = [
    Waveform::Sine,
    Waveform::Sawtooth,
    Waveform::Square,
    Waveform::Triangle,
];

impl Waveform {
    /// Display name, as listed by `help`.
    pub const fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "Sine",
            Waveform::Sawtooth => "Sawtooth",
            Waveform::Square => "Square",
            Waveform::Triangle => "Triangle",
        }
    }

    /// Resolve a typed abbreviation, first match in catalog order.
    ///
    /// ```rust
    /// use wavegen_core::Waveform;
    ///
    /// assert_eq!(Waveform::lookup("s"), Some(Waveform::Sine));
    /// assert_eq!(Waveform::lookup("SQ"), Some(Waveform::Square));
    /// assert_eq!(Waveform::lookup("5k"), None);
    /// ```
    pub fn lookup(token: &str) -> Option<Self> {
        WAVEFORMS
            .iter()
            .copied()
            .find(|w| matches_prefix(w.name(), token))
    }

    /// Unit-amplitude value at position `n` of a `samples_per_cycle` cycle.
    ///
    /// `samples_per_cycle` must be non-zero. Triangle divides by a quarter
    /// cycle in integer samples, floored at one for cycles shorter than four.
    pub fn value_at(self, n: u32, samples_per_cycle: u32) -> f64 {
        let n_f = f64::from(n);
        let cycle = f64::from(samples_per_cycle);
        let half = samples_per_cycle / 2;

        match self {
            Waveform::Sine => sin(n_f / cycle * 2.0 * PI),
            Waveform::Sawtooth => n_f / cycle,
            Waveform::Square => {
                if n < half {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => {
                let quarter = f64::from((samples_per_cycle / 4).max(1));
                if n < half {
                    n_f / quarter - 1.0
                } else {
                    -(n_f / quarter - 3.0)
                }
            }
        }
    }
}
