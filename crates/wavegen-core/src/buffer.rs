//! DAC sample buffer and quantization.
//!
//! Samples are stored as unsigned 16-bit DAC codes: a 12-bit converter value
//! left-aligned in a 16-bit field, so full scale is [`Q_MAX`] (`0xFFF0`).
//! A code maps to a signed unit-interval value with
//!
//! ```text
//! value = 2 * code / Q_MAX - 1        (decode)
//! code  = trunc((value + 1) / 2 * Q_MAX)  (encode, after clipping to [-1, 1])
//! ```
//!
//! Encoding truncates toward zero. Round-to-nearest would produce different
//! codes, so it must not be substituted.

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::{Error, Result};

/// DAC full-scale code.
pub const Q_MAX: u16 = 0xFFF0;

/// Code for a signal value of `0.0`.
pub const MID_SCALE: u16 = Q_MAX / 2;

/// Default buffer capacity in samples.
pub const DEFAULT_CAPACITY: usize = 250_000;

/// Clip a value to the unit interval `[-1.0, 1.0]`.
///
/// NaN maps to `0.0` so a degenerate generator output lands on silence.
#[inline]
pub fn clip_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

/// Convert a signal value to a DAC code, clipping first.
#[inline]
pub fn encode(value: f64) -> u16 {
    ((clip_unit(value) + 1.0) / 2.0 * f64::from(Q_MAX)) as u16
}

/// Convert a DAC code back to a signal value.
#[inline]
pub fn decode(code: u16) -> f64 {
    2.0 * f64::from(code) / f64::from(Q_MAX) - 1.0
}

/// Fixed-capacity buffer of DAC codes with an adjustable active length.
///
/// The backing storage is allocated once and never reallocated; resizing only
/// moves the active length. New buffers are zero-filled, which decodes to
/// `-1.0`; call [`clear`](Self::clear) to bring them to silence.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: Vec<u16>,
    active_len: usize,
}

impl Default for SampleBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl SampleBuffer {
    /// Create a zero-filled buffer. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: vec![0; capacity],
            active_len: capacity,
        }
    }

    /// Maximum number of samples the buffer can hold.
    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Number of samples currently streamed to the DAC.
    pub fn active_len(&self) -> usize {
        self.active_len
    }

    /// Set the active length.
    ///
    /// # Errors
    ///
    /// [`Error::BufferSizeOutOfRange`] unless `1 <= len <= capacity`; the
    /// active length is left unchanged.
    pub fn set_active_len(&mut self, len: usize) -> Result<()> {
        if len == 0 || len > self.capacity() {
            return Err(Error::BufferSizeOutOfRange {
                requested: len as i64,
                capacity: self.capacity(),
            });
        }
        self.active_len = len;
        Ok(())
    }

    /// Restore the active length to the full capacity.
    pub fn reset_active_len(&mut self) {
        self.active_len = self.capacity();
    }

    /// The active region, as handed to the playback engine.
    pub fn active(&self) -> &[u16] {
        &self.samples[..self.active_len]
    }

    /// Code at `index`, or `None` past the capacity.
    pub fn get(&self, index: usize) -> Option<u16> {
        self.samples.get(index).copied()
    }

    /// Decoded signal value at `index`.
    pub fn value(&self, index: usize) -> Option<f64> {
        self.get(index).map(decode)
    }

    /// Overwrite `index` with the clipped encoding of `value`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    #[inline]
    pub fn encode_absolute(&mut self, index: usize, value: f64) -> u16 {
        let code = encode(value);
        self.samples[index] = code;
        code
    }

    /// Mix `delta` into the sample at `index`.
    ///
    /// The existing code is decoded, `delta` is added and the sum is clipped
    /// before re-encoding, so two in-range sources can still overload. A NaN
    /// sum leaves the sample as it was.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    #[inline]
    pub fn encode_additive(&mut self, index: usize, delta: f64) -> u16 {
        let sum = decode(self.samples[index]) + delta;
        if sum.is_nan() {
            return self.samples[index];
        }
        self.encode_absolute(index, sum)
    }

    /// Set every active sample to silence.
    pub fn clear(&mut self) {
        for index in 0..self.active_len {
            self.encode_absolute(index, 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_endpoints() {
        assert_eq!(encode(-1.0), 0);
        assert_eq!(encode(1.0), Q_MAX);
        assert_eq!(encode(0.0), MID_SCALE);
    }

    #[test]
    fn encode_clips_out_of_range() {
        assert_eq!(encode(7.5), Q_MAX);
        assert_eq!(encode(-3.0), 0);
        assert_eq!(encode(f64::NAN), MID_SCALE);
    }

    #[test]
    fn encode_truncates() {
        // 0.75 * 65520 = 49140 exactly; nudging down must not round up
        assert_eq!(encode(0.5), 49140);
        assert_eq!(encode(0.499_999_9), 49139);
    }

    #[test]
    fn decode_endpoints() {
        assert_eq!(decode(0), -1.0);
        assert_eq!(decode(Q_MAX), 1.0);
        assert_eq!(decode(MID_SCALE), 0.0);
    }

    #[test]
    fn new_buffer_is_zero_filled_and_full_length() {
        let buf = SampleBuffer::new(64);
        assert_eq!(buf.capacity(), 64);
        assert_eq!(buf.active_len(), 64);
        assert!(buf.active().iter().all(|&s| s == 0));
    }

    #[test]
    fn zero_capacity_is_raised() {
        assert_eq!(SampleBuffer::new(0).capacity(), 1);
    }

    #[test]
    fn set_active_len_bounds() {
        let mut buf = SampleBuffer::new(100);
        assert!(buf.set_active_len(0).is_err());
        assert!(buf.set_active_len(101).is_err());
        assert_eq!(buf.active_len(), 100);

        buf.set_active_len(1).unwrap();
        assert_eq!(buf.active_len(), 1);
        buf.set_active_len(100).unwrap();
        assert_eq!(buf.active_len(), 100);
    }

    #[test]
    fn clear_only_touches_active_region() {
        let mut buf = SampleBuffer::new(10);
        buf.set_active_len(4).unwrap();
        buf.clear();
        assert!(buf.active().iter().all(|&s| s == MID_SCALE));
        assert_eq!(buf.get(4), Some(0));
        assert_eq!(buf.get(9), Some(0));
    }

    #[test]
    fn additive_mixing_sums_then_clips() {
        let mut buf = SampleBuffer::new(1);
        buf.clear();
        buf.encode_additive(0, 0.6);
        buf.encode_additive(0, 0.6);
        assert_eq!(buf.get(0), Some(Q_MAX));

        buf.encode_additive(0, -0.5);
        let v = buf.value(0).unwrap();
        assert!((v - 0.5).abs() < 1e-4, "got {v}");
    }

    #[test]
    fn additive_large_delta_clips_sum_not_delta() {
        let mut buf = SampleBuffer::new(1);
        buf.encode_absolute(0, -1.0);
        // -1.0 + 1.5 = 0.5, the delta itself is not pre-clipped
        buf.encode_additive(0, 1.5);
        let v = buf.value(0).unwrap();
        assert!((v - 0.5).abs() < 1e-4, "got {v}");
    }

    #[test]
    fn additive_nan_delta_keeps_sample() {
        let mut buf = SampleBuffer::new(1);
        buf.encode_absolute(0, 0.5);
        let before = buf.get(0);
        buf.encode_additive(0, f64::NAN);
        assert_eq!(buf.get(0), before);
    }

    #[test]
    fn get_past_capacity_is_none() {
        let buf = SampleBuffer::new(3);
        assert_eq!(buf.get(3), None);
        assert_eq!(buf.value(3), None);
    }
}
