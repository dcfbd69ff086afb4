//! Parameter descriptors for the envelope stages.
//!
//! Every stage parameter lives in two spaces:
//!
//! - **plain**: the value the synth engine sees (seconds for the time stages,
//!   a 0–1 level for sustain)
//! - **normalized**: the `[0.0, 1.0]` proportion used by knobs and by the
//!   envelope graph geometry
//!
//! [`ParamDescriptor`] owns the mapping between the two, including the skew
//! curve that gives time parameters more resolution at the short end.
//!
//! # Example
//!
//! ```rust
//! use contour_core::{ParamDescriptor, ParamScale, ParamUnit};
//!
//! let attack = ParamDescriptor::seconds("Attack", "A", 0.001, 10.0, 0.03)
//!     .with_scale(ParamScale::from_mid_point(0.001, 10.0, 1.0));
//!
//! // The mid point sits in the middle of the knob travel
//! assert!((attack.normalize(1.0) - 0.5).abs() < 1e-4);
//! assert_eq!(attack.unit, ParamUnit::Seconds);
//! ```

#[cfg(not(feature = "std"))]
use alloc::{format, string::String};

/// Skew applied between the linear position in the range and the normalized value.
///
/// For `Power(exp)`, `normalized = linear^(1/exp)` and `linear = normalized^exp`,
/// where `linear = (value - min) / (max - min)`. An exponent above 1 spreads
/// the low end of the range over more of the knob travel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParamScale {
    /// No skew.
    #[default]
    Linear,
    /// Power skew with the given exponent.
    Power(f32),
}

impl ParamScale {
    /// Power curve that places `mid` at normalized 0.5.
    ///
    /// Solves `((mid - min) / (max - min))^(1/exp) = 0.5` for `exp`. Falls back
    /// to [`ParamScale::Linear`] when `mid` is not strictly inside the range.
    ///
    /// ```rust
    /// use contour_core::ParamScale;
    ///
    /// assert_eq!(ParamScale::from_mid_point(0.0, 1.0, 0.5), ParamScale::Power(1.0));
    /// assert_eq!(ParamScale::from_mid_point(0.0, 1.0, 2.0), ParamScale::Linear);
    /// ```
    pub fn from_mid_point(min: f32, max: f32, mid: f32) -> Self {
        let range = max - min;
        if range <= 0.0 || mid <= min || mid >= max {
            return Self::Linear;
        }
        let linear_mid = (mid - min) / range;
        Self::Power(libm::logf(linear_mid) / libm::logf(0.5))
    }

    /// Linear position in the range to normalized value.
    fn skew(self, linear: f32) -> f32 {
        match self {
            Self::Linear => linear,
            Self::Power(exp) => libm::powf(linear, 1.0 / exp),
        }
    }

    /// Normalized value to linear position in the range.
    fn unskew(self, normalized: f32) -> f32 {
        match self {
            Self::Linear => normalized,
            Self::Power(exp) => libm::powf(normalized, exp),
        }
    }
}

/// Display unit of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Seconds (s) - attack, decay and release times.
    Seconds,

    /// No unit - levels and other dimensionless values.
    None,
}

impl ParamUnit {
    /// Suffix appended to formatted values.
    ///
    /// ```rust
    /// use contour_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Seconds.suffix(), " s");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Seconds => " s",
            ParamUnit::None => "",
        }
    }
}

/// Describes a single parameter's range, skew and display format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Attack").
    pub name: &'static str,

    /// Single-letter label shown above the stage knob (e.g., "A").
    pub short_name: &'static str,

    /// Display unit.
    pub unit: ParamUnit,

    /// Minimum allowed plain value.
    pub min: f32,

    /// Maximum allowed plain value.
    pub max: f32,

    /// Plain value used on initialization and double-click reset.
    pub default: f32,

    /// Decimal places shown in display text.
    pub decimals: usize,

    /// Skew between plain and normalized values.
    pub scale: ParamScale,
}

impl ParamDescriptor {
    /// Time parameter in seconds, three decimals, linear until a scale is set.
    pub const fn seconds(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Seconds,
            min,
            max,
            default,
            decimals: 3,
            scale: ParamScale::Linear,
        }
    }

    /// Dimensionless level parameter, three decimals, linear until a scale is set.
    pub const fn level(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min,
            max,
            default,
            decimals: 3,
            scale: ParamScale::Linear,
        }
    }

    /// Sets the skew.
    pub const fn with_scale(mut self, scale: ParamScale) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the number of decimals used by [`format_value`](Self::format_value).
    pub const fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    /// Clamps a plain value to `[min, max]`.
    ///
    /// NaN clamps to `min`.
    ///
    /// ```rust
    /// use contour_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::level("Sustain", "S", 0.0, 1.0, 0.5);
    /// assert_eq!(desc.clamp(0.25), 0.25);
    /// assert_eq!(desc.clamp(-3.0), 0.0);
    /// assert_eq!(desc.clamp(f32::NAN), 0.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value > self.max {
            self.max
        } else if value >= self.min {
            value
        } else {
            self.min
        }
    }

    /// Plain value to `[0.0, 1.0]`.
    ///
    /// The value is clamped to `[min, max]` first, so the result is always
    /// inside `[0.0, 1.0]`.
    ///
    /// ```rust
    /// use contour_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::seconds("Release", "R", 0.0, 5.0, 1.0);
    /// assert_eq!(desc.normalize(2.5), 0.5);
    /// assert_eq!(desc.normalize(99.0), 1.0);
    /// ```
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range <= 0.0 {
            return 0.0;
        }
        let linear = (self.clamp(value) - self.min) / range;
        clamp_unit(self.scale.skew(linear))
    }

    /// Normalized value to the plain range.
    ///
    /// Inverse of [`normalize`](Self::normalize). The input is clamped to
    /// `[0.0, 1.0]` (NaN reads as 0.0), so the result always lies in `[min, max]`.
    ///
    /// ```rust
    /// use contour_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::seconds("Release", "R", 0.0, 5.0, 1.0);
    /// assert_eq!(desc.denormalize(0.5), 2.5);
    /// assert_eq!(desc.denormalize(7.0), 5.0);
    /// ```
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let linear = self.scale.unskew(clamp_unit(normalized));
        self.clamp(self.min + linear * (self.max - self.min))
    }

    /// Formats a plain value with the descriptor's precision and unit suffix.
    ///
    /// ```rust
    /// use contour_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::seconds("Decay", "D", 0.001, 10.0, 1.0);
    /// assert_eq!(desc.format_value(1.0), "1.000 s");
    /// ```
    pub fn format_value(&self, value: f32) -> String {
        format!("{:.*}{}", self.decimals, value, self.unit.suffix())
    }

    /// Display text for a normalized value: denormalize, then format.
    pub fn display_text(&self, normalized: f32) -> String {
        self.format_value(self.denormalize(normalized))
    }
}

/// Clamps to `[0.0, 1.0]`, reading NaN as `0.0`.
///
/// Unlike `f32::clamp`, NaN does not propagate.
#[inline]
pub fn clamp_unit(value: f32) -> f32 {
    if value > 1.0 {
        1.0
    } else if value >= 0.0 {
        value
    } else {
        0.0
    }
}
