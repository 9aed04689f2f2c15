use fixed::types::I32F32;

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits.
pub type Fixed64 = I32F32;

/// Simulated time in milliseconds. The atomic unit of the decay clock.
pub type Millis = u64;

/// Lower bound of the system health scale.
pub const HEALTH_MIN: Fixed64 = Fixed64::ZERO;

/// Upper bound of the system health scale.
pub const HEALTH_MAX: Fixed64 = Fixed64::const_from_int(100);

/// Convert an f64 to Fixed64. Use only for initialization, never in sim loop.
#[inline]
pub fn f64_to_fixed64(v: f64) -> Fixed64 {
    Fixed64::from_num(v)
}

/// Convert Fixed64 to f64. Use only for display, never in sim loop.
#[inline]
pub fn fixed64_to_f64(v: Fixed64) -> f64 {
    v.to_num::<f64>()
}

/// Clamp a value onto the health scale `[0, 100]`.
#[inline]
pub fn clamp_health(v: Fixed64) -> Fixed64 {
    v.clamp(HEALTH_MIN, HEALTH_MAX)
}
