// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Electrical-engineering relations used for propagating power through a
//! network.
//!
//! These are plain transcriptions of the physical laws and do not guard
//! against zero denominators.  Callers validate their inputs up front, or
//! pass results through [`ensure_finite`].

use crate::Error;

/// Vacuum permittivity, in F/m.
pub const VACUUM_PERMITTIVITY: f64 = 8.854e-12;

/// Converts kilovolts to volts.
pub fn kv_to_v(kv: f64) -> f64 {
    kv * 1000.0
}

/// Converts volts to kilovolts.
pub fn v_to_kv(v: f64) -> f64 {
    v / 1000.0
}

/// Converts watts to megawatts.
pub fn w_to_mw(w: f64) -> f64 {
    w / 1_000_000.0
}

/// Converts megawatts to watts.
pub fn mw_to_w(mw: f64) -> f64 {
    mw * 1_000_000.0
}

/// Converts kilowatts to megawatts.
pub fn kw_to_mw(kw: f64) -> f64 {
    kw / 1000.0
}

/// Active power loss on a line, `I² · R`.
///
/// With `i` in A and `r` in Ω, the result is in W.
pub fn line_loss(i: f64, r: f64) -> f64 {
    i.powi(2) * r
}

/// Reactive power loss on a line, `I² · X`.
pub fn reactive_line_loss(i: f64, x: f64) -> f64 {
    i.powi(2) * x
}

/// Conductor resistance, `ρ · l / A`.
///
/// - `resistivity`: Ω·m, e.g. `1.78e-8` for copper at 20°C.
/// - `length`: m.
/// - `area`: m².
pub fn resistance(resistivity: f64, length: f64, area: f64) -> f64 {
    resistivity * length / area
}

/// Current drawn by an active load, `P / (U · cosφ)`.
pub fn current(p: f64, u: f64, cos_phi: f64) -> f64 {
    p / (u * cos_phi)
}

/// Apparent power, `√(P² + Q²)`.
pub fn apparent_power(p: f64, q: f64) -> f64 {
    (p.powi(2) + q.powi(2)).sqrt()
}

/// Power factor from active and apparent power, `P / S`.
pub fn cos_phi(p: f64, s: f64) -> f64 {
    p / s
}

/// `sinφ` from the power factor, `√(1 − cos²φ)`.
pub fn sin_phi(cos_phi: f64) -> f64 {
    (1.0 - cos_phi.powi(2)).sqrt()
}

/// `sinφ` from reactive and apparent power, `Q / S`.
pub fn sin_phi_from(q: f64, s: f64) -> f64 {
    q / s
}

/// `tanφ` as computed by the metering tooling this crate reports to,
/// `√(1 − cosφ) / cosφ`.
///
/// This is not the `sinφ / cosφ` identity.
pub fn tan_phi(cos_phi: f64) -> f64 {
    (1.0 - cos_phi).sqrt() / cos_phi
}

/// Active power from apparent power, `S · cosφ`.
pub fn active_power(s: f64, cos_phi: f64) -> f64 {
    s * cos_phi
}

/// Reactive power from active power, `P · tanφ`.
pub fn reactive_power(p: f64, tan_phi: f64) -> f64 {
    p * tan_phi
}

/// Reactive power from voltage and current, `U · I · sinφ`.
pub fn reactive_power_total(u: f64, i: f64, sin_phi: f64) -> f64 {
    u * i * sin_phi
}

/// Energy lost over `hours` at a constant power loss.
pub fn energy_losses(power_losses: f64, hours: f64) -> f64 {
    power_losses * hours
}

/// Total transformer losses, core plus joule.
pub fn transformer_losses(core_losses: f64, joule_losses: f64) -> f64 {
    core_losses + joule_losses
}

/// Output power of a transformer with the given efficiency.
pub fn efficiency_output(input_power: f64, efficiency: f64) -> f64 {
    input_power * efficiency
}

/// Geometric mean distance between three phase conductors, `(a·b·c)^(1/3)`.
pub fn geometric_mean_distance(a: f64, b: f64, c: f64) -> f64 {
    (a * b * c).powf(1.0 / 3.0)
}

/// Equivalent radius of a solid conductor, `e^(−1/4) · r`.
pub fn equivalent_radius(r: f64) -> f64 {
    (-0.25f64).exp() * r
}

/// Inductance per unit length, in H/m, `2·10⁻⁷ · ln(Dm / re)`.
pub fn inductance_per_length(dm: f64, re: f64) -> f64 {
    2e-7 * (dm / re).ln()
}

/// Total reactance of a line, `ω·L · length`.
pub fn reactance(omega_l: f64, length: f64) -> f64 {
    omega_l * length
}

/// Line capacitance per unit length, in F/m, `2π·ε₀ / ln(Dm / r)`.
pub fn line_capacitance(dm: f64, r: f64) -> f64 {
    2.0 * std::f64::consts::PI * VACUUM_PERMITTIVITY / (dm / r).ln()
}

/// Returns `value` if it is finite, and an `InvalidParameter` error naming
/// the quantity otherwise.
pub fn ensure_finite(quantity: &str, value: f64) -> Result<f64, Error> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::invalid_parameter(format!(
            "{quantity} is not a finite number: {value}."
        )))
    }
}

/// Power factor quantities derived from an active/reactive power pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerFactor {
    pub apparent_power: f64,
    pub cos_phi: f64,
    pub sin_phi: f64,
    pub tan_phi: f64,
}

impl PowerFactor {
    /// Computes the power factor quantities for active power `p` and
    /// reactive power `q`.
    ///
    /// Returns `None` when any of them would not be finite, e.g. when both
    /// powers are zero.
    pub fn from_powers(p: f64, q: f64) -> Option<Self> {
        let s = apparent_power(p, q);
        let cos = cos_phi(p, s);
        let pf = Self {
            apparent_power: s,
            cos_phi: cos,
            sin_phi: sin_phi(cos),
            tan_phi: tan_phi(cos),
        };
        [pf.apparent_power, pf.cos_phi, pf.sin_phi, pf.tan_phi]
            .iter()
            .all(|x| x.is_finite())
            .then_some(pf)
    }
}
