//! Scalar special-relativity formulas in natural units (c = 1).

use crate::error::{RelativityError, Result};

/// Rejects speeds that are not strictly slower than light.
pub fn check_speed(speed: f64) -> Result<f64> {
    // NaN fails the comparison too.
    if speed.abs() < 1.0 {
        Ok(speed)
    } else {
        Err(RelativityError::InvalidVelocity { speed })
    }
}

/// Lorentz factor γ = 1 / sqrt(1 - v^2)
pub fn lorentz_factor(v: f64) -> Result<f64> {
    let v = check_speed(v)?;
    Ok(1.0 / (1.0 - v * v).sqrt())
}

/// Length contraction: L = L0 / γ
pub fn length_contraction(proper_length: f64, v: f64) -> Result<f64> {
    let gamma = lorentz_factor(v)?;
    Ok(proper_length / gamma)
}

/// Time dilation: Δt = γ Δτ
pub fn time_dilation(proper_time: f64, v: f64) -> Result<f64> {
    let gamma = lorentz_factor(v)?;
    Ok(proper_time * gamma)
}

/// Proper time elapsed on a clock moving at `v` while `coordinate_time` passes.
pub fn proper_time(coordinate_time: f64, v: f64) -> Result<f64> {
    let gamma = lorentz_factor(v)?;
    Ok(coordinate_time / gamma)
}

/// Rapidity φ = atanh(v). Rapidities add under collinear boosts.
pub fn rapidity(v: f64) -> Result<f64> {
    Ok(check_speed(v)?.atanh())
}

/// Einstein addition of two collinear velocities.
pub fn relative_velocity_1d(u: f64, v: f64) -> Result<f64> {
    check_speed(u)?;
    check_speed(v)?;
    Ok((u + v) / (1.0 + u * v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gamma_at_point_six() {
        let gamma = lorentz_factor(0.6).unwrap();
        assert!((gamma - 1.25).abs() < 1e-12);
        assert!((length_contraction(1.0, 0.6).unwrap() - 0.8).abs() < 1e-12);
        assert!((time_dilation(8.0, 0.6).unwrap() - 10.0).abs() < 1e-12);
        assert!((proper_time(10.0, 0.6).unwrap() - 8.0).abs() < 1e-12);
    }

    #[test]
    fn light_speed_is_rejected() {
        assert_eq!(
            lorentz_factor(1.0),
            Err(RelativityError::InvalidVelocity { speed: 1.0 })
        );
        assert!(lorentz_factor(-1.5).is_err());
        assert!(lorentz_factor(f64::NAN).is_err());
    }

    #[test]
    fn rapidities_add() {
        let w = relative_velocity_1d(0.3, 0.4).unwrap();
        let sum = rapidity(0.3).unwrap() + rapidity(0.4).unwrap();
        assert!((rapidity(w).unwrap() - sum).abs() < 1e-12);
    }
}
