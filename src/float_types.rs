// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Squared-distance threshold below which two attribute values are the same.
///
/// This is an absolute tolerance; it is not scaled by the magnitude of the
/// values being compared.
pub const DEFAULT_TOLERANCE: Real = 1e-7;

/// Lazily-initialized tolerance used across the crate.
/// Defaults to [`DEFAULT_TOLERANCE`], but can be overridden:
///  1) **Build-time**: set env var `MESHJOIN_TOLERANCE` (e.g. `MESHJOIN_TOLERANCE=1e-6 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before using the library
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

/// Returns the current squared-distance tolerance.
/// If not set yet, it tries `MESHJOIN_TOLERANCE` (parsed as the active `Real`) and
/// falls back to [`DEFAULT_TOLERANCE`].
pub fn tolerance() -> Real {
    read_tolerance(&TOLERANCE_CELL, option_env!("MESHJOIN_TOLERANCE"))
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
/// Call near program start: `meshjoin::float_types::set_tolerance(1e-6);`
pub fn set_tolerance(value: Real) {
    write_tolerance(&TOLERANCE_CELL, value);
}

fn read_tolerance(cell: &OnceLock<Real>, environment_variable: Option<&str>) -> Real {
    *cell.get_or_init(|| {
        // Compile-time env if provided, inherited by dependencies
        environment_variable
            .and_then(|text| Real::from_str(text).ok())
            .map_or(DEFAULT_TOLERANCE, |value| value.max(0.0))
    })
}

fn write_tolerance(cell: &OnceLock<Real>, value: Real) {
    let _ = cell.set(value.max(0.0));
}

// Pi
/// Archimedes' constant (π)
#[cfg(feature = "f32")]
pub const PI: Real = core::f32::consts::PI;
/// Archimedes' constant (π)
#[cfg(feature = "f64")]
pub const PI: Real = core::f64::consts::PI;

// Frac Pi 2
/// π/2
#[cfg(feature = "f32")]
pub const FRAC_PI_2: Real = core::f32::consts::FRAC_PI_2;
/// π/2
#[cfg(feature = "f64")]
pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_tolerance_without_override() {
        if option_env!("MESHJOIN_TOLERANCE").is_none() {
            assert_eq!(tolerance(), DEFAULT_TOLERANCE);
        }
        assert_eq!(DEFAULT_TOLERANCE, 1e-7);
    }

    #[test]
    fn set_after_first_read_is_ignored() {
        let before = tolerance();
        set_tolerance(before * 10.0 + 1.0);
        assert_eq!(tolerance(), before);
    }

    #[test]
    fn first_set_wins_and_negatives_clamp_to_zero() {
        let cell = OnceLock::new();
        write_tolerance(&cell, -1.0);
        write_tolerance(&cell, 1e-3);
        assert_eq!(read_tolerance(&cell, None), 0.0);

        let cell = OnceLock::new();
        write_tolerance(&cell, 1e-3);
        assert_eq!(read_tolerance(&cell, Some("1e-5")), 1e-3);
    }

    #[test]
    fn environment_override_is_parsed_and_clamped() {
        assert_eq!(read_tolerance(&OnceLock::new(), Some("1e-5")), 1e-5);
        assert_eq!(read_tolerance(&OnceLock::new(), Some("-2")), 0.0);
        assert_eq!(read_tolerance(&OnceLock::new(), Some("not a number")), DEFAULT_TOLERANCE);
        assert_eq!(read_tolerance(&OnceLock::new(), None), DEFAULT_TOLERANCE);
    }
}
