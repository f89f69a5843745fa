//! Physical constants. Everything inside the pipeline is SI; conversion to
//! display units happens only when formatting readouts.

/// Meters per astronomical unit.
pub const AU: f64 = 1.495_978_707e11;
/// Gravitational constant (m³ kg⁻¹ s⁻²).
pub const G: f64 = 6.674_30e-11;
pub const EARTH_MASS: f64 = 5.972e24;
pub const EARTH_RADIUS: f64 = 6.371e6;
pub const SECONDS_PER_DAY: f64 = 86_400.0;
/// Julian year length in days.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Surface gravity `G·m/r²`. Zero for a non-positive radius.
pub fn surface_gravity(mass: f64, radius: f64) -> f64 {
    if radius <= 0.0 {
        return 0.0;
    }
    G * mass / (radius * radius)
}
