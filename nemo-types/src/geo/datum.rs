/// Reference ellipsoid of a celestial body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Datum {
    semimajor: f64,
    inv_flattening: f64,
}

impl Datum {
    /// World Geodetic System 1984.
    pub const WGS84: Self = Datum {
        semimajor: 6_378_137.0,
        inv_flattening: 298.257223563,
    };

    /// Creates a new datum from the semimajor axis (meters) and inverse flattening.
    pub const fn new(semimajor: f64, inv_flattening: f64) -> Self {
        Self {
            semimajor,
            inv_flattening,
        }
    }

    /// Equatorial radius in meters.
    pub fn semimajor(&self) -> f64 {
        self.semimajor
    }

    /// Inverse flattening of the ellipsoid.
    pub fn inv_flattening(&self) -> f64 {
        self.inv_flattening
    }

    /// Polar radius in meters.
    pub fn semiminor(&self) -> f64 {
        self.semimajor * (1.0 - 1.0 / self.inv_flattening)
    }

    /// Arithmetic mean radius `(2a + b) / 3` in meters.
    pub fn mean_radius(&self) -> f64 {
        (2.0 * self.semimajor + self.semiminor()) / 3.0
    }
}

impl Default for Datum {
    fn default() -> Self {
        Self::WGS84
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn wgs84_radii() {
        assert_eq!(Datum::WGS84.semimajor(), 6_378_137.0);
        assert_abs_diff_eq!(Datum::WGS84.semiminor(), 6_356_752.314_245, epsilon = 1e-3);
        assert_abs_diff_eq!(Datum::WGS84.mean_radius(), 6_371_008.771, epsilon = 1e-2);
    }
}
