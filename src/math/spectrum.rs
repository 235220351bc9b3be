// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Vector3f};

/// Linear RGB radiance / reflectance triple.
pub type RGBSpectrum = Vector3f;

pub trait Spectrum {
    fn is_black(&self) -> bool;
    fn is_valid(&self) -> bool;
    fn max_component(&self) -> Float;
}

impl Spectrum for RGBSpectrum {
    fn is_black(&self) -> bool {
        self.iter().all(|c| *c == 0.0)
    }

    /// Finite and non-negative in every channel.
    fn is_valid(&self) -> bool {
        self.iter().all(|c| c.is_finite() && *c >= 0.0)
    }

    fn max_component(&self) -> Float {
        self.x.max(self.y).max(self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spectrum_predicates() {
        assert!(RGBSpectrum::zeros().is_black());
        assert!(!RGBSpectrum::new(0.0, 0.1, 0.0).is_black());
        assert!(RGBSpectrum::new(0.0, 0.1, 2.0).is_valid());
        assert!(!RGBSpectrum::new(Float::NAN, 0.1, 2.0).is_valid());
        assert!(!RGBSpectrum::new(-0.5, 0.1, 2.0).is_valid());
        assert_eq!(RGBSpectrum::new(0.3, 0.9, 0.1).max_component(), 0.9);
    }
}
