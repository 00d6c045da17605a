//! Colour scale for the ratio column.

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#rrggbb` form used in SVG attributes.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let channel = |a: u8, b: u8| -> u8 {
            (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
        };
        Rgb(
            channel(self.0, other.0),
            channel(self.1, other.1),
            channel(self.2, other.2),
        )
    }
}

/// Piecewise-linear colour ramp over `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    /// `(position, colour)` pairs sorted by position.
    stops: Vec<(f64, Rgb)>,
    /// Fill for regions without a finite ratio.
    missing: Rgb,
}

impl Default for ColorScale {
    /// Diverging red / white / blue ramp centred on 0.5.
    fn default() -> Self {
        Self {
            stops: vec![
                (0.0, Rgb(202, 0, 32)),
                (0.5, Rgb(247, 247, 247)),
                (1.0, Rgb(5, 113, 176)),
            ],
            missing: Rgb(204, 204, 204),
        }
    }
}

impl ColorScale {
    pub fn stops(&self) -> &[(f64, Rgb)] {
        &self.stops
    }

    pub fn missing(&self) -> Rgb {
        self.missing
    }

    /// Colour of `ratio`, clamped to `[0, 1]`; `None` for non-finite values.
    pub fn color(&self, ratio: f64) -> Option<Rgb> {
        if !ratio.is_finite() {
            return None;
        }
        let ratio = ratio.clamp(0.0, 1.0);
        let (first, last) = (self.stops.first()?, self.stops.last()?);
        if ratio <= first.0 {
            return Some(first.1);
        }
        for pair in self.stops.windows(2) {
            let ((lo, lo_color), (hi, hi_color)) = (pair[0], pair[1]);
            if ratio <= hi {
                let span = hi - lo;
                let t = if span > 0.0 { (ratio - lo) / span } else { 1.0 };
                return Some(lo_color.lerp(hi_color, t));
            }
        }
        Some(last.1)
    }

    /// Fill for an optional ratio: missing colour when absent or non-finite.
    pub fn fill(&self, ratio: Option<f64>) -> Rgb {
        ratio
            .and_then(|value| self.color(value))
            .unwrap_or(self.missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(Rgb(5, 113, 176).hex(), "#0571b0");
    }

    #[test]
    fn test_stop_colours() {
        let scale = ColorScale::default();
        assert_eq!(scale.color(0.0), Some(Rgb(202, 0, 32)));
        assert_eq!(scale.color(0.5), Some(Rgb(247, 247, 247)));
        assert_eq!(scale.color(1.0), Some(Rgb(5, 113, 176)));
    }

    #[test]
    fn test_interpolation_and_clamp() {
        let scale = ColorScale::default();
        assert_eq!(scale.color(0.25), Some(Rgb(225, 124, 140)));
        assert_eq!(scale.color(-1.0), scale.color(0.0));
        assert_eq!(scale.color(2.0), scale.color(1.0));
    }

    #[test]
    fn test_non_finite_uses_missing_fill() {
        let scale = ColorScale::default();
        assert_eq!(scale.color(f64::NAN), None);
        assert_eq!(scale.fill(Some(f64::NAN)), scale.missing());
        assert_eq!(scale.fill(None), Rgb(204, 204, 204));
    }
}
