/// Widget rectangle in PDF page space (bottom-left origin).
///
/// Coordinates follow the order of a PDF `/Rect` array:
/// - `llx`: lower-left x
/// - `lly`: lower-left y
/// - `urx`: upper-right x
/// - `ury`: upper-right y
///
/// `llx <= urx` and `lly <= ury` are expected but not enforced; widths and
/// heights derived from an inverted rect clamp to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub llx: f64,
    pub lly: f64,
    pub urx: f64,
    pub ury: f64,
}

impl Rect {
    pub fn new(llx: f64, lly: f64, urx: f64, ury: f64) -> Self {
        Self { llx, lly, urx, ury }
    }

    /// Build a rect from the first four values of a slice.
    ///
    /// Returns `None` when fewer than four values are given or any of the
    /// four is not finite.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.len() < 4 {
            return None;
        }
        let rect = Self::new(values[0], values[1], values[2], values[3]);
        rect.as_array()
            .iter()
            .all(|v| v.is_finite())
            .then_some(rect)
    }

    /// Width of the rect, clamped at 0.
    pub fn width(&self) -> f64 {
        (self.urx - self.llx).max(0.0)
    }

    /// Height of the rect, clamped at 0.
    pub fn height(&self) -> f64 {
        (self.ury - self.lly).max(0.0)
    }

    /// The four components in `/Rect` order.
    pub fn as_array(&self) -> [f64; 4] {
        [self.llx, self.lly, self.urx, self.ury]
    }

    /// The rect with every component rounded to two decimal places.
    ///
    /// PDF reals are written single precision; at two decimals every
    /// coordinate a page can carry reads back as the same number.
    pub fn rounded(&self) -> Self {
        Self::new(
            round2(self.llx),
            round2(self.lly),
            round2(self.urx),
            round2(self.ury),
        )
    }
}

impl serde::Serialize for Rect {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_array().serialize(serializer)
    }
}

/// Round a dimension to two decimal places for descriptor output.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_new() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.llx, 10.0);
        assert_eq!(rect.lly, 20.0);
        assert_eq!(rect.urx, 30.0);
        assert_eq!(rect.ury, 40.0);
    }

    #[test]
    fn test_rect_dimensions() {
        let rect = Rect::new(200.0, 755.0, 450.0, 775.0);
        assert_eq!(rect.width(), 250.0);
        assert_eq!(rect.height(), 20.0);
    }

    #[test]
    fn test_inverted_rect_clamps_to_zero() {
        let rect = Rect::new(100.0, 100.0, 50.0, 40.0);
        assert_eq!(rect.width(), 0.0);
        assert_eq!(rect.height(), 0.0);
    }

    #[test]
    fn test_from_values_uses_first_four() {
        let rect = Rect::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(rect.as_array(), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_from_values_too_short() {
        assert!(Rect::from_values(&[1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn test_from_values_rejects_nan() {
        assert!(Rect::from_values(&[1.0, f64::NAN, 3.0, 4.0]).is_none());
    }

    #[test]
    fn test_rect_serializes_as_array() {
        let json = serde_json::to_string(&Rect::new(1.0, 2.5, 3.0, 4.0)).unwrap();
        assert_eq!(json, "[1.0,2.5,3.0,4.0]");
    }

    #[test]
    fn rounded_rect_keeps_two_decimals() {
        let rect = Rect::new(200.333_333_333_333_34, 665.123_456_7, 520.75, 715.0);
        assert_eq!(rect.rounded(), Rect::new(200.33, 665.12, 520.75, 715.0));
        assert_eq!(rect.rounded().rounded(), rect.rounded());
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.345_6), 12.35);
        assert_eq!(round2(20.0), 20.0);
    }
}
