#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    OutQuad,
    InOutQuad,
    /// "power2.out"
    OutCubic,
    /// "power2.inOut"
    InOutCubic,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Exponential approach of `current` toward `target`, independent of frame rate.
pub fn damp(current: f32, target: f32, lambda: f32, dt: f32) -> f32 {
    lerp(current, target, 1.0 - (-lambda * dt).exp())
}

/// Normalised progress through `[from, from + distance]`, clamped to `[0, 1]`.
pub fn range(offset: f32, from: f32, distance: f32) -> f32 {
    if distance <= 0.0 {
        return if offset >= from { 1.0 } else { 0.0 };
    }
    ((offset - from) / distance).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [Ease; 5] = [
        Ease::Linear,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::OutCubic,
        Ease::InOutCubic,
    ];

    #[test]
    fn curves_pin_endpoints_and_clamp() {
        for ease in CURVES {
            assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6, "{ease:?}");
            assert_eq!(ease.apply(-3.0), 0.0, "{ease:?}");
            assert!((ease.apply(7.0) - 1.0).abs() < 1e-6, "{ease:?}");
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for ease in CURVES {
            let mut last = 0.0;
            for step in 0..=100 {
                let value = ease.apply(step as f32 / 100.0);
                assert!(value + 1e-6 >= last, "{ease:?} regressed at {step}");
                last = value;
            }
        }
    }

    #[test]
    fn damp_approaches_without_overshoot() {
        let mut value = 0.0;
        for _ in 0..120 {
            let next = damp(value, 100.0, 8.0, 1.0 / 60.0);
            assert!(next >= value && next <= 100.0);
            value = next;
        }
        assert!(value > 99.0);
    }

    #[test]
    fn range_maps_window() {
        assert_eq!(range(0.1, 0.3, 0.5), 0.0);
        assert!((range(0.55, 0.3, 0.5) - 0.5).abs() < 1e-6);
        assert_eq!(range(0.95, 0.3, 0.5), 1.0);
    }
}
