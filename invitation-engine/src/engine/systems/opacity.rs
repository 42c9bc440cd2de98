use bevy::prelude::*;

/// A UI node whose alpha is driven by an animation. `base_alpha` is the alpha
/// it was authored with; animated opacity scales it.
#[derive(Component, Debug, Clone, Copy)]
pub struct Fadeable {
    pub base_alpha: f32,
}

impl Fadeable {
    pub fn new(base_alpha: f32) -> Self {
        Self { base_alpha }
    }

    pub fn opaque() -> Self {
        Self::new(1.0)
    }

    pub fn alpha_for(&self, opacity: f32) -> f32 {
        self.base_alpha * opacity.clamp(0.0, 1.0)
    }

    /// Write the faded alpha into whichever colour carriers the node has.
    pub fn apply(
        &self,
        opacity: f32,
        text: Option<Mut<TextColor>>,
        image: Option<Mut<ImageNode>>,
        background: Option<Mut<BackgroundColor>>,
    ) {
        let alpha = self.alpha_for(opacity);
        if let Some(mut text) = text {
            if text.0.alpha() != alpha {
                text.0.set_alpha(alpha);
            }
        }
        if let Some(mut image) = image {
            if image.color.alpha() != alpha {
                image.color.set_alpha(alpha);
            }
        }
        if let Some(mut background) = background {
            if background.0.alpha() != alpha {
                background.0.set_alpha(alpha);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_scales_authored_value() {
        let fadeable = Fadeable::new(0.5);
        assert_eq!(fadeable.alpha_for(1.0), 0.5);
        assert_eq!(fadeable.alpha_for(0.5), 0.25);
        assert_eq!(fadeable.alpha_for(4.0), 0.5);
        assert_eq!(Fadeable::opaque().alpha_for(-1.0), 0.0);
    }
}
