use bevy::prelude::*;

use super::probe::ResourceClass;

/// Readiness flags for the current page. A flag never reverts once set.
#[derive(Resource, Default, Debug, Clone, PartialEq, Eq)]
pub struct LoadingStatus {
    fonts: bool,
    images: bool,
    dom: bool,
}

impl LoadingStatus {
    /// Set the flag for `class`. Returns `true` only on the first call.
    pub fn mark(&mut self, class: ResourceClass) -> bool {
        let flag = match class {
            ResourceClass::Fonts => &mut self.fonts,
            ResourceClass::Images => &mut self.images,
            ResourceClass::Dom => &mut self.dom,
        };
        let newly_set = !*flag;
        *flag = true;
        newly_set
    }

    pub fn is_set(&self, class: ResourceClass) -> bool {
        match class {
            ResourceClass::Fonts => self.fonts,
            ResourceClass::Images => self.images,
            ResourceClass::Dom => self.dom,
        }
    }

    pub fn loaded_count(&self) -> usize {
        ResourceClass::ALL
            .iter()
            .filter(|class| self.is_set(**class))
            .count()
    }

    pub fn all_loaded(&self) -> bool {
        self.loaded_count() == ResourceClass::ALL.len()
    }

    /// Share of classes ready, in percent.
    pub fn percent(&self) -> f32 {
        self.loaded_count() as f32 / ResourceClass::ALL.len() as f32 * 100.0
    }

    /// Human readable hint for whatever is still outstanding.
    pub fn status_line(&self) -> &'static str {
        if !self.fonts {
            "Loading fonts..."
        } else if !self.images {
            "Loading images..."
        } else if !self.dom {
            "Finishing..."
        } else {
            "Ready"
        }
    }
}
