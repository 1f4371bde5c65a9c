use crate::error::StageError;

/// A ranged float exposed to the debug panel.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugParam {
    pub folder: String,
    pub name: String,
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub step: Option<f32>,
    changed: bool,
}

impl DebugParam {
    pub fn key(&self) -> String {
        param_key(&self.folder, &self.name)
    }

    /// Slider settings for the page panel: `[value, min, max, step]`.
    /// Continuous parameters get a hundredth of their range as step.
    pub fn slider(&self) -> [f32; 4] {
        let step = self
            .step
            .filter(|s| *s > 0.0)
            .unwrap_or((self.max - self.min) / 100.0);
        [self.value, self.min, self.max, step]
    }

    fn constrain(&self, value: f32) -> f32 {
        let snapped = match self.step {
            Some(step) if step > 0.0 => self.min + ((value - self.min) / step).round() * step,
            _ => value,
        };
        snapped.clamp(self.min, self.max)
    }
}

/// `"folder/name"`, the address JavaScript uses to set a parameter.
pub fn param_key(folder: &str, name: &str) -> String {
    format!("{folder}/{name}")
}

/// Debug state shared by every scene: the parameter registry and the
/// free-form text line shown under the canvases.
#[derive(Debug, Clone, Default)]
pub struct DebugUi {
    /// Whether the panel is shown. Parameters are registered either way so
    /// scenes can always read their values.
    pub active: bool,
    params: Vec<DebugParam>,
    pub dom_debug: String,
}

impl DebugUi {
    pub fn new(active: bool) -> Self {
        Self {
            active,
            ..Default::default()
        }
    }

    /// Register a parameter and return its (possibly pre-existing) value.
    pub fn add(
        &mut self,
        folder: &str,
        name: &str,
        value: f32,
        min: f32,
        max: f32,
        step: Option<f32>,
    ) -> f32 {
        if let Some(existing) = self.find(folder, name) {
            return existing.value;
        }
        let mut param = DebugParam {
            folder: folder.to_string(),
            name: name.to_string(),
            value,
            min,
            max,
            step,
            changed: false,
        };
        param.value = param.constrain(value);
        let value = param.value;
        self.params.push(param);
        value
    }

    fn find(&self, folder: &str, name: &str) -> Option<&DebugParam> {
        self.params.iter().find(|p| p.folder == folder && p.name == name)
    }

    pub fn get(&self, key: &str) -> Option<f32> {
        self.param(key).map(|p| p.value)
    }

    pub fn param(&self, key: &str) -> Option<&DebugParam> {
        self.params.iter().find(|p| p.key() == key)
    }

    /// Set a parameter from the panel. The value is snapped to the step and
    /// clamped to the range; the applied value is returned.
    pub fn set(&mut self, key: &str, value: f32) -> Result<f32, StageError> {
        let param = self
            .params
            .iter_mut()
            .find(|p| p.key() == key)
            .ok_or_else(|| StageError::UnknownParam(key.to_string()))?;
        let applied = param.constrain(value);
        if applied != param.value {
            param.value = applied;
            param.changed = true;
        }
        Ok(applied)
    }

    /// Parameters of `folder` changed since the last call, as `(name, value)`.
    pub fn take_changed(&mut self, folder: &str) -> Vec<(String, f32)> {
        self.params
            .iter_mut()
            .filter(|p| p.folder == folder && p.changed)
            .map(|p| {
                p.changed = false;
                (p.name.clone(), p.value)
            })
            .collect()
    }

    pub fn params(&self) -> &[DebugParam] {
        &self.params
    }

    pub fn keys(&self) -> Vec<String> {
        self.params.iter().map(DebugParam::key).collect()
    }
}
