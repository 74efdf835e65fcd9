use serde_json::{Map, Value};
use showroom_scene::StandardMaterial;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BindingError {
    #[error("no parameter named {0:?}")]
    UnknownField(String),
    #[error("value for {field:?} is not a finite number")]
    NotFinite { field: String },
    #[error("parameter preset must be a JSON object")]
    NotAnObject,
}

/// A named numeric field on `T` with a declared range and step.
pub struct NumericField<T> {
    pub name: &'static str,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    get: fn(&T) -> f32,
    set: fn(&mut T, f32),
}

impl<T> NumericField<T> {
    /// Unbounded field with no step; narrow it with `min`, `max` and `step`.
    pub fn new(name: &'static str, get: fn(&T) -> f32, set: fn(&mut T, f32)) -> Self {
        Self {
            name,
            min: f32::NEG_INFINITY,
            max: f32::INFINITY,
            step: 0.0,
            get,
            set,
        }
    }

    pub fn min(mut self, min: f32) -> Self {
        self.min = min;
        self
    }

    pub fn max(mut self, max: f32) -> Self {
        self.max = max;
        self
    }

    pub fn step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    pub fn value(&self, target: &T) -> f32 {
        (self.get)(target)
    }

    /// Snap to the step grid anchored at `min`, then clamp into range.
    pub fn constrain(&self, value: f32) -> f32 {
        let snapped = if self.step > 0.0 && self.min.is_finite() {
            self.min + ((value - self.min) / self.step).round() * self.step
        } else {
            value
        };
        snapped.clamp(self.min, self.max)
    }

    /// Write a constrained value and return what was stored.
    pub fn write(&self, target: &mut T, value: f32) -> Result<f32, BindingError> {
        if !value.is_finite() {
            return Err(BindingError::NotFinite {
                field: self.name.to_string(),
            });
        }
        let v = self.constrain(value);
        (self.set)(target, v);
        Ok(v)
    }
}

impl<T> std::fmt::Debug for NumericField<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NumericField")
            .field("name", &self.name)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("step", &self.step)
            .finish()
    }
}

/// Group of numeric bindings shown together in a debug panel.
#[derive(Debug)]
pub struct ParamPanel<T> {
    title: String,
    fields: Vec<NumericField<T>>,
}

impl<T> ParamPanel<T> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
        }
    }

    pub fn with(mut self, field: NumericField<T>) -> Self {
        self.fields.push(field);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn fields(&self) -> &[NumericField<T>] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&NumericField<T>> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn get(&self, target: &T, name: &str) -> Result<f32, BindingError> {
        self.lookup(name).map(|f| f.value(target))
    }

    pub fn set(&self, target: &mut T, name: &str, value: f32) -> Result<f32, BindingError> {
        let stored = self.lookup(name)?.write(target, value)?;
        tracing::debug!(panel = %self.title, field = name, value = stored, "parameter set");
        Ok(stored)
    }

    /// Current values in declaration order.
    pub fn values(&self, target: &T) -> Vec<(&'static str, f32)> {
        self.fields.iter().map(|f| (f.name, f.value(target))).collect()
    }

    /// Current values as a JSON object keyed by field name.
    pub fn to_json(&self, target: &T) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.name.to_string(), Value::from(f.value(target) as f64)))
            .collect();
        Value::Object(map)
    }

    /// Apply a JSON object of field values. Every entry is checked before any
    /// is written, so on error the target is left untouched.
    pub fn apply_json(&self, target: &mut T, preset: &Value) -> Result<usize, BindingError> {
        let map = preset.as_object().ok_or(BindingError::NotAnObject)?;
        let pending = map
            .iter()
            .map(|(key, value)| {
                let field = self.lookup(key)?;
                match value.as_f64().map(|v| v as f32) {
                    Some(v) if v.is_finite() => Ok((field, v)),
                    _ => Err(BindingError::NotFinite { field: key.clone() }),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (field, value) in &pending {
            field.write(target, *value)?;
        }
        tracing::debug!(panel = %self.title, applied = pending.len(), "preset applied");
        Ok(pending.len())
    }

    fn lookup(&self, name: &str) -> Result<&NumericField<T>, BindingError> {
        self.field(name)
            .ok_or_else(|| BindingError::UnknownField(name.to_string()))
    }
}

/// Debug bindings for the showroom material.
pub fn material_panel() -> ParamPanel<StandardMaterial> {
    ParamPanel::new("Material")
        .with(
            NumericField::new(
                "metalness",
                |m: &StandardMaterial| m.metalness,
                |m: &mut StandardMaterial, v| m.metalness = v,
            )
            .min(0.0)
            .max(1.0)
            .step(0.001),
        )
        .with(
            NumericField::new(
                "roughness",
                |m: &StandardMaterial| m.roughness,
                |m: &mut StandardMaterial, v| m.roughness = v,
            )
            .min(0.0)
            .max(1.0)
            .step(0.001),
        )
        .with(
            NumericField::new(
                "aoMapIntensity",
                |m: &StandardMaterial| m.ao_map_intensity,
                |m: &mut StandardMaterial, v| m.ao_map_intensity = v,
            )
            .min(0.0)
            .max(10.0)
            .step(0.001),
        )
        .with(
            NumericField::new(
                "displacementScale",
                |m: &StandardMaterial| m.displacement_scale,
                |m: &mut StandardMaterial, v| m.displacement_scale = v,
            )
            .min(0.0)
            .max(1.0)
            .step(0.0001),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn material_panel_declares_four_fields() {
        let panel = material_panel();
        let names: Vec<_> = panel.fields().iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            ["metalness", "roughness", "aoMapIntensity", "displacementScale"]
        );
        let ao = panel.field("aoMapIntensity").unwrap();
        assert_eq!((ao.min, ao.max, ao.step), (0.0, 10.0, 0.001));
    }

    #[test]
    fn set_writes_through() {
        let panel = material_panel();
        let mut m = StandardMaterial::showroom(None);
        let stored = panel.set(&mut m, "roughness", 0.5).unwrap();
        assert!(approx(stored, 0.5));
        assert!(approx(m.roughness, 0.5));
        assert!(approx(panel.get(&m, "roughness").unwrap(), 0.5));
    }

    #[test]
    fn out_of_range_is_clamped() {
        let panel = material_panel();
        let mut m = StandardMaterial::showroom(None);
        assert_eq!(panel.set(&mut m, "metalness", 3.0).unwrap(), 1.0);
        assert_eq!(panel.set(&mut m, "metalness", -1.0).unwrap(), 0.0);
        assert_eq!(m.metalness, 0.0);
    }

    #[test]
    fn values_snap_to_step() {
        let panel = material_panel();
        let mut m = StandardMaterial::showroom(None);
        let stored = panel.set(&mut m, "metalness", 0.12345).unwrap();
        assert!(approx(stored, 0.123));
        let stored = panel.set(&mut m, "displacementScale", 0.12345).unwrap();
        assert!(approx(stored, 0.1235) || approx(stored, 0.1234));
    }

    #[test]
    fn unknown_field_is_an_error() {
        let panel = material_panel();
        let mut m = StandardMaterial::default();
        assert_eq!(
            panel.set(&mut m, "shininess", 1.0),
            Err(BindingError::UnknownField("shininess".into()))
        );
    }

    #[test]
    fn nan_is_rejected() {
        let panel = material_panel();
        let mut m = StandardMaterial::showroom(None);
        assert!(panel.set(&mut m, "roughness", f32::NAN).is_err());
        assert!(approx(m.roughness, 0.2));
    }

    #[test]
    fn json_round_trip() {
        let panel = material_panel();
        let source = StandardMaterial::showroom(None);
        let json = panel.to_json(&source);
        assert!((json["metalness"].as_f64().unwrap() - 0.7).abs() < 1e-6);

        let mut target = StandardMaterial::default();
        assert_eq!(panel.apply_json(&mut target, &json).unwrap(), 4);
        assert!(approx(target.metalness, 0.7));
        assert!(approx(target.roughness, 0.2));
    }

    #[test]
    fn rejected_preset_leaves_target_unchanged() {
        let panel = material_panel();
        let mut m = StandardMaterial::showroom(None);
        let before = m.clone();

        let unknown = serde_json::json!({ "metalness": 0.1, "shininess": 5.0 });
        assert_eq!(
            panel.apply_json(&mut m, &unknown),
            Err(BindingError::UnknownField("shininess".into()))
        );
        assert_eq!(m, before);

        let not_a_number = serde_json::json!({ "roughness": 0.9, "metalness": "shiny" });
        assert_eq!(
            panel.apply_json(&mut m, &not_a_number),
            Err(BindingError::NotFinite {
                field: "metalness".into()
            })
        );
        assert_eq!(m, before);

        let overflow = serde_json::json!({ "roughness": 0.9, "metalness": 1e300 });
        assert!(panel.apply_json(&mut m, &overflow).is_err());
        assert_eq!(m, before);
    }

    #[test]
    fn non_object_preset_is_an_error() {
        let panel = material_panel();
        let mut m = StandardMaterial::showroom(None);
        assert_eq!(
            panel.apply_json(&mut m, &serde_json::json!([0.1, 0.2])),
            Err(BindingError::NotAnObject)
        );
        assert_eq!(
            panel.apply_json(&mut m, &Value::Null),
            Err(BindingError::NotAnObject)
        );
        assert!(approx(m.metalness, 0.7));
    }

    #[test]
    fn unbounded_field_passes_values() {
        let field = NumericField::new(
            "x",
            |v: &f32| *v,
            |v: &mut f32, x| *v = x,
        );
        let mut target = 0.0_f32;
        assert_eq!(field.write(&mut target, 123.456).unwrap(), 123.456);
        assert_eq!(target, 123.456);
    }
}
