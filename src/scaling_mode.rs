//! Scaling modes: named pipelines of rendering effects.
//!
//! A mode is an ordered list of effects; each effect has a name, a scaling
//! type, and a parameter table. Profiles reference modes by index, so the
//! order of the mode list is significant and preserved.

use crate::types::ScalingType;
use serde::Serialize;
use std::collections::BTreeMap;

/// One effect in a scaling pipeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ScalingEffect {
    pub name: String,
    #[serde(
        rename = "scalingType",
        serialize_with = "crate::codec::ser::scaling_type_as_index"
    )]
    pub scaling_type: ScalingType,
    pub parameters: BTreeMap<String, f32>,
}

impl ScalingEffect {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scaling_type: ScalingType::default(),
            parameters: BTreeMap::new(),
        }
    }

    /// Builder method to set the scaling type.
    pub fn scaling_type(mut self, scaling_type: ScalingType) -> Self {
        self.scaling_type = scaling_type;
        self
    }

    /// Builder method to set one parameter.
    pub fn parameter(mut self, name: impl Into<String>, value: f32) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }
}

/// A named, ordered pipeline of scaling effects.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ScalingMode {
    pub name: String,
    pub effects: Vec<ScalingEffect>,
}

impl ScalingMode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            effects: Vec::new(),
        }
    }

    /// Builder method to append an effect.
    pub fn effect(mut self, effect: ScalingEffect) -> Self {
        self.effects.push(effect);
        self
    }
}
