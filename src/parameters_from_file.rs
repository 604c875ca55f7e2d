//! Supports extracting rig parameters from YAML file (optional)

use std::path::Path;

use yaml_rust2::{Yaml, YamlLoader};

use crate::parameter_error::ParameterError;
use crate::parameters::vbrace_kinematics::{ActuatorSide, Parameters};

impl Parameters {
    /// Read the rig configuration from YAML file. YAML file like this is
    /// supported:
    /// ```yaml
    /// # Symmetric chevron rig
    /// vbrace_geometric_parameters:
    ///   la0: 2.0
    ///   la1: 3.0
    ///   la2: 3.0
    ///   l0: 1.5
    ///   l1: 1.5
    /// vbrace_nonlinear_geometry: true
    /// vbrace_actuator_side: left
    /// vbrace_phi_loc_x: 30.0
    /// ```
    /// The geometry block is required; the nonlinear flag, actuator side
    /// and local-axis angle are optional and default to the linear
    /// geometry, left side and zero degrees. The side also accepts the
    /// short spellings `l` and `r`.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ParameterError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse the rig configuration from YAML text. Lengths are validated
    /// before the parameters are returned.
    pub fn from_yaml(contents: &str) -> Result<Self, ParameterError> {
        let docs = YamlLoader::load_from_str(contents)
            .map_err(|e| ParameterError::ParseError(e.to_string()))?;
        let doc = docs
            .first()
            .ok_or_else(|| ParameterError::ParseError("empty YAML document".to_string()))?;

        let geometry = &doc["vbrace_geometric_parameters"];
        if geometry.is_badvalue() {
            return Err(ParameterError::MissingField(
                "vbrace_geometric_parameters".to_string(),
            ));
        }

        let act0_side = match &doc["vbrace_actuator_side"] {
            Yaml::BadValue => ActuatorSide::Left,
            value => parse_side(value)?,
        };

        Parameters {
            la0: length(geometry, "la0")?,
            la1: length(geometry, "la1")?,
            la2: length(geometry, "la2")?,
            l0: length(geometry, "l0")?,
            l1: length(geometry, "l1")?,
            nl_geom: doc["vbrace_nonlinear_geometry"].as_bool().unwrap_or(false),
            act0_side,
            phi_loc_x: optional_number(doc, "vbrace_phi_loc_x")?.unwrap_or(0.0),
        }
        .validated()
    }
}

/// Numeric lookup tolerating both integer and real YAML scalars.
fn number(node: &Yaml) -> Option<f64> {
    match node {
        Yaml::Real(_) => node.as_f64(),
        Yaml::Integer(value) => Some(*value as f64),
        _ => None,
    }
}

fn length(geometry: &Yaml, name: &str) -> Result<f64, ParameterError> {
    number(&geometry[name]).ok_or_else(|| ParameterError::MissingField(name.to_string()))
}

fn optional_number(doc: &Yaml, name: &str) -> Result<Option<f64>, ParameterError> {
    match &doc[name] {
        Yaml::BadValue => Ok(None),
        node => number(node)
            .map(Some)
            .ok_or_else(|| ParameterError::ParseError(format!("{} must be numeric", name))),
    }
}

fn parse_side(value: &Yaml) -> Result<ActuatorSide, ParameterError> {
    match value.as_str() {
        Some("left" | "l") => Ok(ActuatorSide::Left),
        Some("right" | "r") => Ok(ActuatorSide::Right),
        Some(other) => Err(ParameterError::WrongSide(other.to_string())),
        None => Err(ParameterError::WrongSide("expected a string".to_string())),
    }
}
