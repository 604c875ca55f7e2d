//! Defines the rig geometry parameter data structure

pub mod vbrace_kinematics {
    use crate::parameter_error::ParameterError;
    use std::fmt;

    /// Mounting side of the horizontal actuator. The side decides which
    /// rigid arm the horizontal actuator works against and flips the sign
    /// convention of its channel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ActuatorSide {
        Left,
        Right,
    }

    impl fmt::Display for ActuatorSide {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                ActuatorSide::Left => write!(f, "left"),
                ActuatorSide::Right => write!(f, "right"),
            }
        }
    }

    /// Geometry of the inverted-V brace rig.
    ///
    /// The rig restrains a planar interface point with three degrees of
    /// freedom (horizontal, vertical, rotation) through one horizontal and
    /// two diagonal actuators. The diagonal actuators connect to the
    /// interface point through rigid arms of lengths `l0` and `l1`.
    #[derive(Debug, Clone, Copy)]
    pub struct Parameters {
        /// Nominal length of the horizontal actuator (actuator 0).
        pub la0: f64,

        /// Nominal length of the first diagonal actuator (actuator 1),
        /// the one reached through the `l0` arm.
        pub la1: f64,

        /// Nominal length of the second diagonal actuator (actuator 2),
        /// the one reached through the `l1` arm.
        pub la2: f64,

        /// Length of the rigid arm between the interface point and the
        /// attachment shared with actuator 1.
        pub l0: f64,

        /// Length of the rigid arm between the interface point and the
        /// attachment shared with actuator 2.
        pub l1: f64,

        /// Use the finite-displacement formulation instead of the
        /// small-displacement linear approximation.
        pub nl_geom: bool,

        /// Mounting side of the horizontal actuator.
        pub act0_side: ActuatorSide,

        /// In-plane angle between the structural model axes and the local
        /// rig axes, in degrees.
        pub phi_loc_x: f64,
    }

    impl Parameters {
        /// A symmetric rig with equal diagonal actuators and arms, linear
        /// geometry, horizontal actuator on the left. Used by the demo and
        /// as a starting point for custom configurations.
        pub fn symmetric_rig() -> Self {
            Parameters {
                la0: 2.0,
                la1: 3.0,
                la2: 3.0,
                l0: 1.5,
                l1: 1.5,
                nl_geom: false,
                act0_side: ActuatorSide::Left,
                phi_loc_x: 0.0,
            }
        }

        /// Checks that every length is strictly positive (this also keeps
        /// `l0 + l1` away from zero, which several transforms divide by).
        /// The transforms themselves never validate, so call this once at
        /// configuration time.
        pub fn validated(self) -> Result<Self, ParameterError> {
            for (name, value) in [
                ("la0", self.la0),
                ("la1", self.la1),
                ("la2", self.la2),
                ("l0", self.l0),
                ("l1", self.l1),
            ] {
                if !(value.is_finite() && value > 0.0) {
                    return Err(ParameterError::NonPositiveLength { name, value });
                }
            }
            Ok(self)
        }

        /// Convert to string yaml representation (quick viewing, etc).
        pub fn to_yaml(&self) -> String {
            format!(
                "vbrace_geometric_parameters:\n  \
              la0: {}\n  \
              la1: {}\n  \
              la2: {}\n  \
              l0: {}\n  \
              l1: {}\n\
            vbrace_nonlinear_geometry: {}\n\
            vbrace_actuator_side: {}\n\
            vbrace_phi_loc_x: {}\n",
                self.la0,
                self.la1,
                self.la2,
                self.l0,
                self.l1,
                self.nl_geom,
                self.act0_side,
                self.phi_loc_x
            )
        }
    }

    impl fmt::Display for Parameters {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(
                f,
                "actuator lengths {}, {}, {}; rigid arms {}, {}; nonlinear: {}; \
                 horizontal actuator: {}; phi: {} deg",
                self.la0, self.la1, self.la2, self.l0, self.l1,
                self.nl_geom, self.act0_side, self.phi_loc_x
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::vbrace_kinematics::{ActuatorSide, Parameters};

    #[test]
    fn test_validated_accepts_positive_lengths() {
        assert!(Parameters::symmetric_rig().validated().is_ok());
    }

    #[test]
    fn test_validated_rejects_zero_arm() {
        let parameters = Parameters { l0: 0.0, ..Parameters::symmetric_rig() };
        assert!(parameters.validated().is_err());
    }

    #[test]
    fn test_validated_rejects_negative_actuator_length() {
        let parameters = Parameters { la2: -3.0, ..Parameters::symmetric_rig() };
        assert!(parameters.validated().is_err());
    }

    #[test]
    fn test_validated_rejects_nan() {
        let parameters = Parameters { la0: f64::NAN, ..Parameters::symmetric_rig() };
        assert!(parameters.validated().is_err());
    }

    #[test]
    fn test_yaml_lists_all_parameters() {
        let yaml = Parameters {
            nl_geom: true,
            act0_side: ActuatorSide::Right,
            phi_loc_x: 30.0,
            ..Parameters::symmetric_rig()
        }
        .to_yaml();
        assert!(yaml.contains("la0: 2"));
        assert!(yaml.contains("vbrace_nonlinear_geometry: true"));
        assert!(yaml.contains("vbrace_actuator_side: right"));
        assert!(yaml.contains("vbrace_phi_loc_x: 30"));
    }
}
