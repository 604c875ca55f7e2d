//! Helper functions

use crate::kinematic_traits::{Actuators, Structural};

/// Print a structural triple, converting the rotation to degrees.
#[allow(dead_code)]
pub fn dump_structural(label: &str, response: &Structural) {
    println!(
        "{label}: x {:9.5}  y {:9.5}  rot {:8.4} deg",
        response.x,
        response.y,
        response.z.to_degrees()
    );
}

/// Print the three actuator channel values.
#[allow(dead_code)]
pub fn dump_actuators(label: &str, values: &Actuators) {
    println!(
        "{label}: [{:9.5} {:9.5} {:9.5}]",
        values[0], values[1], values[2]
    );
}
