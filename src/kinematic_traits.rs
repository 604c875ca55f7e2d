//! Type aliases, size declarations and the transformation trait shared
//! between the rig and the coordinating controller.

use nalgebra::{Vector3, Vector6};

/// Structural response triple in the order horizontal, vertical, rotation.
/// Depending on context it holds displacements, velocities, accelerations
/// or forces; the rotation slot is radians (or a moment for forces).
pub type Structural = Vector3<f64>;

/// One value per physical actuator, indices 0 to 2. Actuator 0 is the
/// horizontal one; its sign convention depends on the mounting side.
pub type Actuators = Vector3<f64>;

/// Measured forces as delivered by the DAQ system. The sizing contract
/// declares six slots; the setup passes all measured values through and
/// never computes more than the three actuator channels itself.
pub type DaqForces = Vector6<f64>;

/// Number of values exchanged for each response quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseSizes {
    pub disp: usize,
    pub vel: usize,
    pub accel: usize,
    pub force: usize,
    pub time: usize,
}

/// The four directional size declarations of a setup: commands accepted
/// from the coordinating controller (`trial`), responses reported back to
/// it (`out`), commands sent to the actuator driver (`ctrl`) and feedback
/// read from the DAQ system (`daq`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupSizes {
    pub trial: ResponseSizes,
    pub out: ResponseSizes,
    pub ctrl: ResponseSizes,
    pub daq: ResponseSizes,
}

/// Structural command bundle for the trial direction. Every quantity is
/// optional. Velocity is only transformed when displacement is supplied as
/// well, and acceleration when displacement and velocity both are; the
/// finite-displacement derivatives need the lower-order quantities.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrialResponse {
    pub disp: Option<Structural>,
    pub vel: Option<Structural>,
    pub accel: Option<Structural>,
    pub force: Option<Structural>,
    pub time: Option<f64>,
}

/// Actuator command bundle produced from a [`TrialResponse`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ActuatorCommands {
    pub disp: Option<Actuators>,
    pub vel: Option<Actuators>,
    pub accel: Option<Actuators>,
    pub force: Option<Actuators>,
    pub time: Option<f64>,
}

/// Measured actuator bundle for the DAQ direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct DaqMeasurement {
    pub disp: Option<Actuators>,
    pub vel: Option<Actuators>,
    pub accel: Option<Actuators>,
    pub force: Option<DaqForces>,
    pub time: Option<f64>,
}

/// Structural response bundle produced from a [`DaqMeasurement`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralResponse {
    pub disp: Option<Structural>,
    pub vel: Option<Structural>,
    pub accel: Option<Structural>,
    pub force: Option<DaqForces>,
    pub time: Option<f64>,
}

/// The transformation surface a rig setup offers to the coordinating
/// controller. Buffer management and unit scaling stay with the caller;
/// the setup only converts between the two coordinate spaces.
pub trait SetupTransform {
    /// Size declarations for the four data directions of this setup.
    fn sizes(&self) -> SetupSizes;

    /// Transform structural commands into actuator commands.
    fn transform_trial(&mut self, trial: &TrialResponse) -> ActuatorCommands;

    /// Transform measured actuator feedback into structural responses.
    fn transform_daq(&mut self, daq: &DaqMeasurement) -> StructuralResponse;

    /// A copy of this setup with its own, re-armed diagnostic state.
    fn fresh_copy(&self) -> Box<dyn SetupTransform>;
}
