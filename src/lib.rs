//! Rust implementation of the bidirectional kinematic transformations for an
//! inverted-V ("chevron") actuator brace restraining a planar structural
//! interface point with three degrees of freedom: horizontal displacement,
//! vertical displacement and in-plane rotation.
//!
//! The brace is driven by three actuators. One is horizontal (its sign
//! convention depends on the side it is mounted on); the other two are
//! near-vertical and connect to the interface point through rigid arms. The
//! engine converts between structural response quantities and actuator
//! channel values in both directions:
//!
//! - **trial direction**: structural commands (displacement, velocity,
//!   acceleration, force, time) become the three actuator commands sent to
//!   the actuator driver;
//! - **DAQ direction**: measured actuator feedback becomes the structural
//!   response reported back to the coordinating controller.
//!
//! # Features
//!
//! - Small-displacement linear approximation and finite-displacement
//!   nonlinear formulation, selectable per rig, for both mounting sides of
//!   the horizontal actuator.
//! - Nonlinear velocity and acceleration commands are the exact analytic
//!   time derivatives of the actuator length relation, not independent
//!   approximations.
//! - The nonlinear inverse of measured displacements has no closed form; a
//!   bounded Newton-Raphson solve with an analytic Jacobian recovers the
//!   rigid-arm angles (at most 15 iterations, best-effort result reported
//!   on non-convergence). Every transform call completes in bounded time,
//!   as required inside a fixed-period control loop.
//! - Branches without a nonlinear formulation (force commands, measured
//!   velocities and accelerations) degrade to the linear formulas and say
//!   so once per engine instance through `tracing`.
//! - An optional in-plane rotation maps between the structural model axes
//!   and the local rig axes.
//! - Rig geometry can be read from YAML files (optional `allow_filesystem`
//!   feature).
//!
//! # Parameters
//!
//! Five lengths describe the rig: the three nominal actuator lengths and
//! the two rigid-arm lengths, plus the mounting side of the horizontal
//! actuator, a nonlinear-geometry flag, and the local-axis rotation angle
//! in degrees. Fill out a [`parameters::vbrace_kinematics::Parameters`]
//! structure, or load one from YAML.

pub mod parameters;

pub mod parameter_error;

#[cfg(feature = "allow_filesystem")]
pub mod parameters_from_file;

pub mod utils;
pub mod kinematic_traits;
pub mod kinematics_impl;

pub mod angle_solver;

mod warnings;

#[cfg(test)]
mod tests;
