//! Newton-Raphson recovery of the rigid-arm angles from measured actuator
//! length changes.
//!
//! In finite-displacement geometry there is no closed form for the
//! structural displacements given the three measured actuator lengths. The
//! triangle-closure constraints of the linked geometry reduce the problem
//! to two unknown arm angles; this module solves that 2x2 nonlinear system
//! with an analytic Jacobian. The closure equation pair differs between the
//! two mounting sides of the horizontal actuator.

use crate::kinematic_traits::Actuators;
use crate::parameters::vbrace_kinematics::{ActuatorSide, Parameters};
use nalgebra::{Matrix2, Vector2};

/// Convergence tolerance on the norm of the Newton step.
const TOLERANCE: f64 = 1e-9;

/// Hard cap on Newton iterations. The solve runs inside a fixed-period
/// control loop, so the worst case must stay bounded.
const MAX_ITERATIONS: usize = 15;

/// Result of an angle solve. `theta0` and `theta1` are the recovered arm
/// angles; when `converged` is false they hold the last iterate, which is
/// still the best available answer.
#[derive(Debug, Clone, Copy)]
pub struct AngleSolution {
    pub theta0: f64,
    pub theta1: f64,
    pub converged: bool,
    pub iterations: usize,

    /// Norm of the last Newton step, reported with non-convergence notices.
    pub delta_norm: f64,
}

/// Solves the closure equations of the linked brace geometry for the two
/// rigid-arm angles, given measured actuator length changes.
///
/// The initial guess is a crude linearization of the horizontal measurement
/// over each diagonal actuator length. Iteration stops once the Newton step
/// norm drops below 1e-9 or after 15 iterations; a singular Jacobian or a
/// non-finite step ends the iteration early. The result is always finite
/// and the call always returns, whatever the measurements.
pub fn solve_angles(parameters: &Parameters, measured: &Actuators) -> AngleSolution {
    let p = parameters;
    let span = p.l0 + p.l1;

    // current actuator lengths
    let d0 = p.la0 + measured[0];
    let d1 = p.la1 + measured[1];
    let d2 = p.la2 + measured[2];

    let mut theta = Vector2::new(measured[0] / p.la1, measured[0] / p.la2);

    let mut iterations = 0;
    let mut delta_norm = f64::INFINITY;
    let mut converged = false;

    while iterations < MAX_ITERATIONS && !converged {
        let (s0, c0) = theta.x.sin_cos();
        let (s1, c1) = theta.y.sin_cos();
        let s01 = (theta.x - theta.y).sin();

        let (residual, jacobian) = match p.act0_side {
            ActuatorSide::Left => {
                let f0 = d0 * d0
                    - (d1 * s0 + p.la0).powi(2)
                    - (d1 * c0 - p.la1).powi(2);
                let f1 = span * span
                    - (d2 * s1 + span - d1 * s0).powi(2)
                    - (d2 * c1 + p.la1 - p.la2 - d1 * c0).powi(2);
                let jacobian = Matrix2::new(
                    2.0 * d1 * (-p.la0 * c0 - p.la1 * s0),
                    0.0,
                    2.0 * d1 * (span * c0 - d2 * s01 - (p.la1 - p.la2) * s0),
                    2.0 * d2 * (-span * c1 + d1 * s01 + (p.la1 - p.la2) * s1),
                );
                (Vector2::new(f0, f1), jacobian)
            }
            ActuatorSide::Right => {
                let f0 = span * span
                    - (-d2 * s1 + span + d1 * s0).powi(2)
                    - (d2 * c1 + p.la1 - p.la2 - d1 * c0).powi(2);
                let f1 = d0 * d0
                    - (-d2 * s1 - p.la0).powi(2)
                    - (d2 * c1 - p.la2).powi(2);
                let jacobian = Matrix2::new(
                    2.0 * d1 * (-span * c0 - d2 * s01 - (p.la1 - p.la2) * s0),
                    2.0 * d2 * (span * c1 + d1 * s01 + (p.la1 - p.la2) * s1),
                    0.0,
                    2.0 * d2 * (-p.la0 * c1 - p.la2 * s1),
                );
                (Vector2::new(f0, f1), jacobian)
            }
        };

        let Some(delta) = jacobian.lu().solve(&residual) else {
            break; // singular Jacobian, no usable step
        };
        if !(delta.x.is_finite() && delta.y.is_finite()) {
            break;
        }

        theta -= delta;
        iterations += 1;
        delta_norm = delta.norm();
        converged = delta_norm < TOLERANCE;
    }

    AngleSolution {
        theta0: theta.x,
        theta1: theta.y,
        converged,
        iterations,
        delta_norm,
    }
}
