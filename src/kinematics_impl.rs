//! The kinematic transformation engine for the inverted-V brace rig.

use crate::angle_solver::solve_angles;
use crate::kinematic_traits::{
    ActuatorCommands, Actuators, DaqForces, DaqMeasurement, ResponseSizes, SetupSizes,
    SetupTransform, Structural, StructuralResponse, TrialResponse,
};
use crate::parameters::vbrace_kinematics::{ActuatorSide, Parameters};
use crate::warnings::WarningState;
use nalgebra::Matrix3;
use tracing::warn;

/// Bidirectional transformation engine between structural response
/// quantities and the three actuator channels of the brace.
///
/// The trial direction turns structural commands into actuator commands;
/// the DAQ direction turns measured actuator feedback back into structural
/// responses. Both directions honor the configured geometry regime and the
/// mounting side of the horizontal actuator. An engine owns its diagnostic
/// throttle state, so a single instance must not be invoked concurrently;
/// independent instances are fully independent.
pub struct VBraceKinematics {
    parameters: Parameters,

    /// In-plane rotation between structural and local rig axes. The third
    /// row and column pass the rotation degree of freedom through
    /// unchanged, so the transpose undoes the rotation on the DAQ side.
    rot_loc_x: Matrix3<f64>,

    pub(crate) warnings: WarningState,
}

/// Vector from an actuator's fixed pivot to its attachment point on the
/// brace, together with its first two time derivatives. The actuator
/// channel values are the length of this vector (less the nominal actuator
/// length) and the derivatives of that length.
struct Leg {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    ax: f64,
    ay: f64,
}

impl Leg {
    fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Length change relative to the nominal actuator length.
    fn stretch(&self, nominal: f64) -> f64 {
        self.length() - nominal
    }

    /// First time derivative of the length.
    fn rate(&self) -> f64 {
        (self.x * self.vx + self.y * self.vy) / self.length()
    }

    /// Second time derivative of the length.
    fn accel(&self) -> f64 {
        let length = self.length();
        let radial = self.x * self.vx + self.y * self.vy;
        (self.vx * self.vx + self.vy * self.vy + self.x * self.ax + self.y * self.ay) / length
            - radial * radial / (length * length * length)
    }
}

/// Motion of the brace attachment point reached through the rigid arm of
/// length `arm`, for local displacement `d`, velocity `v` and acceleration
/// `a`. `dir` is +1.0 for the arm paired with actuator 1 and -1.0 for the
/// arm paired with actuator 2.
fn arm_attachment(arm: f64, dir: f64, d: &Structural, v: &Structural, a: &Structural) -> Leg {
    let (sin, cos) = d.z.sin_cos();
    Leg {
        x: d.x + dir * arm * (1.0 - cos),
        y: d.y - dir * arm * sin,
        vx: v.x + dir * arm * sin * v.z,
        vy: v.y - dir * arm * cos * v.z,
        ax: a.x + dir * arm * (cos * v.z * v.z + sin * a.z),
        ay: a.y + dir * arm * (sin * v.z * v.z - cos * a.z),
    }
}

impl VBraceKinematics {
    /// Creates a new engine for the given rig geometry.
    pub fn new(parameters: Parameters) -> Self {
        let (sin, cos) = parameters.phi_loc_x.to_radians().sin_cos();
        let rot_loc_x = Matrix3::new(
            cos, -sin, 0.0,
            sin, cos, 0.0,
            0.0, 0.0, 1.0,
        );
        VBraceKinematics {
            parameters,
            rot_loc_x,
            warnings: WarningState::new(),
        }
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// The three actuator legs for the rotated structural motion. Fixed
    /// per-actuator offsets shift the pivot position and leave the
    /// derivatives untouched.
    fn legs(&self, d: &Structural, v: &Structural, a: &Structural) -> [Leg; 3] {
        let p = &self.parameters;
        let leg0 = match p.act0_side {
            ActuatorSide::Left => {
                let mut leg = arm_attachment(p.l0, 1.0, d, v, a);
                leg.x += p.la0;
                leg
            }
            ActuatorSide::Right => {
                let mut leg = arm_attachment(p.l1, -1.0, d, v, a);
                leg.x -= p.la0;
                leg
            }
        };
        let mut leg1 = arm_attachment(p.l0, 1.0, d, v, a);
        leg1.y += p.la1;
        let mut leg2 = arm_attachment(p.l1, -1.0, d, v, a);
        leg2.y += p.la2;
        [leg0, leg1, leg2]
    }

    /// Structural displacement command to actuator displacement commands.
    pub fn trial_disp(&self, disp: &Structural) -> Actuators {
        let d = self.rot_loc_x * disp;
        let p = &self.parameters;
        match (p.nl_geom, p.act0_side) {
            (false, ActuatorSide::Left) => {
                Actuators::new(d.x, d.y - p.l0 * d.z, d.y + p.l1 * d.z)
            }
            (false, ActuatorSide::Right) => {
                Actuators::new(-d.x, d.y - p.l0 * d.z, d.y + p.l1 * d.z)
            }
            (true, _) => {
                let rest = Structural::zeros();
                let legs = self.legs(&d, &rest, &rest);
                Actuators::new(
                    legs[0].stretch(p.la0),
                    legs[1].stretch(p.la1),
                    legs[2].stretch(p.la2),
                )
            }
        }
    }

    /// Structural velocity command to actuator velocity commands. The
    /// finite-displacement branch is the exact time derivative of the
    /// displacement relation, which is why the displacement command is
    /// needed as well.
    pub fn trial_vel(&self, disp: &Structural, vel: &Structural) -> Actuators {
        let v = self.rot_loc_x * vel;
        let p = &self.parameters;
        match (p.nl_geom, p.act0_side) {
            (false, ActuatorSide::Left) => {
                Actuators::new(v.x, v.y - p.l0 * v.z, v.y + p.l1 * v.z)
            }
            (false, ActuatorSide::Right) => {
                Actuators::new(-v.x, v.y - p.l0 * v.z, v.y + p.l1 * v.z)
            }
            (true, _) => {
                let d = self.rot_loc_x * disp;
                let legs = self.legs(&d, &v, &Structural::zeros());
                Actuators::new(legs[0].rate(), legs[1].rate(), legs[2].rate())
            }
        }
    }

    /// Structural acceleration command to actuator acceleration commands,
    /// the second exact time derivative of the displacement relation in
    /// finite-displacement geometry.
    pub fn trial_accel(
        &self,
        disp: &Structural,
        vel: &Structural,
        accel: &Structural,
    ) -> Actuators {
        let a = self.rot_loc_x * accel;
        let p = &self.parameters;
        match (p.nl_geom, p.act0_side) {
            (false, ActuatorSide::Left) => {
                Actuators::new(a.x, a.y - p.l0 * a.z, a.y + p.l1 * a.z)
            }
            (false, ActuatorSide::Right) => {
                Actuators::new(-a.x, a.y - p.l0 * a.z, a.y + p.l1 * a.z)
            }
            (true, _) => {
                let d = self.rot_loc_x * disp;
                let v = self.rot_loc_x * vel;
                let legs = self.legs(&d, &v, &a);
                Actuators::new(legs[0].accel(), legs[1].accel(), legs[2].accel())
            }
        }
    }

    /// Structural force command to actuator force commands. There is no
    /// finite-displacement force transform; that branch degrades to the
    /// linear rigid-body equilibrium and says so once per instance.
    pub fn trial_force(&mut self, force: &Structural) -> Actuators {
        let f = self.rot_loc_x * force;
        let p = self.parameters;
        if p.nl_geom {
            WarningState::warn_once(
                &mut self.warnings.trial_force,
                format_args!(
                    "nonlinear geometry with horizontal actuator {} has no force \
                     transform yet, using linear geometry instead",
                    p.act0_side
                ),
            );
        }
        let horizontal = match p.act0_side {
            ActuatorSide::Left => f.x,
            ActuatorSide::Right => -f.x,
        };
        // moment and vertical-force equilibrium over the two diagonals
        let span = p.l0 + p.l1;
        Actuators::new(
            horizontal,
            (p.l1 * f.y - f.z) / span,
            (p.l0 * f.y + f.z) / span,
        )
    }

    /// Time passes through unchanged; unit scaling lives with the caller.
    pub fn trial_time(&self, time: f64) -> f64 {
        time
    }

    /// Measured actuator displacements back to the structural displacement
    /// response. In finite-displacement geometry this runs the bounded
    /// angle solve; non-convergence is logged on every affected call and
    /// the last iterate is still used.
    pub fn daq_disp(&self, disp: &Actuators) -> Structural {
        let p = &self.parameters;
        let local = match (p.nl_geom, p.act0_side) {
            (false, ActuatorSide::Left) => linear_daq(p, disp, 1.0),
            (false, ActuatorSide::Right) => linear_daq(p, disp, -1.0),
            (true, side) => {
                let solution = solve_angles(p, disp);
                if !solution.converged {
                    warn!(
                        "did not find the arm angles after {} iterations, step norm {}",
                        solution.iterations, solution.delta_norm
                    );
                }
                let d1 = p.la1 + disp[1];
                let d2 = p.la2 + disp[2];
                let (sin0, cos0) = solution.theta0.sin_cos();
                let (sin1, cos1) = solution.theta1.sin_cos();
                let span = p.l0 + p.l1;
                let vertical = d2 * cos1 + p.la1 - p.la2 - d1 * cos0;
                let rotation = match side {
                    ActuatorSide::Left => {
                        vertical.atan2(d2 * sin1 + span - d1 * sin0)
                    }
                    ActuatorSide::Right => {
                        vertical.atan2(-d2 * sin1 + span + d1 * sin0)
                    }
                };
                let x = match side {
                    ActuatorSide::Left => d1 * sin0 + p.l0 * rotation.cos() - p.l0,
                    ActuatorSide::Right => -d1 * sin0 + p.l0 * rotation.cos() - p.l0,
                };
                let y = d1 * cos0 + p.l0 * rotation.sin() - p.la1;
                Structural::new(x, y, rotation)
            }
        };
        self.rotate_back(local)
    }

    /// Measured actuator velocities back to a structural velocity response.
    /// No finite-displacement inverse is implemented for velocities; the
    /// linear inverse is used and the degradation reported once per
    /// instance.
    pub fn daq_vel(&mut self, vel: &Actuators) -> Structural {
        let p = self.parameters;
        if p.nl_geom {
            WarningState::warn_once(
                &mut self.warnings.daq_vel,
                format_args!(
                    "nonlinear geometry with horizontal actuator {} has no inverse \
                     for measured velocities yet, using linear geometry instead",
                    p.act0_side
                ),
            );
        }
        let sign = match p.act0_side {
            ActuatorSide::Left => 1.0,
            ActuatorSide::Right => -1.0,
        };
        self.rotate_back(linear_daq(&p, vel, sign))
    }

    /// Measured actuator accelerations back to a structural acceleration
    /// response, with the same linear degradation as [`Self::daq_vel`].
    pub fn daq_accel(&mut self, accel: &Actuators) -> Structural {
        let p = self.parameters;
        if p.nl_geom {
            WarningState::warn_once(
                &mut self.warnings.daq_accel,
                format_args!(
                    "nonlinear geometry with horizontal actuator {} has no inverse \
                     for measured accelerations yet, using linear geometry instead",
                    p.act0_side
                ),
            );
        }
        let sign = match p.act0_side {
            ActuatorSide::Left => 1.0,
            ActuatorSide::Right => -1.0,
        };
        self.rotate_back(linear_daq(&p, accel, sign))
    }

    /// Measured forces pass through unchanged. Six slots are declared for
    /// this quantity and all six measured values are copied; the local-axis
    /// rotation does not apply to this vector.
    pub fn daq_force(&self, force: &DaqForces) -> DaqForces {
        *force
    }

    /// Measured time passes through unchanged.
    pub fn daq_time(&self, time: f64) -> f64 {
        time
    }

    fn rotate_back(&self, local: Structural) -> Structural {
        if self.parameters.phi_loc_x != 0.0 {
            self.rot_loc_x.transpose() * local
        } else {
            local
        }
    }
}

/// Closed-form inverse of the linear actuator relations. `sign` carries
/// the horizontal actuator's orientation convention.
fn linear_daq(p: &Parameters, measured: &Actuators, sign: f64) -> Structural {
    let span = p.l0 + p.l1;
    Structural::new(
        sign * measured[0],
        (p.l1 * measured[1] + p.l0 * measured[2]) / span,
        (-measured[1] + measured[2]) / span,
    )
}

impl Clone for VBraceKinematics {
    /// Copies re-arm the diagnostic throttle so every instance reports its
    /// own degraded branches.
    fn clone(&self) -> Self {
        VBraceKinematics::new(self.parameters)
    }
}

impl SetupTransform for VBraceKinematics {
    fn sizes(&self) -> SetupSizes {
        // Commands carry 3 values per quantity; the measured direction
        // declares 6 force slots, of which only the actuator channels are
        // ever computed here.
        const COMMAND: ResponseSizes = ResponseSizes {
            disp: 3,
            vel: 3,
            accel: 3,
            force: 3,
            time: 1,
        };
        const MEASURED: ResponseSizes = ResponseSizes {
            disp: 3,
            vel: 3,
            accel: 3,
            force: 6,
            time: 1,
        };
        SetupSizes {
            trial: COMMAND,
            out: MEASURED,
            ctrl: COMMAND,
            daq: MEASURED,
        }
    }

    fn transform_trial(&mut self, trial: &TrialResponse) -> ActuatorCommands {
        let mut commands = ActuatorCommands::default();
        if let Some(disp) = &trial.disp {
            commands.disp = Some(self.trial_disp(disp));
            if let Some(vel) = &trial.vel {
                commands.vel = Some(self.trial_vel(disp, vel));
                if let Some(accel) = &trial.accel {
                    commands.accel = Some(self.trial_accel(disp, vel, accel));
                }
            }
        }
        if let Some(force) = &trial.force {
            commands.force = Some(self.trial_force(force));
        }
        if let Some(time) = trial.time {
            commands.time = Some(self.trial_time(time));
        }
        commands
    }

    fn transform_daq(&mut self, daq: &DaqMeasurement) -> StructuralResponse {
        let mut response = StructuralResponse::default();
        if let Some(disp) = &daq.disp {
            response.disp = Some(self.daq_disp(disp));
        }
        if let Some(vel) = &daq.vel {
            response.vel = Some(self.daq_vel(vel));
        }
        if let Some(accel) = &daq.accel {
            response.accel = Some(self.daq_accel(accel));
        }
        if let Some(force) = &daq.force {
            response.force = Some(self.daq_force(force));
        }
        if let Some(time) = daq.time {
            response.time = Some(self.daq_time(time));
        }
        response
    }

    fn fresh_copy(&self) -> Box<dyn SetupTransform> {
        Box::new(self.clone())
    }
}
