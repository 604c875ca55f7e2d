#[cfg(test)]
mod tests {
    use crate::kinematic_traits::{Actuators, Structural};
    use crate::kinematics_impl::VBraceKinematics;
    use crate::parameters::vbrace_kinematics::{ActuatorSide, Parameters};

    const DT: f64 = 1e-4;

    const BOTH_SIDES: [ActuatorSide; 2] = [ActuatorSide::Left, ActuatorSide::Right];

    /// Displacement, velocity, acceleration triples sampled away from the
    /// rest configuration.
    fn samples() -> [(Structural, Structural, Structural); 3] {
        [
            (
                Structural::new(0.02, -0.01, 0.004),
                Structural::new(0.3, 0.2, 0.05),
                Structural::new(1.0, -0.5, 0.2),
            ),
            (
                Structural::new(-0.03, 0.02, -0.006),
                Structural::new(-0.1, 0.4, -0.08),
                Structural::new(0.5, 0.8, -0.3),
            ),
            (
                Structural::new(0.01, 0.01, 0.002),
                Structural::new(0.2, -0.3, 0.1),
                Structural::new(-1.2, 0.4, 0.15),
            ),
        ]
    }

    fn nonlinear_rig(side: ActuatorSide, phi_loc_x: f64) -> VBraceKinematics {
        VBraceKinematics::new(Parameters {
            nl_geom: true,
            act0_side: side,
            phi_loc_x,
            ..Parameters::symmetric_rig()
        })
    }

    /// Structural displacement along the quadratic motion at time `t`.
    fn displacement_at(
        d: &Structural,
        v: &Structural,
        a: &Structural,
        t: f64,
    ) -> Structural {
        d + v * t + a * (0.5 * t * t)
    }

    fn assert_relative_close(actual: &Actuators, reference: &Actuators, tolerance: f64) {
        for i in 0..3 {
            let scale = actual[i].abs().max(1e-3);
            assert!(
                ((actual[i] - reference[i]) / scale).abs() < tolerance,
                "channel {}: {} vs finite difference {}",
                i,
                actual[i],
                reference[i]
            );
        }
    }

    #[test]
    fn test_nonlinear_velocity_matches_finite_difference() {
        for side in BOTH_SIDES {
            let engine = nonlinear_rig(side, 0.0);
            for (d, v, a) in samples() {
                let plus = engine.trial_disp(&displacement_at(&d, &v, &a, DT));
                let minus = engine.trial_disp(&displacement_at(&d, &v, &a, -DT));
                let finite_difference = (plus - minus) / (2.0 * DT);
                let analytic = engine.trial_vel(&d, &v);
                assert_relative_close(&analytic, &finite_difference, 1e-3);
            }
        }
    }

    #[test]
    fn test_nonlinear_acceleration_matches_finite_difference() {
        for side in BOTH_SIDES {
            let engine = nonlinear_rig(side, 0.0);
            for (d, v, a) in samples() {
                let plus = engine.trial_disp(&displacement_at(&d, &v, &a, DT));
                let center = engine.trial_disp(&d);
                let minus = engine.trial_disp(&displacement_at(&d, &v, &a, -DT));
                let finite_difference = (plus - center * 2.0 + minus) / (DT * DT);
                let analytic = engine.trial_accel(&d, &v, &a);
                assert_relative_close(&analytic, &finite_difference, 1e-3);
            }
        }
    }

    #[test]
    fn test_derivatives_consistent_under_local_axis_rotation() {
        let engine = nonlinear_rig(ActuatorSide::Left, 20.0);
        let (d, v, a) = samples()[0];
        let plus = engine.trial_disp(&displacement_at(&d, &v, &a, DT));
        let minus = engine.trial_disp(&displacement_at(&d, &v, &a, -DT));
        let finite_difference = (plus - minus) / (2.0 * DT);
        let analytic = engine.trial_vel(&d, &v);
        assert_relative_close(&analytic, &finite_difference, 1e-3);
    }

    #[test]
    fn test_linear_derivatives_share_the_displacement_form() {
        // linear operators commute with differentiation, so velocity and
        // acceleration commands use the displacement formula verbatim
        let engine = VBraceKinematics::new(Parameters::symmetric_rig());
        let v = Structural::new(0.3, 0.2, 0.05);
        let a = Structural::new(1.0, -0.5, 0.2);
        let unused = Structural::new(9.9, -9.9, 9.9);
        assert_eq!(engine.trial_vel(&unused, &v), engine.trial_disp(&v));
        assert_eq!(engine.trial_accel(&unused, &unused, &a), engine.trial_disp(&a));
    }
}
