#[cfg(test)]
mod tests {
    use crate::kinematic_traits::Structural;
    use crate::kinematics_impl::VBraceKinematics;
    use crate::parameters::vbrace_kinematics::{ActuatorSide, Parameters};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const BOTH_SIDES: [ActuatorSide; 2] = [ActuatorSide::Left, ActuatorSide::Right];

    fn rig(nl_geom: bool, side: ActuatorSide, phi_loc_x: f64) -> VBraceKinematics {
        VBraceKinematics::new(Parameters {
            nl_geom,
            act0_side: side,
            phi_loc_x,
            ..Parameters::symmetric_rig()
        })
    }

    fn assert_structural_close(actual: &Structural, expected: &Structural, tolerance: f64) {
        for i in 0..3 {
            assert!(
                (actual[i] - expected[i]).abs() < tolerance,
                "component {}: {} is not within {} of {}",
                i,
                actual[i],
                tolerance,
                expected[i]
            );
        }
    }

    #[test]
    fn test_linear_round_trip_both_sides() {
        let disp = Structural::new(0.1, -0.2, 0.03);
        for side in BOTH_SIDES {
            let engine = rig(false, side, 0.0);
            let reconstructed = engine.daq_disp(&engine.trial_disp(&disp));
            assert_structural_close(&reconstructed, &disp, 1e-10);
        }
    }

    #[test]
    fn test_linear_round_trip_random_sweep() {
        let mut rng = StdRng::seed_from_u64(97);
        for side in BOTH_SIDES {
            let engine = rig(false, side, 0.0);
            for _ in 0..200 {
                let disp = Structural::new(
                    rng.gen_range(-0.5..0.5),
                    rng.gen_range(-0.5..0.5),
                    rng.gen_range(-0.2..0.2),
                );
                let reconstructed = engine.daq_disp(&engine.trial_disp(&disp));
                assert_structural_close(&reconstructed, &disp, 1e-10);
            }
        }
    }

    #[test]
    fn test_nonlinear_round_trip_both_sides() {
        let disp = Structural::new(0.01, 0.02, 0.001);
        for side in BOTH_SIDES {
            let engine = rig(true, side, 0.0);
            let reconstructed = engine.daq_disp(&engine.trial_disp(&disp));
            assert_structural_close(&reconstructed, &disp, 1e-6);
        }
    }

    #[test]
    fn test_nonlinear_round_trip_random_sweep() {
        let mut rng = StdRng::seed_from_u64(541);
        for side in BOTH_SIDES {
            let engine = rig(true, side, 0.0);
            for _ in 0..100 {
                let disp = Structural::new(
                    rng.gen_range(-0.05..0.05),
                    rng.gen_range(-0.05..0.05),
                    rng.gen_range(-0.01..0.01),
                );
                let reconstructed = engine.daq_disp(&engine.trial_disp(&disp));
                assert_structural_close(&reconstructed, &disp, 1e-6);
            }
        }
    }

    #[test]
    fn test_round_trip_with_local_axis_rotation() {
        let disp = Structural::new(0.02, -0.01, 0.004);
        for side in BOTH_SIDES {
            let linear = rig(false, side, 30.0);
            let reconstructed = linear.daq_disp(&linear.trial_disp(&disp));
            assert_structural_close(&reconstructed, &disp, 1e-10);

            let nonlinear = rig(true, side, 30.0);
            let reconstructed = nonlinear.daq_disp(&nonlinear.trial_disp(&disp));
            assert_structural_close(&reconstructed, &disp, 1e-6);
        }
    }

    #[test]
    fn test_rotation_identity_at_zero_angle() {
        // with phi = 0 the commands equal the plain brace formulas
        let engine = rig(false, ActuatorSide::Left, 0.0);
        let disp = Structural::new(0.05, -0.03, 0.01);
        let commands = engine.trial_disp(&disp);
        let expected = [0.05, -0.03 - 1.5 * 0.01, -0.03 + 1.5 * 0.01];
        for i in 0..3 {
            assert!((commands[i] - expected[i]).abs() < 1e-15);
        }
    }

    #[test]
    fn test_force_equilibrium_recovered() {
        // the two diagonal force commands carry the vertical force and the
        // moment exactly; the linear relations invert each other
        let force = Structural::new(7.0, 12.0, -3.0);
        for side in BOTH_SIDES {
            let mut engine = rig(false, side, 0.0);
            let p = *engine.parameters();
            let commands = engine.trial_force(&force);

            let vertical = commands[1] + commands[2];
            let moment = -p.l0 * commands[1] + p.l1 * commands[2];
            assert!((vertical - force.y).abs() < 1e-12);
            assert!((moment - force.z).abs() < 1e-12);

            let expected_horizontal = match side {
                ActuatorSide::Left => force.x,
                ActuatorSide::Right => -force.x,
            };
            assert_eq!(commands[0], expected_horizontal);
        }
    }

    #[test]
    fn test_linear_velocity_round_trip() {
        let vel = Structural::new(0.3, 0.2, 0.05);
        for side in BOTH_SIDES {
            let mut engine = rig(false, side, 15.0);
            let disp = Structural::zeros();
            let commands = engine.trial_vel(&disp, &vel);
            let reconstructed = engine.daq_vel(&commands);
            assert_structural_close(&reconstructed, &vel, 1e-10);
        }
    }
}
