use anyhow::Result;
use rs_vbrace_kinematics::kinematic_traits::{SetupTransform, Structural, TrialResponse};
use rs_vbrace_kinematics::kinematics_impl::VBraceKinematics;
use rs_vbrace_kinematics::parameters::vbrace_kinematics::{ActuatorSide, Parameters};
use rs_vbrace_kinematics::utils::{dump_actuators, dump_structural};

/// Usage example.
fn main() -> Result<()> {
    let parameters = Parameters::symmetric_rig().validated()?;
    let engine = VBraceKinematics::new(parameters);

    let disp = Structural::new(0.05, -0.03, 0.01);
    println!("Structural displacement command:");
    dump_structural("  trial", &disp);

    println!("Linear geometry actuator commands and the reconstruction:");
    let commands = engine.trial_disp(&disp);
    dump_actuators("  ctrl", &commands);
    dump_structural("  daq ", &engine.daq_disp(&commands));

    println!("Nonlinear geometry, horizontal actuator on the right:");
    let mut nonlinear = VBraceKinematics::new(Parameters {
        nl_geom: true,
        act0_side: ActuatorSide::Right,
        ..parameters
    });
    let commands = nonlinear.trial_disp(&disp);
    dump_actuators("  ctrl", &commands);
    dump_structural("  daq ", &nonlinear.daq_disp(&commands));

    // The aggregate entry point transforms whatever quantities are present;
    // the nonlinear force command falls back to the linear equilibrium and
    // reports the degradation once for this instance.
    println!("Full trial bundle through the setup interface:");
    let bundle = TrialResponse {
        disp: Some(disp),
        vel: Some(Structural::new(0.3, 0.2, 0.05)),
        accel: Some(Structural::new(1.0, -0.5, 0.2)),
        force: Some(Structural::new(12.0, 5.0, -3.0)),
        time: Some(0.25),
    };
    let commands = nonlinear.transform_trial(&bundle);
    if let Some(vel) = commands.vel {
        dump_actuators("  vel  ", &vel);
    }
    if let Some(accel) = commands.accel {
        dump_actuators("  accel", &accel);
    }
    if let Some(force) = commands.force {
        dump_actuators("  force", &force);
    }

    #[cfg(feature = "allow_filesystem")]
    {
        // This requires the YAML library
        println!("Configuration:\n{}", parameters.to_yaml());
        let reread = Parameters::from_yaml(&parameters.to_yaml())?;
        println!("Re-read from YAML: {}", reread);
    }

    Ok(())
}
