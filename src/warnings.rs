//! Once-per-instance throttling for the degraded transform path notices.

use std::fmt;
use tracing::warn;

/// One flag per transform path that falls back to the linear formulas in
/// nonlinear geometry. Flags start armed and flip on first emission; each
/// engine copy gets a fresh set and reports independently.
#[derive(Debug)]
pub(crate) struct WarningState {
    pub trial_force: bool,
    pub daq_vel: bool,
    pub daq_accel: bool,
}

impl WarningState {
    pub fn new() -> Self {
        WarningState {
            trial_force: true,
            daq_vel: true,
            daq_accel: true,
        }
    }

    /// Emits the message and clears the flag on first call; later calls on
    /// the same flag stay silent. Returns whether a message went out.
    pub fn warn_once(flag: &mut bool, message: fmt::Arguments<'_>) -> bool {
        if *flag {
            warn!("{}", message);
            *flag = false;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warns_exactly_once_per_flag() {
        let mut state = WarningState::new();
        let mut emitted = 0;
        for _ in 0..3 {
            if WarningState::warn_once(&mut state.trial_force, format_args!("degraded path")) {
                emitted += 1;
            }
        }
        assert_eq!(emitted, 1);
        assert!(!state.trial_force);
        // untouched flags stay armed
        assert!(state.daq_vel);
        assert!(state.daq_accel);
    }

    #[test]
    fn test_fresh_state_rearms() {
        let mut state = WarningState::new();
        assert!(WarningState::warn_once(&mut state.daq_vel, format_args!("first")));
        assert!(!WarningState::warn_once(&mut state.daq_vel, format_args!("second")));

        let mut fresh = WarningState::new();
        assert!(WarningState::warn_once(&mut fresh.daq_vel, format_args!("again")));
    }
}
