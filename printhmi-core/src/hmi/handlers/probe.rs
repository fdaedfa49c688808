//! Manual Z probing

use crate::hmi::{Hmi, HmiError, ProbeSession, PROBE_STEPS_UM};
use crate::input::InputSymbol;
use crate::state::MenuState;
use crate::traits::{DisplaySurface, PrinterController};

/// Whole millimetres at or below `um`
fn floor_mm(um: i32) -> i32 {
    um.div_euclid(1000)
}

/// Whole millimetres at or above `um`
fn ceil_mm(um: i32) -> i32 {
    -(-um).div_euclid(1000)
}

impl<D: DisplaySurface, C: PrinterController> Hmi<D, C> {
    pub(in crate::hmi) fn manual_probe(&mut self, symbol: InputSymbol) -> Result<(), HmiError> {
        let z_um = self
            .status_snapshot()
            .probe
            .map(|p| p.z_um)
            .unwrap_or(0);
        let step = PROBE_STEPS_UM[self.probe.step_index % PROBE_STEPS_UM.len()];
        let range = self.config.limits.z;

        let mut rejected = false;
        if symbol.is_cw() {
            if floor_mm(z_um - step) <= range.min_mm as i32 {
                warn!("probe move to {}um below z limit", z_um - step);
                rejected = true;
            } else {
                self.controller.probe_adjust(-step)?;
            }
        } else if symbol.is_ccw() {
            if ceil_mm(z_um + step) >= range.max_mm as i32 {
                warn!("probe move to {}um above z limit", z_um + step);
                rejected = true;
            } else {
                self.controller.probe_adjust(step)?;
            }
        } else if symbol == InputSymbol::Enter {
            self.probe.step_index = (self.probe.step_index + 1) % PROBE_STEPS_UM.len();
        } else if symbol == InputSymbol::LongEnter {
            self.controller.probe_accept()?;
            info!("probe accepted at {}um", z_um);
            self.probe = ProbeSession::default();
            return self.show(MenuState::MainMenu);
        } else {
            return Ok(());
        }

        self.probe.out_of_range = rejected;
        self.draw_probe(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_toward_limits() {
        assert_eq!(floor_mm(1500), 1);
        assert_eq!(floor_mm(-50), -1);
        assert_eq!(ceil_mm(1500), 2);
        assert_eq!(ceil_mm(2000), 2);
        assert_eq!(ceil_mm(-50), 0);
    }
}
