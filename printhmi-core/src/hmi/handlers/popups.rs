//! Popups and the icon finder

use crate::hmi::{Hmi, HmiError};
use crate::input::InputSymbol;
use crate::state::MenuState;
use crate::traits::{DisplaySurface, PrinterController};

/// Icon finder cursor bound
const ICON_BOUND: usize = 255;

impl<D: DisplaySurface, C: PrinterController> Hmi<D, C> {
    pub(in crate::hmi) fn feature_not_available(
        &mut self,
        symbol: InputSymbol,
    ) -> Result<(), HmiError> {
        if symbol != InputSymbol::Enter {
            return Ok(());
        }
        let caller = self.popup_caller.take().unwrap_or(MenuState::MainMenu);
        self.show(caller)
    }

    /// Waiting for homing; the tick leaves this state
    pub(in crate::hmi) fn homing(&mut self, _symbol: InputSymbol) -> Result<(), HmiError> {
        Ok(())
    }

    pub(in crate::hmi) fn cold_extrusion_popup(
        &mut self,
        symbol: InputSymbol,
    ) -> Result<(), HmiError> {
        if symbol != InputSymbol::Enter {
            return Ok(());
        }
        self.show(MenuState::AxisMove)
    }

    pub(in crate::hmi) fn message_popup(&mut self, symbol: InputSymbol) -> Result<(), HmiError> {
        if symbol != InputSymbol::Enter {
            return Ok(());
        }
        let target = match self.popup_caller.take() {
            Some(caller) if caller.accepts_popup_return() => caller,
            _ => MenuState::MainMenu,
        };
        self.show(target)
    }

    pub(in crate::hmi) fn icon_finder(&mut self, symbol: InputSymbol) -> Result<(), HmiError> {
        let moved = if symbol.is_cw() {
            self.lists.icon_finder.inc(ICON_BOUND)
        } else if symbol.is_ccw() {
            self.lists.icon_finder.dec()
        } else if symbol == InputSymbol::Enter {
            return self.show(MenuState::MainMenu);
        } else {
            false
        };
        if moved {
            let icon = self.lists.icon_finder.now().min(u8::MAX as usize) as u8;
            self.renderer.draw_icon_finder(icon)?;
        }
        Ok(())
    }
}
