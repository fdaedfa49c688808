//! Print screen and its pause/stop confirmation

use crate::hmi::{Hmi, HmiError, PrintAction, PrintSession};
use crate::input::InputSymbol;
use crate::state::MenuState;
use crate::traits::{DisplaySurface, PrinterController};

/// Tune, Pause/Resume, Stop
const PRINT_BUTTONS: usize = 3;

const BUTTON_TUNE: usize = 0;
const BUTTON_PAUSE: usize = 1;

/// Confirm cursor positions
const CONFIRM: usize = 0;
const CANCEL: usize = 1;

impl<D: DisplaySurface, C: PrinterController> Hmi<D, C> {
    pub(in crate::hmi) fn print_process(&mut self, symbol: InputSymbol) -> Result<(), HmiError> {
        if self.print.completion_shown {
            if symbol != InputSymbol::Enter {
                return Ok(());
            }
            info!("print finished, acknowledged");
            self.print = PrintSession::default();
            self.lists.page.reset();
            return self.show(MenuState::MainMenu);
        }

        let paused = self.print.paused;
        if symbol.is_cw() || symbol.is_ccw() {
            let previous = self.lists.print.now();
            let moved = if symbol.is_cw() {
                self.lists.print.inc(PRINT_BUTTONS)
            } else {
                self.lists.print.dec()
            };
            if moved {
                self.renderer.draw_print_button(previous, false, paused)?;
                self.renderer
                    .draw_print_button(self.lists.print.now(), true, paused)?;
            }
            return Ok(());
        }
        if symbol != InputSymbol::Enter {
            return Ok(());
        }

        match self.lists.print.now() {
            BUTTON_TUNE => {
                self.lists.tune.reset();
                self.show(MenuState::Tune)
            }
            BUTTON_PAUSE if paused => {
                self.controller.resume_job()?;
                info!("resume");
                self.print.paused = false;
                self.renderer.draw_print_button(BUTTON_PAUSE, true, false)?;
                Ok(())
            }
            BUTTON_PAUSE => self.confirm_print_action(PrintAction::Pause),
            _ => self.confirm_print_action(PrintAction::Stop),
        }
    }

    fn confirm_print_action(&mut self, action: PrintAction) -> Result<(), HmiError> {
        self.print.action = Some(action);
        self.lists.confirm.set(CANCEL);
        self.show(MenuState::PrintWindow)
    }

    pub(in crate::hmi) fn print_window(&mut self, symbol: InputSymbol) -> Result<(), HmiError> {
        if symbol.is_cw() {
            if self.lists.confirm.inc(2) {
                self.renderer.draw_confirm_cancel(false)?;
            }
            return Ok(());
        }
        if symbol.is_ccw() {
            if self.lists.confirm.dec() {
                self.renderer.draw_confirm_cancel(true)?;
            }
            return Ok(());
        }
        if symbol != InputSymbol::Enter {
            return Ok(());
        }

        let confirmed = self.lists.confirm.now() == CONFIRM;
        let action = self.print.action.take();
        self.state = MenuState::PrintProcess;
        match (confirmed, action) {
            (true, Some(PrintAction::Pause)) => {
                self.controller.pause_job()?;
                info!("pause");
                self.print.paused = true;
                self.show(MenuState::PrintProcess)
            }
            (true, Some(PrintAction::Stop)) => {
                self.controller.cancel_job()?;
                info!("cancel");
                self.print = PrintSession::default();
                self.lists.page.reset();
                self.show(MenuState::MainMenu)
            }
            _ => self.show(MenuState::PrintProcess),
        }
    }
}
