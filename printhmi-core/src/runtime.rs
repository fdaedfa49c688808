//! Shared access for multi-context hosts
//!
//! Input usually arrives from an interrupt or a serial task while the tick
//! runs on a timer. [`SharedHmi`] puts both paths behind one blocking mutex
//! so every callback runs to completion before the next one starts.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::hmi::Hmi;
use crate::input::{KeyEvent, Rotation};
use crate::state::MenuState;
use crate::traits::{DisplaySurface, PrinterController};

/// [`Hmi`] behind an `embassy-sync` mutex
///
/// Use `CriticalSectionRawMutex` when input comes from interrupt context,
/// `NoopRawMutex` when everything runs in one executor.
pub struct SharedHmi<M: RawMutex, D: DisplaySurface, C: PrinterController> {
    inner: Mutex<M, RefCell<Hmi<D, C>>>,
}

impl<M: RawMutex, D: DisplaySurface, C: PrinterController> SharedHmi<M, D, C> {
    pub fn new(hmi: Hmi<D, C>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(hmi)),
        }
    }

    /// Run `f` with exclusive access to the HMI
    pub fn with_hmi<R>(&self, f: impl FnOnce(&mut Hmi<D, C>) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    pub fn start(&self) {
        self.with_hmi(|hmi| hmi.start());
    }

    pub fn on_key(&self, event: KeyEvent) {
        self.with_hmi(|hmi| hmi.on_key(event));
    }

    pub fn on_rotation(&self, rotation: Rotation, now_ms: u64) {
        self.with_hmi(|hmi| hmi.on_rotation(rotation, now_ms));
    }

    pub fn on_button(&self, pressed: bool, now_ms: u64) {
        self.with_hmi(|hmi| hmi.on_button(pressed, now_ms));
    }

    pub fn tick(&self, now_ms: u64) {
        self.with_hmi(|hmi| hmi.tick(now_ms));
    }

    pub fn state(&self) -> MenuState {
        self.with_hmi(|hmi| hmi.state())
    }

    /// Unwrap the HMI
    pub fn into_inner(self) -> Hmi<D, C> {
        self.inner.into_inner().into_inner()
    }
}

#[cfg(test)]
mod tests {
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    use super::*;
    use crate::config::HmiConfig;
    use crate::hmi::testing::{MockController, MockDisplay};
    use crate::traits::JobState;

    type TestShared = SharedHmi<NoopRawMutex, MockDisplay, MockController>;

    fn shared() -> TestShared {
        let hmi = Hmi::new(HmiConfig::default(), MockDisplay::new(), MockController::new());
        let shared = SharedHmi::new(hmi);
        shared.start();
        shared
    }

    #[test]
    fn test_input_and_tick_share_one_hmi() {
        let shared = shared();
        shared.on_key(KeyEvent::Down);
        shared.on_key(KeyEvent::Click);
        assert_eq!(shared.state(), MenuState::Prepare);

        shared.with_hmi(|hmi| hmi.controller_mut().status.job = JobState::Printing);
        shared.tick(0);
        assert_eq!(shared.state(), MenuState::PrintProcess);
    }

    #[test]
    fn test_into_inner_keeps_state() {
        let shared = shared();
        shared.on_key(KeyEvent::Click);
        let hmi = shared.into_inner();
        assert_eq!(hmi.state(), MenuState::SelectFile);
    }
}
