//! Periodic reconciliation with the controller

use super::{Hmi, HmiError, PrintSession, ProbeSession};
use crate::state::{MenuState, StatusEvent};
use crate::traits::{DisplaySurface, JobState, PrinterController, PrinterStatus};

/// Shown when the controller errors without a reason
const GENERIC_ERROR: &str = "Printer error";

impl<D: DisplaySurface, C: PrinterController> Hmi<D, C> {
    /// Bring the screen in line with the controller
    ///
    /// Call every [`UPDATE_INTERVAL_MS`](super::UPDATE_INTERVAL_MS). Also
    /// checks the long press timer, so a held button fires even without
    /// further edges.
    pub fn tick(&mut self, now_ms: u64) {
        self.poll_input(now_ms);

        let status = match self.controller.status() {
            Ok(status) => status,
            Err(e) => {
                debug!("tick skipped: {}", e);
                return;
            }
        };
        let previous = self.last_status.replace(status.clone());
        if let Err(e) = self.reconcile(&status, previous.as_ref()) {
            self.recover(e);
        }
        self.track_idle();
    }

    fn reconcile(
        &mut self,
        status: &PrinterStatus,
        previous: Option<&PrinterStatus>,
    ) -> Result<(), HmiError> {
        self.follow_job(status)?;
        let probe_entered = self.follow_probe(status)?;

        if self.state == MenuState::PrintProcess {
            self.refresh_print(status)?;
        }

        if let Some(request) = self.homing {
            if status.homed.all() {
                self.homing = None;
                if self.state == MenuState::Homing {
                    debug!("homing complete");
                    let next = self.state.transition(StatusEvent::HomingComplete);
                    self.lists.prepare.select(request.cursor);
                    self.show(next)?;
                }
            }
        }

        if !probe_entered && self.state.shows_status_area() {
            let differs = previous.map_or(true, |p| p.status_area_differs(status));
            if differs {
                self.renderer.draw_status_area(status)?;
            }
        }

        if status.message != self.last_message {
            self.last_message = status.message.clone();
            if !status.message.is_empty() {
                info!("message: {}", status.message.as_str());
                self.show_message(&status.message);
            }
        }
        Ok(())
    }

    /// Force the screen that matches a job state change
    fn follow_job(&mut self, status: &PrinterStatus) -> Result<(), HmiError> {
        let last = core::mem::replace(&mut self.last_job, status.job);
        if status.job == last {
            return Ok(());
        }
        debug!("job {:?} -> {:?}", last, status.job);

        match status.job {
            JobState::Printing if last != JobState::Paused => {
                self.print = PrintSession::default();
                self.lists.print.reset();
                self.force(StatusEvent::PrintStarted)
            }
            JobState::Printing | JobState::Paused => Ok(()),
            JobState::Standby | JobState::Complete | JobState::Cancelled => {
                self.print = PrintSession::default();
                self.force(StatusEvent::JobEnded)
            }
            JobState::Error => {
                error!("controller error: {}", status.error_message.as_str());
                let text = if status.error_message.trim().is_empty() {
                    GENERIC_ERROR
                } else {
                    status.error_message.as_str()
                };
                self.show_message(text);
                Ok(())
            }
        }
    }

    /// Enter or leave manual probing; returns true when it was just entered
    fn follow_probe(&mut self, status: &PrinterStatus) -> Result<bool, HmiError> {
        let active = status.probe.is_some();
        let probing = self.state == MenuState::ManualProbeProcess;
        match (active, probing) {
            (true, false) => {
                self.probe = ProbeSession::default();
                self.force(StatusEvent::ProbeStarted)?;
                Ok(true)
            }
            (false, true) => {
                self.probe = ProbeSession::default();
                self.force(StatusEvent::ProbeEnded)?;
                Ok(false)
            }
            (true, true) => {
                self.draw_probe(false)?;
                Ok(false)
            }
            (false, false) => Ok(false),
        }
    }

    /// Completion overlay, pause icon and progress fields
    fn refresh_print(&mut self, status: &PrinterStatus) -> Result<(), HmiError> {
        let finished = status.progress.is_finished();
        let rising = finished && !self.print.finished;
        self.print.finished = finished;

        if rising {
            info!("print complete");
            self.print.completion_shown = true;
            self.renderer.draw_print_complete()?;
            return Ok(());
        }
        if self.print.completion_shown {
            return Ok(());
        }

        let paused = status.is_paused();
        if paused != self.print.paused {
            self.print.paused = paused;
            let selected = self.lists.print.now() == 1;
            self.renderer.draw_print_button(1, selected, paused)?;
        }
        self.renderer.draw_progress(&status.progress)?;
        Ok(())
    }

    /// Transition demanded by the controller, overriding the user
    ///
    /// An active edit is dropped and any pending input is discarded.
    fn force(&mut self, event: StatusEvent) -> Result<(), HmiError> {
        let abandoned = self.edit.is_some();
        self.abandon_edit();
        let _ = self.latch.take();
        self.popup_caller = None;

        let next = self.state.transition(event);
        if next == self.state && !abandoned {
            return Ok(());
        }
        info!("{:?} -> {:?} on {:?}", self.state, next, event);
        self.show(next)
    }

    /// Count an idle tick and dim the backlight at the timeout
    fn track_idle(&mut self) {
        self.idle_ticks = self.idle_ticks.saturating_add(1);
        let timeout = self.config.display.dim_timeout_ticks;
        if self.dimmed || timeout == 0 || self.idle_ticks < timeout {
            return;
        }
        debug!("dimming after {} idle ticks", self.idle_ticks);
        self.dimmed = true;
        let level = self.config.display.dim_brightness;
        if let Err(e) = self.renderer.set_backlight(level) {
            warn!("backlight: {}", e);
        }
    }
}
