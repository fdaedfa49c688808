//! Menu state machine
//!
//! [`Hmi`] owns the active [`MenuState`], every menu's cursor and the
//! collaborators. Input reaches it one key at a time through
//! [`Hmi::on_key`]; controller status reaches it through [`Hmi::tick`].
//! Both run to completion and may redraw the screen.

mod dispatch;
mod handlers;
mod reconcile;
mod screens;

#[cfg(test)]
pub(crate) mod testing;


use core::fmt::{self, Write};

use heapless::String;

use crate::config::HmiConfig;
use crate::edit::ValueEdit;
use crate::input::{EncoderTranslator, InputLatch, InputSymbol, KeyEvent, Rotation};
use crate::menu::{FileBrowser, MenuLists};
use crate::render::Renderer;
use crate::state::MenuState;
use crate::traits::{
    CommandError, DisplayError, DisplaySurface, JobState, PrinterController, PrinterStatus,
    MAX_MESSAGE_LEN,
};

/// Reconciliation period expected by [`Hmi::tick`]
pub const UPDATE_INTERVAL_MS: u64 = 1000;

/// Room for "Error: " plus the controller's reason
const ERROR_TEXT_LEN: usize = MAX_MESSAGE_LEN + 8;

/// Manual probe step sizes (µm)
pub const PROBE_STEPS_UM: [i32; 3] = [1000, 100, 50];

/// Failure inside a menu handler
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HmiError {
    /// Drawing failed
    Display(DisplayError),
    /// The controller refused a command
    Command(CommandError),
}

impl From<DisplayError> for HmiError {
    fn from(e: DisplayError) -> Self {
        HmiError::Display(e)
    }
}

impl From<CommandError> for HmiError {
    fn from(e: CommandError) -> Self {
        HmiError::Command(e)
    }
}

impl fmt::Display for HmiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HmiError::Display(e) => write!(f, "display: {}", e),
            HmiError::Command(e) => write!(f, "command: {}", e),
        }
    }
}

/// Action waiting in the pause/stop confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PrintAction {
    Pause,
    Stop,
}

/// Print screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct PrintSession {
    /// Completion overlay is on screen
    completion_shown: bool,
    /// Progress had reached 100% at the last check
    finished: bool,
    /// Pause icon currently shows "continue"
    paused: bool,
    /// Pending confirmation
    action: Option<PrintAction>,
}

/// Manual probe screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct ProbeSession {
    step_index: usize,
    out_of_range: bool,
}

/// Homing started from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HomingRequest {
    /// Prepare cursor to restore afterwards
    cursor: usize,
}

/// The menu HMI
pub struct Hmi<D: DisplaySurface, C: PrinterController> {
    state: MenuState,
    latch: InputLatch,
    popup_caller: Option<MenuState>,
    lists: MenuLists,
    edit: Option<ValueEdit>,
    /// Fast rotation is demoted to single steps
    rate_limited: bool,
    files: FileBrowser,
    config: HmiConfig,
    print: PrintSession,
    probe: ProbeSession,
    homing: Option<HomingRequest>,
    last_job: JobState,
    last_status: Option<PrinterStatus>,
    last_message: String<MAX_MESSAGE_LEN>,
    idle_ticks: u32,
    dimmed: bool,
    renderer: Renderer<D>,
    controller: C,
    translator: EncoderTranslator,
}

impl<D: DisplaySurface, C: PrinterController> Hmi<D, C> {
    /// Create the HMI
    ///
    /// Nothing is drawn until [`Hmi::start`].
    pub fn new(config: HmiConfig, surface: D, controller: C) -> Self {
        Self {
            state: MenuState::MainMenu,
            latch: InputLatch::new(),
            popup_caller: None,
            lists: MenuLists::default(),
            edit: None,
            rate_limited: true,
            files: FileBrowser::new(),
            print: PrintSession::default(),
            probe: ProbeSession::default(),
            homing: None,
            last_job: JobState::Standby,
            last_status: None,
            last_message: String::new(),
            idle_ticks: 0,
            dimmed: false,
            renderer: Renderer::new(surface, config.language),
            translator: EncoderTranslator::new(&config.encoder),
            controller,
            config,
        }
    }

    /// Light the backlight and draw the main menu
    pub fn start(&mut self) {
        info!("hmi start");
        let brightness = self.config.display.brightness;
        let result = self
            .renderer
            .set_backlight(brightness)
            .map_err(HmiError::from)
            .and_then(|_| self.show(MenuState::MainMenu));
        if let Err(e) = result {
            self.recover(e);
        }
    }

    /// Handle one translated key
    pub fn on_key(&mut self, event: KeyEvent) {
        let mut symbol = InputSymbol::from(event);
        if self.rate_limited {
            symbol = symbol.throttled();
        }
        trace!("key {} in {:?}", event.name(), self.state);
        self.latch.latch(symbol);
        self.wake();
        self.dispatch();
    }

    /// Feed one encoder detent
    pub fn on_rotation(&mut self, rotation: Rotation, now_ms: u64) {
        let key = self.translator.on_rotation(rotation, now_ms);
        self.on_key(key);
    }

    /// Feed sampled encoder A/B levels
    pub fn on_quadrature(&mut self, a: bool, b: bool, now_ms: u64) {
        if let Some(key) = self.translator.on_quadrature(a, b, now_ms) {
            self.on_key(key);
        }
    }

    /// Feed a button edge
    pub fn on_button(&mut self, pressed: bool, now_ms: u64) {
        if let Some(key) = self.translator.on_button(pressed, now_ms) {
            self.on_key(key);
        }
    }

    /// Check the long press timer
    pub fn poll_input(&mut self, now_ms: u64) {
        if let Some(key) = self.translator.poll(now_ms) {
            self.on_key(key);
        }
    }

    /// Show a word-wrapped message with an OK button
    ///
    /// Empty text is ignored. The screen under the popup is remembered only
    /// when no message is already up.
    pub fn show_message(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        self.abandon_edit();
        if self.state != MenuState::MessagePopup {
            self.popup_caller = Some(self.state);
        }
        self.state = MenuState::MessagePopup;
        if let Err(e) = self.renderer.draw_message_popup(text) {
            warn!("message popup not drawn: {}", e);
        }
    }

    /// Open the icon library browser
    pub fn open_icon_finder(&mut self) {
        self.abandon_edit();
        self.lists.icon_finder.reset();
        if let Err(e) = self.show(MenuState::IconFinder) {
            self.recover(e);
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    /// State restored when the current popup closes
    pub fn popup_caller(&self) -> Option<MenuState> {
        self.popup_caller
    }

    /// Active value edit
    pub fn edit(&self) -> Option<&ValueEdit> {
        self.edit.as_ref()
    }

    pub fn is_rate_limited(&self) -> bool {
        self.rate_limited
    }

    pub fn is_dimmed(&self) -> bool {
        self.dimmed
    }

    pub fn idle_ticks(&self) -> u32 {
        self.idle_ticks
    }

    pub fn config(&self) -> &HmiConfig {
        &self.config
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    pub fn surface(&self) -> &D {
        self.renderer.surface()
    }

    pub fn surface_mut(&mut self) -> &mut D {
        self.renderer.surface_mut()
    }

    /// Run the current state's handler on the pending symbol
    fn dispatch(&mut self) {
        let symbol = self.latch.take();
        if symbol == InputSymbol::None {
            return;
        }
        let handler = dispatch::handler_for::<D, C>(self.state);
        if let Err(e) = handler(self, symbol) {
            self.recover(e);
        }
    }

    /// Handle a handler failure without leaving the menu loop
    fn recover(&mut self, err: HmiError) {
        match err {
            HmiError::Display(e) => {
                warn!("display error in {:?}: {}", self.state, e);
            }
            HmiError::Command(e) => {
                error!("command failed in {:?}: {}", self.state, e);
                let mut text: String<ERROR_TEXT_LEN> = String::new();
                let _ = write!(text, "Error: {}", e);
                self.show_message(&text);
            }
        }
    }

    /// Input activity: restore the backlight and restart the idle count
    fn wake(&mut self) {
        self.idle_ticks = 0;
        if self.dimmed {
            self.dimmed = false;
            let level = self.config.display.brightness;
            if let Err(e) = self.renderer.set_backlight(level) {
                warn!("backlight: {}", e);
            }
        }
    }

    /// Drop an active edit and return to the menu it came from
    fn abandon_edit(&mut self) {
        if let Some(edit) = self.edit.take() {
            debug!("edit abandoned in {:?}", self.state);
            self.rate_limited = true;
            self.state = edit.return_to();
        }
    }

    /// Fresh status, falling back to the last tick's snapshot
    fn status_snapshot(&mut self) -> PrinterStatus {
        match self.controller.status() {
            Ok(status) => status,
            Err(_) => self.last_status.clone().unwrap_or_default(),
        }
    }
}
