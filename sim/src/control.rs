//! Control surface - the input boundary between a host UI and the engine.
//!
//! Hosts translate their own events (clicks, keys, slider moves) into
//! [`ControlCommand`]s and hand them to [`LifeEngine::apply`]. The
//! [`ControlPanel`] provides the START / STOP button pair with its layout
//! and enable rules, so hosts only have to draw it and forward pointer
//! presses.
//!
//! [`LifeEngine::apply`]: crate::engine::LifeEngine::apply

use crate::config::TickMode;
use crate::render_bridge::{PointerTarget, Rect, VisualBounds};
use serde::{Deserialize, Serialize};

/// One request from the host's input layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ControlCommand {
    ToggleCell { column: usize, row: usize },
    Start,
    Stop,
    /// Start when stopped, stop when running (space bar).
    ToggleRunning,
    /// Single-step: run one generation now, also while stopped.
    Step,
    SetTickRate(f32),
    SetTickMode(TickMode),
    Resize { width: usize, height: usize },
    ClearGrid,
    Save,
    Load,
    ClearSaved,
    SetAutoLoad(bool),
}

/// Layout and style of a button.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonConfig {
    pub text: String,
    pub width: f32,
    pub height: f32,
    pub bg_fill: String,
    pub text_fill: String,
    pub font_size: f32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            width: 100.0,
            height: 30.0,
            bg_fill: "#ffffff".to_string(),
            text_fill: "#000000".to_string(),
            font_size: 16.0,
        }
    }
}

/// A clickable control that issues one command.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub config: ButtonConfig,
    pub x: f32,
    pub y: f32,
    command: ControlCommand,
    enabled: bool,
}

impl Button {
    pub fn new(config: ButtonConfig, command: ControlCommand) -> Self {
        Self {
            config,
            x: 0.0,
            y: 0.0,
            command,
            enabled: true,
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn text(&self) -> &str {
        &self.config.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.config.text = text.into();
    }

    pub fn command(&self) -> ControlCommand {
        self.command
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// The command this button issues if the press lands on it.
    pub fn press(&self, px: f32, py: f32) -> Option<ControlCommand> {
        self.hit(px, py).then_some(self.command)
    }
}

impl VisualBounds for Button {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.config.width, self.config.height)
    }
}

impl PointerTarget for Button {
    fn accepts_pointer(&self) -> bool {
        self.enabled
    }
}

/// Panel margin from the canvas origin.
const PANEL_MARGIN: f32 = 7.0;
/// Vertical gap between stacked buttons.
const BUTTON_SPACING: f32 = 10.0;

/// The START / STOP button pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPanel {
    pub start: Button,
    pub stop: Button,
}

impl ControlPanel {
    pub fn new() -> Self {
        let start = Button::new(
            ButtonConfig {
                text: "START".to_string(),
                ..Default::default()
            },
            ControlCommand::Start,
        )
        .at(PANEL_MARGIN, PANEL_MARGIN);

        let stop_y = start.y + start.config.height + BUTTON_SPACING;
        let stop = Button::new(
            ButtonConfig {
                text: "STOP".to_string(),
                ..Default::default()
            },
            ControlCommand::Stop,
        )
        .at(PANEL_MARGIN, stop_y);

        let mut panel = Self { start, stop };
        panel.sync(false);
        panel
    }

    /// Enable only the button that changes the current run state.
    pub fn sync(&mut self, running: bool) {
        if running {
            self.start.disable();
            self.stop.enable();
        } else {
            self.start.enable();
            self.stop.disable();
        }
    }

    pub fn buttons(&self) -> [&Button; 2] {
        [&self.start, &self.stop]
    }

    /// Resolve a pointer press against the panel.
    pub fn press(&self, px: f32, py: f32) -> Option<ControlCommand> {
        self.buttons().into_iter().find_map(|button| button.press(px, py))
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new()
    }
}
