//! Menu state machine
//!
//! Every screen handles discrete presses for one frame and reports back
//! what the app should do: sounds to play and session commands. Nothing
//! here touches audio or graphics, so transitions are testable.

use log::info;

use super::options::{OptionRow, Options};
use crate::game::geometry::lerp;

/// Music eases toward its target by this fraction each frame
const MUSIC_FADE: f32 = 0.25;
const MENU_MUSIC_VOLUME: f32 = 1.0;
const PLAYING_MUSIC_VOLUME: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    MainMenu,
    Controls,
    Options,
    Playing,
    GameOver,
    AskExit,
    Exit,
}

impl GameState {
    /// Music volume for the next frame, given the current one
    pub fn music_volume(self, current: f32) -> f32 {
        match self {
            GameState::MainMenu => lerp(current, MENU_MUSIC_VOLUME, MUSIC_FADE),
            GameState::Playing => lerp(current, PLAYING_MUSIC_VOLUME, MUSIC_FADE),
            GameState::GameOver | GameState::AskExit => 0.0,
            GameState::Controls | GameState::Options | GameState::Exit => current,
        }
    }
}

/// Discrete presses for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Enter, keypad Enter or Space
    pub confirm: bool,
    /// Escape
    pub back: bool,
}

/// Sound effects the menus ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Hover,
    Open,
    Back,
    No,
    Disappointing,
    Lose,
}

/// Session and exit changes the menus ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    /// Build a fresh session and start playing
    StartSession,
    /// Fresh session with the camera snapped onto the player
    RestartSession,
    /// Drop the current session
    ResetSession,
    /// Close the game once the farewell sound (if any) is over
    RequestExit,
    /// The exit prompt was answered with No
    CancelExit,
}

/// What one frame of menu handling produced
#[derive(Debug, Default, PartialEq)]
pub struct MenuResponse {
    pub sounds: Vec<SoundCue>,
    pub commands: Vec<MenuCommand>,
}

impl MenuResponse {
    /// Queue `cue` if sound effects are on at this moment
    fn play(&mut self, cue: SoundCue, options: &Options) {
        if options.sound_enabled {
            self.sounds.push(cue);
        }
    }
}

pub const MAIN_MENU_BUTTONS: [&str; 4] = ["START GAME", "CONTROLS", "OPTIONS", "EXIT"];
pub const GAME_OVER_BUTTONS: [&str; 2] = ["PLAY AGAIN", "MAIN MENU"];
pub const EXIT_BUTTONS: [&str; 2] = ["Yes!?", "No!"];

/// Step a selection up or down with wrap-around
fn navigate(selected: usize, count: usize, input: &MenuInput) -> usize {
    let mut selected = selected;
    if input.up {
        selected = if selected == 0 { count - 1 } else { selected - 1 };
    }
    if input.down {
        selected = if selected + 1 == count { 0 } else { selected + 1 };
    }
    selected
}

#[derive(Debug, Default)]
pub struct Menu {
    state: GameState,
    main_selected: usize,
    options_selected: usize,
    game_over_selected: usize,
    exit_selected: usize,
    /// Drop the session on the next main menu frame
    pending_reset: bool,
    exit_requested: bool,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn main_selected(&self) -> usize {
        self.main_selected
    }

    pub fn options_selected(&self) -> usize {
        self.options_selected
    }

    pub fn game_over_selected(&self) -> usize {
        self.game_over_selected
    }

    pub fn exit_selected(&self) -> usize {
        self.exit_selected
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    fn set_state(&mut self, state: GameState) {
        if self.state != state {
            info!("State {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }

    /// Handle one frame of input for the current screen.
    pub fn handle_input(&mut self, input: MenuInput, options: &mut Options) -> MenuResponse {
        let mut response = MenuResponse::default();
        match self.state {
            GameState::MainMenu => self.main_menu(input, options, &mut response),
            GameState::Controls => self.controls(input, options, &mut response),
            GameState::Options => self.options(input, options, &mut response),
            GameState::Playing => self.playing(input, options, &mut response),
            GameState::GameOver => self.game_over(input, options, &mut response),
            GameState::AskExit => self.ask_exit(input, options, &mut response),
            GameState::Exit => {}
        }
        response
    }

    fn main_menu(&mut self, input: MenuInput, options: &Options, response: &mut MenuResponse) {
        if self.pending_reset {
            self.pending_reset = false;
            response.commands.push(MenuCommand::ResetSession);
        }

        if input.up {
            response.play(SoundCue::Hover, options);
        }
        if input.down {
            response.play(SoundCue::Hover, options);
        }
        self.main_selected = navigate(self.main_selected, MAIN_MENU_BUTTONS.len(), &input);

        if input.confirm {
            response.play(SoundCue::Open, options);
            match self.main_selected {
                0 => {
                    self.set_state(GameState::Playing);
                    response.commands.push(MenuCommand::StartSession);
                }
                1 => self.set_state(GameState::Controls),
                2 => self.set_state(GameState::Options),
                _ => {
                    response.play(SoundCue::No, options);
                    self.set_state(GameState::AskExit);
                }
            }
        }

        if input.back {
            response.play(SoundCue::No, options);
            self.set_state(GameState::AskExit);
        }
    }

    fn controls(&mut self, input: MenuInput, options: &Options, response: &mut MenuResponse) {
        if input.back || input.confirm {
            response.play(SoundCue::Back, options);
            self.set_state(GameState::MainMenu);
        }
    }

    fn options(&mut self, input: MenuInput, options: &mut Options, response: &mut MenuResponse) {
        if input.up {
            response.play(SoundCue::Hover, options);
        }
        if input.down {
            response.play(SoundCue::Hover, options);
        }
        self.options_selected = navigate(self.options_selected, OptionRow::ALL.len(), &input);

        let row = OptionRow::from_index(self.options_selected).unwrap_or(OptionRow::MaxEnemies);
        if input.left {
            response.play(SoundCue::Open, options);
            options.adjust(row, false);
        }
        if input.right {
            response.play(SoundCue::Open, options);
            options.adjust(row, true);
        }

        if input.back {
            response.play(SoundCue::Back, options);
            self.set_state(GameState::MainMenu);
        }
    }

    fn playing(&mut self, input: MenuInput, options: &Options, response: &mut MenuResponse) {
        if input.back {
            response.play(SoundCue::Back, options);
            self.set_state(GameState::MainMenu);
            self.pending_reset = true;
        }
    }

    fn game_over(&mut self, input: MenuInput, options: &Options, response: &mut MenuResponse) {
        if input.up {
            response.play(SoundCue::Hover, options);
        }
        if input.down {
            response.play(SoundCue::Hover, options);
        }
        self.game_over_selected = navigate(self.game_over_selected, GAME_OVER_BUTTONS.len(), &input);

        if input.confirm {
            response.play(SoundCue::Open, options);
            if self.game_over_selected == 0 {
                response.commands.push(MenuCommand::RestartSession);
                self.set_state(GameState::Playing);
            } else {
                response.play(SoundCue::Back, options);
                response.commands.push(MenuCommand::ResetSession);
                self.set_state(GameState::MainMenu);
            }
        }

        if input.back && self.state == GameState::GameOver {
            response.play(SoundCue::Back, options);
            response.commands.push(MenuCommand::ResetSession);
            self.set_state(GameState::MainMenu);
        }
    }

    fn ask_exit(&mut self, input: MenuInput, options: &Options, response: &mut MenuResponse) {
        self.exit_selected = navigate(self.exit_selected, EXIT_BUTTONS.len(), &input);

        if input.confirm {
            if self.exit_selected == 0 {
                self.request_exit(options, response);
            } else {
                self.exit_requested = false;
                response.commands.push(MenuCommand::CancelExit);
                response.play(SoundCue::Back, options);
                self.set_state(GameState::MainMenu);
            }
        }

        if input.back && self.state == GameState::AskExit {
            self.request_exit(options, response);
        }
    }

    fn request_exit(&mut self, options: &Options, response: &mut MenuResponse) {
        response.play(SoundCue::Disappointing, options);
        response.commands.push(MenuCommand::RequestExit);
        self.exit_requested = true;
    }

    /// The session ended; lose sound plus the game over screen
    pub fn enter_game_over(&mut self, options: &Options) -> MenuResponse {
        let mut response = MenuResponse::default();
        response.play(SoundCue::Lose, options);
        self.game_over_selected = 0;
        self.set_state(GameState::GameOver);
        response
    }

    /// Move to `Exit` once a requested exit's farewell sound is over
    pub fn finish_exit(&mut self, farewell_done: bool) {
        if self.state == GameState::AskExit && self.exit_requested && farewell_done {
            self.set_state(GameState::Exit);
        }
    }

    /// The window was closed from outside
    pub fn force_exit(&mut self) {
        self.set_state(GameState::Exit);
    }
}
