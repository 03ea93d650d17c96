//! Application state and the frame loop
//!
//! Owns every long-lived resource: loaded assets, audio, input, the menu
//! state machine, options, and the current session (if any). Each frame
//! polls input, dispatches it to the menu or the session, then draws.

use std::fmt;

use ::rand::rngs::StdRng;
use ::rand::SeedableRng;
use log::{info, warn};
use macroquad::prelude::*;

use crate::assets::{AssetError, Assets};
use crate::audio::Audio;
use crate::config::{ConfigError, FpsLimit, GameConfig};
use crate::game::{draw_session, Outcome, Session, SessionError, Sprites, WorldTextures};
use crate::input::InputState;
use crate::menu::{self, GameState, Menu, MenuCommand, MenuResponse, Options};

/// Top-level error: anything that stops the game from starting or running
#[derive(Debug)]
pub enum GameError {
    Config(ConfigError),
    Asset(AssetError),
    Session(SessionError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Config(e) => write!(f, "configuration: {}", e),
            GameError::Asset(e) => write!(f, "assets: {}", e),
            GameError::Session(e) => write!(f, "session: {}", e),
        }
    }
}

impl std::error::Error for GameError {}

impl From<ConfigError> for GameError {
    fn from(e: ConfigError) -> Self {
        GameError::Config(e)
    }
}

impl From<AssetError> for GameError {
    fn from(e: AssetError) -> Self {
        GameError::Asset(e)
    }
}

impl From<SessionError> for GameError {
    fn from(e: SessionError) -> Self {
        GameError::Session(e)
    }
}

pub struct Game {
    config: GameConfig,
    sprites: Sprites,
    textures: WorldTextures,
    audio: Audio,
    input: InputState,
    menu: Menu,
    options: Options,
    session: Option<Session>,
    rng: StdRng,
    window: Vec2,
}

impl Game {
    /// Load every asset and set up the main menu
    pub async fn new(config: GameConfig) -> Result<Self, GameError> {
        let assets = Assets::load(&config.assets_root).await?;
        let Assets { player_frames, enemy_frames, ground, finish_line, effects, walk, music } = assets;

        let textures = WorldTextures {
            player_width: player_frames.first().map(|t| t.width()),
            enemy_width: enemy_frames.first().map(|t| t.width()),
            ground: Some(ground),
            finish_line: Some(finish_line),
        };
        let audio = Audio::new(effects, walk, music, config.exit_grace);

        info!("Game ready");
        Ok(Self {
            sprites: Sprites { player: player_frames, enemy: enemy_frames },
            textures,
            audio,
            input: InputState::new(),
            menu: Menu::new(),
            options: Options::new(),
            session: None,
            rng: StdRng::from_entropy(),
            window: vec2(screen_width(), screen_height()),
            config,
        })
    }

    /// Run until the player confirms the exit prompt
    pub async fn run(&mut self) -> Result<(), GameError> {
        // Closing the window leaves through the same path as the exit prompt
        prevent_quit();

        while self.menu.state() != GameState::Exit {
            let frame_start = get_time();
            let delta_time = get_frame_time();

            if is_quit_requested() {
                info!("Window close requested");
                self.menu.force_exit();
                break;
            }

            self.input.poll();
            self.handle_resize();
            self.update(delta_time)?;

            if self.menu.state() != GameState::Exit {
                self.draw();
            }

            limit_fps(self.config.fps_limit, frame_start);
            next_frame().await;
        }
        info!("Exiting");
        Ok(())
    }

    fn handle_resize(&mut self) {
        let window = vec2(screen_width(), screen_height());
        if window == self.window {
            return;
        }
        self.window = window;
        if let Some(session) = self.session.as_mut() {
            session.resize(window);
        }
    }

    fn new_session(&self) -> Result<Session, GameError> {
        Ok(Session::new(self.window, self.config.session, self.textures.clone())?)
    }

    fn apply(&mut self, response: MenuResponse) -> Result<(), GameError> {
        self.audio.play_response(&response);
        for command in response.commands {
            match command {
                MenuCommand::StartSession => self.session = Some(self.new_session()?),
                MenuCommand::RestartSession => {
                    let mut session = self.new_session()?;
                    session.snap_camera();
                    self.session = Some(session);
                }
                MenuCommand::ResetSession => self.session = None,
                // Timed by the farewell sound in `Audio`
                MenuCommand::RequestExit | MenuCommand::CancelExit => {}
            }
        }
        Ok(())
    }

    fn update(&mut self, delta_time: f32) -> Result<(), GameError> {
        let state = self.menu.state();
        let volume = state.music_volume(self.audio.music_volume());
        self.audio.update_music(self.options.music_enabled, volume);

        let response = self.menu.handle_input(self.input.menu_input(), &mut self.options);
        self.apply(response)?;

        match state {
            GameState::Playing if self.menu.state() == GameState::Playing => self.update_session(delta_time),
            GameState::AskExit => {
                if self.menu.exit_requested() {
                    let done = self.audio.farewell_done(delta_time);
                    self.menu.finish_exit(done);
                }
                self.audio.set_walking(false);
            }
            _ => self.audio.set_walking(false),
        }
        Ok(())
    }

    fn update_session(&mut self, delta_time: f32) {
        let Some(session) = self.session.as_mut() else {
            warn!("Playing without a session");
            return;
        };

        let outcome = session.update(delta_time, self.input.player_input(), self.options.max_enemies, &mut self.rng);
        self.audio.play_events(session.events_mut(), self.options.sound_enabled);

        let walking = session.player().is_walking_on_ground();
        self.audio.set_walking(walking && self.options.sound_enabled && outcome == Outcome::Running);

        if outcome == Outcome::GameOver {
            let response = self.menu.enter_game_over(&self.options);
            self.audio.play_response(&response);
        }
    }

    fn draw(&self) {
        clear_background(self.options.background);

        match self.menu.state() {
            GameState::MainMenu => menu::draw_main_menu(&self.menu),
            GameState::Controls => menu::draw_controls_menu(),
            GameState::Options => menu::draw_options_menu(&self.menu, &self.options),
            GameState::AskExit => menu::draw_exit_menu(&self.menu),
            GameState::Playing | GameState::GameOver => {
                let Some(session) = self.session.as_ref() else { return };
                draw_session(session, &self.sprites, get_time() as f32);
                if self.menu.state() == GameState::GameOver {
                    menu::draw_game_over_menu(&self.menu, session.player().kill_count());
                }
            }
            GameState::Exit => {}
        }
    }
}

/// Hold the frame until the target frame time has passed
fn limit_fps(limit: FpsLimit, frame_start: f64) {
    let Some(target_frame_time) = limit.frame_time() else { return };
    let remaining = target_frame_time - (get_time() - frame_start);
    if remaining <= 0.0 {
        return;
    }

    // Native: use sleep for bulk, then spin-wait for precision
    #[cfg(not(target_arch = "wasm32"))]
    {
        let spin_margin = 0.002; // 2ms
        while get_time() - frame_start + spin_margin < target_frame_time {
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        while get_time() - frame_start < target_frame_time {
            std::hint::spin_loop();
        }
    }
    // WASM: the browser paces frames
}
