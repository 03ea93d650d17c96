//! Sound playback
//!
//! Wraps the loaded sounds with the bits of state macroquad's audio API
//! does not track for us: whether the music and walk loops are running,
//! the eased music volume, and how long a farewell sound has been playing.

use log::debug;
use macroquad::audio::{play_sound, play_sound_once, set_sound_volume, stop_sound, PlaySoundParams, Sound};

use crate::assets::SoundEffects;
use crate::game::Events;
use crate::menu::{MenuCommand, MenuResponse, SoundCue};

/// Time given to the farewell sound before the game closes.
///
/// macroquad cannot report whether a sound is still playing, so the
/// farewell is assumed to last a fixed duration from the frame it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Farewell {
    /// Seconds since the farewell sound started, if one is playing
    elapsed: Option<f32>,
    duration: f32,
}

impl Farewell {
    pub fn new(duration: f32) -> Self {
        Self { elapsed: None, duration }
    }

    pub fn is_playing(&self) -> bool {
        self.elapsed.is_some()
    }

    /// Follow one frame of menu handling. Any exit request or cancellation
    /// drops the previous timer; a farewell cue starts a new one.
    pub fn track(&mut self, response: &MenuResponse) {
        let exit_changed = response
            .commands
            .iter()
            .any(|c| matches!(c, MenuCommand::RequestExit | MenuCommand::CancelExit));
        if exit_changed {
            self.elapsed = None;
        }
        if response.sounds.contains(&SoundCue::Disappointing) {
            self.elapsed = Some(0.0);
        }
    }

    /// Advance the timer. True once there is no farewell sound left to
    /// wait for.
    pub fn tick(&mut self, delta_time: f32) -> bool {
        match self.elapsed.as_mut() {
            Some(elapsed) => {
                *elapsed += delta_time;
                *elapsed >= self.duration
            }
            None => true,
        }
    }
}

pub struct Audio {
    effects: SoundEffects,
    walk: Sound,
    music: Sound,
    music_volume: f32,
    music_playing: bool,
    walk_playing: bool,
    farewell: Farewell,
}

impl Audio {
    pub fn new(effects: SoundEffects, walk: Sound, music: Sound, farewell_duration: f32) -> Self {
        Self {
            effects,
            walk,
            music,
            music_volume: 1.0,
            music_playing: false,
            walk_playing: false,
            farewell: Farewell::new(farewell_duration),
        }
    }

    fn effect(&self, cue: SoundCue) -> &Sound {
        match cue {
            SoundCue::Hover => &self.effects.hover,
            SoundCue::Open => &self.effects.open,
            SoundCue::Back => &self.effects.back,
            SoundCue::No => &self.effects.no,
            SoundCue::Disappointing => &self.effects.disappointing,
            SoundCue::Lose => &self.effects.lose,
        }
    }

    /// Play a menu response's cues; they were already filtered by the
    /// sound option
    pub fn play_response(&mut self, response: &MenuResponse) {
        self.farewell.track(response);
        for cue in &response.sounds {
            play_sound_once(self.effect(*cue));
        }
    }

    /// Drain a session's events into sound effects
    pub fn play_events(&mut self, events: &mut Events, sound_enabled: bool) {
        if !sound_enabled {
            events.clear_all();
            return;
        }
        for event in events.explosion.drain() {
            debug!("Bomb at ({:.0}, {:.0})", event.position.x, event.position.y);
            play_sound_once(&self.effects.explosion);
        }
        for event in events.contact.drain() {
            debug!("Contact {:?} at ({:.0}, {:.0})", event.contact, event.position.x, event.position.y);
        }
        // Nothing audible for contacts, finish line crossings or spawns
        events.finish.clear();
        events.spawn.clear();
    }

    /// Start or stop the walk loop
    pub fn set_walking(&mut self, walking: bool) {
        if walking && !self.walk_playing {
            play_sound(&self.walk, PlaySoundParams { looped: true, volume: 1.0 });
            self.walk_playing = true;
        } else if !walking && self.walk_playing {
            stop_sound(&self.walk);
            self.walk_playing = false;
        }
    }

    /// Keep the music running or silent to match the option, at `volume`
    pub fn update_music(&mut self, enabled: bool, volume: f32) {
        self.music_volume = volume;
        if enabled && !self.music_playing {
            play_sound(&self.music, PlaySoundParams { looped: true, volume: self.music_volume });
            self.music_playing = true;
        } else if !enabled && self.music_playing {
            stop_sound(&self.music);
            self.music_playing = false;
        }
        if self.music_playing {
            set_sound_volume(&self.music, self.music_volume);
        }
    }

    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    pub fn farewell_done(&mut self, delta_time: f32) -> bool {
        self.farewell.tick(delta_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{GameState, Menu, MenuInput, Options};

    fn confirm() -> MenuInput {
        MenuInput { confirm: true, ..Default::default() }
    }

    fn back() -> MenuInput {
        MenuInput { back: true, ..Default::default() }
    }

    fn down() -> MenuInput {
        MenuInput { down: true, ..Default::default() }
    }

    #[test]
    fn test_farewell_waits_for_duration() {
        let mut farewell = Farewell::new(1.5);
        assert!(farewell.tick(0.1));

        farewell.track(&MenuResponse {
            sounds: vec![SoundCue::Disappointing],
            commands: vec![MenuCommand::RequestExit],
        });
        assert!(!farewell.tick(1.0));
        assert!(farewell.tick(0.5));
    }

    #[test]
    fn test_cancelled_farewell_does_not_delay_silent_exit() {
        let mut menu = Menu::new();
        let mut options = Options::new();
        let mut farewell = Farewell::new(1.5);

        // Yes!? with sound on
        farewell.track(&menu.handle_input(back(), &mut options));
        farewell.track(&menu.handle_input(confirm(), &mut options));
        assert!(farewell.is_playing());
        assert!(!farewell.tick(0.5));

        // No! before the sound is over
        farewell.track(&menu.handle_input(down(), &mut options));
        farewell.track(&menu.handle_input(confirm(), &mut options));
        assert_eq!(menu.state(), GameState::MainMenu);
        assert!(!farewell.is_playing());

        // Yes!? again with sound off: nothing to wait for
        options.sound_enabled = false;
        farewell.track(&menu.handle_input(back(), &mut options));
        let r = menu.handle_input(back(), &mut options);
        assert!(r.sounds.is_empty());
        farewell.track(&r);
        assert!(!farewell.is_playing());

        menu.finish_exit(farewell.tick(0.016));
        assert_eq!(menu.state(), GameState::Exit);
    }
}
