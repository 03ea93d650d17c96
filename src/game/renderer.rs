//! World Renderer
//!
//! Draws a session through its camera: ground, player, finish line,
//! enemies and explosions, followed by the screen-space HUD.

use log::warn;
use macroquad::prelude::*;

use super::enemy::{Direction, Enemy};
use super::player::Player;
use super::session::{Session, TEXTURE_RESOLUTION};
use crate::ui::text::{draw_text_top, text_width};

const BOMB_TEXT: &str = "Space to Bomb!";
const BOMB_FONT_SIZE: u16 = 30;
/// Bomb hint sits this far above the window's vertical center
const BOMB_TEXT_OFFSET_Y: f32 = 100.0;
const BOMB_PULSE_SPEED: f32 = 4.0;
const BOMB_GLOW_OPACITY: f32 = 0.8;
const GLOW_RINGS: usize = 8;
const KILLS_FONT_SIZE: u16 = 40;
const HUD_MARGIN: f32 = 20.0;

/// Animation frames for the two characters
pub struct Sprites {
    pub player: Vec<Texture2D>,
    pub enemy: Vec<Texture2D>,
}

/// Alpha of the bomb glow at `time` seconds
pub fn bomb_glow_alpha(time: f32) -> f32 {
    ((time * BOMB_PULSE_SPEED).sin() + 1.0) / 2.0 * BOMB_GLOW_OPACITY
}

/// Source region of a sprite frame
fn sprite_source() -> Rect {
    Rect::new(0.0, 0.0, TEXTURE_RESOLUTION, TEXTURE_RESOLUTION)
}

fn draw_sprite(texture: &Texture2D, center: Vec2, radius: f32, flip_x: bool) {
    let diameter = radius * 2.0;
    draw_texture_ex(
        texture,
        center.x - radius,
        center.y - radius,
        WHITE,
        DrawTextureParams {
            dest_size: Some(vec2(diameter, diameter)),
            source: Some(sprite_source()),
            flip_x,
            ..Default::default()
        },
    );
}

pub fn draw_player(player: &Player, sprites: &[Texture2D], window_height: f32, time: f32) {
    let Some(texture) = sprites.get(player.frame().index()) else {
        warn!("No player texture for frame {:?}", player.frame());
        return;
    };
    let e = player.entity();
    draw_sprite(texture, e.center(), e.radius(), false);

    if player.can_use_bomb() {
        draw_bomb_indicator(player, window_height, time);
    }
}

fn draw_bomb_indicator(player: &Player, window_height: f32, time: f32) {
    let e = player.entity();
    let width = text_width(BOMB_TEXT, BOMB_FONT_SIZE);
    draw_text_top(
        BOMB_TEXT,
        e.x() - width / 2.0,
        window_height / 2.0 - BOMB_TEXT_OFFSET_Y,
        BOMB_FONT_SIZE,
        MAROON,
    );

    // Radial fade approximated with stacked discs
    let alpha = bomb_glow_alpha(time);
    let center = vec2(e.x(), e.y() - e.radius() * 0.75);
    let radius = e.radius() * 0.5;
    for ring in 0..GLOW_RINGS {
        let t = ring as f32 / GLOW_RINGS as f32;
        let ring_alpha = alpha / GLOW_RINGS as f32;
        draw_circle(center.x, center.y, radius * (1.0 - t), Color { a: ring_alpha, ..RED });
    }
}

pub fn draw_enemy(enemy: &Enemy, sprites: &[Texture2D]) {
    let Some(texture) = sprites.get(enemy.frame().index()) else {
        warn!("No enemy texture for frame {:?}", enemy.frame());
        return;
    };
    let e = enemy.entity();
    draw_sprite(texture, e.center(), e.radius(), enemy.direction() == Direction::Left);
}

/// Draw the world through the session camera, then the HUD on top.
pub fn draw_session(session: &Session, sprites: &Sprites, time: f32) {
    set_camera(&session.camera().to_camera2d());

    for ground in session.grounds() {
        ground.draw();
    }
    let window_height = session.layout().window.y;
    draw_player(session.player(), &sprites.player, window_height, time);
    session.finish_line().draw_animated(time);
    for enemy in session.enemies() {
        draw_enemy(enemy, &sprites.enemy);
    }
    session.explosions().draw();

    set_default_camera();

    draw_kill_counter(session.player().kill_count(), session.layout().window.x);
}

/// Font size for the kill counter, shrunk to fit a third of the window
pub fn kills_font_size(text_width_at_default: f32, window_width: f32) -> u16 {
    let max_width = window_width / 3.0;
    if text_width_at_default > max_width && text_width_at_default > 0.0 {
        ((KILLS_FONT_SIZE as f32 * max_width / text_width_at_default) as u16).max(1)
    } else {
        KILLS_FONT_SIZE
    }
}

fn draw_kill_counter(kills: u32, window_width: f32) {
    let text = format!("Kills: {}", kills);
    let size = kills_font_size(text_width(&text, KILLS_FONT_SIZE), window_width);
    draw_text_top(&text, HUD_MARGIN, HUD_MARGIN, size, MAROON);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bomb_glow_alpha_range() {
        for i in 0..200 {
            let a = bomb_glow_alpha(i as f32 * 0.01);
            assert!((0.0..=BOMB_GLOW_OPACITY + 1e-6).contains(&a));
        }
        assert!((bomb_glow_alpha(0.0) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_kills_font_shrinks_to_fit() {
        assert_eq!(kills_font_size(100.0, 854.0), 40);
        // 300 wide text in a 600 window: max 200, scale 2/3
        assert_eq!(kills_font_size(300.0, 600.0), 26);
    }
}
