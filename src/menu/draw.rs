//! Menu screen drawing
//!
//! Every screen lays itself out from the current window size, shrinking
//! fonts that would overflow the horizontal margins.

use macroquad::prelude::*;

use super::options::{OptionRow, Options};
use super::state::{Menu, EXIT_BUTTONS, GAME_OVER_BUTTONS, MAIN_MENU_BUTTONS};
use crate::ui::{
    arrow_button, button, button_column, draw_overlay, draw_text_centered, draw_text_top, fitted_size,
    responsive_size, ButtonStyle, GAME_OVER_OVERLAY_ALPHA, MENU_OVERLAY_ALPHA, MIN_ARROW_SIZE,
    MIN_MARGIN,
};

const TITLE: &str = "PLAY AS GOBO";
const SUBTITLE: &str = "By Almohtady Bellah";
const CONTROL_LINES: [&str; 3] = ["Movement: Arrow Keys and W,A,S,D", "Bomb: Space", "End Game: Escape Key"];
const CONTROLS_BACK: &str = "Press Escape Key to Main Menu";
const OPTIONS_HELP: &str = "Use UP/DOWN to navigate, LEFT/RIGHT to change values";

/// Window extent available to menu content
struct Frame {
    width: f32,
    height: f32,
}

impl Frame {
    fn current() -> Self {
        Self { width: screen_width(), height: screen_height() }
    }

    fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    fn available_width(&self) -> f32 {
        self.width - MIN_MARGIN * 2.0
    }

    /// Top of a block of `total` height centered vertically, kept on screen
    fn block_top(&self, total: f32) -> f32 {
        let top = self.height / 2.0 - total / 2.0;
        top.min(self.height - MIN_MARGIN - total).max(MIN_MARGIN)
    }
}

pub fn draw_main_menu(menu: &Menu) {
    let frame = Frame::current();
    draw_overlay(frame.width, frame.height, MENU_OVERLAY_ALPHA);

    let available = frame.available_width();
    let title_size = fitted_size(TITLE, responsive_size(frame.width, 15.0, 24, 80), available);
    let subtitle_size = fitted_size(SUBTITLE, responsive_size(frame.width, 60.0, 12, 24), available);

    let button_height = (frame.height / 15.0).clamp(35.0, 60.0);
    let button_spacing = (frame.height / 40.0).clamp(10.0, 25.0);
    let title_spacing = (frame.height / 30.0).clamp(15.0, 40.0);
    let count = MAIN_MENU_BUTTONS.len() as f32;
    let total = title_size as f32
        + subtitle_size as f32
        + title_spacing
        + count * button_height
        + (count - 1.0) * button_spacing;
    let top = frame.block_top(total);

    draw_text_centered(TITLE, frame.center_x(), top, title_size, GOLD);
    draw_text_centered(
        SUBTITLE,
        frame.center_x(),
        top + title_size as f32 + title_spacing / 2.0,
        subtitle_size,
        YELLOW,
    );

    let button_width = (frame.width / 4.0).clamp(150.0, 300.0);
    let buttons_top = top + title_size as f32 + subtitle_size as f32 + title_spacing;
    let rects = button_column(
        frame.center_x(),
        buttons_top,
        button_width,
        button_height,
        button_spacing,
        MAIN_MENU_BUTTONS.len(),
    );
    for (i, (rect, label)) in rects.iter().zip(MAIN_MENU_BUTTONS).enumerate() {
        button(*rect, label, i == menu.main_selected(), ButtonStyle::PLAIN);
    }
}

pub fn draw_controls_menu() {
    let frame = Frame::current();
    draw_overlay(frame.width, frame.height, MENU_OVERLAY_ALPHA);

    let available = frame.available_width();
    let title_size = fitted_size("Controls", responsive_size(frame.width, 15.0, 24, 60), available);
    let line_size = responsive_size(frame.width, 25.0, 16, 28);
    let back_size = fitted_size(CONTROLS_BACK, responsive_size(frame.width, 35.0, 12, 18), available);

    let total = title_size as f32 + line_size as f32 * 4.0 + back_size as f32 + 80.0;
    let top = (frame.height / 2.0 - total / 2.0).max(MIN_MARGIN);
    draw_text_centered("Controls", frame.center_x(), top, title_size, RED);

    let lines_top = top + title_size as f32 + 40.0;
    let line_spacing = line_size as f32 + 10.0;
    for (i, line) in CONTROL_LINES.iter().enumerate() {
        let size = fitted_size(line, line_size, available);
        draw_text_centered(line, frame.center_x(), lines_top + i as f32 * line_spacing, size, DARKGREEN);
    }

    let back_y = lines_top + CONTROL_LINES.len() as f32 * line_spacing + 20.0;
    draw_text_centered(CONTROLS_BACK, frame.center_x(), back_y, back_size, GRAY);
}

fn option_value_color(enabled: bool) -> Color {
    if enabled {
        GREEN
    } else {
        RED
    }
}

fn draw_option_row(row: OptionRow, options: &Options, selected: bool, left: f32, y: f32, width: f32, height: f32) {
    let label_color = if selected { YELLOW } else { WHITE };
    let label_width = width * 0.55;
    let label_size = fitted_size(row.label(), (height * 0.6) as u16, label_width);
    draw_text_top(row.label(), left, y + (height - label_size as f32) / 2.0, label_size, label_color);

    // Right column: "<" value ">"
    let arrow = height.max(MIN_ARROW_SIZE);
    let column_x = left + label_width;
    let column_w = width - label_width;
    arrow_button(Rect::new(column_x, y, arrow, arrow), "<", selected);
    arrow_button(Rect::new(column_x + column_w - arrow, y, arrow, arrow), ">", selected);

    let value_left = column_x + arrow;
    let value_w = column_w - arrow * 2.0;
    let value_size = (height * 0.6) as u16;
    let value_y = y + (height - value_size as f32) / 2.0;
    let center = value_left + value_w / 2.0;
    match row {
        OptionRow::MaxEnemies => {
            let text = options.max_enemies.to_string();
            draw_text_centered(&text, center, value_y, value_size, label_color);
        }
        OptionRow::BackgroundColor => {
            let preview = (height * 0.6).clamp(15.0, 20.0);
            let px = center - preview / 2.0;
            let py = y + (height - preview) / 2.0;
            draw_rectangle(px, py, preview, preview, options.background);
            draw_rectangle_lines(px, py, preview, preview, 1.0, WHITE);

            let name = options.background_name();
            let name_size = fitted_size(name, value_size.saturating_sub(2), column_w);
            if name_size > 8 {
                draw_text_centered(name, column_x + column_w / 2.0, y + height + 3.0, name_size, label_color);
            }
        }
        OptionRow::Music | OptionRow::SoundEffects => {
            let enabled = if row == OptionRow::Music { options.music_enabled } else { options.sound_enabled };
            let text = if enabled { "ON" } else { "OFF" };
            draw_text_centered(text, center, value_y, value_size, option_value_color(enabled));
        }
    }
}

pub fn draw_options_menu(menu: &Menu, options: &Options) {
    let frame = Frame::current();
    draw_overlay(frame.width, frame.height, MENU_OVERLAY_ALPHA);

    let available = frame.available_width();
    let title_size = fitted_size("Options", responsive_size(frame.width, 15.0, 24, 60), available);
    let row_height = (frame.height / 14.0).clamp(MIN_ARROW_SIZE, 40.0);
    // Background row carries its color name underneath
    let row_spacing = row_height * 0.9;
    let help_size = fitted_size(OPTIONS_HELP, responsive_size(frame.width, 50.0, 10, 16), available);
    let rows = OptionRow::ALL.len() as f32;
    let total = title_size as f32 + 30.0 + rows * (row_height + row_spacing) + help_size as f32;
    let top = frame.block_top(total);

    draw_text_centered("Options", frame.center_x(), top, title_size, GOLD);

    let width = available.min(500.0);
    let left = frame.center_x() - width / 2.0;
    let mut y = top + title_size as f32 + 30.0;
    for (i, row) in OptionRow::ALL.iter().enumerate() {
        draw_option_row(*row, options, i == menu.options_selected(), left, y, width, row_height);
        y += row_height + row_spacing;
    }

    draw_text_centered(OPTIONS_HELP, frame.center_x(), y, help_size, GRAY);
}

/// Two-button dialog shared by game over and the exit prompt
fn draw_dialog(frame: &Frame, top: f32, labels: &[&str], selected: usize) {
    let button_height = (frame.height / 15.0).clamp(35.0, 60.0);
    let button_spacing = (frame.height / 40.0).clamp(10.0, 25.0);
    let button_width = (frame.width / 4.0).clamp(150.0, 300.0);
    let rects = button_column(frame.center_x(), top, button_width, button_height, button_spacing, labels.len());
    for (i, (rect, label)) in rects.iter().zip(labels).enumerate() {
        button(*rect, label, i == selected, ButtonStyle::CONTRAST);
    }
}

/// Drawn over the frozen world
pub fn draw_game_over_menu(menu: &Menu, kills: u32) {
    let frame = Frame::current();
    draw_overlay(frame.width, frame.height, GAME_OVER_OVERLAY_ALPHA);

    let available = frame.available_width();
    let title_size = fitted_size("GAME OVER", responsive_size(frame.width, 12.0, 30, 80), available);
    let kills_text = format!("Kills: {}", kills);
    let kills_size = fitted_size(&kills_text, responsive_size(frame.width, 30.0, 18, 40), available);
    let top = frame.block_top(title_size as f32 + kills_size as f32 + 160.0);

    draw_text_centered("GAME OVER", frame.center_x(), top, title_size, RED);
    let kills_y = top + title_size as f32 + 15.0;
    draw_text_centered(&kills_text, frame.center_x(), kills_y, kills_size, DARKGREEN);

    draw_dialog(&frame, kills_y + kills_size as f32 + 30.0, &GAME_OVER_BUTTONS, menu.game_over_selected());
}

pub fn draw_exit_menu(menu: &Menu) {
    let frame = Frame::current();
    draw_overlay(frame.width, frame.height, MENU_OVERLAY_ALPHA);

    let question = "Do you want to exit?";
    let size = fitted_size(question, responsive_size(frame.width, 20.0, 20, 50), frame.available_width());
    let top = frame.block_top(size as f32 + 150.0);
    draw_text_centered(question, frame.center_x(), top, size, RED);

    draw_dialog(&frame, top + size as f32 + 30.0, &EXIT_BUTTONS, menu.exit_selected());
}
