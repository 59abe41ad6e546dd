//! # User Interface Elements
//!
//! Colours, bars, menus and message boxes drawn over the map.

use crate::game::{Menu, Rgb};
use crate::utils::wrap_text;
use macroquad::prelude::*;

/// Tile colours for the two light states.
pub const DARK_WALL: Rgb = Rgb::new(0, 0, 100);
pub const LIGHT_WALL: Rgb = Rgb::new(130, 110, 50);
pub const DARK_GROUND: Rgb = Rgb::new(50, 50, 150);
pub const LIGHT_GROUND: Rgb = Rgb::new(200, 180, 50);

/// Converts a game colour into a macroquad one.
pub fn to_color(rgb: Rgb) -> Color {
    Color::from_rgba(rgb.r, rgb.g, rgb.b, 255)
}

/// Width in pixels of the filled part of a bar.
///
/// # Examples
///
/// ```
/// use delve::rendering::bar_fill;
///
/// assert_eq!(bar_fill(25, 100, 200.0), 50.0);
/// assert_eq!(bar_fill(-3, 100, 200.0), 0.0);
/// ```
pub fn bar_fill(value: i32, maximum: i32, total_width: f32) -> f32 {
    if maximum <= 0 {
        return 0.0;
    }
    let ratio = value.clamp(0, maximum) as f32 / maximum as f32;
    ratio * total_width
}

/// Lines a menu occupies: the wrapped header followed by one line per option.
pub fn menu_lines(menu: &Menu, width_chars: usize) -> Vec<String> {
    let mut lines = if menu.header.is_empty() {
        Vec::new()
    } else {
        wrap_text(&menu.header, width_chars)
    };
    lines.extend(menu.lines());
    lines
}

/// Draws a labelled bar such as the HP bar.
#[allow(clippy::too_many_arguments)]
pub fn draw_bar(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    label: &str,
    value: i32,
    maximum: i32,
    fill: Rgb,
    back: Rgb,
) {
    draw_rectangle(x, y, width, height, to_color(back));
    let filled = bar_fill(value, maximum, width);
    if filled > 0.0 {
        draw_rectangle(x, y, filled, height, to_color(fill));
    }

    let text = format!("{}: {}/{}", label, value, maximum);
    let font_size = height.max(8.0);
    let dims = measure_text(&text, None, font_size as u16, 1.0);
    draw_text(
        &text,
        x + (width - dims.width) / 2.0,
        y + height * 0.8,
        font_size,
        WHITE,
    );
}

/// Draws a framed, centred block of text lines.
pub fn draw_text_box(lines: &[String], width: f32, cell_size: f32) {
    let height = (lines.len().max(1)) as f32 * cell_size;
    let x = (screen_width() - width) / 2.0;
    let y = (screen_height() - height) / 2.0;

    let margin = cell_size / 2.0;
    let (frame_x, frame_y) = (x - margin, y - margin);
    let (frame_w, frame_h) = (width + cell_size, height + cell_size);
    draw_rectangle(frame_x, frame_y, frame_w, frame_h, Color::new(0.0, 0.0, 0.0, 0.85));
    draw_rectangle_lines(frame_x, frame_y, frame_w, frame_h, 1.0, GRAY);

    for (row, line) in lines.iter().enumerate() {
        draw_text(line, x, y + (row as f32 + 0.8) * cell_size, cell_size * 1.2, WHITE);
    }
}

/// Draws a letter-addressed menu in the middle of the screen.
pub fn draw_menu(menu: &Menu, width_chars: usize, cell_size: f32) {
    let lines = menu_lines(menu, width_chars);
    draw_text_box(&lines, width_chars as f32 * cell_size * 0.6, cell_size);
}
