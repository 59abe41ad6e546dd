//! # Display Management
//!
//! Screen management and 2D rendering of a session using macroquad.
//!
//! The screen is a grid of square cells: the map fills the top rows and a
//! status panel with the HP bar, depth, look tooltip and message log fills
//! the rest.

use super::ui::{self, to_color, DARK_GROUND, DARK_WALL, LIGHT_GROUND, LIGHT_WALL};
use crate::config;
use crate::game::{GameState, Menu, Position, Rgb, TileAppearance};
use crate::utils::wrap_text;
use macroquad::prelude::*;

/// Macroquad display manager for the game.
pub struct MacroquadDisplay {
    /// Cell size in pixels
    pub cell_size: f32,
    /// Map width in cells
    pub map_width: i32,
    /// Map height in cells
    pub map_height: i32,
    /// First row of the status panel
    pub panel_y: i32,
}

impl Default for MacroquadDisplay {
    fn default() -> Self {
        Self::new(config::CELL_SIZE)
    }
}

impl MacroquadDisplay {
    /// Creates a display laid out on the standard screen geometry.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::MacroquadDisplay;
    ///
    /// let display = MacroquadDisplay::new(12.0);
    /// assert_eq!(display.panel_y, 43);
    /// ```
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            map_width: config::MAP_WIDTH as i32,
            map_height: config::MAP_HEIGHT as i32,
            panel_y: (config::SCREEN_HEIGHT - config::PANEL_HEIGHT) as i32,
        }
    }

    /// Window size in pixels for the standard screen geometry.
    pub fn window_size(cell_size: f32) -> (i32, i32) {
        (
            (config::SCREEN_WIDTH as f32 * cell_size) as i32,
            (config::SCREEN_HEIGHT as f32 * cell_size) as i32,
        )
    }

    /// Top-left pixel of a cell.
    pub fn cell_origin(&self, x: i32, y: i32) -> (f32, f32) {
        (x as f32 * self.cell_size, y as f32 * self.cell_size)
    }

    /// The map cell under a pixel, if the pixel is over the map.
    pub fn cell_at(&self, px: f32, py: f32) -> Option<Position> {
        if px < 0.0 || py < 0.0 {
            return None;
        }
        let x = (px / self.cell_size) as i32;
        let y = (py / self.cell_size) as i32;
        (x < self.map_width && y < self.map_height).then(|| Position::new(x, y))
    }

    /// The map cell under the mouse cursor.
    pub fn mouse_cell(&self) -> Option<Position> {
        let (px, py) = mouse_position();
        self.cell_at(px, py)
    }

    /// Renders the complete game screen.
    pub fn render_game(&self, state: &GameState) {
        clear_background(BLACK);
        self.render_map(state);
        self.render_entities(state);
        self.render_panel(state);
    }

    /// Draws every lit and remembered tile; unexplored tiles stay black.
    fn render_map(&self, state: &GameState) {
        for y in 0..(state.grid.height as i32).min(self.map_height) {
            for x in 0..(state.grid.width as i32).min(self.map_width) {
                let color = match state.tile_appearance(Position::new(x, y)) {
                    TileAppearance::Unexplored => continue,
                    TileAppearance::Remembered { wall: true } => DARK_WALL,
                    TileAppearance::Remembered { wall: false } => DARK_GROUND,
                    TileAppearance::Lit { wall: true } => LIGHT_WALL,
                    TileAppearance::Lit { wall: false } => LIGHT_GROUND,
                };
                let (px, py) = self.cell_origin(x, y);
                draw_rectangle(px, py, self.cell_size, self.cell_size, to_color(color));
            }
        }
    }

    /// Draws visible entities back to front.
    fn render_entities(&self, state: &GameState) {
        for entity in state.render_order() {
            self.draw_glyph(entity.position.x, entity.position.y, entity.glyph, entity.color);
        }
    }

    fn draw_glyph(&self, x: i32, y: i32, glyph: char, color: Rgb) {
        let (px, py) = self.cell_origin(x, y);
        let mut buffer = [0u8; 4];
        let text: &str = glyph.encode_utf8(&mut buffer);
        let dims = measure_text(text, None, self.font_size() as u16, 1.0);
        draw_text(
            text,
            px + (self.cell_size - dims.width) / 2.0,
            py + self.cell_size * 0.85,
            self.font_size(),
            to_color(color),
        );
    }

    fn font_size(&self) -> f32 {
        self.cell_size * 1.25
    }

    /// Draws the status panel: HP bar, depth, look tooltip and messages.
    fn render_panel(&self, state: &GameState) {
        let (_, panel_top) = self.cell_origin(0, self.panel_y);
        draw_rectangle(
            0.0,
            panel_top,
            screen_width(),
            config::PANEL_HEIGHT as f32 * self.cell_size,
            BLACK,
        );

        let (hp, max_hp) = state.player_health();
        let (bar_x, bar_y) = self.cell_origin(1, self.panel_y + 1);
        ui::draw_bar(
            bar_x,
            bar_y,
            config::BAR_WIDTH as f32 * self.cell_size,
            self.cell_size,
            "HP",
            hp,
            max_hp,
            Rgb::LIGHT_RED,
            Rgb::DARK_RED,
        );

        let (depth_x, depth_y) = self.cell_origin(1, self.panel_y + 3);
        draw_text(
            &format!("Dungeon level {}", state.depth),
            depth_x,
            depth_y + self.cell_size * 0.8,
            self.font_size(),
            WHITE,
        );

        if let Some(cell) = self.mouse_cell() {
            let names = state.names_at(cell);
            if !names.is_empty() {
                let (look_x, look_y) = self.cell_origin(1, self.panel_y);
                draw_text(&names, look_x, look_y + self.cell_size * 0.8, self.font_size(), LIGHTGRAY);
            }
        }

        for (row, message) in state.messages.iter().enumerate() {
            let (msg_x, msg_y) = self.cell_origin(config::MSG_X as i32, self.panel_y + 1 + row as i32);
            draw_text(
                &message.text,
                msg_x,
                msg_y + self.cell_size * 0.8,
                self.font_size(),
                to_color(message.color),
            );
        }
    }

    /// Draws a letter-addressed menu over whatever is on screen.
    pub fn render_menu(&self, menu: &Menu, width_chars: usize) {
        ui::draw_menu(menu, width_chars, self.cell_size);
    }

    /// Draws a single wrapped message in a box.
    pub fn render_message_box(&self, text: &str, width_chars: usize) {
        let lines: Vec<String> = text
            .lines()
            .flat_map(|line| {
                if line.is_empty() {
                    vec![String::new()]
                } else {
                    wrap_text(line, width_chars)
                }
            })
            .collect();
        ui::draw_text_box(&lines, width_chars as f32 * self.cell_size * 0.6, self.cell_size);
    }

    /// Draws the title screen behind the main menu.
    pub fn render_title(&self, title: &str, subtitle: &str) {
        clear_background(BLACK);
        let center_x = screen_width() / 2.0;
        let top = screen_height() / 4.0;

        let title_size = self.cell_size * 3.0;
        let dims = measure_text(title, None, title_size as u16, 1.0);
        draw_text(title, center_x - dims.width / 2.0, top, title_size, to_color(Rgb::LIGHT_YELLOW));

        let dims = measure_text(subtitle, None, self.font_size() as u16, 1.0);
        draw_text(
            subtitle,
            center_x - dims.width / 2.0,
            top + title_size,
            self.font_size(),
            LIGHTGRAY,
        );
    }
}
