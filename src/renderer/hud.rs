//! Heads-up display

use crate::platform::{Canvas, Rgba};
use crate::sim::{Hud, SpriteId, Viewport};

const FONT_SIZE: u32 = 20;
const BUFF_FONT_SIZE: u32 = 18;

/// Fuel bar geometry
const BAR_X: i32 = 60;
const BAR_Y: i32 = 20;
const BAR_WIDTH: i32 = 150;
const BAR_HEIGHT: i32 = 20;

/// Draw score, clock, fuel bar and active buff countdowns
pub fn draw_hud<C: Canvas + ?Sized>(canvas: &mut C, hud: &Hud, viewport: Viewport) {
    let right = viewport.width - 120;
    canvas.draw_text(&format!("SCORE: {}", hud.score), Rgba::BLACK, FONT_SIZE, right, 10);
    canvas.draw_text(
        &format!("Time: {}", hud.time_left_secs),
        Rgba::BLACK,
        FONT_SIZE,
        right,
        30,
    );

    canvas.draw_sprite(SpriteId::FuelIcon, 20, 15);
    canvas.fill_rect(Rgba::GRAY, BAR_X, BAR_Y, BAR_WIDTH, BAR_HEIGHT);
    let fill = (BAR_WIDTH as f32 * hud.fuel_fraction) as i32;
    let color = if hud.fuel_low { Rgba::RED } else { Rgba::GREEN };
    canvas.fill_rect(color, BAR_X, BAR_Y, fill, BAR_HEIGHT);
    canvas.draw_rect(Rgba::BLACK, BAR_X, BAR_Y, BAR_WIDTH, BAR_HEIGHT);

    if let Some(left) = hud.double_score_secs {
        canvas.draw_text(
            &format!("x2 Score ({left}s)"),
            Rgba::YELLOW,
            BUFF_FONT_SIZE,
            20,
            50,
        );
    }
    if let Some(left) = hud.shield_secs {
        canvas.draw_text(
            &format!("Shield ({left}s)"),
            Rgba::CYAN,
            BUFF_FONT_SIZE,
            20,
            70,
        );
    }
}
