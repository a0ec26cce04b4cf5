//! Rendering module
//!
//! Turns a `FrameSnapshot` into calls on a host `Canvas`. Paint order:
//! road layers, bonuses, player, obstacles, fuel, floating text, HUD, pause
//! overlay.

pub mod hud;

pub use hud::draw_hud;

use crate::platform::{Canvas, Rgba};
use crate::sim::{EndScreen, FeedbackTone, FrameSnapshot, SpriteDraw, Viewport};

const FLOATING_TEXT_SIZE: u32 = 16;
const PAUSE_OVERLAY: Rgba = Rgba::rgba(0, 0, 0, 150);

/// Colour for a floating message
pub fn tone_color(tone: FeedbackTone) -> Rgba {
    match tone {
        FeedbackTone::Penalty => Rgba::RED,
        FeedbackTone::Fuel => Rgba::GREEN,
        FeedbackTone::TimeBonus | FeedbackTone::Points => Rgba::ORANGE,
        FeedbackTone::DoubleScore => Rgba::YELLOW,
        FeedbackTone::Shield => Rgba::CYAN,
    }
}

fn draw_all<C: Canvas + ?Sized>(canvas: &mut C, sprites: &[SpriteDraw]) {
    for s in sprites {
        canvas.draw_sprite(s.sprite, s.x, s.y);
    }
}

/// Draw and present one gameplay frame
pub fn draw_frame<C: Canvas + ?Sized>(canvas: &mut C, frame: &FrameSnapshot) {
    draw_all(canvas, &frame.background);
    draw_all(canvas, &frame.bonuses);
    draw_all(canvas, std::slice::from_ref(&frame.player));
    draw_all(canvas, &frame.obstacles);
    draw_all(canvas, &frame.fuels);

    for text in &frame.floating_texts {
        canvas.draw_text(
            &text.text,
            tone_color(text.tone),
            FLOATING_TEXT_SIZE,
            text.pos.x,
            text.pos.y,
        );
    }

    draw_hud(canvas, &frame.hud, frame.viewport);

    if frame.is_paused() {
        let Viewport { width, height } = frame.viewport;
        canvas.fill_rect(PAUSE_OVERLAY, 0, 0, width, height);
        canvas.draw_text("PAUSED", Rgba::RED, 40, width / 2 - 80, height / 2 - 20);
    }

    canvas.present();
}

fn draw_centered<C: Canvas + ?Sized>(
    canvas: &mut C,
    viewport: Viewport,
    text: &str,
    color: Rgba,
    size: u32,
    y: i32,
) {
    let x = (viewport.width - canvas.text_width(text, size)) / 2;
    canvas.draw_text(text, color, size, x, y);
}

/// Draw and present the end screen
pub fn draw_game_over<C: Canvas + ?Sized>(canvas: &mut C, end: &EndScreen, viewport: Viewport) {
    canvas.draw_sprite(end.backdrop, 0, 0);
    let mid = viewport.height / 2;
    draw_centered(canvas, viewport, end.title, Rgba::WHITE, 42, mid - 60);
    draw_centered(
        canvas,
        viewport,
        &format!("FINAL SCORE: {}", end.score),
        Rgba::YELLOW,
        28,
        mid,
    );
    draw_centered(canvas, viewport, "Press ESC to exit", Rgba::WHITE, 18, mid + 40);
    canvas.present();
}
