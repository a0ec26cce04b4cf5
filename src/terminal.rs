//! Terminal host: crossterm canvas and keyboard.
//!
//! World coordinates are scaled onto the terminal grid. Sprites become
//! coloured glyph blocks; text is printed at its scaled anchor.

use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::sync::mpsc;

use crossterm::{
    cursor,
    event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use fuel_rush::platform::{Canvas, InputSource, Key, Rgba};
use fuel_rush::sim::{SpriteId, SpriteSheet, Viewport};

/// A key counts as held if its last press/repeat arrived within this many
/// frames. Covers terminals that never report key releases.
const HOLD_WINDOW: u64 = 4;

// ── Keyboard ──────────────────────────────────────────────────────────────────

/// Keyboard state fed from a crossterm event channel
#[derive(Default)]
pub struct Keyboard {
    /// Frame each key was last seen pressed or repeating
    last_seen: HashMap<Key, u64>,
    pressed: HashSet<Key>,
    frame: u64,
}

fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Key::Pause),
        KeyCode::Esc => Some(Key::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Quit),
        _ => None,
    }
}

impl Keyboard {
    /// Drain pending events (non-blocking) and start a new frame
    pub fn poll(&mut self, rx: &mpsc::Receiver<Event>) {
        self.frame += 1;
        self.pressed.clear();

        while let Ok(event) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = event
            else {
                continue;
            };
            let Some(key) = map_key(code, modifiers) else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    if !self.is_held(key) {
                        self.pressed.insert(key);
                    }
                    self.last_seen.insert(key, self.frame);
                }
                KeyEventKind::Repeat => {
                    self.last_seen.insert(key, self.frame);
                }
                KeyEventKind::Release => {
                    self.last_seen.remove(&key);
                }
            }
        }
    }
}

impl InputSource for Keyboard {
    fn is_held(&self, key: Key) -> bool {
        self.last_seen
            .get(&key)
            .is_some_and(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
    }

    fn just_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}

// ── Canvas ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    fg: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    fg: Color::Reset,
};

fn to_color(c: Rgba) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

fn sprite_look(sprite: SpriteId) -> (char, Color) {
    match sprite {
        SpriteId::CarF1 => ('█', Color::Red),
        SpriteId::CarRacing => ('█', Color::Blue),
        SpriteId::Obstacle1 => ('▓', Color::DarkYellow),
        SpriteId::Obstacle2 => ('▓', Color::Grey),
        SpriteId::Obstacle3 => ('▓', Color::DarkMagenta),
        SpriteId::FuelSmall => ('f', Color::Green),
        SpriteId::FuelLarge => ('F', Color::Green),
        SpriteId::BonusStar => ('*', Color::Yellow),
        SpriteId::BonusShield => ('O', Color::Cyan),
        SpriteId::BonusCoin => ('$', Color::DarkYellow),
        SpriteId::FuelIcon => ('▮', Color::Green),
        SpriteId::Road | SpriteId::GameOverTimeout | SpriteId::GameOverGeneric => {
            (' ', Color::Reset)
        }
    }
}

/// Character-cell canvas over a crossterm writer
pub struct TerminalCanvas<W: Write> {
    out: W,
    sprites: SpriteSheet,
    viewport: Viewport,
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
    error: Option<std::io::Error>,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W, sprites: SpriteSheet, viewport: Viewport) -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let cols = cols.max(1);
        let rows = rows.max(1);
        Ok(Self {
            out,
            sprites,
            viewport,
            cols,
            rows,
            cells: vec![BLANK; cols as usize * rows as usize],
            error: None,
        })
    }

    /// First I/O error hit while presenting, if any
    pub fn take_error(&mut self) -> std::io::Result<()> {
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn col(&self, x: i32) -> i32 {
        (x as i64 * self.cols as i64 / self.viewport.width.max(1) as i64) as i32
    }

    fn row(&self, y: i32) -> i32 {
        (y as i64 * self.rows as i64 / self.viewport.height.max(1) as i64) as i32
    }

    fn put(&mut self, col: i32, row: i32, cell: Cell) {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return;
        }
        let idx = row as usize * self.cols as usize + col as usize;
        if let Some(slot) = self.cells.get_mut(idx) {
            *slot = cell;
        }
    }

    fn fill_cells(&mut self, x: i32, y: i32, width: i32, height: i32, cell: Cell) {
        let (c0, r0) = (self.col(x), self.row(y));
        let (c1, r1) = (self.col(x + width).max(c0 + 1), self.row(y + height).max(r0 + 1));
        for row in r0..r1 {
            for col in c0..c1 {
                self.put(col, row, cell);
            }
        }
    }

    /// Dashed centre line that moves with the road layer
    fn draw_road(&mut self, y: i32) {
        let center = self.col(self.viewport.width / 2);
        let top = self.row(y);
        let bottom = self.row(y + self.sprites.road.height);
        for row in top.max(0)..bottom.min(self.rows as i32) {
            if (row - top).rem_euclid(4) < 2 {
                self.put(
                    center,
                    row,
                    Cell {
                        ch: '¦',
                        fg: Color::DarkGrey,
                    },
                );
            }
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        for row in 0..self.rows {
            self.out.queue(cursor::MoveTo(0, row))?;
            let start = row as usize * self.cols as usize;
            let mut current = Color::Reset;
            self.out.queue(style::SetForegroundColor(current))?;
            for cell in &self.cells[start..start + self.cols as usize] {
                if cell.fg != current {
                    current = cell.fg;
                    self.out.queue(style::SetForegroundColor(current))?;
                }
                self.out.queue(Print(cell.ch))?;
            }
        }
        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn draw_sprite(&mut self, sprite: SpriteId, x: i32, y: i32) {
        if sprite == SpriteId::Road {
            self.draw_road(y);
            return;
        }
        let (ch, fg) = sprite_look(sprite);
        let size = self.sprites.get(sprite);
        let (width, height) = (size.width, size.height);
        self.fill_cells(x, y, width, height, Cell { ch, fg });
    }

    fn draw_text(&mut self, text: &str, color: Rgba, _size: u32, x: i32, y: i32) {
        let (col, row) = (self.col(x), self.row(y));
        let fg = if color == Rgba::BLACK {
            Color::White
        } else {
            to_color(color)
        };
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, Cell { ch, fg });
        }
    }

    fn fill_rect(&mut self, color: Rgba, x: i32, y: i32, width: i32, height: i32) {
        // Translucent overlays would hide everything in a terminal
        if color.a < 255 || width <= 0 {
            return;
        }
        self.fill_cells(
            x,
            y,
            width,
            height,
            Cell {
                ch: '█',
                fg: to_color(color),
            },
        );
    }

    fn draw_rect(&mut self, _color: Rgba, x: i32, y: i32, width: i32, _height: i32) {
        let row = self.row(y);
        let cell = Cell {
            ch: '|',
            fg: Color::White,
        };
        self.put(self.col(x) - 1, row, cell);
        self.put(self.col(x + width), row, cell);
    }

    fn text_width(&self, text: &str, _size: u32) -> i32 {
        let chars = text.chars().count() as i64;
        (chars * self.viewport.width as i64 / self.cols.max(1) as i64) as i32
    }

    fn present(&mut self) {
        if let Err(e) = self.flush() {
            log::error!("Terminal write failed: {e}");
            self.error.get_or_insert(e);
        }
        self.cells.fill(BLANK);
    }
}
