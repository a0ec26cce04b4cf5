//! Fuel Rush entry point
//!
//! Native builds run the game in the terminal via crossterm.

#[cfg(not(target_arch = "wasm32"))]
mod terminal;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::io::{self, BufRead, Write};
    use std::sync::mpsc;
    use std::thread;
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use crossterm::{
        cursor,
        event::{self, Event},
        execute, terminal,
    };

    use fuel_rush::renderer::{draw_frame, draw_game_over};
    use fuel_rush::sim::{CarKind, EndScreen, FrameSnapshot, TickInput, tick};
    use fuel_rush::Settings;

    use crate::terminal::{Keyboard, TerminalCanvas};

    /// Ask for a car on stdin; empty input or EOF keeps `fallback`
    fn choose_car(fallback: CarKind) -> io::Result<CarKind> {
        let mut out = io::stdout();
        writeln!(out, "Choose your car:")?;
        writeln!(out, "  1) F1")?;
        writeln!(out, "  2) Racing")?;
        write!(out, "[1-2, default {}] > ", fallback.as_str())?;
        out.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 || line.trim().is_empty() {
            return Ok(fallback);
        }
        Ok(CarKind::parse_or_default(&line))
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    /// Spawn the event reader; the channel closes when the reader fails
    fn spawn_event_thread() -> mpsc::Receiver<Event> {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            loop {
                match event::read() {
                    Ok(ev) => {
                        if tx.send(ev).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        log::error!("Input error: {e}");
                        break;
                    }
                }
            }
        });
        rx
    }

    pub fn run() -> io::Result<()> {
        let mut settings = Settings::load();
        settings.car = choose_car(settings.car)?;
        let seed = settings.seed.unwrap_or_else(clock_seed);
        log::info!(
            "Starting with {} car, seed {seed}, window {}x{}",
            settings.car.as_str(),
            settings.window_width,
            settings.window_height
        );

        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = play(&settings, seed);

        // Always restore the terminal, even when the session failed
        let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();

        result
    }

    fn play(settings: &Settings, seed: u64) -> io::Result<()> {
        let mut state = settings.new_game(seed);
        let mut canvas =
            TerminalCanvas::new(io::stdout(), settings.sprites.clone(), settings.viewport())?;
        let mut keyboard = Keyboard::default();
        let events = spawn_event_thread();

        let frame_time = Duration::from_millis(settings.frame_ms);
        let mut last = Instant::now();

        loop {
            let frame_start = Instant::now();
            keyboard.poll(&events);
            let input = TickInput::poll(&keyboard);

            let dt_ms = frame_start.duration_since(last).as_millis() as u64;
            last = frame_start;
            tick(&mut state, &input, dt_ms);

            if state.quit_requested {
                log::info!("Quit at score {}", state.score);
                break;
            }

            draw_frame(&mut canvas, &FrameSnapshot::capture(&state));
            canvas.take_error()?;

            if let Some(end) = EndScreen::capture(&state) {
                draw_game_over(&mut canvas, &end, state.viewport);
                canvas.take_error()?;
                thread::sleep(Duration::from_millis(settings.game_over_delay_ms));
                break;
            }

            if let Some(rest) = frame_time.checked_sub(frame_start.elapsed()) {
                thread::sleep(rest);
            }
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::io::Result<()> {
    env_logger::init();
    log::info!("Fuel Rush starting...");
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No terminal host on the web; embedders drive `sim::tick` themselves
}
