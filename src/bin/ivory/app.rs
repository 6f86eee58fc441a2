//! Event loop: terminal events in, piano calls, redraw

use std::{
    io::stdout,
    time::{Duration, Instant},
};

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::supports_keyboard_enhancement,
};
use ratatui::DefaultTerminal;

use ivory::{
    config::PianoConfig,
    io::{KeyboardAdapter, PointerAdapter},
    keys::KeyboardSurface,
    synth::Piano,
};

use super::{
    audio::{self, Output, SCOPE_LEN},
    ui::{self, Status},
};

/// Redraw and poll interval (~60fps)
const FRAME: Duration = Duration::from_millis(16);

struct App {
    piano: Piano<KeyboardSurface>,
    keyboard: KeyboardAdapter,
    pointer: PointerAdapter,
    output: Output,
    scope: Vec<f32>,
    should_quit: bool,
}

pub fn run(mut terminal: DefaultTerminal, config: PianoConfig) -> EyreResult<()> {
    let (mut context, output) = audio::open(&config)?;
    // a terminal has no autoplay policy to wait on
    context.resume();

    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    let keyboard = if enhanced {
        execute!(
            stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .wrap_err("failed to enable key release reporting")?;
        KeyboardAdapter::new()
    } else {
        log::info!(
            "terminal cannot report key releases, emulating with a {:?} hold window",
            config.hold_window
        );
        KeyboardAdapter::with_emulated_release(config.hold_window)
    };
    execute!(stdout(), EnableMouseCapture).wrap_err("failed to enable mouse capture")?;

    let mut app = App {
        piano: Piano::from_config(KeyboardSurface::piano(), context, &config),
        keyboard,
        pointer: PointerAdapter::new(),
        output,
        scope: vec![0.0; SCOPE_LEN],
        should_quit: false,
    };

    let res = app.run(&mut terminal);

    // best effort: the terminal is restored either way
    let _ = execute!(stdout(), DisableMouseCapture);
    if enhanced {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
    }
    res
}

impl App {
    fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            let now = Instant::now();
            self.keyboard.tick(&mut self.piano, now);
            self.piano.poll(now);
            self.poll_scope();

            let mut keyboard_origin = (0, 0);
            terminal.draw(|frame| {
                let status = Status {
                    sample_rate: self.output.sample_rate,
                    channels: self.output.channels,
                    emulated_release: self.keyboard.emulates_release(),
                };
                keyboard_origin = ui::render(frame, &self.piano, &self.scope, &status);
            })?;
            self.piano
                .surface_mut()
                .set_origin(keyboard_origin.0, keyboard_origin.1);

            if event::poll(FRAME)? {
                self.handle_event(event::read()?);
            }
        }

        self.piano.release_all(Instant::now());
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let now = Instant::now();
        match event {
            Event::Key(key) if key.code == KeyCode::Esc => {
                if key.kind == KeyEventKind::Press {
                    self.should_quit = true;
                }
            }
            Event::Key(key) => self.keyboard.handle(&key, &mut self.piano, now),
            Event::Mouse(mouse) => self.pointer.handle(&mouse, &mut self.piano, now),
            _ => {}
        }
    }

    /// Keep the last `SCOPE_LEN` samples from the audio thread
    fn poll_scope(&mut self) {
        let mut new_samples = Vec::new();
        while let Ok(sample) = self.output.scope_rx.pop() {
            new_samples.push(sample);
        }

        if !new_samples.is_empty() {
            self.scope.extend(new_samples);
            if self.scope.len() > SCOPE_LEN {
                let excess = self.scope.len() - SCOPE_LEN;
                self.scope.drain(0..excess);
            }
        }
    }
}
