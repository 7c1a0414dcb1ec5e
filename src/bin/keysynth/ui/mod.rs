//! TUI module for keysynth
//!
//! Polls the keyboard, feeds key snapshots to the note registry, and draws
//! the piano layout, status bar and a scope of the audio output.

mod piano;
mod status;
mod waveform;

use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use keysynth::{
    io::{KeyState, PlaybackClock},
    SynthEngine,
};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;

use piano::render_piano;
use status::{render_status, AudioStats};
use waveform::render_waveform;

/// Scope window length in samples
pub const SCOPE_LEN: usize = 1024;

/// Input poll interval (~60fps)
const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// UI application state
pub struct UiApp {
    engine: Arc<SynthEngine>,
    clock: Arc<PlaybackClock>,
    /// Ring buffer receiver for audio samples
    scope_rx: Consumer<f32>,
    scope: Vec<f32>,
    keys: KeyState,
    /// Channel assigned to newly struck notes
    channel: u8,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        engine: Arc<SynthEngine>,
        clock: Arc<PlaybackClock>,
        scope_rx: Consumer<f32>,
        keys: KeyState,
        channel: u8,
    ) -> Self {
        Self {
            engine,
            clock,
            scope_rx,
            scope: vec![0.0; SCOPE_LEN],
            keys,
            channel,
            should_quit: false,
        }
    }

    /// Run the input/draw loop until the user quits
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_scope();

            terminal.draw(|frame| self.render(frame))?;

            // Drain every pending event, then publish one key snapshot
            if event::poll(POLL_INTERVAL)? {
                loop {
                    if let Event::Key(key) = event::read()? {
                        self.handle_key(key);
                    }
                    if !event::poll(Duration::ZERO)? {
                        break;
                    }
                }
            }

            let down = self.keys.snapshot(Instant::now());
            self.engine
                .registry()
                .apply_keys(&down, self.clock.time(), self.channel);
        }

        self.engine.registry().release_all(self.clock.time());
        Ok(())
    }

    /// Keep the last SCOPE_LEN samples from the audio thread
    fn poll_scope(&mut self) {
        while let Ok(sample) = self.scope_rx.pop() {
            self.scope.push(sample);
        }
        if self.scope.len() > SCOPE_LEN {
            let excess = self.scope.len() - SCOPE_LEN;
            self.scope.drain(0..excess);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(c) if key.kind == KeyEventKind::Release => {
                self.keys.key_up(c);
            }
            KeyCode::Char(c) => {
                if self.keys.key_down(c, Instant::now()).is_some() {
                    return;
                }
                if let Some(channel) = c.to_digit(10) {
                    self.select_channel(channel as u8);
                } else if c == 'q' || c == 'Q' {
                    self.should_quit = true;
                }
            }
            _ => {}
        }
    }

    fn select_channel(&mut self, channel: u8) {
        match self.engine.voicing(channel) {
            Some(v) => {
                tracing::debug!(channel, instrument = v.instrument.name(), "channel selected");
                self.channel = channel;
            }
            None => tracing::debug!(channel, "no instrument on channel"),
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Length(8), // Piano
                Constraint::Min(6),    // Waveform
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        let held = self.keys.snapshot(Instant::now());
        let stats = AudioStats::from_buffer(&self.scope);
        let instrument = self
            .engine
            .voicing(self.channel)
            .map(|v| v.instrument.name())
            .unwrap_or("none");

        let time = self.clock.time();
        let stage = self.engine.latest_stage(time).map(|(_, stage)| stage);

        render_status(
            frame,
            chunks[0],
            self.engine.registry().len(),
            self.channel,
            instrument,
            stage,
            time,
            &stats,
        );
        render_piano(frame, chunks[1], &held);
        render_waveform(frame, chunks[2], &self.scope);

        let help = Paragraph::new(" [Z..?] Play  [1-3] Instrument  [Q/Esc] Quit")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
