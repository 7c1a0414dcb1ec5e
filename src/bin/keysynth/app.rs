//! KeySynth - application builder and runner

use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::supports_keyboard_enhancement,
};
use rtrb::{PushError, RingBuffer};

use keysynth::{
    io::{keyboard::DEFAULT_HOLD_TIMEOUT, render_interleaved, KeyState, PlaybackClock},
    SynthConfig, SynthEngine,
};

use super::ui::{UiApp, SCOPE_LEN};

/// Capacity in scope windows for the audio→UI ring
const SCOPE_RING_WINDOWS: usize = 8;

/// Main application builder
pub struct KeySynth {
    config: SynthConfig,
    channel: u8,
    hold_timeout: Duration,
}

impl KeySynth {
    pub fn new() -> Self {
        Self {
            config: SynthConfig::default(),
            channel: 1,
            hold_timeout: DEFAULT_HOLD_TIMEOUT,
        }
    }

    pub fn config(mut self, config: SynthConfig) -> Self {
        self.config = config;
        self
    }

    /// Channel new notes are assigned to.
    pub fn channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self
    }

    /// Key hold time used when the terminal does not report releases.
    pub fn hold_timeout(mut self, timeout: Duration) -> Self {
        self.hold_timeout = timeout;
        self
    }

    /// Open the audio device, take over the terminal, and play until quit.
    pub fn run(self) -> EyreResult<()> {
        let engine = Arc::new(SynthEngine::new(self.config).wrap_err("invalid synth config")?);

        // Set up audio
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f64;
        let channels = config.channels() as usize;
        let device_name = device.name().unwrap_or_else(|_| "<unnamed>".to_string());
        tracing::info!(
            device = %device_name,
            sample_rate,
            channels,
            "opening output stream"
        );

        let clock = Arc::new(PlaybackClock::new(sample_rate));
        let (scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_LEN * SCOPE_RING_WINDOWS);

        let stream = device.build_output_stream(
            &config.into(),
            {
                let engine = Arc::clone(&engine);
                let clock = Arc::clone(&clock);
                let mut scope_tx = scope_tx;
                move |data: &mut [f32], _| {
                    render_interleaved(&*engine, &clock, data, channels);

                    // Push mono to the scope, drop the remainder if the UI lags
                    for &s in data.iter().step_by(channels.max(1)) {
                        if let Err(PushError::Full(_)) = scope_tx.push(s) {
                            break;
                        }
                    }
                }
            },
            |err| tracing::error!("audio stream error: {err}"),
            None,
        )?;
        stream.play().wrap_err("failed to start output stream")?;

        let reports_release = supports_keyboard_enhancement().unwrap_or(false);
        if !reports_release {
            tracing::warn!(
                timeout_ms = self.hold_timeout.as_millis() as u64,
                "terminal does not report key releases, using hold timeout"
            );
        }
        let keys = KeyState::new(reports_release).with_hold_timeout(self.hold_timeout);

        let mut terminal = ratatui::init();
        if reports_release {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }

        let res = UiApp::new(engine, clock, scope_rx, keys, self.channel).run(&mut terminal);

        if reports_release {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        ratatui::restore();
        drop(stream);
        res
    }
}

impl Default for KeySynth {
    fn default() -> Self {
        Self::new()
    }
}
