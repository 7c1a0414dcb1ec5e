//! Status bar widget - shows note count, instrument, envelope stage, clock, and audio stats

use keysynth::dsp::EnvelopeStage;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute audio stats from a buffer
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// Render the status bar
#[allow(clippy::too_many_arguments)]
pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    notes: usize,
    channel: u8,
    instrument: &str,
    stage: Option<EnvelopeStage>,
    time: f64,
    audio_stats: &AudioStats,
) {
    let block = Block::default().title(" keysynth ").borders(Borders::ALL);

    let line = Line::from(vec![
        Span::styled(
            format!(" Notes: {:<3} ", notes),
            Style::default().fg(if notes > 0 { Color::Green } else { Color::White }),
        ),
        Span::styled(
            format!("[{}] {}  ", channel, instrument),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{:<8} ", stage_label(stage)),
            Style::default().fg(match stage {
                Some(EnvelopeStage::Attack) | Some(EnvelopeStage::Decay) => Color::Yellow,
                Some(EnvelopeStage::Sustain) => Color::Green,
                Some(EnvelopeStage::Release) => Color::Blue,
                _ => Color::DarkGray,
            }),
        ),
        Span::styled(format!("{:>9.2}s  ", time), Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", audio_stats.peak, audio_stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn stage_label(stage: Option<EnvelopeStage>) -> &'static str {
    match stage {
        Some(EnvelopeStage::Attack) => "attack",
        Some(EnvelopeStage::Decay) => "decay",
        Some(EnvelopeStage::Sustain) => "sustain",
        Some(EnvelopeStage::Release) => "release",
        Some(EnvelopeStage::Idle) | None => "idle",
    }
}
