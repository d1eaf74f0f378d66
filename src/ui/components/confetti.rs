use rand::Rng;
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::util::colors;

const GLYPHS: [char; 6] = ['*', '+', 'o', '.', '✦', '●'];

/// Scatters colored particles over the area while the celebration effect
/// is live. Positions are re-rolled each frame, which at the 33 ms tick
/// reads as falling confetti.
pub struct Confetti;

impl Widget for Confetti {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let mut rng = rand::thread_rng();
        let particles = (area.width as usize * area.height as usize) / 24;

        for _ in 0..particles {
            let x = area.x + rng.gen_range(0..area.width);
            let y = area.y + rng.gen_range(0..area.height);
            let glyph = GLYPHS[rng.gen_range(0..GLYPHS.len())];
            let color = colors::CONFETTI[rng.gen_range(0..colors::CONFETTI.len())];
            buf.set_string(
                x,
                y,
                glyph.to_string(),
                Style::default().fg(color),
            );
        }
    }
}
