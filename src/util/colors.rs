use ratatui::style::Color;

pub const PRIMARY: Color = Color::from_u32(0x00e33199);
pub const GOLD: Color = Color::from_u32(0x00d4a017);
pub const NEUTRAL: Color = Color::from_u32(0x00808080);
pub const DANGER: Color = Color::from_u32(0x00e04040);

const BACKGROUND_DARK: Color = Color::from_u32(0x00171115);
const BACKGROUND_LIGHT: Color = Color::from_u32(0x00faf5f8);
const TEXT_DARK: Color = Color::from_u32(0x00f0e8ed);
const TEXT_LIGHT: Color = Color::from_u32(0x00171115);

pub const CONFETTI: [Color; 5] = [
    PRIMARY,
    GOLD,
    Color::from_u32(0x004bc0f7),
    Color::from_u32(0x006fe089),
    Color::from_u32(0x00b06fe0),
];

/// Palette resolved from the dark-mode preference.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
}

pub fn theme(dark_mode: bool) -> Theme {
    if dark_mode {
        Theme {
            background: BACKGROUND_DARK,
            text: TEXT_DARK,
            muted: NEUTRAL,
        }
    } else {
        Theme {
            background: BACKGROUND_LIGHT,
            text: TEXT_LIGHT,
            muted: NEUTRAL,
        }
    }
}
