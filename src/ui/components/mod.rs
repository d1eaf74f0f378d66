pub mod confetti;
pub mod dialog;
pub mod spinner;
pub mod tabbar;
