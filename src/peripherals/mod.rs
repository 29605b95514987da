pub(super) mod backlight;
pub(super) mod display;
