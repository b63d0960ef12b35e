use ratatui::style::Color;

// Classic 16-colour desktop palette.

pub const DESKTOP_RGB: (u8, u8, u8) = (0, 128, 128);
pub const FACE_RGB: (u8, u8, u8) = (192, 192, 192);
pub const SHADOW_RGB: (u8, u8, u8) = (128, 128, 128);
pub const ACTIVE_TITLE_RGB: (u8, u8, u8) = (0, 0, 128);

pub fn rgb_to_color(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub fn desktop_bg() -> Color {
    rgb_to_color(DESKTOP_RGB)
}

// Window frame
pub fn window_bg() -> Color {
    rgb_to_color(FACE_RGB)
}
pub fn window_fg() -> Color {
    Color::Black
}
pub fn window_border() -> Color {
    rgb_to_color(SHADOW_RGB)
}

// Title bar
pub fn title_bg(focused: bool) -> Color {
    if focused {
        rgb_to_color(ACTIVE_TITLE_RGB)
    } else {
        rgb_to_color(SHADOW_RGB)
    }
}
pub fn title_fg(focused: bool) -> Color {
    if focused {
        Color::White
    } else {
        rgb_to_color(FACE_RGB)
    }
}
pub fn button_bg() -> Color {
    rgb_to_color(FACE_RGB)
}
pub fn button_fg() -> Color {
    Color::Black
}

// Taskbar
pub fn taskbar_bg() -> Color {
    rgb_to_color(FACE_RGB)
}
pub fn taskbar_fg() -> Color {
    Color::Black
}
pub fn taskbar_active_bg() -> Color {
    Color::White
}
pub fn taskbar_minimized_fg() -> Color {
    rgb_to_color(SHADOW_RGB)
}
