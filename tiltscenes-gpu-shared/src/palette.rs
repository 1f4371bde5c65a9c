use crate::math::srgb_to_linear;

/// Linear RGBA, ready for an sRGB render target.
pub type Rgba = [f32; 4];

/// Colours handed out to new cubes and bubbles, in order.
pub const SHAPE_COLORS: [&str; 10] = [
    "red", "green", "blue", "yellow", "purple", "orange", "pink", "cyan", "magenta", "lime",
];

/// CSS colour keywords used by the scenes.
const NAMED: &[(&str, u32)] = &[
    ("red", 0xff0000),
    ("green", 0x008000),
    ("blue", 0x0000ff),
    ("yellow", 0xffff00),
    ("purple", 0x800080),
    ("orange", 0xffa500),
    ("pink", 0xffc0cb),
    ("cyan", 0x00ffff),
    ("magenta", 0xff00ff),
    ("lime", 0x00ff00),
    ("white", 0xffffff),
    ("black", 0x000000),
];

/// `0xRRGGBB` in sRGB to linear RGBA with full opacity.
pub fn from_hex(hex: u32) -> Rgba {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    [channel(16), channel(8), channel(0), 1.0]
}

/// Look up a CSS colour keyword. Case-insensitive.
pub fn named(name: &str) -> Option<Rgba> {
    let lower = name.to_ascii_lowercase();
    NAMED
        .iter()
        .find(|(n, _)| *n == lower)
        .map(|(_, hex)| from_hex(*hex))
}

/// Colour `i` of [`SHAPE_COLORS`], wrapping.
pub fn shape_color(i: usize) -> Rgba {
    named(SHAPE_COLORS[i % SHAPE_COLORS.len()]).unwrap_or([1.0; 4])
}
