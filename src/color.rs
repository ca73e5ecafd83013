// Simple color struct, created from an unsigned 32 representing RRGGBBAA.
// Alpha is usually supplied per draw call, so the packed alpha byte is
// only a default.

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    // CSS color string with the given alpha in [0, 1] replacing our own
    pub fn to_rgba(&self, alpha: f64) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            alpha.max(0.0).min(1.0)
        )
    }
}
