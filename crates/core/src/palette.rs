//! Fire color palette.
//!
//! 37 colors ordered from the dimmest ember to white-hot. Intensity values
//! index straight into this table, so its length defines the intensity
//! domain.

/// Highest intensity level. Also the index of the last palette entry.
pub const MAX_INTENSITY: i32 = 36;

/// Number of palette entries (`MAX_INTENSITY + 1`).
pub const PALETTE_LEN: usize = 37;

/// Components per resolved color (R, G, B, A).
pub const CHANNELS: usize = 4;

/// A palette entry in 0-255 component space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaletteColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl PaletteColor {
    /// Opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Components normalized to `[0, 1]` in R, G, B, A order.
    #[inline]
    #[must_use]
    pub fn normalized(&self) -> [f32; CHANNELS] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        ]
    }
}

/// The fixed fire palette, dimmest first.
pub static FIRE_PALETTE: [PaletteColor; PALETTE_LEN] = [
    PaletteColor::rgb(7, 7, 7),
    PaletteColor::rgb(31, 7, 7),
    PaletteColor::rgb(47, 15, 7),
    PaletteColor::rgb(71, 15, 7),
    PaletteColor::rgb(87, 23, 7),
    PaletteColor::rgb(103, 31, 7),
    PaletteColor::rgb(119, 31, 7),
    PaletteColor::rgb(143, 39, 7),
    PaletteColor::rgb(159, 47, 7),
    PaletteColor::rgb(175, 63, 7),
    PaletteColor::rgb(191, 71, 7),
    PaletteColor::rgb(199, 71, 7),
    PaletteColor::rgb(223, 79, 7),
    PaletteColor::rgb(223, 87, 7),
    PaletteColor::rgb(223, 87, 7),
    PaletteColor::rgb(215, 95, 7),
    PaletteColor::rgb(215, 95, 7),
    PaletteColor::rgb(215, 103, 15),
    PaletteColor::rgb(207, 111, 15),
    PaletteColor::rgb(207, 119, 15),
    PaletteColor::rgb(207, 127, 15),
    PaletteColor::rgb(207, 135, 23),
    PaletteColor::rgb(199, 135, 23),
    PaletteColor::rgb(199, 143, 23),
    PaletteColor::rgb(199, 151, 31),
    PaletteColor::rgb(191, 159, 31),
    PaletteColor::rgb(191, 159, 31),
    PaletteColor::rgb(191, 167, 39),
    PaletteColor::rgb(191, 167, 39),
    PaletteColor::rgb(191, 175, 47),
    PaletteColor::rgb(183, 175, 47),
    PaletteColor::rgb(183, 183, 47),
    PaletteColor::rgb(183, 183, 55),
    PaletteColor::rgb(207, 207, 111),
    PaletteColor::rgb(223, 223, 159),
    PaletteColor::rgb(239, 239, 199),
    PaletteColor::rgb(255, 255, 255),
];

/// Whether `value` is a valid palette index.
#[inline]
#[must_use]
pub fn is_valid_intensity(value: i32) -> bool {
    (0..=MAX_INTENSITY).contains(&value)
}
