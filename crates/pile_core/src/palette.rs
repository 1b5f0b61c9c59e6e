//! Color palette for the spawned bodies.

use bevy::prelude::*;
use rand::Rng;

/// Candy-bright brick colors, picked at random per brick.
pub fn brick_palette() -> [Color; 6] {
    [
        Color::srgb_u8(11, 102, 255),
        Color::srgb_u8(91, 73, 255),
        Color::srgb_u8(255, 59, 48),
        Color::srgb_u8(255, 196, 0),
        Color::srgb_u8(189, 232, 225),
        Color::srgb_u8(246, 193, 218),
    ]
}

/// Pick a random brick color from the palette.
pub fn random_brick_color(rng: &mut impl Rng) -> Color {
    let palette = brick_palette();
    palette[rng.gen_range(0..palette.len())]
}

/// Warm ivory used for the pill body.
pub fn pill_color() -> Color {
    Color::srgb_u8(245, 230, 200)
}

/// Warm golden orange used for the pill cap.
pub fn pill_cap_color() -> Color {
    Color::srgb_u8(215, 153, 77)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn random_color_comes_from_palette() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let palette = brick_palette();
        for _ in 0..32 {
            let color = random_brick_color(&mut rng);
            assert!(palette.contains(&color));
        }
    }
}
