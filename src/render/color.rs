use image::Rgb;
use palette::{Hsl, IntoColor, Srgb};

/// Fill for undefined (NaN) correlation cells
pub const UNDEFINED_COLOR: Rgb<u8> = Rgb([200, 200, 200]);

const NEGATIVE_HUE: f32 = 230.0;
const POSITIVE_HUE: f32 = 5.0;

fn hsl_to_rgb(hsl: Hsl) -> Rgb<u8> {
    let rgb: Srgb = hsl.into_color();
    Rgb([
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    ])
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb<u8>> {
    (0..n)
        .map(|i| {
            let hue = 210.0 + (i as f32 / n as f32) * 360.0;
            hsl_to_rgb(Hsl::new(hue, 0.65, 0.5))
        })
        .collect()
}

/// Diverging colour for a value in [-1, 1] centered at 0.
///
/// Zero is near-white; negative values shade towards blue and positive
/// towards red. Out-of-range input is clamped, NaN gets `UNDEFINED_COLOR`.
pub fn diverging(value: f64) -> Rgb<u8> {
    if value.is_nan() {
        return UNDEFINED_COLOR;
    }
    let t = value.clamp(-1.0, 1.0) as f32;
    let hue = if t < 0.0 { NEGATIVE_HUE } else { POSITIVE_HUE };
    let lightness = 0.97 - 0.5 * t.abs();
    hsl_to_rgb(Hsl::new(hue, 0.75, lightness))
}

/// Black or white, whichever reads better on `background`.
pub fn contrasting_text(background: Rgb<u8>) -> Rgb<u8> {
    let [r, g, b] = background.0;
    let luma = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
    if luma < 128.0 {
        Rgb([255, 255, 255])
    } else {
        Rgb([0, 0, 0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_palette_distinct() {
        let palette = generate_palette(2);
        assert_eq!(palette.len(), 2);
        assert_ne!(palette[0], palette[1]);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn test_diverging_center_is_light() {
        let [r, g, b] = diverging(0.0).0;
        assert!(r > 230 && g > 230 && b > 230);
    }

    #[test]
    fn test_diverging_sign_sets_hue() {
        let [r, _, b] = diverging(1.0).0;
        assert!(r > b, "positive should be red-ish");
        let [r, _, b] = diverging(-1.0).0;
        assert!(b > r, "negative should be blue-ish");
    }

    #[test]
    fn test_diverging_nan() {
        assert_eq!(diverging(f64::NAN), UNDEFINED_COLOR);
    }
}
