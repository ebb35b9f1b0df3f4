use palette::Srgb;

/// An 8-bit RGB sample or centroid.
pub type Rgb = Srgb<u8>;

/// Channels as a plain array, handy as a hash key.
#[inline(always)]
pub fn channels(c: Rgb) -> [u8; 3] {
    [c.red, c.green, c.blue]
}

/// Squared Euclidean distance between two colors. Exact, never exceeds 3·255².
#[inline(always)]
pub fn distance_squared(a: Rgb, b: Rgb) -> u32 {
    let dr = a.red as i32 - b.red as i32;
    let dg = a.green as i32 - b.green as i32;
    let db = a.blue as i32 - b.blue as i32;
    (dr * dr + dg * dg + db * db) as u32
}

/// Euclidean distance in RGB space.
pub fn distance(a: Rgb, b: Rgb) -> f64 {
    (distance_squared(a, b) as f64).sqrt()
}

/// `#rrggbb`, lowercase.
pub fn to_hex(c: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", c.red, c.green, c.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_symmetric() {
        let colors = [
            Rgb::new(0, 0, 0),
            Rgb::new(255, 255, 255),
            Rgb::new(12, 200, 7),
            Rgb::new(255, 0, 128),
        ];
        for &a in &colors {
            assert_eq!(distance(a, a), 0.0);
            for &b in &colors {
                let d = distance(a, b);
                assert!(d >= 0.0);
                assert_eq!(d, distance(b, a));
            }
        }
    }

    #[test]
    fn test_distance_values() {
        assert_eq!(distance(Rgb::new(0, 0, 0), Rgb::new(3, 4, 0)), 5.0);
        assert_eq!(
            distance_squared(Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)),
            3 * 255 * 255
        );
    }

    #[test]
    fn test_hex_format() {
        assert_eq!(to_hex(Rgb::new(255, 0, 16)), "#ff0010");
        assert_eq!(to_hex(Rgb::new(0, 0, 0)), "#000000");
    }
}
