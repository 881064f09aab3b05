/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const GRID: Rgb = Rgb(200, 200, 200);
}

const SATURATION: f64 = 0.7;
const VALUE: f64 = 0.9;

/// `n` colors spread evenly around the hue circle.
pub fn generate(n: usize) -> Vec<Rgb> {
    (0..n)
        .map(|i| {
            let (r, g, b) = hsv_to_rgb(i as f64 / n as f64, SATURATION, VALUE);
            // Truncate, do not round
            Rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
        })
        .collect()
}

/// HSV in `[0, 1]` to RGB in `[0, 1]`.
fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}
