use rand::Rng;

/// Random bonus added to each root candidate, truncated to one decimal.
///
/// The range is `[0, 1)` until the half-move clock passes 10, then widens by one
/// per extra half-move.
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, half_move: u32) -> f64 {
    let span = if half_move > 10 { (half_move - 10) as f64 } else { 1.0 };
    (rng.gen::<f64>() * span * 10.0).floor() / 10.0
}
