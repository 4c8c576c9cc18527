//! Path data generation for circular sectors

use std::f64::consts::PI;

/// Build the `d` attribute for a pie slice: center `(cx, cy)`, radius `r`,
/// start angle `alpha` and signed sweep `theta`, both in radians.
///
/// The path moves to the center, draws a straight edge to the start of the
/// arc, follows the circle to the end of the sweep and closes back to the
/// center. Angles use plain trigonometry in the caller's coordinate system;
/// no y-axis correction is applied.
///
/// The large-arc flag is set when `|theta| > pi` and the sweep flag when
/// `theta > 0`. Sweeps are not normalized: `|theta| >= 2*pi` yields an arc
/// command whose flags are computed from the raw value, so callers should
/// keep `theta` within `(-2*pi, 2*pi)`.
pub fn sector_path(cx: f64, cy: f64, r: f64, alpha: f64, theta: f64) -> String {
    let (x1, y1) = (cx + r * alpha.cos(), cy + r * alpha.sin());
    let end = alpha + theta;
    let (x2, y2) = (cx + r * end.cos(), cy + r * end.sin());
    let large_arc = i32::from(theta.abs() > PI);
    let sweep = i32::from(theta > 0.0);
    format!("M{cx},{cy} L{x1},{y1} A{r},{r} 0 {large_arc},{sweep} {x2},{y2} Z")
}
