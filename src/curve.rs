//! Monotone cubic interpolation along x (Steffen's method), emitting cubic
//! Bézier segments into any path sink.

/// Receiver for path commands; implemented for SVG path data and tiny-skia paths.
pub trait PathSink {
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn cubic_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32);
}

/// SVG `d` attribute builder.
#[derive(Debug, Default)]
pub struct SvgPathData {
    data: String,
}

impl SvgPathData {
    pub fn into_string(self) -> String {
        self.data
    }
}

impl PathSink for SvgPathData {
    fn move_to(&mut self, x: f32, y: f32) {
        self.data.push_str(&format!("M{},{}", fmt(x), fmt(y)));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.data.push_str(&format!("L{},{}", fmt(x), fmt(y)));
    }

    fn cubic_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.data.push_str(&format!(
            "C{},{},{},{},{},{}",
            fmt(x1),
            fmt(y1),
            fmt(x2),
            fmt(y2),
            fmt(x),
            fmt(y)
        ));
    }
}

impl PathSink for tiny_skia::PathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        tiny_skia::PathBuilder::move_to(self, x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        tiny_skia::PathBuilder::line_to(self, x, y);
    }

    fn cubic_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        tiny_skia::PathBuilder::cubic_to(self, x1, y1, x2, y2, x, y);
    }
}

/// Coordinates with at most two decimals and no trailing zeros.
pub fn fmt(v: f32) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == 0.0 {
        // avoids "-0"
        return "0".to_string();
    }
    format!("{rounded}")
}

fn sign(v: f32) -> f32 {
    if v < 0.0 {
        -1.0
    } else {
        1.0
    }
}

fn divide(dy: f32, h: f32, other_h: f32) -> f32 {
    if h != 0.0 {
        dy / h
    } else if other_h < 0.0 {
        dy / -0.0
    } else {
        dy / 0.0
    }
}

fn or_zero(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v
    }
}

/// Tangent at the middle of three points.
fn slope3(x0: f32, y0: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let h0 = x1 - x0;
    let h1 = x2 - x1;
    let s0 = divide(y1 - y0, h0, h1);
    let s1 = divide(y2 - y1, h1, h0);
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    or_zero((sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs()))
}

/// Tangent at an end point given the tangent at its neighbour.
fn slope2(x0: f32, y0: f32, x1: f32, y1: f32, t: f32) -> f32 {
    let h = x1 - x0;
    if h == 0.0 {
        t
    } else {
        (3.0 * (y1 - y0) / h - t) / 2.0
    }
}

fn hermite<S: PathSink>(
    sink: &mut S,
    (x0, y0): (f32, f32),
    (x1, y1): (f32, f32),
    t0: f32,
    t1: f32,
) {
    let dx = (x1 - x0) / 3.0;
    sink.cubic_to(x0 + dx, y0 + dx * t0, x1 - dx, y1 - dx * t1, x1, y1);
}

/// Draws a curve through `points` that preserves monotonicity in y between
/// consecutive points. Consecutive duplicate points are collapsed.
pub fn monotone_x<S: PathSink>(sink: &mut S, points: &[(f32, f32)]) {
    let mut pts: Vec<(f32, f32)> = Vec::with_capacity(points.len());
    for &p in points {
        if pts.last() != Some(&p) {
            pts.push(p);
        }
    }

    match pts.len() {
        0 => {}
        1 => sink.move_to(pts[0].0, pts[0].1),
        2 => {
            sink.move_to(pts[0].0, pts[0].1);
            sink.line_to(pts[1].0, pts[1].1);
        }
        n => {
            sink.move_to(pts[0].0, pts[0].1);

            let mut tangents = vec![0.0_f32; n];
            for i in 1..n - 1 {
                let (x0, y0) = pts[i - 1];
                let (x1, y1) = pts[i];
                let (x2, y2) = pts[i + 1];
                tangents[i] = slope3(x0, y0, x1, y1, x2, y2);
            }
            tangents[0] = slope2(pts[0].0, pts[0].1, pts[1].0, pts[1].1, tangents[1]);
            tangents[n - 1] = slope2(
                pts[n - 2].0,
                pts[n - 2].1,
                pts[n - 1].0,
                pts[n - 1].1,
                tangents[n - 2],
            );

            for i in 0..n - 1 {
                hermite(sink, pts[i], pts[i + 1], tangents[i], tangents[i + 1]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(points: &[(f32, f32)]) -> String {
        let mut d = SvgPathData::default();
        monotone_x(&mut d, points);
        d.into_string()
    }

    #[test]
    fn test_empty_and_single_point() {
        assert_eq!(path(&[]), "");
        assert_eq!(path(&[(1.0, 2.0)]), "M1,2");
    }

    #[test]
    fn test_two_points_is_a_line() {
        assert_eq!(path(&[(0.0, 5.0), (10.0, 5.0)]), "M0,5L10,5");
    }

    #[test]
    fn test_flat_lane_has_flat_control_points() {
        let d = path(&[(0.0, 50.0), (30.0, 50.0), (90.0, 50.0)]);
        assert_eq!(d, "M0,50C10,50,20,50,30,50C50,50,70,50,90,50");
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(path(&[(0.0, 1.0), (0.0, 1.0), (4.0, 1.0)]), "M0,1L4,1");
    }

    #[test]
    fn test_curve_stays_monotone() {
        let mut d = Recorder::default();
        monotone_x(&mut d, &[(0.0, 0.0), (10.0, 10.0), (20.0, 10.0), (30.0, 40.0)]);
        for (start, c1, c2, end) in d.segments() {
            let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
            assert!(c1 >= lo - 1e-4 && c1 <= hi + 1e-4);
            assert!(c2 >= lo - 1e-4 && c2 <= hi + 1e-4);
        }
    }

    #[derive(Default)]
    struct Recorder {
        last_y: f32,
        segs: Vec<(f32, f32, f32, f32)>,
    }

    impl Recorder {
        fn segments(&self) -> Vec<(f32, f32, f32, f32)> {
            self.segs.clone()
        }
    }

    impl PathSink for Recorder {
        fn move_to(&mut self, _x: f32, y: f32) {
            self.last_y = y;
        }
        fn line_to(&mut self, _x: f32, y: f32) {
            self.last_y = y;
        }
        fn cubic_to(&mut self, _x1: f32, y1: f32, _x2: f32, y2: f32, _x: f32, y: f32) {
            self.segs.push((self.last_y, y1, y2, y));
            self.last_y = y;
        }
    }
}
