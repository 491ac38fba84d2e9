use crate::curve;
use crate::error::{ReportError, Result};
use crate::layout::ForestLayout;
use crate::text::TextRenderer;
use crate::view::BranchSelection;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};
use tracing::info;

fn background() -> Color {
    Color::from_rgba8(255, 255, 255, 255)
}

fn axis_color() -> Color {
    Color::from_rgba8(60, 60, 60, 255)
}

/// `#rrggbb` with the given opacity; anything else becomes gray.
fn hex_color(hex: &str, opacity: f32) -> Color {
    let parse = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
    };
    let rgb = hex
        .strip_prefix('#')
        .filter(|h| h.len() == 6)
        .and_then(|_| Some((parse(1..3)?, parse(3..5)?, parse(5..7)?)));
    let (r, g, b) = rgb.unwrap_or((158, 158, 158));
    let mut color = Color::from_rgba8(r, g, b, 255);
    color.apply_opacity(opacity);
    color
}

fn stroke_line(
    pixmap: &mut Pixmap,
    (x1, y1): (f32, f32),
    (x2, y2): (f32, f32),
    color: Color,
    transform: Transform,
) {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    let mut pb = PathBuilder::new();
    pb.move_to(x1, y1);
    pb.line_to(x2, y2);
    if let Some(path) = pb.finish() {
        let stroke = Stroke {
            width: 1.0,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, transform, None);
    }
}

/// Rasterize the forest with the given branch selection applied.
pub fn render_forest(
    layout: &ForestLayout,
    selection: &BranchSelection,
    text: Option<&TextRenderer>,
) -> Result<Pixmap> {
    let mut pixmap = Pixmap::new(layout.width as u32, layout.height as u32).ok_or_else(|| {
        ReportError::Image {
            path: PathBuf::new(),
            reason: format!("invalid canvas size {}x{}", layout.width, layout.height),
        }
    })?;
    pixmap.fill(background());

    let transform = Transform::from_translate(layout.margin.left, layout.margin.top);

    // Branch lines
    let line_stroke = Stroke {
        width: 3.0,
        ..Stroke::default()
    };
    for lane in &layout.lanes {
        let mut pb = PathBuilder::new();
        curve::monotone_x(&mut pb, &lane.points);
        if let Some(path) = pb.finish() {
            let mut paint = Paint::default();
            paint.set_color(hex_color(lane.color, selection.line_opacity(&lane.name)));
            paint.anti_alias = true;
            pixmap.stroke_path(&path, &paint, &line_stroke, transform, None);
        }
    }

    // Commits
    let node_stroke = Stroke {
        width: 2.0,
        ..Stroke::default()
    };
    for pc in &layout.commits {
        let Some(circle) = PathBuilder::from_circle(pc.x, pc.y, pc.radius) else {
            continue;
        };
        let opacity = selection.node_opacity(&pc.commit.branch);

        let mut fill = Paint::default();
        fill.set_color(hex_color(pc.fill(), opacity));
        fill.anti_alias = true;
        pixmap.fill_path(&circle, &fill, FillRule::Winding, transform, None);

        let mut outline = Paint::default();
        outline.set_color(hex_color(pc.stroke(), opacity));
        outline.anti_alias = true;
        pixmap.stroke_path(&circle, &outline, &node_stroke, transform, None);
    }

    // Time axis
    let axis = axis_color();
    stroke_line(
        &mut pixmap,
        (0.0, layout.axis_y),
        (layout.inner_width, layout.axis_y),
        axis,
        transform,
    );
    for tick in &layout.ticks {
        stroke_line(
            &mut pixmap,
            (tick.x, layout.axis_y),
            (tick.x, layout.axis_y + 6.0),
            axis,
            transform,
        );
    }

    if let Some(text) = text {
        let left = layout.margin.left;
        let top = layout.margin.top;

        for lane in &layout.lanes {
            let width = text.measure_text(&lane.name, 12.0);
            text.draw_text(
                &mut pixmap,
                &lane.name,
                left - 10.0 - width,
                top + lane.y + 4.0,
                12.0,
                hex_color(lane.color, selection.label_opacity(&lane.name)),
            );
        }

        for tick in &layout.ticks {
            let width = text.measure_text(&tick.label, 10.0);
            text.draw_text(
                &mut pixmap,
                &tick.label,
                left + tick.x - width / 2.0,
                top + layout.axis_y + 20.0,
                10.0,
                axis,
            );
        }
    }

    Ok(pixmap)
}

fn save(pixmap: &Pixmap, path: &Path) -> Result<()> {
    pixmap.save_png(path).map_err(|e| ReportError::Image {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn file_stem(branch: &str) -> String {
    branch
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

/// Writes `forest-all.png` plus one dimmed snapshot per drawn branch into `dir`.
pub fn render_snapshots(
    layout: &ForestLayout,
    text: Option<&TextRenderer>,
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|source| ReportError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut jobs = vec![(dir.join("forest-all.png"), BranchSelection::All)];
    for lane in &layout.lanes {
        jobs.push((
            dir.join(format!("forest-{:02}-{}.png", lane.index, file_stem(&lane.name))),
            BranchSelection::Branch(lane.name.clone()),
        ));
    }

    info!("Rendering {} forest snapshots...", jobs.len());

    jobs.into_par_iter()
        .map(|(path, selection)| {
            let pixmap = render_forest(layout, &selection, text)?;
            save(&pixmap, &path)?;
            Ok(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Branch, CommitNode};
    use crate::layout::ForestOptions;

    fn graph() -> (Vec<CommitNode>, Vec<Branch>) {
        let commits = vec![
            CommitNode {
                hash: "a".to_string(),
                short_hash: "a".to_string(),
                branch: "main".to_string(),
                author: "dev".to_string(),
                date: "2024-01-01".to_string(),
                message: String::new(),
                is_merge: false,
                parents: Vec::new(),
            },
            CommitNode {
                hash: "b".to_string(),
                short_hash: "b".to_string(),
                branch: "feature/x".to_string(),
                author: "dev".to_string(),
                date: "2024-01-05".to_string(),
                message: String::new(),
                is_merge: true,
                parents: vec!["a".to_string()],
            },
        ];
        let branches = vec![
            Branch {
                name: "main".to_string(),
            },
            Branch {
                name: "feature/x".to_string(),
            },
        ];
        (commits, branches)
    }

    #[test]
    fn test_hex_color() {
        let c = hex_color("#ff0000", 1.0);
        assert_eq!(c.red(), 1.0);
        assert_eq!(c.green(), 0.0);
        let dimmed = hex_color("#ff0000", 0.1);
        assert!((dimmed.alpha() - 0.1).abs() < 1e-6);
        let fallback = hex_color("red", 1.0);
        assert!((fallback.red() - 158.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_render_draws_something() {
        let (commits, branches) = graph();
        let layout = ForestLayout::from_graph(&commits, &branches, ForestOptions::default());
        let pixmap = render_forest(&layout, &BranchSelection::All, None).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (800, 500));
        let non_white = pixmap
            .pixels()
            .iter()
            .filter(|p| p.red() != 255 || p.green() != 255 || p.blue() != 255)
            .count();
        assert!(non_white > 0);
    }

    #[test]
    fn test_snapshots_per_branch() {
        let (commits, branches) = graph();
        let layout = ForestLayout::from_graph(&commits, &branches, ForestOptions::default());
        let dir = tempfile::TempDir::new().unwrap();

        let paths = render_snapshots(&layout, None, dir.path()).unwrap();
        assert_eq!(paths.len(), 3);
        assert!(dir.path().join("forest-all.png").exists());
        assert!(dir.path().join("forest-01-feature-x.png").exists());
    }
}
