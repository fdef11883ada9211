// src/services/svg_export.rs
// Writes every character canvas of a response out as a standalone SVG file.
// Canvases are independent, so they are rendered and written in parallel.

use log::info;
use nannou::prelude::*;
use rayon::prelude::*;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{GlyphPath, TrajectoryResponse};
use crate::render::{draw_path, CanvasRecorder, DevicePathOp, RenderConfig};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export, visualize some text first")]
    NothingToExport,
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Canvas size and fill shared by every exported file.
#[derive(Debug, Clone, Copy)]
pub struct SvgCanvas {
    pub width: u32,
    pub height: u32,
    pub background: Rgb<f32>,
}

struct ExportJob<'a> {
    label: &'a str,
    index: usize,
    character: &'a str,
    path: &'a GlyphPath,
}

pub fn export_svg(
    response: &TrajectoryResponse,
    config: &RenderConfig,
    canvas: SvgCanvas,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, ExportError> {
    let jobs: Vec<ExportJob> = response
        .sets()
        .iter()
        .flat_map(|set| {
            set.map
                .iter()
                .enumerate()
                .map(move |(index, (character, path))| ExportJob {
                    label: &set.label,
                    index,
                    character,
                    path,
                })
        })
        .collect();

    if jobs.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    fs::create_dir_all(output_dir).map_err(|source| ExportError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let written = jobs
        .par_iter()
        .map(|job| -> Result<PathBuf, ExportError> {
            let mut recorder = CanvasRecorder::new(canvas.width, canvas.height);
            draw_path(&mut recorder, job.path, config);

            let file = output_dir.join(file_name(job.label, job.index, job.character));
            fs::write(&file, svg_document(&recorder, canvas.background)).map_err(|source| {
                ExportError::Io {
                    path: file.clone(),
                    source,
                }
            })?;
            Ok(file)
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!("Exported {} SVG files to {}", written.len(), output_dir.display());
    Ok(written)
}

/// `<label>_<index>_u<codepoints>.svg`, e.g. `trajectories_00_u5C71.svg`.
pub fn file_name(label: &str, index: usize, character: &str) -> String {
    let codepoints: Vec<String> = character
        .chars()
        .map(|c| format!("{:04X}", c as u32))
        .collect();
    format!("{}_{:02}_u{}.svg", label, index, codepoints.join("-"))
}

pub fn svg_document(canvas: &CanvasRecorder, background: Rgb<f32>) -> String {
    let (width, height) = (canvas.width(), canvas.height());
    let mut svg = String::new();

    // writing into a String cannot fail
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    );
    let _ = writeln!(
        svg,
        r#"  <rect width="{}" height="{}" fill="{}"/>"#,
        width,
        height,
        hex_color(background)
    );
    for stroke in canvas.strokes() {
        let _ = writeln!(
            svg,
            r#"  <path d="{}" fill="none" stroke="{}" stroke-width="{:.2}" stroke-linecap="round" stroke-linejoin="round"/>"#,
            path_data(&stroke.ops),
            hex_color(stroke.color),
            stroke.width
        );
    }
    svg.push_str("</svg>\n");
    svg
}

fn path_data(ops: &[DevicePathOp]) -> String {
    ops.iter()
        .map(|op| match op {
            DevicePathOp::MoveTo(p) => format!("M{:.2} {:.2}", p.x, p.y),
            DevicePathOp::LineTo(p) => format!("L{:.2} {:.2}", p.x, p.y),
            DevicePathOp::CubicTo(c1, c2, p) => format!(
                "C{:.2} {:.2} {:.2} {:.2} {:.2} {:.2}",
                c1.x, c1.y, c2.x, c2.y, p.x, p.y
            ),
            DevicePathOp::Close => "Z".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn hex_color(color: Rgb<f32>) -> String {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        channel(color.red),
        channel(color.green),
        channel(color.blue)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Point, Segment, TrajectoryMap};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn canvas() -> SvgCanvas {
        SvgCanvas {
            width: 200,
            height: 200,
            background: rgb(1.0, 1.0, 1.0),
        }
    }

    fn square() -> GlyphPath {
        GlyphPath::new(vec![
            Segment::Move(Point::new(0.0, 0.0)),
            Segment::Line(Point::new(100.0, 0.0)),
            Segment::Line(Point::new(100.0, 100.0)),
            Segment::Close,
        ])
    }

    fn temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("strokeview_{}_{}", name, nanos))
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("trajectories", 0, "山"), "trajectories_00_u5C71.svg");
        assert_eq!(file_name("original", 12, "a"), "original_12_u0061.svg");
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color(rgb(1.0, 0.0, 0.0)), "#ff0000");
        assert_eq!(hex_color(rgb(0.0, 0.5, 2.0)), "#0080ff");
    }

    #[test]
    fn test_document_has_one_path_per_stroke() {
        let mut recorder = CanvasRecorder::new(200, 200);
        let config = RenderConfig {
            gradient_enabled: true,
            ..RenderConfig::default()
        };
        draw_path(&mut recorder, &square(), &config);

        let svg = svg_document(&recorder, rgb(1.0, 1.0, 1.0));
        assert_eq!(svg.matches("<path ").count(), recorder.strokes().len());
        assert!(svg.contains(r#"viewBox="0 0 200 200""#));
        assert!(svg.contains(r##"fill="#ffffff""##));
        // anchor (20, 180), scale 0.1: glyph (100, 0) lands on (30, 180)
        assert!(svg.contains("L30.00 180.00"));
    }

    #[test]
    fn test_export_writes_every_canvas() {
        let map = TrajectoryMap::from_entries(vec![
            ("山".to_string(), square()),
            ("居".to_string(), GlyphPath::default()),
        ]);
        let response = TrajectoryResponse::single(map);
        let dir = temp_dir("export");

        let written = export_svg(&response, &RenderConfig::default(), canvas(), &dir).unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(written[0], dir.join("trajectories_00_u5C71.svg"));
        assert_eq!(written[1], dir.join("trajectories_01_u5C45.svg"));

        let first = fs::read_to_string(&written[0]).unwrap();
        assert_eq!(first.matches("<path ").count(), 1);
        // an empty glyph still gets its blank canvas
        let second = fs::read_to_string(&written[1]).unwrap();
        assert_eq!(second.matches("<path ").count(), 0);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_nothing_to_export() {
        let dir = temp_dir("empty");
        let result = export_svg(
            &TrajectoryResponse::default(),
            &RenderConfig::default(),
            canvas(),
            &dir,
        );
        assert!(matches!(result, Err(ExportError::NothingToExport)));
        assert!(!dir.exists());
    }
}
