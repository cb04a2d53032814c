//! PNG rendering
//!
//! Each cell becomes a `cell_size × cell_size` square in its palette color.

use std::path::{Path, PathBuf};

use image::{ImageError, Rgba, RgbaImage};

use tm_core::progress::{ProgressSink, Snapshot};
use tm_core::{CellKind, Grid};

fn cell_rgba(kind: CellKind) -> Rgba<u8> {
    let [r, g, b] = kind.rgb();
    Rgba([r, g, b, 255])
}

/// Fill a rectangle on the canvas with a solid color
fn fill_rect(canvas: &mut RgbaImage, x: u32, y: u32, size: u32, color: Rgba<u8>) {
    let (cw, ch) = (canvas.width(), canvas.height());
    for py in y..(y + size).min(ch) {
        for px in x..(x + size).min(cw) {
            canvas.put_pixel(px, py, color);
        }
    }
}

/// Compose the whole grid as one image
pub fn render_grid(grid: &Grid, cell_size: u32) -> RgbaImage {
    let cell_size = cell_size.max(1);
    let side = grid.size() as u32 * cell_size;
    let mut canvas = RgbaImage::new(side, side);
    for (x, y, kind) in grid.iter() {
        fill_rect(
            &mut canvas,
            x as u32 * cell_size,
            y as u32 * cell_size,
            cell_size,
            cell_rgba(kind),
        );
    }
    canvas
}

/// Render and write a PNG file
pub fn save_png(grid: &Grid, cell_size: u32, path: impl AsRef<Path>) -> Result<(), ImageError> {
    render_grid(grid, cell_size).save_with_format(path, image::ImageFormat::Png)
}

/// Sink that writes every snapshot as a numbered PNG (`frame_00000.png`, ...)
pub struct PngFrameSink {
    dir: PathBuf,
    written: usize,
    failed: Option<ImageError>,
}

impl PngFrameSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: 0,
            failed: None,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Path of the `index`-th frame
    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("frame_{index:05}.png"))
    }

    /// First write error, if any; later snapshots are skipped after a failure
    pub fn finish(self) -> Result<usize, ImageError> {
        match self.failed {
            Some(err) => Err(err),
            None => Ok(self.written),
        }
    }
}

impl ProgressSink for PngFrameSink {
    fn snapshot(&mut self, snapshot: &Snapshot<'_>) {
        if self.failed.is_some() {
            return;
        }
        let path = self.frame_path(self.written);
        match save_png(snapshot.grid, snapshot.cell_size, &path) {
            Ok(()) => self.written += 1,
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "failed to write frame");
                self.failed = Some(err);
            }
        }
    }
}
