//! SVG writer for attached crystal cells.

use std::f32::consts::FRAC_PI_4;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compute::{CrystalSite, CrystalView};

/// Configuration for SVG output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in user units; the height is `scale / sqrt(3)`.
    pub scale: f32,
    /// Circle radius per unit of crystal mass, as a fraction of one cell.
    pub dot_fraction: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 1000.0,
            dot_fraction: 0.25,
        }
    }
}

/// Renders a finished crystal as an SVG document.
///
/// Usage:
/// ```ignore
/// let summary = propagator.run();
/// SvgRenderer::default().render(propagator.crystal(), std::io::stdout().lock())?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    config: RenderConfig,
}

impl SvgRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Write the SVG document to `out`. Returns the number of circles drawn.
    pub fn render<W: Write>(&self, view: CrystalView<'_>, mut out: W) -> io::Result<usize> {
        let scale = self.config.scale;
        let y_scale = 1.0 / 3.0f32.sqrt();

        writeln!(out, "<?xml version=\"1.0\"?>")?;
        writeln!(
            out,
            "<svg width=\"{:.6}\" height=\"{:.6}\"",
            scale,
            scale * y_scale
        )?;
        writeln!(out, "version=\"1.1\"")?;
        writeln!(out, "xmlns=\"http://www.w3.org/2000/svg\">")?;

        let mut circles = 0;
        for site in view.attached_cells() {
            let (x, y, r) = self.circle(site, view.size(), view.center());
            writeln!(
                out,
                "  <circle cx=\"{:.6}\" cy=\"{:.6}\" r=\"{:.6}\"/>",
                x, y, r
            )?;
            circles += 1;
        }

        writeln!(out, "</svg>")?;
        out.flush()?;
        Ok(circles)
    }

    /// Render to a file at `path`.
    pub fn save<P: AsRef<Path>>(&self, view: CrystalView<'_>, path: P) -> io::Result<usize> {
        let writer = BufWriter::new(File::create(path)?);
        self.render(view, writer)
    }

    /// Center and radius of the circle for one attached cell.
    fn circle(&self, site: CrystalSite, size: usize, center: usize) -> (f32, f32, f32) {
        let cell_scale = self.config.scale / size as f32;
        let y_scale = 1.0 / 3.0f32.sqrt();
        let center = center as f32;

        let dx = site.row as f32 - center;
        let dy = site.col as f32 - center;
        let d = dx.hypot(dy);
        let a = dy.atan2(dx) + FRAC_PI_4;

        let x = (d * a.cos() + center) * cell_scale;
        let y = (d * a.sin() + center) * cell_scale * y_scale;
        let r = site.crystal_mass * self.config.dot_fraction * cell_scale;
        (x, y, r)
    }
}
