//! Animated GIF export of a finished run
//!
//! The physics side hands over plain position sequences; a
//! [`FrameRenderer`] turns frame `i` of them into a picture. [`GifRenderer`]
//! rasterizes each frame into an indexed canvas:
//! - body 1 as a large marker
//! - body 2 as its path up to the previous frame plus a small marker
//! - body 3 as a small marker
//!
//! The view is a square of half-width `extent` centred on the origin.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::configuration::config::RenderConfig;
use crate::simulation::states::{NVec2, N_BODIES};
use crate::simulation::trajectory::Trajectories;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("could not write animation: {0}")]
    Io(#[from] std::io::Error),

    #[error("GIF encoding failed: {0}")]
    Encoding(#[from] gif::EncodingError),

    #[error("renderer already finished")]
    Finished,
}

/// Snapshot of frame `index`: every body's path up to and including it
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub index: usize,
    paths: [&'a [NVec2]; N_BODIES],
}

impl<'a> FrameView<'a> {
    pub fn new(index: usize, trajectories: &'a Trajectories) -> Option<Self> {
        if index >= trajectories.len() {
            return None;
        }
        Some(Self {
            index,
            paths: std::array::from_fn(|i| &trajectories.path(i)[..=index]),
        })
    }

    /// Position of body `i` (0-based) at this frame
    pub fn current(&self, i: usize) -> NVec2 {
        self.paths[i][self.index]
    }

    /// Positions of body `i` from the first frame to this one
    pub fn history(&self, i: usize) -> &'a [NVec2] {
        self.paths[i]
    }

    /// Positions of body `i` before this frame
    pub fn trail(&self, i: usize) -> &'a [NVec2] {
        &self.paths[i][..self.index]
    }
}

/// Consumer of frame snapshots, called once per frame in order
pub trait FrameRenderer {
    fn render_frame(&mut self, view: &FrameView<'_>) -> Result<(), RenderError>;

    /// Flush whatever the renderer buffered; no frames may follow
    fn finish(&mut self) -> Result<(), RenderError>;
}

/// Feed every frame of `trajectories` to `renderer`, then finish it
pub fn render_animation<R: FrameRenderer + ?Sized>(
    trajectories: &Trajectories,
    renderer: &mut R,
) -> Result<(), RenderError> {
    for index in 0..trajectories.len() {
        if let Some(view) = FrameView::new(index, trajectories) {
            renderer.render_frame(&view)?;
        }
    }
    renderer.finish()
}

/// Render `trajectories` into an animated GIF at `path`
pub fn write_gif(
    path: impl AsRef<Path>,
    trajectories: &Trajectories,
    settings: &RenderConfig,
) -> Result<(), RenderError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut renderer = GifRenderer::new(BufWriter::new(file), settings)?;
    render_animation(trajectories, &mut renderer)?;
    info!(path = %path.display(), frames = trajectories.len(), "animation written");
    Ok(())
}

// =========================================================================================
// GIF rasterizer
// =========================================================================================

const BACKGROUND: u8 = 0;
const BODY: u8 = 1;
const FRAME: u8 = 2;
const AXIS: u8 = 3;

#[rustfmt::skip]
const PALETTE: [u8; 12] = [
    255, 255, 255, // background
    214,  39,  40, // bodies and path
      0,   0,   0, // view border
    220, 220, 220, // axes through the origin
];

pub struct GifRenderer<W: Write> {
    encoder: Option<gif::Encoder<W>>,
    canvas: Vec<u8>,
    size: u16,
    extent: f64,
    delay: u16, // hundredths of a second
}

impl<W: Write> GifRenderer<W> {
    pub fn new(writer: W, settings: &RenderConfig) -> Result<Self, RenderError> {
        let size = settings.size.max(16);
        let mut encoder = gif::Encoder::new(writer, size, size, &PALETTE)?;
        encoder.set_repeat(gif::Repeat::Infinite)?;

        Ok(Self {
            encoder: Some(encoder),
            canvas: vec![BACKGROUND; size as usize * size as usize],
            size,
            extent: settings.extent,
            delay: (settings.frame_delay_ms / 10).min(u16::MAX as u32) as u16,
        })
    }

    /// World coordinates to pixel coordinates, y pointing down
    fn to_pixel(&self, p: NVec2) -> Option<(i64, i64)> {
        if !(p.x.is_finite() && p.y.is_finite()) {
            return None;
        }
        let span = (self.size - 1) as f64;
        let px = (p.x + self.extent) / (2.0 * self.extent) * span;
        let py = (self.extent - p.y) / (2.0 * self.extent) * span;
        // far off-screen points would overflow the line walk
        if px.abs() > 1e6 || py.abs() > 1e6 {
            return None;
        }
        Some((px.round() as i64, py.round() as i64))
    }

    fn put(&mut self, x: i64, y: i64, color: u8) {
        let n = self.size as i64;
        if (0..n).contains(&x) && (0..n).contains(&y) {
            self.canvas[(y * n + x) as usize] = color;
        }
    }

    fn disc(&mut self, (cx, cy): (i64, i64), r: i64, color: u8) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.put(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Bresenham line between two pixels
    fn line(&mut self, (x0, y0): (i64, i64), (x1, y1): (i64, i64), color: u8) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let (mut x, mut y, mut err) = (x0, y0, dx + dy);
        loop {
            self.put(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn background(&mut self) {
        self.canvas.fill(BACKGROUND);
        let n = self.size as i64;
        if let Some((ox, oy)) = self.to_pixel(NVec2::zeros()) {
            self.line((0, oy), (n - 1, oy), AXIS);
            self.line((ox, 0), (ox, n - 1), AXIS);
        }
        self.line((0, 0), (n - 1, 0), FRAME);
        self.line((n - 1, 0), (n - 1, n - 1), FRAME);
        self.line((n - 1, n - 1), (0, n - 1), FRAME);
        self.line((0, n - 1), (0, 0), FRAME);
    }
}

impl<W: Write> FrameRenderer for GifRenderer<W> {
    fn render_frame(&mut self, view: &FrameView<'_>) -> Result<(), RenderError> {
        if self.encoder.is_none() {
            return Err(RenderError::Finished);
        }

        let large = (self.size as i64 / 48).max(3);
        let small = (self.size as i64 / 144).max(2);

        self.background();

        // body 2 path, up to the previous frame
        let path: Vec<(i64, i64)> = view.trail(1).iter().filter_map(|&p| self.to_pixel(p)).collect();
        for pair in path.windows(2) {
            self.line(pair[0], pair[1], BODY);
        }

        if let Some(p) = self.to_pixel(view.current(0)) {
            self.disc(p, large, BODY);
        }
        for i in 1..N_BODIES {
            if let Some(p) = self.to_pixel(view.current(i)) {
                self.disc(p, small, BODY);
            }
        }

        let frame = gif::Frame {
            width: self.size,
            height: self.size,
            delay: self.delay,
            buffer: Cow::Borrowed(&self.canvas),
            ..gif::Frame::default()
        };
        match self.encoder.as_mut() {
            Some(encoder) => encoder.write_frame(&frame)?,
            None => return Err(RenderError::Finished),
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        let encoder = self.encoder.take().ok_or(RenderError::Finished)?;
        let mut writer = encoder.into_inner()?;
        writer.flush()?;
        Ok(())
    }
}
