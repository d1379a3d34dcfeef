use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use snaptext_core::Snapshot;
use snaptext_types::{RawImage, Region};
use xcap::Monitor;

/// Screen capture through xcap
pub struct XcapSnapshot {
    /// Where to keep a PNG copy of every capture
    save_to: Option<PathBuf>,
}

impl XcapSnapshot {
    pub fn new(save_to: Option<PathBuf>) -> Self {
        Self { save_to }
    }
}

impl Snapshot for XcapSnapshot {
    fn capture(&self, region: Region) -> Result<RawImage> {
        let image = capture_screen_region(region)?;

        if let Some(path) = &self.save_to {
            if let Err(e) = save_png(&image, path) {
                tracing::warn!("Failed to save snapshot to {}: {:#}", path.display(), e);
            }
        }

        Ok(image)
    }
}

/// Capture a region of the screen as RGBA
pub fn capture_screen_region(region: Region) -> Result<RawImage> {
    let monitors = Monitor::all().context("Failed to get monitors")?;

    let contains = |m: &Monitor, x: i64, y: i64| {
        x >= i64::from(m.x())
            && y >= i64::from(m.y())
            && x < i64::from(m.x()) + i64::from(m.width())
            && y < i64::from(m.y()) + i64::from(m.height())
    };

    // prefer the monitor holding the whole region, then the one holding its corner
    let monitor = monitors
        .iter()
        .find(|m| {
            contains(*m, region.x().into(), region.y().into())
                && region.right() <= i64::from(m.x()) + i64::from(m.width())
                && region.bottom() <= i64::from(m.y()) + i64::from(m.height())
        })
        .or_else(|| {
            monitors
                .iter()
                .find(|m| contains(*m, region.x().into(), region.y().into()))
        });

    let Some(monitor) = monitor else {
        bail!("Region {} is not on any monitor", region);
    };

    let image = monitor.capture_image().context("Failed to capture screen")?;

    // Crop to region using xcap's image (0.25)
    let cropped = xcap::image::imageops::crop_imm(
        &image,
        (region.x() - monitor.x()) as u32,
        (region.y() - monitor.y()) as u32,
        region.width(),
        region.height(),
    )
    .to_image();

    tracing::debug!(
        ">>> [CAPTURE] {} on monitor at ({}, {}), got {}x{}",
        region,
        monitor.x(),
        monitor.y(),
        cropped.width(),
        cropped.height()
    );

    Ok(RawImage {
        width: cropped.width(),
        height: cropped.height(),
        data: cropped.into_raw(),
    })
}

fn save_png(image: &RawImage, path: &PathBuf) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    image::save_buffer(
        path,
        &image.data,
        image.width,
        image.height,
        image::ExtendedColorType::Rgba8,
    )
    .context("Failed to encode PNG")
}
