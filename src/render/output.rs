//! Text sinks for a rendered [`Plot`].

use std::{
    fs::File,
    io::{BufWriter, Write, stdout},
    path::Path,
};

use tracing::debug;

use crate::{core::error::PlotError, render::plot::Plot};

/// Extensions that suggest the caller expected an image, not text.
const IMAGE_EXTENSIONS: [&str; 9] = ["png", "jpg", "jpeg", "gif", "bmp", "svg", "pdf", "webp", "tiff"];

/// Write the rendered block exactly as [`Plot::render`] produces it.
pub fn write_to<W: Write>(plot: &Plot, mut w: W, color: bool) -> Result<(), PlotError> {
    w.write_all(plot.render(color).as_bytes())?;
    w.flush()?;
    Ok(())
}

/// Print to stdout followed by a newline.
pub fn print(plot: &Plot, color: bool) -> Result<(), PlotError> {
    let mut term = stdout().lock();
    write_to(plot, &mut term, color)?;
    term.write_all(b"\n")?;
    term.flush()?;
    Ok(())
}

/// Write the block to `path`, creating or truncating it.  Image extensions
/// are not special-cased here; see [`looks_like_image`].
pub fn save(plot: &Plot, path: impl AsRef<Path>, color: bool) -> Result<(), PlotError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_to(plot, BufWriter::new(file), color)?;
    debug!(path = %path.display(), color, "plot saved");
    Ok(())
}

#[must_use]
pub fn looks_like_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.iter().any(|i| i.eq_ignore_ascii_case(e)))
}
