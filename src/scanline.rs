//! Scanline conversion of a one pixel wide boundary into a solid mask
//!
//! Plain even-odd filling over raw boundary pixels breaks on rows that touch
//! a vertex, run along a horizontal edge, or where two edges meet tangentially.
//! Instead every row is split into sections (maximal runs of boundary pixels),
//! and each section is classified as a crossing or a touch by looking at the
//! rows immediately above and below it. The resulting intersection points drive
//! the even-odd fill.
use crate::{Image, ImageMut, Label, Raster, Size, utils::Runs};

/// Check if the three pixel window centered at `col` has any foreground pixel
///
/// Missing rows (above the first and below the last one) and columns outside
/// of the row are background.
#[inline]
fn window_has_foreground(row: Option<&[u8]>, col: usize) -> bool {
    let Some(row) = row else {
        return false;
    };
    let start = col.saturating_sub(1);
    let end = (col + 2).min(row.len());
    start < end && row[start..end].iter().any(|pixel| *pixel != 0)
}

/// Boundary passes through `col`, connecting the rows above and below
#[inline]
fn is_crossing(col: usize, up: Option<&[u8]>, down: Option<&[u8]>) -> bool {
    window_has_foreground(up, col) && window_has_foreground(down, col)
}

/// Intersection points contributed by the section `[start, end]`
fn section_points(
    start: usize,
    end: usize,
    up: Option<&[u8]>,
    down: Option<&[u8]>,
    points: &mut Vec<usize>,
) {
    if start == end {
        if is_crossing(start, up, down) {
            points.push(start);
        }
        return;
    }

    let up_start = window_has_foreground(up, start);
    let down_start = window_has_foreground(down, start);
    let up_end = window_has_foreground(up, end);
    let down_end = window_has_foreground(down, end);

    let start_crossing = up_start && down_start;
    let end_crossing = up_end && down_end;
    if start_crossing {
        points.push(start);
    }
    if end_crossing {
        points.push(end);
    }
    // flat run: the boundary enters on one end and leaves on the other,
    // the whole run toggles the fill state once
    if !start_crossing && !end_crossing && (up_start || up_end) && (down_start || down_end) {
        points.push(end);
    }
}

/// Columns of `line` at which the fill state toggles
///
/// `up` and `down` are the rows immediately above and below `line`, `None`
/// outside of the raster. Points are returned in increasing column order.
pub fn intersection_points(line: &[u8], up: Option<&[u8]>, down: Option<&[u8]>) -> Vec<usize> {
    let mut points = Vec::new();
    for (start, end) in Runs::new(line, |pixel| *pixel != 0) {
        section_points(start, end, up, down, &mut points);
    }
    points
}

/// Fill output row `y` from the boundary raster
fn fill_row<I>(outline: &I, y: usize, output: &mut [u8], label: u8)
where
    I: Image<Pixel = u8>,
{
    let Some(line) = outline.row(y) else {
        return;
    };
    if line.iter().all(|pixel| *pixel == 0) {
        return;
    }
    let up = y.checked_sub(1).and_then(|y| outline.row(y));
    let down = outline.row(y + 1);

    let points = intersection_points(line, up, down);
    tracing::trace!("[scanline:row] y={} points={:?}", y, points);
    // a trailing unpaired point is ignored
    for span in points.chunks_exact(2) {
        output[span[0]..=span[1]].fill(label);
    }

    // boundary pixels always belong to the mask
    for (pixel, boundary) in output.iter_mut().zip(line) {
        if *boundary != 0 {
            *pixel = label;
        }
    }
}

/// Convert one pixel wide boundary into a solid mask of the same shape
///
/// Every output row depends only on the input rows, so with the `parallel`
/// feature enabled and `parallel` set rows are filled concurrently.
pub fn scanline_fill<I>(outline: &I, label: Label, parallel: bool) -> Raster
where
    I: Image<Pixel = u8> + Sync,
{
    let Size { width, height } = outline.shape().size();
    let mut mask = Raster::new_default(Size { width, height });
    if width == 0 || height == 0 {
        return mask;
    }
    let label = label.get();
    let fill = |(y, output): (usize, &mut [u8])| fill_row(outline, y, output, label);

    #[cfg(feature = "parallel")]
    if parallel {
        use rayon::prelude::*;
        mask.data_mut().par_chunks_mut(width).enumerate().for_each(fill);
        tracing::debug!("[scanline] rows={} pixels={} (parallel)", height, mask.count_foreground());
        return mask;
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    mask.data_mut().chunks_mut(width).enumerate().for_each(fill);
    tracing::debug!("[scanline] rows={} pixels={}", height, mask.count_foreground());
    mask
}
