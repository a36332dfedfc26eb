//! Geometry of overlapping patches used for patch based inference
use crate::MaskError;

/// Padded image size and effective (non-overlapping) patch window per axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddedSize {
    pub size: Vec<usize>,
    pub window: Vec<usize>,
}

/// Image size that fits whole number of overlapping patches after padding
///
/// For every axis `window = patch - 2 * overlap` and
/// `size = ((img + 2 * padding) / window + 1) * window + patch`.
pub fn padded_size(
    img_size: &[usize],
    padding: &[usize],
    patch_size: &[usize],
    patch_overlap: &[usize],
) -> Result<PaddedSize, MaskError> {
    let axes = img_size.len();
    if padding.len() != axes || patch_size.len() != axes || patch_overlap.len() != axes {
        return Err(MaskError::patch(format!(
            "axis count mismatch: img={} padding={} patch={} overlap={}",
            axes,
            padding.len(),
            patch_size.len(),
            patch_overlap.len()
        )));
    }

    let mut size = Vec::with_capacity(axes);
    let mut window = Vec::with_capacity(axes);
    for axis in 0..axes {
        let patch = patch_size[axis];
        let overlap = patch_overlap[axis];
        let wnd = overlap
            .checked_mul(2)
            .and_then(|overlap| patch.checked_sub(overlap))
            .filter(|wnd| *wnd > 0)
            .ok_or_else(|| {
                MaskError::patch(format!(
                    "axis {}: patch {} leaves no window with overlap {}",
                    axis, patch, overlap
                ))
            })?;
        let padded = img_size[axis] + 2 * padding[axis];
        size.push((padded / wnd + 1) * wnd + patch);
        window.push(wnd);
    }
    Ok(PaddedSize { size, window })
}

/// Top-left `[y, x]` corners of overlapping patches, in row-major order
///
/// Corners are laid on a grid with `window` step shifted by `offset`, only
/// patches that end strictly inside of the image are kept.
pub fn overlapping_coords_2d(
    img_size: [usize; 2],
    window: [usize; 2],
    patch_size: [usize; 2],
    offset: Option<[usize; 2]>,
) -> Result<Vec<[usize; 2]>, MaskError> {
    if window.contains(&0) {
        return Err(MaskError::patch(format!("empty window {:?}", window)));
    }
    let [off_y, off_x] = offset.unwrap_or_default();
    let mut coords = Vec::new();
    for y in 0..img_size[0] / window[0] {
        let yy = y * window[0] + off_y;
        if yy + patch_size[0] >= img_size[0] {
            continue;
        }
        for x in 0..img_size[1] / window[1] {
            let xx = x * window[1] + off_x;
            if xx + patch_size[1] < img_size[1] {
                coords.push([yy, xx]);
            }
        }
    }
    tracing::debug!("[tile] img={:?} patches={}", img_size, coords.len());
    Ok(coords)
}
