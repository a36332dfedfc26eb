//! Topological thinning of drawn outlines down to one pixel width
use crate::{Image, ImageMut, MaskError, Raster};

/// Reduces foreground (non-zero pixels) of a raster to one pixel wide curves
///
/// The result has the same shape as the input, connectivity of the foreground
/// is preserved, closed loops and isolated points are never removed.
/// Remaining foreground pixels keep their original value.
pub trait Thinner: Send + Sync {
    /// Name of the thinner, used in logs and errors
    fn name(&self) -> &str;

    fn thin(&self, raster: &Raster) -> Result<Raster, MaskError>;
}

impl<T: Thinner + ?Sized> Thinner for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn thin(&self, raster: &Raster) -> Result<Raster, MaskError> {
        (**self).thin(raster)
    }
}

impl<T: Thinner + ?Sized> Thinner for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn thin(&self, raster: &Raster) -> Result<Raster, MaskError> {
        (**self).thin(raster)
    }
}

/// Zhang-Suen parallel thinning
///
/// Each pass consists of two subiterations, a pixel is removed when its
/// 8-neighbourhood code is marked in the lookup table of the subiteration.
/// Neighbourhood code bits, starting from the least significant one, are:
/// east, north-east, north, north-west, west, south-west, south, south-east.
#[derive(Clone)]
pub struct ZhangSuenThinner {
    luts: [[bool; 256]; 2],
}

impl Default for ZhangSuenThinner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ZhangSuenThinner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZhangSuenThinner").finish_non_exhaustive()
    }
}

impl ZhangSuenThinner {
    pub fn new() -> Self {
        let mut luts = [[false; 256]; 2];
        for code in 0..256 {
            let n = neighbours(code as u8);
            let removable = is_simple_border(n);
            luts[0][code] = removable && south_east_border(n);
            luts[1][code] = removable && north_west_border(n);
        }
        Self { luts }
    }

    /// Remove pixels marked by `lut`, returns number of removed pixels
    fn subiteration(
        &self,
        raster: &mut Raster,
        lut: &[bool; 256],
        removed: &mut Vec<(usize, usize)>,
    ) -> usize {
        removed.clear();
        for row in 0..raster.height() {
            for col in 0..raster.width() {
                if raster.get(row, col).is_some_and(|pixel| *pixel != 0)
                    && lut[neighbourhood_code(raster, row, col) as usize]
                {
                    removed.push((row, col));
                }
            }
        }
        for (row, col) in removed.iter() {
            if let Some(pixel) = raster.get_mut(*row, *col) {
                *pixel = 0;
            }
        }
        removed.len()
    }
}

impl Thinner for ZhangSuenThinner {
    fn name(&self) -> &str {
        "zhang-suen"
    }

    fn thin(&self, raster: &Raster) -> Result<Raster, MaskError> {
        let mut output = raster.clone();
        let mut removed = Vec::new();
        let mut passes = 0;
        loop {
            passes += 1;
            let count: usize = self
                .luts
                .iter()
                .map(|lut| self.subiteration(&mut output, lut, &mut removed))
                .sum();
            tracing::trace!("[thin:pass] pass={} removed={}", passes, count);
            if count == 0 {
                break;
            }
        }
        tracing::debug!(
            "[thin:{}] passes={} pixels={}",
            self.name(),
            passes,
            output.count_foreground()
        );
        Ok(output)
    }
}

/// 8-neighbourhood code of the pixel, out of bounds pixels are background
fn neighbourhood_code(raster: &Raster, row: usize, col: usize) -> u8 {
    // (row offset, col offset) for bits 0..8
    const OFFSETS: [(isize, isize); 8] = [
        (0, 1),
        (-1, 1),
        (-1, 0),
        (-1, -1),
        (0, -1),
        (1, -1),
        (1, 0),
        (1, 1),
    ];
    let mut code = 0u8;
    for (bit, (dr, dc)) in OFFSETS.iter().enumerate() {
        let (Some(r), Some(c)) = (row.checked_add_signed(*dr), col.checked_add_signed(*dc)) else {
            continue;
        };
        if raster.get(r, c).is_some_and(|pixel| *pixel != 0) {
            code |= 1 << bit;
        }
    }
    code
}

fn neighbours(code: u8) -> [bool; 8] {
    std::array::from_fn(|bit| (code >> bit) & 1 == 1)
}

/// Pixel has 2 to 6 foreground neighbours and exactly one background to
/// foreground transition around it
fn is_simple_border(n: [bool; 8]) -> bool {
    let count = n.iter().filter(|fg| **fg).count();
    let transitions = (0..8).filter(|&i| !n[i] && n[(i + 1) % 8]).count();
    (2..=6).contains(&count) && transitions == 1
}

/// First subiteration: `N*E*S == 0` and `E*S*W == 0`
fn south_east_border(n: [bool; 8]) -> bool {
    let [e, _, north, _, w, _, s, _] = n;
    !(north && e && s) && !(e && s && w)
}

/// Second subiteration: `N*E*W == 0` and `N*S*W == 0`
fn north_west_border(n: [bool; 8]) -> bool {
    let [e, _, north, _, w, _, s, _] = n;
    !(north && e && w) && !(north && s && w)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thin(rows: &[&str]) -> Result<Raster, MaskError> {
        let raster = Raster::from_ascii(rows, 255).unwrap();
        ZhangSuenThinner::default().thin(&raster)
    }

    fn has_2x2_block(raster: &Raster) -> bool {
        let fg = |row: usize, col: usize| raster.get(row, col).is_some_and(|p| *p != 0);
        (0..raster.height().saturating_sub(1)).any(|row| {
            (0..raster.width().saturating_sub(1)).any(|col| {
                fg(row, col) && fg(row + 1, col) && fg(row, col + 1) && fg(row + 1, col + 1)
            })
        })
    }

    #[test]
    fn test_keeps_thin_curves() -> Result<(), MaskError> {
        let rows = ["#....", ".#...", "..#..", "...#.", "....#"];
        assert_eq!(thin(&rows)?, Raster::from_ascii(&rows, 255).unwrap());

        let rows = ["..#..", ".#.#.", "#...#", ".#.#.", "..#.."];
        assert_eq!(thin(&rows)?, Raster::from_ascii(&rows, 255).unwrap());

        let rows = ["...", ".#.", "..."];
        assert_eq!(thin(&rows)?, Raster::from_ascii(&rows, 255).unwrap());
        Ok(())
    }

    #[test]
    fn test_keeps_square_ring() -> Result<(), MaskError> {
        let rows = ["#####", "#...#", "#...#", "#...#", "#####"];
        assert_eq!(thin(&rows)?, Raster::from_ascii(&rows, 255).unwrap());
        Ok(())
    }

    #[test]
    fn test_keeps_both_edges_at_acute_vertex() -> Result<(), MaskError> {
        // two edges meeting at the bottom-left corner share row 5
        let rows = [
            "#......",
            "#......",
            "#.....#",
            "#....#.",
            "#..##..",
            "###....",
            "#......",
        ];
        let expected = Raster::from_ascii(
            &[
                "#......",
                "#......",
                "#.....#",
                "#....#.",
                "#..##..",
                "###....",
                ".......",
            ],
            255,
        );
        assert_eq!(Some(thin(&rows)?), expected);
        Ok(())
    }

    #[test]
    fn test_thick_outline() -> Result<(), MaskError> {
        let rows = [
            "..........",
            ".########.",
            ".########.",
            ".##....##.",
            ".##....##.",
            ".##....##.",
            ".########.",
            ".########.",
            "..........",
        ];
        let before = Raster::from_ascii(&rows, 255).unwrap();
        let after = thin(&rows)?;
        assert!(!has_2x2_block(&after));
        assert!(after.count_foreground() < before.count_foreground());
        // every remaining pixel was foreground before, and kept its value
        for (p0, p1) in before.iter().zip(after.iter()) {
            assert!(*p1 == 0 || *p1 == *p0);
        }
        // loop is still closed: interior pixel is enclosed on every row of the hole
        for row in 3..6 {
            let line = after.row(row).unwrap();
            let first = line.iter().position(|p| *p != 0);
            let last = line.iter().rposition(|p| *p != 0);
            assert!(matches!((first, last), (Some(f), Some(l)) if f < 4 && l > 5));
        }
        Ok(())
    }

    #[test]
    fn test_thick_bar() -> Result<(), MaskError> {
        let after = thin(&["......", ".####.", ".####.", "......"])?;
        let expected = Raster::from_ascii(&["......", "..##..", "......", "......"], 255);
        assert_eq!(Some(after), expected);
        Ok(())
    }
}
