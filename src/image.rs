use std::fmt;

/// Size of an image in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

/// Layout of the row-major pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    /// Width of the image
    pub width: usize,
    /// Height of the image
    pub height: usize,
}

impl Shape {
    #[inline]
    pub fn offset(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    #[inline]
    pub fn nth(&self, n: usize) -> Option<(usize, usize)> {
        if self.width == 0 {
            return None;
        }
        let row = n / self.width;
        let col = n - row * self.width;
        (row < self.height).then_some((row, col))
    }

    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }
}

pub trait Image {
    type Pixel;

    fn data(&self) -> &[Self::Pixel];

    fn shape(&self) -> Shape;

    fn width(&self) -> usize {
        self.shape().width
    }

    fn height(&self) -> usize {
        self.shape().height
    }

    fn get(&self, row: usize, col: usize) -> Option<&Self::Pixel> {
        let shape = self.shape();
        if row >= shape.height || col >= shape.width {
            return None;
        }
        self.data().get(shape.offset(row, col))
    }

    /// Pixels of a single row, `None` if the row is out of bounds
    fn row(&self, row: usize) -> Option<&[Self::Pixel]> {
        let shape = self.shape();
        if row >= shape.height {
            return None;
        }
        let offset = shape.offset(row, 0);
        self.data().get(offset..offset + shape.width)
    }

    fn iter(&self) -> ImageIter<'_, Self::Pixel> {
        ImageIter {
            index: 0,
            shape: self.shape(),
            data: self.data(),
        }
    }
}

pub struct ImageIter<'a, P> {
    index: usize,
    shape: Shape,
    data: &'a [P],
}

impl<'a, P> Iterator for ImageIter<'a, P> {
    type Item = &'a P;

    fn next(&mut self) -> Option<Self::Item> {
        self.nth(0)
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.index += n + 1;
        let (row, col) = self.shape.nth(self.index - 1)?;
        self.data.get(self.shape.offset(row, col))
    }
}

pub trait ImageMut: Image {
    fn data_mut(&mut self) -> &mut [Self::Pixel];

    fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Self::Pixel> {
        let shape = self.shape();
        if row >= shape.height || col >= shape.width {
            return None;
        }
        self.data_mut().get_mut(shape.offset(row, col))
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ImageOwned<P> {
    shape: Shape,
    data: Vec<P>,
}

/// Single channel 8-bit image used for outlines and masks
pub type Raster = ImageOwned<u8>;

impl<P> ImageOwned<P> {
    /// Wrap row-major `data`, `None` if its length does not match the size
    pub fn new(size: Size, data: Vec<P>) -> Option<Self> {
        (data.len() == size.width * size.height).then(|| Self {
            shape: Shape {
                width: size.width,
                height: size.height,
            },
            data,
        })
    }

    pub fn new_default(size: Size) -> Self
    where
        P: Default,
    {
        Self::new_with(size, |_, _| Default::default())
    }

    pub fn new_with<F>(size: Size, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> P,
    {
        let Size { width, height } = size;
        let mut data = Vec::with_capacity(height * width);
        for row in 0..height {
            for col in 0..width {
                data.push(f(row, col))
            }
        }
        Self {
            shape: Shape { width, height },
            data,
        }
    }

    pub fn size(&self) -> Size {
        self.shape.size()
    }

}

impl<P> Image for ImageOwned<P> {
    type Pixel = P;

    fn shape(&self) -> Shape {
        self.shape
    }

    fn data(&self) -> &[Self::Pixel] {
        &self.data
    }
}

impl<P> ImageMut for ImageOwned<P> {
    fn data_mut(&mut self) -> &mut [Self::Pixel] {
        &mut self.data
    }
}

impl Raster {
    /// Parse raster from rows of `.` (background) and any other character
    /// (foreground with `value`)
    #[cfg(test)]
    pub(crate) fn from_ascii(rows: &[&str], value: u8) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut data = Vec::with_capacity(width * height);
        for row in rows {
            if row.chars().count() != width {
                return None;
            }
            data.extend(row.chars().map(|c| if c == '.' { 0 } else { value }));
        }
        Self::new(Size { width, height }, data)
    }

    /// Number of non-zero pixels
    pub fn count_foreground(&self) -> usize {
        self.iter().filter(|pixel| **pixel != 0).count()
    }

    /// Render raster as rows of `#` (foreground) and `.` (background)
    pub fn to_ascii(&self) -> String {
        let mut output = String::with_capacity((self.shape.width + 1) * self.shape.height);
        for row in self.data.chunks(self.shape.width.max(1)) {
            output.extend(row.iter().map(|pixel| if *pixel == 0 { '.' } else { '#' }));
            output.push('\n');
        }
        output
    }
}

impl fmt::Debug for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Raster {}x{}", self.shape.width, self.shape.height)?;
        f.write_str(&self.to_ascii())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_and_bounds() {
        let size = Size {
            width: 3,
            height: 2,
        };
        let mut img = ImageOwned::new_with(size, |row, col| (row * 10 + col) as u8);
        assert_eq!(img.row(1), Some(&[10, 11, 12][..]));
        assert_eq!(img.row(2), None);
        assert_eq!(img.get(0, 2), Some(&2));
        assert_eq!(img.get(0, 3), None);

        img.data_mut()[..3].copy_from_slice(&[7, 8, 9]);
        *img.get_mut(1, 0).unwrap() = 0;
        assert_eq!(img.data(), &[7, 8, 9, 0, 11, 12]);
        assert_eq!(img.count_foreground(), 5);
        assert_eq!(img.get_mut(2, 0), None);

        let mut iter = img.iter();
        assert_eq!(iter.nth(4), Some(&11));
        assert_eq!(iter.next(), Some(&12));
        assert_eq!(iter.next(), None);

        assert!(ImageOwned::new(size, vec![0u8; 5]).is_none());
    }

    #[test]
    fn test_ascii() {
        let rows = ["#..", ".#.", "..#"];
        let raster = Raster::from_ascii(&rows, 255).unwrap();
        assert_eq!(raster.count_foreground(), 3);
        assert_eq!(raster.get(1, 1), Some(&255));
        assert_eq!(raster.to_ascii(), "#..\n.#.\n..#\n");
        assert!(Raster::from_ascii(&["##", "#"], 1).is_none());
    }
}
