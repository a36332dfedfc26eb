//! Polygon annotation to solid mask pipeline
use crate::{
    BoundingBox, Geometry, ZhangSuenThinner, Image, ImageMut, Label, LineOutline, MaskError,
    MaskOptions, OutlineDrawer, Raster, Thinner, outline::draw_outline, scanline::scanline_fill,
};

/// Result of converting a geometry into a mask
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonMask {
    /// Solid mask, interior and boundary pixels are set to the label
    pub mask: Raster,
    /// One pixel wide boundary the mask was filled from
    pub outline: Raster,
    /// Bounds of the geometry, the top-left corner maps to raster origin
    pub bbox: BoundingBox,
}

/// Converts polygonal geometries into solid masks
///
/// Outline drawing and thinning are pluggable, by default edges are traced
/// with [`LineOutline`] and thinned with [`ZhangSuenThinner`].
pub struct MaskBuilder {
    options: MaskOptions,
    drawer: Box<dyn OutlineDrawer>,
    thinner: Box<dyn Thinner>,
}

impl Default for MaskBuilder {
    fn default() -> Self {
        Self::new(MaskOptions::default())
    }
}

impl std::fmt::Debug for MaskBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaskBuilder")
            .field("options", &self.options)
            .field("drawer", &self.drawer.name())
            .field("thinner", &self.thinner.name())
            .finish()
    }
}

impl MaskBuilder {
    pub fn new(options: MaskOptions) -> Self {
        Self {
            options,
            drawer: Box::new(LineOutline),
            thinner: Box::new(ZhangSuenThinner::default()),
        }
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.options.label = label;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.options.parallel = parallel;
        self
    }

    pub fn with_drawer(mut self, drawer: impl OutlineDrawer + 'static) -> Self {
        self.drawer = Box::new(drawer);
        self
    }

    pub fn with_thinner(mut self, thinner: impl Thinner + 'static) -> Self {
        self.thinner = Box::new(thinner);
        self
    }

    pub fn options(&self) -> &MaskOptions {
        &self.options
    }

    /// Convert geometry into a solid mask cropped to its bounding box
    pub fn build(&self, geometry: &Geometry) -> Result<PolygonMask, MaskError> {
        let span = tracing::debug_span!(
            "[mask]",
            kind = %geometry.kind(),
            rings = geometry.rings().len()
        );
        let _guard = span.enter();
        let label = self.options.label;

        let bbox = BoundingBox::from_rings(geometry.rings())?;
        tracing::debug!("[bbox] {:?}", bbox);

        let drawn = tracing::debug_span!("[outline]", drawer = self.drawer.name())
            .in_scope(|| draw_outline(self.drawer.as_ref(), geometry.rings(), bbox, label.get()))?;

        let outline = tracing::debug_span!("[thin]", thinner = self.thinner.name())
            .in_scope(|| self.thinner.thin(&drawn))?;
        if outline.shape() != drawn.shape() {
            return Err(MaskError::Capability {
                name: self.thinner.name().to_owned(),
                reason: format!(
                    "thinning changed raster size from {:?} to {:?}",
                    drawn.size(),
                    outline.size()
                ),
            });
        }

        let mut mask = tracing::debug_span!("[fill]", parallel = self.options.parallel)
            .in_scope(|| scanline_fill(&outline, label, self.options.parallel));

        // pixels removed by thinning are still boundary
        for (pixel, boundary) in mask.data_mut().iter_mut().zip(drawn.data()) {
            if *boundary != 0 {
                *pixel = label.get();
            }
        }

        Ok(PolygonMask {
            mask,
            outline,
            bbox,
        })
    }
}

/// Convert geometry into a solid mask with default outline drawing and thinning
pub fn polygon_mask(geometry: &Geometry, label: Label) -> Result<PolygonMask, MaskError> {
    MaskBuilder::default().with_label(label).build(geometry)
}
