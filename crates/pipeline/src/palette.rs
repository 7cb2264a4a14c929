//! Named overlay colors, built once and read-only afterwards.

use std::collections::HashMap;

use framelens_raster::Bgr;

/// Role-keyed palette entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteColor {
    /// Finest-scale edges, brightest green.
    EdgeFinest,
    /// Fine-scale edges.
    EdgeFine,
    /// Coarse-scale edges.
    EdgeCoarse,
    /// Coarsest-scale edges, darkest green.
    EdgeCoarsest,
    /// Accumulated edge trail.
    EdgeTrail,
    /// Edge pixels painted over the color frame.
    EdgeOverlay,
    /// Contour outlines.
    ContourHighlight,
}

/// Immutable color lookup shared by the compositor and the dispatcher.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: HashMap<PaletteColor, Bgr>,
}

impl Palette {
    /// The stock palette: four green shades from darkest to brightest, a
    /// trail shade, lawn green for overlays, and red for contours.
    pub fn standard() -> Self {
        let colors = HashMap::from([
            (PaletteColor::EdgeCoarsest, Bgr::new(5, 50, 5)),
            (PaletteColor::EdgeCoarse, Bgr::new(10, 80, 10)),
            (PaletteColor::EdgeFine, Bgr::new(45, 150, 45)),
            (PaletteColor::EdgeFinest, Bgr::new(80, 255, 80)),
            (PaletteColor::EdgeTrail, Bgr::new(60, 200, 60)),
            (PaletteColor::EdgeOverlay, Bgr::new(0, 252, 124)),
            (PaletteColor::ContourHighlight, Bgr::new(0, 0, 255)),
        ]);
        Self { colors }
    }

    pub fn color(&self, id: PaletteColor) -> Bgr {
        self.colors.get(&id).copied().unwrap_or(Bgr::new(0, 0, 0))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}
