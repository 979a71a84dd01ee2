use crate::error::{Result, StrainError};

/// Palette attribute used for empty graph cells and gutters.
pub const BACKGROUND: &str = "bg background";
/// Graph and panel titles.
pub const TITLE: &str = "title";
/// Y-axis tick labels.
pub const AXIS: &str = "axis";
/// Vertical dividers between series.
pub const LINE: &str = "line";

/// The four palette attribute names a bar graph is drawn with.
///
/// `light` / `dark` alternate column to column so adjacent bars of equal
/// height stay distinguishable; the `*_smooth` variants colour the partial
/// top cell when sub-cell smoothing is on.  Names are resolved to concrete
/// colours by `strain-theme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub light:        &'static str,
    pub dark:         &'static str,
    pub light_smooth: &'static str,
    pub dark_smooth:  &'static str,
}

impl Palette {
    pub const fn new(
        light: &'static str,
        dark: &'static str,
        light_smooth: &'static str,
        dark_smooth: &'static str,
    ) -> Self {
        Self { light, dark, light_smooth, dark_smooth }
    }

    /// Attribute for a full cell in the given colour role.
    #[must_use]
    pub fn fill(&self, dark: bool) -> &'static str {
        if dark { self.dark } else { self.light }
    }

    /// Attribute for a partially filled top cell in the given colour role.
    #[must_use]
    pub fn smooth(&self, dark: bool) -> &'static str {
        if dark { self.dark_smooth } else { self.light_smooth }
    }
}

/// A polled group of sensors that can be graphed.
///
/// `readings()` and `sensors()` are parallel: index `i` of one describes
/// index `i` of the other.  The sensor list may grow between updates (a CPU
/// core coming online) but never shrinks or reorders.
pub trait Source: std::fmt::Debug {
    /// Display name, e.g. `"Temp"`.
    fn name(&self) -> &str;

    /// Measurement unit, e.g. `"C"` or `"MHz"`.
    fn unit(&self) -> &str;

    /// Pull fresh values from the OS.  Called by the shell once per tick,
    /// before any graph reads the source.
    fn update(&mut self) -> Result<()>;

    fn is_available(&self) -> bool;

    fn readings(&self) -> &[f32];

    fn sensors(&self) -> &[String];

    /// Theoretical maximum used to seed the graph scale.
    fn top(&self) -> f32;

    /// Whether an alert threshold is currently exceeded.
    ///
    /// Sources without a threshold return [`StrainError::Unsupported`].
    fn edge_triggered(&self) -> Result<bool> {
        Err(StrainError::Unsupported("edge trigger"))
    }

    fn palette(&self) -> Palette;

    fn alert_palette(&self) -> Option<Palette> {
        None
    }
}
