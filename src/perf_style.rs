use plotters::style::{FontDesc, FontFamily, FontStyle, RGBColor};

pub const FONT: &str = "sans-serif";

/// Figures are saved at 300 DPI; text and marker sizes are given in printer's
/// points and scaled to pixels with [`scaled`].
pub const DPI: u32 = 300;

/// Style requested by default; falls back to [`DEFAULT`] when unknown.
pub const PREFERRED: &str = "darkgrid";

/// Background and grid treatment shared by every panel of a figure. Series
/// colors are fixed per chart and live with the plotting code.
#[derive(Debug, Clone, Copy)]
pub struct ChartStyle {
    pub name: &'static str,
    pub figure_bg: RGBColor,
    pub panel_bg: RGBColor,
    pub grid: RGBColor,
    pub grid_alpha: f64,
    pub text: RGBColor,
}

static DARKGRID: ChartStyle = ChartStyle {
    name: "darkgrid",
    figure_bg: RGBColor(255, 255, 255),
    panel_bg: RGBColor(234, 234, 242),
    grid: RGBColor(255, 255, 255),
    grid_alpha: 1.0,
    text: RGBColor(38, 38, 38),
};

static DEFAULT: ChartStyle = ChartStyle {
    name: "default",
    figure_bg: RGBColor(255, 255, 255),
    panel_bg: RGBColor(255, 255, 255),
    grid: RGBColor(176, 176, 176),
    grid_alpha: 0.3,
    text: RGBColor(0, 0, 0),
};

static STYLES: [&ChartStyle; 2] = [&DARKGRID, &DEFAULT];

pub fn find(name: &str) -> Option<&'static ChartStyle> {
    STYLES.iter().find(|s| s.name == name).copied()
}

/// Resolves a style by name, substituting the default style when the name is
/// not registered. The fallback is silent.
pub fn select(name: &str) -> &'static ChartStyle {
    find(name).unwrap_or(&DEFAULT)
}

/// Point size to pixels at [`DPI`].
pub fn scaled(pt: u32) -> u32 {
    pt * DPI / 72
}

pub fn bold(pt: u32) -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, f64::from(scaled(pt)), FontStyle::Bold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferred_style_resolves_to_itself() {
        assert_eq!(select(PREFERRED).name, "darkgrid");
    }

    #[test]
    fn unknown_style_falls_back_to_default() {
        assert_eq!(select("seaborn-v0_8-darkgrid").name, "default");
        assert_eq!(select("").name, "default");
    }

    #[test]
    fn point_sizes_scale_with_dpi() {
        assert_eq!(scaled(12), 50);
        assert_eq!(scaled(9), 37);
    }
}
