use crate::config::{ColorConfig, DialConfig};
use gtk::gdk;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub background: Srgba<f64>,
    pub foreground: Srgba<f64>,
    pub ticks: Srgba<f64>,
    pub numerals: Srgba<f64>,
    pub center_text: Srgba<f64>,
    pub dial_label: Srgba<f64>,
    /// One entry per configured dial.
    pub dials: Vec<Srgba<f64>>,
}

impl ThemeColors {
    pub fn from_config(colors: &ColorConfig, dials: &[DialConfig]) -> Self {
        Self {
            background: colors.background.to_srgba(),
            foreground: colors.foreground.to_srgba(),
            ticks: colors.ticks.to_srgba(),
            numerals: colors.numerals.to_srgba(),
            center_text: colors.center_text.to_srgba(),
            dial_label: colors.dial_label.to_srgba(),
            dials: dials
                .iter()
                .map(|d| d.color.unwrap_or(colors.dial).to_srgba())
                .collect(),
        }
    }

    pub fn dial(&self, index: usize) -> Srgba<f64> {
        self.dials
            .get(index)
            .copied()
            .unwrap_or_else(|| ColorConfig::default().dial.to_srgba())
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.radclock-drawing-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, HexColor};
    use clockface::DialLabel;

    #[test]
    fn test_dial_colors_fall_back_to_default() {
        let mut config = Config::default();
        config.dials.push(DialConfig {
            label: DialLabel::new("E"),
            angle: 90.0,
            color: Some(HexColor::rgb(0xFF, 0, 0)),
        });
        let colors = ThemeColors::from_config(&config.colors, &config.dials);

        assert_eq!(colors.dials.len(), 2);
        assert_eq!(colors.dial(0), config.colors.dial.to_srgba());
        assert_eq!(colors.dial(1), Srgba::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(colors.dial(7), config.colors.dial.to_srgba());
    }
}
