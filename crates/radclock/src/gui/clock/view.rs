use super::model::State;
use super::{FONT_FACE, TICK_STROKE_WIDTH};
use crate::config::TextConfig;
use crate::gui::theme::ThemeColors;
use cairo::{Context, Format, ImageSurface};
use clockface::{Dial, Point, TextAnchor, TextMetrics, TextRole, Tick};
use palette::Srgba;
use std::f64::consts::PI;

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn select_font(cr: &Context, text: &TextConfig, role: TextRole) {
    cr.select_font_face(FONT_FACE, cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_font_size(text.size_for(role));
}

/// Measures text with a scratch cairo context using the same fonts as [`draw`].
pub struct CairoTextMetrics {
    cr: Context,
    text: TextConfig,
}

impl CairoTextMetrics {
    pub fn new(text: TextConfig) -> Result<Self, cairo::Error> {
        let surface = ImageSurface::create(Format::ARgb32, 1, 1)?;
        let cr = Context::new(&surface)?;
        Ok(Self { cr, text })
    }
}

impl TextMetrics for CairoTextMetrics {
    fn text_height(&self, role: TextRole, text: &str) -> f64 {
        select_font(&self.cr, &self.text, role);
        match self.cr.text_extents(text) {
            Ok(ext) => ext.height(),
            Err(e) => {
                log::warn!("Failed to measure '{}': {}", text, e);
                0.0
            }
        }
    }
}

struct DialRenderer<'a> {
    dial: &'a Dial,
    color: Srgba<f64>,
}

impl<'a> DialRenderer<'a> {
    fn new(dial: &'a Dial, color: Srgba<f64>) -> Self {
        Self { dial, color }
    }

    fn draw(&self, cr: &Context, state: &State) -> Result<(), cairo::Error> {
        let position = self.dial.position();
        draw_disc(cr, position, self.dial.radius(), self.color)?;

        set_color(cr, state.colors.dial_label);
        select_font(cr, &state.text, TextRole::ControlLabel);
        show_centered(cr, &self.dial.label().as_text_anchor())
    }
}

pub fn draw(cr: &Context, state: &State) -> Result<(), cairo::Error> {
    let layout = state.clock.layout();
    let colors = &state.colors;
    let face = &layout.face;

    draw_disc(cr, face.center, face.background_radius(), colors.background)?;
    draw_disc(cr, face.center, face.foreground_radius(), colors.foreground)?;
    draw_ticks(cr, &layout.ticks, colors)?;

    set_color(cr, colors.numerals);
    select_font(cr, &state.text, TextRole::Numeral);
    for numeral in &layout.numerals {
        show_centered(
            cr,
            &TextAnchor {
                text: numeral.text.clone(),
                anchor: numeral.anchor,
            },
        )?;
    }

    if let Some(label) = &layout.center_label {
        set_color(cr, colors.center_text);
        select_font(cr, &state.text, TextRole::CenterLabel);
        show_centered(cr, label)?;
    }

    for (i, dial) in state.clock.dials().iter().enumerate() {
        DialRenderer::new(dial, colors.dial(i)).draw(cr, state)?;
    }
    Ok(())
}

fn draw_disc(
    cr: &Context,
    center: Point,
    radius: f64,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    if radius <= 0.0 {
        return Ok(());
    }
    set_color(cr, color);
    cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
    cr.fill()
}

fn draw_ticks(cr: &Context, ticks: &[Tick], colors: &ThemeColors) -> Result<(), cairo::Error> {
    if ticks.is_empty() {
        return Ok(());
    }
    set_color(cr, colors.ticks);
    cr.set_line_width(TICK_STROKE_WIDTH);
    for tick in ticks {
        cr.move_to(tick.start.x, tick.start.y);
        cr.line_to(tick.end.x, tick.end.y);
    }
    cr.stroke()
}

/// Draws `label` horizontally centered on its anchor, with the baseline on the anchor.
fn show_centered(cr: &Context, label: &TextAnchor) -> Result<(), cairo::Error> {
    let ext = cr.text_extents(&label.text)?;
    cr.move_to(
        label.anchor.x - ext.width() / 2.0 - ext.x_bearing(),
        label.anchor.y,
    );
    cr.show_text(&label.text)
}
