//! Compact horizontal strip showing all 12 steps of a ramp.

use floem::kurbo::{Rect, Shape};
use floem::peniko::Color;

use floem::reactive::create_effect;
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, PaintCx, UpdateCx},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::color::HexColor;
use crate::constants;
use crate::ramp::{Ramp, Step};

pub struct RampStrip {
    id: ViewId,
    colors: Vec<HexColor>,
    size: floem::taffy::prelude::Size<f32>,
}

/// Creates a ramp strip that follows `ramp_fn`.
pub fn ramp_strip(ramp_fn: impl Fn() -> Ramp + 'static) -> RampStrip {
    let id = ViewId::new();

    create_effect(move |_| {
        let ramp = ramp_fn();
        id.update_state(ramp);
    });

    RampStrip {
        id,
        colors: vec![HexColor::BLACK; Step::ALL.len()],
        size: Default::default(),
    }
    .style(|s| {
        s.height(constants::STRIP_HEIGHT)
            .border_radius(constants::RADIUS)
    })
}

fn to_color(c: HexColor) -> Color {
    let (r, g, b) = c.to_rgb();
    Color::rgb8(r, g, b)
}

impl View for RampStrip {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(ramp) = state.downcast::<Ramp>() {
            self.colors = ramp.iter().map(|(_, c)| c).collect();
            self.id.request_layout();
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        let rect = Rect::new(0.0, 0.0, w, h);
        let rrect = rect.to_rounded_rect(constants::RADIUS as f64);

        cx.save();
        cx.clip(&rrect);
        let cell = w / self.colors.len().max(1) as f64;
        for (i, color) in self.colors.iter().enumerate() {
            let x0 = i as f64 * cell;
            let cell_rect = Rect::new(x0, 0.0, (x0 + cell).min(w), h);
            cx.fill(&cell_rect, to_color(*color), 0.0);
        }
        cx.restore();

        cx.stroke(
            &rrect,
            Color::rgba8(0, 0, 0, 40),
            &floem::kurbo::Stroke::new(1.0),
        );
    }
}
