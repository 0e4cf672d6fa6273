//! Palette editor: base-color inputs, a neutral lock, four ramp columns with
//! contrast pills on every swatch, and an export panel.

use floem::prelude::*;
use floem::reactive::{create_memo, Memo, RwSignal, SignalGet, SignalUpdate};
use floem::views::{h_stack_from_iter, scroll, v_stack_from_iter};

use crate::color::{normalize, HexColor};
use crate::constants;
use crate::contrast::{best_foreground, ContrastPill, Side};
use crate::export::ExportFormat;
use crate::inputs::{copy_button, copy_to_clipboard, hex_input};
use crate::palette::{Group, Palette, NEUTRAL_GRAY};
use crate::protocol::Request;
use crate::ramp::Step;
use crate::ramp_strip::ramp_strip;
use crate::swatch::{self, SwatchRow};

/// Editor inputs. Each field is a signal the host can read or drive.
#[derive(Clone, Copy)]
pub struct PaletteSignals {
    pub c1: RwSignal<HexColor>,
    pub c2: RwSignal<HexColor>,
    pub c3: RwSignal<HexColor>,
    pub neutral_unlocked: RwSignal<bool>,
    pub neutral_manual: RwSignal<HexColor>,
}

impl PaletteSignals {
    pub fn new(c1: &str, c2: &str, c3: &str) -> Self {
        Self {
            c1: RwSignal::new(normalize(c1)),
            c2: RwSignal::new(normalize(c2)),
            c3: RwSignal::new(normalize(c3)),
            neutral_unlocked: RwSignal::new(false),
            neutral_manual: RwSignal::new(NEUTRAL_GRAY),
        }
    }

    /// Current inputs as a command request (tracked).
    pub fn request(&self) -> Request {
        Request {
            c1: self.c1.get(),
            c2: self.c2.get(),
            c3: self.c3.get(),
            neutral_unlocked: self.neutral_unlocked.get(),
            neutral_manual: Some(self.neutral_manual.get().to_hex()),
        }
    }

    /// Current inputs as a command request, without subscribing.
    pub fn request_untracked(&self) -> Request {
        Request {
            c1: self.c1.get_untracked(),
            c2: self.c2.get_untracked(),
            c3: self.c3.get_untracked(),
            neutral_unlocked: self.neutral_unlocked.get_untracked(),
            neutral_manual: Some(self.neutral_manual.get_untracked().to_hex()),
        }
    }
}

impl Default for PaletteSignals {
    fn default() -> Self {
        Self::new("#639720", "#ffe600", "#007a7a")
    }
}

fn to_color(c: HexColor) -> Color {
    let (r, g, b) = c.to_rgb();
    Color::rgb8(r, g, b)
}

/// Creates the editor. `on_replace` runs when the user asks to write the
/// palette into the token store.
pub(crate) fn palette_editor(
    state: PaletteSignals,
    on_replace: impl Fn(Request) + 'static,
) -> impl IntoView {
    let palette = create_memo(move |_| state.request().palette());
    let format = RwSignal::new(ExportFormat::Css);
    let export_text = create_memo(move |_| format.get().render(&palette.get()));

    v_stack((
        // Title + replace action
        h_stack((
            v_stack((
                label(|| "Globals generator").style(|s| s.font_size(16.0)),
                label(|| "C1, C2, C3 and a neutral tinted by at most 2% of C1 500").style(|s| {
                    s.font_size(constants::LABEL_FONT)
                        .color(Color::rgb8(120, 120, 120))
                }),
            )),
            empty().style(|s| s.flex_grow(1.0)),
            action_button("Replace variables", move || {
                on_replace(state.request_untracked())
            }),
        ))
        .style(|s| s.items_center()),
        // Ramp columns
        h_stack((
            ramp_column(Group::C1, palette, hex_input(state.c1)),
            ramp_column(Group::C2, palette, hex_input(state.c2)),
            ramp_column(Group::C3, palette, hex_input(state.c3)),
            ramp_column(Group::Neutral, palette, neutral_controls(state, palette)),
        ))
        .style(|s| s.gap(constants::GAP)),
        export_panel(format, export_text),
    ))
    .style(|s| {
        s.gap(constants::GAP)
            .padding(constants::PADDING)
            .size_full()
            .background(constants::BACKGROUND)
    })
}

/// Lock toggle plus the manual base input, shown only when unlocked.
fn neutral_controls(state: PaletteSignals, palette: Memo<Palette>) -> impl IntoView {
    let unlocked = state.neutral_unlocked;
    h_stack((
        label(move || if unlocked.get() { "Unlocked" } else { "Locked" })
            .style(|s| {
                s.font_size(constants::LABEL_FONT)
                    .padding_horiz(6.0)
                    .padding_vert(2.0)
                    .border_radius(3.0)
                    .background(Color::rgba8(255, 255, 255, 160))
                    .color(Color::rgb8(60, 60, 60))
                    .cursor(floem::style::CursorStyle::Pointer)
            })
            .on_event_stop(floem::event::EventListener::PointerUp, move |_| {
                if !unlocked.get_untracked() {
                    // Start from what the locked neutral currently shows.
                    state
                        .neutral_manual
                        .set(palette.get_untracked().base(Group::Neutral));
                }
                unlocked.update(|u| *u = !*u);
            }),
        container(hex_input(state.neutral_manual))
            .style(move |s| s.apply_if(!unlocked.get(), |s| s.hide())),
    ))
    .style(|s| s.gap(4.0).items_center())
}

fn ramp_column(
    group: Group,
    palette: Memo<Palette>,
    header_input: impl IntoView + 'static,
) -> impl IntoView {
    let base = move || palette.get().base(group);
    v_stack((
        // Header on the base color
        h_stack((
            label(move || swatch::title(group)).style(move |s| {
                s.font_size(13.0).color(to_color(best_foreground(base())))
            }),
            empty().style(|s| s.flex_grow(1.0)),
            header_input,
        ))
        .style(move |s| {
            s.padding(10.0)
                .items_center()
                .border_radius(constants::RADIUS)
                .background(to_color(base()))
        }),
        ramp_strip(move || *palette.get().ramp(group)).style(|s| s.margin_vert(6.0)),
        v_stack_from_iter(
            Step::ALL
                .into_iter()
                .map(move |step| swatch_row(group, step, palette)),
        ),
    ))
    .style(|s| {
        s.width(constants::COLUMN_WIDTH)
            .padding(8.0)
            .border_radius(constants::RADIUS)
            .border(1.0)
            .border_color(Color::rgba8(0, 0, 0, 20))
            .background(Color::WHITE)
    })
}

/// One step: name, contrast pill and hex. Clicking copies the hex.
fn swatch_row(group: Group, step: Step, palette: Memo<Palette>) -> impl IntoView {
    let row = move || SwatchRow::new(step, palette.get().ramp(group).get(step));
    h_stack((
        label(move || step.value())
            .style(move |s| s.width(30.0).font_size(11.0).color(to_color(row().foreground))),
        contrast_pill(move || row().pill),
        empty().style(|s| s.flex_grow(1.0)),
        label(move || row().label()).style(move |s| {
            s.font_size(constants::LABEL_FONT)
                .font_family("monospace".to_string())
                .color(to_color(row().foreground))
        }),
    ))
    .style(move |s| {
        s.height(constants::ROW_HEIGHT)
            .padding_horiz(10.0)
            .gap(6.0)
            .items_center()
            .background(to_color(row().color))
            .cursor(floem::style::CursorStyle::Pointer)
    })
    .on_event_stop(floem::event::EventListener::PointerUp, move |_| {
        copy_to_clipboard(&row().label());
    })
}

/// Black-text and white-text results side by side.
fn contrast_pill(pill: impl Fn() -> ContrastPill + Copy + 'static) -> impl IntoView {
    h_stack((
        pill_side(move || pill().on_black, Color::BLACK),
        empty().style(|s| {
            s.width(1.0)
                .height(12.0)
                .background(Color::rgba8(0, 0, 0, 60))
        }),
        pill_side(move || pill().on_white, Color::WHITE),
    ))
    .style(|s| {
        s.gap(4.0)
            .padding_horiz(4.0)
            .padding_vert(2.0)
            .items_center()
            .border_radius(16.0)
            .background(Color::rgba8(255, 255, 255, 90))
    })
}

fn pill_side(side: impl Fn() -> Side + Copy + 'static, ink: Color) -> impl IntoView {
    h_stack((
        label(move || side().display_ratio())
            .style(move |s| s.font_size(constants::LABEL_FONT).color(ink)),
        check_mark("◈", move || side().checks.graphics),
        check_mark("T", move || side().checks.large_text),
        check_mark("☰", move || side().checks.normal_text),
    ))
    .style(|s| s.gap(2.0).items_center())
}

fn check_mark(glyph: &'static str, pass: impl Fn() -> bool + 'static) -> impl IntoView {
    label(move || glyph).style(move |s| {
        let c = if pass() {
            constants::PASS
        } else {
            constants::FAIL
        };
        s.font_size(constants::LABEL_FONT).color(c)
    })
}

fn export_panel(format: RwSignal<ExportFormat>, text: Memo<String>) -> impl IntoView {
    v_stack((
        h_stack((
            label(|| "Export").style(|s| s.font_size(13.0)),
            h_stack_from_iter(
                ExportFormat::ALL
                    .into_iter()
                    .map(move |f| format_tab(f, format)),
            )
            .style(|s| s.gap(4.0)),
            empty().style(|s| s.flex_grow(1.0)),
            copy_button(move || text.get_untracked()),
        ))
        .style(|s| s.gap(constants::GAP).items_center()),
        scroll(label(move || text.get()).style(|s| {
            s.font_size(constants::INPUT_FONT)
                .font_family("monospace".to_string())
                .padding(8.0)
        }))
        .style(|s| {
            s.height(constants::EXPORT_HEIGHT)
                .width_full()
                .border(1.0)
                .border_color(Color::rgb8(200, 200, 200))
                .border_radius(constants::RADIUS)
                .background(Color::WHITE)
        }),
    ))
    .style(|s| s.gap(6.0))
}

fn format_tab(f: ExportFormat, format: RwSignal<ExportFormat>) -> impl IntoView {
    label(move || f.label())
        .style(move |s| {
            let active = format.get() == f;
            s.font_size(constants::LABEL_FONT)
                .padding_horiz(8.0)
                .padding_vert(3.0)
                .border_radius(3.0)
                .cursor(floem::style::CursorStyle::Pointer)
                .apply_if(active, |s| {
                    s.background(Color::rgb8(40, 40, 40)).color(Color::WHITE)
                })
                .apply_if(!active, |s| s.hover(|s| s.background(Color::rgb8(230, 230, 230))))
        })
        .on_event_stop(floem::event::EventListener::PointerUp, move |_| {
            format.set(f);
        })
}

fn action_button(text: &'static str, on_press: impl Fn() + 'static) -> impl IntoView {
    label(move || text)
        .style(|s| {
            s.font_size(constants::INPUT_FONT)
                .padding_horiz(12.0)
                .padding_vert(6.0)
                .border_radius(constants::RADIUS)
                .background(Color::rgb8(24, 24, 24))
                .color(Color::WHITE)
                .cursor(floem::style::CursorStyle::Pointer)
                .hover(|s| s.background(Color::rgb8(60, 60, 60)))
        })
        .on_event_stop(floem::event::EventListener::PointerUp, move |_| {
            on_press();
        })
}
