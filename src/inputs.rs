//! Text input and clipboard components.

use floem::prelude::*;
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};

use crate::color::{normalize, HexColor};
use crate::constants;

/// True for 3- or 6-digit hex, with or without `#`.
fn is_complete_hex(raw: &str) -> bool {
    let trimmed = raw.trim().trim_start_matches('#');
    (trimmed.len() == 3 || trimmed.len() == 6) && trimmed.chars().all(|c| c.is_ascii_hexdigit())
}

/// A hex input field that syncs bidirectionally with a color signal.
///
/// Complete hex values update the color while typing; anything else is
/// normalized on Enter or focus loss.
pub(crate) fn hex_input(color: RwSignal<HexColor>) -> impl IntoView {
    let text = RwSignal::new(color.get_untracked().to_hex_upper());

    // External color → text (only update if not equivalent)
    create_effect(move |_| {
        let c = color.get();
        let current = text.get_untracked();
        if normalize(&current) != c || !is_complete_hex(&current) {
            text.set(c.to_hex_upper());
        }
    });

    // Dynamic: text → color on every complete keystroke
    create_effect(move |_| {
        let raw = text.get();
        if is_complete_hex(&raw) {
            let parsed = normalize(&raw);
            if color.get_untracked() != parsed {
                color.set(parsed);
            }
        }
    });

    let on_commit = move || {
        let raw = text.get_untracked();
        let parsed = normalize(&raw);
        let formatted = parsed.to_hex_upper();
        if raw != formatted {
            text.set(formatted);
        }
        if color.get_untracked() != parsed {
            color.set(parsed);
        }
    };
    let on_commit_clone = on_commit;

    text_input(text)
        .style(|s| {
            s.width(constants::HEX_INPUT_WIDTH)
                .padding(2.0)
                .font_size(constants::INPUT_FONT)
                .font_family("monospace".to_string())
                .background(Color::WHITE)
                .border(1.0)
                .border_color(Color::rgb8(200, 200, 200))
                .border_radius(3.0)
        })
        .on_event_stop(floem::event::EventListener::FocusLost, move |_| {
            on_commit();
        })
        .on_event_stop(floem::event::EventListener::KeyDown, move |e| {
            if let floem::event::Event::KeyDown(ke) = e {
                if ke.key.logical_key
                    == floem::keyboard::Key::Named(floem::keyboard::NamedKey::Enter)
                {
                    on_commit_clone();
                }
            }
        })
}

/// Icon and caption of the copy button.
fn copy_face(copied: bool) -> (lucide_icons::Icon, &'static str) {
    if copied {
        (lucide_icons::Icon::Check, "Copied")
    } else {
        (lucide_icons::Icon::Copy, "Copy")
    }
}

/// Copy action for the export panel. After a copy it shows a check and
/// "Copied" until the pointer leaves.
pub(crate) fn copy_button(get_text: impl Fn() -> String + 'static) -> impl IntoView {
    let copied = RwSignal::new(false);
    h_stack((
        label(move || copy_face(copied.get()).0.unicode().to_string())
            .style(|s| s.font_size(13.0).font_family("lucide".to_string())),
        label(move || copy_face(copied.get()).1).style(|s| s.font_size(constants::LABEL_FONT)),
    ))
    .style(move |s| {
        let ink = if copied.get() {
            constants::PASS
        } else {
            Color::rgb8(90, 90, 90)
        };
        s.gap(4.0)
            .items_center()
            .padding_horiz(8.0)
            .padding_vert(3.0)
            .border(1.0)
            .border_color(Color::rgb8(210, 210, 210))
            .border_radius(constants::RADIUS)
            .color(ink)
            .cursor(floem::style::CursorStyle::Pointer)
            .hover(|s| s.background(Color::rgb8(236, 236, 236)))
    })
    .on_event_stop(floem::event::EventListener::PointerUp, move |_| {
        copy_to_clipboard(&get_text());
        copied.set(true);
    })
    .on_event_stop(floem::event::EventListener::PointerLeave, move |_| {
        copied.set(false);
    })
}

pub(crate) fn copy_to_clipboard(text: &str) {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(err) = clipboard.set_text(text) {
                tracing::warn!(error = %err, "clipboard write failed");
            }
        }
        Err(err) => tracing::warn!(error = %err, "clipboard unavailable"),
    }
}
