//! # floem-ramps
//!
//! Derives 12-step color ramps (three brand colors plus a tinted neutral)
//! from base colors, checks every swatch against WCAG AA, exports the
//! palette as CSS, relative-color CSS or SCSS, and writes it into a design
//! token store without ever creating tokens.
//!
//! The color pipeline is pure and total. With the default `preview` feature
//! the crate also provides a live [Floem](https://github.com/lapce/floem)
//! editor.
//!
//! ## Usage
//!
//! ```rust
//! use floem_ramps::{build_palette, parse_css, PaletteOptions};
//!
//! let palette = build_palette("#639720", "#ffe600", "#007a7a", &PaletteOptions::default());
//! let css = palette.css();
//! assert!(css.starts_with(":root{--c1-25:"));
//! assert_eq!(parse_css(&css).len(), 48);
//! ```

mod color;
mod contrast;
mod error;
mod export;
mod math;
mod palette;
mod protocol;
mod ramp;
mod store;
mod swatch;
mod sync;

#[cfg(feature = "preview")]
mod constants;
#[cfg(feature = "preview")]
mod editor;
#[cfg(feature = "preview")]
mod inputs;
#[cfg(feature = "preview")]
mod ramp_strip;

pub use color::{mix, normalize, normalize_hex, HexColor, Hsl};
pub use contrast::{
    best_foreground, classify, contrast_ratio, relative_luminance, Checks, ContrastPill, Side,
    GRAPHICS_MIN, LARGE_TEXT_MIN, NORMAL_TEXT_MIN,
};
pub use error::{ProtocolError, StoreError};
pub use export::{calc_css, flat_css, parse_css, scss, ExportFormat, ParsedPalette};
pub use palette::{
    build_palette, build_palette_from, Group, Palette, PaletteOptions, DEFAULT_TINT_FRACTION,
    NEUTRAL_GRAY,
};
pub use protocol::{dispatch, generate, handle_message, Command, Request, Response};
pub use ramp::{build_ramp, ramp_from, Ramp, Step};
pub use store::{
    Collection, MemoryStore, ModeId, StoredToken, TokenEntry, TokenId, TokenKind, TokenStore,
};
pub use swatch::{columns, Column, SwatchRow};
pub use sync::{normalize_path, plan, synchronize, SyncConfig, SyncContext, SyncReport, TokenChange};

#[cfg(feature = "preview")]
pub use editor::PaletteSignals;

#[cfg(feature = "preview")]
use std::sync::Once;

#[cfg(feature = "preview")]
use floem::prelude::*;
#[cfg(feature = "preview")]
use floem::text::FONT_SYSTEM;

#[cfg(feature = "preview")]
static LOAD_LUCIDE_FONT: Once = Once::new();

/// Creates the top-level palette editor view.
///
/// The editor reads from and writes to `state`. `on_replace` is called with
/// the current inputs when the user presses "Replace variables"; hand it to
/// [`dispatch`] with a [`Command::ReplaceVariables`] to sync a token store.
#[cfg(feature = "preview")]
pub fn palette_editor(
    state: PaletteSignals,
    on_replace: impl Fn(Request) + 'static,
) -> impl IntoView {
    LOAD_LUCIDE_FONT.call_once(|| {
        FONT_SYSTEM
            .lock()
            .db_mut()
            .load_font_data(lucide_icons::LUCIDE_FONT_BYTES.to_vec());
    });
    editor::palette_editor(state, on_replace)
}
