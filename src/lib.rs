/*!
 * # subforge - format-agnostic subtitle toolkit
 *
 * An in-memory subtitle document model with a timing algebra shared by
 * every format adapter.
 *
 * ## Features
 *
 * - Format-neutral document model (items, lines, styles, regions, metadata)
 * - Timing algebra: ordering, shifting, duration forcing, fragmentation,
 *   unfragmentation and merging
 * - Millisecond-exact timecode codec with configurable separators
 * - Packed 32-bit color codec
 * - Extension-based format registry with a built-in SRT adapter
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timecode`: Duration text codec
 * - `color`: Packed color codec
 * - `model`: Document, items, lines, styles and regions
 * - `timing`: Timing algebra implemented on `Document`
 * - `formats`: Adapter trait, registry and the SRT adapter
 * - `config`: Adapter options and log level
 * - `clock`: Injectable time source
 * - `logging`: Optional stderr logger
 * - `shared`: Lock-protected document handle
 * - `errors`: Error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod clock;
pub mod color;
pub mod config;
pub mod errors;
pub mod formats;
pub mod logging;
pub mod model;
pub mod shared;
pub mod timecode;
pub mod timing;

// Re-export main types for easier usage
pub use clock::{Clock, FixedClock, SystemClock};
pub use color::Color;
pub use config::{Config, FormatOptions, LogLevel, TeletextOptions};
pub use errors::{Result, SubtitleError};
pub use formats::{FormatRegistry, SrtFormat, SubtitleFormat};
pub use model::{Document, Item, Line, LineItem, Metadata, Region, Style, StyleAttributes};
pub use shared::SharedDocument;
pub use timecode::{format_duration, parse_duration};
pub use timing::PLACEHOLDER_TEXT;
