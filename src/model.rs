/*!
 * Format-neutral subtitle document model.
 *
 * A `Document` owns its items, styles, regions and metadata. Items, lines
 * and regions refer to styles and regions by identifier; the identifiers are
 * resolved against the document's registries, never followed blindly, so a
 * looping inheritance chain is reported instead of traversed forever.
 */

use std::collections::{HashMap, HashSet};
use std::fmt;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::errors::{Result, SubtitleError};

/// A subtitle document: ordered items plus shared styles, regions and metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Items in document order (only start-ordered after `order()`)
    #[serde(default)]
    pub items: Vec<Item>,

    /// Regions keyed by id
    #[serde(default)]
    pub regions: HashMap<String, Region>,

    /// Styles keyed by id
    #[serde(default)]
    pub styles: HashMap<String, Style>,

    #[serde(default)]
    pub metadata: Metadata,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item without reordering
    pub fn push_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Register a style under its id, returning any style it replaced
    pub fn add_style(&mut self, style: Style) -> Option<Style> {
        self.styles.insert(style.id.clone(), style)
    }

    /// Register a region under its id, returning any region it replaced
    pub fn add_region(&mut self, region: Region) -> Option<Region> {
        self.regions.insert(region.id.clone(), region)
    }

    pub fn style(&self, id: &str) -> Option<&Style> {
        self.styles.get(id)
    }

    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.get(id)
    }

    /// Walk a style's parent chain, leaf first.
    ///
    /// Fails with `StyleCycle` when an id is met twice and with
    /// `UnknownStyle` when a link points outside the registry.
    pub fn resolve_style_chain<'a>(&'a self, id: &'a str) -> Result<Vec<&'a Style>> {
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(id);

        while let Some(current) = next {
            if !visited.insert(current) {
                return Err(SubtitleError::StyleCycle(current.to_string()));
            }
            let style = self
                .styles
                .get(current)
                .ok_or_else(|| SubtitleError::UnknownStyle(current.to_string()))?;
            chain.push(style);
            next = style.parent_id.as_deref();
        }

        Ok(chain)
    }

    /// Attributes of a style with its ancestors' values filled in
    pub fn style_attributes(&self, id: &str) -> Result<StyleAttributes> {
        let mut attributes = StyleAttributes::default();
        for style in self.resolve_style_chain(id)? {
            attributes.inherit_from(&style.attributes);
        }
        Ok(attributes)
    }

    /// Attributes that apply when rendering an item.
    ///
    /// Precedence: the item's inline overrides, its style chain, the region's
    /// inline overrides, then the region's style chain.
    pub fn effective_attributes(&self, item: &Item) -> Result<StyleAttributes> {
        let mut attributes = item.inline_style.clone().unwrap_or_default();

        if let Some(style_id) = &item.style_id {
            attributes.inherit_from(&self.style_attributes(style_id)?);
        }

        if let Some(region_id) = &item.region_id {
            let region = self
                .regions
                .get(region_id)
                .ok_or_else(|| SubtitleError::UnknownRegion(region_id.clone()))?;
            if let Some(inline) = &region.inline_style {
                attributes.inherit_from(inline);
            }
            if let Some(style_id) = &region.style_id {
                attributes.inherit_from(&self.style_attributes(style_id)?);
            }
        }

        Ok(attributes)
    }

    /// Check that every style and region reference resolves and that no
    /// inheritance chain loops.
    pub fn validate_references(&self) -> Result<()> {
        for id in self.styles.keys() {
            self.resolve_style_chain(id)?;
        }

        for region in self.regions.values() {
            if let Some(style_id) = &region.style_id {
                self.resolve_style_chain(style_id)?;
            }
        }

        for item in &self.items {
            if let Some(style_id) = &item.style_id {
                self.resolve_style_chain(style_id)?;
            }
            if let Some(region_id) = &item.region_id {
                if !self.regions.contains_key(region_id) {
                    return Err(SubtitleError::UnknownRegion(region_id.clone()));
                }
            }
            for line_item in item.lines.iter().flat_map(|line| line.items.iter()) {
                if let Some(style_id) = &line_item.style_id {
                    self.resolve_style_chain(style_id)?;
                }
            }
        }

        Ok(())
    }
}

/// A cue: text shown between two time offsets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Start offset
    #[serde(with = "millis")]
    pub start_at: TimeDelta,

    /// End offset (expected, not enforced, to be >= start)
    #[serde(with = "millis")]
    pub end_at: TimeDelta,

    #[serde(default)]
    pub lines: Vec<Line>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,

    /// Id of a style in the owning document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,

    /// Id of a region in the owning document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_id: Option<String>,

    /// Overrides taking precedence over the referenced style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_style: Option<StyleAttributes>,
}

impl Item {
    /// Create an item without lines
    pub fn new(start_at: TimeDelta, end_at: TimeDelta) -> Self {
        Self {
            start_at,
            end_at,
            ..Self::default()
        }
    }

    /// Create an item holding a single unstyled line
    pub fn with_text(start_at: TimeDelta, end_at: TimeDelta, text: impl Into<String>) -> Self {
        Self {
            lines: vec![Line::from_text(text)],
            ..Self::new(start_at, end_at)
        }
    }

    /// Time between start and end offsets
    pub fn duration(&self) -> TimeDelta {
        self.end_at - self.start_at
    }
}

/// Lines joined by " - "
impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, line) in self.lines.iter().enumerate() {
            if index > 0 {
                f.write_str(" - ")?;
            }
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// A displayed row of text made of styled fragments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    #[serde(default)]
    pub items: Vec<LineItem>,

    /// Speaker for multi-voice cues
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_name: Option<String>,
}

impl Line {
    /// A line with one unstyled fragment
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            items: vec![LineItem::new(text)],
            voice_name: None,
        }
    }
}

/// Fragments joined by a single space
impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, item) in self.items.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&item.text)?;
        }
        Ok(())
    }
}

/// A text fragment with optional styling
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_style: Option<StyleAttributes>,
}

impl LineItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// A named, inheritable bag of presentation attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub id: String,

    #[serde(default)]
    pub attributes: StyleAttributes,

    /// Id of the style this one inherits from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl Style {
    pub fn new(id: impl Into<String>, attributes: StyleAttributes) -> Self {
        Self {
            id: id.into(),
            attributes,
            parent_id: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }
}

/// On-screen placement area
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_style: Option<StyleAttributes>,
}

impl Region {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// Document-level descriptive fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,

    /// Frames per second
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framerate: Option<u32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
}

/// Flat bag of per-format style attributes.
///
/// Every field is optional: `None` means "inherit" or "format default" and
/// the model never fills in a default itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleAttributes {
    // SSA/ASS
    pub ssa_alignment: Option<i32>,
    pub ssa_alpha_level: Option<f64>,
    /// Degrees
    pub ssa_angle: Option<f64>,
    pub ssa_back_colour: Option<Color>,
    pub ssa_bold: Option<bool>,
    pub ssa_border_style: Option<i32>,
    pub ssa_effect: Option<String>,
    pub ssa_encoding: Option<i32>,
    pub ssa_font_name: Option<String>,
    pub ssa_font_size: Option<f64>,
    pub ssa_italic: Option<bool>,
    pub ssa_layer: Option<i32>,
    /// Pixels
    pub ssa_margin_left: Option<i32>,
    pub ssa_margin_right: Option<i32>,
    pub ssa_margin_vertical: Option<i32>,
    pub ssa_marked: Option<bool>,
    pub ssa_outline: Option<i32>,
    pub ssa_outline_colour: Option<Color>,
    pub ssa_primary_colour: Option<Color>,
    /// Percent
    pub ssa_scale_x: Option<f64>,
    pub ssa_scale_y: Option<f64>,
    pub ssa_secondary_colour: Option<Color>,
    pub ssa_shadow: Option<i32>,
    pub ssa_spacing: Option<i32>,
    pub ssa_strikeout: Option<bool>,
    pub ssa_underline: Option<bool>,

    // Teletext
    pub teletext_color: Option<Color>,
    pub teletext_double_height: Option<bool>,
    pub teletext_double_size: Option<bool>,
    pub teletext_double_width: Option<bool>,
    pub teletext_spaces_after: Option<i32>,
    pub teletext_spaces_before: Option<i32>,

    // TTML
    pub ttml_background_color: Option<String>,
    pub ttml_color: Option<String>,
    pub ttml_direction: Option<String>,
    pub ttml_display: Option<String>,
    pub ttml_display_align: Option<String>,
    pub ttml_extent: Option<String>,
    pub ttml_font_family: Option<String>,
    pub ttml_font_size: Option<String>,
    pub ttml_font_style: Option<String>,
    pub ttml_font_weight: Option<String>,
    pub ttml_line_height: Option<String>,
    pub ttml_opacity: Option<String>,
    pub ttml_origin: Option<String>,
    pub ttml_overflow: Option<String>,
    pub ttml_padding: Option<String>,
    pub ttml_show_background: Option<String>,
    pub ttml_text_align: Option<String>,
    pub ttml_text_decoration: Option<String>,
    pub ttml_text_outline: Option<String>,
    pub ttml_unicode_bidi: Option<String>,
    pub ttml_visibility: Option<String>,
    pub ttml_wrap_option: Option<String>,
    pub ttml_writing_mode: Option<String>,
    pub ttml_z_index: Option<i32>,

    // WebVTT
    pub webvtt_align: Option<String>,
    pub webvtt_line: Option<String>,
    pub webvtt_lines: Option<u32>,
    pub webvtt_position: Option<String>,
    pub webvtt_region_anchor: Option<String>,
    pub webvtt_scroll: Option<String>,
    pub webvtt_size: Option<String>,
    pub webvtt_vertical: Option<String>,
    pub webvtt_viewport_anchor: Option<String>,
    pub webvtt_width: Option<String>,
}

macro_rules! inherit_fields {
    ($target:ident, $parent:ident; $($field:ident),+ $(,)?) => {
        $(
            if $target.$field.is_none() {
                $target.$field = $parent.$field.clone();
            }
        )+
    };
}

impl StyleAttributes {
    /// Fill every unset field from `parent`; set fields win.
    pub fn inherit_from(&mut self, parent: &StyleAttributes) {
        inherit_fields!(self, parent;
            ssa_alignment, ssa_alpha_level, ssa_angle, ssa_back_colour, ssa_bold,
            ssa_border_style, ssa_effect, ssa_encoding, ssa_font_name, ssa_font_size,
            ssa_italic, ssa_layer, ssa_margin_left, ssa_margin_right, ssa_margin_vertical,
            ssa_marked, ssa_outline, ssa_outline_colour, ssa_primary_colour, ssa_scale_x,
            ssa_scale_y, ssa_secondary_colour, ssa_shadow, ssa_spacing, ssa_strikeout,
            ssa_underline,
            teletext_color, teletext_double_height, teletext_double_size,
            teletext_double_width, teletext_spaces_after, teletext_spaces_before,
            ttml_background_color, ttml_color, ttml_direction, ttml_display,
            ttml_display_align, ttml_extent, ttml_font_family, ttml_font_size,
            ttml_font_style, ttml_font_weight, ttml_line_height, ttml_opacity,
            ttml_origin, ttml_overflow, ttml_padding, ttml_show_background,
            ttml_text_align, ttml_text_decoration, ttml_text_outline, ttml_unicode_bidi,
            ttml_visibility, ttml_wrap_option, ttml_writing_mode, ttml_z_index,
            webvtt_align, webvtt_line, webvtt_lines, webvtt_position,
            webvtt_region_anchor, webvtt_scroll, webvtt_size, webvtt_vertical,
            webvtt_viewport_anchor, webvtt_width,
        );
    }
}

/// Serde helper storing a `TimeDelta` as signed milliseconds
mod millis {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.num_milliseconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        let milliseconds = i64::deserialize(deserializer)?;
        TimeDelta::try_milliseconds(milliseconds)
            .ok_or_else(|| D::Error::custom(format!("offset out of range: {}ms", milliseconds)))
    }
}
