/*!
 * Timing algebra over a document's items.
 *
 * Ordering, shifting, duration forcing, fragmentation, unfragmentation and
 * merging. Every operation is synchronous and deterministic and mutates the
 * document it is called on.
 */

use chrono::TimeDelta;
use log::{debug, warn};

use crate::model::{Document, Item};

/// Text of the filler item appended by `force_duration`
pub const PLACEHOLDER_TEXT: &str = "...";

impl Document {
    /// Whether the document has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Stable sort of items by start offset
    pub fn order(&mut self) {
        self.items.sort_by_key(|item| item.start_at);
    }

    /// Shift every item by `delta`; negative offsets are kept as-is
    pub fn add(&mut self, delta: TimeDelta) {
        for item in &mut self.items {
            item.start_at += delta;
            item.end_at += delta;
        }
    }

    /// End offset of the last item, or zero for an empty document.
    ///
    /// Only meaningful once the items are ordered.
    pub fn duration(&self) -> TimeDelta {
        self.items
            .last()
            .map(|item| item.end_at)
            .unwrap_or_else(TimeDelta::zero)
    }

    /// Make `duration()` equal `target`.
    ///
    /// A longer document is cut: the first item starting at or after `target`
    /// and everything behind it are dropped, and earlier items ending past
    /// `target` are clamped. A document that is then still shorter gets a
    /// one-millisecond placeholder item ending at `target`.
    ///
    /// With a zero target every item starting at or after zero is dropped and
    /// items straddling zero end at it; an empty result stays empty with
    /// duration 0.
    pub fn force_duration(&mut self, target: TimeDelta) {
        if self.duration() == target {
            return;
        }

        if self.duration() > target {
            let mut cutoff = None;
            for (index, item) in self.items.iter_mut().enumerate() {
                if item.start_at >= target {
                    cutoff = Some(index);
                    break;
                }
                if item.end_at > target {
                    item.end_at = target;
                }
            }
            if let Some(index) = cutoff {
                debug!("Dropping {} items starting at or after {:?}", self.items.len() - index, target);
                self.items.truncate(index);
            }
        }

        if self.duration() < target {
            self.items.push(Item::with_text(
                target - TimeDelta::milliseconds(1),
                target,
                PLACEHOLDER_TEXT,
            ));
        }
    }

    /// Split items at every multiple of `fragment_size`.
    ///
    /// Boundaries run from `fragment_size` up to, excluding, the end of the
    /// last item. Each item strictly containing a boundary is replaced by
    /// two items meeting at the boundary, carrying the same lines, comments,
    /// style and region. Items are ordered afterwards.
    pub fn fragment(&mut self, fragment_size: TimeDelta) {
        if self.items.is_empty() {
            return;
        }
        if fragment_size <= TimeDelta::zero() {
            warn!("Ignoring non-positive fragment size {:?}", fragment_size);
            return;
        }

        let limit = self.duration();
        let snapshot = std::mem::take(&mut self.items);
        let original_count = snapshot.len();
        let mut fragmented = Vec::with_capacity(original_count);

        for item in snapshot {
            let mut boundary = first_boundary_after(item.start_at, fragment_size);
            let mut rest = item;
            while let Some(cut) = boundary {
                if cut >= limit || cut >= rest.end_at {
                    break;
                }
                let mut head = rest.clone();
                head.end_at = cut;
                rest.start_at = cut;
                fragmented.push(head);
                boundary = cut.checked_add(&fragment_size);
            }
            fragmented.push(rest);
        }

        debug!("Fragmented {} items into {}", original_count, fragmented.len());
        self.items = fragmented;
        self.order();
    }

    /// Merge consecutive items rendering the same text when the first ends
    /// exactly where the second starts. Items are ordered afterwards.
    ///
    /// Only the rendered text is compared; styles, regions and comments of
    /// the later item are dropped with it.
    pub fn unfragment(&mut self) {
        if self.items.len() <= 1 {
            return;
        }

        let snapshot = std::mem::take(&mut self.items);
        let mut merged: Vec<Item> = Vec::with_capacity(snapshot.len());
        let mut rendered = String::new();

        for item in snapshot {
            if let Some(previous) = merged.last_mut() {
                let text = item.to_string();
                if previous.end_at == item.start_at && rendered == text {
                    previous.end_at = item.end_at;
                    continue;
                }
                rendered = text;
            } else {
                rendered = item.to_string();
            }
            merged.push(item);
        }

        debug!("Unfragmented into {} items", merged.len());
        self.items = merged;
        self.order();
    }

    /// Append `other`'s items and order the result.
    ///
    /// Regions and styles are unioned by id; on a clash the receiver's
    /// definition is kept.
    pub fn merge(&mut self, other: Document) {
        self.items.extend(other.items);
        self.order();

        for (id, region) in other.regions {
            self.regions.entry(id).or_insert(region);
        }
        for (id, style) in other.styles {
            self.styles.entry(id).or_insert(style);
        }
    }
}

// Smallest positive multiple of `size` strictly after `start`
fn first_boundary_after(start: TimeDelta, size: TimeDelta) -> Option<TimeDelta> {
    let start = start.num_nanoseconds()?;
    let size = size.num_nanoseconds()?;
    let index = start.div_euclid(size).checked_add(1)?.max(1);
    index.checked_mul(size).map(TimeDelta::nanoseconds)
}
