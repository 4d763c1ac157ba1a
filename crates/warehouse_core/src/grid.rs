//! Tile resolution: mapping a grid position to whatever the player is
//! standing on.

use crate::slots::SlotStore;
use crate::{LayoutDef, SlotId};

/// What occupies a given tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileHit {
    Slot(SlotId),
    Shipping,
    Receiving,
    Floor,
}

/// Resolves a tile to a slot or zone. Slots win over zones; rack tiles are
/// never placed inside zone rects by valid content.
pub fn resolve_tile(slots: &SlotStore, layout: &LayoutDef, x: i32, y: i32) -> TileHit {
    if let Some(slot) = slots.at(x, y) {
        return TileHit::Slot(slot.id.clone());
    }
    if layout.shipping_zone.contains(x, y) {
        return TileHit::Shipping;
    }
    if layout.receiving_zone.contains(x, y) {
        return TileHit::Receiving;
    }
    TileHit::Floor
}

/// Converts a continuous pixel position to a tile coordinate by integer
/// division (floor for negatives, so off-grid positions resolve sanely).
pub fn tile_of(px: f32, py: f32, tile_size: u32) -> (i32, i32) {
    let size = tile_size.max(1) as f32;
    #[allow(clippy::cast_possible_truncation)]
    let tile = ((px / size).floor() as i32, (py / size).floor() as i32);
    tile
}
