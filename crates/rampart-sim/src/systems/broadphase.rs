//! Broad-phase re-index: rebuilds the spatial grid from every
//! still-traveling hostile's interpolated position.
//!
//! Full reconstruction every tick is deliberate: at hundreds to low
//! thousands of units it is cheaper and simpler than incremental
//! updates, and it keeps query-result ordering stable within a tick.

use rampart_core::arena::Arena;
use rampart_core::constants::HOSTILE_HALF_EXTENT;
use rampart_core::path::Path;
use rampart_core::units::Hostile;
use rampart_index::{GridBounds, GridElement, SpatialGrid};

pub fn rebuild(
    hostiles: &Arena<Hostile>,
    path: &Path,
    grid: &mut SpatialGrid,
    elements: &mut Vec<GridElement>,
) {
    elements.clear();
    for (slot, hostile) in hostiles.iter() {
        if hostile.is_dead() || hostile.reached_end {
            continue;
        }
        let pos = path.position_between(
            hostile.path_pos.last,
            hostile.path_pos.next,
            hostile.path_pos.progress,
        );
        elements.push(GridElement {
            id: slot.index() as u32,
            bounds: GridBounds {
                cx: pos.x.round() as i32,
                cy: pos.y.round() as i32,
                half_w: HOSTILE_HALF_EXTENT,
                half_h: HOSTILE_HALF_EXTENT,
            },
        });
    }
    grid.construct(elements);
}
