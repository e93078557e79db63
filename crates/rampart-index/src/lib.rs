//! Uniform-grid broad-phase spatial index.
//!
//! Rebuilt from scratch every simulation tick from the current hostile
//! positions, then queried by defenders and projectiles. The rebuild
//! uses a counting-sort bucket layout: one pass counts element-cell
//! memberships per hash slot, an in-place prefix sum turns the counts
//! into bucket offsets, and a second pass scatters elements into a
//! single flat array. No per-bucket allocation, ever.
//!
//! Queries return *candidates* that share a grid cell with the query
//! region; hash collisions and cell granularity both produce false
//! positives, so callers must apply a precise distance test before
//! treating a candidate as a hit.

use thiserror::Error;

/// Errors emitted when configuring the index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Configuration values that cannot be used (e.g. non-positive
    /// cell size).
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

/// Axis-aligned bounding box in integer world units: center plus
/// half-extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    pub cx: i32,
    pub cy: i32,
    pub half_w: i32,
    pub half_h: i32,
}

impl GridBounds {
    /// Append the hash key of every grid cell this box overlaps.
    /// A large box may span multiple cells and thus yield multiple
    /// keys.
    fn push_keys(&self, cell_size: i32, out: &mut Vec<u32>) {
        let left = (self.cx - self.half_w).div_euclid(cell_size);
        let right = (self.cx + self.half_w).div_euclid(cell_size);
        let top = (self.cy - self.half_h).div_euclid(cell_size);
        let bottom = (self.cy + self.half_h).div_euclid(cell_size);
        for x in left..=right {
            for y in top..=bottom {
                out.push(hash_coords(x, y));
            }
        }
    }
}

/// One indexed element: an opaque id (the owner's arena slot) plus its
/// bounding box.
#[derive(Debug, Clone, Copy)]
pub struct GridElement {
    pub id: u32,
    pub bounds: GridBounds,
}

/// Multiplicative hash of 2D cell coordinates. Runs for every
/// element-cell membership every tick, so it stays branch-free.
fn hash_coords(x: i32, y: i32) -> u32 {
    (x.wrapping_mul(92_837_111) ^ y.wrapping_mul(689_287_499)).unsigned_abs()
}

/// The broad-phase grid. Fixed capacity; reconstructed wholesale each
/// tick rather than updated incrementally.
pub struct SpatialGrid {
    table_size: usize,
    cell_size: i32,
    max_elements: usize,
    /// Bucket offsets, one per hash slot plus a guard entry.
    table: Vec<u32>,
    /// Flat element storage, scattered by bucket. An element spanning
    /// several cells appears once per cell.
    slots: Vec<GridElement>,
    /// Per-element-id "already found this query" dedup flags, grown in
    /// `construct` to cover the largest id seen.
    found: Vec<bool>,

    // Reused scratch, to avoid per-tick allocation.
    keys: Vec<u32>,
    key_spans: Vec<(u32, u32)>,
    query_keys: Vec<u32>,
    dedup_ids: Vec<u32>,
}

impl SpatialGrid {
    /// Create a grid. A good rule of thumb: `cell_size` around twice
    /// the radius of the average element, `table_size` around twice
    /// `max_elements`.
    pub fn new(
        table_size: usize,
        cell_size: i32,
        max_elements: usize,
    ) -> Result<Self, IndexError> {
        if table_size == 0 {
            return Err(IndexError::InvalidConfig("table_size must be positive"));
        }
        if cell_size <= 0 {
            return Err(IndexError::InvalidConfig("cell_size must be positive"));
        }
        if max_elements == 0 {
            return Err(IndexError::InvalidConfig("max_elements must be positive"));
        }
        Ok(Self {
            table_size,
            cell_size,
            max_elements,
            table: vec![0; table_size + 1],
            slots: vec![
                GridElement {
                    id: 0,
                    bounds: GridBounds {
                        cx: 0,
                        cy: 0,
                        half_w: 0,
                        half_h: 0
                    },
                };
                max_elements
            ],
            found: Vec::new(),
            keys: Vec::with_capacity(1024),
            key_spans: Vec::with_capacity(512),
            query_keys: Vec::with_capacity(64),
            dedup_ids: Vec::with_capacity(256),
        })
    }

    /// Drop all elements. `construct` implies this, but the owner may
    /// also clear explicitly between matches.
    pub fn clear(&mut self) {
        self.table.iter_mut().for_each(|c| *c = 0);
    }

    /// Rebuild the grid from the given elements. All elements for a
    /// collision problem must be passed at once.
    ///
    /// Panics if the total element-cell memberships exceed the
    /// configured capacity; that is a fatal configuration error, not
    /// a runtime condition to tolerate.
    pub fn construct(&mut self, elements: &[GridElement]) {
        self.clear();

        if let Some(max_id) = elements.iter().map(|e| e.id).max() {
            if self.found.len() <= max_id as usize {
                self.found.resize(max_id as usize + 1, false);
            }
        }

        // Pass 1: compute each element's cell keys and count
        // memberships per hash slot.
        self.keys.clear();
        self.key_spans.clear();
        for element in elements {
            let start = self.keys.len() as u32;
            element.bounds.push_keys(self.cell_size, &mut self.keys);
            let len = self.keys.len() as u32 - start;
            self.key_spans.push((start, len));
            for &key in &self.keys[start as usize..] {
                self.table[key as usize % self.table_size] += 1;
            }
        }

        // Pass 2: prefix-sum the counts in place so each slot holds the
        // end offset of its bucket.
        for i in 1..self.table.len() {
            self.table[i] += self.table[i - 1];
        }

        // Pass 3: scatter elements into their buckets by walking the
        // offsets backwards.
        for (element, &(start, len)) in elements.iter().zip(&self.key_spans) {
            for &key in &self.keys[start as usize..(start + len) as usize] {
                let hash_idx = key as usize % self.table_size;
                self.table[hash_idx] -= 1;
                let slot = self.table[hash_idx] as usize;
                assert!(
                    slot < self.max_elements,
                    "spatial grid capacity exceeded: {} element-cell memberships, max {}",
                    self.keys.len(),
                    self.max_elements
                );
                self.slots[slot] = *element;
            }
        }
    }

    /// Collect the ids of all candidate elements whose cells overlap
    /// `bounds` into `out` (cleared first). Each element appears at
    /// most once even when it spans several queried cells.
    pub fn query_into(&mut self, bounds: GridBounds, out: &mut Vec<u32>) {
        out.clear();
        self.query_keys.clear();
        bounds.push_keys(self.cell_size, &mut self.query_keys);

        self.dedup_ids.clear();
        for i in 0..self.query_keys.len() {
            let hash_idx = self.query_keys[i] as usize % self.table_size;
            let start = self.table[hash_idx] as usize;
            let end = self.table[hash_idx + 1] as usize;
            for slot in start..end {
                let id = self.slots[slot].id;
                if !self.found[id as usize] {
                    self.found[id as usize] = true;
                    out.push(id);
                    self.dedup_ids.push(id);
                }
            }
        }

        // Reset the dedup flags for the next query.
        for &id in &self.dedup_ids {
            self.found[id as usize] = false;
        }
    }
}
