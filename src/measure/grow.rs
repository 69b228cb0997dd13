//! Breadth-first region growing.

use std::collections::VecDeque;

use super::background::BackgroundColor;
use super::region::{Bounds, GrownRegion, PixelCoord, Region};
use crate::photo::Photo;

/// Pixels already claimed by a region during one segmentation pass.
///
/// One mask belongs to exactly one analysis call and is threaded by mutable
/// reference through every growth started in that call.
#[derive(Clone, Debug)]
pub struct VisitedMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
    marked: usize,
}

impl VisitedMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
            marked: 0,
        }
    }

    #[inline]
    fn index(&self, p: PixelCoord) -> usize {
        p.y as usize * self.width as usize + p.x as usize
    }

    #[inline]
    pub fn is_visited(&self, p: PixelCoord) -> bool {
        self.cells[self.index(p)]
    }

    /// Marks `p`, returning false if it was already marked.
    #[inline]
    pub fn mark(&mut self, p: PixelCoord) -> bool {
        let idx = self.index(p);
        if self.cells[idx] {
            return false;
        }
        self.cells[idx] = true;
        self.marked += 1;
        true
    }

    /// Number of marked pixels.
    #[inline]
    pub fn count(&self) -> usize {
        self.marked
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Parameters shared by every growth of one pass.
#[derive(Clone, Copy, Debug)]
pub struct GrowParams {
    pub background: BackgroundColor,
    pub sensitivity: f64,
    /// Distance between probed neighbours.
    pub step: u32,
}

/// The four axis-aligned neighbours of `p` at distance `step` that lie
/// inside a `width × height` grid.
///
/// Probing by column and row instead of by flat index means a left or right
/// neighbour can never wrap onto the adjacent row.
fn lattice_neighbors(
    p: PixelCoord,
    step: u32,
    width: u32,
    height: u32,
) -> impl Iterator<Item = PixelCoord> {
    let left = p.x.checked_sub(step).map(|x| PixelCoord::new(x, p.y));
    let right = p
        .x
        .checked_add(step)
        .filter(|&x| x < width)
        .map(|x| PixelCoord::new(x, p.y));
    let up = p.y.checked_sub(step).map(|y| PixelCoord::new(p.x, y));
    let down = p
        .y
        .checked_add(step)
        .filter(|&y| y < height)
        .map(|y| PixelCoord::new(p.x, y));
    [left, right, up, down].into_iter().flatten()
}

/// Grows one region from `seed`.
///
/// Every pixel reachable from the seed through foreground neighbours at
/// `params.step` distance is marked in `visited` and recorded as a member.
/// The seed itself is accepted unconditionally; callers only seed on
/// foreground pixels. Each pixel is enqueued at most once, so the loop is
/// bounded by the photo's pixel count.
pub fn grow_region(
    photo: &Photo,
    visited: &mut VisitedMask,
    seed: PixelCoord,
    params: &GrowParams,
) -> GrownRegion {
    let (width, height) = (photo.width(), photo.height());

    let mut queue = VecDeque::new();
    let mut members = Vec::new();
    visited.mark(seed);
    queue.push_back(seed);

    let (mut min_x, mut min_y) = (seed.x, seed.y);
    let (mut max_x, mut max_y) = (seed.x, seed.y);

    while let Some(p) = queue.pop_front() {
        members.push(p);
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);

        for n in lattice_neighbors(p, params.step, width, height) {
            if visited.is_visited(n) {
                continue;
            }
            if !params
                .background
                .is_foreground(photo.pixel(n.x, n.y), params.sensitivity)
            {
                continue;
            }
            visited.mark(n);
            queue.push_back(n);
        }
    }

    let region = Region::new(
        Bounds::from_corners(min_x, min_y, max_x, max_y),
        members.len() as u32,
    );
    GrownRegion { region, members }
}
