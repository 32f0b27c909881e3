//! Back-to-front face ordering (painter's algorithm).
//!
//! Each face is keyed by the average `view_z` of its vertices and sorted in
//! descending order so the farthest face is painted first. Three strategies
//! are available; they differ in cost and stack behaviour but agree on the
//! resulting key sequence (only the order of exactly equal keys may differ).
//!
//! | Strategy | Stable | Extra memory | Worst-case stack depth |
//! |----------|--------|--------------|------------------------|
//! | [`StableSorter`] | yes | O(n) | O(1) |
//! | [`QuickSorter`] | no | none | O(n) |
//! | [`IterativeQuickSorter`] | no | none | O(log n) |

use std::fmt;

use super::transform::TransformedVertex;
use crate::mesh::Face;

/// A face's position in the mesh paired with its sort key.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthKey {
    /// Average view depth of the face's vertices.
    pub depth: f32,
    /// Index into the mesh's face list.
    pub face: usize,
}

/// Average `view_z` over `indices`.
///
/// Indices must be valid for `vertices`; [`crate::Mesh::validate`] checks
/// this before a frame is drawn.
#[inline]
pub fn average_depth(indices: &[usize], vertices: &[TransformedVertex]) -> f32 {
    let sum: f32 = indices.iter().map(|&i| vertices[i].view_z).sum();
    sum / indices.len() as f32
}

/// Builds one [`DepthKey`] per face, in mesh order.
pub fn depth_keys(faces: &[Face], vertices: &[TransformedVertex]) -> Vec<DepthKey> {
    faces
        .iter()
        .enumerate()
        .map(|(face, f)| DepthKey {
            depth: average_depth(f.indices(), vertices),
            face,
        })
        .collect()
}

/// Orders depth keys farthest-first.
pub trait DepthSorter {
    fn sort(&self, keys: &mut [DepthKey]);
}

/// Library stable sort, descending by depth.
#[derive(Debug, Clone, Copy, Default)]
pub struct StableSorter;

impl DepthSorter for StableSorter {
    fn sort(&self, keys: &mut [DepthKey]) {
        keys.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    }
}

/// Recursive quicksort with a median-of-three pivot and two-way partition.
///
/// Recurses into both partitions, so inputs with many equal keys can drive
/// the recursion depth towards the number of faces.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickSorter;

impl QuickSorter {
    fn quicksort(keys: &mut [DepthKey]) {
        if keys.len() <= 1 {
            return;
        }
        let pivot = Self::partition(keys);
        let (left, right) = keys.split_at_mut(pivot);
        Self::quicksort(left);
        Self::quicksort(&mut right[1..]);
    }

    /// Orders the low, middle and high keys (descending) and moves the
    /// median to the end to serve as the pivot.
    fn median_of_three(keys: &mut [DepthKey]) {
        let high = keys.len() - 1;
        let mid = high / 2;
        if keys[0].depth < keys[mid].depth {
            keys.swap(0, mid);
        }
        if keys[0].depth < keys[high].depth {
            keys.swap(0, high);
        }
        if keys[mid].depth < keys[high].depth {
            keys.swap(mid, high);
        }
        keys.swap(mid, high);
    }

    /// Partitions around the median-of-three pivot: deeper keys to the
    /// left. Returns the pivot's final position.
    fn partition(keys: &mut [DepthKey]) -> usize {
        Self::median_of_three(keys);
        let high = keys.len() - 1;
        let pivot = keys[high].depth;

        let mut store = 0;
        for j in 0..high {
            if keys[j].depth > pivot {
                keys.swap(store, j);
                store += 1;
            }
        }
        keys.swap(store, high);
        store
    }
}

impl DepthSorter for QuickSorter {
    fn sort(&self, keys: &mut [DepthKey]) {
        Self::quicksort(keys);
    }
}

/// Quicksort with Hoare partitioning that recurses only into the smaller
/// partition and loops on the larger one.
#[derive(Debug, Clone, Copy, Default)]
pub struct IterativeQuickSorter;

impl IterativeQuickSorter {
    fn quicksort(mut keys: &mut [DepthKey]) {
        while keys.len() > 1 {
            let split = Self::partition(keys) + 1;
            let (left, right) = std::mem::take(&mut keys).split_at_mut(split);
            if left.len() < right.len() {
                Self::quicksort(left);
                keys = right;
            } else {
                Self::quicksort(right);
                keys = left;
            }
        }
    }

    /// Hoare partition around the middle key. Returns `j` such that every
    /// key in `..=j` is at least as deep as every key in `j + 1..`; both
    /// sides are non-empty.
    fn partition(keys: &mut [DepthKey]) -> usize {
        let pivot = keys[(keys.len() - 1) / 2].depth;
        let mut i = 0;
        let mut j = keys.len() - 1;
        loop {
            while keys[i].depth > pivot {
                i += 1;
            }
            while keys[j].depth < pivot {
                j -= 1;
            }
            if i >= j {
                return j;
            }
            keys.swap(i, j);
            i += 1;
            j -= 1;
        }
    }
}

impl DepthSorter for IterativeQuickSorter {
    fn sort(&self, keys: &mut [DepthKey]) {
        Self::quicksort(keys);
    }
}

/// Selects the depth sorting strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortMethod {
    /// [`StableSorter`]: slowest, exact tie order preserved.
    Stable,
    /// [`QuickSorter`]: recursive median-of-three quicksort.
    Quicksort,
    /// [`IterativeQuickSorter`]: bounded-stack quicksort.
    #[default]
    IterativeQuicksort,
}

impl SortMethod {
    pub const ALL: [SortMethod; 3] = [
        SortMethod::Stable,
        SortMethod::Quicksort,
        SortMethod::IterativeQuicksort,
    ];

    /// The next method in [`SortMethod::ALL`], wrapping around.
    pub fn next(self) -> Self {
        match self {
            SortMethod::Stable => SortMethod::Quicksort,
            SortMethod::Quicksort => SortMethod::IterativeQuicksort,
            SortMethod::IterativeQuicksort => SortMethod::Stable,
        }
    }
}

impl fmt::Display for SortMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMethod::Stable => write!(f, "Stable"),
            SortMethod::Quicksort => write!(f, "Quicksort"),
            SortMethod::IterativeQuicksort => write!(f, "IterativeQuicksort"),
        }
    }
}

impl DepthSorter for SortMethod {
    #[inline]
    fn sort(&self, keys: &mut [DepthKey]) {
        match self {
            SortMethod::Stable => StableSorter.sort(keys),
            SortMethod::Quicksort => QuickSorter.sort(keys),
            SortMethod::IterativeQuicksort => IterativeQuickSorter.sort(keys),
        }
    }
}
