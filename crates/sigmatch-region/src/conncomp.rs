//! Connected component analysis
//!
//! Ink pixels are grouped into 8-connected components with a two-pass
//! Union-Find (disjoint set) labeling. Labels are numbered from 1 in
//! raster order of each component's first pixel; 0 marks background.

use sigmatch_core::{BinaryMask, ImageBox};

/// A connected component of ink pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedComponent {
    /// Label of this component (1-based)
    pub label: u32,
    /// Number of pixels in this component
    pub pixel_count: u64,
    /// Bounding box of this component
    pub bounds: ImageBox,
    /// First pixel in raster order: top-most row, then left-most column
    pub first_pixel: (u32, u32),
}

/// Disjoint set over provisional labels
struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    fn new() -> Self {
        // slot 0 is background
        Self { parent: vec![0] }
    }

    fn make_set(&mut self) -> u32 {
        let id = self.parent.len() as u32;
        self.parent.push(id);
        id
    }

    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grand = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grand;
            x = grand;
        }
        x
    }

    fn union(&mut self, a: u32, b: u32) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[hi as usize] = lo;
        }
    }
}

/// Label every ink pixel with its 8-connected component.
///
/// Returns the row-major label map and the components ordered by label.
pub fn label_components(mask: &BinaryMask) -> (Vec<u32>, Vec<ConnectedComponent>) {
    let w = mask.width() as usize;
    let h = mask.height() as usize;
    let mut labels = vec![0u32; w * h];
    let mut sets = UnionFind::new();

    // First pass: provisional labels from the already-visited neighbors
    // W, NW, N, NE
    for y in 0..h {
        for x in 0..w {
            if !mask.is_ink(x as u32, y as u32) {
                continue;
            }
            let mut current = 0u32;
            let neighbors = [
                (x as i64 - 1, y as i64),
                (x as i64 - 1, y as i64 - 1),
                (x as i64, y as i64 - 1),
                (x as i64 + 1, y as i64 - 1),
            ];
            for (nx, ny) in neighbors {
                if nx < 0 || ny < 0 || nx as usize >= w {
                    continue;
                }
                let l = labels[ny as usize * w + nx as usize];
                if l == 0 {
                    continue;
                }
                if current == 0 {
                    current = l;
                } else {
                    sets.union(current, l);
                }
            }
            if current == 0 {
                current = sets.make_set();
            }
            labels[y * w + x] = current;
        }
    }

    // Second pass: resolve to compact final labels in raster order
    let mut final_of_root = vec![0u32; sets.parent.len()];
    let mut extents: Vec<(u32, u32, u32, u32)> = Vec::new();
    let mut components: Vec<ConnectedComponent> = Vec::new();
    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            if labels[idx] == 0 {
                continue;
            }
            let root = sets.find(labels[idx]) as usize;
            if final_of_root[root] == 0 {
                components.push(ConnectedComponent {
                    label: components.len() as u32 + 1,
                    pixel_count: 0,
                    bounds: ImageBox::default(),
                    first_pixel: (x as u32, y as u32),
                });
                extents.push((x as u32, y as u32, x as u32, y as u32));
                final_of_root[root] = components.len() as u32;
            }
            let label = final_of_root[root];
            labels[idx] = label;

            let slot = label as usize - 1;
            components[slot].pixel_count += 1;
            let e = &mut extents[slot];
            e.0 = e.0.min(x as u32);
            e.1 = e.1.min(y as u32);
            e.2 = e.2.max(x as u32);
            e.3 = e.3.max(y as u32);
        }
    }

    for (component, &(x0, y0, x1, y1)) in components.iter_mut().zip(&extents) {
        component.bounds = ImageBox::new(x0, y0, x1 - x0 + 1, y1 - y0 + 1);
    }

    (labels, components)
}

/// Find all 8-connected ink components.
pub fn find_components(mask: &BinaryMask) -> Vec<ConnectedComponent> {
    label_components(mask).1
}
