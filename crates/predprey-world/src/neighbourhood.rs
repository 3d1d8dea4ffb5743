//! Neighbour selection for the supported topologies.
//!
//! Every query returns the neighbour indices of one cell in a random order so
//! that the first suitable neighbour picked by the engine carries no
//! directional bias.

use predprey_core::{Position, Topology};
use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::Deref;

/// Largest neighbourhood of any topology
pub const MAX_NEIGHBOURS: usize = 8;

const ORTHOGONAL: [(i32, i32); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

const MOORE: [(i32, i32); 8] = [
    (-1, 0),
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, -1),
    (1, -1),
    (1, 1),
    (-1, 1),
];

/// Shuffled neighbour indices of a single cell, stored inline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbours {
    indices: [usize; MAX_NEIGHBOURS],
    len: usize,
}

impl Neighbours {
    fn new() -> Self {
        Self {
            indices: [0; MAX_NEIGHBOURS],
            len: 0,
        }
    }

    fn push(&mut self, index: usize) {
        self.indices[self.len] = index;
        self.len += 1;
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices[..self.len]
    }
}

impl Deref for Neighbours {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        self.as_slice()
    }
}

/// Neighbour indices of `pos` on a `width` x `height` grid, shuffled with `rng`.
///
/// `pos` must lie inside the grid. Bounded topologies omit neighbours past an
/// edge; wrapped topologies always return the full neighbourhood.
pub fn neighbours<R: Rng + ?Sized>(
    topology: Topology,
    pos: Position,
    width: usize,
    height: usize,
    rng: &mut R,
) -> Neighbours {
    let offsets: &[(i32, i32)] = match topology {
        Topology::Four | Topology::FourWrapped => &ORTHOGONAL,
        Topology::Eight | Topology::EightWrapped => &MOORE,
    };

    let mut out = Neighbours::new();
    for &(dx, dy) in offsets {
        let mut neighbour = pos.add(dx, dy);
        if topology.wraps() {
            neighbour = neighbour.wrap(width as i32, height as i32);
        } else if !neighbour.within(width, height) {
            continue;
        }
        out.push(neighbour.y as usize * width + neighbour.x as usize);
    }

    // Fisher-Yates
    out.indices[..out.len].shuffle(rng);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sorted(n: &Neighbours) -> Vec<usize> {
        let mut v = n.to_vec();
        v.sort_unstable();
        v
    }

    #[test]
    fn test_four_bounded_corner_and_edge() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let corner = neighbours(Topology::Four, Position::new(0, 0), 5, 4, &mut rng);
        assert_eq!(sorted(&corner), vec![1, 5]);

        let edge = neighbours(Topology::Four, Position::new(2, 0), 5, 4, &mut rng);
        assert_eq!(sorted(&edge), vec![1, 3, 7]);
    }

    #[test]
    fn test_eight_bounded_corner_and_edge() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let corner = neighbours(Topology::Eight, Position::new(4, 3), 5, 4, &mut rng);
        assert_eq!(sorted(&corner), vec![13, 14, 18]);

        let edge = neighbours(Topology::Eight, Position::new(0, 1), 5, 4, &mut rng);
        assert_eq!(sorted(&edge), vec![0, 1, 6, 10, 11]);
    }

    #[test]
    fn test_four_wrapped_origin() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let (w, h) = (5, 4);
        let n = neighbours(Topology::FourWrapped, Position::new(0, 0), w, h, &mut rng);
        // left wraps to (w-1, 0), up wraps to (0, h-1)
        assert_eq!(sorted(&n), vec![1, w - 1, w, (h - 1) * w]);
    }

    #[test]
    fn test_eight_wrapped_origin() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let n = neighbours(Topology::EightWrapped, Position::new(0, 0), 3, 3, &mut rng);
        assert_eq!(sorted(&n), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_same_seed_same_order() {
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..10 {
            let na = neighbours(Topology::Eight, Position::new(2, 2), 5, 5, &mut a);
            let nb = neighbours(Topology::Eight, Position::new(2, 2), 5, 5, &mut b);
            assert_eq!(na, nb);
        }
    }

    #[test]
    fn test_shuffle_visits_every_direction_first() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut firsts = std::collections::HashSet::new();
        for _ in 0..200 {
            let n = neighbours(Topology::Four, Position::new(1, 1), 3, 3, &mut rng);
            firsts.insert(n[0]);
        }
        assert_eq!(firsts.len(), 4);
    }

    fn expected_bounded(topology: Topology, x: usize, y: usize, w: usize, h: usize) -> usize {
        let left = x > 0;
        let right = x + 1 < w;
        let up = y > 0;
        let down = y + 1 < h;
        let orthogonal = [left, right, up, down].iter().filter(|&&b| b).count();
        match topology {
            Topology::Four => orthogonal,
            _ => {
                let diagonal = [left && up, right && up, left && down, right && down]
                    .iter()
                    .filter(|&&b| b)
                    .count();
                orthogonal + diagonal
            }
        }
    }

    proptest! {
        #[test]
        fn prop_bounded_counts(w in 2usize..40, h in 2usize..40, fx in 0.0f64..1.0, fy in 0.0f64..1.0, seed in any::<u64>()) {
            let x = ((w as f64) * fx) as usize;
            let y = ((h as f64) * fy) as usize;
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for topology in [Topology::Four, Topology::Eight] {
                let n = neighbours(topology, Position::new(x as i32, y as i32), w, h, &mut rng);
                prop_assert_eq!(n.len(), expected_bounded(topology, x, y, w, h));
                prop_assert!(n.iter().all(|&i| i < w * h && i != y * w + x));
                let interior = x > 0 && y > 0 && x + 1 < w && y + 1 < h;
                if interior {
                    prop_assert_eq!(n.len(), topology.max_neighbours());
                }
            }
        }

        #[test]
        fn prop_wrapped_always_full(w in 3usize..40, h in 3usize..40, fx in 0.0f64..1.0, fy in 0.0f64..1.0, seed in any::<u64>()) {
            let x = ((w as f64) * fx) as usize;
            let y = ((h as f64) * fy) as usize;
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for topology in [Topology::FourWrapped, Topology::EightWrapped] {
                let n = neighbours(topology, Position::new(x as i32, y as i32), w, h, &mut rng);
                prop_assert_eq!(n.len(), topology.max_neighbours());
                let unique: std::collections::HashSet<_> = n.iter().copied().collect();
                prop_assert_eq!(unique.len(), n.len());

                let left = y * w + (x + w - 1) % w;
                let right = y * w + (x + 1) % w;
                prop_assert!(n.contains(&left));
                prop_assert!(n.contains(&right));
            }
        }
    }
}
