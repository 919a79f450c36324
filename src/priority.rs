//! Priorities for the treap's heap order.
//!
//! Each node gets an independent uniform `u64` when it is created. Parents always have
//! a priority at least as high as their children, which keeps the expected depth
//! logarithmic. The depth is not bounded in the worst case; the engine never recurses
//! on depth, so an unlucky shape costs time but not stack.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub(crate) struct Priorities {
    rng: StdRng,
}

impl Priorities {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Priorities { rng }
    }

    pub fn next(&mut self) -> u64 {
        self.rng.gen()
    }
}

#[test]
fn seeded_priorities_repeat() {
    let mut a = Priorities::new(Some(17));
    let mut b = Priorities::new(Some(17));
    let xs: Vec<u64> = (0..8).map(|_| a.next()).collect();
    let ys: Vec<u64> = (0..8).map(|_| b.next()).collect();
    assert_eq!(xs, ys);
}
