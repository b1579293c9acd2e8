use crate::common::UInt;
use rand::{
    distributions::{Distribution, Uniform},
    seq::SliceRandom,
    Rng,
};

/// The physical dice behind a [`DiceBag`](super::DiceBag).
pub trait Roller {
    /// One die, `1..=sides`.
    fn roll(&mut self, sides: UInt) -> UInt;

    /// A fresh pool of `count` dice in the order they were thrown.
    fn roll_pool(&mut self, count: UInt, sides: UInt) -> Vec<UInt> {
        (0..count).map(|_| self.roll(sides)).collect()
    }

    /// Reorders faces for display.
    fn shuffle(&mut self, faces: &mut [UInt]);
}

impl<R: Rng> Roller for R {
    fn roll(&mut self, sides: UInt) -> UInt {
        self.gen_range(1..=sides)
    }

    fn roll_pool(&mut self, count: UInt, sides: UInt) -> Vec<UInt> {
        let die = Uniform::new_inclusive(1, sides);
        (0..count).map(|_| die.sample(self)).collect()
    }

    fn shuffle(&mut self, faces: &mut [UInt]) {
        faces.shuffle(self)
    }
}

#[cfg(test)]
pub(crate) use cycling::CyclingRoller;


#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_rng_pool_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let faces = rng.roll_pool(200, 6);
        assert_eq!(faces.len(), 200);
        assert!(faces.iter().all(|f| (1..=6).contains(f)));
        assert!(rng.roll_pool(0, 6).is_empty());
    }

    #[test]
    fn test_rng_shuffle_keeps_faces() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut faces: Vec<UInt> = (1..=20).collect();
        rng.shuffle(&mut faces);
        faces.sort_unstable();
        assert_eq!(faces, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_cycling_roller_wraps() {
        let mut roller = CyclingRoller::new(5, 1);
        assert_eq!(roller.roll_pool(4, 6), vec![5, 6, 1, 2]);
        assert_eq!(roller.roll(6), 3);

        let mut stuck = CyclingRoller::new(4, 0);
        assert_eq!(stuck.roll_pool(3, 10), vec![4, 4, 4]);
    }
}
