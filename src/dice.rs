//! Dice primitives.
//!
//! All combat randomness flows through these three functions and an injected
//! `Rng`, so battles are reproducible from a seed in tests. The d66 (two d6
//! summed) is the base unit of combat randomness; it is bell-shaped rather
//! than uniform, which keeps extreme swings rare.

use rand::Rng;

/// Rolls a single d6.
pub fn d6(rng: &mut impl Rng) -> u32 {
    rng.gen_range(1..=6)
}

/// Rolls a d66: the sum of two d6, 2..=12.
pub fn d66(rng: &mut impl Rng) -> u32 {
    d6(rng) + d6(rng)
}

/// Returns true with probability `percent` / 100. Values above 100 always
/// succeed, zero never does.
pub fn percent_check(rng: &mut impl Rng, percent: u32) -> bool {
    if percent == 0 {
        return false;
    }
    rng.gen_range(0..100) < percent
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_d6_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..1000 {
            let roll = d6(&mut rng);
            assert!((1..=6).contains(&roll));
        }
    }

    #[test]
    fn test_d66_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..1000 {
            let roll = d66(&mut rng);
            assert!((2..=12).contains(&roll));
        }
    }

    #[test]
    fn test_d66_is_bell_shaped() {
        // 7 is the most likely sum of two d6; 2 and 12 the least likely.
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut counts = [0u32; 13];
        for _ in 0..10_000 {
            counts[d66(&mut rng) as usize] += 1;
        }
        assert!(counts[7] > counts[2] * 2);
        assert!(counts[7] > counts[12] * 2);
    }

    #[test]
    fn test_percent_check_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..100 {
            assert!(percent_check(&mut rng, 100));
            assert!(!percent_check(&mut rng, 0));
        }
    }

    #[test]
    fn test_percent_check_deterministic_with_seed() {
        let mut a = ChaCha8Rng::seed_from_u64(5);
        let mut b = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..100 {
            assert_eq!(percent_check(&mut a, 40), percent_check(&mut b, 40));
        }
    }
}
