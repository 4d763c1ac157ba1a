use rand::Rng;
use uuid::Uuid;

/// Builds a v4-format UUID from the caller-supplied RNG, so ids stay
/// reproducible under a fixed seed.
pub fn generate_uuid(rng: &mut impl Rng) -> Uuid {
    let bytes: [u8; 16] = rng.gen();
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_same_seed_same_uuid() {
        let mut rng1 = ChaCha8Rng::seed_from_u64(42);
        let mut rng2 = ChaCha8Rng::seed_from_u64(42);
        let id1 = generate_uuid(&mut rng1);
        let id2 = generate_uuid(&mut rng2);
        assert_eq!(id1, id2);
        assert_eq!(id1.get_version(), Some(uuid::Version::Random));
    }

    #[test]
    fn test_different_seeds_different_uuids() {
        let mut rng1 = ChaCha8Rng::seed_from_u64(42);
        let mut rng2 = ChaCha8Rng::seed_from_u64(99);
        assert_ne!(generate_uuid(&mut rng1), generate_uuid(&mut rng2));
    }
}
