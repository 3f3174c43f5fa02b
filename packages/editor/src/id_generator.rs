use uuid::Uuid;

/// Length of the random session seed, in hex characters
const SEED_LEN: usize = 12;

/// Generate a fresh random session seed
pub fn session_seed() -> String {
    let mut seed = Uuid::new_v4().simple().to_string();
    seed.truncate(SEED_LEN);
    seed
}

/// Sequential ID generator for nodes created during one editing session.
///
/// IDs look like `<prefix>-<seed>-<n>`. The seed is random per session so
/// ids minted now never collide with ids persisted by earlier sessions.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::from_seed(session_seed())
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self, prefix: &str) -> String {
        self.count += 1;
        format!("{}-{}-{}", prefix, self.seed, self.count)
    }

    /// Id for a synthetic column slot
    pub fn new_slot_id(&mut self) -> String {
        self.new_id("col")
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Number of ids issued so far
    pub fn issued(&self) -> u64 {
        self.count
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::from_seed("abc");

        let id1 = gen.new_id("heading");
        let id2 = gen.new_id("heading");
        let id3 = gen.new_slot_id();

        assert_eq!(id1, "heading-abc-1");
        assert_eq!(id2, "heading-abc-2");
        assert_eq!(id3, "col-abc-3");
        assert_eq!(gen.issued(), 3);
    }

    #[test]
    fn test_sessions_use_distinct_seeds() {
        let a = IdGenerator::new();
        let b = IdGenerator::new();

        assert_eq!(a.seed().len(), SEED_LEN);
        assert_ne!(a.seed(), b.seed());
    }
}
