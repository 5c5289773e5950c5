/// What to do when the stored collection does not decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorruptionPolicy {
    /// Keep the raw payload under `<key>.corrupt`, log a warning, and start
    /// over from the seed set.
    #[default]
    Reseed,
    /// Refuse to open the store.
    Fail,
}

/// Options for opening an entity store.
#[derive(Debug, Clone)]
pub struct StoreOptions<R> {
    /// Corrupt stored data handling.
    pub corruption: CorruptionPolicy,

    /// Category selected right after opening. None selects the wildcard.
    pub initial_category: Option<String>,

    pub(crate) seed: Option<Vec<R>>,
}

impl<R> Default for StoreOptions<R> {
    fn default() -> Self {
        Self {
            corruption: CorruptionPolicy::default(),
            initial_category: None,
            seed: None,
        }
    }
}

impl<R> StoreOptions<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_corruption_policy(mut self, policy: CorruptionPolicy) -> Self {
        self.corruption = policy;
        self
    }

    pub fn with_initial_category(mut self, category: impl Into<String>) -> Self {
        self.initial_category = Some(category.into());
        self
    }

    /// Collection used when nothing is stored yet (or after a reseed).
    pub fn with_seed(mut self, seed: Vec<R>) -> Self {
        self.seed = Some(seed);
        self
    }
}
