/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Represents the length of a path modulo some fixed, strictly positive modulus. The value is
/// always kept in `0..modulus`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Residue {
    value: usize,
    modulus: usize,
}

impl Residue {
    /// Creates the residue class of `value` modulo `modulus`. Panics if `modulus` is zero.
    pub fn new(value: usize, modulus: usize) -> Self {
        assert!(modulus > 0, "modulus must be strictly positive");
        Self {
            value: value % modulus,
            modulus,
        }
    }

    /// The residue class of the empty word.
    pub fn zero(modulus: usize) -> Self {
        Self::new(0, modulus)
    }

    /// Returns the representative in `0..modulus`.
    pub fn value(&self) -> usize {
        self.value
    }

    /// Returns the modulus.
    pub fn modulus(&self) -> usize {
        self.modulus
    }

    /// The residue after reading one more symbol.
    pub fn advance(self) -> Self {
        Self {
            value: (self.value + 1) % self.modulus,
            modulus: self.modulus,
        }
    }

    /// Undoes [`Self::advance`].
    pub fn retreat(self) -> Self {
        Self {
            value: (self.value + self.modulus - 1) % self.modulus,
            modulus: self.modulus,
        }
    }
}
