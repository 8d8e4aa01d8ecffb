//! Binary per-trial infection samples.

/// Ever-infected flags for one trial, one entry per node in index order.
///
/// Entries are `0` or `1` by construction.
///
/// # Examples
/// ```
/// use kansen_core::Sample;
///
/// let sample = Sample::from_flags([true, false, true]);
/// assert_eq!(sample.as_slice(), &[1, 0, 1]);
/// assert_eq!(sample.infected_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sample(Vec<u8>);

impl Sample {
    /// Builds a sample from per-node infection flags.
    #[must_use]
    pub fn from_flags(flags: impl IntoIterator<Item = bool>) -> Self {
        Self(flags.into_iter().map(u8::from).collect())
    }

    /// Returns the entries as a slice of zeros and ones.
    #[rustfmt::skip]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] { &self.0 }

    /// Returns the number of entries.
    #[rustfmt::skip]
    #[must_use]
    pub fn len(&self) -> usize { self.0.len() }

    /// Returns whether the sample has no entries.
    #[rustfmt::skip]
    #[must_use]
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Returns whether node `index` was ever infected.
    #[must_use]
    pub fn is_infected(&self, index: usize) -> bool {
        self.0.get(index).is_some_and(|&flag| flag == 1)
    }

    /// Counts the infected entries.
    #[must_use]
    pub fn infected_count(&self) -> usize {
        self.0.iter().filter(|&&flag| flag == 1).count()
    }
}

impl AsRef<[u8]> for Sample {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
