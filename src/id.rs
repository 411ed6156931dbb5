/// Sequential id generator.
///
/// Hands out `1`, `2`, `3`, ... and never goes back, so an id is never reused
/// after the record holding it is deleted. Once `u64::MAX` has been handed out
/// the generator is exhausted.
#[derive(Debug, Clone, Copy)]
pub struct IdGenerator {
    next: Option<u64>,
}

impl IdGenerator {
    /// Creates a generator whose first id is `1`.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: Some(1) }
    }

    /// Creates a generator that continues after `last`.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_service::id::IdGenerator;
    ///
    /// let mut g = IdGenerator::starting_after(2);
    /// assert_eq!(g.generate(), Some(3));
    ///
    /// let mut g = IdGenerator::starting_after(u64::MAX);
    /// assert_eq!(g.generate(), None);
    /// ```
    #[must_use]
    pub const fn starting_after(last: u64) -> Self {
        Self {
            next: last.checked_add(1),
        }
    }

    /// Creates a generator that continues after the highest numeric id in `ids`.
    ///
    /// Ids that are not decimal numbers are ignored.
    pub fn continuing<'a, I>(ids: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let last = ids
            .into_iter()
            .filter_map(|id| id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self::starting_after(last)
    }

    /// Returns the next id, or `None` once the id space is used up.
    pub fn generate(&mut self) -> Option<u64> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(id)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
