/// Result of re-keying a [`Scoped`] resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rekey {
    /// Same key as before (or still none); nothing happened.
    Kept,
    Acquired,
    Released,
    /// The old lease was released, then a new one acquired.
    Replaced,
}

/// A resource that is live for exactly one key at a time.
///
/// Changing the key always releases the previous lease before the next one
/// is acquired, so two leases never overlap.
#[derive(Debug, Clone)]
pub struct Scoped<K> {
    key: Option<K>,
    acquisitions: usize,
    releases: usize,
}

impl<K> Default for Scoped<K> {
    fn default() -> Self {
        Self {
            key: None,
            acquisitions: 0,
            releases: 0,
        }
    }
}

impl<K: Copy + Eq> Scoped<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rekey(&mut self, next: Option<K>) -> Rekey {
        if self.key == next {
            return Rekey::Kept;
        }

        let released = self.key.take().is_some();
        if released {
            self.releases += 1;
        }

        match next {
            Some(key) => {
                self.key = Some(key);
                self.acquisitions += 1;
                if released {
                    Rekey::Replaced
                } else {
                    Rekey::Acquired
                }
            }
            None => Rekey::Released,
        }
    }

    pub fn key(&self) -> Option<K> {
        self.key
    }

    pub fn is_live(&self) -> bool {
        self.key.is_some()
    }

    pub fn acquisitions(&self) -> usize {
        self.acquisitions
    }

    pub fn releases(&self) -> usize {
        self.releases
    }

    /// Leases currently held; never more than one.
    pub fn live_count(&self) -> usize {
        self.acquisitions - self.releases
    }
}
