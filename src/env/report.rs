use indexmap::{map::Entry, IndexMap};

/// Per-episode metrics collected by an environment
///
/// Values are accumulated while an episode runs and drained with [`Report::take`],
/// which also resets them to zero for the next episode. Keys keep their insertion order,
/// so `take().values()` lines up with [`Report::keys`].
#[derive(Debug, Clone)]
pub struct Report {
    keys: Vec<&'static str>,
    data: IndexMap<&'static str, f64>,
}

impl Report {
    pub fn new(keys: Vec<&'static str>) -> Self {
        let data = keys.iter().map(|k| (*k, 0.0)).collect();
        Self { keys, data }
    }

    pub fn keys(&self) -> &[&'static str] {
        &self.keys
    }

    /// Access a metric for in-place modification
    pub fn entry(&mut self, key: &'static str) -> Entry<'_, &'static str, f64> {
        self.data.entry(key)
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.data.get(key).copied()
    }

    /// Take the collected metrics, leaving every key at zero
    pub fn take(&mut self) -> IndexMap<&'static str, f64> {
        let fresh = self.keys.iter().map(|k| (*k, 0.0)).collect();
        std::mem::replace(&mut self.data, fresh)
    }
}
