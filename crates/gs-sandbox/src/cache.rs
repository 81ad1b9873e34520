use std::collections::VecDeque;
use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHasher};
use wasmtime::InstancePre;

use crate::scope::HostState;

/// Bounded map from code to its linked, ready-to-instantiate module.
///
/// Keyed by a hash of the code text; the text itself is kept alongside so a
/// hash collision is a miss, never a wrong module.
pub(crate) struct ModuleCache {
    max_entries: usize,
    entries:     FxHashMap<u64, (String, InstancePre<HostState>)>,
    order:       VecDeque<u64>,
}

impl ModuleCache {
    pub fn new(max_entries: usize) -> Self {
        Self { max_entries, entries: FxHashMap::default(), order: VecDeque::new() }
    }

    pub fn key(code: &str) -> u64 {
        let mut h = FxHasher::default();
        code.hash(&mut h);
        h.finish()
    }

    pub fn get(&self, code: &str) -> Option<InstancePre<HostState>> {
        self.entries
            .get(&Self::key(code))
            .filter(|(stored, _)| stored == code)
            .map(|(_, pre)| pre.clone())
    }

    pub fn insert(&mut self, code: &str, pre: InstancePre<HostState>) {
        if self.max_entries == 0 {
            return;
        }
        let key = Self::key(code);
        if self.entries.insert(key, (code.to_owned(), pre)).is_none() {
            self.order.push_back(key);
        }
        while self.entries.len() > self.max_entries {
            let Some(oldest) = self.order.pop_front() else { break };
            self.entries.remove(&oldest);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
