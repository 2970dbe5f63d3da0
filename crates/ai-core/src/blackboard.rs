use std::any::Any;
use std::collections::BTreeMap;

/// Lifetime class of a blackboard entry.
///
/// Nothing expires on its own; the controller clears whole scopes when the
/// facts they were derived from change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum BbScope {
    /// Lives as long as the agent.
    #[default]
    Persistent,
    /// Derived from the current arena; dropped on join/enter.
    Arena,
    /// Derived from the current ship or frequency; dropped when either changes.
    Ship,
}

struct Entry {
    scope: BbScope,
    value: Box<dyn Any>,
}

/// String-keyed, heterogeneously typed scratch store shared by one agent's
/// behavior nodes.
///
/// Reads are type-checked: an absent key and a key holding a different type
/// both read as `None`.
#[derive(Default)]
pub struct Blackboard {
    values: BTreeMap<String, Entry>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn set<T: 'static>(&mut self, key: impl Into<String>, value: T) {
        self.set_scoped(BbScope::Persistent, key, value);
    }

    pub fn set_scoped<T: 'static>(&mut self, scope: BbScope, key: impl Into<String>, value: T) {
        self.values.insert(
            key.into(),
            Entry {
                scope,
                value: Box::new(value),
            },
        );
    }

    pub fn get<T: 'static>(&self, key: &str) -> Option<&T> {
        self.values.get(key)?.value.downcast_ref::<T>()
    }

    pub fn get_mut<T: 'static>(&mut self, key: &str) -> Option<&mut T> {
        self.values.get_mut(key)?.value.downcast_mut::<T>()
    }

    pub fn value<T: Clone + 'static>(&self, key: &str) -> Option<T> {
        self.get::<T>(key).cloned()
    }

    pub fn value_or<T: Clone + 'static>(&self, key: &str, default: T) -> T {
        self.value(key).unwrap_or(default)
    }

    pub fn scope(&self, key: &str) -> Option<BbScope> {
        self.values.get(key).map(|e| e.scope)
    }

    /// Removes `key` if it holds a `T`. A value of another type is left in place.
    pub fn remove<T: 'static>(&mut self, key: &str) -> Option<T> {
        self.get::<T>(key)?;
        let entry = self.values.remove(key)?;
        entry.value.downcast::<T>().ok().map(|b| *b)
    }

    pub fn erase(&mut self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }

    /// Drops every entry in `scope`, returning how many were removed.
    pub fn clear_scope(&mut self, scope: BbScope) -> usize {
        let before = self.values.len();
        self.values.retain(|_, e| e.scope != scope);
        before - self.values.len()
    }
}

impl core::fmt::Debug for Blackboard {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map()
            .entries(self.values.iter().map(|(k, e)| (k, e.scope)))
            .finish()
    }
}
