use std::collections::BTreeMap;

use crate::bt::BehaviorNode;

type Factory<A> = Box<dyn Fn() -> Box<dyn BehaviorNode<A>>>;

/// Named tree factories. Building returns a fresh tree with no carried state.
pub struct BehaviorRepository<A: 'static> {
    factories: BTreeMap<String, Factory<A>>,
}

impl<A: 'static> Default for BehaviorRepository<A> {
    fn default() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }
}

impl<A: 'static> BehaviorRepository<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` under `name`, replacing any previous entry.
    pub fn add<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn BehaviorNode<A>> + 'static,
    {
        let name = name.into();
        if self.factories.insert(name.clone(), Box::new(factory)).is_some() {
            tracing::debug!(behavior = %name, "replaced behavior factory");
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn build(&self, name: &str) -> Option<Box<dyn BehaviorNode<A>>> {
        self.factories.get(name).map(|make| make())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl<A: 'static> std::fmt::Debug for BehaviorRepository<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviorRepository")
            .field("names", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
