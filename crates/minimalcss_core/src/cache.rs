use std::collections::HashMap;
use std::rc::Rc;

/// What is known about a selector chain prefix. Absent from the cache means
/// it was never queried.
#[derive(Debug, Clone)]
pub enum Reach<N> {
  /// Nothing in the document matches the prefix, nor anything longer.
  Empty,
  /// Every element matching the prefix, the scope for the next segment.
  Matched(Rc<[N]>),
}

/// Presence results keyed by selector chain prefix.
///
/// Keys do not encode the document, so a cache must never outlive the
/// document it was filled from.
#[derive(Debug)]
pub struct ReachabilityCache<N> {
  entries: HashMap<String, Reach<N>>,
}

impl<N> Default for ReachabilityCache<N> {
  fn default() -> Self {
    ReachabilityCache {
      entries: HashMap::new(),
    }
  }
}

impl<N> ReachabilityCache<N> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, key: &str) -> Option<&Reach<N>> {
    self.entries.get(key)
  }

  pub fn record_empty(&mut self, key: String) {
    self.entries.insert(key, Reach::Empty);
  }

  pub fn record_matched(&mut self, key: String, nodes: Vec<N>) -> Rc<[N]> {
    let nodes: Rc<[N]> = nodes.into();
    self.entries.insert(key, Reach::Matched(nodes.clone()));
    nodes
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
