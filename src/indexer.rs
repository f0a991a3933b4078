use std::borrow::Borrow;
use std::hash::Hash;

use crate::col::{map_new, HashMap};

/// Hands out dense indices for external ids, in order of first appearance, and remembers
/// the id behind every index.
pub struct Indexer<Id, Index, F>
where
    Id: Eq + Hash + Clone,
    Index: Eq + Copy,
    F: Fn(usize) -> Index,
{
    ids: Vec<Id>,
    index_by_id: HashMap<Id, Index>,
    to_index: F,
}

impl<Id: Eq + Hash + Clone, Index: Eq + Copy, F: Fn(usize) -> Index> Indexer<Id, Index, F> {
    pub fn new(to_index: F) -> Self {
        Self {
            ids: Vec::new(),
            index_by_id: map_new(),
            to_index,
        }
    }

    pub fn index(&mut self, id: Id) -> Index {
        if let Some(&index) = self.index_by_id.get(&id) {
            return index;
        }
        let index = (self.to_index)(self.ids.len());
        self.ids.push(id.clone());
        self.index_by_id.insert(id, index);
        index
    }

    pub fn get<Q>(&self, id: &Q) -> Option<Index>
    where
        Id: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index_by_id.get(id).copied()
    }

    /// The id that was assigned the `position`-th index.
    pub fn id(&self, position: usize) -> &Id {
        &self.ids[position]
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}
