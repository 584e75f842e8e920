//! Normalized entity collection
//!
//! Users are stored once in an id-keyed map, with a separate id list that
//! fixes iteration order. Both halves are private so every mutation goes
//! through the methods below, which keep them in 1:1 correspondence.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{User, UserId, UserUpdate};

/// Ordered id list plus id → user map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntityCollection {
    ids: Vec<UserId>,
    entities: BTreeMap<UserId, User>,
}

impl EntityCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from users in order (see [`EntityCollection::set_all`])
    pub fn from_users(users: impl IntoIterator<Item = User>) -> Self {
        let mut collection = Self::new();
        collection.set_all(users);
        collection
    }

    /// Ids in iteration order
    pub fn ids(&self) -> &[UserId] {
        &self.ids
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.entities.get(&id)
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Users in id order
    ///
    /// The iterator borrows the collection and can be recreated any number
    /// of times.
    pub fn iter(&self) -> impl Iterator<Item = &User> + '_ {
        self.ids.iter().filter_map(|id| self.entities.get(id))
    }

    /// Insert a user, or replace the stored one with the same id in place
    pub fn upsert_one(&mut self, user: User) {
        if !self.entities.contains_key(&user.id) {
            self.ids.push(user.id);
        }
        self.entities.insert(user.id, user);
    }

    /// Replace the whole collection: clear, then insert in order
    ///
    /// A repeated id keeps its first position and its last payload.
    pub fn set_all(&mut self, users: impl IntoIterator<Item = User>) {
        self.remove_all();
        for user in users {
            self.upsert_one(user);
        }
    }

    /// Merge changes into the user at `update.id`, inserting when absent
    pub fn update_one(&mut self, update: &UserUpdate) {
        match self.entities.get_mut(&update.id) {
            Some(user) => user.apply(&update.changes),
            None => self.upsert_one(User::from_changes(update.id, &update.changes)),
        }
    }

    /// Remove one user; returns the removed record, `None` if it was absent
    pub fn remove_one(&mut self, id: UserId) -> Option<User> {
        let removed = self.entities.remove(&id)?;
        self.ids.retain(|existing| *existing != id);
        Some(removed)
    }

    pub fn remove_all(&mut self) {
        self.ids.clear();
        self.entities.clear();
    }

    /// Check the id list and map agree; used by tests and debug assertions
    pub fn is_consistent(&self) -> bool {
        let mut seen = std::collections::BTreeSet::new();
        self.ids.len() == self.entities.len()
            && self.ids.iter().all(|id| seen.insert(*id) && self.entities.contains_key(id))
            && self.entities.iter().all(|(id, user)| *id == user.id)
    }
}

impl<'de> Deserialize<'de> for EntityCollection {
    /// Deserialize from the serialized `{ids, entities}` shape, rebuilding the
    /// collection so an inconsistent snapshot cannot get in
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Snapshot {
            #[serde(default)]
            ids: Vec<UserId>,
            #[serde(default)]
            entities: BTreeMap<UserId, User>,
        }

        let mut snapshot = Snapshot::deserialize(deserializer)?;
        let mut collection = EntityCollection::new();
        for id in snapshot.ids {
            if let Some(user) = snapshot.entities.remove(&id) {
                collection.upsert_one(user);
            }
        }
        Ok(collection)
    }
}

impl<'a> IntoIterator for &'a EntityCollection {
    type Item = &'a User;
    type IntoIter = Box<dyn Iterator<Item = &'a User> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
