use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use crate::{EngineError, Group, GroupId, IdGenerator, ResultEngine, UuidIds};

mod balances;
mod groups;
mod history;

/// In-memory book of groups.
///
/// Every read returns an owned snapshot and every derived value (balances,
/// settle-up plan, activity) is recomputed from the group's history on each
/// call. The engine never reads the clock and gets its ids from the injected
/// [`IdGenerator`].
pub struct Engine {
    groups: RwLock<HashMap<GroupId, Group>>,
    ids: Box<dyn IdGenerator>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine").finish_non_exhaustive()
    }
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Runs `f` on a shared view of the group.
    fn with_group<T>(
        &self,
        group_id: &GroupId,
        f: impl FnOnce(&Group) -> ResultEngine<T>,
    ) -> ResultEngine<T> {
        let groups = self.groups.read().unwrap_or_else(PoisonError::into_inner);
        let group = groups
            .get(group_id)
            .ok_or_else(|| EngineError::KeyNotFound(format!("group {group_id}")))?;
        f(group)
    }

    /// Runs `f` on the group under the write lock.
    ///
    /// `f` must validate before mutating: on error the group is left as is.
    fn with_group_mut<T>(
        &self,
        group_id: &GroupId,
        f: impl FnOnce(&mut Group) -> ResultEngine<T>,
    ) -> ResultEngine<T> {
        let mut groups = self.groups.write().unwrap_or_else(PoisonError::into_inner);
        let group = groups
            .get_mut(group_id)
            .ok_or_else(|| EngineError::KeyNotFound(format!("group {group_id}")))?;
        f(group)
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    ids: Option<Box<dyn IdGenerator>>,
}

impl EngineBuilder {
    /// Pass the id generator (random UUIDs when not set).
    pub fn ids(mut self, ids: impl IdGenerator + 'static) -> EngineBuilder {
        self.ids = Some(Box::new(ids));
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            groups: RwLock::new(HashMap::new()),
            ids: self.ids.unwrap_or_else(|| Box::new(UuidIds)),
        }
    }
}
