//! Per-user routine persistence and catalog merging.
//!
//! User routines live under `routines:<userId>` as a JSON array. Reads fail
//! soft (absent, malformed or unreadable data is an empty list) and write
//! faults are logged and dropped, so callers never see storage errors from
//! the list/save/upsert/delete operations.

use chrono::Utc;
use indexmap::IndexMap;

use super::catalog::default_routines;
use super::{Routine, RoutineDraft};
use crate::error::{CoreError, Result, ValidationError};
use crate::storage::KeyValueStore;

/// Last selected routine id. Global, not per user.
pub const SELECTED_ROUTINE_KEY: &str = "routines:selected";

fn user_key(user_id: &str) -> String {
    format!("routines:{user_id}")
}

/// Merge defaults and user routines by id, user entries taking precedence.
///
/// Defaults keep their catalog positions; a user routine sharing an id
/// replaces the default in place. Remaining user routines follow in stored
/// order. `is_default` is set from the side each entry came from.
pub fn merge_routines(defaults: Vec<Routine>, user: Vec<Routine>) -> Vec<Routine> {
    let mut merged: IndexMap<String, Routine> = IndexMap::new();
    for mut routine in defaults {
        routine.is_default = true;
        merged.insert(routine.id.clone(), routine);
    }
    for mut routine in user {
        routine.is_default = false;
        merged.insert(routine.id.clone(), routine);
    }
    merged.into_values().collect()
}

/// Routine catalog for all users, backed by a key-value store.
pub struct RoutineStore<'a, K: KeyValueStore + ?Sized> {
    kv: &'a K,
}

impl<'a, K: KeyValueStore + ?Sized> RoutineStore<'a, K> {
    pub fn new(kv: &'a K) -> Self {
        Self { kv }
    }

    pub fn list_default_routines(&self) -> Vec<Routine> {
        default_routines()
    }

    pub fn list_user_routines(&self, user_id: &str) -> Vec<Routine> {
        let key = user_key(user_id);
        let raw = match self.kv.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(%key, "could not read user routines: {e}");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<Routine>>(&raw) {
            Ok(routines) => routines,
            Err(e) => {
                tracing::warn!(%key, "ignoring malformed user routines: {e}");
                Vec::new()
            }
        }
    }

    /// Overwrite the full persisted set for `user_id`.
    pub fn save_user_routines(&self, user_id: &str, routines: &[Routine]) {
        let key = user_key(user_id);
        let json = match serde_json::to_string(routines) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(%key, "could not serialize user routines: {e}");
                return;
            }
        };
        if let Err(e) = self.kv.set(&key, &json) {
            tracing::warn!(%key, "user routines not saved: {e}");
        }
    }

    pub fn list_all_routines(&self, user_id: &str) -> Vec<Routine> {
        merge_routines(self.list_default_routines(), self.list_user_routines(user_id))
    }

    pub fn get_routine_by_id(&self, user_id: &str, routine_id: &str) -> Option<Routine> {
        self.list_all_routines(user_id)
            .into_iter()
            .find(|r| r.id == routine_id)
    }

    /// Insert or replace by id in the user's set. Returns the stored routine.
    pub fn upsert_user_routine(&self, user_id: &str, routine: Routine) -> Routine {
        let mut routine = routine;
        routine.is_default = false;

        let mut list = self.list_user_routines(user_id);
        match list.iter().position(|r| r.id == routine.id) {
            Some(idx) => list[idx] = routine.clone(),
            None => list.push(routine.clone()),
        }
        self.save_user_routines(user_id, &list);
        tracing::debug!(user_id, routine_id = %routine.id, "upserted user routine");
        routine
    }

    /// Remove by id from the user's set. Unknown ids are a no-op.
    pub fn delete_user_routine(&self, user_id: &str, routine_id: &str) {
        let mut list = self.list_user_routines(user_id);
        let before = list.len();
        list.retain(|r| r.id != routine_id);
        if list.len() == before {
            return;
        }
        self.save_user_routines(user_id, &list);
        tracing::debug!(user_id, routine_id, "deleted user routine");
    }

    /// Create an empty routine for `user_id` and persist it.
    pub fn create_user_routine(&self, user_id: &str) -> Routine {
        let id = self.unused_id(user_id, &format!("custom-{}", Utc::now().timestamp_millis()));
        let mut routine = Routine::blank(id, "Nueva rutina");
        routine.description = "Rutina personalizada".to_string();
        self.upsert_user_routine(user_id, routine)
    }

    /// Copy any catalog routine into the user's set under a fresh id.
    ///
    /// # Errors
    /// Returns `NotFound` if `source_id` is not in the merged catalog.
    pub fn duplicate_routine(&self, user_id: &str, source_id: &str) -> Result<Routine> {
        let source = self
            .get_routine_by_id(user_id, source_id)
            .ok_or_else(|| CoreError::routine_not_found(source_id))?;

        let id = self.unused_id(
            user_id,
            &format!("{}-copy-{}", source.id, Utc::now().timestamp_millis()),
        );
        let copy = Routine {
            id,
            name: format!("Copia de {}", source.name),
            is_default: false,
            ..source
        };
        Ok(self.upsert_user_routine(user_id, copy))
    }

    /// Apply `draft` to one of the user's own routines.
    ///
    /// # Errors
    /// Returns `ReadOnly` for a built-in routine and `NotFound` for an
    /// unknown id.
    pub fn edit_user_routine(
        &self,
        user_id: &str,
        routine_id: &str,
        draft: &RoutineDraft,
    ) -> Result<Routine> {
        let existing = self
            .list_user_routines(user_id)
            .into_iter()
            .find(|r| r.id == routine_id);

        match existing {
            Some(routine) => Ok(self.upsert_user_routine(user_id, draft.apply_to(&routine))),
            None if self
                .list_default_routines()
                .iter()
                .any(|r| r.id == routine_id) =>
            {
                Err(ValidationError::ReadOnly {
                    id: routine_id.to_string(),
                }
                .into())
            }
            None => Err(CoreError::routine_not_found(routine_id)),
        }
    }

    pub fn selected_routine_id(&self) -> Option<String> {
        match self.kv.get(SELECTED_ROUTINE_KEY) {
            Ok(id) => id.filter(|id| !id.is_empty()),
            Err(e) => {
                tracing::warn!("could not read selected routine: {e}");
                None
            }
        }
    }

    pub fn select_routine(&self, routine_id: &str) {
        if let Err(e) = self.kv.set(SELECTED_ROUTINE_KEY, routine_id) {
            tracing::warn!(routine_id, "selected routine not saved: {e}");
        }
    }

    /// The saved selection if it still exists for this user, else the first
    /// routine of the merged catalog.
    pub fn resolve_selection(&self, user_id: &str) -> Option<Routine> {
        let all = self.list_all_routines(user_id);
        let saved = self.selected_routine_id();
        if let Some(id) = saved {
            if let Some(found) = all.iter().find(|r| r.id == id) {
                return Some(found.clone());
            }
        }
        all.into_iter().next()
    }

    fn unused_id(&self, user_id: &str, base: &str) -> String {
        let taken: Vec<String> = self
            .list_all_routines(user_id)
            .into_iter()
            .map(|r| r.id)
            .collect();
        if !taken.iter().any(|id| id == base) {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{base}-{n}"))
            .find(|candidate| !taken.contains(candidate))
            .unwrap_or_else(|| base.to_string())
    }
}
