use std::{
    sync::{
        Arc,
        atomic::{AtomicI64, Ordering},
    },
    time::SystemTime,
};

use dashmap::{DashMap, mapref::entry::Entry};
use futures::future::BoxFuture;

use crate::dao::{
    models::{GameRecordEntity, NewGameRecordEntity, NewUserEntity, UserEntity},
    storage::StorageResult,
    user_store::UserStore,
};

/// Process-lifetime in-memory store. Serves as the fallback backend when the
/// primary store fails and as the storage double in tests. All data is lost
/// when the process exits.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    users: DashMap<i64, UserEntity>,
    // Username uniqueness index; the entry guard makes check-and-reserve
    // atomic under concurrent registrations.
    usernames: DashMap<String, i64>,
    records: DashMap<i64, GameRecordEntity>,
    next_user_id: AtomicI64,
    next_record_id: AtomicI64,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn insert_user(&self, user: NewUserEntity) -> Option<UserEntity> {
        match self.inner.usernames.entry(user.username.clone()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                let id = self.inner.next_user_id.fetch_add(1, Ordering::Relaxed) + 1;
                let entity = UserEntity {
                    id,
                    username: user.username,
                    password_hash: user.password_hash,
                    highscore: 0,
                    created_at: SystemTime::now(),
                };
                // The user row goes in before the index entry becomes
                // visible, so lookups through the index never miss.
                self.inner.users.insert(id, entity.clone());
                slot.insert(id);
                Some(entity)
            }
        }
    }

    fn user_by_username(&self, username: &str) -> Option<UserEntity> {
        let id = *self.inner.usernames.get(username)?;
        self.inner.users.get(&id).map(|entry| entry.value().clone())
    }

    fn users_by_highscore(&self) -> Vec<UserEntity> {
        let mut users: Vec<UserEntity> = self
            .inner
            .users
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        users.sort_by(|a, b| b.highscore.cmp(&a.highscore).then(a.id.cmp(&b.id)));
        users
    }

    fn raise(&self, user_id: i64, candidate: i64) {
        if let Some(mut user) = self.inner.users.get_mut(&user_id) {
            if candidate > user.highscore {
                user.highscore = candidate;
            }
        }
    }

    fn append_record(&self, record: NewGameRecordEntity) -> GameRecordEntity {
        let id = self.inner.next_record_id.fetch_add(1, Ordering::Relaxed) + 1;
        let entity = GameRecordEntity {
            id,
            user_id: record.user_id,
            game: record.game,
            opponent: record.opponent,
            winner: record.winner,
        };
        self.inner.records.insert(id, entity.clone());
        entity
    }

    fn records_for(&self, user_id: i64) -> Vec<GameRecordEntity> {
        let mut records: Vec<GameRecordEntity> = self
            .inner
            .records
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by_key(|record| record.id);
        records
    }
}

impl UserStore for MemoryUserStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn create_user(
        &self,
        user: NewUserEntity,
    ) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.insert_user(user)) })
    }

    fn find_user_by_username(
        &self,
        username: String,
    ) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.user_by_username(&username)) })
    }

    fn list_users_by_highscore(&self) -> BoxFuture<'static, StorageResult<Vec<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.users_by_highscore()) })
    }

    fn raise_highscore(
        &self,
        user_id: i64,
        candidate: i64,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.raise(user_id, candidate);
            Ok(())
        })
    }

    fn append_game_record(
        &self,
        record: NewGameRecordEntity,
    ) -> BoxFuture<'static, StorageResult<GameRecordEntity>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.append_record(record)) })
    }

    fn game_records_for_user(
        &self,
        user_id: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<GameRecordEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.records_for(user_id)) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str) -> NewUserEntity {
        NewUserEntity {
            username: name.to_string(),
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    #[test]
    fn test_create_user_assigns_sequential_ids() {
        let store = MemoryUserStore::new();
        let first = store.insert_user(new_user("ona")).unwrap();
        let second = store.insert_user(new_user("jonas")).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.highscore, 0);
    }

    #[test]
    fn test_duplicate_username_is_rejected() {
        let store = MemoryUserStore::new();
        assert!(store.insert_user(new_user("ona")).is_some());
        assert!(store.insert_user(new_user("ona")).is_none());
    }

    #[test]
    fn test_concurrent_registrations_admit_one_winner() {
        let store = MemoryUserStore::new();

        let successes: usize = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..16)
                .map(|_| {
                    let store = store.clone();
                    scope.spawn(move || store.insert_user(new_user("ona")).is_some())
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .filter(|created| *created)
                .count()
        });

        assert_eq!(successes, 1);
        assert!(store.user_by_username("ona").is_some());
    }

    #[test]
    fn test_highscore_only_raises() {
        let store = MemoryUserStore::new();
        let user = store.insert_user(new_user("ona")).unwrap();

        store.raise(user.id, 40);
        store.raise(user.id, 25);
        store.raise(user.id, 40);

        let stored = store.user_by_username("ona").unwrap();
        assert_eq!(stored.highscore, 40);

        // Unknown user ids are silently ignored.
        store.raise(999, 100);
    }

    #[test]
    fn test_scoreboard_order_desc_with_stable_ties() {
        let store = MemoryUserStore::new();
        let a = store.insert_user(new_user("a")).unwrap();
        let b = store.insert_user(new_user("b")).unwrap();
        let c = store.insert_user(new_user("c")).unwrap();
        store.raise(a.id, 10);
        store.raise(b.id, 30);
        store.raise(c.id, 10);

        let names: Vec<String> = store
            .users_by_highscore()
            .into_iter()
            .map(|user| user.username)
            .collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_records_keep_insertion_order_and_filter_by_user() {
        let store = MemoryUserStore::new();
        for (user_id, game) in [(1, "snake"), (2, "pong"), (1, "tetris")] {
            store.append_record(NewGameRecordEntity {
                user_id,
                game: game.to_string(),
                opponent: "pc".to_string(),
                winner: "pc".to_string(),
            });
        }

        let games: Vec<String> = store
            .records_for(1)
            .into_iter()
            .map(|record| record.game)
            .collect();
        assert_eq!(games, vec!["snake", "tetris"]);
        assert!(store.records_for(42).is_empty());
    }
}
