use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::repositories::user_repository::{
    RepositoryError, RepositoryResult, UserRepository,
};
use crate::domain::user::{NewUser, User, UserPatch};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i32, User>,
    last_id: i32,
}

/// Process-local implementation of UserRepository
///
/// Ids come from a counter that only moves forward, so a deleted id is
/// never handed out again.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: RwLock<Table>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: NewUser) -> RepositoryResult<User> {
        let mut table = self.table.write().await;
        let id = table.last_id.checked_add(1).ok_or_else(|| {
            RepositoryError::Unavailable("user id space exhausted".to_string())
        })?;
        table.last_id = id;
        let created = User {
            id,
            name: user.name,
            email: user.email,
            age: user.age,
        };
        table.rows.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<User>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<User>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn update(&self, id: i32, patch: &UserPatch) -> RepositoryResult<u64> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&id) {
            Some(user) => {
                patch.apply_to(user);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i32) -> RepositoryResult<u64> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).map_or(0, |_| 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            age: None,
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let repo = InMemoryUserRepository::new();

        let a = repo.insert(new_user("Ann")).await.unwrap();
        let b = repo.insert(new_user("Bob")).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(repo.find_all().await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let repo = InMemoryUserRepository::new();

        let a = repo.insert(new_user("Ann")).await.unwrap();
        assert_eq!(repo.delete(a.id).await.unwrap(), 1);
        let b = repo.insert(new_user("Bob")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert!(repo.find_by_id(a.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn mutations_on_missing_rows_affect_nothing() {
        let repo = InMemoryUserRepository::new();
        let patch = UserPatch {
            name: Some("Ghost".to_string()),
            ..Default::default()
        };

        assert_eq!(repo.update(42, &patch).await.unwrap(), 0);
        assert_eq!(repo.delete(42).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_writes_present_fields() {
        let repo = InMemoryUserRepository::new();
        let user = repo.insert(new_user("Ann")).await.unwrap();

        let affected = repo
            .update(
                user.id,
                &UserPatch {
                    age: Some(Some(41)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(affected, 1);
        assert_eq!(stored.age, Some(41));
        assert_eq!(stored.name, "Ann");
    }

    #[tokio::test]
    async fn null_age_patch_clears_column() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .insert(NewUser {
                age: Some(30),
                ..new_user("Ann")
            })
            .await
            .unwrap();

        let affected = repo
            .update(
                user.id,
                &UserPatch {
                    age: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(affected, 1);
        assert_eq!(stored.age, None);
        assert_eq!(stored.email, "ann@example.com");
    }

    #[tokio::test]
    async fn insert_fails_once_ids_run_out() {
        let repo = InMemoryUserRepository::new();
        repo.table.write().await.last_id = i32::MAX;

        let result = repo.insert(new_user("Ann")).await;

        assert!(matches!(result, Err(RepositoryError::Unavailable(_))));
        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
