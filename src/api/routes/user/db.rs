//! Database queries for the user API
use chrono::{SecondsFormat, Utc};
use rusqlite::{OptionalExtension, Row, params};
use tokio_rusqlite::Connection;

use super::public::{NewUser, ProfileUpdate, User};

const USER_COLUMNS: &str =
    "id, email, first_name, last_name, avatar_url, is_active, created_at, updated_at";

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        avatar_url: row.get(4)?,
        is_active: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn select_user(conn: &rusqlite::Connection, id: &str) -> rusqlite::Result<Option<User>> {
    conn.query_row(
        &format!("SELECT {} FROM users WHERE id = ?1 LIMIT 1", USER_COLUMNS),
        [id],
        user_from_row,
    )
    .optional()
}

/// Get a user by ID from the database
pub async fn find_user_by_id(db: &Connection, id: String) -> Result<Option<User>, anyhow::Error> {
    db.call(move |conn| Ok(select_user(conn, &id)?))
        .await
        .map_err(|e| e.into())
}

/// Insert a new user unless one with the same ID already exists. Returns
/// the stored row and whether this call created it.
pub async fn insert_user(db: &Connection, user: NewUser) -> Result<(User, bool), anyhow::Error> {
    db.call(move |conn| {
        let timestamp = now();
        let inserted = conn.execute(
            r"
          INSERT INTO users (id, email, first_name, last_name, avatar_url, created_at, updated_at)
          VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
          ON CONFLICT(id) DO NOTHING
        ",
            params![
                user.id,
                user.email,
                user.first_name,
                user.last_name,
                user.avatar_url,
                timestamp,
            ],
        )?;
        let stored = select_user(conn, &user.id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?;
        Ok((stored, inserted > 0))
    })
    .await
    .map_err(|e| e.into())
}

/// Apply a profile update and bump `updated_at`. Returns `None` when
/// there is no user with `id`.
pub async fn update_profile(
    db: &Connection,
    id: String,
    update: ProfileUpdate,
) -> Result<Option<User>, anyhow::Error> {
    db.call(move |conn| {
        let changed = conn.execute(
            r"
          UPDATE users
          SET first_name = COALESCE(?1, first_name),
              last_name = COALESCE(?2, last_name),
              updated_at = ?3
          WHERE id = ?4
        ",
            params![update.first_name, update.last_name, now(), id],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        Ok(select_user(conn, &id)?)
    })
    .await
    .map_err(|e| e.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::db::migrate_db;

    async fn test_db() -> Connection {
        let db = Connection::open_in_memory().await.unwrap();
        db.call(|conn| {
            migrate_db(conn).expect("Failed to migrate db");
            Ok(())
        })
        .await
        .unwrap();
        db
    }

    fn new_user(id: &str, email: &str) -> NewUser {
        NewUser {
            id: id.to_string(),
            email: email.to_string(),
            first_name: Some(String::from("Ada")),
            last_name: None,
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn it_inserts_and_finds_users() {
        let db = test_db().await;
        let (user, created) = insert_user(&db, new_user("user-1", "ada@example.com"))
            .await
            .unwrap();
        assert!(created);
        assert_eq!(user.email, "ada@example.com");
        assert!(user.is_active);
        assert_eq!(user.created_at, user.updated_at);

        let found = find_user_by_id(&db, String::from("user-1")).await.unwrap();
        assert_eq!(found, Some(user));
        let missing = find_user_by_id(&db, String::from("user-2")).await.unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn it_keeps_the_first_insert_for_an_id() {
        let db = test_db().await;
        let (first, created) = insert_user(&db, new_user("user-1", "ada@example.com"))
            .await
            .unwrap();
        assert!(created);

        let mut again = new_user("user-1", "ada@example.com");
        again.first_name = Some(String::from("Augusta"));
        let (second, created) = insert_user(&db, again).await.unwrap();
        assert!(!created);
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn it_enforces_unique_emails() {
        let db = test_db().await;
        insert_user(&db, new_user("user-1", "ada@example.com"))
            .await
            .unwrap();
        let result = insert_user(&db, new_user("user-2", "ada@example.com")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn it_updates_only_given_fields() {
        let db = test_db().await;
        insert_user(&db, new_user("user-1", "ada@example.com"))
            .await
            .unwrap();

        let update = ProfileUpdate {
            first_name: None,
            last_name: Some(String::from("Lovelace")),
        };
        let user = update_profile(&db, String::from("user-1"), update)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.first_name.as_deref(), Some("Ada"));
        assert_eq!(user.last_name.as_deref(), Some("Lovelace"));
        assert!(user.updated_at >= user.created_at);

        let missing = update_profile(&db, String::from("user-2"), ProfileUpdate::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
