//! Worker profile storage.

use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{NewProfile, Profile, ProfileRow};

/// Create a profile and return its assigned ID.
pub async fn create_profile(pool: &SqlitePool, profile: &NewProfile) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO profiles (phone_number, name, profile_data)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&profile.phone_number)
    .bind(&profile.name)
    .bind(Json(&profile.profile_data))
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    tracing::debug!(id, fields = profile.profile_data.len(), "Created profile");

    Ok(id)
}

/// Get a profile by ID.
pub async fn get_profile(pool: &SqlitePool, id: i64) -> Result<Profile> {
    sqlx::query_as::<_, ProfileRow>(
        r#"
        SELECT id, phone_number, name, profile_data, created_at, updated_at
        FROM profiles
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .map(Profile::from)
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Profile",
        id: id.to_string(),
    })
}

/// List all profiles.
pub async fn list_profiles(pool: &SqlitePool) -> Result<Vec<Profile>> {
    let rows = sqlx::query_as::<_, ProfileRow>(
        r#"
        SELECT id, phone_number, name, profile_data, created_at, updated_at
        FROM profiles
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Profile::from).collect())
}

/// Count stored profiles.
pub async fn count_profiles(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM profiles
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProfileData;
    use crate::Database;
    use serde_json::json;

    async fn test_db() -> Database {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();
        db
    }

    fn data(value: serde_json::Value) -> ProfileData {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_round_trip() {
        let db = test_db().await;
        let profile_data = data(json!({
            "raw_text": "I drive for Uber since 2020",
            "job_title": "Driver",
            "employer": "Uber",
            "start_year": 2020,
            "name": "Unnamed Worker",
        }));
        let new = NewProfile::named("Unnamed Worker", profile_data.clone());

        let id = create_profile(db.pool(), &new).await.unwrap();
        let fetched = get_profile(db.pool(), id).await.unwrap();

        assert_eq!(fetched.id, id);
        assert_eq!(fetched.name.as_deref(), Some("Unnamed Worker"));
        assert_eq!(fetched.profile_data, profile_data);
        assert_eq!(fetched.profile_data["start_year"], 2020);
        assert!(fetched.phone_number.is_none());
        assert!(!fetched.created_at.is_empty());
        assert!(!fetched.updated_at.is_empty());
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let db = test_db().await;
        let result = get_profile(db.pool(), 42).await;
        match result {
            Err(DatabaseError::NotFound { entity, id }) => {
                assert_eq!(entity, "Profile");
                assert_eq!(id, "42");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let db = test_db().await;
        let first = create_profile(db.pool(), &NewProfile::default()).await.unwrap();
        let second = create_profile(db.pool(), &NewProfile::default()).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_list_empty() {
        let db = test_db().await;
        let profiles = list_profiles(db.pool()).await.unwrap();
        assert!(profiles.is_empty());
        assert_eq!(count_profiles(db.pool()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_all() {
        let db = test_db().await;
        let a = create_profile(db.pool(), &NewProfile::named("A", ProfileData::new()))
            .await
            .unwrap();
        let b = create_profile(
            db.pool(),
            &NewProfile {
                phone_number: Some("+15551234567".to_string()),
                name: None,
                profile_data: data(json!({ "employer": "Uber" })),
            },
        )
        .await
        .unwrap();

        let profiles = list_profiles(db.pool()).await.unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(count_profiles(db.pool()).await.unwrap(), 2);

        let ids: Vec<i64> = profiles.iter().map(|p| p.id).collect();
        assert!(ids.contains(&a));
        assert!(ids.contains(&b));

        let second = profiles.iter().find(|p| p.id == b).unwrap();
        assert_eq!(second.phone_number.as_deref(), Some("+15551234567"));
        assert!(second.name.is_none());
        assert_eq!(second.profile_data["employer"], "Uber");
    }

    #[tokio::test]
    async fn test_empty_profile_data_defaults() {
        let db = test_db().await;
        let new: NewProfile = serde_json::from_value(json!({ "name": "Bo" })).unwrap();
        let id = create_profile(db.pool(), &new).await.unwrap();

        let fetched = get_profile(db.pool(), id).await.unwrap();
        assert_eq!(fetched.name.as_deref(), Some("Bo"));
        assert!(fetched.profile_data.is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_created_at() {
        let db = test_db().await;
        let id = create_profile(db.pool(), &NewProfile::named("A", ProfileData::new()))
            .await
            .unwrap();

        // Backdate the row so the trigger's refresh is observable.
        sqlx::query(
            "UPDATE profiles SET created_at = '2000-01-01 00:00:00', updated_at = '2000-01-01 00:00:00' WHERE id = ?",
        )
        .bind(id)
        .execute(db.pool())
        .await
        .unwrap();
        sqlx::query("UPDATE profiles SET name = 'B' WHERE id = ?")
            .bind(id)
            .execute(db.pool())
            .await
            .unwrap();

        let fetched = get_profile(db.pool(), id).await.unwrap();
        assert_eq!(fetched.id, id);
        assert_eq!(fetched.name.as_deref(), Some("B"));
        assert_eq!(fetched.created_at, "2000-01-01 00:00:00");
        assert_ne!(fetched.updated_at, "2000-01-01 00:00:00");
    }
}
