use anyhow::Result;

use super::schema::Database;
use crate::filter::Selection;

/// Preference key holding the persisted category filter selection.
///
/// Multi-select policy: the value is a JSON array of category names in
/// insertion order.
pub const CATEGORY_FILTERS_KEY: &str = "news.category_filters";

impl Database {
    // ========================================================================
    // User Preferences Operations
    // ========================================================================

    /// Get a single preference value by key.
    ///
    /// Keys use dotted convention: `news.category_filters`, `theme.variant`, etc.
    ///
    /// # Returns
    ///
    /// The preference value if the key exists, or `None` if not set.
    pub async fn get_preference(&self, key: &str) -> Result<Option<String>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM user_preferences WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(value,)| value))
    }

    /// Set a preference value (UPSERT).
    ///
    /// Inserts the key-value pair if it doesn't exist, or updates the value
    /// and timestamp if the key already exists.
    pub async fn set_preference(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_preferences (key, value, updated_at)
            VALUES (?, ?, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
        "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a preference key. Deleting an absent key is a no-op.
    pub async fn delete_preference(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM user_preferences WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // ========================================================================
    // Category Filter Bridge
    // ========================================================================

    /// Persist the filter selection.
    ///
    /// An empty selection deletes the key (an absent key and "no filter"
    /// are the same state); a non-empty selection stores the JSON-encoded
    /// category list.
    pub async fn save_category_filters(&self, selection: &Selection) -> Result<()> {
        if selection.is_empty() {
            self.delete_preference(CATEGORY_FILTERS_KEY).await
        } else {
            self.set_preference(CATEGORY_FILTERS_KEY, &selection.encode()?)
                .await
        }
    }

    /// Load the persisted filter selection.
    ///
    /// An absent key yields an empty selection. A malformed stored value is
    /// logged and treated as empty — the listing fails open to the
    /// unfiltered view rather than surfacing an error.
    pub async fn load_category_filters(&self) -> Result<Selection> {
        let Some(raw) = self.get_preference(CATEGORY_FILTERS_KEY).await? else {
            return Ok(Selection::new());
        };

        match Selection::decode(&raw) {
            Ok(selection) => Ok(selection),
            Err(e) => {
                tracing::warn!(
                    key = CATEGORY_FILTERS_KEY,
                    error = %e,
                    "Malformed persisted filter selection, showing all"
                );
                Ok(Selection::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;

    async fn test_db() -> Database {
        Database::open(":memory:").await.unwrap()
    }

    fn selection(names: &[&str]) -> Selection {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn test_get_preference_missing() {
        let db = test_db().await;
        let value = db.get_preference("nonexistent.key").await.unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_set_and_get_preference() {
        let db = test_db().await;
        db.set_preference("theme.variant", "dark").await.unwrap();

        let value = db.get_preference("theme.variant").await.unwrap();
        assert_eq!(value, Some("dark".to_string()));
    }

    #[tokio::test]
    async fn test_set_preference_upsert() {
        let db = test_db().await;
        db.set_preference("theme.variant", "dark").await.unwrap();
        db.set_preference("theme.variant", "light").await.unwrap();

        let value = db.get_preference("theme.variant").await.unwrap();
        assert_eq!(value, Some("light".to_string()));
    }

    #[tokio::test]
    async fn test_delete_preference() {
        let db = test_db().await;
        db.set_preference("test.key", "value").await.unwrap();
        db.delete_preference("test.key").await.unwrap();

        assert_eq!(db.get_preference("test.key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_absent_preference_is_noop() {
        let db = test_db().await;
        db.delete_preference("never.set").await.unwrap();
    }

    #[tokio::test]
    async fn test_save_and_load_filters_round_trip() {
        let db = test_db().await;
        let sel = selection(&["Climate", "Policy"]);
        db.save_category_filters(&sel).await.unwrap();

        let loaded = db.load_category_filters().await.unwrap();
        assert_eq!(loaded, sel);
    }

    #[tokio::test]
    async fn test_load_filters_when_never_saved() {
        let db = test_db().await;
        let loaded = db.load_category_filters().await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_save_empty_selection_deletes_key() {
        let db = test_db().await;
        db.save_category_filters(&selection(&["Climate"]))
            .await
            .unwrap();
        db.save_category_filters(&Selection::new()).await.unwrap();

        let raw = db.get_preference(CATEGORY_FILTERS_KEY).await.unwrap();
        assert_eq!(raw, None);
        assert!(db.load_category_filters().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_malformed_value_fails_open() {
        let db = test_db().await;
        db.set_preference(CATEGORY_FILTERS_KEY, "{definitely not json")
            .await
            .unwrap();

        let loaded = db.load_category_filters().await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_save_preserves_insertion_order() {
        let db = test_db().await;
        db.save_category_filters(&selection(&["B", "A", "C"]))
            .await
            .unwrap();

        let raw = db
            .get_preference(CATEGORY_FILTERS_KEY)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(raw, r#"["B","A","C"]"#);
    }
}
