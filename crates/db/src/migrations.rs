/// Inline SQL migrations for the branchlog database schema.
///
/// Simple inline migrations rather than sqlx migration files — the schema
/// is small and self-contained. Each entry is applied at most once,
/// tracked by version in the `_migrations` table, so upgrades preserve
/// existing rows.

pub const MIGRATIONS: &[&str] = &[
    // Migration 1: logs table
    r#"
CREATE TABLE IF NOT EXISTS logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    branch_name TEXT NOT NULL DEFAULT '',
    date_of_request TEXT NOT NULL DEFAULT '',
    date_of_delivery TEXT NOT NULL DEFAULT '',
    material_created TEXT NOT NULL DEFAULT '',
    channel_of_request TEXT NOT NULL DEFAULT '',
    status TEXT NOT NULL DEFAULT '',
    survey_completed TEXT NOT NULL DEFAULT '',
    cost TEXT NOT NULL DEFAULT '',
    survey_rating TEXT NOT NULL DEFAULT ''
);
"#,
    // Migration 2: logs indexes for the filterable columns
    r#"CREATE INDEX IF NOT EXISTS idx_logs_branch_name ON logs(branch_name);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_logs_status ON logs(status);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_logs_channel ON logs(channel_of_request);"#,
    // Migration 3: branches table
    r#"
CREATE TABLE IF NOT EXISTS branches (
    code TEXT PRIMARY KEY,
    name TEXT NOT NULL DEFAULT '',
    regional_manager TEXT NOT NULL DEFAULT '',
    area_manager TEXT NOT NULL DEFAULT ''
);
"#,
];

#[cfg(test)]
mod tests {
    use crate::Database;

    #[tokio::test]
    async fn logs_table_columns_exist() {
        let db = Database::new_in_memory().await.unwrap();

        let columns: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM pragma_table_info('logs')")
                .fetch_all(db.pool())
                .await
                .unwrap();
        let names: Vec<&str> = columns.iter().map(|(n,)| n.as_str()).collect();

        for col in [
            "id",
            "branch_name",
            "date_of_request",
            "date_of_delivery",
            "material_created",
            "channel_of_request",
            "status",
            "survey_completed",
            "cost",
            "survey_rating",
        ] {
            assert!(names.contains(&col), "Missing logs.{col}");
        }
    }

    #[tokio::test]
    async fn branches_table_columns_exist() {
        let db = Database::new_in_memory().await.unwrap();

        let columns: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM pragma_table_info('branches')")
                .fetch_all(db.pool())
                .await
                .unwrap();
        let names: Vec<&str> = columns.iter().map(|(n,)| n.as_str()).collect();

        for col in ["code", "name", "regional_manager", "area_manager"] {
            assert!(names.contains(&col), "Missing branches.{col}");
        }
    }

    #[tokio::test]
    async fn filter_indexes_created() {
        let db = Database::new_in_memory().await.unwrap();

        let indexes: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type='index' AND name LIKE 'idx_%'",
        )
        .fetch_all(db.pool())
        .await
        .unwrap();
        let names: Vec<&str> = indexes.iter().map(|(n,)| n.as_str()).collect();

        assert!(names.contains(&"idx_logs_branch_name"));
        assert!(names.contains(&"idx_logs_status"));
        assert!(names.contains(&"idx_logs_channel"));
    }

    #[tokio::test]
    async fn all_versions_recorded() {
        let db = Database::new_in_memory().await.unwrap();

        let row: (i64,) = sqlx::query_as("SELECT COALESCE(MAX(version), 0) FROM _migrations")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(row.0 as usize, super::MIGRATIONS.len());
    }
}
