// crates/db/src/queries/branches.rs
// Branch lookup-table CRUD. `put` is a full upsert keyed by code.

use branchlog_core::Branch;

use crate::{Database, DbResult};

type BranchRow = (String, String, String, String);

fn into_branch(row: BranchRow) -> Branch {
    let (code, name, regional_manager, area_manager) = row;
    Branch {
        code,
        name,
        regional_manager,
        area_manager,
    }
}

impl Database {
    /// Insert or fully replace the branch with this code. Upserting an
    /// existing code overwrites its fields without creating a second row.
    pub async fn put_branch(&self, branch: &Branch) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO branches (code, name, regional_manager, area_manager)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&branch.code)
        .bind(&branch.name)
        .bind(&branch.regional_manager)
        .bind(&branch.area_manager)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    pub async fn get_branch(&self, code: &str) -> DbResult<Option<Branch>> {
        let row: Option<BranchRow> = sqlx::query_as(
            "SELECT code, name, regional_manager, area_manager FROM branches WHERE code = ?1",
        )
        .bind(code)
        .fetch_optional(self.pool())
        .await?;
        Ok(row.map(into_branch))
    }

    /// All branches in stable code order.
    pub async fn list_branches(&self) -> DbResult<Vec<Branch>> {
        let rows: Vec<BranchRow> = sqlx::query_as(
            "SELECT code, name, regional_manager, area_manager FROM branches ORDER BY code",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(into_branch).collect())
    }

    /// Delete by code. A missing code is a no-op; logs referencing the
    /// branch by name are never touched (no cascade).
    pub async fn delete_branch(&self, code: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM branches WHERE code = ?1")
            .bind(code)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use branchlog_core::LogDraft;
    use pretty_assertions::assert_eq;

    fn branch(code: &str, name: &str) -> Branch {
        Branch {
            code: code.into(),
            name: name.into(),
            regional_manager: "R. Singh".into(),
            area_manager: "A. Lowe".into(),
        }
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let db = Database::new_in_memory().await.unwrap();
        db.put_branch(&branch("B01", "Armadale")).await.unwrap();

        let got = db.get_branch("B01").await.unwrap().unwrap();
        assert_eq!(got, branch("B01", "Armadale"));
        assert!(db.get_branch("B99").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_with_existing_code_replaces_without_duplicating() {
        let db = Database::new_in_memory().await.unwrap();
        db.put_branch(&branch("B01", "Armadale")).await.unwrap();
        db.put_branch(&branch("B01", "Armadale Central"))
            .await
            .unwrap();

        let branches = db.list_branches().await.unwrap();
        assert_eq!(branches.len(), 1);
        assert_eq!(branches[0].name, "Armadale Central");
    }

    #[tokio::test]
    async fn list_is_code_ordered() {
        let db = Database::new_in_memory().await.unwrap();
        db.put_branch(&branch("B02", "Midland")).await.unwrap();
        db.put_branch(&branch("B01", "Armadale")).await.unwrap();

        let codes: Vec<String> = db
            .list_branches()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.code)
            .collect();
        assert_eq!(codes, vec!["B01", "B02"]);
    }

    #[tokio::test]
    async fn delete_leaves_referencing_logs_alone() {
        let db = Database::new_in_memory().await.unwrap();
        db.put_branch(&branch("B01", "Armadale")).await.unwrap();
        let id = db
            .insert_log(&LogDraft {
                branch_name: "Armadale".into(),
                date_of_request: "2024-05-01".into(),
                date_of_delivery: "2024-05-02".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(db.delete_branch("B01").await.unwrap());
        assert!(!db.delete_branch("B01").await.unwrap());

        // No cascade: the log keeps its orphaned branch name.
        let log = db.get_log(id).await.unwrap().unwrap();
        assert_eq!(log.branch_name, "Armadale");
    }
}
