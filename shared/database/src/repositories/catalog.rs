//! Catalog Repository
//!
//! Make/buy lists and master-list groupings, read from PostgreSQL.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;

use picklist_utils::{GroupingCatalog, MakeBuyCatalog};

#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn listed(&self, query: &'static str, tdgpn: &str) -> Result<bool> {
        let found: bool = sqlx::query_scalar(query)
            .bind(tdgpn.to_lowercase())
            .fetch_one(&self.pool)
            .await?;
        Ok(found)
    }
}

#[async_trait]
impl MakeBuyCatalog for PgCatalogRepository {
    async fn is_force_make(&self, tdgpn: &str) -> Result<bool> {
        self.listed(
            "SELECT EXISTS (SELECT 1 FROM make_part_numbers WHERE LOWER(tdgpn) = $1)",
            tdgpn,
        )
        .await
        .context("Failed to query make part numbers")
    }

    async fn is_force_buy(&self, tdgpn: &str) -> Result<bool> {
        self.listed(
            "SELECT EXISTS (SELECT 1 FROM buy_part_numbers WHERE LOWER(tdgpn) = $1)",
            tdgpn,
        )
        .await
        .context("Failed to query buy part numbers")
    }
}

#[async_trait]
impl GroupingCatalog for PgCatalogRepository {
    async fn grouping(&self, tdgpn: &str) -> Result<Option<String>> {
        let name: Option<String> = sqlx::query_scalar(
            r#"
            SELECT g.name
            FROM master_list ml
            JOIN groupings g ON g.group_entry_id = ml.grouping_group_entry_id
            WHERE LOWER(ml.tdgpn) = $1
            ORDER BY ml.master_list_entry_id
            LIMIT 1
            "#,
        )
        .bind(tdgpn.to_lowercase())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch master list grouping")?;

        Ok(name)
    }
}
