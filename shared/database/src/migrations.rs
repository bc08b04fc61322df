use anyhow::Result;
use sqlx::PgPool;

/// Creates the catalog tables consulted during explosion and reconciliation.
pub async fn run_postgres_migrations(pool: &PgPool) -> Result<()> {
    tracing::info!("Running PostgreSQL migrations");

    // Purchasing: parts always made in house
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS make_part_numbers (
            id SERIAL PRIMARY KEY,
            tdgpn VARCHAR NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Purchasing: parts always bought complete
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS buy_part_numbers (
            id SERIAL PRIMARY KEY,
            tdgpn VARCHAR NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS groupings (
            group_entry_id SERIAL PRIMARY KEY,
            name VARCHAR NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Design master list
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS master_list (
            master_list_entry_id SERIAL PRIMARY KEY,
            tdgpn VARCHAR NOT NULL,
            description TEXT,
            vendor VARCHAR,
            vendor_pn VARCHAR,
            grouping_group_entry_id INTEGER REFERENCES groupings(group_entry_id),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Lookups always compare LOWER(tdgpn)
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_make_part_numbers_tdgpn ON make_part_numbers (LOWER(tdgpn))")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_buy_part_numbers_tdgpn ON buy_part_numbers (LOWER(tdgpn))")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_master_list_tdgpn ON master_list (LOWER(tdgpn))")
        .execute(pool)
        .await?;

    tracing::info!("PostgreSQL migrations completed successfully");
    Ok(())
}
