use anyhow::Context;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

/// Таблица схемы: имя, DDL и индексы, создаваемые вместе с ней
struct TableSchema {
    name: &'static str,
    create: &'static str,
    indexes: &'static [&'static str],
}

const SCHEMA: &[TableSchema] = &[
    TableSchema {
        name: "tbl_stock",
        create: r#"
            CREATE TABLE tbl_stock (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                refver INTEGER,
                refverreel INTEGER,
                nomprod TEXT,
                nomver TEXT,
                poidini REAL,
                pdjr REAL,
                cumultg REAL,
                stockstat REAL,
                tcondi REAL,
                estimat REAL,
                soldverge REAL,
                codvar INTEGER,
                nomvar TEXT,
                "user" TEXT,
                station TEXT,
                activ TEXT,
                camp TEXT,
                dteupdate TEXT
            );
        "#,
        indexes: &[
            "CREATE INDEX IF NOT EXISTS idx_stock_natural_key ON tbl_stock (refver, nomprod);",
        ],
    },
    TableSchema {
        name: "tb_reception",
        create: r#"
            CREATE TABLE tb_reception (
                id TEXT PRIMARY KEY NOT NULL,
                refver INTEGER NOT NULL,
                codvar INTEGER NOT NULL,
                station TEXT NOT NULL DEFAULT 'zaouia',
                nomver TEXT,
                producteur TEXT,
                nomvar TEXT,
                pdpese REAL,
                pdrecjr REAL,
                pdrectotal REAL,
                pdcond REAL,
                stockstat REAL,
                estima REAL,
                soldverg REAL,
                camp TEXT,
                dtupdate TEXT
            );
        "#,
        indexes: &[],
    },
    TableSchema {
        name: "dossier_export",
        create: r#"
            CREATE TABLE dossier_export (
                id TEXT PRIMARY KEY NOT NULL,
                numdos TEXT NOT NULL,
                numtc TEXT,
                navire TEXT,
                dtedep TEXT,
                codpay TEXT,
                nompay TEXT,
                coddes TEXT,
                rsclient TEXT,
                transite TEXT,
                transpor TEXT,
                refexp TEXT,
                exporter TEXT,
                codvar TEXT,
                produit TEXT,
                nbrpal REAL,
                nbrcol REAL,
                pdscom REAL,
                typtrp TEXT,
                stations TEXT DEFAULT 'zaouia',
                date_creation TEXT NOT NULL
            );
        "#,
        indexes: &[
            "CREATE INDEX IF NOT EXISTS idx_dossier_export_numdos ON dossier_export (numdos);",
            "CREATE INDEX IF NOT EXISTS idx_dossier_export_dtedep ON dossier_export (dtedep);",
            "CREATE INDEX IF NOT EXISTS idx_dossier_export_stations ON dossier_export (stations);",
        ],
    },
    TableSchema {
        name: "rapport_ventes",
        create: r#"
            CREATE TABLE rapport_ventes (
                id TEXT PRIMARY KEY NOT NULL,
                num_vnt TEXT NOT NULL,
                station TEXT DEFAULT 'zaouia',
                date_vente TEXT,
                cod_var TEXT,
                varietes TEXT,
                cod_type TEXT,
                type_ecart TEXT,
                ref_ach TEXT,
                acheteurs TEXT,
                poid_brut REAL,
                poid_pese REAL,
                dif_pese REAL,
                prx_kg REAL,
                montant_vente REAL,
                montant_reglement REAL NOT NULL DEFAULT 0,
                sold_vente REAL,
                date_creation TEXT NOT NULL,
                date_mise_a_jour TEXT NOT NULL
            );
        "#,
        indexes: &[
            "CREATE INDEX IF NOT EXISTS idx_rapport_ventes_date_vente ON rapport_ventes (date_vente);",
            "CREATE INDEX IF NOT EXISTS idx_rapport_ventes_station ON rapport_ventes (station);",
        ],
    },
    TableSchema {
        name: "decompt_prod",
        create: r#"
            CREATE TABLE decompt_prod (
                id TEXT PRIMARY KEY NOT NULL,
                refver INTEGER NOT NULL,
                nomadh TEXT,
                codvar INTEGER NOT NULL,
                nomvar TEXT,
                pd_reception REAL NOT NULL DEFAULT 0,
                pdcond REAL NOT NULL DEFAULT 0,
                exp_cat_i REAL NOT NULL DEFAULT 0,
                exp_cat_ii REAL NOT NULL DEFAULT 0,
                pd_ecart REAL NOT NULL DEFAULT 0,
                freinte REAL NOT NULL DEFAULT 0,
                stations TEXT,
                date_creation TEXT NOT NULL
            );
        "#,
        indexes: &[
            "CREATE INDEX IF NOT EXISTS idx_decompt_prod_refver ON decompt_prod (refver);",
            "CREATE INDEX IF NOT EXISTS idx_decompt_prod_codvar ON decompt_prod (codvar);",
        ],
    },
    TableSchema {
        name: "sys_users",
        create: r#"
            CREATE TABLE sys_users (
                id TEXT PRIMARY KEY NOT NULL,
                username TEXT NOT NULL UNIQUE COLLATE NOCASE,
                email TEXT,
                first_name TEXT,
                last_name TEXT,
                password_hash TEXT NOT NULL,
                email_confirmed INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
        "#,
        indexes: &[],
    },
    TableSchema {
        name: "sys_roles",
        create: r#"
            CREATE TABLE sys_roles (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL UNIQUE COLLATE NOCASE
            );
        "#,
        indexes: &[],
    },
    TableSchema {
        name: "sys_user_roles",
        create: r#"
            CREATE TABLE sys_user_roles (
                user_id TEXT NOT NULL,
                role_id TEXT NOT NULL,
                PRIMARY KEY (user_id, role_id),
                FOREIGN KEY (user_id) REFERENCES sys_users(id) ON DELETE CASCADE,
                FOREIGN KEY (role_id) REFERENCES sys_roles(id) ON DELETE CASCADE
            );
        "#,
        indexes: &[],
    },
];

/// Открывает (или создаёт) файл БД и досоздаёт недостающие таблицы
pub async fn initialize_database(db_path: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create database directory {}", parent.display()))?;
    }
    let absolute_path = if db_path.is_absolute() {
        db_path.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_path)
    };
    // Нормализуем разделители пути и форму URL под Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    let mut options = ConnectOptions::new(db_url);
    options.sqlx_logging(false);
    let conn = Database::connect(options)
        .await
        .with_context(|| format!("Cannot open database {}", absolute_path.display()))?;

    bootstrap_schema(&conn).await?;
    Ok(conn)
}

pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for table in SCHEMA {
        if !table_exists(conn, table.name).await? {
            tracing::info!("Creating {} table", table.name);
            execute(conn, table.create)
                .await
                .with_context(|| format!("Cannot create table {}", table.name))?;
        }
        for index in table.indexes {
            execute(conn, index).await?;
        }
    }

    Ok(())
}

async fn table_exists(conn: &DatabaseConnection, name: &str) -> anyhow::Result<bool> {
    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type='table' AND name = ?;",
            [name.into()],
        ))
        .await?;
    Ok(!rows.is_empty())
}

async fn execute(conn: &DatabaseConnection, sql: &str) -> anyhow::Result<()> {
    conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
        .await?;
    Ok(())
}

/// БД в памяти с полной схемой, одно соединение в пуле,
/// чтобы все запросы видели одни данные.
#[cfg(test)]
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let conn = Database::connect(options).await?;
    bootstrap_schema(&conn).await?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bootstrap_creates_every_table_and_is_idempotent() {
        let conn = connect_in_memory().await.unwrap();
        for table in SCHEMA {
            assert!(table_exists(&conn, table.name).await.unwrap(), "{}", table.name);
        }
        bootstrap_schema(&conn).await.unwrap();
    }
}
