use anyhow::Context;
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::env;

/// Report `image_info` rows that break the upload record invariants
#[derive(Parser)]
struct Cli {
    #[arg(long)]
    database_url: Option<String>,

    /// Largest accepted upload in bytes
    #[arg(long, default_value_t = 20 * 1024 * 1024)]
    max_file_size: i64,
}

/// One invariant, as a query returning `id` and a `detail` column for offenders
struct Check {
    name: &'static str,
    query: &'static str,
}

const CHECKS: &[Check] = &[
    Check {
        name: "non-image content_type",
        query: r#"SELECT id, content_type AS detail FROM image_info
                  WHERE content_type NOT LIKE 'image/%'"#,
    },
    Check {
        name: "file_path not uploads/<year>/<month>/<file_name>",
        query: r#"SELECT id, file_path AS detail FROM image_info
                  WHERE file_path !~ '^uploads/[0-9]{4}/([1-9]|1[0-2])/'
                     OR right(file_path, length(file_name) + 1) <> '/' || file_name"#,
    },
    Check {
        name: "file_url not ending with file_path",
        query: r#"SELECT id, file_url AS detail FROM image_info
                  WHERE right(file_url, length(file_path) + 1) <> '/' || file_path"#,
    },
    Check {
        name: "file_name not a UUID plus extension",
        query: r#"SELECT id, file_name AS detail FROM image_info
                  WHERE file_name !~ '^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}(\.[^.]*)?$'"#,
    },
];

async fn run_check(pool: &PgPool, check: &Check) -> anyhow::Result<usize> {
    let rows = sqlx::query(check.query)
        .fetch_all(pool)
        .await
        .with_context(|| format!("check '{}' failed", check.name))?;

    println!("{}: {}", check.name, rows.len());
    for r in rows.iter() {
        let id: uuid::Uuid = r.get("id");
        let detail: Option<String> = r.get("detail");
        println!("  id: {}, value: {:?}", id, detail);
    }
    Ok(rows.len())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let db_url = cli
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .context("DATABASE_URL must be set or passed with --database-url")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await
        .context("failed to connect to database")?;

    let mut violations = 0;
    for check in CHECKS {
        violations += run_check(&pool, check).await?;
    }

    let oversized = sqlx::query("SELECT id, file_size FROM image_info WHERE file_size > $1")
        .bind(cli.max_file_size)
        .fetch_all(&pool)
        .await?;
    println!("file_size over {} bytes: {}", cli.max_file_size, oversized.len());
    for r in oversized.iter() {
        let id: uuid::Uuid = r.get("id");
        let file_size: i64 = r.get("file_size");
        println!("  id: {}, file_size: {}", id, file_size);
    }
    violations += oversized.len();

    if violations > 0 {
        anyhow::bail!("{} invalid image_info rows", violations);
    }
    println!("image_info is consistent");
    Ok(())
}
