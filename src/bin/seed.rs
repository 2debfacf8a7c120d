//! Seed script for development — populates a fresh database with sample data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Reads the same environment as the server (`DATABASE_URL` or `DB_*`, `.env`).

use extension_tracker::models::project::ProjectInput;
use extension_tracker::services::{auth, project};
use sqlx::PgPool;

const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "Test123!";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter("info").init();

    let db_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        extension_tracker::config::build_database_url(
            &std::env::var("DB_SERVER").unwrap_or_else(|_| "localhost".to_string()),
            &std::env::var("DB_NAME").unwrap_or_else(|_| "evsudb".to_string()),
            std::env::var("DB_USER").ok().as_deref(),
            std::env::var("DB_PASSWORD").ok().as_deref(),
        )
    });
    let pool = extension_tracker::db::create_pool(&db_url, 5).await?;

    // Run migrations first
    extension_tracker::db::run_migrations(&pool).await?;

    println!("=== Extension Tracker Seed Script ===");

    seed_admin_user(&pool).await?;
    seed_projects(&pool).await?;

    println!("\n=== Seed complete! ===");
    println!("Admin login: {ADMIN_USERNAME} / {ADMIN_PASSWORD}");

    Ok(())
}

async fn seed_admin_user(pool: &PgPool) -> anyhow::Result<()> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(ADMIN_USERNAME)
            .fetch_one(pool)
            .await?;

    if exists {
        let hash = auth::hash_password(ADMIN_PASSWORD)?;
        sqlx::query("UPDATE users SET password_hash = $1 WHERE username = $2")
            .bind(&hash)
            .bind(ADMIN_USERNAME)
            .execute(pool)
            .await?;
        println!("[done] Updated admin password");
        return Ok(());
    }

    auth::create_user(pool, ADMIN_USERNAME, ADMIN_PASSWORD).await?;
    println!("[done] Created admin user");
    Ok(())
}

async fn seed_projects(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        println!("[skip] {count} projects already present");
        return Ok(());
    }

    let samples = [
        (
            "Coastal Mangrove Rehabilitation",
            "Palo, Leyte",
            "Dr. A. Santos",
            "March 2023",
            "Completed",
            "14,13,15",
            "Main Campus",
            (125.0089, 11.1575),
        ),
        (
            "Community Literacy Caravan",
            "Tanauan, Leyte",
            "Prof. L. Reyes",
            "June 14, 2024",
            "In Progress",
            "4,10",
            "Tanauan Campus",
            (125.0176, 11.1103),
        ),
        (
            "Solar Water Pumps for Farmers",
            "Ormoc City",
            "Engr. M. Dela Cruz",
            "January 2022",
            "Completed",
            "6,7,2",
            "Ormoc Campus",
            (124.6075, 11.0064),
        ),
        (
            "Barangay Health Records Digitization",
            "Tacloban City",
            "Dr. J. Villanueva",
            "September 3, 2024",
            "In Progress",
            "3,9",
            "Main Campus",
            (125.0038, 11.2443),
        ),
    ];

    for (title, location, leader, date, status, sdg, campus, (x, y)) in samples {
        let input = ProjectInput {
            title: Some(title.to_string()),
            projectlocation: Some(location.to_string()),
            leader: Some(leader.to_string()),
            projectdate: Some(date.to_string()),
            duration: Some("6 months".to_string()),
            projectstatus: Some(status.to_string()),
            x: Some(x),
            y: Some(y),
            sdg: Some(sdg.to_string()),
            collegecampus: Some(campus.to_string()),
            ..Default::default()
        };
        project::create(pool, &input).await?;
    }

    println!("[done] Created {} sample projects", samples.len());
    Ok(())
}
