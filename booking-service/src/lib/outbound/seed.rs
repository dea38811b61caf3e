//! Startup data management: the development reset switch and the demo seed.

use auth::PasswordHasher;
use chrono::Duration;
use chrono::Utc;
use sqlx::PgConnection;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::activity::models::actions;

struct SeedUser {
    name: &'static str,
    email: &'static str,
    password: &'static str,
    role: usize,
}

const ROLES: [&str; 3] = ["administrator", "user", "receptionist"];

const USERS: [SeedUser; 2] = [
    SeedUser {
        name: "Admin",
        email: "admin@example.com",
        password: "admin123",
        role: 0,
    },
    SeedUser {
        name: "User1",
        email: "user1@example.com",
        password: "user123",
        role: 1,
    },
];

/// Advisory lock key held while checking for and writing seed data.
const SEED_LOCK_KEY: i64 = 0x5EED;

const SPACES: [(&str, i32, &str); 2] = [
    ("Meeting Room A", 10, "Floor 1"),
    ("Conference Room B", 50, "Floor 2"),
];

/// Drop every table, migration history included, so the next migration run
/// starts from an empty schema.
pub async fn reset_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        DROP TABLE IF EXISTS
            activity_logs, payments, bookings, spaces, users, roles, _sqlx_migrations
        CASCADE
        "#,
    )
    .execute(pool)
    .await?;

    tracing::warn!(database = "postgresql", "All tables dropped");
    Ok(())
}

/// Insert demo data unless roles already exist. Returns whether anything was
/// written.
///
/// Concurrent callers serialize on a transaction-scoped advisory lock, so
/// exactly one of them seeds.
pub async fn run_seeders(pool: &PgPool, hasher: &PasswordHasher) -> anyhow::Result<bool> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SEED_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    let roles: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM roles")
        .fetch_one(&mut *tx)
        .await?;

    if roles > 0 {
        tracing::info!(roles, "Seed data already present, skipping");
        tx.rollback().await?;
        return Ok(false);
    }

    tracing::info!("Seeding database");
    seed(&mut tx, hasher).await?;
    tx.commit().await?;

    tracing::info!("Database seeded");
    Ok(true)
}

async fn seed(conn: &mut PgConnection, hasher: &PasswordHasher) -> anyhow::Result<()> {
    let mut role_ids = Vec::with_capacity(ROLES.len());
    for name in ROLES {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO roles (id, name) VALUES ($1, $2)")
            .bind(id)
            .bind(name)
            .execute(&mut *conn)
            .await?;
        role_ids.push(id);
    }

    let now = Utc::now();

    let mut user_ids = Vec::with_capacity(USERS.len());
    for user in &USERS {
        let id = Uuid::new_v4();
        let password_hash = hasher.hash(user.password)?;
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, role_id, registered_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id)
        .bind(user.name)
        .bind(user.email)
        .bind(password_hash)
        .bind(role_ids[user.role])
        .bind(now)
        .execute(&mut *conn)
        .await?;
        user_ids.push(id);
    }

    let mut space_ids = Vec::with_capacity(SPACES.len());
    for (name, capacity, location) in SPACES {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO spaces (id, name, capacity, location) VALUES ($1, $2, $3, $4)")
            .bind(id)
            .bind(name)
            .bind(capacity)
            .bind(location)
            .execute(&mut *conn)
            .await?;
        space_ids.push(id);
    }

    // (user, space, days ahead, hours long, status)
    let bookings = [
        (user_ids[0], space_ids[0], 1, 2, "confirmed"),
        (user_ids[1], space_ids[1], 2, 3, "pending"),
    ];
    let mut booking_ids = Vec::with_capacity(bookings.len());
    for (user_id, space_id, days, hours, status) in bookings {
        let id = Uuid::new_v4();
        let starts_at = now + Duration::days(days);
        sqlx::query(
            r#"
            INSERT INTO bookings (id, user_id, space_id, starts_at, ends_at, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(space_id)
        .bind(starts_at)
        .bind(starts_at + Duration::hours(hours))
        .bind(status)
        .execute(&mut *conn)
        .await?;
        booking_ids.push(id);
    }

    let payments = [
        (booking_ids[0], 100.50_f64, "card", "paid"),
        (booking_ids[1], 50.00_f64, "cash", "pending"),
    ];
    for (booking_id, amount, method, status) in payments {
        sqlx::query(
            r#"
            INSERT INTO payments (id, booking_id, amount, method, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(booking_id)
        .bind(amount)
        .bind(method)
        .bind(status)
        .bind(now)
        .execute(&mut *conn)
        .await?;
    }

    let logs = [
        (user_ids[0], actions::LOGIN, "User Admin logged in"),
        (
            user_ids[1],
            actions::BOOKING_CREATED,
            "User1 booked Conference Room B",
        ),
    ];
    for (user_id, action, details) in logs {
        sqlx::query(
            r#"
            INSERT INTO activity_logs (id, user_id, action, details, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(action)
        .bind(details)
        .bind(now)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}
