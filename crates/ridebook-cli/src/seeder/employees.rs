use std::time::Instant;

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use sqlx::{PgPool, Postgres, Transaction};

/// Seed data for one employee account.
#[derive(Debug, Clone)]
pub struct EmployeeSeed {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Generates `count` employees with unique `@example.com` addresses.
pub fn generate_employees(count: usize) -> Vec<EmployeeSeed> {
    (0..count)
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let email = format!(
                "{}.{}+employee{}@example.com",
                slug(&first_name),
                slug(&last_name),
                idx
            );
            EmployeeSeed {
                first_name,
                last_name,
                email,
            }
        })
        .collect()
}

fn slug(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Inserts fake employees with empty permissions; returns how many were new.
pub async fn seed_employees(db: &PgPool, count: usize) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("👥 Seeding {count} employees...");

    let employees = generate_employees(count);
    let mut tx = db.begin().await?;

    // 3 params per employee
    const BATCH_SIZE: usize = 1000;

    let mut inserted = 0;
    for chunk in employees.chunks(BATCH_SIZE) {
        inserted += insert_chunk(&mut tx, chunk).await?;
    }
    tx.commit().await?;

    println!("   ✓ Inserted {inserted} employees in {:?}", start_time.elapsed());
    Ok(inserted)
}

async fn insert_chunk(
    tx: &mut Transaction<'_, Postgres>,
    employees: &[EmployeeSeed],
) -> anyhow::Result<u64> {
    if employees.is_empty() {
        return Ok(0);
    }

    let mut query = String::from("INSERT INTO users (first_name, last_name, email) VALUES ");
    for i in 0..employees.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 3;
        query.push_str(&format!(
            "(${}, ${}, ${})",
            param_idx + 1,
            param_idx + 2,
            param_idx + 3
        ));
    }
    query.push_str(" ON CONFLICT (email) DO NOTHING");

    let mut q = sqlx::query(&query);
    for employee in employees {
        q = q
            .bind(&employee.first_name)
            .bind(&employee.last_name)
            .bind(&employee.email);
    }

    Ok(q.execute(&mut **tx).await?.rows_affected())
}

/// Deletes seeded accounts, never super admins.
pub async fn clear_seeded_employees(db: &PgPool) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded employees...");

    let deleted = sqlx::query(
        "DELETE FROM users WHERE email LIKE '%@example.com' AND role <> 'superadmin'",
    )
    .execute(db)
    .await?
    .rows_affected();

    println!("   ✓ Deleted {deleted} employees in {:?}", start_time.elapsed());
    Ok(deleted)
}
