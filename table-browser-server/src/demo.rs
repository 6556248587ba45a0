//! Demo tables for trying the browser against a fresh SQLite file

use sqlx::sqlite::SqlitePool;

/// Create the demo tables and fill them when `users` is still empty
pub async fn seed(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT UNIQUE NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            is_active BOOLEAN DEFAULT true
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            price REAL NOT NULL,
            stock INTEGER DEFAULT 0,
            category TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER REFERENCES users(id),
            product_id INTEGER REFERENCES products(id),
            quantity INTEGER NOT NULL,
            note TEXT,
            status TEXT DEFAULT 'pending'
        )
        "#,
    )
    .execute(pool)
    .await?;

    let user_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    if user_count.0 > 0 {
        tracing::info!("Demo tables already seeded");
        return Ok(());
    }

    seed_rows(pool).await
}

async fn seed_rows(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let first_names = [
        "Alice", "Bob", "Charlie", "Diana", "Evan", "Fiona", "George", "Hannah",
        "Isaac", "Julia", "Kevin", "Laura", "Michael", "Nancy", "Oscar", "Patricia",
    ];
    let last_names = [
        "Johnson", "Smith", "Brown", "Prince", "Davis", "Wilson", "Taylor", "Anderson",
        "Thomas", "Jackson", "White", "Harris", "Martin", "Thompson", "Garcia", "Lee",
    ];

    let mut transaction = pool.begin().await?;

    for index in 0..57 {
        let first = first_names[index % first_names.len()];
        let last = last_names[(index / 2) % last_names.len()];
        let email = format!("{}.{}{}@example.com", first.to_lowercase(), last.to_lowercase(), index);
        sqlx::query("INSERT INTO users (name, email, is_active) VALUES (?, ?, ?)")
            .bind(format!("{} {}", first, last))
            .bind(email)
            .bind(index % 5 != 0)
            .execute(&mut *transaction)
            .await?;
    }

    let categories = ["Electronics", "Furniture", "Stationery", "Kitchen", "Garden"];
    let product_types = ["Laptop", "Chair", "Notebook", "Kettle", "Lamp", "Desk", "Pen", "Hose"];

    for index in 0..40 {
        let product_type = product_types[index % product_types.len()];
        let category = categories[index % categories.len()];
        let price = 5.99 + (index as f64 * 12.5);
        sqlx::query("INSERT INTO products (name, price, stock, category) VALUES (?, ?, ?, ?)")
            .bind(format!("{} {}", product_type, index + 1))
            .bind(price)
            .bind(((index * 7 + 5) % 120) as i64)
            .bind(category)
            .execute(&mut *transaction)
            .await?;
    }

    // Notes contain LIKE metacharacters to exercise literal search
    let notes = [None, Some("gift wrap"), Some("10% discount applied"), Some("ship_by_friday")];
    let statuses = ["pending", "processing", "shipped", "completed", "cancelled"];

    for index in 0..230 {
        sqlx::query("INSERT INTO orders (user_id, product_id, quantity, note, status) VALUES (?, ?, ?, ?, ?)")
            .bind((index % 57 + 1) as i64)
            .bind((index % 40 + 1) as i64)
            .bind((index % 6 + 1) as i64)
            .bind(notes[index % notes.len()])
            .bind(statuses[index % statuses.len()])
            .execute(&mut *transaction)
            .await?;
    }

    transaction.commit().await?;

    tracing::info!(users = 57, products = 40, orders = 230, "Demo tables seeded");
    Ok(())
}
