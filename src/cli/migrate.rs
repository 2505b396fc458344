use crate::core::db::{async_db, migrate_db};
use anyhow::{Result, anyhow};

pub async fn run(db: bool, db_path: &str) -> Result<()> {
    if !db {
        return Err(anyhow!("Missing value for migrate \"--db\""));
    }

    // Run the DB migration script
    println!("Migrating db...");
    let db = async_db(db_path).await?;
    let applied = db.call(|conn| Ok(migrate_db(conn)?)).await?;
    if applied == 0 {
        println!("DB is already up to date");
    } else {
        println!("Finished migrating db ({} migrations applied)", applied);
    }

    Ok(())
}
