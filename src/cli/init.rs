use crate::core::db::{async_db, migrate_db};
use anyhow::{Result, anyhow};
use std::fs;

pub async fn run(db: bool, db_path: &str) -> Result<()> {
    if !db {
        return Err(anyhow!("Missing value for init \"--db\""));
    }

    println!("Initializing db...");
    fs::create_dir_all(db_path)?;

    let db = async_db(db_path).await?;
    let applied = db.call(|conn| Ok(migrate_db(conn)?)).await?;
    println!("Finished initializing db ({} migrations applied)", applied);

    Ok(())
}
