use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, Statement};
use sea_orm_migration::prelude::*;

mod departments;
mod event_levels;
mod images;
mod roles;
mod users;

pub async fn apply(conn: &DatabaseConnection) -> Result<(), DbErr> {
    let manager = SchemaManager::new(conn);

    departments::apply(&manager).await?;
    roles::apply(&manager).await?;
    event_levels::apply(&manager).await?;
    images::apply(&manager).await?;
    users::apply(&manager, conn).await?;
    apply_updated_at_trigger(conn).await?;

    Ok(())
}

async fn apply_updated_at_trigger(conn: &DatabaseConnection) -> Result<(), DbErr> {
    conn.execute(Statement::from_string(
        DbBackend::Postgres,
        r#"
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS trigger AS $$
BEGIN
  NEW.updated_at = now();
  RETURN NEW;
END;
$$ LANGUAGE plpgsql;
"#
        .to_string(),
    ))
    .await?;

    conn.execute(Statement::from_string(
        DbBackend::Postgres,
        r#"
DO $$
BEGIN
  IF NOT EXISTS (
    SELECT 1
    FROM pg_trigger
    WHERE tgname = 'trg_users_set_updated_at'
      AND tgrelid = 'users'::regclass
  ) THEN
    EXECUTE 'CREATE TRIGGER trg_users_set_updated_at
             BEFORE UPDATE ON users
             FOR EACH ROW
             EXECUTE FUNCTION set_updated_at()';
  END IF;
END $$;
"#
        .to_string(),
    ))
    .await?;

    Ok(())
}
