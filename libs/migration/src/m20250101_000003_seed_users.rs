use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO users (email, name)
            VALUES
                ('alice@grit.com', 'Alice'),
                ('bob@google.com', 'Bob'),
                ('Cindy@yahoo.com', 'Cindy')
            ON CONFLICT (email) DO NOTHING
            "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Seeded authors that already own events stay behind
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            DELETE FROM users u
            WHERE u.email IN ('alice@grit.com', 'bob@google.com', 'Cindy@yahoo.com')
              AND NOT EXISTS (SELECT 1 FROM events e WHERE e.author_id = u.id)
            "#,
            )
            .await?;

        Ok(())
    }
}
