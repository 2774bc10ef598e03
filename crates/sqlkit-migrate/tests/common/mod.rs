//! Migrations shared by the integration tests.

#![allow(dead_code)]

use sqlkit_migrate::prelude::*;

pub struct CreateAnimal;

impl Migration for CreateAnimal {
    fn up(&self, ctx: &mut MigrationContext<'_>) -> Result<()> {
        ctx.create_table(
            &Table::new("Animal")
                .column(Column::int32("id").primary_key().auto_increment())
                .column(Column::string("Description", 50).not_null())
                .column(Column::boolean("Wild").not_null().default_value(false)),
        )
    }

    fn down(&self, ctx: &mut MigrationContext<'_>) -> Result<()> {
        ctx.drop_table("Animal")
    }
}

pub struct AddCode;

impl Migration for AddCode {
    fn up(&self, ctx: &mut MigrationContext<'_>) -> Result<()> {
        ctx.add_column("Animal", &Column::string("Code", 10))?;
        ctx.add_unique_key("uk_animal_code", "Animal", &["Code"])
    }

    fn down(&self, ctx: &mut MigrationContext<'_>) -> Result<()> {
        ctx.drop_unique_key("uk_animal_code", "Animal")?;
        ctx.drop_column("Animal", "Code")
    }
}

pub struct InsertAnimals;

impl Migration for InsertAnimals {
    fn up(&self, ctx: &mut MigrationContext<'_>) -> Result<()> {
        ctx.insert("Animal", &["Description", "Code"], &values!["dog", "D"])?;
        ctx.insert("Animal", &["Description", "Code"], &values!["wolf", "W"])?;
        ctx.update(
            "Animal",
            &["Wild"],
            &values![true],
            Some(&Filter::eq("Code", "W")),
        )
    }

    fn down(&self, ctx: &mut MigrationContext<'_>) -> Result<()> {
        ctx.delete("Animal", None)
    }
}

pub fn registry() -> MigrationRegistry {
    let mut registry = MigrationRegistry::new();
    registry
        .migration(1, "create_animal", || CreateAnimal)
        .and_then(|r| r.migration(2, "add_code", || AddCode))
        .and_then(|r| r.migration(3, "insert_animals", || InsertAnimals))
        .expect("versions are unique");
    registry
}

pub async fn scalar(client: &SqliteDataClient, sql: &str) -> i64 {
    let value = client
        .query_scalar_i64(&Statement::new(sql))
        .await
        .expect("query failed")
        .unwrap_or(0);
    client.commit().await.expect("commit failed");
    value
}
