use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{Author, Event};

/// Sea-ORM entity for the `events` table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub author_id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    pub start_at: DateTimeWithTimeZone,
    pub end_at: DateTimeWithTimeZone,
    pub is_public: bool,
    pub is_published: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "domain_users::entity::Entity",
        from = "Column::AuthorId",
        to = "domain_users::entity::Column::Id"
    )]
    Author,
}

impl Related<domain_users::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Domain event, optionally carrying the author projection
    pub fn into_event(self, author: Option<domain_users::entity::Model>) -> Event {
        Event {
            id: self.id,
            author_id: self.author_id,
            author: author.map(Author::from),
            title: self.title,
            content: self.content,
            start_at: self.start_at.into(),
            end_at: self.end_at.into(),
            is_public: self.is_public,
            is_published: self.is_published,
            created_at: self.created_at.into(),
        }
    }
}
