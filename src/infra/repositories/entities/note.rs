//! Note database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Note;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "notes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning user's id; deliberately not a foreign key, orphans surface on list
    pub owner: Uuid,
    pub title: String,
    /// Case-folded form of `title`, kept in sync by the repository.
    /// Carries the unique index that makes duplicate detection authoritative.
    #[sea_orm(unique)]
    pub title_norm: String,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Note {
    fn from(model: Model) -> Self {
        Note {
            id: model.id,
            owner: model.owner,
            title: model.title,
            text: model.text,
            completed: model.completed,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
