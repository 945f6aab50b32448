use sea_orm::entity::prelude::*;

/// A free-text note.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "notes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    /// The user who created the note. Nullable at the schema level.
    pub user_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Model {
    /// Whether `user_id` is recorded as the creator of this note.
    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.user_id == Some(user_id)
    }
}

impl ActiveModelBehavior for ActiveModel {}
