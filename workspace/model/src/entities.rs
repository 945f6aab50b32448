//! This file serves as the root for all SeaORM entity modules.
//! Two tables back the application: `users` holds credentials and
//! `notes` holds the note bodies with a back-reference to their author.

pub mod note;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::note::Entity as Note;
    pub use super::user::Entity as User;
}
