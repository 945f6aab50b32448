use model::entities::note;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{debug, info, instrument, trace, warn};

use crate::access::OwnershipPolicy;
use crate::error::{Result, ServiceError};
use crate::{NoteId, UserId};

/// Note rows. Update and delete address notes by id alone; ownership
/// enforcement lives in [`NoteStore::get_authorized`].
pub struct NoteStore<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> NoteStore<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    /// Persist `content` for `owner`. Blank content creates nothing.
    #[instrument(skip(self, content))]
    pub async fn create(&self, owner: UserId, content: &str) -> Result<NoteId> {
        if content.trim().is_empty() {
            debug!("Ignoring blank note submission from user {}", owner);
            return Err(ServiceError::EmptyContent);
        }

        let new_note = note::ActiveModel {
            content: Set(content.to_string()),
            user_id: Set(Some(owner)),
            ..Default::default()
        };

        let note_model = new_note.insert(self.conn).await?;
        info!("Note created with ID: {} for user {}", note_model.id, owner);
        Ok(note_model.id)
    }

    /// All notes created by `owner`, oldest first.
    #[instrument(skip(self))]
    pub async fn list_by_owner(&self, owner: UserId) -> Result<Vec<note::Model>> {
        let notes = note::Entity::find()
            .filter(note::Column::UserId.eq(owner))
            .order_by_asc(note::Column::Id)
            .all(self.conn)
            .await?;
        debug!("Retrieved {} notes for user {}", notes.len(), owner);
        Ok(notes)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, note_id: NoteId) -> Result<note::Model> {
        match note::Entity::find_by_id(note_id).one(self.conn).await? {
            Some(note_model) => Ok(note_model),
            None => {
                warn!("Note with ID {} not found", note_id);
                Err(ServiceError::NotFound(note_id))
            }
        }
    }

    /// Fetch a note on behalf of `actor`. Notes the policy hides look absent.
    #[instrument(skip(self))]
    pub async fn get_authorized(
        &self,
        note_id: NoteId,
        actor: UserId,
        policy: OwnershipPolicy,
    ) -> Result<note::Model> {
        let note_model = self.get(note_id).await?;
        if policy.permits(&note_model, actor) {
            Ok(note_model)
        } else {
            warn!("User {} denied access to note {} under {:?} policy", actor, note_id, policy);
            Err(ServiceError::NotFound(note_id))
        }
    }

    /// Replace the content of a note. Performs no ownership check.
    #[instrument(skip(self, content))]
    pub async fn update(&self, note_id: NoteId, content: &str) -> Result<()> {
        trace!("Looking up note {} for update", note_id);
        let existing = self.get(note_id).await?;

        let mut note_active: note::ActiveModel = existing.into();
        note_active.content = Set(content.to_string());
        note_active.update(self.conn).await?;

        info!("Note with ID {} updated", note_id);
        Ok(())
    }

    /// Remove a note. Performs no ownership check.
    #[instrument(skip(self))]
    pub async fn delete(&self, note_id: NoteId) -> Result<()> {
        let delete_result = note::Entity::delete_by_id(note_id).exec(self.conn).await?;
        debug!("Delete operation completed. Rows affected: {}", delete_result.rows_affected);
        if delete_result.rows_affected > 0 {
            info!("Note with ID {} deleted", note_id);
            Ok(())
        } else {
            warn!("Note with ID {} not found for deletion", note_id);
            Err(ServiceError::NotFound(note_id))
        }
    }
}
