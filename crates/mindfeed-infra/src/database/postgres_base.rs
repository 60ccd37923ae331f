use std::marker::PhantomData;

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, DbConn, DbErr, EntityTrait, IntoActiveModel, PrimaryKeyTrait,
};

use mindfeed_core::error::RepoError;

/// Generic PostgreSQL repository: primary-key lookups, deletes and upserts for
/// any SeaORM entity. Entity-specific repositories are type aliases of this
/// struct with their port implemented on top of these helpers.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + Send,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub(crate) async fn find_model<ID>(&self, id: ID) -> Result<Option<E::Model>, RepoError>
    where
        ID: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    {
        E::find_by_id(id).one(&self.db).await.map_err(read_error)
    }

    /// Returns whether a row was removed.
    pub(crate) async fn delete_model<ID>(&self, id: ID) -> Result<bool, RepoError>
    where
        ID: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    {
        let result = E::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(read_error)?;

        Ok(result.rows_affected > 0)
    }

    /// `INSERT .. ON CONFLICT .. RETURNING *` in one round trip.
    pub(crate) async fn upsert_model(
        &self,
        model: E::ActiveModel,
        on_conflict: OnConflict,
    ) -> Result<E::Model, RepoError> {
        E::insert(model)
            .on_conflict(on_conflict)
            .exec_with_returning(&self.db)
            .await
            .map_err(write_error)
    }
}

pub(crate) fn read_error(e: DbErr) -> RepoError {
    match e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(e.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

pub(crate) fn write_error(e: DbErr) -> RepoError {
    let message = e.to_string();
    if message.contains("duplicate") || message.contains("unique") {
        RepoError::Constraint(message)
    } else {
        read_error(e)
    }
}
