//! Creation-time ownership checks.
//!
//! Two interchangeable checkers share one call shape. [`StrictOwnership`]
//! rejects a creation when any referenced parent is owned by someone other
//! than the creator. [`PermissiveOwnership`] skips verification. Both record
//! the new entity in the ledger inside the creating transaction.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseTransaction, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use wf_security::{ResourceId, SecurityContext, UserId};

use super::entity;
use crate::error::OwnershipError;

/// Strictness of creation-time ownership checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipMode {
    #[default]
    Strict,
    Permissive,
}

impl OwnershipMode {
    /// Checker for this mode.
    #[must_use]
    pub fn checker(self) -> Arc<dyn OwnershipChecker> {
        match self {
            Self::Strict => Arc::new(StrictOwnership),
            Self::Permissive => Arc::new(PermissiveOwnership),
        }
    }
}

#[async_trait]
pub trait OwnershipChecker: Send + Sync {
    /// Verify that `creator` may create an entity referencing `parents`.
    ///
    /// Invalid (nil) parent ids are ignored.
    ///
    /// # Errors
    ///
    /// `Unauthorized` when a parent is owned by someone else, `Db` on query
    /// failure.
    async fn verify_parents(
        &self,
        tx: &DatabaseTransaction,
        creator: UserId,
        parents: &[ResourceId],
    ) -> Result<(), OwnershipError>;
}

/// Every owned parent must belong to the creator. Parents without a ledger
/// row impose no constraint.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictOwnership;

#[async_trait]
impl OwnershipChecker for StrictOwnership {
    async fn verify_parents(
        &self,
        tx: &DatabaseTransaction,
        creator: UserId,
        parents: &[ResourceId],
    ) -> Result<(), OwnershipError> {
        for &parent in parents.iter().filter(|p| p.is_valid()) {
            if let Some(owner) = owner_of(tx, parent).await?
                && owner != creator
            {
                tracing::warn!(%parent, %owner, %creator, "parent owned by another user");
                return Err(OwnershipError::Unauthorized { entity: parent });
            }
        }
        Ok(())
    }
}

/// No verification.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveOwnership;

#[async_trait]
impl OwnershipChecker for PermissiveOwnership {
    async fn verify_parents(
        &self,
        _tx: &DatabaseTransaction,
        _creator: UserId,
        _parents: &[ResourceId],
    ) -> Result<(), OwnershipError> {
        Ok(())
    }
}

fn resolve_creator(ctx: &SecurityContext) -> Result<UserId, OwnershipError> {
    if ctx.is_authenticated() {
        Ok(ctx.subject_id())
    } else {
        Err(OwnershipError::UnknownUser)
    }
}

/// Insert callback run inside the creating transaction.
pub type InsertFuture<'c, T> = Pin<Box<dyn Future<Output = Result<T, DbErr>> + Send + 'c>>;

/// Create `entity` on behalf of `ctx`.
///
/// In one transaction: verify `parents` with `checker`, run `insert`, and
/// record the ledger row. Any failure drops the transaction, so nothing is
/// written. Uniqueness violations surface as `AlreadyExists`.
///
/// ```ignore
/// let build = create_with_ownership(&db, checker.as_ref(), &ctx, build_id.into(), &[project_id.into()], |tx| {
///     Box::pin(async move { am.insert(tx).await })
/// })
/// .await?;
/// ```
///
/// # Errors
///
/// - `UnknownUser` if `ctx` has no valid subject, before any query
/// - `Unauthorized` from the checker
/// - `AlreadyExists` / `Db` from the writes
#[tracing::instrument(skip_all, fields(entity = %entity))]
pub async fn create_with_ownership<C, T, F>(
    db: &C,
    checker: &dyn OwnershipChecker,
    ctx: &SecurityContext,
    entity: ResourceId,
    parents: &[ResourceId],
    insert: F,
) -> Result<T, OwnershipError>
where
    C: TransactionTrait,
    T: Send,
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> InsertFuture<'c, T> + Send,
{
    let creator = resolve_creator(ctx)?;
    let tx = db.begin().await?;

    checker.verify_parents(&tx, creator, parents).await?;
    let out = insert(&tx).await.map_err(OwnershipError::from_write)?;

    entity::Entity::insert(entity::ActiveModel {
        entity_id: Set(entity.uuid()),
        entity_type: Set(entity.kind().prefix().to_owned()),
        user_id: Set(creator.uuid()),
    })
    .exec_without_returning(&tx)
    .await
    .map_err(OwnershipError::from_write)?;

    tx.commit().await?;
    tracing::debug!(%creator, "ownership recorded");
    Ok(out)
}

/// Owner of `entity` according to the ledger.
///
/// # Errors
///
/// `Db` on query failure.
pub async fn owner_of<C>(conn: &C, entity: ResourceId) -> Result<Option<UserId>, OwnershipError>
where
    C: ConnectionTrait,
{
    let row = entity::Entity::find_by_id(entity.uuid())
        .filter(entity::Column::EntityType.eq(entity.kind().prefix()))
        .one(conn)
        .await?;
    Ok(row.map(|r| UserId::from_uuid(r.user_id)))
}

/// Require that `ctx` owns `entity`. System originators always pass.
///
/// # Errors
///
/// - `UnknownUser` if `ctx` has no valid subject
/// - `NotFound` if the ledger has no row for `entity`
/// - `Unauthorized` if someone else owns it
pub async fn ensure_owner<C>(
    conn: &C,
    ctx: &SecurityContext,
    entity: ResourceId,
) -> Result<(), OwnershipError>
where
    C: ConnectionTrait,
{
    if ctx.is_system() {
        return Ok(());
    }
    let user = resolve_creator(ctx)?;
    match owner_of(conn, entity).await? {
        None => Err(OwnershipError::NotFound(entity)),
        Some(owner) if owner == user => Ok(()),
        Some(_) => Err(OwnershipError::Unauthorized { entity }),
    }
}
