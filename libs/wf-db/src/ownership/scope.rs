//! Owner scoping for list/get queries.

use sea_orm::sea_query::{Expr, Query};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, Select};
use wf_security::{Kind, SecurityContext};

use super::entity;

/// An entity whose rows are tracked in the ownership ledger.
pub trait OwnedEntity: EntityTrait {
    /// Kind recorded as `entity_type` for this entity's rows.
    fn kind() -> Kind;

    /// Primary id column, matched against `ownerships.entity_id`.
    fn id_column() -> Self::Column;
}

/// Build a deny-all condition (`WHERE false`).
fn deny_all() -> Condition {
    Condition::all().add(Expr::value(false))
}

pub trait OwnerScopeExt: Sized {
    /// Restrict the query to rows owned by the subject of `ctx`.
    ///
    /// System originators see every row; anonymous callers see none. The
    /// condition is rebuilt on every call.
    #[must_use]
    fn scope_to_owner(self, ctx: &SecurityContext) -> Self;
}

impl<E> OwnerScopeExt for Select<E>
where
    E: OwnedEntity,
{
    fn scope_to_owner(self, ctx: &SecurityContext) -> Self {
        if ctx.is_system() {
            return self;
        }
        if !ctx.is_authenticated() {
            return self.filter(deny_all());
        }

        let owned = Query::select()
            .column(entity::Column::EntityId)
            .from(entity::Entity)
            .and_where(entity::Column::UserId.eq(ctx.subject_id().uuid()))
            .and_where(entity::Column::EntityType.eq(E::kind().prefix()))
            .to_owned();

        self.filter(E::id_column().in_subquery(owned))
    }
}
