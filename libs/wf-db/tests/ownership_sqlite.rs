#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Ownership ledger, creation checks and owner scoping against in-memory
//! sqlite.

use sea_orm::entity::prelude::*;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;
use sea_orm_migration::prelude as mig;
use wf_db::ownership::entity as ownership;
use wf_db::{
    OwnedEntity, OwnerScopeExt, OwnershipChecker, OwnershipError, OwnershipMode,
    create_with_ownership, ensure_owner, owner_of,
};
use wf_security::{BuildId, Kind, Originator, ProjectId, SecurityContext, UserId};

mod project {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "projects")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

mod build {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "builds")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub project_id: Uuid,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl OwnedEntity for project::Entity {
    fn kind() -> Kind {
        Kind::Project
    }

    fn id_column() -> project::Column {
        project::Column::Id
    }
}

struct CreateTestTables;

impl mig::MigrationName for CreateTestTables {
    fn name(&self) -> &'static str {
        "m900_create_test_tables"
    }
}

#[async_trait::async_trait]
impl mig::MigrationTrait for CreateTestTables {
    async fn up(&self, manager: &mig::SchemaManager) -> Result<(), mig::DbErr> {
        manager
            .create_table(
                mig::Table::create()
                    .table(mig::Alias::new("projects"))
                    .col(
                        mig::ColumnDef::new(mig::Alias::new("id"))
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        mig::ColumnDef::new(mig::Alias::new("name"))
                            .string()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_table(
                mig::Table::create()
                    .table(mig::Alias::new("builds"))
                    .col(
                        mig::ColumnDef::new(mig::Alias::new("id"))
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        mig::ColumnDef::new(mig::Alias::new("project_id"))
                            .uuid()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, _manager: &mig::SchemaManager) -> Result<(), mig::DbErr> {
        Ok(())
    }
}

struct TestMigrator;

#[async_trait::async_trait]
impl MigratorTrait for TestMigrator {
    fn migrations() -> Vec<Box<dyn mig::MigrationTrait>> {
        let mut migrations = wf_db::migrations::Migrator::migrations();
        migrations.push(Box::new(CreateTestTables));
        migrations
    }
}

async fn inmem_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to in-memory database");
    TestMigrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

fn ctx(user: UserId) -> SecurityContext {
    SecurityContext::builder().subject_id(user).build()
}

async fn create_project(
    db: &DatabaseConnection,
    checker: &dyn OwnershipChecker,
    ctx: &SecurityContext,
    id: ProjectId,
) -> Result<project::Model, OwnershipError> {
    let am = project::ActiveModel {
        id: Set(id.uuid()),
        name: Set(format!("project {id}")),
    };
    create_with_ownership(db, checker, ctx, id.into(), &[], |tx| {
        Box::pin(async move { am.insert(tx).await })
    })
    .await
}

async fn create_build(
    db: &DatabaseConnection,
    checker: &dyn OwnershipChecker,
    ctx: &SecurityContext,
    id: BuildId,
    project: ProjectId,
) -> Result<build::Model, OwnershipError> {
    let am = build::ActiveModel {
        id: Set(id.uuid()),
        project_id: Set(project.uuid()),
    };
    create_with_ownership(db, checker, ctx, id.into(), &[project.as_resource()], |tx| {
        Box::pin(async move { am.insert(tx).await })
    })
    .await
}

#[tokio::test]
async fn strict_rejects_parent_owned_by_someone_else() {
    let db = inmem_db().await;
    let strict = OwnershipMode::Strict.checker();
    let (alice, bob) = (UserId::generate(), UserId::generate());
    let p = ProjectId::generate();
    create_project(&db, strict.as_ref(), &ctx(alice), p)
        .await
        .unwrap();

    let e = BuildId::generate();
    let err = create_build(&db, strict.as_ref(), &ctx(bob), e, p)
        .await
        .unwrap_err();

    assert!(matches!(err, OwnershipError::Unauthorized { entity } if entity == p.as_resource()));
    assert!(build::Entity::find().all(&db).await.unwrap().is_empty());
    assert_eq!(owner_of(&db, e.into()).await.unwrap(), None);
}

#[tokio::test]
async fn strict_allows_owner_and_records_ownership() {
    let db = inmem_db().await;
    let strict = OwnershipMode::Strict.checker();
    let (alice, bob) = (UserId::generate(), UserId::generate());
    let p = ProjectId::generate();
    create_project(&db, strict.as_ref(), &ctx(alice), p)
        .await
        .unwrap();

    let e = BuildId::generate();
    let created = create_build(&db, strict.as_ref(), &ctx(alice), e, p)
        .await
        .unwrap();
    assert_eq!(created.project_id, p.uuid());

    ensure_owner(&db, &ctx(alice), e.into()).await.unwrap();
    let err = ensure_owner(&db, &ctx(bob), e.into()).await.unwrap_err();
    assert!(matches!(err, OwnershipError::Unauthorized { .. }));
}

#[tokio::test]
async fn permissive_skips_verification_but_records_creator() {
    let db = inmem_db().await;
    let strict = OwnershipMode::Strict.checker();
    let permissive = OwnershipMode::Permissive.checker();
    let (alice, bob) = (UserId::generate(), UserId::generate());
    let p = ProjectId::generate();
    create_project(&db, strict.as_ref(), &ctx(alice), p)
        .await
        .unwrap();

    let e = BuildId::generate();
    create_build(&db, permissive.as_ref(), &ctx(bob), e, p)
        .await
        .unwrap();
    assert_eq!(owner_of(&db, e.into()).await.unwrap(), Some(bob));
}

#[tokio::test]
async fn unknown_and_invalid_parents_impose_no_constraint() {
    let db = inmem_db().await;
    let strict = OwnershipMode::Strict.checker();
    let bob = UserId::generate();

    create_build(&db, strict.as_ref(), &ctx(bob), BuildId::generate(), ProjectId::generate())
        .await
        .unwrap();
    create_build(&db, strict.as_ref(), &ctx(bob), BuildId::generate(), ProjectId::INVALID)
        .await
        .unwrap();
    assert_eq!(build::Entity::find().all(&db).await.unwrap().len(), 2);
}

#[tokio::test]
async fn creator_must_be_resolvable() {
    let db = inmem_db().await;
    for mode in [OwnershipMode::Strict, OwnershipMode::Permissive] {
        let checker = mode.checker();
        for ctx in [
            SecurityContext::anonymous(),
            SecurityContext::system(Originator::Worker),
        ] {
            let err = create_project(&db, checker.as_ref(), &ctx, ProjectId::generate())
                .await
                .unwrap_err();
            assert!(matches!(err, OwnershipError::UnknownUser));
        }
    }
    assert!(project::Entity::find().all(&db).await.unwrap().is_empty());
    assert!(ownership::Entity::find().all(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_creation_is_already_exists() {
    let db = inmem_db().await;
    let checker = OwnershipMode::Permissive.checker();
    let alice = UserId::generate();
    let p = ProjectId::generate();

    create_project(&db, checker.as_ref(), &ctx(alice), p)
        .await
        .unwrap();
    let err = create_project(&db, checker.as_ref(), &ctx(alice), p)
        .await
        .unwrap_err();
    assert!(matches!(err, OwnershipError::AlreadyExists(_)));
    assert_eq!(ownership::Entity::find().all(&db).await.unwrap().len(), 1);
}

#[tokio::test]
async fn ledger_failure_rolls_back_entity_insert() {
    let db = inmem_db().await;
    let checker = OwnershipMode::Permissive.checker();
    let (alice, bob) = (UserId::generate(), UserId::generate());
    let p = ProjectId::generate();

    ownership::ActiveModel {
        entity_id: Set(p.uuid()),
        entity_type: Set(Kind::Project.prefix().to_owned()),
        user_id: Set(bob.uuid()),
    }
    .insert(&db)
    .await
    .unwrap();

    let err = create_project(&db, checker.as_ref(), &ctx(alice), p)
        .await
        .unwrap_err();

    assert!(matches!(err, OwnershipError::AlreadyExists(_)));
    assert!(project::Entity::find().all(&db).await.unwrap().is_empty());
    assert_eq!(owner_of(&db, p.into()).await.unwrap(), Some(bob));
}

#[tokio::test]
async fn ensure_owner_edge_cases() {
    let db = inmem_db().await;
    let missing = ProjectId::generate();

    let err = ensure_owner(&db, &ctx(UserId::generate()), missing.into())
        .await
        .unwrap_err();
    assert!(matches!(err, OwnershipError::NotFound(id) if id == missing.as_resource()));

    ensure_owner(&db, &SecurityContext::system(Originator::Scheduler), missing.into())
        .await
        .unwrap();

    let err = ensure_owner(&db, &SecurityContext::anonymous(), missing.into())
        .await
        .unwrap_err();
    assert!(matches!(err, OwnershipError::UnknownUser));
}

#[tokio::test]
async fn ledger_row_carries_kind_prefix() {
    let db = inmem_db().await;
    let alice = UserId::generate();
    let p = ProjectId::generate();
    create_project(&db, OwnershipMode::Strict.checker().as_ref(), &ctx(alice), p)
        .await
        .unwrap();

    let row = ownership::Entity::find_by_id(p.uuid())
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.entity_type, "prj");
    assert_eq!(row.user_id, alice.uuid());
}

#[tokio::test]
async fn scope_to_owner_filters_rows() {
    let db = inmem_db().await;
    let checker = OwnershipMode::Strict.checker();
    let (alice, bob) = (UserId::generate(), UserId::generate());
    let (pa, pb) = (ProjectId::generate(), ProjectId::generate());
    create_project(&db, checker.as_ref(), &ctx(alice), pa)
        .await
        .unwrap();
    create_project(&db, checker.as_ref(), &ctx(bob), pb)
        .await
        .unwrap();

    let mine = project::Entity::find()
        .scope_to_owner(&ctx(alice))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, pa.uuid());

    let all = project::Entity::find()
        .scope_to_owner(&SecurityContext::system(Originator::Migration))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let none = project::Entity::find()
        .scope_to_owner(&SecurityContext::anonymous())
        .all(&db)
        .await
        .unwrap();
    assert!(none.is_empty());

    let by_id = project::Entity::find_by_id(pb.uuid())
        .scope_to_owner(&ctx(alice))
        .one(&db)
        .await
        .unwrap();
    assert!(by_id.is_none());
}
