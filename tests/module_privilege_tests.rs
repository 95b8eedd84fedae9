//! Privilege enforcement tests for module operations
//!
//! Module membership mutations need schema-level CREATE and module-level
//! CREATE together; restructuring and module-identity changes need
//! ownership; calling a member is gated only by the routine's own ACL.

use modsql_ast::*;
use modsql_catalog::{NamespaceId, PUBLIC};
use modsql_executor::*;
use modsql_storage::*;
use modsql_types::*;

fn function_returning(name: &str, value: i64) -> ModuleElement {
    ModuleElement::CreateFunction(CreateFunctionStmt {
        name: QualifiedName::single(name),
        parameters: vec![],
        return_type: DataType::Integer,
        body: RoutineBody::Return(SqlValue::Integer(value)),
    })
}

/// Roles alice/bob/carol; module m1 in public owned by alice with member
/// f() returning 42; alice holds CREATE on the public schema; security on.
fn setup() -> Database {
    let mut db = Database::new();
    db.catalog.create_role("alice".to_string()).unwrap();
    db.catalog.create_role("bob".to_string()).unwrap();
    db.catalog.create_role("carol".to_string()).unwrap();

    let stmt = CreateModuleStmt {
        module_name: QualifiedName::single("m1"),
        authorization: Some("alice".to_string()),
        if_not_exists: false,
        elements: vec![function_returning("f", 42)],
    };
    ModuleExecutor::execute_create_module(&stmt, &mut db).unwrap();

    let public = db.catalog.schema_id("public").unwrap();
    db.catalog.grant_on_schema(public, "alice", PrivilegeType::Create, "admin").unwrap();

    db.enable_security();
    db
}

fn as_role(db: &mut Database, role: &str) {
    db.set_current_role(Some(role.to_string()));
}

fn add_routine_stmt(routine: ModuleElement) -> AlterModuleAddRoutineStmt {
    AlterModuleAddRoutineStmt {
        module_name: QualifiedName::single("m1"),
        or_replace: false,
        routine,
    }
}

fn grant_stmt(
    privilege: PrivilegeType,
    target: ModulePrivilegeTarget,
    grantee: &str,
) -> ModuleGrantStmt {
    ModuleGrantStmt {
        privilege,
        module_name: QualifiedName::single("m1"),
        target,
        grantees: vec![grantee.to_string()],
    }
}

fn revoke_stmt(
    privilege: PrivilegeType,
    target: ModulePrivilegeTarget,
    grantee: &str,
) -> ModuleRevokeStmt {
    ModuleRevokeStmt {
        privilege,
        module_name: QualifiedName::single("m1"),
        target,
        grantees: vec![grantee.to_string()],
    }
}

fn call_f(db: &Database) -> Result<SqlValue, ExecutorError> {
    RoutineCallExecutor::execute_call(db, &QualifiedName::new(vec!["m1".into(), "f".into()]), &[])
}

#[test]
fn test_adding_member_needs_both_schema_and_module_create() {
    let mut db = setup();
    let public = db.catalog.schema_id("public").unwrap();
    let module = db.catalog.module_id(public, "m1").unwrap();

    // Schema CREATE alone: the module-level check names the missing grant
    db.catalog.grant_on_schema(public, "bob", PrivilegeType::Create, "admin").unwrap();
    as_role(&mut db, "bob");
    let err =
        ModuleExecutor::execute_alter_module_add_routine(&add_routine_stmt(function_returning("g", 1)), &mut db)
            .unwrap_err();
    match err {
        ExecutorError::InsufficientPrivilege { privilege, .. } => {
            assert!(privilege.contains("module"));
        }
        other => panic!("expected InsufficientPrivilege, got {:?}", other),
    }

    // Both grants: allowed
    db.catalog.grant_on_module(module, "bob", PrivilegeType::Create, "alice").unwrap();
    ModuleExecutor::execute_alter_module_add_routine(&add_routine_stmt(function_returning("g", 1)), &mut db)
        .unwrap();
    assert!(db.catalog.find_routine(NamespaceId::Module(module), "g", &[]).is_some());

    // Module CREATE alone: the schema-level check names the missing grant
    db.catalog.revoke_on_schema(public, "bob", PrivilegeType::Create).unwrap();
    let err =
        ModuleExecutor::execute_alter_module_add_routine(&add_routine_stmt(function_returning("h", 2)), &mut db)
            .unwrap_err();
    match err {
        ExecutorError::InsufficientPrivilege { privilege, .. } => {
            assert!(privilege.contains("schema"));
        }
        other => panic!("expected InsufficientPrivilege, got {:?}", other),
    }
}

#[test]
fn test_module_create_revoke_and_regrant() {
    let mut db = setup();
    let public = db.catalog.schema_id("public").unwrap();
    let module = db.catalog.module_id(public, "m1").unwrap();
    db.catalog.grant_on_schema(public, "bob", PrivilegeType::Create, "admin").unwrap();
    db.catalog.grant_on_module(module, "bob", PrivilegeType::Create, "alice").unwrap();

    as_role(&mut db, "bob");
    ModuleExecutor::execute_alter_module_add_routine(&add_routine_stmt(function_returning("g", 1)), &mut db)
        .unwrap();

    as_role(&mut db, "alice");
    ModuleRevokeExecutor::execute_revoke(
        &revoke_stmt(PrivilegeType::Create, ModulePrivilegeTarget::Module, "bob"),
        &mut db,
    )
    .unwrap();

    as_role(&mut db, "bob");
    assert!(ModuleExecutor::execute_alter_module_add_routine(
        &add_routine_stmt(function_returning("h", 2)),
        &mut db
    )
    .is_err());

    as_role(&mut db, "alice");
    ModuleGrantExecutor::execute_grant(
        &grant_stmt(PrivilegeType::Create, ModulePrivilegeTarget::Module, "bob"),
        &mut db,
    )
    .unwrap();

    as_role(&mut db, "bob");
    ModuleExecutor::execute_alter_module_add_routine(&add_routine_stmt(function_returning("h", 2)), &mut db)
        .unwrap();
}

#[test]
fn test_module_create_grants_are_per_role() {
    let mut db = setup();
    let public = db.catalog.schema_id("public").unwrap();
    let module = db.catalog.module_id(public, "m1").unwrap();
    for role in ["bob", "carol"] {
        db.catalog.grant_on_schema(public, role, PrivilegeType::Create, "admin").unwrap();
        db.catalog.grant_on_module(module, role, PrivilegeType::Create, "alice").unwrap();
    }

    db.catalog.revoke_on_module(module, "bob", PrivilegeType::Create).unwrap();

    as_role(&mut db, "bob");
    assert!(ModuleExecutor::execute_alter_module_add_routine(
        &add_routine_stmt(function_returning("g", 1)),
        &mut db
    )
    .is_err());

    as_role(&mut db, "carol");
    ModuleExecutor::execute_alter_module_add_routine(&add_routine_stmt(function_returning("g", 1)), &mut db)
        .unwrap();
}

#[test]
fn test_execute_is_gated_by_routine_acl() {
    let mut db = setup();

    as_role(&mut db, "bob");
    assert!(matches!(call_f(&db), Err(ExecutorError::InsufficientPrivilege { .. })));

    as_role(&mut db, "alice");
    ModuleGrantExecutor::execute_grant(
        &grant_stmt(
            PrivilegeType::Execute,
            ModulePrivilegeTarget::Function { name: "f".to_string(), arg_types: vec![] },
            "bob",
        ),
        &mut db,
    )
    .unwrap();

    as_role(&mut db, "bob");
    assert_eq!(call_f(&db).unwrap(), SqlValue::Integer(42));

    as_role(&mut db, "alice");
    ModuleRevokeExecutor::execute_revoke(
        &revoke_stmt(
            PrivilegeType::Execute,
            ModulePrivilegeTarget::Function { name: "f".to_string(), arg_types: vec![] },
            "bob",
        ),
        &mut db,
    )
    .unwrap();

    as_role(&mut db, "bob");
    assert!(call_f(&db).is_err());
}

#[test]
fn test_module_create_does_not_confer_execute() {
    let mut db = setup();
    let public = db.catalog.schema_id("public").unwrap();
    let module = db.catalog.module_id(public, "m1").unwrap();
    db.catalog.grant_on_module(module, "bob", PrivilegeType::Create, "alice").unwrap();

    as_role(&mut db, "bob");
    assert!(matches!(call_f(&db), Err(ExecutorError::InsufficientPrivilege { .. })));
}

#[test]
fn test_references_does_not_confer_execute() {
    let mut db = setup();

    as_role(&mut db, "alice");
    ModuleGrantExecutor::execute_grant(
        &grant_stmt(
            PrivilegeType::References,
            ModulePrivilegeTarget::Function { name: "f".to_string(), arg_types: vec![] },
            "bob",
        ),
        &mut db,
    )
    .unwrap();

    as_role(&mut db, "bob");
    assert!(matches!(call_f(&db), Err(ExecutorError::InsufficientPrivilege { .. })));
}

#[test]
fn test_privilege_kind_must_match_target() {
    let mut db = setup();
    as_role(&mut db, "alice");

    // EXECUTE makes no sense on the module container
    let err = ModuleGrantExecutor::execute_grant(
        &grant_stmt(PrivilegeType::Execute, ModulePrivilegeTarget::Module, "bob"),
        &mut db,
    )
    .unwrap_err();
    assert!(matches!(err, ExecutorError::InvalidPrivilege { .. }));

    // CREATE makes no sense on a member routine
    let err = ModuleGrantExecutor::execute_grant(
        &grant_stmt(
            PrivilegeType::Create,
            ModulePrivilegeTarget::Function { name: "f".to_string(), arg_types: vec![] },
            "bob",
        ),
        &mut db,
    )
    .unwrap_err();
    assert!(matches!(err, ExecutorError::InvalidPrivilege { .. }));
}

#[test]
fn test_public_grant_is_a_baseline() {
    let mut db = setup();

    as_role(&mut db, "alice");
    ModuleGrantExecutor::execute_grant(
        &grant_stmt(
            PrivilegeType::Execute,
            ModulePrivilegeTarget::Function { name: "f".to_string(), arg_types: vec![] },
            PUBLIC,
        ),
        &mut db,
    )
    .unwrap();

    // Any role can call through the PUBLIC baseline
    as_role(&mut db, "carol");
    assert_eq!(call_f(&db).unwrap(), SqlValue::Integer(42));

    // Revoking carol's own (empty) entry retracts nothing
    as_role(&mut db, "alice");
    ModuleRevokeExecutor::execute_revoke(
        &revoke_stmt(
            PrivilegeType::Execute,
            ModulePrivilegeTarget::Function { name: "f".to_string(), arg_types: vec![] },
            "carol",
        ),
        &mut db,
    )
    .unwrap();
    as_role(&mut db, "carol");
    assert_eq!(call_f(&db).unwrap(), SqlValue::Integer(42));

    // Revoking PUBLIC's entry closes the baseline
    as_role(&mut db, "alice");
    ModuleRevokeExecutor::execute_revoke(
        &revoke_stmt(
            PrivilegeType::Execute,
            ModulePrivilegeTarget::Function { name: "f".to_string(), arg_types: vec![] },
            PUBLIC,
        ),
        &mut db,
    )
    .unwrap();
    as_role(&mut db, "carol");
    assert!(call_f(&db).is_err());
}

#[test]
fn test_all_functions_grant_is_a_snapshot() {
    let mut db = setup();

    as_role(&mut db, "alice");
    ModuleGrantExecutor::execute_grant(
        &grant_stmt(PrivilegeType::Execute, ModulePrivilegeTarget::AllFunctions, "bob"),
        &mut db,
    )
    .unwrap();

    // A member added afterward is not covered by the earlier grant
    ModuleExecutor::execute_alter_module_add_routine(&add_routine_stmt(function_returning("g", 7)), &mut db)
        .unwrap();

    as_role(&mut db, "bob");
    assert_eq!(call_f(&db).unwrap(), SqlValue::Integer(42));
    let g = QualifiedName::new(vec!["m1".into(), "g".into()]);
    assert!(RoutineCallExecutor::execute_call(&db, &g, &[]).is_err());
}

#[test]
fn test_granting_requires_module_ownership() {
    let mut db = setup();

    as_role(&mut db, "bob");
    let err = ModuleGrantExecutor::execute_grant(
        &grant_stmt(PrivilegeType::Create, ModulePrivilegeTarget::Module, "carol"),
        &mut db,
    )
    .unwrap_err();
    assert!(matches!(err, ExecutorError::NotOwner { .. }));
}

#[test]
fn test_restructuring_member_requires_ownership_not_create() {
    let mut db = setup();
    let public = db.catalog.schema_id("public").unwrap();
    let module = db.catalog.module_id(public, "m1").unwrap();
    db.catalog.grant_on_schema(public, "bob", PrivilegeType::Create, "admin").unwrap();
    db.catalog.grant_on_module(module, "bob", PrivilegeType::Create, "alice").unwrap();

    let alter = AlterModuleAlterRoutineStmt {
        module_name: QualifiedName::single("m1"),
        alter: AlterRoutineStmt {
            routine_name: QualifiedName::single("f"),
            arg_types: vec![],
            action: AlterRoutineAction::RenameTo("f2".to_string()),
        },
    };

    as_role(&mut db, "bob");
    let err = ModuleExecutor::execute_alter_module_alter_routine(&alter, &mut db).unwrap_err();
    assert!(matches!(err, ExecutorError::NotOwner { .. }));

    as_role(&mut db, "alice");
    ModuleExecutor::execute_alter_module_alter_routine(&alter, &mut db).unwrap();
}

#[test]
fn test_rename_and_drop_require_ownership() {
    let mut db = setup();

    let rename = AlterModuleRenameStmt {
        module_name: QualifiedName::single("m1"),
        new_name: "m2".to_string(),
    };
    as_role(&mut db, "bob");
    assert!(matches!(
        ModuleExecutor::execute_rename_module(&rename, &mut db),
        Err(ExecutorError::NotOwner { .. })
    ));

    let drop = DropModuleStmt {
        module_name: QualifiedName::single("m1"),
        if_exists: false,
        cascade: true,
    };
    assert!(matches!(
        ModuleExecutor::execute_drop_module(&drop, &mut db),
        Err(ExecutorError::NotOwner { .. })
    ));

    // The superuser bypasses ownership checks entirely
    as_role(&mut db, "admin");
    ModuleExecutor::execute_rename_module(&rename, &mut db).unwrap();
}

#[test]
fn test_ownership_transfer_shifts_implicit_rights() {
    let mut db = setup();

    // Owner-to-self transfer succeeds quietly even for a non-owner issuer,
    // so replaying a dump never fails on it
    as_role(&mut db, "bob");
    let transfer_noop = AlterModuleOwnerStmt {
        module_name: QualifiedName::single("m1"),
        new_owner: "alice".to_string(),
    };
    let result = ModuleExecutor::execute_alter_module_owner(&transfer_noop, &mut db).unwrap();
    assert!(result.contains("already"));

    // alice cannot hand the module to bob without being a member of bob
    as_role(&mut db, "alice");
    let transfer = AlterModuleOwnerStmt {
        module_name: QualifiedName::single("m1"),
        new_owner: "bob".to_string(),
    };
    assert!(matches!(
        ModuleExecutor::execute_alter_module_owner(&transfer, &mut db),
        Err(ExecutorError::NotRoleMember { .. })
    ));

    db.catalog.add_role_member("bob", "alice").unwrap();
    ModuleExecutor::execute_alter_module_owner(&transfer, &mut db).unwrap();

    // Implicit owner rights moved with the row
    let rename = AlterModuleRenameStmt {
        module_name: QualifiedName::single("m1"),
        new_name: "m2".to_string(),
    };
    assert!(matches!(
        ModuleExecutor::execute_rename_module(&rename, &mut db),
        Err(ExecutorError::NotOwner { .. })
    ));
    as_role(&mut db, "bob");
    ModuleExecutor::execute_rename_module(&rename, &mut db).unwrap();
}

#[test]
fn test_grantee_must_be_a_known_role() {
    let mut db = setup();
    as_role(&mut db, "alice");

    let err = ModuleGrantExecutor::execute_grant(
        &grant_stmt(PrivilegeType::Create, ModulePrivilegeTarget::Module, "nobody"),
        &mut db,
    )
    .unwrap_err();
    assert!(matches!(err, ExecutorError::RoleNotFound(_)));
}

#[test]
fn test_create_module_checks_schema_create() {
    let mut db = setup();

    as_role(&mut db, "carol");
    let stmt = CreateModuleStmt {
        module_name: QualifiedName::single("m2"),
        authorization: None,
        if_not_exists: false,
        elements: vec![],
    };
    let err = ModuleExecutor::execute_create_module(&stmt, &mut db).unwrap_err();
    assert!(matches!(err, ExecutorError::InsufficientPrivilege { .. }));

    let public = db.catalog.schema_id("public").unwrap();
    db.catalog.grant_on_schema(public, "carol", PrivilegeType::Create, "admin").unwrap();
    ModuleExecutor::execute_create_module(&stmt, &mut db).unwrap();
    assert_eq!(
        db.catalog.get_module(db.catalog.module_id(public, "m2").unwrap()).unwrap().owner,
        "carol"
    );
}
