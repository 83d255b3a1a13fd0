use ryices::{BinaryOp, Context, Error, Term, UnaryOp, config::SolverConfig};

fn real(name: &str, namespace: &str) -> Term {
    Term::from_real_var(name, namespace, false).unwrap()
}

#[test]
fn test_getters_require_a_check() {
    const NS: &str = "unchecked__";
    let a = real("a", NS);
    let ctx = Context::from_term(&a.gt(0)).unwrap();

    match ctx.get_real_value("a") {
        Err(Error::NotChecked { op }) => assert_eq!(op, "get_real_value"),
        other => panic!("Expected NotChecked, got {other:?}"),
    }
    assert!(matches!(
        ctx.get_bool_value("a"),
        Err(Error::NotChecked { .. })
    ));
    assert!(matches!(ctx.model_to_stderr(), Err(Error::NotChecked { .. })));
}

#[test]
fn test_getters_after_unsat() {
    const NS: &str = "after_unsat__";
    let a = real("a", NS);
    let mut ctx = Context::from_term(&(a.gt(1) & a.lt(0))).unwrap();

    assert!(!ctx.check_sat().unwrap());
    assert!(matches!(
        ctx.get_real_value("a"),
        Err(Error::NotChecked { .. })
    ));
}

#[test]
fn test_getters_after_pop() {
    const NS: &str = "after_pop__";
    let a = real("a", NS);
    let mut ctx = Context::from_term(&a.gt(1)).unwrap();

    ctx.push().unwrap();
    assert!(ctx.check_sat().unwrap());
    assert!(ctx.get_real_value("a").unwrap() > 1.0);
    ctx.pop().unwrap();

    assert!(matches!(
        ctx.get_real_value("a"),
        Err(Error::NotChecked { .. })
    ));
}

#[test]
fn test_unmatched_pop() {
    const NS: &str = "unmatched__";
    let a = real("a", NS);
    let mut ctx = Context::from_term(&a.gt(0)).unwrap();

    match ctx.pop() {
        Err(Error::EngineStatus { op, status, .. }) => {
            assert_eq!(op, "yices_pop");
            assert_ne!(status, 0);
        }
        other => panic!("Expected EngineStatus, got {other:?}"),
    }
}

#[test]
fn test_unknown_variable() {
    const NS: &str = "unknown__";
    let a = real("a", NS);
    let mut ctx = Context::from_term(&a.gt(0)).unwrap();
    assert!(ctx.check_sat().unwrap());

    match ctx.get_real_value("never_declared") {
        Err(Error::ValueNotFound { name }) => assert_eq!(name, "unknown__never_declared"),
        other => panic!("Expected ValueNotFound, got {other:?}"),
    }
}

#[test]
fn test_namespace_mismatch_on_assertion() {
    let a = real("a", "left__");
    let b = real("b", "right__");

    let mut ctx = Context::from_term(&a.gt(0)).unwrap();
    match ctx.add_assertion(&b.gt(0)) {
        Err(Error::NamespaceMismatch { expected, found }) => {
            assert_eq!(expected, "left__");
            assert_eq!(found, "right__");
        }
        other => panic!("Expected NamespaceMismatch, got {other:?}"),
    }

    let mut ctx = Context::with_namespace("fixed__").unwrap();
    assert!(matches!(
        ctx.add_assertion(&a.gt(0)),
        Err(Error::NamespaceMismatch { .. })
    ));
}

#[test]
fn test_namespace_mismatch_on_combination() {
    let a = real("a", "left_op__");
    let b = real("b", "right_op__");

    assert!(matches!(
        a.try_binary(BinaryOp::Add, &b),
        Err(Error::NamespaceMismatch { .. })
    ));
}

#[test]
#[should_panic]
fn test_operator_panics_on_namespace_mismatch() {
    let a = real("a", "left_panic__");
    let b = real("b", "right_panic__");
    let _ = &a + &b;
}

#[test]
fn test_sort_mismatch() {
    const NS: &str = "sorts__";
    let r = real("r", NS);
    let b = Term::from_bool_var("b", NS, false).unwrap();

    match r.try_binary(BinaryOp::Add, &b) {
        Err(Error::Construction { op, cause }) => {
            assert_eq!(op, "yices_add");
            assert_ne!(cause.code, 0);
        }
        other => panic!("Expected Construction, got {other:?}"),
    }
    assert!(matches!(
        r.try_unary(UnaryOp::Not),
        Err(Error::Construction { .. })
    ));
}

#[test]
fn test_invalid_constant() {
    assert!(matches!(
        Term::from_real_constant("abc", "invalid__"),
        Err(Error::Construction { .. })
    ));

    let a = real("a", "invalid__");
    assert!(matches!(
        Term::from_real_constant("1\02", "invalid__"),
        Err(Error::InvalidName(_))
    ));
    assert!(a.try_binary(BinaryOp::Mul, 1.5).is_ok());
}

#[test]
fn test_released_context() {
    const NS: &str = "released__";
    let a = real("a", NS);
    let mut ctx = Context::from_term(&a.gt(0)).unwrap();
    ctx.del_context();

    assert!(matches!(ctx.check_sat(), Err(Error::ContextReleased)));
    assert!(matches!(ctx.push(), Err(Error::ContextReleased)));
    assert!(matches!(ctx.pop(), Err(Error::ContextReleased)));
    assert!(matches!(ctx.status(), Err(Error::ContextReleased)));
    assert!(matches!(
        ctx.add_assertion(&a.lt(5)),
        Err(Error::ContextReleased)
    ));
    assert!(matches!(
        ctx.get_real_value("a"),
        Err(Error::ContextReleased)
    ));
}

#[test]
fn test_invalid_logic() {
    let mut config = SolverConfig::default();
    config.context.logic = Some("NOT_A_LOGIC".to_string());

    match Context::with_config(&config) {
        Err(Error::EngineStatus { op, .. }) => assert_eq!(op, "yices_default_config_for_logic"),
        Err(other) => panic!("Expected EngineStatus, got {other:?}"),
        Ok(_) => panic!("Expected EngineStatus, got a context"),
    }
}

#[test]
fn test_configured_context() {
    const NS: &str = "configured__";
    let mut config = SolverConfig::default();
    config.context.logic = Some("QF_LRA".to_string());

    let a = real("a", NS);
    let mut ctx = Context::with_config(&config).unwrap();
    ctx.add_assertion(&(&a * 2)._eq(7)).unwrap();
    assert!(ctx.check_sat().unwrap());
    assert_eq!(ctx.get_real_value("a").unwrap(), 3.5);
}
