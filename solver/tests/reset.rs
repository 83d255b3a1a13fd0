//! Resetting affects the whole process, so it is kept in its own test binary.

use ryices::{Context, Error, Term, engine};

#[test]
fn test_handles_are_stale_after_reset() {
    const NS: &str = "reset__";
    let a = Term::from_real_var("a", NS, false).unwrap();
    let mut ctx = Context::from_term(&a.gt(2)).unwrap();
    assert!(ctx.check_sat().unwrap());
    let mut unchecked = Context::from_term(&a.lt(0)).unwrap();

    engine::reset();

    assert!(matches!(ctx.check_sat(), Err(Error::StaleHandle)));
    assert!(matches!(ctx.get_real_value("a"), Err(Error::StaleHandle)));
    assert!(matches!(unchecked.push(), Err(Error::StaleHandle)));
    assert!(matches!(
        a.try_binary(ryices::BinaryOp::Add, 1),
        Err(Error::StaleHandle)
    ));
    assert_eq!(a.to_string(), format!("<term #{}>", a.handle()));

    // Releasing objects of the previous session is a no-op.
    ctx.del_context();
    drop(unchecked);

    // The name table is empty again, so the variable is declared anew.
    let a = Term::from_real_var("a", NS, false).unwrap();
    let mut ctx = Context::from_term(&a._eq(7)).unwrap();
    assert!(ctx.check_sat().unwrap());
    assert_eq!(ctx.get_real_value("a").unwrap(), 7.0);
}
