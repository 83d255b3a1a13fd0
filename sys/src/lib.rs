//! Raw declarations of the Yices 2 C API entry points used by `ryices`.
//!
//! Only the subset needed by the wrapper is declared. The signatures follow
//! `yices.h` and `yices_types.h` exactly: terms and types are `int32_t`
//! handles, strings are NUL-terminated, and model values are returned through
//! output parameters.

#![allow(non_camel_case_types)]

use core::ffi::{c_char, c_int};

pub type term_t = i32;
pub type type_t = i32;

/// `smt_status_t`
pub type smt_status_t = c_int;
/// `error_code_t`
pub type error_code_t = c_int;

pub const NULL_TERM: term_t = -1;
pub const NULL_TYPE: type_t = -1;

pub const STATUS_IDLE: smt_status_t = 0;
pub const STATUS_SEARCHING: smt_status_t = 1;
pub const STATUS_UNKNOWN: smt_status_t = 2;
pub const STATUS_SAT: smt_status_t = 3;
pub const STATUS_UNSAT: smt_status_t = 4;
pub const STATUS_INTERRUPTED: smt_status_t = 5;
pub const STATUS_ERROR: smt_status_t = 6;

pub const NO_ERROR: error_code_t = 0;

macro_rules! opaque_type {
    ($($name:ident),* $(,)?) => {
        $(
            #[repr(C)]
            pub struct $name {
                _data: [u8; 0],
                _marker: core::marker::PhantomData<(*mut u8, core::marker::PhantomPinned)>,
            }
        )*
    };
}

opaque_type!(context_t, model_t, ctx_config_t, param_t, FILE);

#[allow(non_upper_case_globals)]
unsafe extern "C" {
    pub static yices_version: *const c_char;

    /* Global initialization and cleanup */
    pub fn yices_init();
    pub fn yices_exit();
    pub fn yices_reset();
    pub fn yices_free_string(s: *mut c_char);

    /* Errors */
    pub fn yices_error_code() -> error_code_t;
    pub fn yices_print_error(f: *mut FILE) -> i32;
    pub fn yices_error_string() -> *mut c_char;

    /* Types */
    pub fn yices_bool_type() -> type_t;
    pub fn yices_real_type() -> type_t;

    /* Term constructors */
    pub fn yices_true() -> term_t;
    pub fn yices_false() -> term_t;
    pub fn yices_new_uninterpreted_term(tau: type_t) -> term_t;
    pub fn yices_parse_float(s: *const c_char) -> term_t;
    pub fn yices_parse_rational(s: *const c_char) -> term_t;

    pub fn yices_neg(t1: term_t) -> term_t;
    pub fn yices_not(arg: term_t) -> term_t;
    pub fn yices_add(t1: term_t, t2: term_t) -> term_t;
    pub fn yices_sub(t1: term_t, t2: term_t) -> term_t;
    pub fn yices_mul(t1: term_t, t2: term_t) -> term_t;
    pub fn yices_and2(t1: term_t, t2: term_t) -> term_t;
    pub fn yices_or2(t1: term_t, t2: term_t) -> term_t;
    pub fn yices_xor2(t1: term_t, t2: term_t) -> term_t;
    pub fn yices_eq(left: term_t, right: term_t) -> term_t;
    pub fn yices_arith_leq_atom(t1: term_t, t2: term_t) -> term_t;
    pub fn yices_arith_lt_atom(t1: term_t, t2: term_t) -> term_t;
    pub fn yices_arith_gt_atom(t1: term_t, t2: term_t) -> term_t;
    pub fn yices_arith_geq_atom(t1: term_t, t2: term_t) -> term_t;

    /* Names */
    pub fn yices_set_term_name(t: term_t, name: *const c_char) -> i32;
    pub fn yices_get_term_by_name(name: *const c_char) -> term_t;

    /* Context configuration */
    pub fn yices_new_config() -> *mut ctx_config_t;
    pub fn yices_free_config(config: *mut ctx_config_t);
    pub fn yices_set_config(
        config: *mut ctx_config_t,
        name: *const c_char,
        value: *const c_char,
    ) -> i32;
    pub fn yices_default_config_for_logic(config: *mut ctx_config_t, logic: *const c_char) -> i32;

    /* Contexts */
    pub fn yices_new_context(config: *const ctx_config_t) -> *mut context_t;
    pub fn yices_free_context(ctx: *mut context_t);
    pub fn yices_context_status(ctx: *mut context_t) -> smt_status_t;
    pub fn yices_push(ctx: *mut context_t) -> i32;
    pub fn yices_pop(ctx: *mut context_t) -> i32;
    pub fn yices_assert_formula(ctx: *mut context_t, t: term_t) -> i32;
    pub fn yices_check_context(ctx: *mut context_t, params: *const param_t) -> smt_status_t;

    /* Models */
    pub fn yices_get_model(ctx: *mut context_t, keep_subst: i32) -> *mut model_t;
    pub fn yices_free_model(mdl: *mut model_t);
    pub fn yices_get_bool_value(mdl: *mut model_t, t: term_t, val: *mut i32) -> i32;
    pub fn yices_get_double_value(mdl: *mut model_t, t: term_t, val: *mut f64) -> i32;

    /* Pretty printing */
    pub fn yices_pp_term(f: *mut FILE, t: term_t, width: u32, height: u32, offset: u32) -> i32;
    pub fn yices_print_model(f: *mut FILE, mdl: *mut model_t);
    pub fn yices_term_to_string(t: term_t, width: u32, height: u32, offset: u32) -> *mut c_char;
    pub fn yices_model_to_string(
        mdl: *mut model_t,
        width: u32,
        height: u32,
        offset: u32,
    ) -> *mut c_char;
}

/// The few C stdio entry points needed to hand a stream over to the Yices
/// printers and to register the exit-time cleanup.
pub mod stdio {
    use super::*;

    pub const STDERR_FILENO: c_int = 2;

    unsafe extern "C" {
        pub fn fdopen(fd: c_int, mode: *const c_char) -> *mut FILE;
        pub fn fflush(stream: *mut FILE) -> c_int;
        pub fn atexit(cb: extern "C" fn()) -> c_int;
    }
}
