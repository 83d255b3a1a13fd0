//! Combinators over terms.
//!
//! Every combinator is lowered into the engine right away. The Rust operators
//! are sugar over [`Term::try_unary`] and [`Term::try_binary`] that panic on
//! failure; use the fallible forms to handle construction errors.

use core::ops;

use derive_more as dm;
use yices_sys as sys;

use common::log_trace;

use super::{TAG, Term};
use crate::{Error, Result, engine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, dm::Display)]
pub enum UnaryOp {
    #[display("neg")]
    Neg,
    #[display("not")]
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, dm::Display)]
pub enum BinaryOp {
    #[display("add")]
    Add,
    #[display("sub")]
    Sub,
    #[display("mul")]
    Mul,
    #[display("and")]
    And,
    #[display("or")]
    Or,
    #[display("xor")]
    Xor,
    #[display("eq")]
    Eq,
    #[display("le")]
    Le,
    #[display("lt")]
    Lt,
    #[display("gt")]
    Gt,
    #[display("ge")]
    Ge,
}

type UnaryFn = unsafe extern "C" fn(sys::term_t) -> sys::term_t;
type BinaryFn = unsafe extern "C" fn(sys::term_t, sys::term_t) -> sys::term_t;

impl UnaryOp {
    fn entry_point(self) -> (&'static str, UnaryFn) {
        match self {
            UnaryOp::Neg => ("yices_neg", sys::yices_neg as UnaryFn),
            UnaryOp::Not => ("yices_not", sys::yices_not as UnaryFn),
        }
    }
}

impl BinaryOp {
    fn entry_point(self) -> (&'static str, BinaryFn) {
        use BinaryOp::*;
        match self {
            Add => ("yices_add", sys::yices_add as BinaryFn),
            Sub => ("yices_sub", sys::yices_sub as BinaryFn),
            Mul => ("yices_mul", sys::yices_mul as BinaryFn),
            And => ("yices_and2", sys::yices_and2 as BinaryFn),
            Or => ("yices_or2", sys::yices_or2 as BinaryFn),
            Xor => ("yices_xor2", sys::yices_xor2 as BinaryFn),
            Eq => ("yices_eq", sys::yices_eq as BinaryFn),
            Le => ("yices_arith_leq_atom", sys::yices_arith_leq_atom as BinaryFn),
            Lt => ("yices_arith_lt_atom", sys::yices_arith_lt_atom as BinaryFn),
            Gt => ("yices_arith_gt_atom", sys::yices_arith_gt_atom as BinaryFn),
            Ge => ("yices_arith_geq_atom", sys::yices_arith_geq_atom as BinaryFn),
        }
    }
}

/// The right-hand side of a combinator: a term or a numeric literal that is
/// promoted to a constant term in the namespace of the left-hand side.
#[derive(Debug, Clone, dm::From)]
pub enum Operand {
    Term(Term),
    #[from(ignore)]
    Literal(String),
}

impl From<&Term> for Operand {
    fn from(term: &Term) -> Self {
        Operand::Term(term.clone())
    }
}

macro_rules! impl_literal_operand {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Operand {
                fn from(value: $ty) -> Self {
                    Operand::Literal(value.to_string())
                }
            }
        )*
    };
}

impl_literal_operand!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl Term {
    pub fn try_unary(&self, op: UnaryOp) -> Result<Term> {
        let engine = engine::lock();
        self.ensure_alive(&engine)?;

        let (name, f) = op.entry_point();
        let handle = unsafe { f(self.handle) };
        log_trace!(target: TAG, %op, operand = self.handle, result = handle);
        Term::wrap(&engine, name, handle, self.namespace.clone())
    }

    pub fn try_binary(&self, op: BinaryOp, rhs: impl Into<Operand>) -> Result<Term> {
        let engine = engine::lock();
        self.ensure_alive(&engine)?;

        let rhs = match rhs.into() {
            Operand::Term(rhs) => {
                rhs.ensure_alive(&engine)?;
                if rhs.namespace != self.namespace {
                    return Err(Error::NamespaceMismatch {
                        expected: self.namespace.to_string(),
                        found: rhs.namespace.to_string(),
                    });
                }
                rhs.handle
            }
            Operand::Literal(text) => {
                Term::parse_constant(&engine, &text, self.namespace.clone())?.handle
            }
        };

        let (name, f) = op.entry_point();
        let handle = unsafe { f(self.handle, rhs) };
        log_trace!(target: TAG, %op, lhs = self.handle, rhs, result = handle);
        Term::wrap(&engine, name, handle, self.namespace.clone())
    }

    #[inline]
    fn unary_or_panic(&self, op: UnaryOp) -> Term {
        self.try_unary(op)
            .unwrap_or_else(|e| panic!("Failed to build `{op}` term: {e}"))
    }

    #[inline]
    fn binary_or_panic(&self, op: BinaryOp, rhs: impl Into<Operand>) -> Term {
        self.try_binary(op, rhs)
            .unwrap_or_else(|e| panic!("Failed to build `{op}` term: {e}"))
    }

    /// Equality atom.
    ///
    /// # Panics
    /// If the engine rejects the operands, e.g., because of a sort mismatch.
    pub fn _eq(&self, rhs: impl Into<Operand>) -> Term {
        self.binary_or_panic(BinaryOp::Eq, rhs)
    }

    pub fn le(&self, rhs: impl Into<Operand>) -> Term {
        self.binary_or_panic(BinaryOp::Le, rhs)
    }

    pub fn lt(&self, rhs: impl Into<Operand>) -> Term {
        self.binary_or_panic(BinaryOp::Lt, rhs)
    }

    pub fn gt(&self, rhs: impl Into<Operand>) -> Term {
        self.binary_or_panic(BinaryOp::Gt, rhs)
    }

    pub fn ge(&self, rhs: impl Into<Operand>) -> Term {
        self.binary_or_panic(BinaryOp::Ge, rhs)
    }
}

macro_rules! impl_unary_operator {
    ($($trait:ident, $method:ident => $op:ident;)*) => {
        $(
            impl ops::$trait for &Term {
                type Output = Term;

                fn $method(self) -> Term {
                    self.unary_or_panic(UnaryOp::$op)
                }
            }

            impl ops::$trait for Term {
                type Output = Term;

                fn $method(self) -> Term {
                    self.unary_or_panic(UnaryOp::$op)
                }
            }
        )*
    };
}

macro_rules! impl_binary_operator {
    ($($trait:ident, $method:ident => $op:ident;)*) => {
        $(
            impl<R: Into<Operand>> ops::$trait<R> for &Term {
                type Output = Term;

                fn $method(self, rhs: R) -> Term {
                    self.binary_or_panic(BinaryOp::$op, rhs)
                }
            }

            impl<R: Into<Operand>> ops::$trait<R> for Term {
                type Output = Term;

                fn $method(self, rhs: R) -> Term {
                    self.binary_or_panic(BinaryOp::$op, rhs)
                }
            }
        )*
    };
}

impl_unary_operator! {
    Neg, neg => Neg;
    Not, not => Not;
}

impl_binary_operator! {
    Add, add => Add;
    Sub, sub => Sub;
    Mul, mul => Mul;
    BitAnd, bitand => And;
    BitOr, bitor => Or;
    BitXor, bitxor => Xor;
}
