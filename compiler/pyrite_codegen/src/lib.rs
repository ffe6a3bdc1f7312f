//! C++ emission helpers for the Pyrite compiler backend.
//!
//! Pyrite translates Python into C++ with manual reference counting. This
//! crate provides the two building blocks the emission driver leans on for
//! every expression and constant it writes out:
//!
//! - **Identifier handles** ([`Ident`]) — a generated-code expression paired
//!   with its reference-ownership state ([`Ownership`]). A handle knows how
//!   to render itself for the three ways generated code can consume a value:
//!   exporting an owned reference to the caller, borrowing it for the
//!   duration of one statement, or dropping it explicitly. Getting this wrong
//!   either double-frees or leaks a reference in the compiled program, so the
//!   export transition is one-shot and violations fail fast.
//!
//! - **Constant naming** ([`namify`]) — a pure, deterministic mapping from a
//!   literal constant value ([`Const`]) to a C++-safe identifier fragment
//!   used to name that constant's cached slot. Readable inputs keep a
//!   readable name; everything else falls back to an MD5 content digest.
//!
//! Both components are side-effect-free and single-threaded; neither performs
//! I/O. The driver that walks the AST, the C++ runtime macros the rendered
//! text refers to (`INCREASE_REFCOUNT`, `DECREASE_REFCOUNT`,
//! `PyObjectTemporary`), and the constant table that consumes the generated
//! names all live elsewhere. The exact spelling of the rendered fragments and
//! of the naming scheme is a fixed contract with those layers.

pub mod ident;
pub mod namify;

pub use ident::{Ident, Ownership, RefState};
pub use namify::{namify, Const, NamifyError};
