//! Identifier handles with reference-ownership tracking.
//!
//! Every expression the backend emits is wrapped in an [`Ident`]: the C++
//! text of the expression plus a flag saying whether the handle currently
//! owns a reference to the value or merely borrows one. The handle renders
//! itself differently for the three ways generated code can consume a value:
//!
//! - [`export_ref`](Ident::export_ref) — transfer one owned reference to the
//!   caller (return values, stores). An owning handle hands over its own
//!   reference; a borrowed handle mints a fresh one with
//!   `INCREASE_REFCOUNT`.
//! - [`temporary_ref`](Ident::temporary_ref) — use the value for the
//!   duration of one statement without leaking ownership. An owning handle
//!   parks its reference in a `PyObjectTemporary`, which releases it on every
//!   exit path from the enclosing scope.
//! - [`drop_ref`](Ident::drop_ref) — discard whatever reference the handle
//!   represents, via `DECREASE_REFCOUNT` when one is owned.
//!
//! # State machine
//!
//! An `Expr` handle starts [`Owned`](RefState::Owned) or
//! [`Borrowed`](RefState::Borrowed). `export_ref` moves `Owned` to
//! [`Exported`](RefState::Exported), a resting state that behaves as
//! borrowed except that a second export is an emission-driver bug and
//! panics: rendering the same owned reference twice would double-free at
//! runtime. No operation moves a handle back to `Owned` except an explicit
//! [`set_ownership`](Ident::set_ownership) by a driver that knows a fresh
//! reference exists.
//!
//! The four slot variants (`Local`, `LoopVar`, `Temp`, `Closure`) reference
//! storage whose lifetime is managed by the enclosing frame. They are
//! permanently borrowed: `export_ref` on them always mints a new reference,
//! and `set_ownership` panics.
//!
//! Handles are created per use-site during emission, consumed into a text
//! fragment, and discarded. They are not shared across emission calls.

/// Reference-ownership view of a handle.
///
/// `Owned` means the handle holds exactly one reference that must eventually
/// be exported or dropped. `Borrowed` means another owner guarantees the
/// value's lifetime for the duration of this use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ownership {
    /// The handle accesses the value without owning a reference.
    Borrowed,
    /// The handle owns one reference and is responsible for it.
    Owned,
}

/// Internal ownership state of an [`Ident::Expr`] handle.
///
/// `Exported` records that the owned reference has already been handed to a
/// caller: the handle now behaves as borrowed, and a second
/// [`export_ref`](Ident::export_ref) is a precondition violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RefState {
    /// Holds one reference to export or drop.
    Owned,
    /// Never held a reference; the storage's owner outlives this use.
    Borrowed,
    /// The owned reference was exported. Behaves as borrowed from here on.
    Exported,
}

/// A generated-code expression together with its ownership state.
///
/// The slot variants render the fixed name patterns the C++ runtime layer
/// expects; `Expr` carries arbitrary expression text (call results,
/// constant-table accesses) with an explicit ownership flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ident {
    /// Arbitrary expression text with explicit ownership. The only variant
    /// that can own a reference.
    Expr {
        /// Verbatim C++ expression, already of the generic `PyObject *` form.
        code: String,
        /// One-shot ownership state; see the module docs.
        state: RefState,
    },

    /// A named local slot, `_python_var_<name>`, or
    /// `_python_context->python_var_<name>` when the variable lives in the
    /// execution context of a nested frame.
    Local {
        name: String,
        /// Access through the frame's context pointer instead of directly.
        from_context: bool,
    },

    /// A loop-bound local slot, `_python_loopvar_<name>`. Same shape as
    /// `Local` but a distinct marker, so rebinding logic upstream can
    /// special-case loop variables without parsing names.
    LoopVar { name: String },

    /// A compiler-synthesized scratch slot, `_python_tmp_<name>`. Never
    /// reached through a context pointer.
    Temp { name: String },

    /// A variable captured from an enclosing scope. Read as
    /// `_python_closure_<name>` in the defining scope, or through the
    /// caller-supplied context-pointer expression (`<ctx>python_closure_<name>`)
    /// from inside the nested scope.
    Closure {
        name: String,
        /// Context-pointer expression prefix, if read from a nested scope.
        context: Option<String>,
    },
}

impl Ident {
    /// Wrap arbitrary expression text with an explicit ownership flag.
    pub fn expr(code: impl Into<String>, ownership: Ownership) -> Self {
        Ident::Expr {
            code: code.into(),
            state: match ownership {
                Ownership::Owned => RefState::Owned,
                Ownership::Borrowed => RefState::Borrowed,
            },
        }
    }

    pub fn local(name: impl Into<String>, from_context: bool) -> Self {
        Ident::Local {
            name: name.into(),
            from_context,
        }
    }

    pub fn loop_var(name: impl Into<String>) -> Self {
        Ident::LoopVar { name: name.into() }
    }

    pub fn temp(name: impl Into<String>) -> Self {
        Ident::Temp { name: name.into() }
    }

    pub fn closure(name: impl Into<String>, context: Option<String>) -> Self {
        Ident::Closure {
            name: name.into(),
            context,
        }
    }

    /// Current ownership view. Slot variants and exported handles report
    /// [`Ownership::Borrowed`].
    pub fn ownership(&self) -> Ownership {
        match self {
            Ident::Expr {
                state: RefState::Owned,
                ..
            } => Ownership::Owned,
            _ => Ownership::Borrowed,
        }
    }

    /// Raw expression text for this handle.
    pub fn code(&self) -> String {
        match self {
            Ident::Expr { code, .. } => code.clone(),
            Ident::Local {
                name,
                from_context: false,
            } => format!("_python_var_{name}"),
            Ident::Local {
                name,
                from_context: true,
            } => format!("_python_context->python_var_{name}"),
            Ident::LoopVar { name } => format!("_python_loopvar_{name}"),
            Ident::Temp { name } => format!("_python_tmp_{name}"),
            Ident::Closure {
                name,
                context: None,
            } => format!("_python_closure_{name}"),
            Ident::Closure {
                name,
                context: Some(ctx),
            } => format!("{ctx}python_closure_{name}"),
        }
    }

    /// Expression text coerced to the generic `PyObject *` form.
    ///
    /// Slot variants are typed wrapper objects, so their raw name gets the
    /// `.asObject()` accessor; `Expr` text is already generic.
    pub fn as_object(&self) -> String {
        match self {
            Ident::Expr { .. } => self.code(),
            _ => format!("{}.asObject()", self.code()),
        }
    }

    /// Render code that transfers one owned reference to the caller.
    ///
    /// An owning handle is consumed: its reference becomes the caller's and
    /// the handle drops to the exported (borrowed) state. A borrowed handle
    /// mints a fresh reference with `INCREASE_REFCOUNT`, leaving the
    /// underlying slot's own reference untouched.
    ///
    /// # Panics
    ///
    /// Panics if the owned reference was already exported from this handle.
    /// That is an emission-driver bug: rendering the same reference twice
    /// would double-free at runtime.
    pub fn export_ref(&mut self) -> String {
        if let Ident::Expr { code, state } = self {
            match *state {
                RefState::Owned => {
                    *state = RefState::Exported;
                    return code.clone();
                }
                RefState::Exported => {
                    panic!("export_ref called twice on `{code}`");
                }
                RefState::Borrowed => {}
            }
        }
        format!("INCREASE_REFCOUNT( {} )", self.as_object())
    }

    /// Render code for transient, expression-scoped use.
    ///
    /// An owning handle parks its reference in a `PyObjectTemporary`, which
    /// releases it on every exit path from the enclosing statement. A
    /// borrowed handle needs no bookkeeping and renders as the plain object
    /// form.
    pub fn temporary_ref(&self) -> String {
        match self.ownership() {
            Ownership::Owned => format!("PyObjectTemporary( {} ).asObject()", self.code()),
            Ownership::Borrowed => self.as_object(),
        }
    }

    /// Render code that discards the reference this handle represents.
    ///
    /// Borrowed handles have nothing to release and render as their plain
    /// code; owning handles release via `DECREASE_REFCOUNT`.
    ///
    /// Closure slots are the exception: they always release, regardless of
    /// the ownership flag. The capture step increments their reference
    /// separately from this handle's own tracking, so the flag here does not
    /// reflect whether a release is due.
    pub fn drop_ref(&self) -> String {
        if let Ident::Closure { .. } = self {
            return format!("DECREASE_REFCOUNT( {} )", self.as_object());
        }
        match self.ownership() {
            Ownership::Owned => format!("DECREASE_REFCOUNT( {} )", self.as_object()),
            Ownership::Borrowed => self.code(),
        }
    }

    /// Overwrite the ownership flag of an `Expr` handle.
    ///
    /// Re-arming an exported handle to [`Ownership::Owned`] is legitimate
    /// when the driver knows a fresh reference exists.
    ///
    /// # Panics
    ///
    /// Panics on the slot variants: their ownership is fixed by construction,
    /// and flipping it means the emission driver is internally inconsistent.
    pub fn set_ownership(&mut self, ownership: Ownership) {
        match self {
            Ident::Expr { state, .. } => {
                *state = match ownership {
                    Ownership::Owned => RefState::Owned,
                    Ownership::Borrowed => RefState::Borrowed,
                };
            }
            _ => panic!(
                "set_ownership on fixed-ownership handle `{}`",
                self.code()
            ),
        }
    }
}
