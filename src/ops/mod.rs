//! Operator dispatch for labeled containers
//!
//! The tables in this module decide which engine function each public
//! operation name is bound to:
//!
//! - [`registry`]: static operation descriptors, aliases and the per-kind
//!   wrapper lookup
//! - [`methods`]: the flex-method builder, the special (operator) table and
//!   the in-place adapter
//! - [`surface`]: the per-type operation surface the tables are attached to
//!
//! Each container type builds its surface once, on first use, through
//! [`install`].

pub mod array_ops;
pub mod methods;
pub mod primitives;
pub mod registry;
pub mod surface;

use std::sync::Arc;

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::scalar::Scalar;
use crate::series::Series;

pub use methods::{
    build_flex_methods, build_flex_methods_with_aliases, build_inplace_methods,
    build_special_methods, check_flex_opt_out, inplace_name, make_inplace, normalize_name,
    special_name, InplaceTable, MethodTable, OpTable,
};
pub use primitives::{OpCategory, Primitive};
pub use registry::{lookup, ContainerKind, MethodWrappers, OpDescriptor};
pub use surface::{attach, BoundMethod, MethodInfo, OperationSurface};

/// Right-hand operand of a binary operation
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Scalar(Scalar),
    Series(&'a Series),
    Frame(&'a DataFrame),
}

impl<'a> Operand<'a> {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Operand::Scalar(_) => "scalar",
            Operand::Series(_) => "Series",
            Operand::Frame(_) => "DataFrame",
        }
    }
}

impl<'a> From<Scalar> for Operand<'a> {
    fn from(value: Scalar) -> Self {
        Operand::Scalar(value)
    }
}

impl<'a> From<i64> for Operand<'a> {
    fn from(value: i64) -> Self {
        Operand::Scalar(Scalar::Int(value))
    }
}

impl<'a> From<i32> for Operand<'a> {
    fn from(value: i32) -> Self {
        Operand::Scalar(Scalar::Int(value as i64))
    }
}

impl<'a> From<f64> for Operand<'a> {
    fn from(value: f64) -> Self {
        Operand::Scalar(Scalar::Float(value))
    }
}

impl<'a> From<bool> for Operand<'a> {
    fn from(value: bool) -> Self {
        Operand::Scalar(Scalar::Bool(value))
    }
}

impl<'a> From<&'a Series> for Operand<'a> {
    fn from(value: &'a Series) -> Self {
        Operand::Series(value)
    }
}

impl<'a> From<&'a DataFrame> for Operand<'a> {
    fn from(value: &'a DataFrame) -> Self {
        Operand::Frame(value)
    }
}

/// Result of a bound operation
#[derive(Debug)]
pub enum OpOutput<C> {
    Single(C),
    /// (quotient, remainder) from divmod / rdivmod
    Pair(C, C),
}

impl<C> OpOutput<C> {
    pub fn into_single(self) -> Result<C> {
        match self {
            OpOutput::Single(c) => Ok(c),
            OpOutput::Pair(..) => Err(Error::InvalidOperation(
                "operation returned a pair where a single result was expected".to_string(),
            )),
        }
    }

    pub fn into_pair(self) -> Result<(C, C)> {
        match self {
            OpOutput::Pair(a, b) => Ok((a, b)),
            OpOutput::Single(_) => Err(Error::InvalidOperation(
                "operation returned a single result where a pair was expected".to_string(),
            )),
        }
    }
}

/// Non-mutating bound operation: `(receiver, other) -> result`
pub type FlexMethod<C> = Arc<dyn Fn(&C, Operand<'_>) -> Result<OpOutput<C>> + Send + Sync>;

/// Mutating bound operation: `(receiver, other) -> receiver`
pub type InplaceMethod<C> =
    Arc<dyn for<'r, 'o> Fn(&'r mut C, Operand<'o>) -> Result<&'r mut C> + Send + Sync>;

/// Turns a raw primitive into a fully guarded operation
pub type WrapperFactory<C> = fn(Primitive) -> FlexMethod<C>;

pub(crate) fn flex_fn<C, F>(f: F) -> FlexMethod<C>
where
    C: 'static,
    F: Fn(&C, Operand<'_>) -> Result<OpOutput<C>> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A container type that carries an operation surface
///
/// The factories are the container's computation engines: they own
/// alignment, broadcasting and dtype handling. The dispatch layer only
/// decides which primitive each of them is handed.
pub trait OpsContainer: Sized + 'static {
    const TYPE_NAME: &'static str;

    /// Capability tag; `None` for types that are neither 1-D nor 2-D
    const KIND: Option<ContainerKind>;

    /// Wrapper for flexible (named) arithmetic methods
    fn flex_arith_method(op: Primitive) -> FlexMethod<Self>;

    /// Wrapper for flexible comparison methods
    fn flex_comp_method(op: Primitive) -> FlexMethod<Self> {
        Self::flex_arith_method(op)
    }

    /// Operator-syntax arithmetic (`__add__`, `__radd__`, ...)
    fn arith_method(op: Primitive) -> FlexMethod<Self>;

    /// Operator-syntax comparison (`__eq__`, ...)
    fn comp_method(op: Primitive) -> FlexMethod<Self>;

    /// Operator-syntax logical ops (`__and__`, `__ror__`, ...)
    fn logical_method(op: Primitive) -> FlexMethod<Self>;
}

/// Receiver-side hooks the in-place adapter needs
pub trait InplaceTarget: Sized {
    /// Detach this container from any parent that caches it as a view
    fn reset_cacher(&mut self);

    /// Conform `self` to the labels (and shape) of `other`; storage is only
    /// copied when the labels differ
    fn reindex_like(self, other: &Self) -> Result<Self>;

    /// Replace the receiver's storage with `result`'s
    fn update_inplace(&mut self, result: Self, verify_is_copy: bool) -> Result<()>;
}

/// Build the complete operation surface for `C`
///
/// Attaches, in order, the special (operator) methods, the flex methods and
/// the in-place methods. Any configuration fault aborts the build.
pub fn install<C>() -> Result<OperationSurface<C>>
where
    C: OpsContainer + InplaceTarget,
{
    let special = build_special_methods::<C>();
    let wrappers = lookup::<C>()?;
    let flex = build_flex_methods::<C>(&wrappers)?;
    let inplace = build_inplace_methods::<C>(&special)?;

    let mut surface = OperationSurface::new(C::TYPE_NAME);
    attach(&mut surface, special);
    attach(&mut surface, flex);
    attach(&mut surface, inplace);

    log::debug!(
        "installed {} operations on {}",
        surface.len(),
        C::TYPE_NAME
    );
    if crate::config::get_options().log_surface {
        for name in surface.names() {
            log::info!("{}.{}", C::TYPE_NAME, name);
        }
    }
    Ok(surface)
}
