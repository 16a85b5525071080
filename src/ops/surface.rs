//! Operation surface of a container type
//!
//! The surface is the externally visible set of operations of one type. It
//! is filled once by [`attach`] and only read afterwards.

use serde::Serialize;
use std::collections::HashMap;

use super::methods::OpTable;
use super::{FlexMethod, InplaceMethod, OpOutput, Operand};
use crate::error::{Error, Result};

/// An operation bound under a public name
pub enum BoundMethod<C> {
    /// `(receiver, other) -> result`
    Binary(FlexMethod<C>),
    /// `(receiver, other) -> receiver`, mutating the receiver
    InPlace(InplaceMethod<C>),
}

impl<C> Clone for BoundMethod<C> {
    fn clone(&self) -> Self {
        match self {
            BoundMethod::Binary(m) => BoundMethod::Binary(m.clone()),
            BoundMethod::InPlace(m) => BoundMethod::InPlace(m.clone()),
        }
    }
}

impl<C> BoundMethod<C> {
    pub fn is_inplace(&self) -> bool {
        matches!(self, BoundMethod::InPlace(_))
    }
}

impl<C> From<FlexMethod<C>> for BoundMethod<C> {
    fn from(method: FlexMethod<C>) -> Self {
        BoundMethod::Binary(method)
    }
}

impl<C> From<InplaceMethod<C>> for BoundMethod<C> {
    fn from(method: InplaceMethod<C>) -> Self {
        BoundMethod::InPlace(method)
    }
}

/// Serializable description of one surface entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodInfo {
    pub name: String,
    pub inplace: bool,
}

/// All operations attached to a container type
pub struct OperationSurface<C> {
    type_name: &'static str,
    methods: HashMap<String, BoundMethod<C>>,
}

impl<C> std::fmt::Debug for OperationSurface<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationSurface")
            .field("type_name", &self.type_name)
            .field("methods", &self.len())
            .finish()
    }
}

impl<C> OperationSurface<C> {
    pub fn new(type_name: &'static str) -> Self {
        OperationSurface {
            type_name,
            methods: HashMap::new(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&BoundMethod<C>> {
        self.methods.get(name)
    }

    /// Names in sorted order
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.methods.keys().cloned().collect();
        names.sort();
        names
    }

    /// Invoke a non-mutating operation
    pub fn call(&self, name: &str, receiver: &C, other: Operand<'_>) -> Result<OpOutput<C>> {
        match self.methods.get(name) {
            Some(BoundMethod::Binary(method)) => method(receiver, other),
            Some(BoundMethod::InPlace(_)) => Err(Error::InvalidOperation(format!(
                "{}.{} mutates its receiver; use call_inplace",
                self.type_name, name
            ))),
            None => Err(self.missing(name)),
        }
    }

    /// Invoke an in-place operation, returning the receiver
    pub fn call_inplace<'r>(
        &self,
        name: &str,
        receiver: &'r mut C,
        other: Operand<'_>,
    ) -> Result<&'r mut C> {
        match self.methods.get(name) {
            Some(BoundMethod::InPlace(method)) => method(receiver, other),
            Some(BoundMethod::Binary(_)) => Err(Error::InvalidOperation(format!(
                "{}.{} does not mutate its receiver; use call",
                self.type_name, name
            ))),
            None => Err(self.missing(name)),
        }
    }

    pub fn describe(&self) -> Vec<MethodInfo> {
        self.names()
            .into_iter()
            .map(|name| {
                let inplace = self.methods[&name].is_inplace();
                MethodInfo { name, inplace }
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.describe())?)
    }

    fn missing(&self, name: &str) -> Error {
        Error::MissingMethod(format!("{}.{}", self.type_name, name))
    }
}

/// Bind every entry of `table` onto `surface`, overwriting existing names
pub fn attach<C, M>(surface: &mut OperationSurface<C>, table: OpTable<M>)
where
    M: Into<BoundMethod<C>>,
{
    for (name, method) in table {
        surface.methods.insert(name, method.into());
    }
}
