//! Method Table Builder and In-Place Adapter
//!
//! Three tables are produced per container type:
//!
//! - the special table: operator-syntax methods (`__add__`, `__rsub__`,
//!   `__and__`, `__eq__`, ...) bound to the container's own engines
//! - the flex table: named methods (`add`, `radd`, `div`, `multiply`, `eq`,
//!   ...) bound through the wrappers chosen by [`lookup`](super::lookup)
//! - the in-place table: `__iadd__` and friends, adapted from the special
//!   table

use std::collections::HashMap;
use std::sync::Arc;

use super::registry::{
    MethodWrappers, ALIASES, ARITHMETIC_OPS, COMPARISON_OPS, DIVMOD, FLEX_BOOL_OPT_OUT,
    INPLACE_OPS, LOGICAL_OPS,
};
use super::{FlexMethod, InplaceMethod, InplaceTarget, Operand, OpsContainer};
use crate::error::{Error, Result};

/// Name -> implementation mapping built once per container type
pub struct OpTable<M> {
    entries: HashMap<String, M>,
}

/// Non-mutating methods keyed by public name
pub type MethodTable<C> = OpTable<FlexMethod<C>>;

/// In-place methods keyed by public name
pub type InplaceTable<C> = OpTable<InplaceMethod<C>>;

impl<M> OpTable<M> {
    pub fn new() -> Self {
        OpTable {
            entries: HashMap::new(),
        }
    }

    /// Insert, returning the entry previously bound under `name`
    pub fn insert(&mut self, name: impl Into<String>, method: M) -> Option<M> {
        self.entries.insert(name.into(), method)
    }

    pub fn get(&self, name: &str) -> Option<&M> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in sorted order
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }
}

impl<M> Default for OpTable<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> std::fmt::Debug for OpTable<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpTable")
            .field("names", &self.names())
            .finish()
    }
}

impl<M> IntoIterator for OpTable<M> {
    type Item = (String, M);
    type IntoIter = std::collections::hash_map::IntoIter<String, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Strip underscore decoration: `and_` -> `and`, `__add__` -> `add`
pub fn normalize_name(name: &str) -> String {
    name.trim_matches('_').to_string()
}

/// Operator-syntax name of an operation: `add` -> `__add__`
pub fn special_name(name: &str) -> String {
    format!("__{}__", normalize_name(name))
}

/// In-place name: an `i` after the leading marker (`__add__` -> `__iadd__`, `add` -> `iadd`)
pub fn inplace_name(name: &str) -> String {
    let stripped = name.trim_start_matches('_');
    let marker = &name[..name.len() - stripped.len()];
    format!("{}i{}", marker, stripped)
}

/// Build the flexible (named) method table for `C`
pub fn build_flex_methods<C: OpsContainer>(wrappers: &MethodWrappers<C>) -> Result<MethodTable<C>> {
    build_flex_methods_with_aliases(wrappers, &ALIASES)
}

/// Flex table with an explicit `(alias, target)` list, applied in order
///
/// An alias whose target is missing fails with `MissingAliasTarget`; an
/// alias that would shadow an existing name fails with `DuplicateMethod`.
pub fn build_flex_methods_with_aliases<C: OpsContainer>(
    wrappers: &MethodWrappers<C>,
    aliases: &[(&str, &str)],
) -> Result<MethodTable<C>> {
    let arith = wrappers.arith;
    let comp = wrappers.comp;
    let have_divmod = wrappers.kind.supports_divmod();

    let mut raw: Vec<(&'static str, FlexMethod<C>)> = Vec::new();
    for d in ARITHMETIC_OPS.iter() {
        raw.push((d.name, arith(d.primitive)));
        if let Some(reflected) = d.reflected {
            raw.push((reflected.name(), arith(reflected)));
        }
    }
    if have_divmod {
        raw.push((DIVMOD.name, arith(DIVMOD.primitive)));
        if let Some(reflected) = DIVMOD.reflected {
            raw.push((reflected.name(), arith(reflected)));
        }
    }
    for d in COMPARISON_OPS.iter() {
        raw.push((d.name, comp(d.primitive)));
    }

    let mut table = MethodTable::new();
    for (name, method) in raw {
        let key = normalize_name(name);
        if table.insert(key.clone(), method).is_some() {
            return Err(Error::DuplicateMethod(key));
        }
    }

    // div/rdiv first, then multiply/subtract/divide
    for (alias, target) in aliases.iter() {
        if table.contains(alias) {
            return Err(Error::DuplicateMethod(alias.to_string()));
        }
        let method = table
            .get(target)
            .cloned()
            .ok_or_else(|| Error::MissingAliasTarget {
                alias: alias.to_string(),
                target: target.to_string(),
            })?;
        table.insert(*alias, method);
    }

    check_flex_opt_out(&table, C::TYPE_NAME)?;
    log::debug!("built {} flex methods for {}", table.len(), C::TYPE_NAME);
    Ok(table)
}

/// Reflected boolean ops are opted out of the flex table for every container
pub fn check_flex_opt_out<M>(table: &OpTable<M>, type_name: &str) -> Result<()> {
    let present: Vec<&str> = FLEX_BOOL_OPT_OUT
        .iter()
        .copied()
        .filter(|name| table.contains(name))
        .collect();
    if present.is_empty() {
        Ok(())
    } else {
        Err(Error::OptOutViolation(format!(
            "{} flex table contains {}",
            type_name,
            present.join(", ")
        )))
    }
}

/// Build the operator-syntax table for `C` from its own engines
pub fn build_special_methods<C: OpsContainer>() -> MethodTable<C> {
    let mut table = MethodTable::new();

    for d in ARITHMETIC_OPS.iter() {
        table.insert(special_name(d.name), C::arith_method(d.primitive));
        if let Some(reflected) = d.reflected {
            table.insert(special_name(reflected.name()), C::arith_method(reflected));
        }
    }
    if C::KIND.map(|kind| kind.supports_divmod()).unwrap_or(false) {
        table.insert(special_name(DIVMOD.name), C::arith_method(DIVMOD.primitive));
        if let Some(reflected) = DIVMOD.reflected {
            table.insert(special_name(reflected.name()), C::arith_method(reflected));
        }
    }
    for d in COMPARISON_OPS.iter() {
        table.insert(special_name(d.name), C::comp_method(d.primitive));
    }
    for d in LOGICAL_OPS.iter() {
        table.insert(special_name(d.name), C::logical_method(d.primitive));
        if let Some(reflected) = d.reflected {
            table.insert(special_name(reflected.name()), C::logical_method(reflected));
        }
    }

    table
}

fn inplace_fn<C, F>(f: F) -> InplaceMethod<C>
where
    C: 'static,
    F: for<'r, 'o> Fn(&'r mut C, Operand<'o>) -> Result<&'r mut C> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wrap a non-mutating operation into one that updates the receiver
///
/// The produced operation computes `method(receiver, other)`, detaches the
/// receiver from any parent cache, conforms the result to the receiver's
/// labels and commits it into the receiver's storage. Errors from `method`
/// or from the realignment propagate unchanged.
pub fn make_inplace<C>(method: FlexMethod<C>) -> InplaceMethod<C>
where
    C: InplaceTarget + 'static,
{
    inplace_fn(move |receiver: &mut C, other: Operand<'_>| {
        let result = method(&*receiver, other)?.into_single()?;
        receiver.reset_cacher();
        let aligned = result.reindex_like(&*receiver)?;
        // the caller asked for mutation: skip the setting-with-copy check
        receiver.update_inplace(aligned, false)?;
        log::trace!("in-place commit into {}", std::any::type_name::<C>());
        Ok(receiver)
    })
}

/// Build the in-place table from the already-built special table
pub fn build_inplace_methods<C>(special: &MethodTable<C>) -> Result<InplaceTable<C>>
where
    C: InplaceTarget + 'static,
{
    let mut table = InplaceTable::new();
    for op in INPLACE_OPS.iter() {
        let name = special_name(op);
        let method = special
            .get(&name)
            .cloned()
            .ok_or_else(|| Error::MissingMethod(name.clone()))?;
        table.insert(inplace_name(&name), make_inplace(method));
    }
    Ok(table)
}
