//! Operation Registry
//!
//! Static tables of the binary operations a container exposes. Nothing here
//! is built from user input; the descriptors are fixed at compile time.

use serde::Serialize;

use super::primitives::{OpCategory, Primitive};
use super::{OpsContainer, WrapperFactory};
use crate::error::{Error, Result};

/// Capability tag of a labeled container type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ContainerKind {
    /// 1-D labeled container (Series)
    OneDimensional,
    /// 2-D labeled container (DataFrame)
    TwoDimensional,
}

impl ContainerKind {
    /// divmod / rdivmod are only provided for 1-D containers
    pub fn supports_divmod(self) -> bool {
        self == ContainerKind::OneDimensional
    }
}

/// Describes one binary operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpDescriptor {
    /// Canonical name, possibly underscore-decorated (`and_`)
    pub name: &'static str,
    #[serde(skip)]
    pub primitive: Primitive,
    /// Primitive used when the container is the right-hand operand
    #[serde(skip)]
    pub reflected: Option<Primitive>,
    pub category: OpCategory,
    /// divmod returns a (quotient, remainder) pair
    pub pair_result: bool,
}

impl OpDescriptor {
    const fn new(
        name: &'static str,
        primitive: Primitive,
        reflected: Option<Primitive>,
        category: OpCategory,
    ) -> Self {
        OpDescriptor {
            name,
            primitive,
            reflected,
            category,
            pair_result: false,
        }
    }

    /// Name of the reflected entry (`radd`, `rand_`, ...)
    pub fn reflected_name(&self) -> Option<&'static str> {
        self.reflected.map(Primitive::name)
    }
}

use super::primitives::OpCategory::{Arithmetic, Comparison, Logical};

/// Arithmetic operations, each with a reflected counterpart
pub static ARITHMETIC_OPS: [OpDescriptor; 7] = [
    OpDescriptor::new("add", Primitive::Add, Some(Primitive::RAdd), Arithmetic),
    OpDescriptor::new("sub", Primitive::Sub, Some(Primitive::RSub), Arithmetic),
    OpDescriptor::new("mul", Primitive::Mul, Some(Primitive::RMul), Arithmetic),
    OpDescriptor::new("truediv", Primitive::TrueDiv, Some(Primitive::RTrueDiv), Arithmetic),
    OpDescriptor::new("floordiv", Primitive::FloorDiv, Some(Primitive::RFloorDiv), Arithmetic),
    OpDescriptor::new("mod", Primitive::Mod, Some(Primitive::RMod), Arithmetic),
    OpDescriptor::new("pow", Primitive::Pow, Some(Primitive::RPow), Arithmetic),
];

/// Paired floor-division / modulo
pub static DIVMOD: OpDescriptor = OpDescriptor {
    name: "divmod",
    primitive: Primitive::DivMod,
    reflected: Some(Primitive::RDivMod),
    category: Arithmetic,
    pair_result: true,
};

/// Comparisons have no reflected forms
pub static COMPARISON_OPS: [OpDescriptor; 6] = [
    OpDescriptor::new("eq", Primitive::Eq, None, Comparison),
    OpDescriptor::new("ne", Primitive::Ne, None, Comparison),
    OpDescriptor::new("lt", Primitive::Lt, None, Comparison),
    OpDescriptor::new("gt", Primitive::Gt, None, Comparison),
    OpDescriptor::new("le", Primitive::Le, None, Comparison),
    OpDescriptor::new("ge", Primitive::Ge, None, Comparison),
];

/// Boolean combination ops; operator syntax only, never flex methods
pub static LOGICAL_OPS: [OpDescriptor; 3] = [
    OpDescriptor::new("and_", Primitive::And, Some(Primitive::RAnd), Logical),
    OpDescriptor::new("or_", Primitive::Or, Some(Primitive::ROr), Logical),
    OpDescriptor::new("xor_", Primitive::Xor, Some(Primitive::RXor), Logical),
];

/// Alternate public names, `(alias, target)`; applied in order
pub static ALIASES: [(&str, &str); 5] = [
    ("div", "truediv"),
    ("rdiv", "rtruediv"),
    ("multiply", "mul"),
    ("subtract", "sub"),
    ("divide", "truediv"),
];

/// Reflected boolean ops that must never appear among flex methods
pub static FLEX_BOOL_OPT_OUT: [&str; 3] = ["ror", "rxor", "rand"];

/// Operations that get an in-place form
pub static INPLACE_OPS: [&str; 10] = [
    "add", "sub", "mul", "truediv", "floordiv", "mod", "pow", "and", "or", "xor",
];

/// Arithmetic and comparison wrapper factories selected for a container kind
pub struct MethodWrappers<C> {
    pub kind: ContainerKind,
    pub arith: WrapperFactory<C>,
    pub comp: WrapperFactory<C>,
    unified: bool,
}

impl<C> std::fmt::Debug for MethodWrappers<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodWrappers")
            .field("kind", &self.kind)
            .field("unified", &self.is_unified())
            .finish()
    }
}

impl<C> MethodWrappers<C> {
    /// One factory serves both arithmetic and comparison
    pub fn is_unified(&self) -> bool {
        self.unified
    }
}

/// Select the wrapper factories for `C` by its capability tag
///
/// 1-D containers use one unified factory for both roles; 2-D containers
/// use distinct arithmetic and comparison factories. Types carrying neither
/// capability are a configuration fault.
pub fn lookup<C: OpsContainer>() -> Result<MethodWrappers<C>> {
    match C::KIND {
        Some(ContainerKind::OneDimensional) => Ok(MethodWrappers {
            kind: ContainerKind::OneDimensional,
            arith: C::flex_arith_method,
            comp: C::flex_arith_method,
            unified: true,
        }),
        Some(ContainerKind::TwoDimensional) => Ok(MethodWrappers {
            kind: ContainerKind::TwoDimensional,
            arith: C::flex_arith_method,
            comp: C::flex_comp_method,
            unified: false,
        }),
        None => Err(Error::UnrecognizedContainer(C::TYPE_NAME)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic_descriptors_are_reflected() {
        for d in ARITHMETIC_OPS.iter() {
            let reflected = d.reflected.expect("arithmetic op without reflection");
            assert_eq!(reflected.reflected(), Some(d.primitive));
            assert_eq!(d.reflected_name(), Some(reflected.name()));
            assert!(!d.pair_result);
        }
        assert!(DIVMOD.pair_result);
    }

    #[test]
    fn test_comparisons_have_no_reflection() {
        assert!(COMPARISON_OPS.iter().all(|d| d.reflected.is_none()));
        assert!(COMPARISON_OPS
            .iter()
            .all(|d| d.category == OpCategory::Comparison));
    }

    #[test]
    fn test_divmod_capability() {
        assert!(ContainerKind::OneDimensional.supports_divmod());
        assert!(!ContainerKind::TwoDimensional.supports_divmod());
    }
}
