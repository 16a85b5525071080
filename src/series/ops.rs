//! Series operation engine and operation surface

use crate::error::{Error, Result};
use crate::index::RangeIndex;
use crate::ops::array_ops::{evaluate, evaluate_scalar, Evaluated};
use crate::ops::{
    self, flex_fn, ContainerKind, FlexMethod, InplaceTarget, OpOutput, Operand, OperationSurface,
    OpsContainer, Primitive,
};

use super::Series;

/// How Series operands with different labels are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Alignment {
    /// Union of both label sets, missing positions become NA
    Outer,
    /// Labels must already match
    Identical,
}

fn wrap(out: Evaluated, index: RangeIndex, name: Option<String>) -> OpOutput<Series> {
    match out {
        Evaluated::Single(values) => OpOutput::Single(Series::from_parts(values, index, name)),
        Evaluated::Pair(q, r) => OpOutput::Pair(
            Series::from_parts(q, index.clone(), name.clone()),
            Series::from_parts(r, index, name),
        ),
    }
}

fn series_op(
    left: &Series,
    other: Operand<'_>,
    op: Primitive,
    alignment: Alignment,
) -> Result<OpOutput<Series>> {
    match other {
        Operand::Scalar(value) => {
            let out = evaluate_scalar(op, left.values(), &value)?;
            Ok(wrap(out, left.index.clone(), left.name.clone()))
        }
        Operand::Series(right) => {
            let name = if left.name == right.name {
                left.name.clone()
            } else {
                None
            };
            if left.index.equals(&right.index) {
                let out = evaluate(op, left.values(), right.values())?;
                return Ok(wrap(out, left.index.clone(), name));
            }
            if alignment == Alignment::Identical {
                return Err(Error::InvalidOperation(
                    "Can only compare identically-labeled Series objects".to_string(),
                ));
            }
            let index = left.index.union(&right.index)?;
            let l = left.reindex(&index);
            let r = right.reindex(&index);
            let out = evaluate(op, l.values(), r.values())?;
            Ok(wrap(out, index, name))
        }
        Operand::Frame(_) => Err(Error::InvalidOperation(format!(
            "Series.{} with a {} operand; call the operation on the DataFrame",
            op.name(),
            other.kind_name()
        ))),
    }
}

/// Outer-aligning wrapper: flex arithmetic and comparisons, operator arithmetic and logical ops
fn flex_method(op: Primitive) -> FlexMethod<Series> {
    flex_fn(move |left: &Series, other: Operand<'_>| {
        series_op(left, other, op, Alignment::Outer)
    })
}

impl OpsContainer for Series {
    const TYPE_NAME: &'static str = "Series";
    const KIND: Option<ContainerKind> = Some(ContainerKind::OneDimensional);

    fn flex_arith_method(op: Primitive) -> FlexMethod<Self> {
        flex_method(op)
    }

    fn arith_method(op: Primitive) -> FlexMethod<Self> {
        flex_method(op)
    }

    fn comp_method(op: Primitive) -> FlexMethod<Self> {
        flex_fn(move |left: &Series, other: Operand<'_>| {
            series_op(left, other, op, Alignment::Identical)
        })
    }

    fn logical_method(op: Primitive) -> FlexMethod<Self> {
        flex_method(op)
    }
}

impl InplaceTarget for Series {
    fn reset_cacher(&mut self) {
        if let Some(cacher) = self.cacher.take() {
            log::trace!("detaching Series view '{}' from its parent", cacher.key());
            cacher.invalidate();
        }
    }

    fn reindex_like(self, other: &Self) -> Result<Self> {
        Ok(self.into_reindexed(&other.index))
    }

    fn update_inplace(&mut self, result: Self, verify_is_copy: bool) -> Result<()> {
        if verify_is_copy {
            self.check_setitem_copy()?;
        }
        if result.values.len() != self.index.len() {
            return Err(Error::Alignment(format!(
                "result of length {} cannot be committed into a Series of length {}",
                result.values.len(),
                self.index.len()
            )));
        }
        self.values = result.values;
        self.index = result.index;
        Ok(())
    }
}

lazy_static::lazy_static! {
    static ref SERIES_OPS: OperationSurface<Series> = match ops::install::<Series>() {
        Ok(surface) => surface,
        Err(e) => panic!("failed to install Series operations: {}", e),
    };
}

impl Series {
    /// Operation surface shared by every Series
    pub fn ops() -> &'static OperationSurface<Series> {
        &SERIES_OPS
    }

    /// `(self // other, self % other)`
    pub fn divmod<'a>(&self, other: impl Into<Operand<'a>>) -> Result<(Series, Series)> {
        Self::ops().call("divmod", self, other.into())?.into_pair()
    }

    /// `(other // self, other % self)`
    pub fn rdivmod<'a>(&self, other: impl Into<Operand<'a>>) -> Result<(Series, Series)> {
        Self::ops().call("rdivmod", self, other.into())?.into_pair()
    }
}

flex_methods! {
    Series {
        /// `self + other`
        add => "add";
        /// `other + self`
        radd => "radd";
        /// `self - other`
        sub => "sub";
        /// `other - self`
        rsub => "rsub";
        mul => "mul";
        rmul => "rmul";
        /// True division, always floating point
        truediv => "truediv";
        rtruediv => "rtruediv";
        floordiv => "floordiv";
        rfloordiv => "rfloordiv";
        /// Flex `mod`
        modulo => "mod";
        rmod => "rmod";
        pow => "pow";
        rpow => "rpow";
        div => "div";
        rdiv => "rdiv";
        multiply => "multiply";
        subtract => "subtract";
        divide => "divide";
        eq => "eq";
        ne => "ne";
        lt => "lt";
        gt => "gt";
        le => "le";
        ge => "ge";
    }
}

inplace_methods! {
    Series {
        iadd => "__iadd__";
        isub => "__isub__";
        imul => "__imul__";
        itruediv => "__itruediv__";
        ifloordiv => "__ifloordiv__";
        imod => "__imod__";
        ipow => "__ipow__";
        iand => "__iand__";
        ior => "__ior__";
        ixor => "__ixor__";
    }
}

binary_operators! {
    Series {
        Add, add, "__add__", "__radd__";
        Sub, sub, "__sub__", "__rsub__";
        Mul, mul, "__mul__", "__rmul__";
        Div, div, "__truediv__", "__rtruediv__";
        Rem, rem, "__mod__", "__rmod__";
        BitAnd, bitand, "__and__", "__rand__";
        BitOr, bitor, "__or__", "__ror__";
        BitXor, bitxor, "__xor__", "__rxor__";
    }
}
