//! DataFrame operation engine and operation surface
//!
//! Binary operations align both operands on rows and columns before the
//! element-wise pass. A Series operand is aligned to the rows and then
//! broadcast down every column.

use crate::error::{Error, Result};
use crate::index::{RangeIndex, StringIndex};
use crate::ops::array_ops::{evaluate, evaluate_scalar, Evaluated};
use crate::ops::{
    self, flex_fn, ContainerKind, FlexMethod, InplaceTarget, OpOutput, Operand, OperationSurface,
    OpCategory, OpsContainer, Primitive,
};

use super::DataFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Alignment {
    /// Union of rows and columns, missing cells become NA
    Outer,
    /// Row and column labels must already match
    Identical,
}

fn assemble(
    op: Primitive,
    evaluated: Vec<Evaluated>,
    columns: StringIndex,
    index: RangeIndex,
) -> OpOutput<DataFrame> {
    let mut first = Vec::with_capacity(evaluated.len());
    let mut second = Vec::new();
    for column in evaluated {
        match column {
            Evaluated::Single(values) => first.push(values),
            Evaluated::Pair(q, r) => {
                first.push(q);
                second.push(r);
            }
        }
    }
    if op.returns_pair() {
        OpOutput::Pair(
            DataFrame::from_parts(columns.clone(), first, index.clone()),
            DataFrame::from_parts(columns, second, index),
        )
    } else {
        OpOutput::Single(DataFrame::from_parts(columns, first, index))
    }
}

fn frame_op(
    left: &DataFrame,
    other: Operand<'_>,
    op: Primitive,
    alignment: Alignment,
) -> Result<OpOutput<DataFrame>> {
    match other {
        Operand::Scalar(value) => {
            let evaluated = left
                .data()
                .iter()
                .map(|column| evaluate_scalar(op, column, &value))
                .collect::<Result<Vec<_>>>()?;
            Ok(assemble(op, evaluated, left.columns.clone(), left.index.clone()))
        }
        Operand::Frame(right) => {
            let same_labels =
                left.index.equals(&right.index) && left.columns.equals(&right.columns);
            if !same_labels && alignment == Alignment::Identical {
                return Err(Error::InvalidOperation(
                    "Can only compare identically-labeled DataFrame objects".to_string(),
                ));
            }

            let (index, columns) = if same_labels {
                (left.index.clone(), left.columns.clone())
            } else {
                (
                    left.index.union(&right.index)?,
                    left.columns.union(&right.columns)?,
                )
            };
            let l = left.reindex(&index, &columns);
            let r = right.reindex(&index, &columns);
            let evaluated = l
                .data()
                .iter()
                .zip(r.data().iter())
                .map(|(a, b)| evaluate(op, a, b))
                .collect::<Result<Vec<_>>>()?;
            Ok(assemble(op, evaluated, columns, index))
        }
        Operand::Series(series) => {
            let same_rows = left.index.equals(series.index());
            if !same_rows && alignment == Alignment::Identical {
                return Err(Error::InvalidOperation(
                    "Can only compare a DataFrame with an identically-labeled Series".to_string(),
                ));
            }

            let index = if same_rows {
                left.index.clone()
            } else {
                left.index.union(series.index())?
            };
            let l = left.reindex(&index, &left.columns);
            let s = series.reindex(&index);
            let evaluated = l
                .data()
                .iter()
                .map(|column| evaluate(op, column, s.values()))
                .collect::<Result<Vec<_>>>()?;
            Ok(assemble(op, evaluated, left.columns.clone(), index))
        }
    }
}

fn aligned(op: Primitive) -> FlexMethod<DataFrame> {
    flex_fn(move |left: &DataFrame, other: Operand<'_>| {
        frame_op(left, other, op, Alignment::Outer)
    })
}

impl OpsContainer for DataFrame {
    const TYPE_NAME: &'static str = "DataFrame";
    const KIND: Option<ContainerKind> = Some(ContainerKind::TwoDimensional);

    fn flex_arith_method(op: Primitive) -> FlexMethod<Self> {
        aligned(op)
    }

    // aligns like arithmetic, but only ever yields boolean frames
    fn flex_comp_method(op: Primitive) -> FlexMethod<Self> {
        flex_fn(move |left: &DataFrame, other: Operand<'_>| {
            if op.category() != OpCategory::Comparison {
                return Err(Error::InvalidOperation(format!(
                    "DataFrame flex comparison cannot evaluate {}",
                    op.name()
                )));
            }
            frame_op(left, other, op, Alignment::Outer)
        })
    }

    fn arith_method(op: Primitive) -> FlexMethod<Self> {
        aligned(op)
    }

    fn comp_method(op: Primitive) -> FlexMethod<Self> {
        flex_fn(move |left: &DataFrame, other: Operand<'_>| {
            frame_op(left, other, op, Alignment::Identical)
        })
    }

    fn logical_method(op: Primitive) -> FlexMethod<Self> {
        aligned(op)
    }
}

impl InplaceTarget for DataFrame {
    // a DataFrame is never handed out as a cached view
    fn reset_cacher(&mut self) {}

    fn reindex_like(self, other: &Self) -> Result<Self> {
        Ok(self.into_reindexed(&other.index, &other.columns))
    }

    fn update_inplace(&mut self, result: Self, verify_is_copy: bool) -> Result<()> {
        if verify_is_copy {
            crate::core::cache::check_setitem_copy(&self.is_copy, "DataFrame")?;
        }
        if result.shape() != self.shape() {
            return Err(Error::Alignment(format!(
                "result of shape {:?} cannot be committed into a DataFrame of shape {:?}",
                result.shape(),
                self.shape()
            )));
        }
        self.columns = result.columns;
        self.data = result.data;
        self.index = result.index;
        if !self.root.keys().is_empty() {
            log::trace!("clearing DataFrame item cache {:?}", self.root.keys());
        }
        self.root.clear();
        Ok(())
    }
}

lazy_static::lazy_static! {
    static ref FRAME_OPS: OperationSurface<DataFrame> = match ops::install::<DataFrame>() {
        Ok(surface) => surface,
        Err(e) => panic!("failed to install DataFrame operations: {}", e),
    };
}

impl DataFrame {
    /// Operation surface shared by every DataFrame
    pub fn ops() -> &'static OperationSurface<DataFrame> {
        &FRAME_OPS
    }
}

flex_methods! {
    DataFrame {
        /// `self + other`, aligned on rows and columns
        add => "add";
        radd => "radd";
        sub => "sub";
        rsub => "rsub";
        mul => "mul";
        rmul => "rmul";
        truediv => "truediv";
        rtruediv => "rtruediv";
        floordiv => "floordiv";
        rfloordiv => "rfloordiv";
        modulo => "mod";
        rmod => "rmod";
        pow => "pow";
        rpow => "rpow";
        div => "div";
        rdiv => "rdiv";
        multiply => "multiply";
        subtract => "subtract";
        divide => "divide";
        /// Element-wise `==`; unlike `==` through the operator table this aligns first
        eq => "eq";
        ne => "ne";
        lt => "lt";
        gt => "gt";
        le => "le";
        ge => "ge";
    }
}

inplace_methods! {
    DataFrame {
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
    DataFrame {
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
