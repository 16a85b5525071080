//! Element-wise evaluation over already-aligned value slices

use super::primitives::Primitive;
use crate::error::{Error, Result};
use crate::scalar::Scalar;

/// Values produced by one element-wise pass
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluated {
    Single(Vec<Scalar>),
    Pair(Vec<Scalar>, Vec<Scalar>),
}

fn evaluate_with<'a, F>(op: Primitive, left: &'a [Scalar], right: F) -> Result<Evaluated>
where
    F: Fn(usize) -> &'a Scalar,
{
    if op.returns_pair() {
        let mut quotient = Vec::with_capacity(left.len());
        let mut remainder = Vec::with_capacity(left.len());
        for (i, l) in left.iter().enumerate() {
            let (q, r) = op.apply_pair(l, right(i))?;
            quotient.push(q);
            remainder.push(r);
        }
        Ok(Evaluated::Pair(quotient, remainder))
    } else {
        let values = left
            .iter()
            .enumerate()
            .map(|(i, l)| op.apply(l, right(i)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Evaluated::Single(values))
    }
}

/// Apply `op` pairwise; both sides must already share one label order
pub fn evaluate(op: Primitive, left: &[Scalar], right: &[Scalar]) -> Result<Evaluated> {
    if left.len() != right.len() {
        return Err(Error::LengthMismatch {
            expected: left.len(),
            actual: right.len(),
        });
    }
    evaluate_with(op, left, |i| &right[i])
}

/// Apply `op` between every element and one scalar
pub fn evaluate_scalar(op: Primitive, left: &[Scalar], right: &Scalar) -> Result<Evaluated> {
    evaluate_with(op, left, |_| right)
}

/// Gather values by an indexer; `None` positions become NA
pub fn take_or_null(values: &[Scalar], indexer: &[Option<usize>]) -> Vec<Scalar> {
    indexer
        .iter()
        .map(|pos| pos.and_then(|p| values.get(p).copied()).unwrap_or(Scalar::Null))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_length_mismatch() {
        let l = vec![Scalar::Int(1), Scalar::Int(2)];
        let r = vec![Scalar::Int(1)];
        assert!(matches!(
            evaluate(Primitive::Add, &l, &r),
            Err(Error::LengthMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_evaluate_pair() {
        let l = vec![Scalar::Int(7), Scalar::Int(9)];
        let out = evaluate_scalar(Primitive::DivMod, &l, &Scalar::Int(4)).unwrap();
        assert_eq!(
            out,
            Evaluated::Pair(
                vec![Scalar::Int(1), Scalar::Int(2)],
                vec![Scalar::Int(3), Scalar::Int(1)]
            )
        );
    }

    #[test]
    fn test_take_or_null() {
        let values = vec![Scalar::Int(1), Scalar::Int(2)];
        assert_eq!(
            take_or_null(&values, &[Some(1), None, Some(0)]),
            vec![Scalar::Int(2), Scalar::Null, Scalar::Int(1)]
        );
    }
}
