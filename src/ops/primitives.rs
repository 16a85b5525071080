//! Binary computation primitives over [`Scalar`] values
//!
//! Each [`Primitive`] names one raw binary operation. Reflected primitives
//! (`RAdd`, `RSub`, ...) evaluate the same kernel with the operands swapped,
//! so `RSub.apply(a, b) == Sub.apply(b, a)`.

use num_traits::{Float, Zero};

use crate::error::{Error, Result};
use crate::scalar::Scalar;

/// Category of a binary operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpCategory {
    Arithmetic,
    Comparison,
    Logical,
}

/// Raw binary primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Add,
    Sub,
    Mul,
    TrueDiv,
    FloorDiv,
    Mod,
    Pow,
    DivMod,
    RAdd,
    RSub,
    RMul,
    RTrueDiv,
    RFloorDiv,
    RMod,
    RPow,
    RDivMod,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or,
    Xor,
    RAnd,
    ROr,
    RXor,
}

impl Primitive {
    /// Name under the operator-module convention (`and_` keeps its trailing underscore)
    pub fn name(self) -> &'static str {
        use Primitive::*;
        match self {
            Add => "add",
            Sub => "sub",
            Mul => "mul",
            TrueDiv => "truediv",
            FloorDiv => "floordiv",
            Mod => "mod",
            Pow => "pow",
            DivMod => "divmod",
            RAdd => "radd",
            RSub => "rsub",
            RMul => "rmul",
            RTrueDiv => "rtruediv",
            RFloorDiv => "rfloordiv",
            RMod => "rmod",
            RPow => "rpow",
            RDivMod => "rdivmod",
            Eq => "eq",
            Ne => "ne",
            Lt => "lt",
            Gt => "gt",
            Le => "le",
            Ge => "ge",
            And => "and_",
            Or => "or_",
            Xor => "xor_",
            RAnd => "rand_",
            ROr => "ror_",
            RXor => "rxor_",
        }
    }

    pub fn category(self) -> OpCategory {
        use Primitive::*;
        match self {
            Eq | Ne | Lt | Gt | Le | Ge => OpCategory::Comparison,
            And | Or | Xor | RAnd | ROr | RXor => OpCategory::Logical,
            _ => OpCategory::Arithmetic,
        }
    }

    /// The primitive with the operands swapped, if it has a distinct one
    pub fn reflected(self) -> Option<Primitive> {
        use Primitive::*;
        Some(match self {
            Add => RAdd,
            Sub => RSub,
            Mul => RMul,
            TrueDiv => RTrueDiv,
            FloorDiv => RFloorDiv,
            Mod => RMod,
            Pow => RPow,
            DivMod => RDivMod,
            RAdd => Add,
            RSub => Sub,
            RMul => Mul,
            RTrueDiv => TrueDiv,
            RFloorDiv => FloorDiv,
            RMod => Mod,
            RPow => Pow,
            RDivMod => DivMod,
            And => RAnd,
            Or => ROr,
            Xor => RXor,
            RAnd => And,
            ROr => Or,
            RXor => Xor,
            Eq | Ne | Lt | Gt | Le | Ge => return None,
        })
    }

    pub fn is_reflected(self) -> bool {
        use Primitive::*;
        matches!(
            self,
            RAdd | RSub | RMul | RTrueDiv | RFloorDiv | RMod | RPow | RDivMod | RAnd | ROr | RXor
        )
    }

    /// divmod and rdivmod produce a (quotient, remainder) pair
    pub fn returns_pair(self) -> bool {
        matches!(self, Primitive::DivMod | Primitive::RDivMod)
    }

    /// Evaluate a single-valued primitive
    pub fn apply(self, left: &Scalar, right: &Scalar) -> Result<Scalar> {
        use Primitive::*;
        if self.is_reflected() {
            // reflected: the container is the right-hand operand
            let forward = self.reflected().unwrap_or(self);
            return forward.apply(right, left);
        }
        match self {
            Add => arith(left, right, i64::wrapping_add, |a, b| a + b),
            Sub => arith(left, right, i64::wrapping_sub, |a, b| a - b),
            Mul => arith(left, right, i64::wrapping_mul, |a, b| a * b),
            TrueDiv => truediv(left, right),
            FloorDiv => floordiv(left, right),
            Mod => modulo(left, right),
            Pow => pow(left, right),
            Eq | Ne | Lt | Gt | Le | Ge => Ok(compare(self, left, right)),
            And | Or | Xor => logical(self, left, right),
            DivMod => Err(Error::InvalidOperation(
                "divmod returns a pair; use apply_pair".to_string(),
            )),
            _ => unreachable!("reflected primitives are handled above"),
        }
    }

    /// Evaluate a pair-valued primitive (divmod / rdivmod)
    pub fn apply_pair(self, left: &Scalar, right: &Scalar) -> Result<(Scalar, Scalar)> {
        match self {
            Primitive::DivMod => Ok((floordiv(left, right)?, modulo(left, right)?)),
            // swapped operands: (other // self, other % self)
            Primitive::RDivMod => Ok((floordiv(right, left)?, modulo(right, left)?)),
            other => Err(Error::InvalidOperation(format!(
                "{} does not return a pair",
                other.name()
            ))),
        }
    }
}

/// Numeric view of a scalar; bools take part in arithmetic as 0/1
#[derive(Debug, Clone, Copy)]
enum Num {
    I(i64),
    F(f64),
}

fn to_num(value: &Scalar) -> Option<Num> {
    match value {
        Scalar::Null => None,
        Scalar::Bool(b) => Some(Num::I(*b as i64)),
        Scalar::Int(i) => Some(Num::I(*i)),
        Scalar::Float(f) => Some(Num::F(*f)),
    }
}

fn to_f64(n: Num) -> f64 {
    match n {
        Num::I(i) => i as f64,
        Num::F(f) => f,
    }
}

fn operands(left: &Scalar, right: &Scalar) -> Option<(Num, Num)> {
    Some((to_num(left)?, to_num(right)?))
}

fn arith(
    left: &Scalar,
    right: &Scalar,
    int_op: fn(i64, i64) -> i64,
    float_op: fn(f64, f64) -> f64,
) -> Result<Scalar> {
    Ok(match operands(left, right) {
        None => Scalar::Null,
        Some((Num::I(a), Num::I(b))) => Scalar::Int(int_op(a, b)),
        Some((a, b)) => Scalar::Float(float_op(to_f64(a), to_f64(b))),
    })
}

fn truediv(left: &Scalar, right: &Scalar) -> Result<Scalar> {
    Ok(match operands(left, right) {
        None => Scalar::Null,
        Some((a, b)) => Scalar::Float(to_f64(a) / to_f64(b)),
    })
}

/// Division by an integer zero follows float semantics: ±inf, or NaN for 0/0
fn zero_div_fill(numerator: i64) -> Scalar {
    Scalar::Float(if numerator.is_zero() {
        f64::nan()
    } else if numerator > 0 {
        f64::infinity()
    } else {
        f64::neg_infinity()
    })
}

fn floordiv(left: &Scalar, right: &Scalar) -> Result<Scalar> {
    Ok(match operands(left, right) {
        None => Scalar::Null,
        Some((Num::I(a), Num::I(0))) => zero_div_fill(a),
        Some((Num::I(a), Num::I(b))) => {
            let q = a.wrapping_div(b);
            // round toward negative infinity
            if a.wrapping_rem(b) != 0 && ((a < 0) != (b < 0)) {
                Scalar::Int(q - 1)
            } else {
                Scalar::Int(q)
            }
        }
        Some((a, b)) => Scalar::Float((to_f64(a) / to_f64(b)).floor()),
    })
}

fn modulo(left: &Scalar, right: &Scalar) -> Result<Scalar> {
    Ok(match operands(left, right) {
        None => Scalar::Null,
        Some((Num::I(_), Num::I(0))) => Scalar::Float(f64::nan()),
        Some((Num::I(a), Num::I(b))) => {
            let r = a.wrapping_rem(b);
            // the remainder takes the sign of the divisor
            if r != 0 && ((r < 0) != (b < 0)) {
                Scalar::Int(r + b)
            } else {
                Scalar::Int(r)
            }
        }
        Some((a, b)) => {
            let (a, b) = (to_f64(a), to_f64(b));
            if b.is_zero() {
                Scalar::Float(f64::nan())
            } else {
                let r = a % b;
                if !r.is_zero() && ((r < 0.0) != (b < 0.0)) {
                    Scalar::Float(r + b)
                } else {
                    Scalar::Float(r)
                }
            }
        }
    })
}

fn pow(left: &Scalar, right: &Scalar) -> Result<Scalar> {
    match operands(left, right) {
        None => Ok(Scalar::Null),
        Some((Num::I(_), Num::I(b))) if b < 0 => Err(Error::ComputationError(
            "Integers to negative integer powers are not allowed".to_string(),
        )),
        Some((Num::I(a), Num::I(b))) => {
            let exp = u32::try_from(b).map_err(|_| {
                Error::ComputationError(format!("exponent {} is too large", b))
            })?;
            Ok(Scalar::Int(a.wrapping_pow(exp)))
        }
        Some((a, b)) => Ok(Scalar::Float(to_f64(a).powf(to_f64(b)))),
    }
}

fn compare(op: Primitive, left: &Scalar, right: &Scalar) -> Scalar {
    let ordering = match operands(left, right) {
        // NA never compares equal; `ne` is the only comparison that holds
        None => return Scalar::Bool(op == Primitive::Ne),
        Some((Num::I(a), Num::I(b))) => a.partial_cmp(&b),
        Some((a, b)) => to_f64(a).partial_cmp(&to_f64(b)),
    };
    let result = match ordering {
        None => op == Primitive::Ne,
        Some(ord) => match op {
            Primitive::Eq => ord.is_eq(),
            Primitive::Ne => ord.is_ne(),
            Primitive::Lt => ord.is_lt(),
            Primitive::Gt => ord.is_gt(),
            Primitive::Le => ord.is_le(),
            Primitive::Ge => ord.is_ge(),
            _ => false,
        },
    };
    Scalar::Bool(result)
}

fn logical(op: Primitive, left: &Scalar, right: &Scalar) -> Result<Scalar> {
    // NA behaves as false
    let fill = |v: &Scalar| if v.is_null() { Scalar::Bool(false) } else { *v };
    match (fill(left), fill(right)) {
        (Scalar::Bool(a), Scalar::Bool(b)) => Ok(Scalar::Bool(match op {
            Primitive::And => a & b,
            Primitive::Or => a | b,
            _ => a ^ b,
        })),
        (Scalar::Float(_), _) | (_, Scalar::Float(_)) => Err(Error::ComputationError(format!(
            "unsupported operand type for {}: float64",
            op.name()
        ))),
        (a, b) => {
            let (a, b) = (a.as_i64().unwrap_or(0), b.as_i64().unwrap_or(0));
            Ok(Scalar::Int(match op {
                Primitive::And => a & b,
                Primitive::Or => a | b,
                _ => a ^ b,
            }))
        }
    }
}
