use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Series / DataFrame のセル値
///
/// 欠損値（NA）を含む動的型の値。演算の型強制は演算エンジン側で行う。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum Scalar {
    /// 値が存在しない場合
    #[default]
    Null,
    /// 真偽値
    Bool(bool),
    /// 64ビット整数
    Int(i64),
    /// 64ビット浮動小数点数
    Float(f64),
}

impl Scalar {
    /// 欠損値かどうかをチェック
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// 値があるかどうかをチェック
    pub fn is_value(&self) -> bool {
        !self.is_null()
    }

    /// 浮動小数点数として取得（真偽値は0/1）
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Null => None,
            Scalar::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Scalar::Int(i) => Some(*i as f64),
            Scalar::Float(f) => Some(*f),
        }
    }

    /// 整数として取得（浮動小数点数は変換しない）
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Bool(b) => Some(*b as i64),
            Scalar::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// 真偽値として取得
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// 型名
    pub fn dtype(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "int64",
            Scalar::Float(_) => "float64",
        }
    }

    /// NA同士を等しいとみなす比較（`equals`用）
    pub fn same_as(&self, other: &Scalar) -> bool {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => true,
            (Scalar::Float(a), Scalar::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            _ => self == other,
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(v as i64)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

// Option<T>からの変換: NoneはNA
impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Scalar::Null,
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "NA"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert!(Scalar::Int(0).is_value());
        assert!(!Scalar::Null.is_value());

        assert_eq!(Scalar::Bool(true).as_f64(), Some(1.0));
        assert_eq!(Scalar::Int(-2).as_f64(), Some(-2.0));
        assert_eq!(Scalar::Null.as_f64(), None);

        assert_eq!(Scalar::Bool(false).as_bool(), Some(false));
        assert_eq!(Scalar::Int(1).as_bool(), None);
        assert_eq!(Scalar::Float(1.5).as_i64(), None);
    }

    #[test]
    fn test_same_as_treats_missing_as_equal() {
        assert!(Scalar::Null.same_as(&Scalar::Null));
        assert!(Scalar::Float(f64::NAN).same_as(&Scalar::Float(f64::NAN)));
        assert!(!Scalar::Int(1).same_as(&Scalar::Float(1.0)));
        assert_eq!(Scalar::from(None::<i64>).dtype(), "null");
        assert_eq!(Scalar::from(Some(2.0)).dtype(), "float64");
    }
}
