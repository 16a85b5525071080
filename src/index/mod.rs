use crate::error::{PandRSError, Result};
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::Range;

/// インデックス構造体
///
/// DataFrameやSeriesの行ラベル・列ラベルを表現する
#[derive(Debug, Clone)]
pub struct Index<T>
where
    T: Debug + Clone + Eq + Hash + Display,
{
    /// インデックス値
    values: Vec<T>,

    /// 値から位置へのマッピング
    map: HashMap<T, usize>,

    /// インデックスの名前（オプション）
    name: Option<String>,
}

impl<T> Index<T>
where
    T: Debug + Clone + Eq + Hash + Display,
{
    /// 新しいインデックスを作成
    pub fn new(values: Vec<T>) -> Result<Self> {
        Self::with_name(values, None)
    }

    /// 名前付きの新しいインデックスを作成
    pub fn with_name(values: Vec<T>, name: Option<String>) -> Result<Self> {
        let mut map = HashMap::with_capacity(values.len());

        // 一意性チェックしながらマップ構築
        for (i, value) in values.iter().enumerate() {
            if map.insert(value.clone(), i).is_some() {
                return Err(PandRSError::Index(format!(
                    "インデックス値 '{}' が重複しています",
                    value
                )));
            }
        }

        Ok(Index { values, map, name })
    }

    /// 空のインデックスを作成
    pub fn empty() -> Self {
        Index {
            values: Vec::new(),
            map: HashMap::new(),
            name: None,
        }
    }

    /// インデックス長を取得
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// インデックスが空かどうか
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 値から位置を取得
    pub fn get_loc(&self, key: &T) -> Option<usize> {
        self.map.get(key).copied()
    }

    /// 位置から値を取得
    pub fn get_value(&self, pos: usize) -> Option<&T> {
        self.values.get(pos)
    }

    /// 全ての値を取得
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// インデックス名を取得
    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// インデックス名を設定
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// ラベルの並びが同一かどうか
    pub fn equals(&self, other: &Index<T>) -> bool {
        self.values == other.values
    }

    /// `target` の各ラベルについて、このインデックス上の位置を返す
    ///
    /// 存在しないラベルは `None` になる（再整列時にNAで埋められる）。
    pub fn get_indexer(&self, target: &Index<T>) -> Vec<Option<usize>> {
        target.values.iter().map(|label| self.get_loc(label)).collect()
    }

    /// 位置の配列から新しいインデックスを作成
    pub fn take(&self, positions: &[usize]) -> Result<Self> {
        let mut values = Vec::with_capacity(positions.len());
        for &pos in positions {
            match self.values.get(pos) {
                Some(v) => values.push(v.clone()),
                None => {
                    return Err(PandRSError::IndexOutOfBounds {
                        index: pos,
                        size: self.len(),
                    })
                }
            }
        }
        Self::with_name(values, self.name.clone())
    }
}

impl<T> Index<T>
where
    T: Debug + Clone + Eq + Hash + Display + Ord,
{
    /// 和集合インデックスを作成
    ///
    /// 同一のラベル列ならそのまま返し、異なる場合はソート済みの和集合になる。
    pub fn union(&self, other: &Index<T>) -> Result<Self> {
        if self.equals(other) {
            return Ok(self.clone());
        }

        let mut values: Vec<T> = self.values.clone();
        for v in &other.values {
            if !self.map.contains_key(v) {
                values.push(v.clone());
            }
        }
        values.sort();

        let name = if self.name == other.name {
            self.name.clone()
        } else {
            None
        };
        Self::with_name(values, name)
    }
}

impl Index<usize> {
    /// 整数範囲からインデックスを作成
    pub fn from_range(range: Range<usize>) -> Result<Index<usize>> {
        let values: Vec<usize> = range.collect();
        Index::<usize>::new(values)
    }
}

/// 整数インデックス型のエイリアス
pub type RangeIndex = Index<usize>;

/// 文字列インデックス型のエイリアス
pub type StringIndex = Index<String>;
