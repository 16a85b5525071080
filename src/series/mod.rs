mod ops;

use std::rc::{Rc, Weak};

use crate::core::cache::{check_setitem_copy, is_copy_live, CacheRoot, Cacher};
use crate::error::{PandRSError, Result};
use crate::index::RangeIndex;
use crate::ops::array_ops::take_or_null;
use crate::scalar::Scalar;

/// Series構造体: 一次元のラベル付き値の配列
#[derive(Debug)]
pub struct Series {
    /// Seriesのデータ値
    values: Vec<Scalar>,

    /// インデックスラベル
    index: RangeIndex,

    /// 名前（オプション）
    name: Option<String>,

    /// 同一性トークン（派生コピーからの弱参照先）
    root: Rc<CacheRoot>,

    /// DataFrameの列ビューとして取得された場合の親へのリンク
    cacher: Option<Cacher>,

    /// `head` などで派生したコピーの場合の親へのリンク
    is_copy: Option<Weak<CacheRoot>>,
}

// 基本実装
impl Series {
    /// 新しいSeriesをベクトルから作成
    pub fn new<T: Into<Scalar>>(values: Vec<T>, name: Option<String>) -> Result<Self> {
        let len = values.len();
        let index = RangeIndex::from_range(0..len)?;
        Ok(Self::from_parts(
            values.into_iter().map(Into::into).collect(),
            index,
            name,
        ))
    }

    /// カスタムインデックス付きでSeriesを作成
    pub fn with_index<T: Into<Scalar>>(
        values: Vec<T>,
        index: RangeIndex,
        name: Option<String>,
    ) -> Result<Self> {
        if values.len() != index.len() {
            return Err(PandRSError::Consistency(format!(
                "値の長さ ({}) とインデックスの長さ ({}) が一致しません",
                values.len(),
                index.len()
            )));
        }

        Ok(Self::from_parts(
            values.into_iter().map(Into::into).collect(),
            index,
            name,
        ))
    }

    pub(crate) fn from_parts(values: Vec<Scalar>, index: RangeIndex, name: Option<String>) -> Self {
        Series {
            values,
            index,
            name,
            root: CacheRoot::new_rc(),
            cacher: None,
            is_copy: None,
        }
    }

    /// Seriesの長さを取得
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Seriesが空かどうか
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 位置から値を取得
    pub fn get(&self, pos: usize) -> Option<&Scalar> {
        self.values.get(pos)
    }

    /// ラベルから値を取得
    pub fn get_by_label(&self, label: usize) -> Option<&Scalar> {
        self.index.get_loc(&label).and_then(|pos| self.values.get(pos))
    }

    /// 値の配列を取得
    pub fn values(&self) -> &[Scalar] {
        &self.values
    }

    /// 名前を取得
    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// インデックスを取得
    pub fn index(&self) -> &RangeIndex {
        &self.index
    }

    /// 名前を設定
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// 位置を指定して値を書き換える
    ///
    /// 派生コピーへの書き込みは `chained_assignment` 設定に従って検査される。
    pub fn set(&mut self, pos: usize, value: impl Into<Scalar>) -> Result<()> {
        self.check_setitem_copy()?;
        let size = self.values.len();
        match self.values.get_mut(pos) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(PandRSError::IndexOutOfBounds { index: pos, size }),
        }
    }

    /// 先頭n件のコピー（親へのリンク付き）
    pub fn head(&self, n: usize) -> Result<Series> {
        let n = n.min(self.len());
        let positions: Vec<usize> = (0..n).collect();
        let mut out = Series::from_parts(
            self.values[..n].to_vec(),
            self.index.take(&positions)?,
            self.name.clone(),
        );
        out.is_copy = Some(Rc::downgrade(&self.root));
        Ok(out)
    }

    /// 指定インデックスに合わせて再整列（存在しないラベルはNA）
    pub fn reindex(&self, index: &RangeIndex) -> Series {
        if self.index.equals(index) {
            return Series::from_parts(self.values.clone(), index.clone(), self.name.clone());
        }
        let indexer = self.index.get_indexer(index);
        Series::from_parts(
            take_or_null(&self.values, &indexer),
            index.clone(),
            self.name.clone(),
        )
    }

    /// 所有権を受け取って再整列（ラベルが同一ならデータをコピーしない）
    pub fn into_reindexed(mut self, index: &RangeIndex) -> Series {
        if self.index.equals(index) {
            self.index = index.clone();
            return self;
        }
        self.reindex(index)
    }

    /// `other` と同じラベルに再整列
    pub fn reindex_like(&self, other: &Series) -> Series {
        self.reindex(&other.index)
    }

    pub(crate) fn into_values(self) -> Vec<Scalar> {
        self.values
    }

    /// 値とインデックスが同一かどうか（NA同士は等しいとみなす）
    pub fn equals(&self, other: &Series) -> bool {
        self.index.equals(&other.index)
            && self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(other.values.iter())
                .all(|(a, b)| a.same_as(b))
    }

    /// DataFrameの列ビューとして有効かどうか
    pub fn is_cached(&self) -> bool {
        self.cacher.as_ref().map(Cacher::is_live).unwrap_or(false)
    }

    /// 派生元のコンテナがまだ生きている派生コピーかどうか
    pub fn is_copy(&self) -> bool {
        is_copy_live(&self.is_copy)
    }

    pub(crate) fn set_cacher(&mut self, cacher: Cacher) {
        self.cacher = Some(cacher);
    }

    /// 派生コピーへの書き込み検査
    pub(crate) fn check_setitem_copy(&self) -> Result<()> {
        check_setitem_copy(&self.is_copy, "Series")
    }
}

// コピーは独立した同一性を持ち、親へのリンクを引き継がない
impl Clone for Series {
    fn clone(&self) -> Self {
        Series::from_parts(self.values.clone(), self.index.clone(), self.name.clone())
    }
}
