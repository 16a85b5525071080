mod ops;

use std::rc::{Rc, Weak};

use crate::core::cache::{check_setitem_copy, is_copy_live, CacheRoot, Cacher};
use crate::error::{PandRSError, Result};
use crate::index::{RangeIndex, StringIndex};
use crate::ops::array_ops::take_or_null;
use crate::scalar::Scalar;
use crate::series::Series;

/// DataFrame構造体: 列指向の二次元ラベル付きデータ
#[derive(Debug)]
pub struct DataFrame {
    /// 列ラベル
    columns: StringIndex,

    /// 列ごとのデータ（`columns` と同じ順序）
    data: Vec<Vec<Scalar>>,

    /// 行インデックス
    index: RangeIndex,

    /// 同一性トークン兼アイテムキャッシュ（貸し出し中の列ビュー）
    root: Rc<CacheRoot>,

    /// `head` などで派生したコピーの場合の親へのリンク
    is_copy: Option<Weak<CacheRoot>>,
}

impl DataFrame {
    /// 新しい空のDataFrameを作成
    pub fn new() -> Self {
        DataFrame {
            columns: StringIndex::empty(),
            data: Vec::new(),
            index: RangeIndex::empty(),
            root: CacheRoot::new_rc(),
            is_copy: None,
        }
    }

    pub(crate) fn from_parts(columns: StringIndex, data: Vec<Vec<Scalar>>, index: RangeIndex) -> Self {
        DataFrame {
            columns,
            data,
            index,
            root: CacheRoot::new_rc(),
            is_copy: None,
        }
    }

    /// 列を追加
    ///
    /// 最初の列が行インデックスを決める。以降の列は行数が一致している
    /// 必要があり、行ラベルに合わせて再整列される。
    pub fn add_column(&mut self, name: String, series: Series) -> Result<()> {
        if self.contains_column(&name) {
            return Err(PandRSError::DuplicateColumnName(name));
        }

        let values = if self.columns.is_empty() {
            self.index = series.index().clone();
            series.values().to_vec()
        } else {
            if series.len() != self.row_count() {
                return Err(PandRSError::InconsistentRowCount {
                    expected: self.row_count(),
                    found: series.len(),
                });
            }
            series.into_reindexed(&self.index).into_values()
        };

        let mut names = self.columns.values().to_vec();
        names.push(name);
        self.columns = StringIndex::new(names)?;
        self.data.push(values);
        Ok(())
    }

    /// (行数, 列数)
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    /// 行数を取得
    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    /// 列数を取得
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// 列名の一覧を取得
    pub fn column_names(&self) -> &[String] {
        self.columns.values()
    }

    /// 列が存在するかどうか
    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.get_loc(&name.to_string()).is_some()
    }

    /// 行インデックスを取得
    pub fn index(&self) -> &RangeIndex {
        &self.index
    }

    /// 列ラベルを取得
    pub fn columns(&self) -> &StringIndex {
        &self.columns
    }

    fn column_position(&self, name: &str) -> Result<usize> {
        self.columns
            .get_loc(&name.to_string())
            .ok_or_else(|| PandRSError::ColumnNotFound(name.to_string()))
    }

    /// 列の値を参照
    pub fn column_values(&self, name: &str) -> Result<&[Scalar]> {
        let pos = self.column_position(name)?;
        Ok(&self.data[pos])
    }

    /// 行位置と列名からセルの値を取得
    pub fn value(&self, row: usize, column: &str) -> Result<Scalar> {
        let values = self.column_values(column)?;
        values
            .get(row)
            .copied()
            .ok_or(PandRSError::IndexOutOfBounds {
                index: row,
                size: values.len(),
            })
    }

    /// 列をSeriesとして取得
    ///
    /// 返されるSeriesはこのDataFrameのアイテムキャッシュに登録された列ビュー
    /// で、in-place演算を受けるとキャッシュから外れる。
    pub fn column(&self, name: &str) -> Result<Series> {
        let pos = self.column_position(name)?;
        let mut series = Series::from_parts(
            self.data[pos].clone(),
            self.index.clone(),
            Some(name.to_string()),
        );
        series.set_cacher(Cacher::attach(name, &self.root));
        Ok(series)
    }

    /// 現在貸し出されている列ビューのキー
    pub fn cached_columns(&self) -> Vec<String> {
        self.root.keys()
    }

    /// アイテムキャッシュを空にする
    pub fn clear_item_cache(&self) {
        self.root.clear();
    }

    /// 列を設定（存在しなければ追加）
    ///
    /// Seriesは行インデックスに合わせて再整列される。派生コピーへの書き込みは
    /// `chained_assignment` 設定に従って検査される。
    pub fn set_column(&mut self, name: &str, series: &Series) -> Result<()> {
        check_setitem_copy(&self.is_copy, "DataFrame")?;

        if self.columns.is_empty() && self.index.is_empty() {
            return self.add_column(name.to_string(), series.clone());
        }

        let values = series.reindex(&self.index).into_values();
        match self.columns.get_loc(&name.to_string()) {
            Some(pos) => {
                self.data[pos] = values;
                self.root.invalidate(name);
            }
            None => {
                let mut names = self.columns.values().to_vec();
                names.push(name.to_string());
                self.columns = StringIndex::new(names)?;
                self.data.push(values);
            }
        }
        Ok(())
    }

    /// 先頭n行のコピー（親へのリンク付き）
    pub fn head(&self, n: usize) -> Result<DataFrame> {
        let n = n.min(self.row_count());
        let positions: Vec<usize> = (0..n).collect();
        let data = self.data.iter().map(|col| col[..n].to_vec()).collect();
        let mut out = DataFrame::from_parts(self.columns.clone(), data, self.index.take(&positions)?);
        out.is_copy = Some(Rc::downgrade(&self.root));
        Ok(out)
    }

    /// 行と列を指定ラベルに合わせて再整列（存在しないラベルはNA）
    pub fn reindex(&self, index: &RangeIndex, columns: &StringIndex) -> DataFrame {
        let rows_equal = self.index.equals(index);
        let indexer = self.index.get_indexer(index);
        let data = columns
            .values()
            .iter()
            .map(|name| match self.columns.get_loc(name) {
                Some(pos) if rows_equal => self.data[pos].clone(),
                Some(pos) => take_or_null(&self.data[pos], &indexer),
                None => vec![Scalar::Null; index.len()],
            })
            .collect();
        DataFrame::from_parts(columns.clone(), data, index.clone())
    }

    /// `other` と同じ行・列ラベルに再整列
    pub fn reindex_like(&self, other: &DataFrame) -> DataFrame {
        self.reindex(&other.index, &other.columns)
    }

    /// 所有権を受け取って再整列（ラベルが同一ならデータをコピーしない）
    pub(crate) fn into_reindexed(self, index: &RangeIndex, columns: &StringIndex) -> DataFrame {
        if self.index.equals(index) && self.columns.equals(columns) {
            return self;
        }
        self.reindex(index, columns)
    }

    /// ラベルと値が同一かどうか（NA同士は等しいとみなす）
    pub fn equals(&self, other: &DataFrame) -> bool {
        self.index.equals(&other.index)
            && self.columns.equals(&other.columns)
            && self.data.iter().zip(other.data.iter()).all(|(a, b)| {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.same_as(y))
            })
    }

    /// 派生元のコンテナがまだ生きている派生コピーかどうか
    pub fn is_copy(&self) -> bool {
        is_copy_live(&self.is_copy)
    }

    pub(crate) fn data(&self) -> &[Vec<Scalar>] {
        &self.data
    }
}

impl Default for DataFrame {
    fn default() -> Self {
        Self::new()
    }
}

// コピーは独立した同一性を持ち、アイテムキャッシュを引き継がない
impl Clone for DataFrame {
    fn clone(&self) -> Self {
        DataFrame::from_parts(self.columns.clone(), self.data.clone(), self.index.clone())
    }
}
