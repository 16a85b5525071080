use thiserror::Error;

/// エラー型の定義
///
/// 構築時の設定エラー（Configuration fault）、演算時の計算エラー、
/// 再整列エラーをひとつの列挙型で表現する。
#[derive(Error, Debug)]
pub enum Error {
    // --- 設定エラー: 演算テーブルの構築を中断する ---
    #[error("認識できないコンテナ型です: {0}")]
    UnrecognizedContainer(&'static str),

    #[error("オプトアウトされた演算がテーブルに含まれています: {0}")]
    OptOutViolation(String),

    #[error("エイリアス '{alias}' の対象 '{target}' がテーブルに存在しません")]
    MissingAliasTarget { alias: String, target: String },

    #[error("演算が見つかりません: {0}")]
    MissingMethod(String),

    #[error("演算名が重複しています: {0}")]
    DuplicateMethod(String),

    // --- 計算エラー: 呼び出し元へそのまま伝播する ---
    #[error("無効な操作です: {0}")]
    InvalidOperation(String),

    #[error("計算エラー: {0}")]
    ComputationError(String),

    #[error("長さが一致しません: 期待値 {expected}, 実際 {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("行数が一致しません: 期待値 {expected}, 実際 {found}")]
    InconsistentRowCount { expected: usize, found: usize },

    #[error("列が見つかりません: {0}")]
    ColumnNotFound(String),

    #[error("列名が重複しています: {0}")]
    DuplicateColumnName(String),

    #[error("インデックスが範囲外です: インデックス {index}, サイズ {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("インデックスエラー: {0}")]
    Index(String),

    #[error("データ一貫性エラー: {0}")]
    Consistency(String),

    // --- 再整列エラー ---
    #[error("再整列エラー: {0}")]
    Alignment(String),

    #[error("派生コピーへの書き込みです: {0}")]
    SettingWithCopy(String),

    #[error("設定エラー: {0}")]
    Config(String),
}

// PandRSErrorとの後方互換性を維持する
pub type PandRSError = Error;

/// Resultの型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// 構築時に発生する設定エラーかどうか
    pub fn is_configuration_fault(&self) -> bool {
        matches!(
            self,
            Error::UnrecognizedContainer(_)
                | Error::OptOutViolation(_)
                | Error::MissingAliasTarget { .. }
                | Error::MissingMethod(_)
                | Error::DuplicateMethod(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(format!("JSON: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(format!("YAML: {}", err))
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(format!("TOML: {}", err))
    }
}
