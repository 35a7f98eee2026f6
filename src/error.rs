use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// 合并表中的一条记录无法解析或引用了不可产生的符号
    #[error("malformed merge list at line {line}: {reason}")]
    MalformedMergeList { line: usize, reason: String },

    /// 基于查表的分词器遇到未登记的词
    #[error("word {0:?} was not seen during training")]
    UnseenWord(String),

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
