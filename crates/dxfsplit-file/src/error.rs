//! 文件操作错误定义

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("No DXF file was provided")]
    MissingInput,

    #[error("The DXF input is empty")]
    EmptyInput,

    #[error("Failed to read input {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to stage the upload in a temporary file: {0}")]
    TempFile(#[source] std::io::Error),

    #[error("Failed to parse DXF drawing: {0}")]
    Parse(String),

    #[error("Failed to save DXF drawing to {path}: {message}")]
    Persistence { path: PathBuf, message: String },
}

/// 面向用户的错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 未提供文件、内容为空或无法暂存
    Input,
    /// 内容不是有效的DXF
    Parse,
    /// 输出文件无法写入
    Persistence,
}

impl SplitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SplitError::MissingInput
            | SplitError::EmptyInput
            | SplitError::Read { .. }
            | SplitError::TempFile(_) => ErrorKind::Input,
            SplitError::Parse(_) => ErrorKind::Parse,
            SplitError::Persistence { .. } => ErrorKind::Persistence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(SplitError::MissingInput.kind(), ErrorKind::Input);
        assert_eq!(SplitError::EmptyInput.kind(), ErrorKind::Input);
        assert_eq!(SplitError::Parse("bad".into()).kind(), ErrorKind::Parse);

        let err = SplitError::Persistence {
            path: PathBuf::from("out.dxf"),
            message: "disk full".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Persistence);
        assert!(err.to_string().contains("out.dxf"));
    }
}
