//! DXF加载
//!
//! 上传的内容先写入一个 `.dxf` 临时文件，再交给 `dxf` 库解析。
//! 临时文件由 [`NamedTempFile`] 持有，无论解析成功与否，返回前都会被删除。

use crate::error::SplitError;
use dxf::Drawing;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// 临时文件名前缀
const TEMP_PREFIX: &str = "dxfsplit-";

/// 临时文件后缀
const TEMP_SUFFIX: &str = ".dxf";

/// 将字节流加载为DXF文档
#[derive(Debug, Clone, Default)]
pub struct DrawingLoader {
    /// 临时文件目录，`None` 时使用系统临时目录
    temp_dir: Option<PathBuf>,
}

impl DrawingLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// 在指定目录中暂存临时文件
    pub fn with_temp_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: Some(dir.into()),
        }
    }

    /// 从内存中的文件内容加载
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<Drawing, SplitError> {
        if bytes.is_empty() {
            return Err(SplitError::EmptyInput);
        }
        self.load_reader(bytes)
    }

    /// 加载一个可能缺失的上传流
    pub fn load_upload<R: Read>(&self, upload: Option<R>) -> Result<Drawing, SplitError> {
        match upload {
            Some(reader) => self.load_reader(reader),
            None => Err(SplitError::MissingInput),
        }
    }

    /// 从磁盘文件加载（同样经过临时文件）
    pub fn load_path(&self, path: &Path) -> Result<Drawing, SplitError> {
        let bytes = fs::read(path).map_err(|source| SplitError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_bytes(&bytes)
    }

    /// 从任意读取器加载
    pub fn load_reader<R: Read>(&self, mut reader: R) -> Result<Drawing, SplitError> {
        let staged = self.stage(&mut reader)?;
        let staged_path = staged.path().to_path_buf();

        let result =
            Drawing::load_file(&staged_path).map_err(|e| SplitError::Parse(e.to_string()));

        // 解析结果已经拿到，临时文件在任何情况下都要删除
        if let Err(e) = staged.close() {
            tracing::warn!(
                "Failed to remove transient file {}: {}",
                staged_path.display(),
                e
            );
        } else {
            tracing::debug!("Removed transient file {}", staged_path.display());
        }

        let drawing = result?;
        tracing::info!("Loaded DXF drawing with {} entities", drawing.entities().count());
        Ok(drawing)
    }

    /// 把读取器内容写入新的临时文件
    fn stage<R: Read>(&self, reader: &mut R) -> Result<NamedTempFile, SplitError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_PREFIX).suffix(TEMP_SUFFIX);

        let mut staged = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(SplitError::TempFile)?;

        // 出错时 staged 被 drop，临时文件随之删除
        let written = io::copy(reader, staged.as_file_mut()).map_err(SplitError::TempFile)?;
        if written == 0 {
            return Err(SplitError::EmptyInput);
        }
        staged.as_file_mut().flush().map_err(SplitError::TempFile)?;

        tracing::debug!(
            "Staged {} bytes in transient file {}",
            written,
            staged.path().display()
        );

        Ok(staged)
    }
}
