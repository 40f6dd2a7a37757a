//! dxfsplit 文件处理
//!
//! 支持：
//! - 上传内容经临时文件加载为 `.dxf` 文档
//! - 按图层名拆分模型空间实体
//! - `.dxf` 导出

pub mod dxf_io;
pub mod error;
pub mod layer_set;
pub mod loader;
pub mod partition;

pub use dxf_io::{layer_statistics, save, LayerUsage};
pub use error::{ErrorKind, SplitError};
pub use layer_set::LayerSet;
pub use loader::DrawingLoader;
pub use partition::{isolate, model_space_layers, partition, partition_by, Partition};

/// 加载上传内容并移出 `layers` 上的实体
pub fn load_and_partition(bytes: &[u8], layers: &LayerSet) -> Result<Partition, SplitError> {
    let drawing = DrawingLoader::new().load_bytes(bytes)?;
    Ok(partition(drawing, layers))
}
