//! DXF文件导出与统计

use crate::error::SplitError;
use dxf::Drawing;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// 保存到DXF文件，已存在的文件会被覆盖
pub fn save(drawing: &Drawing, path: &Path) -> Result<(), SplitError> {
    drawing
        .save_file(path)
        .map_err(|e| SplitError::Persistence {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    tracing::info!(
        "Saved {} entities to {}",
        drawing.entities().count(),
        path.display()
    );

    Ok(())
}

/// 模型空间中某个图层的实体数量
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerUsage {
    pub layer: String,
    pub entities: usize,
}

/// 统计模型空间各图层的实体数量（按图层名排序）
pub fn layer_statistics(drawing: &Drawing) -> Vec<LayerUsage> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for entity in drawing.entities() {
        if entity.common.is_in_paper_space {
            continue;
        }
        *counts.entry(entity.common.layer.as_str()).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(layer, entities)| LayerUsage {
            layer: layer.to_string(),
            entities,
        })
        .collect()
}
