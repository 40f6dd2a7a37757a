//! 按图层拆分模型空间实体
//!
//! 先对实体集合做快照，再按快照顺序逐个判断并从文档中删除，
//! 这样删除过程不会跳过或重复访问实体。图纸空间实体不参与拆分。

use crate::layer_set::LayerSet;
use dxf::entities::Entity;
use dxf::Drawing;

/// 拆分结果：修改后的文档和被移出的实体（保持原有顺序）
#[derive(Debug)]
pub struct Partition {
    pub document: Drawing,
    pub removed: Vec<Entity>,
}

impl Partition {
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }
}

/// 移出图层名属于 `layers` 的模型空间实体
pub fn partition(document: Drawing, layers: &LayerSet) -> Partition {
    if layers.is_empty() {
        tracing::debug!("Empty layer set, no entity will be removed");
    }
    let result = partition_by(document, |layer| layers.contains(layer));
    tracing::info!(
        "Removed {} entities on {} layers",
        result.removed.len(),
        layers.len()
    );
    result
}

/// 只保留图层名属于 `layers` 的模型空间实体，其余移出
pub fn isolate(document: Drawing, layers: &LayerSet) -> Partition {
    let result = partition_by(document, |layer| !layers.contains(layer));
    tracing::info!(
        "Isolated {} layers, stripped {} entities",
        layers.len(),
        result.removed.len()
    );
    result
}

/// 单次遍历：`remove(layer)` 为真的模型空间实体被移出文档
pub fn partition_by<F>(mut document: Drawing, mut remove: F) -> Partition
where
    F: FnMut(&str) -> bool,
{
    // 快照只记录判断所需的字段，实体本身从文档中移出
    let keys: Vec<(bool, String)> = document
        .entities()
        .map(|entity| (entity.common.is_in_paper_space, entity.common.layer.clone()))
        .collect();
    let mut removed = Vec::new();

    for (index, (in_paper_space, layer)) in keys.iter().enumerate() {
        if *in_paper_space || !remove(layer) {
            continue;
        }

        // 之前每移出一个实体，后面的实体在文档中的下标就前移一位
        if let Some(entity) = document.remove_entity(index - removed.len()) {
            removed.push(entity);
        }
    }

    Partition { document, removed }
}

/// 模型空间实体的图层名列表（按文档顺序）
pub fn model_space_layers(document: &Drawing) -> Vec<String> {
    document
        .entities()
        .filter(|entity| !entity.common.is_in_paper_space)
        .map(|entity| entity.common.layer.clone())
        .collect()
}
