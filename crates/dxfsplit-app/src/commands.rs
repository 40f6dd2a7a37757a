//! 命令实现：split / strip / layers

use std::fs;
use std::path::{Path, PathBuf};

use dxfsplit_file::{
    isolate, layer_statistics, load_and_partition, model_space_layers, save, DrawingLoader,
    LayerSet, LayerUsage, SplitError,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::OutputProfile;

/// 单个输出的处理结果
#[derive(Debug, Clone, Serialize)]
pub struct OutputReport {
    pub name: String,
    /// 未找到实体时为 `None`，表示没有写文件
    pub file: Option<PathBuf>,
    pub entities: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    pub input: PathBuf,
    pub outputs: Vec<OutputReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StripReport {
    pub output: PathBuf,
    pub removed: usize,
    pub remaining: usize,
}

fn read_input(input: &Path) -> Result<Vec<u8>, SplitError> {
    fs::read(input).map_err(|source| SplitError::Read {
        path: input.to_path_buf(),
        source,
    })
}

/// 每个输出都从同一份输入重新加载，只保留该输出的图层后保存。
/// 没有匹配实体的输出不写文件。
pub fn split(
    input: &Path,
    outputs: &[OutputProfile],
    output_dir: &Path,
) -> Result<SplitReport, SplitError> {
    let bytes = read_input(input)?;
    let loader = DrawingLoader::new();
    let mut reports = Vec::with_capacity(outputs.len());

    for profile in outputs {
        let drawing = loader.load_bytes(&bytes)?;
        let isolated = isolate(drawing, &profile.layers);
        let entities = model_space_layers(&isolated.document).len();

        if entities == 0 {
            warn!("No entities found for output `{}`", profile.name);
            reports.push(OutputReport {
                name: profile.name.clone(),
                file: None,
                entities,
            });
            continue;
        }

        let path = output_dir.join(&profile.file);
        save(&isolated.document, &path)?;
        info!("Output `{}`: {} entities", profile.name, entities);

        reports.push(OutputReport {
            name: profile.name.clone(),
            file: Some(path),
            entities,
        });
    }

    Ok(SplitReport {
        input: input.to_path_buf(),
        outputs: reports,
    })
}

/// 移出 `layers` 上的实体，把剩余部分写到 `output`
pub fn strip(input: &Path, layers: &LayerSet, output: &Path) -> Result<StripReport, SplitError> {
    let bytes = read_input(input)?;
    let result = load_and_partition(&bytes, layers)?;
    save(&result.document, output)?;

    Ok(StripReport {
        output: output.to_path_buf(),
        removed: result.removed_count(),
        remaining: model_space_layers(&result.document).len(),
    })
}

/// 列出模型空间图层及实体数量
pub fn layers(input: &Path) -> Result<Vec<LayerUsage>, SplitError> {
    let bytes = read_input(input)?;
    let drawing = DrawingLoader::new().load_bytes(&bytes)?;
    Ok(layer_statistics(&drawing))
}
