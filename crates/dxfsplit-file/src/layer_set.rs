//! 图层名集合
//!
//! 拆分时的过滤条件：实体的图层名是否属于该集合。

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 一组图层名（区分大小写，按字典序存储）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerSet {
    names: BTreeSet<String>,
}

impl LayerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn contains(&self, layer: &str) -> bool {
        self.names.contains(layer)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for LayerSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership() {
        let layers: LayerSet = ["Roof_Kapelle", "0"].into_iter().collect();

        assert!(layers.contains("Roof_Kapelle"));
        assert!(layers.contains("0"));
        // 图层名区分大小写
        assert!(!layers.contains("roof_kapelle"));
        assert_eq!(layers.len(), 2);
    }

    #[test]
    fn test_duplicates_collapse() {
        let mut layers = LayerSet::new();
        assert!(layers.is_empty());
        assert!(layers.insert("A"));
        assert!(!layers.insert("A"));
        assert_eq!(layers.len(), 1);
        assert!(!layers.is_empty());
    }

    #[test]
    fn test_serde_as_plain_list() {
        let layers: LayerSet = serde_json::from_str(r#"["B", "A", "B"]"#).unwrap();
        assert_eq!(layers.iter().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(serde_json::to_string(&layers).unwrap(), r#"["A","B"]"#);
    }
}
