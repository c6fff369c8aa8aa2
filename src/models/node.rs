//! 图节点与编辑器命令模型
//!
//! 节点和命令都通过 `semantic_ops` 列表引用语义操作，
//! 是 UI 层与操作目录之间的衔接点。

use serde::{Deserialize, Serialize};

use super::entity::EntityCore;

/// 端口方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortDirection {
    /// 输入端口
    #[serde(rename = "input")]
    Input,

    /// 输出端口
    #[serde(rename = "output")]
    Output,
}

/// 节点端口 schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortSchema {
    /// 端口名
    pub name: String,

    /// 引用的数据类型 id
    #[serde(rename = "type")]
    pub type_id: String,

    /// 端口方向
    pub direction: PortDirection,
}

impl PortSchema {
    /// 创建输入端口
    pub fn input(name: &str, type_id: &str) -> Self {
        Self {
            name: name.to_string(),
            type_id: type_id.to_string(),
            direction: PortDirection::Input,
        }
    }

    /// 创建输出端口
    pub fn output(name: &str, type_id: &str) -> Self {
        Self {
            name: name.to_string(),
            type_id: type_id.to_string(),
            direction: PortDirection::Output,
        }
    }
}

/// 图节点实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    /// 公共字段
    #[serde(flatten)]
    pub core: EntityCore,

    /// 节点分类
    pub category: String,

    /// 引用的语义操作 id 列表
    #[serde(default)]
    pub semantic_ops: Vec<String>,

    /// 端口 schema
    #[serde(default)]
    pub ports: Vec<PortSchema>,

    /// 节点参数 schema（非端口的静态配置）
    #[serde(default)]
    pub params: Vec<super::operation::ArgSchema>,
}

impl NodeSpec {
    /// 创建节点
    pub fn new(id: &str, name: &str, category: &str) -> Self {
        Self {
            core: EntityCore::new(id, name),
            category: category.to_string(),
            semantic_ops: Vec::new(),
            ports: Vec::new(),
            params: Vec::new(),
        }
    }

    /// 附加语义操作引用
    pub fn with_ops(mut self, ops: &[&str]) -> Self {
        self.semantic_ops = ops.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// 编辑器命令实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandSpec {
    /// 公共字段
    #[serde(flatten)]
    pub core: EntityCore,

    /// 命令分类
    pub category: String,

    /// 引用的语义操作 id 列表
    #[serde(default)]
    pub semantic_ops: Vec<String>,

    /// 快捷键
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<String>,

    /// 是否为模态命令
    #[serde(default)]
    pub modal: bool,

    /// 安全提示
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_note: Option<String>,
}

impl CommandSpec {
    /// 创建命令
    pub fn new(id: &str, name: &str, category: &str) -> Self {
        Self {
            core: EntityCore::new(id, name),
            category: category.to_string(),
            semantic_ops: Vec::new(),
            shortcut: None,
            modal: false,
            safety_note: None,
        }
    }

    /// 附加语义操作引用
    pub fn with_ops(mut self, ops: &[&str]) -> Self {
        self.semantic_ops = ops.iter().map(|s| s.to_string()).collect();
        self
    }

    /// 指定快捷键
    pub fn with_shortcut(mut self, shortcut: &str) -> Self {
        self.shortcut = Some(shortcut.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_with_ports() {
        let mut node = NodeSpec::new("node.extrude", "Extrude", "geometry")
            .with_ops(&["geom.extrude"]);
        node.ports.push(PortSchema::input("profile", "core.curve"));
        node.ports.push(PortSchema::output("solid", "core.brep"));

        assert_eq!(node.semantic_ops, vec!["geom.extrude"]);
        assert_eq!(node.ports.len(), 2);
        assert_eq!(node.ports[0].direction, PortDirection::Input);
    }

    #[test]
    fn test_command_shortcut() {
        let cmd = CommandSpec::new("cmd.delete", "Delete Selection", "edit")
            .with_ops(&["workflow.delete"])
            .with_shortcut("Del");

        assert_eq!(cmd.shortcut.as_deref(), Some("Del"));
        assert!(!cmd.modal);
    }
}
