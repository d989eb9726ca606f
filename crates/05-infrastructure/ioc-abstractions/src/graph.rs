//! 依赖关系图
//!
//! 仅用于诊断。字段注入允许循环依赖，这里只负责把它们找出来。

use ioc_common::{ComponentDescriptor, TypeKey};
use std::collections::{HashMap, HashSet};

/// 依赖关系图节点
#[derive(Debug, Clone)]
pub struct DependencyGraphNode {
    /// 组件类型键
    pub type_key: TypeKey,
    /// 组件名称
    pub name: String,
    /// 依赖的类型键列表，按字段声明顺序
    pub dependencies: Vec<TypeKey>,
}

/// 依赖关系图
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// 节点，按加入顺序
    nodes: Vec<DependencyGraphNode>,
    /// 类型键到节点下标
    index: HashMap<TypeKey, usize>,
}

impl DependencyGraph {
    /// 创建空的依赖关系图
    pub fn new() -> Self {
        Self::default()
    }

    /// 从描述符构建依赖关系图
    pub fn from_descriptors<'a, I>(descriptors: I) -> Self
    where
        I: IntoIterator<Item = &'a ComponentDescriptor>,
    {
        let mut graph = Self::new();
        for descriptor in descriptors {
            graph.add_component(descriptor);
        }
        graph
    }

    /// 添加组件节点
    pub fn add_component(&mut self, descriptor: &ComponentDescriptor) {
        let node = DependencyGraphNode {
            type_key: descriptor.type_key(),
            name: descriptor.name().to_string(),
            dependencies: descriptor
                .dependency_slots()
                .iter()
                .map(|slot| slot.required())
                .collect(),
        };
        self.index.insert(node.type_key, self.nodes.len());
        self.nodes.push(node);
    }

    /// 所有节点
    pub fn nodes(&self) -> &[DependencyGraphNode] {
        &self.nodes
    }

    /// 获取组件的直接依赖
    pub fn dependencies_of(&self, key: &TypeKey) -> Vec<TypeKey> {
        self.index
            .get(key)
            .map(|&idx| self.nodes[idx].dependencies.clone())
            .unwrap_or_default()
    }

    /// 获取直接依赖指定组件的组件
    pub fn dependents_of(&self, key: &TypeKey) -> Vec<TypeKey> {
        self.nodes
            .iter()
            .filter(|node| node.dependencies.contains(key))
            .map(|node| node.type_key)
            .collect()
    }

    /// 找出所有依赖环
    ///
    /// 每个环以首次进入的节点开头，自依赖表示为只含一个节点的环。
    pub fn cycles(&self) -> Vec<Vec<TypeKey>> {
        let mut visited = HashSet::new();
        let mut rec_stack = HashSet::new();
        let mut path = Vec::new();
        let mut cycles = Vec::new();

        for node in &self.nodes {
            if !visited.contains(&node.type_key) {
                self.dfs_detect_cycle(
                    node.type_key,
                    &mut visited,
                    &mut rec_stack,
                    &mut path,
                    &mut cycles,
                );
            }
        }

        cycles
    }

    /// 深度优先搜索检测循环
    fn dfs_detect_cycle(
        &self,
        current: TypeKey,
        visited: &mut HashSet<TypeKey>,
        rec_stack: &mut HashSet<TypeKey>,
        path: &mut Vec<TypeKey>,
        cycles: &mut Vec<Vec<TypeKey>>,
    ) {
        visited.insert(current);
        rec_stack.insert(current);
        path.push(current);

        for dep in self.dependencies_of(&current) {
            if rec_stack.contains(&dep) {
                if let Some(cycle_start) = path.iter().position(|k| *k == dep) {
                    cycles.push(path[cycle_start..].to_vec());
                }
            } else if !visited.contains(&dep) && self.index.contains_key(&dep) {
                self.dfs_detect_cycle(dep, visited, rec_stack, path, cycles);
            }
        }

        path.pop();
        rec_stack.remove(&current);
    }

    /// 以组件名称描述依赖环，例如 `ServiceA -> ServiceB -> ServiceA`
    pub fn describe_cycle(&self, cycle: &[TypeKey]) -> String {
        let name_of = |key: &TypeKey| {
            self.index
                .get(key)
                .map_or_else(|| key.short_name().to_string(), |&idx| self.nodes[idx].name.clone())
        };

        let mut names: Vec<String> = cycle.iter().map(name_of).collect();
        if let Some(first) = cycle.first() {
            names.push(name_of(first));
        }
        names.join(" -> ")
    }
}
