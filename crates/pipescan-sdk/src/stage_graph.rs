//! Stage dependency graph
//!
//! The extractor reports only what a document states. `StageGraph` applies
//! the consumer-side policy on top: implicit sequential dependencies,
//! handling of references to unknown stages, and cycle rejection.

use crate::config::{DanglingPolicy, OutlineConfig};
use crate::error::{Result, SdkError};
use pipescan_core::StageNode;
use std::collections::{HashMap, HashSet};

/// A stage with its dependencies resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStage {
    pub name: String,
    pub depends_on: Vec<String>,
    /// True when `depends_on` came from the implicit default
    pub implicit: bool,
}

/// Resolved stage graph, in document order
#[derive(Debug, Clone, Default)]
pub struct StageGraph {
    stages: Vec<ResolvedStage>,
    index: HashMap<String, usize>,
}

impl StageGraph {
    /// Resolve extracted stages into a graph
    pub fn resolve(stages: &[StageNode], config: &OutlineConfig) -> Result<Self> {
        let mut graph = StageGraph::default();

        for node in stages {
            if graph.index.contains_key(&node.name) {
                tracing::warn!(stage = %node.name, "Ignoring duplicate stage");
                continue;
            }

            let (depends_on, implicit) = if node.depends_on.is_some() {
                let mut seen = HashSet::new();
                let unique: Vec<String> = node
                    .dependencies()
                    .iter()
                    .filter(|d| seen.insert(d.as_str()))
                    .cloned()
                    .collect();
                (unique, false)
            } else if config.implicit_stage_dependencies {
                let previous = graph.stages.last().map(|s| s.name.clone());
                (previous.into_iter().collect(), true)
            } else {
                (Vec::new(), false)
            };

            graph.index.insert(node.name.clone(), graph.stages.len());
            graph.stages.push(ResolvedStage {
                name: node.name.clone(),
                depends_on,
                implicit,
            });
        }

        graph.apply_dangling_policy(config.dangling_dependencies)?;
        graph.check_circular_dependencies()?;

        Ok(graph)
    }

    fn apply_dangling_policy(&mut self, policy: DanglingPolicy) -> Result<()> {
        let known: HashSet<String> = self.index.keys().cloned().collect();

        for stage in &mut self.stages {
            let dangling: Vec<String> = stage
                .depends_on
                .iter()
                .filter(|d| !known.contains(d.as_str()))
                .cloned()
                .collect();

            for dependency in dangling {
                match policy {
                    DanglingPolicy::Warn => {
                        tracing::warn!(
                            stage = %stage.name,
                            dependency = %dependency,
                            "Stage depends on unknown stage"
                        );
                    }
                    DanglingPolicy::Drop => {
                        tracing::debug!(
                            stage = %stage.name,
                            dependency = %dependency,
                            "Dropping dependency on unknown stage"
                        );
                        stage.depends_on.retain(|d| *d != dependency);
                    }
                    DanglingPolicy::Error => {
                        return Err(SdkError::UnknownStage {
                            stage: stage.name.clone(),
                            dependency,
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Reject dependency loops, reporting the loop as `A -> B -> A`
    fn check_circular_dependencies(&self) -> Result<()> {
        fn visit<'a>(
            node: &'a str,
            graph: &'a StageGraph,
            visited: &mut HashSet<&'a str>,
            path: &mut Vec<&'a str>,
        ) -> std::result::Result<(), String> {
            if path.contains(&node) {
                path.push(node);
                let cycle_start = path.iter().position(|&n| n == node).unwrap_or(0);
                return Err(path[cycle_start..].join(" -> "));
            }

            if visited.contains(node) {
                return Ok(());
            }

            path.push(node);

            if let Some(dependencies) = graph.dependencies(node) {
                for dep in dependencies {
                    // Dangling references have no outgoing edges
                    if graph.index.contains_key(dep) {
                        visit(dep, graph, visited, path)?;
                    }
                }
            }

            path.pop();
            visited.insert(node);

            Ok(())
        }

        let mut visited = HashSet::new();
        let mut path = Vec::new();

        for stage in &self.stages {
            if visited.contains(stage.name.as_str()) {
                continue;
            }
            if let Err(cycle) = visit(&stage.name, self, &mut visited, &mut path) {
                return Err(SdkError::CircularDependency { path: cycle });
            }
        }

        Ok(())
    }

    pub fn stages(&self) -> &[ResolvedStage] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage(&self, name: &str) -> Option<&ResolvedStage> {
        self.index.get(name).map(|&idx| &self.stages[idx])
    }

    /// Resolved dependencies of a stage, `None` for an unknown stage
    pub fn dependencies(&self, name: &str) -> Option<&[String]> {
        self.stage(name).map(|s| s.depends_on.as_slice())
    }

    /// Stages that depend directly on `name`, in document order
    pub fn dependents(&self, name: &str) -> Vec<&str> {
        self.stages
            .iter()
            .filter(|s| s.depends_on.iter().any(|d| d == name))
            .map(|s| s.name.as_str())
            .collect()
    }

    /// Stages with no dependency on a known stage
    pub fn roots(&self) -> Vec<&str> {
        self.stages
            .iter()
            .filter(|s| !s.depends_on.iter().any(|d| self.index.contains_key(d)))
            .map(|s| s.name.as_str())
            .collect()
    }

    /// Stages in topological order
    ///
    /// Each pass emits every stage whose dependencies are already emitted,
    /// in document order.
    pub fn stages_in_order(&self) -> Vec<&ResolvedStage> {
        let mut result = Vec::with_capacity(self.stages.len());
        let mut completed: HashSet<&str> = HashSet::new();

        while result.len() < self.stages.len() {
            let before = result.len();

            for stage in &self.stages {
                if completed.contains(stage.name.as_str()) {
                    continue;
                }

                let deps_met = stage
                    .depends_on
                    .iter()
                    .all(|d| completed.contains(d.as_str()) || !self.index.contains_key(d));

                if deps_met {
                    result.push(stage);
                    completed.insert(&stage.name);
                }
            }

            // Resolution rejects cycles, so every pass makes progress
            if result.len() == before {
                break;
            }
        }

        result
    }
}
