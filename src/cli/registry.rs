//! Read-only view of the command tree.
//!
//! The clap definitions in [`args`](super::args) are the single source of
//! registration. [`CommandRegistry`] walks them into a plain name → children
//! tree for resolution, listing and validation, without touching execution.

use clap::CommandFactory;

use crate::error::{Result, RoostError};

use super::args::Cli;

/// One registered command and its nested subcommands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandNode {
    pub name: String,
    pub about: Option<String>,
    pub aliases: Vec<String>,
    pub children: Vec<CommandNode>,
}

impl CommandNode {
    fn from_command(cmd: &clap::Command) -> Self {
        Self {
            name: cmd.get_name().to_string(),
            about: cmd.get_about().map(|about| about.to_string()),
            aliases: cmd.get_all_aliases().map(str::to_string).collect(),
            children: cmd.get_subcommands().map(Self::from_command).collect(),
        }
    }

    /// Whether `name` selects this node.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|a| a == name)
    }

    /// Direct child selected by `name` or one of its aliases.
    pub fn child(&self, name: &str) -> Option<&CommandNode> {
        self.children.iter().find(|c| c.answers_to(name))
    }

    /// Whether this node runs directly rather than grouping subcommands.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Ordered, immutable catalog of every command roost accepts.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    root: CommandNode,
}

impl CommandRegistry {
    /// Registry for roost's own CLI.
    pub fn build() -> Self {
        Self::from_command(&Cli::command())
    }

    /// Registry for an arbitrary clap command tree.
    pub fn from_command(cmd: &clap::Command) -> Self {
        Self {
            root: CommandNode::from_command(cmd),
        }
    }

    /// Top-level commands in registration order.
    pub fn top_level(&self) -> &[CommandNode] {
        &self.root.children
    }

    /// Resolve a subcommand path left to right, accepting aliases.
    pub fn resolve(&self, path: &[&str]) -> Option<&CommandNode> {
        let mut node = &self.root;
        for name in path {
            node = node.child(name)?;
        }
        Some(node)
    }

    /// Every runnable path, depth-first in registration order.
    pub fn paths(&self) -> Vec<Vec<String>> {
        let mut paths = Vec::new();
        for node in self.top_level() {
            collect_paths(node, &mut Vec::new(), &mut paths);
        }
        paths
    }

    /// Check that names and aliases are unique within each level.
    pub fn validate(&self) -> Result<()> {
        validate_level(&self.root)
    }
}

fn collect_paths(node: &CommandNode, prefix: &mut Vec<String>, out: &mut Vec<Vec<String>>) {
    prefix.push(node.name.clone());
    if node.is_leaf() {
        out.push(prefix.clone());
    }
    for child in &node.children {
        collect_paths(child, prefix, out);
    }
    prefix.pop();
}

fn validate_level(node: &CommandNode) -> Result<()> {
    let mut seen: Vec<&str> = Vec::new();
    for child in &node.children {
        for name in std::iter::once(&child.name).chain(&child.aliases) {
            if seen.contains(&name.as_str()) {
                return Err(RoostError::Other(anyhow::anyhow!(
                    "command '{}' is registered twice under '{}'",
                    name,
                    node.name
                )));
            }
            seen.push(name.as_str());
        }
        validate_level(child)?;
    }
    Ok(())
}
