use std::collections::HashSet;

use fingerprint::{deserialize, AnchorDescriptor, Resolver};
use serde::Serialize;
use tracing::{debug, info, info_span};
use tree::{MarkableTree, MarkerSpec};

use crate::config::FocusConfig;
use crate::error::FocusError;


/// Whether focus marks are currently applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusState {
    Inactive,
    Active,
}

/// Summary of one `apply` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FocusOutcome {
    /// Descriptors supplied.
    pub requested: usize,
    /// Distinct nodes they resolved to.
    pub resolved: usize,
    /// Elements marked hidden.
    pub hidden: usize,
    /// Dividers inserted.
    pub dividers: usize,
}

#[derive(Debug)]
struct Applied<N> {
    targets: Vec<N>,
    hidden: Vec<N>,
    dividers: Vec<N>,
}

/// Focus-mode state machine bound to one root node.
///
/// The engine owns no tree; every transition borrows the tree mutably, so
/// two focus operations on the same tree cannot interleave.
#[derive(Debug)]
pub struct FocusEngine<N> {
    root: N,
    config: FocusConfig,
    resolver: Resolver,
    applied: Option<Applied<N>>,
}

impl<N: Copy + Eq + std::hash::Hash + std::fmt::Debug> FocusEngine<N> {
    /// Build an engine for `root` after validating `config`.
    pub fn new(root: N, config: FocusConfig) -> Result<Self, FocusError> {
        config.validate()?;
        Ok(Self {
            root,
            config,
            resolver: Resolver::default(),
            applied: None,
        })
    }

    /// Replace the resolver (and with it the scoring policy).
    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn root(&self) -> N {
        self.root
    }

    pub fn config(&self) -> &FocusConfig {
        &self.config
    }

    pub fn state(&self) -> FocusState {
        if self.applied.is_some() {
            FocusState::Active
        } else {
            FocusState::Inactive
        }
    }

    pub fn is_active(&self) -> bool {
        self.applied.is_some()
    }

    /// Resolved targets of the current application, in resolution order.
    pub fn targets(&self) -> &[N] {
        self.applied
            .as_ref()
            .map(|applied| applied.targets.as_slice())
            .unwrap_or(&[])
    }

    /// Decode `token` and focus the nodes it names.
    pub fn apply_focus_mode<T>(&mut self, tree: &mut T, token: &str) -> FocusOutcome
    where
        T: MarkableTree<Node = N>,
    {
        let descriptors = deserialize(token);
        self.apply_descriptors(tree, &descriptors)
    }

    /// Focus the nodes `descriptors` resolve to.
    ///
    /// Any previous application is reversed first. Descriptors that miss are
    /// dropped; when none resolve the engine ends up inactive.
    pub fn apply_descriptors<T>(&mut self, tree: &mut T, descriptors: &[AnchorDescriptor]) -> FocusOutcome
    where
        T: MarkableTree<Node = N>,
    {
        let span = info_span!("apply_focus_mode", requested = descriptors.len());
        let _guard = span.enter();

        self.exit_focus_mode(tree);

        let mut outcome = FocusOutcome {
            requested: descriptors.len(),
            ..FocusOutcome::default()
        };

        let mut seen = HashSet::new();
        let targets: Vec<N> = self
            .resolver
            .resolve_all(&*tree, self.root, descriptors)
            .into_iter()
            .flatten()
            .filter(|node| seen.insert(*node))
            .collect();
        outcome.resolved = targets.len();

        if targets.is_empty() {
            debug!(requested = outcome.requested, "focus_nothing_resolved");
            return outcome;
        }

        let mut keep: HashSet<N> = targets.iter().copied().collect();
        for target in &targets {
            keep.extend(tree.ancestors_within(*target, self.root));
        }
        let target_set: HashSet<N> = targets.iter().copied().collect();

        let hidden = self.mark(tree, &target_set, &keep);
        let dividers = self.insert_dividers(tree, &hidden);
        tree.add_class(self.root, &self.config.root_class);

        outcome.hidden = hidden.len();
        outcome.dividers = dividers.len();
        info!(
            requested = outcome.requested,
            resolved = outcome.resolved,
            hidden = outcome.hidden,
            dividers = outcome.dividers,
            "focus_applied"
        );

        self.applied = Some(Applied {
            targets,
            hidden,
            dividers,
        });
        outcome
    }

    /// Remove every mark and divider. Returns false when already inactive.
    pub fn exit_focus_mode<T>(&mut self, tree: &mut T) -> bool
    where
        T: MarkableTree<Node = N>,
    {
        let Some(applied) = self.applied.take() else {
            return false;
        };

        for divider in &applied.dividers {
            tree.remove_node(*divider);
        }
        for node in &applied.hidden {
            tree.remove_class(*node, &self.config.hidden_class);
        }
        for node in &applied.targets {
            tree.remove_class(*node, &self.config.target_class);
        }
        tree.remove_class(self.root, &self.config.root_class);

        debug!(
            targets = applied.targets.len(),
            hidden = applied.hidden.len(),
            dividers = applied.dividers.len(),
            "focus_exited"
        );
        true
    }

    /// Depth-first marking pass. Returns hidden elements in document order.
    fn mark<T>(&self, tree: &mut T, targets: &HashSet<N>, keep: &HashSet<N>) -> Vec<N>
    where
        T: MarkableTree<Node = N>,
    {
        let mut hidden = Vec::new();
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            if !tree.is_element(node) || tree.is_marker(node) {
                continue;
            }
            if self.config.excludes(tree.tag(node), tree.element_id(node)) {
                continue;
            }
            if targets.contains(&node) {
                tree.add_class(node, &self.config.target_class);
            } else if keep.contains(&node) {
                stack.extend(tree.children(node).iter().rev().copied());
            } else {
                // `keep` is closed under ancestors, so nothing below an
                // element outside it can be kept.
                tree.add_class(node, &self.config.hidden_class);
                hidden.push(node);
            }
        }
        hidden
    }

    /// One divider before each maximal run of hidden siblings. Text nodes do
    /// not break a run; any other element does.
    fn insert_dividers<T>(&self, tree: &mut T, hidden: &[N]) -> Vec<N>
    where
        T: MarkableTree<Node = N>,
    {
        let hidden_set: HashSet<N> = hidden.iter().copied().collect();
        let mut parents = Vec::new();
        let mut seen = HashSet::new();
        for node in hidden {
            if let Some(parent) = tree.parent(*node) {
                if seen.insert(parent) {
                    parents.push(parent);
                }
            }
        }

        let mut runs: Vec<(N, N, usize)> = Vec::new();
        for parent in parents {
            let mut current: Option<(N, usize)> = None;
            for child in tree.children(parent) {
                if hidden_set.contains(child) {
                    current = match current {
                        Some((first, count)) => Some((first, count + 1)),
                        None => Some((*child, 1)),
                    };
                } else if tree.is_element(*child) {
                    if let Some((first, count)) = current.take() {
                        runs.push((parent, first, count));
                    }
                }
            }
            if let Some((first, count)) = current {
                runs.push((parent, first, count));
            }
        }

        let mut dividers = Vec::with_capacity(runs.len());
        for (parent, first, count) in runs {
            let label = divider_label(count);
            let spec = MarkerSpec {
                tag: &self.config.divider_tag,
                class: &self.config.divider_class,
                label: &label,
            };
            match tree.insert_marker(parent, Some(first), spec) {
                Some(divider) => dividers.push(divider),
                None => debug!(parent = ?parent, "focus_divider_skipped"),
            }
        }
        dividers
    }
}

/// Label for a divider standing in for `count` hidden siblings.
pub fn divider_label(count: usize) -> String {
    if count == 1 {
        "1 section hidden".to_string()
    } else {
        format!("{count} sections hidden")
    }
}
