use crate::{DocumentTree, MarkableTree, MarkerSpec, TreeError};

/// Handle to a node inside a [`DocTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// In-memory document tree.
///
/// Nodes live in an append-only arena; removal detaches a subtree and marks
/// its records dead, so handles are never reused.
#[derive(Debug, Clone)]
pub struct DocTree {
    nodes: Vec<NodeRecord>,
    root: NodeId,
}

#[derive(Debug, Clone)]
struct NodeRecord {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    live: bool,
}

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        classes: Vec<String>,
        synthetic: bool,
    },
    Text {
        text: String,
    },
}

impl DocTree {
    /// New tree with a `BODY` root.
    pub fn new() -> Self {
        Self::with_root("body")
    }

    pub fn with_root(tag: &str) -> Self {
        Self {
            nodes: vec![NodeRecord::element(tag, false)],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included. Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.live).count()
    }

    pub fn is_live(&self, node: NodeId) -> bool {
        self.record(node).is_some()
    }

    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> Result<NodeId, TreeError> {
        self.insert(parent, None, NodeRecord::element(tag, false))
    }

    pub fn append_element_with_id(
        &mut self,
        parent: NodeId,
        tag: &str,
        id: &str,
    ) -> Result<NodeId, TreeError> {
        let node = self.append_element(parent, tag)?;
        self.set_attribute(node, "id", id)?;
        Ok(node)
    }

    /// Append an element holding a single text child.
    pub fn append_text_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        text: &str,
    ) -> Result<NodeId, TreeError> {
        let node = self.append_element(parent, tag)?;
        self.append_text(node, text)?;
        Ok(node)
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> Result<NodeId, TreeError> {
        self.insert(
            parent,
            None,
            NodeRecord::new(NodeKind::Text {
                text: text.to_string(),
            }),
        )
    }

    pub fn insert_element_before(
        &mut self,
        parent: NodeId,
        before: NodeId,
        tag: &str,
    ) -> Result<NodeId, TreeError> {
        self.insert(parent, Some(before), NodeRecord::element(tag, false))
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), TreeError> {
        match &mut self.record_mut(node)?.kind {
            NodeKind::Element { attributes, .. } => {
                match attributes.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
                    Some((_, v)) => *v = value.to_string(),
                    None => attributes.push((name.to_ascii_lowercase(), value.to_string())),
                }
                Ok(())
            }
            NodeKind::Text { .. } => Err(TreeError::NotAnElement(node)),
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.record(node)?.kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str()),
            NodeKind::Text { .. } => None,
        }
    }

    /// Replace the contents of a text node.
    pub fn set_text(&mut self, node: NodeId, text: &str) -> Result<(), TreeError> {
        match &mut self.record_mut(node)?.kind {
            NodeKind::Text { text: existing } => {
                existing.clear();
                existing.push_str(text);
                Ok(())
            }
            NodeKind::Element { .. } => Err(TreeError::NotText(node)),
        }
    }

    /// Detach `node` and mark its whole subtree dead.
    pub fn detach(&mut self, node: NodeId) -> Result<(), TreeError> {
        if node == self.root {
            return Err(TreeError::CannotRemoveRoot);
        }
        let parent = self.record(node).ok_or(TreeError::UnknownNode(node))?.parent;
        if let Some(parent) = parent {
            if let Ok(record) = self.record_mut(parent) {
                record.children.retain(|c| *c != node);
            }
        }
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Ok(record) = self.record_mut(current) {
                record.live = false;
                record.parent = None;
                stack.extend(record.children.drain(..));
            }
        }
        Ok(())
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        match self.record(node).map(|r| &r.kind) {
            Some(NodeKind::Element { classes, .. }) => classes.as_slice(),
            _ => &[],
        }
    }

    /// True for markers created through [`MarkableTree::insert_marker`].
    pub fn is_synthetic(&self, node: NodeId) -> bool {
        matches!(
            self.record(node).map(|r| &r.kind),
            Some(NodeKind::Element { synthetic: true, .. })
        )
    }

    /// Live nodes under the root carrying `class`, in document order.
    pub fn nodes_with_class(&self, class: &str) -> Vec<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .filter(|n| self.has_class(*n, class))
            .collect()
    }

    /// Indented one-line-per-node dump, useful in assertions and the CLI.
    pub fn outline(&self) -> Vec<String> {
        fn walk(tree: &DocTree, node: NodeId, depth: usize, out: &mut Vec<String>) {
            let indent = "  ".repeat(depth);
            let Some(record) = tree.record(node) else {
                return;
            };
            match &record.kind {
                NodeKind::Element {
                    tag,
                    attributes,
                    classes,
                    ..
                } => {
                    let mut line = format!("{indent}<{}", tag.to_ascii_lowercase());
                    for (k, v) in attributes {
                        line.push_str(&format!(r#" {k}="{v}""#));
                    }
                    if !classes.is_empty() {
                        line.push_str(&format!(r#" class="{}""#, classes.join(" ")));
                    }
                    line.push('>');
                    out.push(line);
                    for child in &record.children {
                        walk(tree, *child, depth + 1, out);
                    }
                }
                NodeKind::Text { text } => {
                    let t = text.replace('\n', " ").trim().to_string();
                    if !t.is_empty() {
                        out.push(format!("{indent}\"{t}\""));
                    }
                }
            }
        }

        let mut out = Vec::new();
        walk(self, self.root, 0, &mut out);
        out
    }

    fn insert(
        &mut self,
        parent: NodeId,
        before: Option<NodeId>,
        mut record: NodeRecord,
    ) -> Result<NodeId, TreeError> {
        let parent_record = self.record(parent).ok_or(TreeError::UnknownNode(parent))?;
        if !matches!(parent_record.kind, NodeKind::Element { .. }) {
            return Err(TreeError::NotAnElement(parent));
        }
        let position = match before {
            Some(before) => parent_record
                .children
                .iter()
                .position(|c| *c == before)
                .ok_or(TreeError::InvalidSibling { parent, before })?,
            None => parent_record.children.len(),
        };

        let id = NodeId(self.nodes.len() as u32);
        record.parent = Some(parent);
        self.nodes.push(record);
        self.record_mut(parent)?.children.insert(position, id);
        Ok(id)
    }

    fn record(&self, node: NodeId) -> Option<&NodeRecord> {
        self.nodes.get(node.0 as usize).filter(|r| r.live)
    }

    fn record_mut(&mut self, node: NodeId) -> Result<&mut NodeRecord, TreeError> {
        self.nodes
            .get_mut(node.0 as usize)
            .filter(|r| r.live)
            .ok_or(TreeError::UnknownNode(node))
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let Some(record) = self.record(node) else {
            return;
        };
        match &record.kind {
            NodeKind::Text { text } => out.push_str(text),
            NodeKind::Element { synthetic: true, .. } => {}
            NodeKind::Element { .. } => {
                for child in &record.children {
                    self.collect_text(*child, out);
                }
            }
        }
    }
}

impl Default for DocTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeRecord {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            live: true,
        }
    }

    fn element(tag: &str, synthetic: bool) -> Self {
        Self::new(NodeKind::Element {
            tag: tag.to_ascii_uppercase(),
            attributes: Vec::new(),
            classes: Vec::new(),
            synthetic,
        })
    }
}

impl DocumentTree for DocTree {
    type Node = NodeId;

    fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.record(node)?.kind {
            NodeKind::Element { tag, .. } => Some(tag.as_str()),
            NodeKind::Text { .. } => None,
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.record(node)?.parent
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.record(node).map(|r| r.children.as_slice()).unwrap_or(&[])
    }

    fn element_id(&self, node: NodeId) -> Option<&str> {
        self.attribute(node, "id")
    }

    fn is_marker(&self, node: NodeId) -> bool {
        self.is_synthetic(node)
    }

    fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }
}

impl MarkableTree for DocTree {
    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Ok(NodeRecord {
            kind: NodeKind::Element { classes, .. },
            ..
        }) = self.record_mut(node)
        {
            if !classes.iter().any(|c| c == class) {
                classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Ok(NodeRecord {
            kind: NodeKind::Element { classes, .. },
            ..
        }) = self.record_mut(node)
        {
            classes.retain(|c| c != class);
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).iter().any(|c| c == class)
    }

    fn insert_marker(
        &mut self,
        parent: NodeId,
        before: Option<NodeId>,
        marker: MarkerSpec<'_>,
    ) -> Option<NodeId> {
        let mut record = NodeRecord::element(marker.tag, true);
        if let NodeKind::Element { classes, .. } = &mut record.kind {
            classes.push(marker.class.to_string());
        }
        let node = self.insert(parent, before, record).ok()?;
        self.append_text(node, marker.label).ok()?;
        Some(node)
    }

    fn remove_node(&mut self, node: NodeId) -> bool {
        self.detach(node).is_ok()
    }
}
