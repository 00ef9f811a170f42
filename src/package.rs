//! Proto package hierarchy.
//!
//! Packages form a tree rooted at a single well-known node (`ocsf` by
//! default). Each node determines one output file: the package
//! `ocsf.events.iam` is written to `ocsf/events/iam/iam.proto`.

use std::collections::BTreeMap;

/// Index of a node in a [`PackageTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageId(usize);

#[derive(Debug)]
struct PackageNode {
    name: String,
    parent: Option<PackageId>,
    children: BTreeMap<String, PackageId>,
}

/// Arena of package nodes. Nodes are never removed.
#[derive(Debug)]
pub struct PackageTree {
    nodes: Vec<PackageNode>,
}

impl PackageTree {
    pub fn new(root_name: &str) -> Self {
        Self {
            nodes: vec![PackageNode {
                name: root_name.to_string(),
                parent: None,
                children: BTreeMap::new(),
            }],
        }
    }

    pub const fn root(&self) -> PackageId {
        PackageId(0)
    }

    /// Get or create the child `name` of `parent`.
    pub fn child(&mut self, parent: PackageId, name: &str) -> PackageId {
        if let Some(&id) = self.nodes[parent.0].children.get(name) {
            return id;
        }

        let id = PackageId(self.nodes.len());
        self.nodes.push(PackageNode {
            name: name.to_string(),
            parent: Some(parent),
            children: BTreeMap::new(),
        });
        self.nodes[parent.0].children.insert(name.to_string(), id);
        id
    }

    /// Walk (creating as needed) a chain of children below `from`.
    pub fn path<'a>(&mut self, from: PackageId, names: impl IntoIterator<Item = &'a str>) -> PackageId {
        names
            .into_iter()
            .fold(from, |node, name| self.child(node, name))
    }

    pub fn name(&self, id: PackageId) -> &str {
        &self.nodes[id.0].name
    }

    pub fn parent(&self, id: PackageId) -> Option<PackageId> {
        self.nodes[id.0].parent
    }

    /// Dotted name from the root, e.g. `ocsf.events.iam`.
    pub fn full_name(&self, id: PackageId) -> String {
        self.segments(id).join(".")
    }

    /// Directory of the package, e.g. `ocsf/events/iam`.
    pub fn dir_path(&self, id: PackageId) -> String {
        self.segments(id).join("/")
    }

    /// Path of the proto file holding the package, e.g. `ocsf/events/iam/iam.proto`.
    pub fn file_path(&self, id: PackageId) -> String {
        format!("{}/{}.proto", self.dir_path(id), self.name(id))
    }

    /// All nodes in creation order.
    pub fn ids(&self) -> impl Iterator<Item = PackageId> + '_ {
        (0..self.nodes.len()).map(PackageId)
    }

    fn segments(&self, id: PackageId) -> Vec<&str> {
        let mut segments = Vec::new();
        let mut cursor = Some(id);
        while let Some(node) = cursor {
            segments.push(self.nodes[node.0].name.as_str());
            cursor = self.nodes[node.0].parent;
        }
        segments.reverse();
        segments
    }
}
