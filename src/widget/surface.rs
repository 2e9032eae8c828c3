use serde::{Deserialize, Serialize};
use std::fmt;

/// Navigation triggered by one of the header controls.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NavAction {
    Previous,
    Next,
}

impl NavAction {
    pub fn as_str(self) -> &'static str {
        match self {
            NavAction::Previous => "previous",
            NavAction::Next => "next",
        }
    }
}

impl fmt::Display for NavAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The element tree a calendar renders into.
///
/// Any retained-mode backend implementing this capability set can host a
/// calendar.
pub trait Surface {
    /// Handle to an element owned by the surface.
    type Node: Copy + Eq + fmt::Debug;

    /// Top-level element of the surface.
    fn root(&self) -> Self::Node;

    /// Creates a detached element with the given tag name.
    fn create_element(&mut self, tag: &str) -> Self::Node;

    fn append_child(&mut self, parent: Self::Node, child: Self::Node);

    /// Detaches `child` from `parent`. A removed subtree is no longer reachable.
    fn remove_child(&mut self, parent: Self::Node, child: Self::Node);

    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);

    fn attribute(&self, node: Self::Node, name: &str) -> Option<String>;

    /// Replaces the text content of `node`.
    fn set_text(&mut self, node: Self::Node, text: &str);

    /// Direct children of `node`, in document order.
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Associates a navigation action with a control so the host can route
    /// activations of that node back to the widget.
    fn bind_action(&mut self, node: Self::Node, action: NavAction);

    fn action(&self, node: Self::Node) -> Option<NavAction>;

    fn clear_children(&mut self, node: Self::Node) {
        for child in self.children(node) {
            self.remove_child(node, child);
        }
    }

    /// Appends `class` to the element's class list unless already present.
    fn add_class(&mut self, node: Self::Node, class: &str) {
        let current = self.attribute(node, "class").unwrap_or_default();
        if current.split_whitespace().any(|c| c == class) {
            return;
        }
        let updated = if current.is_empty() {
            class.to_string()
        } else {
            format!("{current} {class}")
        };
        self.set_attribute(node, "class", &updated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::node_tree::NodeTree;

    #[test]
    fn test_nav_action_display() {
        assert_eq!(NavAction::Previous.to_string(), "previous");
        assert_eq!(NavAction::Next.to_string(), "next");
    }

    #[test]
    fn test_nav_action_serializes_lowercase() {
        let json = serde_json::to_string(&NavAction::Next).unwrap();
        assert_eq!(json, "\"next\"");
        let parsed: NavAction = serde_json::from_str("\"previous\"").unwrap();
        assert_eq!(parsed, NavAction::Previous);
    }

    #[test]
    fn test_clear_children_removes_everything() {
        let mut tree = NodeTree::new();
        let root = tree.root();
        for _ in 0..3 {
            let child = tree.create_element("p");
            tree.append_child(root, child);
        }
        assert_eq!(tree.children(root).len(), 3);
        tree.clear_children(root);
        assert!(tree.children(root).is_empty());
    }

    #[test]
    fn test_add_class_appends_once() {
        let mut tree = NodeTree::new();
        let div = tree.create_element("div");
        tree.add_class(div, "scope");
        tree.add_class(div, "today");
        tree.add_class(div, "scope");
        assert_eq!(tree.attribute(div, "class").as_deref(), Some("scope today"));
    }
}
