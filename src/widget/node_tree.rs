//! In-memory element tree implementing [`Surface`].
//!
//! Nodes live in an arena; removing a child frees its whole subtree so that
//! repeated full re-renders do not grow the tree.

use crate::widget::surface::{NavAction, Surface};
use std::fmt::Write as _;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Debug)]
struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    action: Option<NavAction>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Element {
            tag: tag.to_string(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
            parent: None,
            action: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct NodeTree {
    nodes: Vec<Option<Element>>,
    free: Vec<usize>,
    root: NodeId,
}

impl Default for NodeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeTree {
    /// Creates a tree whose root is a `div`.
    pub fn new() -> Self {
        Self::with_root("div")
    }

    pub fn with_root(tag: &str) -> Self {
        NodeTree {
            nodes: vec![Some(Element::new(tag))],
            free: Vec::new(),
            root: NodeId(0),
        }
    }

    /// Number of live nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|e| e.tag.as_str())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|e| e.parent)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.get(id)
            .and_then(|e| e.attributes.iter().find(|(k, _)| k == "class"))
            .map(|(_, v)| v.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Concatenated text of `id` and all of its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(e) = self.get(id) {
            if let Some(text) = &e.text {
                out.push_str(text);
            }
            for child in &e.children {
                self.collect_text(*child, out);
            }
        }
    }

    /// Descendants of `id` (excluding `id`) in document order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = match self.get(id) {
            Some(e) => e.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(next) = stack.pop() {
            if let Some(e) = self.get(next) {
                out.push(next);
                stack.extend(e.children.iter().rev().copied());
            }
        }
        out
    }

    pub fn find_by_class(&self, id: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|n| self.has_class(*n, class))
            .collect()
    }

    pub fn find_by_tag(&self, id: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|n| self.tag(*n) == Some(tag))
            .collect()
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == candidate {
                return true;
            }
            match self.parent(node) {
                Some(p) => node = p,
                None => return false,
            }
        }
    }

    fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.parent(child) else {
            return;
        };
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|c| *c != child);
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = None;
        }
    }

    fn free_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if next == self.root {
                continue;
            }
            if let Some(e) = self.nodes.get_mut(next.0).and_then(Option::take) {
                stack.extend(e.children);
                self.free.push(next.0);
            }
        }
    }

    /// Serializes the subtree rooted at `id` as HTML.
    pub fn to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Some(e) = self.get(id) else {
            return;
        };
        let _ = write!(out, "<{}", e.tag);
        for (name, value) in &e.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        if let Some(action) = e.action {
            let _ = write!(out, " data-action=\"{}\"", action);
        }
        out.push('>');
        if let Some(text) = &e.text {
            out.push_str(&escape(text));
        }
        for child in &e.children {
            self.write_html(*child, out);
        }
        let _ = write!(out, "</{}>", e.tag);
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

impl Surface for NodeTree {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        self.root
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        let element = Some(Element::new(tag));
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = element;
                NodeId(slot)
            }
            None => {
                self.nodes.push(element);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.get(parent).is_none() || self.get(child).is_none() || child == self.root {
            return;
        }
        // Appending an ancestor into its own subtree would create a cycle.
        if self.is_ancestor_or_self(child, parent) {
            return;
        }
        self.detach(child);
        if let Some(c) = self.get_mut(child) {
            c.parent = Some(parent);
        }
        if let Some(p) = self.get_mut(parent) {
            p.children.push(child);
        }
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if self.parent(child) != Some(parent) {
            return;
        }
        self.detach(child);
        self.free_subtree(child);
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(e) = self.get_mut(node) {
            match e.attributes.iter_mut().find(|(k, _)| k == name) {
                Some((_, v)) => *v = value.to_string(),
                None => e.attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.get(node)?
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(e) = self.get_mut(node) {
            e.text = Some(text.to_string());
        }
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.get(node).map(|e| e.children.clone()).unwrap_or_default()
    }

    fn bind_action(&mut self, node: NodeId, action: NavAction) {
        if let Some(e) = self.get_mut(node) {
            e.action = Some(action);
        }
    }

    fn action(&self, node: NodeId) -> Option<NavAction> {
        self.get(node).and_then(|e| e.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_list() -> (NodeTree, NodeId, NodeId, NodeId) {
        let mut tree = NodeTree::new();
        let root = tree.root();
        let list = tree.create_element("ul");
        let first = tree.create_element("li");
        let second = tree.create_element("li");
        tree.set_text(first, "one");
        tree.set_text(second, "two");
        tree.append_child(list, first);
        tree.append_child(list, second);
        tree.append_child(root, list);
        (tree, list, first, second)
    }

    #[test]
    fn test_new_tree_has_only_root() {
        let tree = NodeTree::new();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.tag(tree.root()), Some("div"));
        assert!(tree.children(tree.root()).is_empty());
    }

    #[test]
    fn test_append_child_preserves_order() {
        let (tree, list, first, second) = tree_with_list();
        assert_eq!(tree.children(list), vec![first, second]);
        assert_eq!(tree.parent(first), Some(list));
    }

    #[test]
    fn test_append_child_moves_from_previous_parent() {
        let (mut tree, list, first, _) = tree_with_list();
        let other = tree.create_element("ol");
        tree.append_child(tree.root(), other);
        tree.append_child(other, first);
        assert_eq!(tree.children(other), vec![first]);
        assert!(!tree.children(list).contains(&first));
    }

    #[test]
    fn test_append_ancestor_into_descendant_is_ignored() {
        let (mut tree, list, first, _) = tree_with_list();
        tree.append_child(first, list);
        assert_eq!(tree.parent(list), Some(tree.root()));
        assert!(tree.children(first).is_empty());
    }

    #[test]
    fn test_remove_child_frees_subtree() {
        let (mut tree, list, _, _) = tree_with_list();
        assert_eq!(tree.len(), 4);
        tree.remove_child(tree.root(), list);
        assert_eq!(tree.len(), 1);
        assert!(tree.tag(list).is_none());
    }

    #[test]
    fn test_remove_child_of_wrong_parent_is_noop() {
        let (mut tree, _, first, _) = tree_with_list();
        tree.remove_child(tree.root(), first);
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.text_content(first), "one");
    }

    #[test]
    fn test_freed_slots_are_reused() {
        let (mut tree, list, _, _) = tree_with_list();
        tree.remove_child(tree.root(), list);
        let before = tree.nodes.len();
        for _ in 0..3 {
            tree.create_element("span");
        }
        assert_eq!(tree.nodes.len(), before);
    }

    #[test]
    fn test_set_attribute_replaces_existing_value() {
        let mut tree = NodeTree::new();
        let td = tree.create_element("td");
        tree.set_attribute(td, "class", "a");
        tree.set_attribute(td, "colspan", "5");
        tree.set_attribute(td, "class", "b");
        assert_eq!(tree.attribute(td, "class").as_deref(), Some("b"));
        assert_eq!(tree.to_html(td), "<td class=\"b\" colspan=\"5\"></td>");
    }

    #[test]
    fn test_has_class_matches_whole_words() {
        let mut tree = NodeTree::new();
        let div = tree.create_element("div");
        tree.set_attribute(div, "class", "calendar-btn btn-prev");
        assert!(tree.has_class(div, "btn-prev"));
        assert!(!tree.has_class(div, "btn"));
    }

    #[test]
    fn test_text_content_is_recursive() {
        let (tree, list, _, _) = tree_with_list();
        assert_eq!(tree.text_content(list), "onetwo");
    }

    #[test]
    fn test_descendants_in_document_order() {
        let (tree, list, first, second) = tree_with_list();
        assert_eq!(tree.descendants(tree.root()), vec![list, first, second]);
        assert_eq!(tree.find_by_tag(tree.root(), "li"), vec![first, second]);
    }

    #[test]
    fn test_to_html_escapes_text_and_attributes() {
        let mut tree = NodeTree::new();
        let span = tree.create_element("span");
        tree.set_attribute(span, "title", "a \"b\"");
        tree.set_text(span, "<x> & y");
        assert_eq!(
            tree.to_html(span),
            "<span title=\"a &quot;b&quot;\">&lt;x&gt; &amp; y</span>"
        );
    }

    #[test]
    fn test_bound_action_is_serialized() {
        let mut tree = NodeTree::new();
        let span = tree.create_element("span");
        tree.bind_action(span, NavAction::Next);
        assert_eq!(tree.action(span), Some(NavAction::Next));
        assert_eq!(tree.to_html(span), "<span data-action=\"next\"></span>");
    }

    #[test]
    fn test_stale_ids_are_ignored() {
        let (mut tree, list, first, _) = tree_with_list();
        tree.remove_child(tree.root(), list);
        tree.set_text(first, "gone");
        tree.set_attribute(first, "class", "x");
        assert!(tree.children(first).is_empty());
        assert_eq!(tree.to_html(first), "");
    }
}
