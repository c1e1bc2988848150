use dom_query::Node;

use crate::utils::collapse_whitespace;

pub(crate) const ITEMSCOPE: &str = "itemscope";
pub(crate) const ITEMPROP: &str = "itemprop";
pub(crate) const ITEMTYPE: &str = "itemtype";
pub(crate) const ITEMID: &str = "itemid";

/// Extension trait for dom_query::Node with the microdata lookups the resolver needs
pub trait NodeExt<'a> {
    /// Element carries `itemscope`
    fn is_item_scope(&self) -> bool;
    /// Element carries `itemprop`
    fn is_item_property(&self) -> bool;
    fn attr_string(&self, name: &str) -> Option<String>;
    /// Lowercased tag name, `None` for non-element nodes
    fn element_tag(&self) -> Option<String>;
    /// Text content outside nested `itemscope` subtrees, trimmed, with
    /// whitespace runs collapsed
    fn scoped_text(&self) -> String;
    fn is_same_node(&self, other: &Node<'a>) -> bool;
    /// Closest proper ancestor carrying `itemscope`
    fn nearest_scope_ancestor(&self) -> Option<Node<'a>>;
}

impl<'a> NodeExt<'a> for Node<'a> {
    fn is_item_scope(&self) -> bool {
        self.has_attr(ITEMSCOPE)
    }

    fn is_item_property(&self) -> bool {
        self.has_attr(ITEMPROP)
    }

    fn attr_string(&self, name: &str) -> Option<String> {
        self.attr(name).map(|value| value.to_string())
    }

    fn element_tag(&self) -> Option<String> {
        self.node_name().map(|name| name.to_lowercase())
    }

    fn scoped_text(&self) -> String {
        let mut text = String::new();
        collect_scoped_text(self, &mut text);
        collapse_whitespace(&text)
    }

    fn is_same_node(&self, other: &Node<'a>) -> bool {
        self.id == other.id
    }

    fn nearest_scope_ancestor(&self) -> Option<Node<'a>> {
        let mut current = self.parent();

        while let Some(parent) = current {
            if parent.is_item_scope() {
                return Some(parent);
            }
            current = parent.parent();
        }

        None
    }
}

fn collect_scoped_text(node: &Node, out: &mut String) {
    let mut child = node.first_child();

    while let Some(current) = child {
        if current.is_text() {
            out.push_str(&current.text());
        } else if current.is_element() && !current.is_item_scope() {
            collect_scoped_text(&current, out);
        }
        child = current.next_sibling();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_query::Document;

    #[test]
    fn test_nearest_scope_ancestor() {
        let doc = Document::from(
            r#"<div itemscope id="outer"><section><p itemscope id="inner"><span id="leaf">x</span></p></section></div>"#,
        );

        let leaf = doc.select("#leaf").nodes()[0].clone();
        let inner = doc.select("#inner").nodes()[0].clone();
        let outer = doc.select("#outer").nodes()[0].clone();

        let scope = leaf.nearest_scope_ancestor().unwrap();
        assert!(scope.is_same_node(&inner));

        let scope = inner.nearest_scope_ancestor().unwrap();
        assert!(scope.is_same_node(&outer));

        assert!(outer.nearest_scope_ancestor().is_none());
    }

    #[test]
    fn test_attribute_helpers() {
        let doc = Document::from(r#"<META itemprop="a b" content=" x ">"#);
        let meta = doc.select("meta").nodes()[0].clone();

        assert_eq!(meta.element_tag().as_deref(), Some("meta"));
        assert!(meta.is_item_property());
        assert!(!meta.is_item_scope());
        assert_eq!(meta.attr_string("content").as_deref(), Some(" x "));
        assert_eq!(meta.attr_string("missing"), None);
    }

    #[test]
    fn test_scoped_text() {
        let doc = Document::from("<p id=\"p\">\n  Hello\n  <b>big</b>   world \n</p>");
        let p = doc.select("#p").nodes()[0].clone();
        assert_eq!(p.scoped_text(), "Hello big world");
    }

    #[test]
    fn test_scoped_text_skips_nested_items() {
        let doc = Document::from(
            r#"<span id="s">Before <div itemscope><span itemprop="a">X</span></div> after</span>"#,
        );
        let span = doc.select("#s").nodes()[0].clone();
        assert_eq!(span.scoped_text(), "Before after");
    }
}
