use super::lexer::{Attribute, Token};

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Raw text exactly as it appeared in the source
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    fn new(name: impl Into<String>, attrs: Vec<Attribute>) -> Self {
        Self {
            name: name.into(),
            attrs,
            children: Vec::new(),
        }
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_deref().unwrap_or(""))
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name == name)
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// All elements below this one, in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: child_elements(self).rev().collect(),
        }
    }

    pub fn find(&self, pred: impl Fn(&Element) -> bool) -> Option<&Element> {
        self.descendants().find(|&e| pred(e))
    }

    pub fn find_all(&self, pred: impl Fn(&Element) -> bool) -> Vec<&Element> {
        self.descendants().filter(|&e| pred(e)).collect()
    }

    /// Concatenated raw text of this element and its descendants.
    pub fn raw_text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Entity-decoded, trimmed text content.
    pub fn text(&self) -> String {
        let raw = self.raw_text();
        html_escape::decode_html_entities(raw.trim()).into_owned()
    }
}

fn child_elements(e: &Element) -> impl DoubleEndedIterator<Item = &Element> {
    e.children.iter().filter_map(|n| match n {
        Node::Element(el) => Some(el),
        Node::Text(_) => None,
    })
}

fn collect_text(e: &Element, out: &mut String) {
    for child in &e.children {
        match child {
            Node::Text(t) => out.push_str(t),
            Node::Element(el) => collect_text(el, out),
        }
    }
}

/// Pre-order walk over an element's descendants.
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(child_elements(next).rev());
        Some(next)
    }
}

/// A parsed document. The root is a synthetic `#document` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub root: Element,
}

impl Document {
    pub fn find(&self, pred: impl Fn(&Element) -> bool) -> Option<&Element> {
        self.root.find(pred)
    }

    pub fn find_all(&self, pred: impl Fn(&Element) -> bool) -> Vec<&Element> {
        self.root.find_all(pred)
    }

    pub fn element_by_id(&self, id: &str) -> Option<&Element> {
        self.find(|e| e.id() == Some(id))
    }
}

/// Builds a [`Document`] from tokens, recovering from unbalanced markup.
pub struct TreeBuilder {
    stack: Vec<Element>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            stack: vec![Element::new("#document", Vec::new())],
        }
    }

    pub fn push(&mut self, token: Token<'_>) {
        match token {
            Token::Doctype(_) | Token::Comment(_) => {}
            Token::Text(text) => self.append(Node::Text(text.to_string())),
            Token::StartTag(tag) => {
                let element = Element::new(tag.name, tag.attrs);
                if tag.self_closing || VOID_ELEMENTS.contains(&element.name.as_str()) {
                    self.append(Node::Element(element));
                } else {
                    self.stack.push(element);
                }
            }
            Token::EndTag(name) => self.close(&name),
        }
    }

    pub fn finish(mut self) -> Document {
        // EOF: close whatever is still open
        while self.stack.len() > 1 {
            self.pop_into_parent();
        }
        let root = self
            .stack
            .pop()
            .unwrap_or_else(|| Element::new("#document", Vec::new()));
        Document { root }
    }

    fn append(&mut self, node: Node) {
        if let Some(top) = self.stack.last_mut() {
            top.children.push(node);
        }
    }

    fn close(&mut self, name: &str) {
        // index 0 is the synthetic root, never closed by markup
        let Some(depth) = self.stack.iter().skip(1).rposition(|e| e.name == name) else {
            return;
        };
        let target = depth + 1;
        while self.stack.len() > target {
            self.pop_into_parent();
        }
    }

    fn pop_into_parent(&mut self) {
        if let Some(element) = self.stack.pop() {
            self.append(Node::Element(element));
        }
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
