use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) node_type: NodeType,
}

#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub(crate) tag_name: String,
    pub(crate) attrs: HashMap<String, String>,
    pub(crate) value: String,
    pub(crate) checked: bool,
    pub(crate) disabled: bool,
    pub(crate) required: bool,
    pub(crate) layout_top: i64,
}

impl Element {
    pub(crate) fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs: HashMap::new(),
            value: String::new(),
            checked: false,
            disabled: false,
            required: false,
            layout_top: 0,
        }
    }

    pub(crate) fn input_type(&self) -> String {
        self.attrs
            .get("type")
            .map(|value| value.to_ascii_lowercase())
            .unwrap_or_else(|| "text".to_string())
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Dom {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
    pub(crate) id_index: HashMap<String, Vec<NodeId>>,
}

pub(crate) fn class_tokens(attr: Option<&str>) -> Vec<String> {
    attr.map(|value| {
        value
            .split_ascii_whitespace()
            .map(str::to_string)
            .collect::<Vec<_>>()
    })
    .unwrap_or_default()
}

fn set_class_attr(element: &mut Element, classes: &[String]) {
    if classes.is_empty() {
        element.attrs.remove("class");
    } else {
        element.attrs.insert("class".to_string(), classes.join(" "));
    }
}

pub(crate) fn parse_style_declarations(attr: Option<&str>) -> Vec<(String, String)> {
    let mut decls = Vec::new();
    let Some(text) = attr else {
        return decls;
    };
    for chunk in text.split(';') {
        let Some((prop, value)) = chunk.split_once(':') else {
            continue;
        };
        let prop = prop.trim();
        let value = value.trim();
        if !prop.is_empty() && !value.is_empty() {
            decls.push((prop.to_string(), value.to_string()));
        }
    }
    decls
}

fn serialize_style_declarations(decls: &[(String, String)]) -> String {
    decls
        .iter()
        .map(|(prop, value)| format!("{prop}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Selector {
    Id(String),
    Compound {
        tag: Option<String>,
        classes: Vec<String>,
    },
}

fn parse_selector(selector: &str) -> Result<Selector> {
    let trimmed = selector.trim();
    if trimmed.is_empty()
        || trimmed
            .chars()
            .any(|ch| ch.is_ascii_whitespace() || matches!(ch, '>' | '+' | '~' | '[' | ':' | ','))
    {
        return Err(Error::UnsupportedSelector(selector.to_string()));
    }
    if let Some(id) = trimmed.strip_prefix('#') {
        if id.is_empty() || id.contains(['#', '.']) {
            return Err(Error::UnsupportedSelector(selector.to_string()));
        }
        return Ok(Selector::Id(id.to_string()));
    }
    if trimmed.contains('#') {
        return Err(Error::UnsupportedSelector(selector.to_string()));
    }
    let mut parts = trimmed.split('.');
    let tag_part = parts.next().unwrap_or_default();
    let tag = if tag_part.is_empty() {
        None
    } else {
        Some(tag_part.to_ascii_lowercase())
    };
    let classes = parts.map(str::to_string).collect::<Vec<_>>();
    if classes.iter().any(String::is_empty) || (tag.is_none() && classes.is_empty()) {
        return Err(Error::UnsupportedSelector(selector.to_string()));
    }
    Ok(Selector::Compound { tag, classes })
}

impl Dom {
    pub(crate) fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            node_type: NodeType::Document,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            id_index: HashMap::new(),
        }
    }

    fn create_node(&mut self, parent: Option<NodeId>, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            node_type,
        });
        if let Some(parent_id) = parent {
            self.nodes[parent_id.0].children.push(id);
        }
        id
    }

    pub(crate) fn create_element(&mut self, parent: NodeId, tag_name: &str) -> NodeId {
        self.create_node(Some(parent), NodeType::Element(Element::new(tag_name)))
    }

    pub(crate) fn create_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.create_node(Some(parent), NodeType::Text(text.to_string()))
    }

    /// Detaches `node_id` (and with it the whole subtree) from its parent.
    pub(crate) fn remove_node(&mut self, node_id: NodeId) {
        if let Some(id) = self.attr(node_id, "id") {
            if let Some(entries) = self.id_index.get_mut(&id) {
                entries.retain(|entry| *entry != node_id);
            }
        }
        let parent = self.nodes[node_id.0].parent.take();
        if let Some(parent_id) = parent {
            self.nodes[parent_id.0]
                .children
                .retain(|child| *child != node_id);
        }
    }

    pub(crate) fn move_node(&mut self, node_id: NodeId, new_parent: NodeId) {
        if let Some(parent_id) = self.nodes[node_id.0].parent {
            self.nodes[parent_id.0]
                .children
                .retain(|child| *child != node_id);
        }
        self.nodes[node_id.0].parent = Some(new_parent);
        self.nodes[new_parent.0].children.push(node_id);
    }

    pub(crate) fn insert_first(&mut self, node_id: NodeId, new_parent: NodeId) {
        self.move_node(node_id, new_parent);
        let children = &mut self.nodes[new_parent.0].children;
        children.pop();
        children.insert(0, node_id);
    }

    pub(crate) fn element(&self, node_id: NodeId) -> Option<&Element> {
        match &self.nodes.get(node_id.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, node_id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(node_id.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn tag_name(&self, node_id: NodeId) -> Option<&str> {
        self.element(node_id).map(|element| element.tag_name.as_str())
    }

    pub(crate) fn attr(&self, node_id: NodeId, name: &str) -> Option<String> {
        self.element(node_id)?.attrs.get(name).cloned()
    }

    pub(crate) fn set_attr(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        if self.element(node_id).is_none() {
            return Err(Error::Runtime(format!(
                "attribute target is not an element: {name}"
            )));
        }
        if name == "id" {
            if let Some(old) = self.attr(node_id, "id") {
                if let Some(entries) = self.id_index.get_mut(&old) {
                    entries.retain(|entry| *entry != node_id);
                }
            }
            self.id_index
                .entry(value.to_string())
                .or_default()
                .push(node_id);
        }
        if let Some(element) = self.element_mut(node_id) {
            element.attrs.insert(name.to_string(), value.to_string());
        }
        Ok(())
    }

    pub(crate) fn text_content(&self, node_id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node_id, &mut out);
        out
    }

    fn collect_text(&self, node_id: NodeId, out: &mut String) {
        match &self.nodes[node_id.0].node_type {
            NodeType::Text(text) => out.push_str(text),
            _ => {
                for child in &self.nodes[node_id.0].children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    pub(crate) fn set_text_content(&mut self, node_id: NodeId, text: &str) {
        self.nodes[node_id.0].children.clear();
        self.create_text(node_id, text);
    }

    pub(crate) fn class_contains(&self, node_id: NodeId, class_name: &str) -> bool {
        self.element(node_id)
            .map(|element| {
                class_tokens(element.attrs.get("class").map(String::as_str))
                    .iter()
                    .any(|name| name == class_name)
            })
            .unwrap_or(false)
    }

    pub(crate) fn class_add(&mut self, node_id: NodeId, class_name: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("classList target is not an element".into()))?;
        let mut classes = class_tokens(element.attrs.get("class").map(String::as_str));
        if !classes.iter().any(|name| name == class_name) {
            classes.push(class_name.to_string());
        }
        set_class_attr(element, &classes);
        Ok(())
    }

    pub(crate) fn class_remove(&mut self, node_id: NodeId, class_name: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("classList target is not an element".into()))?;
        let mut classes = class_tokens(element.attrs.get("class").map(String::as_str));
        classes.retain(|name| name != class_name);
        set_class_attr(element, &classes);
        Ok(())
    }

    pub(crate) fn style_get(&self, node_id: NodeId, prop: &str) -> String {
        let Some(element) = self.element(node_id) else {
            return String::new();
        };
        let decls = parse_style_declarations(element.attrs.get("style").map(String::as_str));
        decls
            .iter()
            .find(|(name, _)| name == prop)
            .map(|(_, value)| value.clone())
            .unwrap_or_default()
    }

    pub(crate) fn style_set(&mut self, node_id: NodeId, prop: &str, value: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("style target is not an element".into()))?;
        let mut decls = parse_style_declarations(element.attrs.get("style").map(String::as_str));
        if let Some(pos) = decls.iter().position(|(name, _)| name == prop) {
            if value.is_empty() {
                decls.remove(pos);
            } else {
                decls[pos].1 = value.to_string();
            }
        } else if !value.is_empty() {
            decls.push((prop.to_string(), value.to_string()));
        }
        element
            .attrs
            .insert("style".to_string(), serialize_style_declarations(&decls));
        Ok(())
    }

    pub(crate) fn by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index
            .get(id)
            .and_then(|entries| entries.first().copied())
    }

    pub(crate) fn collect_elements_dfs(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        if self.element(node_id).is_some() {
            out.push(node_id);
        }
        for child in &self.nodes[node_id.0].children {
            self.collect_elements_dfs(*child, out);
        }
    }

    pub(crate) fn all_elements(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_elements_dfs(self.root, &mut out);
        out
    }

    pub(crate) fn elements_by_class(&self, class_name: &str) -> Vec<NodeId> {
        self.all_elements()
            .into_iter()
            .filter(|id| self.class_contains(*id, class_name))
            .collect()
    }

    pub(crate) fn elements_by_tag(&self, tag_name: &str) -> Vec<NodeId> {
        self.all_elements()
            .into_iter()
            .filter(|id| {
                self.tag_name(*id)
                    .map(|tag| tag.eq_ignore_ascii_case(tag_name))
                    .unwrap_or(false)
            })
            .collect()
    }

    pub(crate) fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        match parse_selector(selector)? {
            Selector::Id(id) => Ok(self
                .id_index
                .get(&id)
                .cloned()
                .unwrap_or_default()),
            Selector::Compound { tag, classes } => Ok(self
                .all_elements()
                .into_iter()
                .filter(|id| {
                    let tag_matches = tag.as_deref().map_or(true, |tag| {
                        self.tag_name(*id)
                            .map(|name| name.eq_ignore_ascii_case(tag))
                            .unwrap_or(false)
                    });
                    tag_matches && classes.iter().all(|class| self.class_contains(*id, class))
                })
                .collect()),
        }
    }

    pub(crate) fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }

    pub(crate) fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    /// Form controls (`input`, `textarea`, `select`) under `form`, in
    /// document order.
    pub(crate) fn form_controls(&self, form: NodeId) -> Vec<NodeId> {
        let mut elements = Vec::new();
        self.collect_elements_dfs(form, &mut elements);
        elements
            .into_iter()
            .filter(|id| {
                self.tag_name(*id)
                    .map(|tag| matches!(tag, "input" | "textarea" | "select"))
                    .unwrap_or(false)
            })
            .filter(|id| *id != form)
            .collect()
    }

    /// Nearest `form` ancestor, or `node_id` itself when it is a form.
    pub(crate) fn owning_form(&self, node_id: NodeId) -> Option<NodeId> {
        let mut current = Some(node_id);
        while let Some(id) = current {
            if self
                .tag_name(id)
                .map(|tag| tag.eq_ignore_ascii_case("form"))
                .unwrap_or(false)
            {
                return Some(id);
            }
            current = self.nodes[id.0].parent;
        }
        None
    }

    pub(crate) fn ensure_head(&mut self) -> NodeId {
        if let Some(head) = self.elements_by_tag("head").first() {
            return *head;
        }
        let parent = self
            .elements_by_tag("html")
            .first()
            .copied()
            .unwrap_or(self.root);
        let head = self.create_element(parent, "head");
        self.insert_first(head, parent);
        head
    }

    pub(crate) fn ensure_body(&mut self) -> NodeId {
        if let Some(body) = self.elements_by_tag("body").first() {
            return *body;
        }
        let parent = self
            .elements_by_tag("html")
            .first()
            .copied()
            .unwrap_or(self.root);
        let loose = self.nodes[parent.0]
            .children
            .iter()
            .copied()
            .filter(|child| {
                !self
                    .tag_name(*child)
                    .map(|tag| matches!(tag, "head" | "html"))
                    .unwrap_or(false)
            })
            .collect::<Vec<_>>();
        let body = self.create_element(parent, "body");
        for child in loose {
            self.move_node(child, body);
        }
        body
    }
}
