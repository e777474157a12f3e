use super::*;

const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|name| *name == tag)
}

fn decode_character_references(src: &str) -> String {
    if !src.contains('&') {
        return src.to_string();
    }
    let mut out = String::new();
    let mut rest = src;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        let mut replaced = false;
        for (entity, ch) in [
            ("&amp;", '&'),
            ("&lt;", '<'),
            ("&gt;", '>'),
            ("&quot;", '"'),
            ("&#39;", '\''),
            ("&nbsp;", '\u{a0}'),
        ] {
            if let Some(tail) = rest.strip_prefix(entity) {
                out.push(ch);
                rest = tail;
                replaced = true;
                break;
            }
        }
        if !replaced {
            out.push('&');
            rest = &rest[1..];
        }
    }
    out.push_str(rest);
    out
}

struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    fn new(src: &str) -> Self {
        Self {
            chars: src.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn starts_with(&self, prefix: &str) -> bool {
        prefix
            .chars()
            .enumerate()
            .all(|(offset, expected)| self.peek_at(offset) == Some(expected))
    }

    fn skip(&mut self, count: usize) {
        self.pos += count;
    }

    fn skip_whitespace(&mut self) {
        while self.peek().map(|ch| ch.is_whitespace()).unwrap_or(false) {
            self.pos += 1;
        }
    }

    fn take_until(&mut self, stop: &str) -> Option<String> {
        let mut out = String::new();
        while self.pos < self.chars.len() {
            if self.starts_with(stop) {
                self.skip(stop.chars().count());
                return Some(out);
            }
            out.push(self.chars[self.pos]);
            self.pos += 1;
        }
        None
    }

    fn take_name(&mut self) -> String {
        let mut out = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == ':' {
                out.push(ch);
                self.pos += 1;
            } else {
                break;
            }
        }
        out
    }
}

fn parse_attrs(cursor: &mut Cursor) -> Result<(Vec<(String, String)>, bool)> {
    let mut attrs = Vec::new();
    loop {
        cursor.skip_whitespace();
        match cursor.peek() {
            None => return Err(Error::HtmlParse("unterminated tag".into())),
            Some('>') => {
                cursor.bump();
                return Ok((attrs, false));
            }
            Some('/') if cursor.peek_at(1) == Some('>') => {
                cursor.skip(2);
                return Ok((attrs, true));
            }
            _ => {}
        }
        let name = cursor.take_name();
        if name.is_empty() {
            return Err(Error::HtmlParse(format!(
                "unexpected character in tag at offset {}",
                cursor.pos
            )));
        }
        cursor.skip_whitespace();
        if cursor.peek() != Some('=') {
            attrs.push((name.to_ascii_lowercase(), String::new()));
            continue;
        }
        cursor.bump();
        cursor.skip_whitespace();
        let value = match cursor.peek() {
            Some(quote @ ('"' | '\'')) => {
                cursor.bump();
                cursor
                    .take_until(&quote.to_string())
                    .ok_or_else(|| Error::HtmlParse(format!("unterminated attribute: {name}")))?
            }
            _ => {
                let mut out = String::new();
                while let Some(ch) = cursor.peek() {
                    if ch.is_whitespace() || ch == '>' || ch == '/' {
                        break;
                    }
                    out.push(ch);
                    cursor.pos += 1;
                }
                out
            }
        };
        attrs.push((name.to_ascii_lowercase(), decode_character_references(&value)));
    }
}

fn apply_attrs(dom: &mut Dom, node: NodeId, attrs: &[(String, String)]) -> Result<()> {
    for (name, value) in attrs {
        dom.set_attr(node, name, value)?;
        let Some(element) = dom.element_mut(node) else {
            continue;
        };
        match name.as_str() {
            "value" => element.value = value.clone(),
            "checked" => element.checked = true,
            "disabled" => element.disabled = true,
            "required" => element.required = true,
            "data-top" => {
                if let Ok(top) = value.trim().parse::<i64>() {
                    element.layout_top = top;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// Parses a small, well-formed HTML subset: tags with quoted/bare/boolean
/// attributes, void elements, comments, doctype, raw text inside
/// `script`/`style`, and basic character references. Unclosed elements are
/// implicitly closed at end of input; stray close tags are ignored.
pub(crate) fn parse_html(html: &str) -> Result<Dom> {
    let mut dom = Dom::new();
    let mut cursor = Cursor::new(html);
    let mut stack: Vec<NodeId> = vec![dom.root];

    while let Some(ch) = cursor.peek() {
        if ch != '<' {
            let mut text = String::new();
            while let Some(ch) = cursor.peek() {
                if ch == '<' {
                    break;
                }
                text.push(ch);
                cursor.pos += 1;
            }
            if !text.trim().is_empty() {
                let parent = *stack.last().unwrap_or(&dom.root);
                dom.create_text(parent, &decode_character_references(&text));
            }
            continue;
        }

        if cursor.starts_with("<!--") {
            cursor.skip(4);
            if cursor.take_until("-->").is_none() {
                return Err(Error::HtmlParse("unterminated comment".into()));
            }
            continue;
        }
        if cursor.starts_with("<!") {
            cursor.skip(2);
            if cursor.take_until(">").is_none() {
                return Err(Error::HtmlParse("unterminated doctype".into()));
            }
            continue;
        }
        if cursor.starts_with("</") {
            cursor.skip(2);
            let name = cursor.take_name().to_ascii_lowercase();
            cursor.skip_whitespace();
            if cursor.bump() != Some('>') {
                return Err(Error::HtmlParse(format!("malformed close tag: {name}")));
            }
            if let Some(depth) = stack
                .iter()
                .rposition(|node| dom.tag_name(*node) == Some(name.as_str()))
            {
                stack.truncate(depth);
            }
            continue;
        }

        cursor.bump();
        let name = cursor.take_name().to_ascii_lowercase();
        if name.is_empty() {
            return Err(Error::HtmlParse(format!(
                "expected tag name at offset {}",
                cursor.pos
            )));
        }
        let (attrs, self_closed) = parse_attrs(&mut cursor)?;
        let parent = *stack.last().unwrap_or(&dom.root);
        let node = dom.create_element(parent, &name);
        apply_attrs(&mut dom, node, &attrs)?;

        if matches!(name.as_str(), "script" | "style") && !self_closed {
            let close = format!("</{name}>");
            let raw = cursor
                .take_until(&close)
                .ok_or_else(|| Error::HtmlParse(format!("unterminated {name} element")))?;
            if !raw.trim().is_empty() {
                dom.create_text(node, &raw);
            }
            continue;
        }
        if !self_closed && !is_void_element(&name) {
            stack.push(node);
        }
    }

    Ok(dom)
}
