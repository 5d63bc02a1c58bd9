//! Small element helpers over `kuchiki` nodes, covering the slice of the
//! browser DOM the page scripts touch: attributes, `classList`, `textContent`,
//! `element.style` and form-control values.
//!
//! Every helper is a no-op (or returns `None`/`false`) on non-element nodes.

use kuchiki::NodeRef;

pub fn local_name(node: &NodeRef) -> Option<String> {
    node.as_element().map(|el| el.name.local.as_ref().to_string())
}

pub fn get_attr(node: &NodeRef, name: &str) -> Option<String> {
    let el = node.as_element()?;
    el.attributes.borrow().get(name).map(|s| s.to_string())
}

pub fn has_attr(node: &NodeRef, name: &str) -> bool {
    node.as_element()
        .map(|el| el.attributes.borrow().contains(name))
        .unwrap_or(false)
}

pub fn set_attr(node: &NodeRef, name: &str, value: &str) -> bool {
    let Some(el) = node.as_element() else {
        return false;
    };
    el.attributes.borrow_mut().insert(name, value.to_string());
    true
}

pub fn remove_attr(node: &NodeRef, name: &str) -> bool {
    let Some(el) = node.as_element() else {
        return false;
    };
    el.attributes.borrow_mut().remove(name).is_some()
}

pub fn has_class(node: &NodeRef, class: &str) -> bool {
    get_attr(node, "class")
        .map(|v| v.split_ascii_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

pub fn add_class(node: &NodeRef, class: &str) {
    if node.as_element().is_none() || has_class(node, class) {
        return;
    }
    let mut classes: Vec<String> = get_attr(node, "class")
        .map(|v| v.split_ascii_whitespace().map(str::to_string).collect())
        .unwrap_or_default();
    classes.push(class.to_string());
    set_attr(node, "class", &classes.join(" "));
}

pub fn remove_class(node: &NodeRef, class: &str) {
    let Some(current) = get_attr(node, "class") else {
        return;
    };
    let kept: Vec<&str> = current
        .split_ascii_whitespace()
        .filter(|c| *c != class)
        .collect();
    set_attr(node, "class", &kept.join(" "));
}

/// Replaces all children with a single text node, like assigning `textContent`.
pub fn set_text_content(node: &NodeRef, text: &str) {
    for child in node.children().collect::<Vec<_>>() {
        child.detach();
    }
    if !text.is_empty() {
        node.append(NodeRef::new_text(text));
    }
}

/// Reads one declaration from the inline `style` attribute.
pub fn style_property(node: &NodeRef, property: &str) -> Option<String> {
    let style = get_attr(node, "style")?;
    parse_style(&style)
        .into_iter()
        .find(|(name, _)| same_property(name, property))
        .map(|(_, value)| value)
}

/// Sets one declaration in the inline `style` attribute, keeping the others.
/// An existing declaration of the same property is replaced in place.
pub fn set_style_property(node: &NodeRef, property: &str, value: &str) -> bool {
    if node.as_element().is_none() {
        return false;
    }
    let mut decls = get_attr(node, "style")
        .map(|s| parse_style(&s))
        .unwrap_or_default();
    match decls
        .iter_mut()
        .find(|(name, _)| same_property(name, property))
    {
        Some(existing) => existing.1 = value.to_string(),
        None => decls.push((property.to_string(), value.to_string())),
    }
    set_attr(node, "style", &serialize_style(&decls))
}

fn parse_style(style: &str) -> Vec<(String, String)> {
    split_outside_parens(style, ';')
        .into_iter()
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim();
            let value = value.trim();
            if name.is_empty() {
                return None;
            }
            let name = if is_custom_property(name) {
                name.to_string()
            } else {
                name.to_ascii_lowercase()
            };
            Some((name, value.to_string()))
        })
        .collect()
}

// Custom properties (`--name`) are case-sensitive; standard ones are not.
fn is_custom_property(name: &str) -> bool {
    name.starts_with("--")
}

fn same_property(a: &str, b: &str) -> bool {
    if is_custom_property(a) || is_custom_property(b) {
        a == b
    } else {
        a.eq_ignore_ascii_case(b)
    }
}

fn serialize_style(decls: &[(String, String)]) -> String {
    decls
        .iter()
        .map(|(name, value)| format!("{name}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}

// `url(data:image/png;base64,...)` and quoted strings may contain `;`.
fn split_outside_parens(s: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0usize;
    for (i, ch) in s.char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(ch),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, c) if c == sep && depth == 0 => {
                parts.push(&s[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

/// The value a form control displays. For `<select>` this is the selected
/// option's value, or the empty string when no option is marked selected,
/// matching `select.value` after it was set to a value no option carries.
pub fn control_value(node: &NodeRef) -> Option<String> {
    if local_name(node).as_deref() != Some("select") {
        return get_attr(node, "value");
    }
    let options: Vec<NodeRef> = node
        .select("option")
        .map(|nodes| nodes.map(|n| n.as_node().clone()).collect())
        .unwrap_or_default();
    if options.is_empty() {
        return None;
    }
    Some(
        options
            .iter()
            .find(|o| has_attr(o, "selected"))
            .map(option_value)
            .unwrap_or_default(),
    )
}

/// Sets the displayed value of a form control. For `<select>` the matching
/// option becomes the only selected one, and a value no option carries
/// leaves none selected; other controls get a `value` attribute.
pub fn set_control_value(node: &NodeRef, value: &str) {
    if local_name(node).as_deref() != Some("select") {
        set_attr(node, "value", value);
        return;
    }
    if let Ok(options) = node.select("option") {
        for option in options {
            let option = option.as_node();
            if option_value(option) == value {
                set_attr(option, "selected", "");
            } else {
                remove_attr(option, "selected");
            }
        }
    }
}

fn option_value(option: &NodeRef) -> String {
    get_attr(option, "value").unwrap_or_else(|| option.text_contents().trim().to_string())
}
