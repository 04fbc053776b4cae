use super::types::{Definition, Rule, SizeRule};
use crate::schema::ExtraFields;
use colored::*;

fn node_header(head: &str) -> String {
    let padding = 16usize.saturating_sub(head.len() + 4);
    let mut header = format!("  {}  ", head);
    for _ in 0..padding {
        header.push(' ');
    }

    header.on_green().black().to_string()
}

fn describe(definition: &Definition) -> String {
    let mut parts = vec![definition.kind.map_or("any", |kind| kind.name()).to_string()];

    parts.push(match definition.required {
        true => "required".to_string(),
        false => "optional".to_string(),
    });

    if definition.fields.is_some() && definition.extra == ExtraFields::Forbid {
        parts.push("no extra fields".to_string());
    }

    parts.join(", ")
}

fn size(size: &SizeRule) -> String {
    match size.is_blocking() {
        true => format!("{} (blocking)", size.size()),
        false => size.size().to_string(),
    }
}

fn rule(rule: &Rule) -> String {
    match rule {
        Rule::MinLength(n) => format!("min_length {}", n),
        Rule::MaxLength(n) => format!("max_length {}", n),
        Rule::Pattern(pattern) => format!("pattern {}", pattern),
        Rule::OneOf(options) => format!(
            "one_of {}",
            options
                .iter()
                .map(|option| option.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ),
        Rule::MinSize(s) => format!("min_size {}", size(s)),
        Rule::MaxSize(s) => format!("max_size {}", size(s)),
        Rule::Min(n) => format!("min {}", n),
        Rule::Max(n) => format!("max {}", n),
        Rule::Precision(n) => format!("precision {}", n),
        Rule::Email => "email".to_string(),
        Rule::Url => "url".to_string(),
        Rule::Uuid => "uuid".to_string(),
        Rule::Xid => "xid".to_string(),
        Rule::Ipv4 => "ipv4".to_string(),
        Rule::Ipv6 => "ipv6".to_string(),
        Rule::Base64 => "base64".to_string(),
        Rule::Json => "json".to_string(),
        Rule::LowerCase => "lower_case".to_string(),
        Rule::UpperCase => "upper_case".to_string(),
    }
}

fn render_node(name: &str, definition: &Definition, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    lines.push(format!("{}{}  {}", indent, node_header(name), describe(definition)));

    definition
        .rules
        .iter()
        .for_each(|r| lines.push(format!("{}    - {}", indent, rule(r))));

    if let Some(fields) = &definition.fields {
        fields
            .iter()
            .for_each(|(field, child)| render_node(field, child, depth + 1, lines));
    }

    if let Some(items) = &definition.items {
        render_node("[]", items, depth + 1, lines);
    }
}

pub fn render_definition(definition: &Definition) -> Vec<String> {
    let mut lines = vec![];
    render_node("$", definition, 0, &mut lines);
    lines
}

pub fn print_definition(definition: &Definition) {
    render_definition(definition)
        .iter()
        .for_each(|line| println!("{}", line));
}
