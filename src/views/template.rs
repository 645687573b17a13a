use crate::utils::AppError;

/// Named values available to a template. `None` means the field is known
/// but unset for this render.
pub type Fields<'a> = [(&'static str, Option<&'a str>)];

/// Renders `{{ field }}` substitutions and `{% if field %}...{% endif %}`
/// blocks. Blocks do not nest. Substituted values are HTML-escaped.
pub fn render(source: &str, fields: &Fields<'_>) -> Result<String, AppError> {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    let mut in_block = false;
    let mut skipping = false;

    loop {
        let next = match (rest.find("{{"), rest.find("{%")) {
            (Some(v), Some(t)) if v < t => Some((v, Tag::Var)),
            (Some(_), Some(t)) => Some((t, Tag::Block)),
            (Some(v), None) => Some((v, Tag::Var)),
            (None, Some(t)) => Some((t, Tag::Block)),
            (None, None) => None,
        };

        let Some((start, tag)) = next else {
            if in_block {
                return Err(AppError::RenderError("missing {% endif %}".to_string()));
            }
            out.push_str(rest);
            return Ok(out);
        };

        if !skipping {
            out.push_str(&rest[..start]);
        }

        let body = &rest[start + 2..];
        let end = body
            .find(tag.closer())
            .ok_or_else(|| AppError::RenderError(format!("unterminated tag near `{}`", snippet(&rest[start..]))))?;
        let inner = body[..end].trim();
        rest = &body[end + 2..];

        match tag {
            Tag::Var => {
                let value = lookup(fields, inner)?;
                if !skipping {
                    out.push_str(&escape_html(value.unwrap_or("")));
                }
            }
            Tag::Block => {
                let words: Vec<&str> = inner.split_whitespace().collect();
                match words.as_slice() {
                    ["if", field] => {
                        if in_block {
                            return Err(AppError::RenderError("nested {% if %} blocks are not supported".to_string()));
                        }
                        in_block = true;
                        skipping = !lookup(fields, field)?.map_or(false, |v| !v.is_empty());
                    }
                    ["endif"] => {
                        if !in_block {
                            return Err(AppError::RenderError("{% endif %} without {% if %}".to_string()));
                        }
                        in_block = false;
                        skipping = false;
                    }
                    _ => {
                        return Err(AppError::RenderError(format!("unsupported tag `{}`", inner)));
                    }
                }
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Tag {
    Var,
    Block,
}

impl Tag {
    fn closer(self) -> &'static str {
        match self {
            Tag::Var => "}}",
            Tag::Block => "%}",
        }
    }
}

fn lookup<'a>(fields: &Fields<'a>, name: &str) -> Result<Option<&'a str>, AppError> {
    fields
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| *value)
        .ok_or_else(|| AppError::RenderError(format!("unknown field `{}`", name)))
}

fn snippet(s: &str) -> &str {
    match s.char_indices().nth(20) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
