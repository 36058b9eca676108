use anyhow::{Context, Result, anyhow};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "templates"]
struct Templates;

fn get_string(path: &str) -> Result<String> {
    let file =
        Templates::get(path).ok_or_else(|| anyhow!("embedded template `{}` missing", path))?;
    std::str::from_utf8(file.data.as_ref())
        .with_context(|| format!("decoding embedded template `{}`", path))
        .map(|value| value.to_owned())
}

fn render(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut rendered = template.to_owned();
    for (key, value) in substitutions {
        rendered = rendered.replace(&format!("{{{{{key}}}}}"), value);
    }
    rendered
}

/// Include-guard header body for `name` (extension already stripped).
pub fn header(name: &str) -> Result<String> {
    let guard = name.to_uppercase();
    Ok(render(&get_string("header.h")?, &[("guard", &guard)]))
}

/// GNU Makefile body compiling `src/*.c` into `target`.
pub fn makefile(target: &str) -> Result<String> {
    Ok(render(&get_string("Makefile")?, &[("target", target)]))
}

/// Python module stub documenting `name`, stamped with the current date.
pub fn python_stub(name: &str, date: &str, year: &str) -> Result<String> {
    Ok(render(
        &get_string("stub.py")?,
        &[("name", name), ("date", date), ("year", year)],
    ))
}
