use handlebars::{handlebars_helper, Handlebars};
use include_dir::{include_dir, Dir};
use serde_json::Value;
use tracing::debug;

static TEMPLATE_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

pub fn get_handlebars() -> Handlebars<'static> {
    let mut handlebars = Handlebars::new();

    handlebars_helper!(stringeq: |s1: String, s2: String| s1.eq(&s2));
    handlebars.register_helper("stringeq", Box::new(stringeq));

    handlebars_helper!(is_empty: |v: Value| {
        match v {
            serde_json::Value::Array(arr) => arr.is_empty(),
            _ => false,
        }
    });
    handlebars.register_helper("is_empty", Box::new(is_empty));

    handlebars
}

/// Handlebars registry with every embedded page template registered under its
/// file stem, so templates double as partials (`{{> feedback_panel}}`).
pub fn get_page_templates() -> anyhow::Result<Handlebars<'static>> {
    let mut handlebars = get_handlebars();

    for file in TEMPLATE_DIR.files() {
        let path = file.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("hbs") {
            continue;
        }
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid template name: {:?}", path))?;
        let source = file
            .contents_utf8()
            .ok_or_else(|| anyhow::anyhow!("Template {:?} is not valid UTF-8", path))?;

        debug!("Registering template: {}", name);
        handlebars.register_template_string(name, source)?;
    }

    Ok(handlebars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn handlebars_helper_is_empty_only_matches_empty_arrays() {
        let handlebars = get_handlebars();
        let template = r#"{{#if (is_empty items)}}none{{else}}some{{/if}}"#;
        let res = handlebars
            .render_template(template, &json!({ "items": [] }))
            .expect("This to render");
        assert_eq!(res, "none");
        let res = handlebars
            .render_template(template, &json!({ "items": [1] }))
            .expect("This to render");
        assert_eq!(res, "some");
    }

    #[test]
    fn registered_helpers() {
        let handlebars = get_handlebars();
        assert!(handlebars.get_helper("stringeq").is_some());
        assert!(handlebars.get_helper("is_empty").is_some());
        assert!(handlebars.get_helper("exists").is_none());
        assert!(handlebars.get_helper("isnull").is_none());
    }

    #[test]
    fn handlebars_helper_stringeq_can_render() {
        let handlebars = get_handlebars();
        let res = handlebars
            .render_template(
                r#"{{#if (stringeq kind "checkbox")}}checked{{/if}}"#,
                &json!({ "kind": "checkbox" }),
            )
            .expect("This to render");
        assert_eq!(res, "checked");
    }

    #[test]
    fn page_templates_are_registered() {
        let handlebars = get_page_templates().expect("templates to register");
        for name in ["layout", "edit_page", "edit_form", "field", "feedback_panel", "list_page", "error_page"] {
            assert!(handlebars.has_template(name), "missing template {}", name);
        }
    }
}
