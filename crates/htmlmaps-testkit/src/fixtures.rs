//! On-disk template fixtures
//!
//! Writes small template trees to a directory so filesystem-backed engines
//! and the CLI can be exercised end to end.

use std::path::{Path, PathBuf};

/// Shared page skeleton; pages extend it and fill its blocks
pub const LAYOUT_TPL: &str = "\
<!doctype html>
<html>
<head><title>{% block title %}Untitled{% endblock %}</title></head>
<body>
{% block content %}{% endblock %}
</body>
</html>
";

/// Static landing page
pub const MAIN_TPL: &str = "\
{% extends layout.tpl %}
{% block title %}Home{% endblock %}
{% block content %}<h1>Welcome</h1>{% endblock %}
";

/// Post listing over `posts`, one partial per post
pub const POSTS_TPL: &str = "\
{% extends layout.tpl %}
{% block title %}Posts{% endblock %}
{% block content %}
<p>Last updated {%= lastUpdated %}</p>
{% for post in posts %}
  {% render partials/post.tpl %}
{% end %}
{% endblock %}
";

/// One post, reading the loop binding of its includer
pub const POST_PARTIAL_TPL: &str = "\
<article>
  <h2>{%= post.name %}</h2>
  <p>{%= post.body %}</p>
</article>
";

/// View context for `posts.tpl`
pub const POSTS_CONTEXT_JSON: &str = r#"{
  "lastUpdated": "Sat Sep 21 2019",
  "posts": [
    {"name": "Clickbait title", "body": "filler filler ad ad filler filler filler ad"},
    {"name": "Which character are you?", "body": "answer: none of them"}
  ]
}
"#;

/// Paths of a site written by [`write_blog_site`]
#[derive(Debug, Clone)]
pub struct BlogSite {
    /// Directory holding `views/` and `context.json`
    pub root: PathBuf,
    /// Template root
    pub views: PathBuf,
    /// View context for `posts.tpl`
    pub context: PathBuf,
}

/// Write `templates` under `root`, creating intermediate directories
///
/// Names may contain `/` to place templates in subfolders.
pub fn write_templates(root: &Path, templates: &[(&str, &str)]) -> std::io::Result<()> {
    for (name, source) in templates {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, source)?;
    }
    Ok(())
}

/// Write the blog fixture (`views/` templates plus `context.json`) into `dir`
pub fn write_blog_site(dir: &Path) -> std::io::Result<BlogSite> {
    let views = dir.join("views");
    write_templates(
        &views,
        &[
            ("layout.tpl", LAYOUT_TPL),
            ("main.tpl", MAIN_TPL),
            ("posts.tpl", POSTS_TPL),
            ("partials/post.tpl", POST_PARTIAL_TPL),
        ],
    )?;

    let context = dir.join("context.json");
    std::fs::write(&context, POSTS_CONTEXT_JSON)?;

    Ok(BlogSite {
        root: dir.to_path_buf(),
        views,
        context,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temp_dir_in_workspace;

    #[test]
    fn test_write_templates_creates_subfolders() {
        let temp = temp_dir_in_workspace();
        write_templates(temp.path(), &[("a/b/c.tpl", "deep"), ("top.tpl", "top")]).unwrap();

        assert_eq!(
            std::fs::read_to_string(temp.path().join("a/b/c.tpl")).unwrap(),
            "deep"
        );
        assert!(temp.path().join("top.tpl").is_file());
    }

    #[test]
    fn test_write_blog_site_layout() {
        let temp = temp_dir_in_workspace();
        let site = write_blog_site(temp.path()).unwrap();

        assert_eq!(site.root, temp.path());
        for name in ["layout.tpl", "main.tpl", "posts.tpl", "partials/post.tpl"] {
            assert!(site.views.join(name).is_file(), "missing {}", name);
        }
        assert!(site.context.is_file());
    }
}
