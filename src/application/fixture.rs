//! Sample project used by application-layer tests

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::domain::entities::Manifest;

pub const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <link rel="stylesheet" href="node_modules/animate.css/animate.min.css">
    <link rel="stylesheet" href="src/styles/styles.scss">
  </head>
  <body>
    <h1>  Shop   front </h1>
    <!-- build:js -->
    <script src="node_modules/jquery/dist/jquery.min.js"></script>
    <script src="src/scripts/script.js"></script>
    <!-- endbuild -->
  </body>
</html>
"#;

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A project that builds with the default configuration.
pub fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write(root, "index.html", TEMPLATE);
    write(root, "src/styles/styles.scss", "$accent: #ff0000;\n.title {\n  color: $accent;\n}\n");
    write(root, "src/styles/buttons.scss", ".btn {\n  .icon { margin: 0px; }\n}\n");
    write(root, "src/styles/_mixins.scss", "@mixin hidden { display: none; }\n");
    write(
        root,
        "src/scripts/script.js",
        "// entry\n$(function () {\n  $('.slider').slick({ dots: true });\n});\n",
    );
    write(root, "src/scripts/menu.js", "function toggle(menu) {\n  return !menu;\n}\n");
    write(root, "fonts/roboto.woff", "woff");
    write(root, "images/icons/cart.svg", "<svg/>");

    for pattern in Manifest::default_libraries().patterns() {
        if pattern.contains('*') {
            let base = pattern.trim_end_matches("/**/*");
            write(root, &format!("node_modules/{base}/slick.woff"), "font");
        } else {
            write(root, &format!("node_modules/{pattern}"), &format!("/* {pattern} */"));
        }
    }

    dir
}
