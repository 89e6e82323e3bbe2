//! Reusable project content

/// Template with every marker the default rewrite rules expect
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <link rel="stylesheet" href="node_modules/animate.css/animate.min.css">
    <link rel="stylesheet" href="node_modules/slick-carousel/slick/slick.css">
    <link rel="stylesheet" href="src/styles/styles.scss">
  </head>
  <body>
    <h1>Shop front</h1>
    <img src="images/logo.svg" alt="logo">
    <!-- build:js -->
    <script src="node_modules/jquery/dist/jquery.min.js"></script>
    <script src="node_modules/wowjs/dist/wow.min.js"></script>
    <script src="src/scripts/script.js"></script>
    <!-- endbuild -->
  </body>
</html>
"#;

pub const STYLES_SCSS: &str = r#"@use "colors";

.title {
  color: colors.$accent;
}
"#;

pub const COLORS_SCSS: &str = "$accent: #336699;\n";

pub const BUTTONS_SCSS: &str = r#".btn {
  padding: 4px 8px;

  &:hover {
    opacity: 0.8;
  }
}
"#;

pub const SCRIPT_JS: &str = r#"// Slider setup
$(function () {
  var options = { dots: true, arrows: false };
  $('.slider').slick(options);
  new WOW().init();
});
"#;

pub const MENU_JS: &str = r#"/* Menu toggle */
function toggleMenu(menu) {
  menu.classList.toggle("open");
}
"#;

/// Files under `node_modules/` the default manifest publishes
pub const LIBRARY_FILES: &[&str] = &[
    "jquery/dist/jquery.min.js",
    "jquery-ui/dist/jquery-ui.min.js",
    "jquery-ui-css/jquery-ui.min.css",
    "slick-carousel/slick/slick.min.js",
    "slick-carousel/slick/slick.css",
    "slick-carousel/slick/slick-theme.css",
    "slick-carousel/slick/fonts/slick.woff",
    "slick-carousel/slick/fonts/slick.ttf",
    "slick-carousel/slick/ajax-loader.gif",
    "magnific-popup/dist/jquery.magnific-popup.min.js",
    "magnific-popup/dist/magnific-popup.css",
    "animate.css/animate.min.css",
    "hover.css/css/hover-min.css",
    "wowjs/dist/wow.min.js",
];

/// Published script references, in manifest order
pub const INJECTED_SCRIPTS: &[&str] = &[
    "libs/jquery/dist/jquery.min.js",
    "libs/jquery-ui/dist/jquery-ui.min.js",
    "libs/slick-carousel/slick/slick.min.js",
    "libs/magnific-popup/dist/jquery.magnific-popup.min.js",
    "libs/wowjs/dist/wow.min.js",
];
