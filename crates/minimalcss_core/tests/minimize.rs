use indoc::indoc;
use minimalcss_core::{minimize, MinimizeError, MinimizeOptions};
use pretty_assertions::assert_eq;

fn final_css(html: &str, css: &str) -> String {
  minimize(html, css, &MinimizeOptions::default())
    .unwrap()
    .final_css
}

#[test]
fn keeps_only_selectors_present_in_the_document() {
  let html = "<html><h1>Header</h1></html>";
  let css = indoc! {r#"
    h1, h2, h3 { color: blue }
    ol, li { color: blue }
  "#};

  let output = final_css(html, css);

  assert!(output.contains("h1{"));
  for absent in ["h2", "h3", "ol{", ",ol", "li{", ",li"] {
    assert!(!output.contains(absent), "{absent} should be removed: {output}");
  }
}

#[test]
fn reduces_the_selectors() {
  let html = indoc! {r#"
    <!doctype html>
    <html>
      <head>
        <title>Example</title>
      </head>
      <body>
        <h1>Header</h1>
        <div class="ingress">
          <p>Sample text</p>
        </div>
      </body>
    </html>
  "#};
  let css = indoc! {r#"
    html { border: 0; }
    body, section { padding: 0; }
    h1, h2, h3 { color: black; }
    h1 { border: 1px solid red; }
    div.ingress p { font-weight: bold; }
    div.ingress em { font-weight: normal; }
  "#};

  let output = final_css(html, css);

  assert!(output.contains("html{"));
  assert!(output.contains("body{"));
  assert!(!output.contains("h2"));
  assert!(!output.contains("h3"));
  assert!(!output.contains("section"));
  assert!(output.contains("div.ingress p"));
  assert!(!output.contains("div.ingress em"));
}

#[test]
fn merges_rules_from_multiple_sources() {
  let html = "<html><h1>Header</h1></html>";
  let css = indoc! {r#"
    h1 { color: blue }
    h1 { font-weight: bold }
  "#};

  let output = final_css(html, css);

  assert!(output.contains("h1{"));
  assert_eq!(output.matches("h1").count(), 1);
}

#[test]
fn includes_stats_comment() {
  let html = "<html><h1>Header</h1></html>";
  let css = "h1, h2, h3 { color: blue }\nol, li { color: blue }\n";

  let output = minimize(
    html,
    css,
    &MinimizeOptions {
      include_stats_comment: true,
      ..MinimizeOptions::default()
    },
  )
  .unwrap();

  let first_line = output.final_css.lines().next().unwrap();
  assert_eq!(
    first_line,
    format!(
      "/* length before: {} length after: {} */",
      output.size_before, output.size_after
    )
  );
  assert_eq!(output.size_before, css.len());
  assert!(output.size_after < output.size_before);
}

#[test]
fn understands_media_queries() {
  let html = "<html><h1>Header</h1><a href=\"\">Link</a></html>";
  let css = indoc! {r#"
    @media only screen and (min-device-width: 414px) and (max-device-width: 736px) {
      a { color: red }
    }
    @media only screen and (min-device-width: 375px) and (max-device-width: 812px) {
      b { color: green }
    }
  "#};

  let output = final_css(html, css);

  assert!(output.contains("a{color:red}"));
  assert!(!output.contains("b{"));
  assert!(!output.contains("812px"));
}

#[test]
fn always_removes_print_media_queries() {
  let html = "<html><h1>Header</h1><a href=\"\">Link</a></html>";
  let css = "@media print { a { color: red } }";

  assert_eq!(final_css(html, css), "");
}

#[test]
fn keeps_used_font_face() {
  let html = "<html><a href=\"\" class=\"SomeSelector\">Link</a></html>";
  let css = indoc! {r#"
    @font-face {
      font-family: 'Lato';
      font-style: normal;
      font-weight: 400;
      src: local('Lato Regular'), url(https://fonts.gstatic.com/s/lato/v14/lato.woff2) format('woff2');
    }

    .SomeSelector {
      font-family: 'Lato';
    }
  "#};

  let output = final_css(html, css);

  assert!(output.contains("@font-face{"));
  assert!(output.contains(".SomeSelector{font-family:"));
}

#[test]
fn removes_unused_font_face() {
  let html = "<html><h1>Header</h1><a href=\"\">Link</a></html>";
  let css = indoc! {r#"
    @font-face {
      font-family: "Lato";
      font-style: normal;
      font-weight: 400;
    }

    div.foo {
      font-family: Lato, Helvetica;
    }
  "#};

  assert_eq!(final_css(html, css), "");
}

#[test]
fn removes_one_unused_font_face_and_keeps_one() {
  let html = "<html><h1>Header</h1><a href=\"\">Link</a></html>";
  let css = indoc! {r#"
    @font-face {
      font-family: 'Lato';
      font-style: normal;
      font-weight: 400;
    }

    @font-face {
      font-family: Elseness;
      font-style: normal;
      font-weight: 400;
    }

    a[href] {
      font-family: Foobar, 'Lato';
    }
  "#};

  let output = final_css(html, css);

  assert!(output.contains("@font-face{"));
  assert!(output.contains("a[href]{font-family:Foobar,"));
  assert!(!output.contains("Elseness"));
}

#[test]
fn keeps_used_keyframes() {
  let html = "<html><a href=\"\" class=\"SomeSelector\">Link</a></html>";
  let css = indoc! {r#"
    @keyframes RotateSlot {
      3% { margin-top: -2em }
      from { transform: rotate(0deg) }
    }

    .SomeSelector {
      animation: RotateSlot infinite 5s linear;
    }
  "#};

  let output = final_css(html, css);

  assert!(output.contains(".SomeSelector{animation:"));
  assert!(output.contains("@keyframes RotateSlot"));
}

#[test]
fn removes_keyframes_of_removed_rules() {
  let html = "<html><a href=\"\" class=\"SomeSelector\">Link</a></html>";
  let css = indoc! {r#"
    @keyframes RotateSlot {
      3% { margin-top: -2em }
      from { transform: rotate(0deg) }
    }

    never.heardof {
      animation: RotateSlot infinite 5s linear;
    }
  "#};

  assert_eq!(final_css(html, css), "");
}

#[test]
fn removes_one_unused_keyframe_and_keeps_one() {
  let html = "<html><h1>Header</h1></html>";
  let css = indoc! {r#"
    @keyframes RotateSlot {
      3% { margin-top: -2em }
      from { transform: rotate(0deg) }
    }

    @keyframes slidein {
      from { transform: translateX(0%); }
      to { transform: translateX(100%); }
    }

    h1 {
      animation-duration: 3s;
      animation-name: slidein;
    }
  "#};

  let output = final_css(html, css);

  assert!(output.contains("@keyframes slidein"));
  assert!(!output.contains("RotateSlot"));
}

#[test]
fn looks_inside_every_matched_subtree() {
  let html = indoc! {r#"
    <html>
      <div>
        <p><b>Bold</b></p>
        <p><i>Italic</i></p>
      </div>
    </html>
  "#};

  assert_eq!(final_css(html, "div p i { color: pink }"), "div p i{color:pink}");
}

#[test]
fn removes_inputs_by_type() {
  let html = indoc! {r#"
    <html>
      <body>
        <form>
          <input name="text">
          <input type="password" name="password">
        </form>
      </body>
    </html>
  "#};
  let css = indoc! {r#"
    input { color: pink }
    input[type="email"],
    input[type="password"],
    input[type="search"],
    input[type="text"] {
      -webkit-appearance: none;
    }
  "#};

  let output = final_css(html, css);

  assert!(output.contains("input{color:pink}"));
  assert!(output.contains("password"));
  assert!(!output.contains("email"));
  assert!(!output.contains("search"));
  assert!(!output.contains("type=text"));
}

#[test]
fn does_not_choke_on_escaped_colons() {
  let html = r##"<html><body><a href="#" class="hover:color-bg-accent">Link</a></body></html>"##;
  let css = r".hover\:color-bg-accent:hover { color: pink; }";

  assert_eq!(
    final_css(html, css),
    r".hover\:color-bg-accent:hover{color:pink}"
  );
}

#[test]
fn keeps_escaped_class_names() {
  let html = r#"<html><h1 class="md:title">Header</h1></html>"#;
  let css = r".md\:title { font-size: 32px; }";

  assert_eq!(final_css(html, css), r".md\:title{font-size:32px}");
}

#[test]
fn copes_with_before_and_after() {
  let html = "<html><h1>Header</h1></html>";
  let css = indoc! {r#"
    a::after { content: "→" }
    h1:after { text-decoration: underline }
    a::before, h1:before { content: "♥"; }
  "#};

  let output = final_css(html, css);

  assert!(output.contains("h1:after{text-decoration:underline}"));
  assert!(output.contains("h1:before{"));
  assert!(!output.contains("a:"));
}

#[test]
fn always_keeps_the_universal_selector() {
  let html = "<html><h1>Header</h1></html>";
  let css = indoc! {r#"
    *,
    :after,
    :before {
      box-sizing: inherit;
    }
    html, section {
      box-sizing: border-box;
    }
  "#};

  let output = final_css(html, css);

  assert!(output.contains("*,:after,:before{box-sizing:inherit}"));
  assert!(output.contains("html{box-sizing:border-box}"));
}

#[test]
fn keeps_attribute_values_with_colons() {
  let html = r#"<html><a href="javascript:void(0)">Link</a></html>"#;
  let css = r#"a[href^="javascript:"]:after { content: "!" } a[href^="mailto:"] { color: red }"#;

  let output = final_css(html, css);

  assert!(output.contains(r"a[href^=javascript\:]"));
  assert!(!output.contains("mailto"));
}

#[test]
fn keeps_sibling_selectors_with_a_matching_sibling() {
  let html = "<html><body><h1>Header</h1><p>Text</p></body></html>";
  let css = "h1 + p { margin-top: 0 } h1 ~ ul { margin-top: 0 }";

  let output = final_css(html, css);

  assert!(output.contains("h1+p"));
  assert!(!output.contains("ul"));
}

#[test]
fn keeps_license_comments_unless_asked_not_to() {
  let html = "<html><h1>Header</h1></html>";
  let css = "/*! license text */\nh1 { color: red }";

  let kept = final_css(html, css);
  assert!(kept.contains("license text"));

  let removed = minimize(
    html,
    css,
    &MinimizeOptions {
      remove_exclamation_comments: true,
      ..MinimizeOptions::default()
    },
  )
  .unwrap();
  assert_eq!(removed.final_css, "h1{color:red}");
}

#[test]
fn reports_the_selector_the_matcher_rejected() {
  let html = "<html><h1>Header</h1></html>";
  let css = indoc! {r#"
    @namespace svg url(http://www.w3.org/2000/svg);
    svg|circle { fill: red }
  "#};

  let error = minimize(html, css, &MinimizeOptions::default()).unwrap_err();

  assert!(matches!(error, MinimizeError::SelectorSyntax { .. }));
  assert_eq!(error.selector(), Some("svg|circle"));
}

#[test]
fn keeps_keyframes_used_inside_scope_and_starting_style() {
  let html = r#"<html><div class="card"><h3 class="title">Title</h3></div></html>"#;

  let scoped = indoc! {r#"
    @keyframes spin { from { transform: rotate(0deg) } to { transform: rotate(360deg) } }
    @scope (.card) { .title { animation: spin 1s } }
  "#};
  let output = final_css(html, scoped);
  assert!(output.contains("@keyframes spin"), "{output}");
  assert!(output.contains("@scope"));

  let starting = indoc! {r#"
    @keyframes spin { from { transform: rotate(0deg) } to { transform: rotate(360deg) } }
    @starting-style { .title { animation: spin 1s } }
  "#};
  let output = final_css(html, starting);
  assert!(output.contains("@keyframes spin"), "{output}");
  assert!(output.contains("@starting-style"));
}

#[test]
fn prunes_unreachable_rules_inside_scope() {
  let html = r#"<html><div class="card"><h3 class="title">Title</h3></div></html>"#;
  let css = indoc! {r#"
    @keyframes fade { from { opacity: 0 } to { opacity: 1 } }
    @scope (.card) { .subtitle { animation: fade 1s } }
    .title { color: red }
  "#};

  assert_eq!(final_css(html, css), ".title{color:red}");
}

#[test]
fn running_twice_removes_nothing_more() {
  let html = indoc! {r#"
    <html>
      <body>
        <h1 class="title">Header</h1>
        <div class="ingress"><p>Text <a href="/">link</a></p></div>
      </body>
    </html>
  "#};
  let css = indoc! {r#"
    h1.title, h2 { color: black }
    div.ingress p a:hover { color: red }
    div.ingress em { font-style: italic }
    @keyframes fade { from { opacity: 0 } to { opacity: 1 } }
    .title { animation: fade 1s }
  "#};

  let once = final_css(html, css);
  let twice = final_css(html, &once);

  assert_eq!(once, twice);
}
