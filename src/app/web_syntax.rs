//! Syntax highlighters for the three editor tabs.
//!
//! Small hand-rolled `egui_code_editor` syntaxes for HTML, CSS and
//! JavaScript. Keyword lists are deliberately compact: enough for readable
//! highlighting of AI-generated snippets, not a full grammar.

use std::collections::BTreeSet;

use egui_code_editor::Syntax;

/// HTML: common tag and attribute names.
pub fn html_syntax() -> Syntax {
    let keywords: BTreeSet<&str> = [
        "html", "head", "body", "div", "span", "p", "a", "img", "ul", "ol", "li", "table", "tr",
        "td", "th", "form", "input", "button", "select", "option", "textarea", "label", "h1",
        "h2", "h3", "h4", "h5", "h6", "header", "footer", "nav", "main", "section", "article",
        "aside", "script", "style", "link", "meta", "title", "canvas", "video", "audio",
    ]
    .into();

    let special: BTreeSet<&str> = [
        "class", "id", "href", "src", "alt", "type", "value", "name", "placeholder", "style",
        "onclick", "onchange", "oninput", "disabled", "checked", "selected",
    ]
    .into();

    Syntax::new("html")
        .with_comment_multiline(["<!--", "-->"])
        .with_keywords(keywords)
        .with_special(special)
}

/// CSS: properties as keywords, common values as specials.
pub fn css_syntax() -> Syntax {
    let keywords: BTreeSet<&str> = [
        "color", "background", "background-color", "margin", "padding", "border", "display",
        "position", "top", "left", "right", "bottom", "width", "height", "font-family",
        "font-size", "font-weight", "text-align", "flex", "flex-direction", "justify-content",
        "align-items", "grid", "gap", "border-radius", "box-shadow", "opacity", "transition",
        "transform", "animation", "overflow", "cursor", "z-index",
    ]
    .into();

    let special: BTreeSet<&str> = [
        "none", "block", "inline", "inline-block", "absolute", "relative", "fixed", "sticky",
        "center", "auto", "hidden", "bold", "italic", "pointer", "hover", "active", "focus",
        "root", "important",
    ]
    .into();

    Syntax::new("css")
        .with_comment_multiline(["/*", "*/"])
        .with_keywords(keywords)
        .with_special(special)
}

/// JavaScript: language keywords plus a handful of DOM globals.
pub fn js_syntax() -> Syntax {
    let keywords: BTreeSet<&str> = [
        "var", "let", "const", "function", "return", "if", "else", "for", "while", "do",
        "switch", "case", "break", "continue", "new", "delete", "typeof", "instanceof", "in",
        "of", "try", "catch", "finally", "throw", "class", "extends", "super", "this", "async",
        "await", "yield", "import", "export", "default",
    ]
    .into();

    let types: BTreeSet<&str> = [
        "Array", "Object", "String", "Number", "Boolean", "Date", "Math", "JSON", "Promise",
        "Map", "Set", "RegExp", "Error",
    ]
    .into();

    let special: BTreeSet<&str> = [
        "document", "window", "console", "true", "false", "null", "undefined", "NaN",
        "setTimeout", "setInterval", "addEventListener", "querySelector", "getElementById",
    ]
    .into();

    Syntax::new("javascript")
        .with_comment("//")
        .with_comment_multiline(["/*", "*/"])
        .with_keywords(keywords)
        .with_types(types)
        .with_special(special)
}
