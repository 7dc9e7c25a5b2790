//! Preview document composition.
//!
//! Builds the single self-contained HTML document a preview window displays:
//! a `<style>` block with the snapshot's CSS, the HTML literal as body
//! content, and the untrusted JS inside a guard that converts any runtime
//! fault into a visible error banner inside the previewed document itself.

use crate::app::source_document::{SourceBuffer, SourceDocument};

/// Immutable point-in-time copy of the source buffer used to drive exactly
/// one render pass. The renderer never observes a buffer update
/// mid-construction because it only ever works from a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSnapshot {
    document: SourceDocument,
    revision: u64,
}

impl PreviewSnapshot {
    /// Copy the buffer's current value and revision.
    pub fn take(buffer: &SourceBuffer) -> Self {
        Self {
            document: buffer.get().clone(),
            revision: buffer.revision(),
        }
    }

    #[cfg(test)]
    pub fn for_tests(document: SourceDocument, revision: u64) -> Self {
        Self { document, revision }
    }

    pub fn document(&self) -> &SourceDocument {
        &self.document
    }

    /// Buffer revision this snapshot was taken at. Used by the renderer to
    /// skip idempotent re-renders and keep render order monotonic.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Base styling applied before the user's CSS: a neutral body reset plus the
/// error banner class the script guard uses.
const BASE_STYLE: &str = "\
body { margin: 0; padding: 8px; font-family: sans-serif; }\n\
.preview-error-banner {\n\
  position: fixed; top: 10px; left: 10px;\n\
  background-color: rgba(0,0,0,0.8); color: red;\n\
  padding: 10px; border-radius: 5px;\n\
  font-family: monospace; z-index: 2147483647;\n\
}";

/// Neutralize script-terminator sequences so user text cannot close the
/// wrapping `<script>`/`<style>` elements early and escape the guard.
fn escape_terminator(text: &str, tag: &str) -> String {
    let needle = format!("</{}", tag);
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    loop {
        match rest.to_ascii_lowercase().find(&needle) {
            Some(idx) => {
                out.push_str(&rest[..idx]);
                out.push_str("<\\/");
                out.push_str(&rest[idx + 2..idx + needle.len()]);
                rest = &rest[idx + needle.len()..];
            }
            None => {
                out.push_str(rest);
                break;
            }
        }
    }
    out
}

/// Compose the full preview document for one snapshot.
///
/// The script guard intercepts any fault raised by the untrusted JS and
/// appends an error banner to the previewed document's own body, never the
/// host application, so a throwing script cannot abort rendering of the
/// surrounding markup.
pub fn compose_preview_document(snapshot: &PreviewSnapshot) -> String {
    let doc = snapshot.document();
    let css = escape_terminator(&doc.css, "style");
    let js = escape_terminator(&doc.js, "script");

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <style>\n{base_style}\n{css}\n</style>\n\
         </head>\n\
         <body>\n\
         {html}\n\
         <script>\n\
         try {{\n\
         {js}\n\
         }} catch (e) {{\n\
           console.error('Error in preview script:', e);\n\
           var errorDiv = document.createElement('div');\n\
           errorDiv.className = 'preview-error-banner';\n\
           errorDiv.textContent = 'Error in preview: ' + e.message;\n\
           document.body.appendChild(errorDiv);\n\
         }}\n\
         </script>\n\
         </body>\n\
         </html>\n",
        base_style = BASE_STYLE,
        css = css,
        html = doc.html,
        js = js,
    )
}

/// Compose the exportable document: same structure as the preview but with
/// the script unguarded, since the artifact is the user's own file.
pub fn compose_export_document(document: &SourceDocument) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <style>\n{css}\n</style>\n\
         </head>\n\
         <body>\n\
         {html}\n\
         <script>\n{js}\n</script>\n\
         </body>\n\
         </html>\n",
        css = document.css,
        html = document.html,
        js = document.js,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminator_escape_is_case_insensitive() {
        assert_eq!(
            escape_terminator("a</script>b</SCRIPT>c", "script"),
            "a<\\/script>b<\\/SCRIPT>c"
        );
        assert_eq!(escape_terminator("no tags here", "script"), "no tags here");
    }
}
