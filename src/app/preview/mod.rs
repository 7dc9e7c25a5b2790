//! Sandboxed live preview.
//!
//! Each render pass displays the composed document in a webview hosted by a
//! *separate OS process*: the current executable re-invoked with `--preview`
//! arguments pointing at a staged document file in the app data directory.
//! The untrusted, AI-generated script gets full DOM access inside
//! that process while globals, timers and faults it produces stay out of the
//! host application by construction. A render fully replaces the previous
//! preview process, so no state leaks across renders.

use std::env;
use std::path::{Path, PathBuf};
use std::process::{Child, Command};

use tao::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};
use wry::WebViewBuilder;

mod compose;

pub use compose::{compose_export_document, compose_preview_document, PreviewSnapshot};

/// Window title used when none is supplied on the command line.
const DEFAULT_PREVIEW_TITLE: &str = "PromptCoder Preview";

/// Renders snapshots into a dedicated preview process.
///
/// Keeps the handle of the previously spawned process so a newer render can
/// discard the older context in full; the newest snapshot always wins.
#[derive(Debug, Default)]
pub struct PreviewRenderer {
    child: Option<Child>,
    /// Staged document file the current preview process loads from.
    document_path: Option<PathBuf>,
    last_rendered_revision: Option<u64>,
}

impl PreviewRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revision of the most recently rendered snapshot.
    pub fn last_rendered_revision(&self) -> Option<u64> {
        self.last_rendered_revision
    }

    /// Render one snapshot, replacing any previous preview.
    ///
    /// Re-rendering the snapshot revision that is already displayed is a
    /// no-op, so duplicate emissions from the notifier cannot pile up
    /// identical windows or new error state.
    pub fn render(&mut self, snapshot: &PreviewSnapshot) -> anyhow::Result<()> {
        if self.last_rendered_revision == Some(snapshot.revision()) {
            tracing::debug!(
                "Skipping re-render of already displayed revision {}",
                snapshot.revision()
            );
            return Ok(());
        }

        self.discard_current();

        let html = compose_preview_document(snapshot);
        tracing::info!(
            "Rendering preview snapshot revision {} ({} bytes)",
            snapshot.revision(),
            html.len()
        );

        let dir = preview_document_dir()?;
        let path = stage_preview_document(&html, &dir)?;
        let child = spawn_preview_process(&path, DEFAULT_PREVIEW_TITLE)?;
        self.child = Some(child);
        self.document_path = Some(path);
        self.last_rendered_revision = Some(snapshot.revision());
        Ok(())
    }

    /// Forget the last rendered revision so the next render spawns a fresh
    /// window even for an unchanged buffer.
    pub fn invalidate(&mut self) {
        self.last_rendered_revision = None;
    }

    /// Kill and reap the current preview process, if any.
    pub fn discard_current(&mut self) {
        if let Some(mut child) = self.child.take() {
            match child.kill() {
                Ok(()) => {
                    let _ = child.wait();
                    tracing::debug!("Discarded previous preview process");
                }
                Err(e) => {
                    // Already exited (e.g. the user closed the window).
                    tracing::debug!("Previous preview process not running: {}", e);
                    let _ = child.wait();
                }
            }
        }
        if let Some(path) = self.document_path.take() {
            let _ = std::fs::remove_file(&path);
        }
    }

    /// True while a preview process handle is held. The process may have
    /// exited on its own if the user closed the window.
    pub fn has_preview(&self) -> bool {
        self.child.is_some()
    }
}

impl Drop for PreviewRenderer {
    fn drop(&mut self) {
        self.discard_current();
    }
}

/// Directory staged preview documents are written to.
fn preview_document_dir() -> anyhow::Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "", "promptcoder")
        .ok_or_else(|| anyhow::anyhow!("No data directory for preview documents"))?;
    let dir = proj_dirs.data_dir().join("preview");
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Stage a composed document on disk for the preview process to load.
///
/// The document travels by file, not argv: OS argument limits (128 KiB per
/// argument on Linux, ~32K characters of command line on Windows) are easy to
/// exceed with generated markup plus the wrapper, and the command line is
/// visible to other local users. The child receives only the file path.
pub fn stage_preview_document(html: &str, dir: &Path) -> anyhow::Result<PathBuf> {
    let path = dir.join(format!("preview-{}.html", uuid::Uuid::new_v4()));
    std::fs::write(&path, html)?;
    Ok(path)
}

/// Spawn a preview process displaying the staged document.
fn spawn_preview_process(document: &Path, title: &str) -> anyhow::Result<Child> {
    let current_exe = env::current_exe()?;

    let child = Command::new(current_exe)
        .arg("--preview")
        .arg("--title")
        .arg(title)
        .arg("--html-file")
        .arg(document)
        .spawn()?;

    Ok(child)
}

/// Parse preview-mode arguments.
///
/// Returns the staged document path and window title when the process was
/// invoked as a preview host, `None` for a normal GUI launch.
pub fn parse_preview_args(args: &[String]) -> Option<(PathBuf, String)> {
    if !args.iter().any(|arg| arg == "--preview") {
        return None;
    }

    let mut title = DEFAULT_PREVIEW_TITLE.to_string();
    let mut document = PathBuf::new();

    for i in 0..args.len() {
        if args[i] == "--title" && i + 1 < args.len() {
            title = args[i + 1].clone();
        } else if args[i] == "--html-file" && i + 1 < args.len() {
            document = PathBuf::from(&args[i + 1]);
        }
    }

    Some((document, title))
}


/// Run the preview event loop in the current (preview) process.
///
/// The document is served through the `wry://localhost` custom protocol so it
/// gets a proper origin, and the webview never receives anything but this one
/// composed document; there is no bridge back into the host process.
pub fn run_preview(html: String, title: String) -> wry::Result<()> {
    tracing::info!(
        "run_preview called with title='{}', {} bytes of HTML",
        title,
        html.len()
    );

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(&title)
        .build(&event_loop)
        .expect("Failed to create preview window");

    let builder = WebViewBuilder::new()
        .with_custom_protocol("wry".into(), move |_webview_id, request| {
            let uri = request.uri().to_string();
            if uri == "wry://localhost/" || uri == "wry://localhost" {
                wry::http::Response::builder()
                    .header("Content-Type", "text/html")
                    .body(html.as_bytes().to_vec())
                    .unwrap()
                    .map(Into::into)
            } else {
                tracing::debug!("Preview protocol 404: {}", uri);
                wry::http::Response::builder()
                    .status(404)
                    .body(Vec::new())
                    .unwrap()
                    .map(Into::into)
            }
        })
        .with_url("wry://localhost/");

    #[cfg(any(
        target_os = "windows",
        target_os = "macos",
        target_os = "ios",
        target_os = "android"
    ))]
    let _webview = builder.build(&window)?;

    #[cfg(not(any(
        target_os = "windows",
        target_os = "macos",
        target_os = "ios",
        target_os = "android"
    )))]
    let _webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window.default_vbox().unwrap();
        builder.build_gtk(vbox)?
    };

    tracing::info!("Preview webview built, starting event loop");
    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        if let Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } = event
        {
            tracing::info!("Preview window close requested");
            *control_flow = ControlFlow::Exit;
        }
    });
}
