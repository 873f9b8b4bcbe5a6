use crate::media::DEFAULT_DOWNLOAD_NAME;
use colored::*;

pub const LOADING_MESSAGE: &str = "Gambar sedang dibuat, mohon tunggu...";
pub const FAILURE_MESSAGE: &str = "Maaf, terjadi kesalahan saat membuat gambar. Silakan coba lagi.";
pub const IMAGE_ALT: &str = "Generated Image by TITAN AI";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    /// Data URI, used as both image source and download target.
    pub src: String,
    pub alt: String,
    pub download_name: String,
}

impl RenderedImage {
    pub fn new(src: String) -> Self {
        Self {
            src,
            alt: IMAGE_ALT.to_string(),
            download_name: DEFAULT_DOWNLOAD_NAME.to_string(),
        }
    }

    pub fn download_href(&self) -> &str {
        &self.src
    }
}

/// The single content area. Always replaced wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ContentView {
    #[default]
    Empty,
    Loading {
        message: String,
    },
    Rendered(RenderedImage),
    Error {
        message: String,
        details: Option<String>,
    },
}

impl ContentView {
    pub fn loading() -> Self {
        ContentView::Loading {
            message: LOADING_MESSAGE.to_string(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        ContentView::Error {
            message: message.into(),
            details: None,
        }
    }

    pub fn failed(details: impl Into<String>) -> Self {
        ContentView::Error {
            message: FAILURE_MESSAGE.to_string(),
            details: Some(details.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ContentView::Empty)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ContentView::Error { .. })
    }

    pub fn image(&self) -> Option<&RenderedImage> {
        match self {
            ContentView::Rendered(image) => Some(image),
            _ => None,
        }
    }

    /// The delete control only exists next to a rendered image.
    pub fn has_delete_control(&self) -> bool {
        self.image().is_some()
    }
}

pub trait ContentRenderer: Send + Sync {
    fn render(&self, view: &ContentView);
}

/// Discards every view; the studio still tracks the current one.
pub struct NullRenderer;

impl ContentRenderer for NullRenderer {
    fn render(&self, _view: &ContentView) {}
}

pub struct TerminalRenderer {
    show_colors: bool,
}

impl TerminalRenderer {
    pub fn new(show_colors: bool) -> Self {
        Self { show_colors }
    }

    pub fn format(&self, view: &ContentView) -> String {
        match view {
            ContentView::Empty => String::new(),
            ContentView::Loading { message } => {
                let line = format!("⏳ {}", message);
                if self.show_colors {
                    line.bright_black().to_string()
                } else {
                    line
                }
            }
            ContentView::Rendered(image) => {
                let size = image
                    .src
                    .split_once(',')
                    .map(|(_, payload)| payload.len() * 3 / 4)
                    .unwrap_or(0);
                let mime = image
                    .src
                    .strip_prefix("data:")
                    .and_then(|rest| rest.split(';').next())
                    .unwrap_or("unknown");
                let title = format!("🖼️  {} ({}, ~{} bytes)", image.alt, mime, size);
                let download = format!("   Download Gambar → {}", image.download_name);
                if self.show_colors {
                    format!("{}\n{}", title.green().bold(), download.bright_blue())
                } else {
                    format!("{}\n{}", title, download)
                }
            }
            ContentView::Error { message, details } => {
                let mut out = if self.show_colors {
                    format!("❌ {}", message).red().bold().to_string()
                } else {
                    format!("❌ {}", message)
                };
                if let Some(details) = details {
                    out.push('\n');
                    if self.show_colors {
                        out.push_str(&format!("   {}", details).yellow().to_string());
                    } else {
                        out.push_str(&format!("   {}", details));
                    }
                }
                out
            }
        }
    }
}

impl ContentRenderer for TerminalRenderer {
    fn render(&self, view: &ContentView) {
        let text = self.format(view);
        if !text.is_empty() {
            println!("{}", text);
        }
    }
}
