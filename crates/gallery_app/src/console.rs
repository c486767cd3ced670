//! Line-oriented console: parses typed commands and renders gallery state

use anyhow::{anyhow, bail, Result};
use gallery_core::{Direction, GalleryState, Image, Intent, LoadState, PageSize, Paging, SortKey};
use std::fmt::Write;

pub const HELP: &str = "\
commands:
  filter <term>        filter by title (no term clears)
  sort <key>           none | title-asc | title-desc | date-asc | date-desc
  page <index> [size]  go to page (0-based), optionally changing size
  prev                 previous page
  delete <url>         delete an image
  open <url>           open an image in the viewer
  left | right         step through the viewer
  close                close the viewer
  reload               fetch the feed again
  help | quit";

/// A parsed console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Filter(String),
    Sort(SortKey),
    Page { index: usize, size: Option<PageSize> },
    Prev,
    Delete(String),
    Open(String),
    Left,
    Right,
    Close,
    Reload,
    Help,
    Quit,
}

/// Parse one line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "filter" => Command::Filter(rest.to_string()),
        "sort" => Command::Sort(
            SortKey::from_name(rest).ok_or_else(|| anyhow!("unknown sort key '{}'", rest))?,
        ),
        "page" => {
            let mut args = rest.split_whitespace();
            let index = args
                .next()
                .ok_or_else(|| anyhow!("page needs an index"))?
                .parse()
                .map_err(|_| anyhow!("page index must be a number"))?;
            let size = match args.next() {
                Some(s) => {
                    let n: u32 = s.parse().map_err(|_| anyhow!("page size must be a number"))?;
                    Some(PageSize::try_from(n)?)
                }
                None => None,
            };
            Command::Page { index, size }
        }
        "prev" => Command::Prev,
        "delete" | "open" if rest.is_empty() => bail!("{} needs an image url", word),
        "delete" => Command::Delete(rest.to_string()),
        "open" => Command::Open(rest.to_string()),
        "left" => Command::Left,
        "right" => Command::Right,
        "close" => Command::Close,
        "reload" => Command::Reload,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command '{}' (try 'help')", other),
    };

    Ok(Some(command))
}

impl Command {
    /// Turn a gallery command into an intent, resolving urls against the
    /// images currently available. Returns `None` for console-only commands.
    pub fn into_intent(self, state: &GalleryState) -> Result<Option<Intent>> {
        let intent = match self {
            Command::Filter(term) => Intent::FilterChanged(term),
            Command::Sort(key) => Intent::SortSelected(key),
            Command::Page { index, size } => {
                let current = state
                    .view
                    .as_ref()
                    .map(|v| v.paging.page_size)
                    .unwrap_or_default();
                Intent::PageChanged(Paging::new(index, size.unwrap_or(current)))
            }
            Command::Prev => Intent::PreviousPage,
            Command::Delete(url) => Intent::ImageDeleted(find_available(state, &url)?),
            Command::Open(url) => Intent::ImageSelected(find_available(state, &url)?),
            Command::Left => Intent::ArrowClicked(Direction::Left),
            Command::Right => Intent::ArrowClicked(Direction::Right),
            Command::Close => Intent::ModalClosed,
            Command::Reload | Command::Help | Command::Quit => return Ok(None),
        };
        Ok(Some(intent))
    }
}

fn find_available(state: &GalleryState, url: &str) -> Result<Image> {
    let view = state.view.as_ref().ok_or_else(|| anyhow!("no images loaded yet"))?;
    view.sorted
        .iter()
        .find(|img| img.url == url)
        .cloned()
        .ok_or_else(|| anyhow!("no available image with url {}", url))
}

/// Render the state as plain text
pub fn render(state: &GalleryState) -> String {
    let mut out = String::new();

    match &state.load {
        LoadState::Pending => {
            let _ = writeln!(out, "Loading...");
        }
        LoadState::Failed(msg) => {
            let _ = writeln!(out, "Error: {}", msg);
        }
        LoadState::Loaded => {}
    }

    if let Some(view) = &state.view {
        let size = view.paging.page_size.get();
        let pages = view.available_count.div_ceil(size).max(1);

        let mut header = format!("{} images", view.available_count);
        if state.controls.pagination {
            let _ = write!(header, " | page {}/{} ({} per page)", view.paging.page_index + 1, pages, size);
        }
        if state.controls.sorting {
            let _ = write!(header, " | {}", view.sort_key.display_name());
        }
        if state.controls.search && !view.filter_term.is_empty() {
            let _ = write!(header, " | filter \"{}\"", view.filter_term);
        }
        let _ = writeln!(out, "{}", header);

        if view.visible.is_empty() {
            let _ = writeln!(out, "  (no images)");
        }
        for image in &view.visible {
            let _ = writeln!(out, "  {} [{}] {}", image.title, image.date, image.url);
        }
    }

    if let Some(modal) = &state.modal {
        match modal.current() {
            Some(image) => {
                let _ = writeln!(
                    out,
                    "Viewer {}/{}: {} {} [{}|{}]",
                    modal.cursor_index() + 1,
                    modal.snapshot().len(),
                    image.title,
                    image.url,
                    if modal.is_at_start() { " " } else { "<" },
                    if modal.is_at_end() { " " } else { ">" },
                );
            }
            None => {
                let _ = writeln!(out, "Viewer: image not found");
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_core::{GalleryConfig, GalleryStore, ModalSession};

    fn loaded_state() -> GalleryState {
        let mut store = GalleryStore::new(&GalleryConfig::default());
        store
            .set_images(vec![
                Image::new("Harbour", "https://cdn.example/h.jpg", "2018-07-01"),
                Image::new("Dunes", "https://cdn.example/d.jpg", "2019-02-11"),
            ])
            .unwrap();
        store.state().clone()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse("  ").unwrap(), None);
        assert_eq!(parse("filter sea view").unwrap(), Some(Command::Filter("sea view".into())));
        assert_eq!(parse("filter").unwrap(), Some(Command::Filter(String::new())));
        assert_eq!(parse("sort date-desc").unwrap(), Some(Command::Sort(SortKey::DateDesc)));
        assert_eq!(
            parse("page 2 15").unwrap(),
            Some(Command::Page { index: 2, size: Some(PageSize::Fifteen) })
        );
        assert_eq!(parse("page 0").unwrap(), Some(Command::Page { index: 0, size: None }));
        assert_eq!(parse("right").unwrap(), Some(Command::Right));
        assert_eq!(parse("quit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse("sort newest").is_err());
        assert!(parse("page").is_err());
        assert!(parse("page two").is_err());
        assert!(parse("page 1 12").is_err());
        assert!(parse("delete").is_err());
        assert!(parse("dance").is_err());
    }

    #[test]
    fn test_resolve_against_available_images() {
        let state = loaded_state();

        let intent = Command::Delete("https://cdn.example/d.jpg".into()).into_intent(&state).unwrap();
        assert!(matches!(intent, Some(Intent::ImageDeleted(ref img)) if img.title == "Dunes"));

        assert!(Command::Open("https://cdn.example/missing.jpg".into()).into_intent(&state).is_err());

        let intent = Command::Page { index: 1, size: None }.into_intent(&state).unwrap();
        assert_eq!(intent, Some(Intent::PageChanged(Paging::new(1, PageSize::Ten))));

        assert_eq!(Command::Quit.into_intent(&state).unwrap(), None);
    }

    #[test]
    fn test_render() {
        let mut state = loaded_state();
        let text = render(&state);
        assert!(text.starts_with("2 images | page 1/1 (10 per page) | Unsorted"));
        assert!(text.contains("  Harbour [2018-07-01] https://cdn.example/h.jpg"));

        state.modal = Some(ModalSession::open(
            state.view.as_ref().unwrap().sorted.clone(),
            &Image::new("Harbour", "https://cdn.example/h.jpg", "2018-07-01"),
        ));
        assert!(render(&state).contains("Viewer 1/2: Harbour https://cdn.example/h.jpg [ |>]"));

        state.modal = None;
        state.controls.pagination = false;
        state.controls.sorting = false;
        assert!(render(&state).starts_with("2 images\n"));
    }
}
