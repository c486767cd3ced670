//! Console main loop

use crate::console::{self, Command};
use anyhow::Result;
use gallery_core::{Gallery, GalleryConfig, HttpFetcher};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Load the feed, then apply stdin commands until `quit` or end of input
pub async fn run(config: GalleryConfig) -> Result<()> {
    let fetcher = Arc::new(HttpFetcher::new(&config.http)?);
    let mut gallery = Gallery::new(config, fetcher);

    gallery.subscribe(|state| print!("{}", console::render(state)))?;

    gallery.activate()?;
    gallery.wait_for_load().await?;
    println!("{}", console::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match console::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{}", console::HELP),
            Command::Reload => {
                keep_going(gallery.reload())?;
                gallery.wait_for_load().await?;
            }
            command => match command.into_intent(&gallery.state()) {
                Ok(Some(intent)) => keep_going(gallery.dispatch(intent))?,
                Ok(None) => {}
                Err(e) => eprintln!("{}", e),
            },
        }
    }

    gallery.destroy();
    tracing::info!("Galleria exiting");
    Ok(())
}

/// Report a recoverable gallery error and carry on; fatal ones end the session
fn keep_going(result: gallery_core::Result<()>) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.is_fatal() => Err(e.into()),
        Err(e) => {
            tracing::warn!("Gallery error: {}", e);
            eprintln!("{}", e.user_message());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_core::GalleryError;

    #[test]
    fn test_load_failures_do_not_end_the_session() {
        assert!(keep_going(Ok(())).is_ok());
        assert!(keep_going(Err(GalleryError::LoadFailure("HTTP status: 502".into()))).is_ok());
    }

    #[test]
    fn test_fatal_errors_end_the_session() {
        let err = keep_going(Err(GalleryError::Destroyed)).unwrap_err();
        assert!(matches!(err.downcast_ref::<GalleryError>(), Some(GalleryError::Destroyed)));
        assert!(keep_going(Err(GalleryError::Runtime("no reactor".into()))).is_err());
    }
}
