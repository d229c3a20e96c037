//! Runs one parsed subcommand against the dispatcher.

use super::args::Command;
use super::output;
use crate::store::WatchlistStore;
use crate::watchlist::{Watchlist, WatchlistError};

/// Execute `command` and return the report to print on stdout.
///
/// Not-found and already-exists outcomes are part of the report; only
/// validation and remote failures come back as errors.
pub async fn execute<S: WatchlistStore>(
    watchlist: &Watchlist<S>,
    command: &Command,
) -> Result<String, WatchlistError> {
    log::debug!("Executing {:?}", command);

    let report = match command {
        Command::Add { title } => output::render_add(&watchlist.add(title).await?),
        Command::List => output::render_list(&watchlist.list().await?),
        Command::Toggle { id } => output::render_toggle(&watchlist.toggle(id).await?),
        Command::Remove { id } => output::render_remove(&watchlist.remove(id).await?),
        Command::Search { query, limit } => {
            output::render_search(query, &watchlist.search(query, *limit).await?)
        }
    };
    Ok(report)
}
