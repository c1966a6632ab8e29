//! Feeds command - list every feed known to the cache

use crate::config::Config;
use crate::error::LarderResult;
use crate::feeds::FeedLocator;

/// Execute the feeds command
pub async fn execute(json: bool, config: &Config) -> LarderResult<()> {
    let locator = FeedLocator::new(config);
    let mut uris: Vec<String> = locator.list_all_known_interfaces().await?.into_iter().collect();
    uris.sort();

    if json {
        println!("{}", serde_json::to_string_pretty(&uris)?);
    } else if uris.is_empty() {
        println!("No cached feeds");
    } else {
        for uri in uris {
            println!("{uri}");
        }
    }

    Ok(())
}
