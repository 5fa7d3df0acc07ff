use std::collections::HashMap;
use std::sync::Arc;

use log::info;

use sheet_sync::{JsonFileStore, SheetCache, SheetDescriptor};

#[tokio::main]
async fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (document_id, sheet_name) = match (args.next(), args.next()) {
        (Some(d), Some(s)) => (d, s),
        _ => {
            eprintln!("usage: sheet-sync <document-id> <sheet-name>");
            std::process::exit(2);
        }
    };

    let store = Arc::new(JsonFileStore::new("cached_data.json"));
    let cache = SheetCache::new(store);

    let mut documents = HashMap::new();
    documents.insert("demo".to_string(), document_id);
    cache.configure(
        documents,
        vec![SheetDescriptor::new("demo-sheet", &sheet_name, "demo", Vec::new())],
    );

    let result = cache
        .synchronize_one("demo-sheet", || {
            info!("sheet data observed");
            Ok(())
        })
        .await;

    match result {
        Ok(report) => println!(
            "{}: {:?} ({} rows{})",
            report.sheet_id(),
            report.outcome(),
            cache.row_count("demo-sheet"),
            if *report.cache_hit() { ", served from cache first" } else { "" }
        ),
        Err(e) => eprintln!("synchronization failed: {}", e),
    }
}
