//! URL construction for the remote spreadsheet endpoints.

use url::form_urlencoded;

use crate::domain::sheet::SheetLocator;

/// Default width for thumbnail links, in pixels.
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 1080;

/// Visualization query URL for one sheet. The query selects every column;
/// filtering happens client side against the configured field list.
pub fn sheet_query_url(locator: &SheetLocator) -> String {
    let sheet: String = form_urlencoded::byte_serialize(locator.sheet_name.as_bytes()).collect();
    format!(
        "https://docs.google.com/spreadsheets/d/{}/gviz/tq?sheet={}&tq=Select%20*",
        locator.document_id, sheet
    )
}

/// File id embedded in a Drive share link, between `/d/` and `/view`.
pub fn drive_file_id(share_url: &str) -> Option<&str> {
    let start = share_url.find("/d/")? + 3;
    let end = share_url[start..].find("/view")? + start;
    Some(&share_url[start..end])
}

pub fn drive_thumbnail_url(share_url: &str, width: u32) -> Option<String> {
    let id = drive_file_id(share_url)?;
    Some(format!(
        "https://drive.google.com/thumbnail?id={}&sz=w{}",
        id, width
    ))
}

pub fn drive_download_url(share_url: &str) -> Option<String> {
    let id = drive_file_id(share_url)?;
    Some(format!(
        "https://drive.google.com/uc?export=download&id={}",
        id
    ))
}
