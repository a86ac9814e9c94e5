//! JSON page files.
//!
//! A later run of the same route on the same day replaces the earlier file.

use crate::pages::PageError;
use crate::utils::ensure_writable_dir;
use chrono::Local;
use serde::Serialize;
use tokio::fs;
use tracing::{info, instrument};

/// Write a page to `{json_output_dir}/{date}/{route}.json`, using the local
/// date.
///
/// # Arguments
///
/// * `page` - Any serializable page or view
/// * `json_output_dir` - Root directory; the dated subdirectory is created
/// * `route` - File stem, e.g. `"home"`
///
/// # Errors
///
/// Returns an error if serialization fails, the directory is not writable,
/// or the file cannot be written.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir, route = %route))]
pub async fn write_page<T: Serialize>(
    page: &T,
    json_output_dir: &str,
    route: &str,
) -> Result<(), PageError> {
    let json = serde_json::to_string(page)?;

    let full_json_dir = format!(
        "{}/{}",
        json_output_dir.trim_end_matches('/'),
        Local::now().date_naive()
    );
    ensure_writable_dir(&full_json_dir).await?;

    let output_json_filename = format!("{full_json_dir}/{route}.json");
    fs::write(&output_json_filename, json).await?;
    info!(path = %output_json_filename, "Wrote JSON page file");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::ViewState;

    #[tokio::test]
    async fn test_write_page_by_date_and_route() {
        let dir = std::env::temp_dir().join(format!("viewpoint-json-{}", std::process::id()));
        let dir = dir.to_string_lossy().to_string();

        let page: ViewState<Vec<u32>> = ViewState::Ready(vec![1, 2]);
        write_page(&page, &dir, "science").await.unwrap();

        let path = format!("{dir}/{}/science.json", Local::now().date_naive());
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).await.unwrap()).unwrap();
        assert_eq!(written, serde_json::json!({"state": "ready", "data": [1, 2]}));

        // Same route, same day: replaced.
        let page: ViewState<Vec<u32>> = ViewState::Error("down".to_string());
        write_page(&page, &dir, "science").await.unwrap();
        let written = fs::read_to_string(&path).await.unwrap();
        assert!(written.contains("\"error\""));

        fs::remove_dir_all(&dir).await.unwrap();
    }
}
