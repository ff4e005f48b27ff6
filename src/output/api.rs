use serde::Serialize;

use crate::consts::API_STATUS_SUCCESS;
use crate::core::WallpaperRecord;
use crate::error::RenderError;

#[derive(Serialize)]
struct LatestDocument<'a> {
    data: Option<&'a WallpaperRecord>,
    status: &'static str,
}

#[derive(Serialize)]
struct AllDocument<'a> {
    data: &'a [WallpaperRecord],
    count: usize,
    status: &'static str,
}

/// `api/latest.json`: `{ "data": <newest record or null>, "status": "success" }`
pub(crate) fn render_latest_api(history: &[WallpaperRecord]) -> Result<String, RenderError> {
    let doc = LatestDocument {
        data: history.first(),
        status: API_STATUS_SUCCESS,
    };
    serde_json::to_string_pretty(&doc).map_err(RenderError::Serialize)
}

/// `api/all.json`: `{ "data": [...], "count": n, "status": "success" }`
pub(crate) fn render_all_api(history: &[WallpaperRecord]) -> Result<String, RenderError> {
    let doc = AllDocument {
        data: history,
        count: history.len(),
        status: API_STATUS_SUCCESS,
    };
    serde_json::to_string_pretty(&doc).map_err(RenderError::Serialize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sample_record;
    use serde_json::Value;

    #[test]
    fn latest_wraps_first_record() {
        let history = [
            sample_record("2026-03-02", "Bravo"),
            sample_record("2026-03-01", "Alpha"),
        ];
        let doc: Value = serde_json::from_str(&render_latest_api(&history).unwrap()).unwrap();
        assert_eq!(doc["status"], "success");
        assert_eq!(doc["data"]["title"], "Bravo");
        assert_eq!(doc["data"]["date"], "2026-03-02");
    }

    #[test]
    fn latest_of_empty_history_is_null() {
        let doc: Value = serde_json::from_str(&render_latest_api(&[]).unwrap()).unwrap();
        assert!(doc["data"].is_null());
        assert_eq!(doc["status"], "success");
    }

    #[test]
    fn all_count_matches_data_length() {
        for n in [0usize, 1, 5] {
            let history: Vec<_> = (0..n)
                .map(|i| sample_record(&format!("2026-03-{:02}", i + 1), "X"))
                .collect();
            let doc: Value = serde_json::from_str(&render_all_api(&history).unwrap()).unwrap();
            assert_eq!(doc["count"].as_u64(), Some(n as u64));
            assert_eq!(doc["data"].as_array().map(Vec::len), Some(n));
            assert_eq!(doc["status"], "success");
        }
    }

    #[test]
    fn all_preserves_order() {
        let history = [
            sample_record("2026-03-03", "C"),
            sample_record("2026-03-02", "B"),
        ];
        let doc: Value = serde_json::from_str(&render_all_api(&history).unwrap()).unwrap();
        assert_eq!(doc["data"][0]["title"], "C");
        assert_eq!(doc["data"][1]["title"], "B");
    }
}
