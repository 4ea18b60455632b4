use reqwest::Method;
use serde_json::Value;
use std::path::Path;

use crate::blocks::BrightspaceDataSetReportInfo;
use crate::error::Result;
use crate::paging::PagedBlocks;
use crate::routes::lp;
use crate::valence::Valence;

impl Valence {
    /// Brightspace Data Sets available for export, fetched page by page as
    /// the sequence is consumed
    pub fn get_data_sets(&self) -> Result<PagedBlocks<BrightspaceDataSetReportInfo>> {
        let first_page = self
            .request_json(&lp("/dataExport/bds"), Method::GET, None)?
            .unwrap_or(Value::Null);
        Ok(PagedBlocks::new(self.clone(), first_page))
    }

    /// Download the latest full extract of a data set plugin into `path`
    pub fn download_data_set(&self, plugin_id: &str, path: &Path) -> Result<bool> {
        let route = lp(&format!("/dataExport/bds/download/{}", plugin_id));
        self.request_file(&route, path)
    }
}
