// Search pipeline configuration schema

use crate::config_struct;

config_struct! {
    /// Search pipeline configuration
    pub struct SearchConfig {
        /// Page size applied when a request omits `limit`
        default_page_size: usize = 25,

        /// Hard ceiling on requested page sizes
        max_page_size: usize = 200,

        /// When true the summary query reuses the full filter set of the
        /// primary query. When false (default) it reapplies only the
        /// free-text filter, matching the historical behavior callers may
        /// depend on: the summary then describes a broader population than
        /// the returned page.
        summary_matches_filters: bool = false,

        /// Default row cap for company-name lookups
        company_lookup_limit: usize = 25,
    }
}
