mod cache_report;

pub use cache_report::report_cache_usage;
