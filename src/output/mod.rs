pub mod formatter;

pub use formatter::{
    format_aggregate, format_channel_list, format_classification, format_config_summary,
    format_latest_table, format_levels, format_score, should_use_colors,
};
