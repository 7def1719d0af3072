use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for the `fibbo` command line tool.
///
/// Example YAML:
/// ```yaml
/// project: acme
/// store_dir: /srv/fibbo/projects
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Project used when `--project` is not given
    #[serde(default)]
    pub project: Option<String>,

    /// Where per-project FibboScore configs live
    #[serde(default)]
    pub store_dir: Option<PathBuf>,
}
