//! On-disk shape of the registry document.
use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::{ConfigEntry, SubstitutionOptions};

/// The persisted registry.
///
/// ```yaml
/// substitution:
///   default: false
///   basepath: vars
///   source: values.yaml
/// configs:
///   - name: i3
///     infiles:
///       default: [~/.i3/base.conf, ~/.i3/conf.d/*.conf]
///     outfile: ~/.i3/config
///     active_set: default
/// ```
///
/// Unknown top-level keys are kept in [`extra`](Self::extra) and written
/// back on save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Global substitution settings; `null` means the defaults.
    #[serde(default, deserialize_with = "null_as_default")]
    pub substitution: SubstitutionOptions,
    /// Config entries; `null` and a missing key both mean none.
    #[serde(default)]
    pub configs: Option<Vec<ConfigEntry>>,
    /// Unrecognised top-level keys.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Deserialize `null` (and an empty value) as `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
