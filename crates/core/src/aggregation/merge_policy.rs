//! How unified results from several providers are combined per category.
//!
//! Provider field names differ and are never renamed here; merging only
//! decides precedence and concatenation order.

use std::collections::HashMap;

use serde_json::Value;
use vnstock_market_data::utils::json::overlay;
use vnstock_market_data::{CategoryData, CompanyCategory, ProviderId, Record, Rows};

use crate::constants::SOURCE_TAG_KEY;

/// Combination rule for one category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergePolicy {
    /// Shallow object merge applied in `order`; later providers win on
    /// shared keys. For list data the later provider's list replaces the
    /// earlier one.
    Overlay { order: [ProviderId; 2] },

    /// Lists concatenated in `order`, each element tagged with the
    /// provider it came from. Profiles fall back to an overlay.
    Concatenate { order: [ProviderId; 2] },

    /// Only the first provider in `order` that answered is used.
    Prefer { order: [ProviderId; 2] },
}

impl MergePolicy {
    pub fn order(&self) -> [ProviderId; 2] {
        match self {
            MergePolicy::Overlay { order }
            | MergePolicy::Concatenate { order }
            | MergePolicy::Prefer { order } => *order,
        }
    }

    fn rank(&self, provider: ProviderId) -> usize {
        self.order()
            .iter()
            .position(|p| *p == provider)
            .unwrap_or(usize::MAX)
    }

    /// Combines successful legs. `parts` may arrive in any order.
    pub fn merge(&self, mut parts: Vec<(ProviderId, CategoryData)>) -> CategoryData {
        parts.sort_by_key(|(provider, _)| self.rank(*provider));

        if let MergePolicy::Prefer { .. } = self {
            if let Some((_, data)) = parts.into_iter().next() {
                return data;
            }
            return CategoryData::Rows(Vec::new());
        }

        let is_profile = parts
            .iter()
            .any(|(_, data)| matches!(data, CategoryData::Profile(_)));
        if is_profile {
            return CategoryData::Profile(overlay_profiles(parts));
        }

        match self {
            MergePolicy::Concatenate { .. } => CategoryData::Rows(concatenate_tagged(parts)),
            _ => parts
                .into_iter()
                .last()
                .map(|(_, data)| data)
                .unwrap_or_else(|| CategoryData::Rows(Vec::new())),
        }
    }
}

fn overlay_profiles(parts: Vec<(ProviderId, CategoryData)>) -> Record {
    parts
        .into_iter()
        .filter_map(|(_, data)| data.into_profile())
        .fold(Record::new(), overlay)
}

fn concatenate_tagged(parts: Vec<(ProviderId, CategoryData)>) -> Rows {
    let mut merged = Rows::new();
    for (provider, data) in parts {
        let Some(rows) = data.into_rows() else {
            continue;
        };
        merged.extend(rows.into_iter().map(|mut row| {
            row.insert(
                SOURCE_TAG_KEY.to_string(),
                Value::String(provider.as_str().to_string()),
            );
            row
        }));
    }
    merged
}

/// Per-category merge policies used by unified company requests.
///
/// Defaults:
///
/// | Category | Policy |
/// |----------|--------|
/// | profile | `Overlay [vci, tcbs]` (TCBS wins on shared keys) |
/// | every list | `Concatenate [vci, tcbs]` |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergePolicyTable {
    policies: HashMap<CompanyCategory, MergePolicy>,
}

impl Default for MergePolicyTable {
    fn default() -> Self {
        let order = [ProviderId::Vci, ProviderId::Tcbs];
        let policies = CompanyCategory::ALL
            .into_iter()
            .map(|category| {
                let policy = if category.is_list() {
                    MergePolicy::Concatenate { order }
                } else {
                    MergePolicy::Overlay { order }
                };
                (category, policy)
            })
            .collect();
        Self { policies }
    }
}

impl MergePolicyTable {
    /// Replaces the policy for one category.
    pub fn with_policy(mut self, category: CompanyCategory, policy: MergePolicy) -> Self {
        self.policies.insert(category, policy);
        self
    }

    pub fn policy_for(&self, category: CompanyCategory) -> MergePolicy {
        self.policies.get(&category).copied().unwrap_or_else(|| {
            let order = [ProviderId::Vci, ProviderId::Tcbs];
            if category.is_list() {
                MergePolicy::Concatenate { order }
            } else {
                MergePolicy::Overlay { order }
            }
        })
    }

    pub fn merge(
        &self,
        category: CompanyCategory,
        parts: Vec<(ProviderId, CategoryData)>,
    ) -> CategoryData {
        self.policy_for(category).merge(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_default_profile_overlay_lets_tcbs_win() {
        let table = MergePolicyTable::default();
        let merged = table.merge(
            CompanyCategory::Profile,
            vec![
                (
                    ProviderId::Tcbs,
                    CategoryData::Profile(record(json!({"shortName": "FPT Corp", "exchange": "HOSE"}))),
                ),
                (
                    ProviderId::Vci,
                    CategoryData::Profile(record(json!({"shortName": "FPT", "icbName3": "Software"}))),
                ),
            ],
        );

        let profile = merged.into_profile().unwrap();
        assert_eq!(profile["shortName"], "FPT Corp");
        assert_eq!(profile["exchange"], "HOSE");
        assert_eq!(profile["icbName3"], "Software");
    }

    #[test]
    fn test_default_list_concatenates_vci_first_with_tag() {
        let table = MergePolicyTable::default();
        let merged = table.merge(
            CompanyCategory::News,
            vec![
                (
                    ProviderId::Tcbs,
                    CategoryData::Rows(vec![record(json!({"title": "t1", "source": "CafeF"}))]),
                ),
                (
                    ProviderId::Vci,
                    CategoryData::Rows(vec![
                        record(json!({"newsTitle": "v1"})),
                        record(json!({"newsTitle": "v2"})),
                    ]),
                ),
            ],
        );

        let rows = merged.into_rows().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["newsTitle"], "v1");
        assert_eq!(rows[0][SOURCE_TAG_KEY], "vci");
        assert_eq!(rows[2]["title"], "t1");
        assert_eq!(rows[2][SOURCE_TAG_KEY], "tcbs");
        // provider's own source field is left alone
        assert_eq!(rows[2]["source"], "CafeF");
    }

    #[test]
    fn test_prefer_policy_takes_first_available() {
        let table = MergePolicyTable::default().with_policy(
            CompanyCategory::Profile,
            MergePolicy::Prefer {
                order: [ProviderId::Vci, ProviderId::Tcbs],
            },
        );
        let merged = table.merge(
            CompanyCategory::Profile,
            vec![
                (ProviderId::Tcbs, CategoryData::Profile(record(json!({"a": 1})))),
                (ProviderId::Vci, CategoryData::Profile(record(json!({"b": 2})))),
            ],
        );
        assert_eq!(merged, CategoryData::Profile(record(json!({"b": 2}))));
    }

    #[test]
    fn test_overlay_on_lists_keeps_later_list() {
        let policy = MergePolicy::Overlay {
            order: [ProviderId::Tcbs, ProviderId::Vci],
        };
        let merged = policy.merge(vec![
            (ProviderId::Vci, CategoryData::Rows(vec![record(json!({"v": 1}))])),
            (ProviderId::Tcbs, CategoryData::Rows(vec![record(json!({"t": 1}))])),
        ]);
        assert_eq!(merged, CategoryData::Rows(vec![record(json!({"v": 1}))]));
    }
}
