use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::{ScheduleDays, ITEM_DATE_FORMAT};
use crate::gateway::ScheduleItem;
use crate::preferences::SubgroupMode;

/// A lesson for the whole group: no undergroup tag and an empty or `full`
/// audience.
pub fn is_common(item: &ScheduleItem) -> bool {
    let audience = item.audience.trim();
    item.undergroup.trim().is_empty() && (audience.is_empty() || audience.eq_ignore_ascii_case("full"))
}

/// Tag spellings the backend uses for subgroup `n`.
fn subgroup_aliases(n: u8) -> [String; 3] {
    [format!("подгруппа {}", n), n.to_string(), format!("subgroup{}", n)]
}

fn tag_matches(tag: &str, aliases: &[String]) -> bool {
    let tag = tag.trim().to_lowercase();
    !tag.is_empty() && aliases.iter().any(|alias| *alias == tag)
}

/// Whether a lesson is visible under the given subgroup mode.
pub fn matches_subgroup(item: &ScheduleItem, mode: SubgroupMode) -> bool {
    let Some(group) = mode.group_number() else {
        return true;
    };
    if is_common(item) {
        return true;
    }
    let aliases = subgroup_aliases(group);
    tag_matches(&item.undergroup, &aliases) || tag_matches(&item.audience, &aliases)
}

/// Buckets lessons by date for the three-day window.
///
/// All three dates are present in the result even when empty. Lessons
/// outside the window or filtered out by `mode` are dropped, and so are
/// lessons whose date does not parse. Backend order is preserved within a
/// day.
pub fn group_by_date(
    items: &[ScheduleItem],
    days: &ScheduleDays,
    mode: SubgroupMode,
) -> BTreeMap<NaiveDate, Vec<ScheduleItem>> {
    let mut result: BTreeMap<NaiveDate, Vec<ScheduleItem>> =
        days.dates().into_iter().map(|date| (date, Vec::new())).collect();

    for item in items {
        let date = match NaiveDate::parse_from_str(item.date.trim(), ITEM_DATE_FORMAT) {
            Ok(date) => date,
            Err(e) => {
                log::warn!("Skipping schedule item {} with bad date {:?}: {}", item.id, item.date, e);
                continue;
            }
        };

        if let Some(bucket) = result.get_mut(&date) {
            if matches_subgroup(item, mode) {
                bucket.push(item.clone());
            }
        }
    }

    result
}
