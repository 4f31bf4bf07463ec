//! Small aggregates shared by the balancer and the formatter.

use std::collections::HashMap;

use crate::participant::Participant;

/// The `n` most frequent items, most frequent first.
///
/// Ties keep first-encountered order.
pub fn most_common<'a, I>(items: I, n: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for item in items {
        let c = counts.entry(item).or_insert(0);
        if *c == 0 {
            order.push(item);
        }
        *c += 1;
    }

    // Stable sort keeps first-encountered order among equal counts.
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.into_iter().take(n).map(str::to_string).collect()
}

/// Mean experience score of `members`; 0 for an empty team.
pub fn mean_experience(members: &[&Participant]) -> f32 {
    if members.is_empty() {
        return 0.0;
    }
    let total: u32 = members
        .iter()
        .map(|p| u32::from(p.experience_level.score()))
        .sum();
    total as f32 / members.len() as f32
}
