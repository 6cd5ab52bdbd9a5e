//! Link aggregation for a session's caller → speaker flows

use crate::model::AggregatedLink;
use crate::session::SessionView;
use std::collections::HashMap;

/// Collapse repeated caller → speaker pairs into weighted links.
///
/// Links come out in order of first occurrence of each pair. Events whose
/// speaker is unknown, or whose caller or speaker has no node in the view,
/// are skipped.
pub fn aggregate_links(view: &SessionView) -> Vec<AggregatedLink> {
    let mut links: Vec<AggregatedLink> = Vec::new();
    let mut slots: HashMap<(usize, usize), usize> = HashMap::new();

    for event in view.events() {
        let Some(speaker) = &event.speaker else {
            continue;
        };

        let (Some(source), Some(target)) = (view.index_of(&event.caller), view.index_of(speaker))
        else {
            tracing::debug!(
                "Skipping unresolved interruption {} -> {} in session {}",
                event.caller,
                speaker,
                view.session
            );
            continue;
        };

        let slot = *slots.entry((source, target)).or_insert_with(|| {
            links.push(AggregatedLink {
                source,
                target,
                value: 0,
            });
            links.len() - 1
        });
        links[slot].value += 1;
    }

    links
}
