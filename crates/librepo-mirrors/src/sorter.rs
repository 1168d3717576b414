//! The cross-handle sorter (§4.G): deduplicates hosts across several
//! caller-owned mirrorlists, probes the unique hosts once, and reorders
//! each list by the resulting host rank.
//!
//! Unlike the source, which mixes `g_slist_delete_link` with iteration on
//! the same list (§9 flags this), each list here is rebuilt into a fresh
//! `Vec` rather than mutated element-by-element in place.
use std::collections::HashSet;

use crate::config::ProbeConfig;
use crate::error::LibrepoError;
use crate::mirror::MirrorEntry;
use crate::mirrorlist::Mirrorlist;
use crate::probe::fastest_mirror;

/// Probe-and-reorder a single mirrorlist in place, using `config` as the
/// probe's prototype connection.
pub async fn sort_internal_mirrorlist(
    config: &ProbeConfig,
    list: &mut Mirrorlist,
) -> Result<(), LibrepoError> {
    sort_internal_mirrorlists(config, std::slice::from_mut(list)).await
}

/// Probe-and-reorder several mirrorlists at once, sharing a single probe
/// over the union of their hosts. `config` is the network configuration
/// used for the probe; per §4.G this is meant to be the first caller's
/// configuration when multiple callers are involved.
///
/// If the probe fails, every list is left exactly as it was (§7: "the
/// cross-handle sorter treats a failed probe as fatal to itself and leaves
/// each caller's list unchanged").
pub async fn sort_internal_mirrorlists(
    config: &ProbeConfig,
    lists: &mut [Mirrorlist],
) -> Result<(), LibrepoError> {
    if lists.is_empty() {
        return Ok(());
    }

    let mut seen = HashSet::new();
    let mut hosts = Vec::new();
    for list in lists.iter() {
        for entry in list.entries() {
            let host = entry.host_only();
            if seen.insert(host.clone()) {
                hosts.push(host);
            }
        }
    }

    // Probing is the expensive, per-host step; running it once over the
    // union amortises it across every caller that shares mirror hosts.
    let ordered_hosts = fastest_mirror(config, &hosts).await?;

    for list in lists.iter_mut() {
        let mut remaining: Vec<MirrorEntry> = std::mem::take(list).into_entries();
        let mut reordered = Vec::with_capacity(remaining.len());

        for host in &ordered_hosts {
            if let Some(pos) = remaining.iter().position(|entry| &entry.host_only() == host) {
                reordered.push(remaining.remove(pos));
            }
        }
        // Mirrors whose host wasn't in the probed set, or later mirrors
        // sharing an already-ranked host, keep their original relative
        // order and go at the end.
        reordered.extend(remaining);

        *list = Mirrorlist::from_entries(reordered);
    }

    Ok(())
}
