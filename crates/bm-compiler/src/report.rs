//! Text rendering of merge results.
//!
//! The layout matches what DNS proxies consuming these lists expect: one
//! header block per source, count annotations as `#` comments, then one
//! name per line.

use crate::aggregator::SourceReport;
use crate::parser::TimeRestrictedList;

/// Render one source block.
pub fn render_source_block(report: &SourceReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n\n########## Blacklist from {} ##########\n\n", report.source));
    if report.ignored_duplicates > 0 {
        out.push_str(&format!("# Ignored duplicates: {}\n\n", report.ignored_duplicates));
    }
    if report.ignored_whitelisted > 0 {
        out.push_str(&format!("# Ignored entries due to the whitelist: {}\n\n", report.ignored_whitelisted));
    }
    if !report.names.is_empty() {
        out.push_str(&format!("# Blacklisted domains: {}\n\n", report.blacklisted()));
    }
    for name in &report.names {
        out.push_str(name);
        out.push('\n');
    }

    out
}

/// Render every source block in order.
pub fn render_blacklist(reports: &[SourceReport]) -> String {
    reports.iter().map(render_source_block).collect()
}

/// Render the time-based section. Empty when the list has no names.
pub fn render_time_restricted(list: &TimeRestrictedList) -> String {
    let mut out = String::new();
    if list.is_empty() {
        return out;
    }

    out.push_str("########## Time-based blacklist ##########\n\n");
    for name in &list.names {
        match list.label(name) {
            Some(label) => out.push_str(&format!("{}\t{}\n", name, label)),
            None => out.push_str(&format!(
                "# ignored: [{}] was in the time-restricted list, but without a time restriction label\n",
                name
            )),
        }
    }

    out
}
