//! # MSR Pipeline Live Test
//!
//! Runs the full cache-and-fetch pipeline against the real source APIs for
//! a single hard-coded user, using a throwaway data directory. This is a
//! manual diagnostic runner, not part of `cargo test`: it needs network
//! access and live, reachable endpoints.
//!
//! ```bash
//! cargo run -p project_tests --bin test_pipeline
//! ```

use std::collections::BTreeMap;

use anyhow::Result;

use lib_msr::{
    load_actions, summarize, ActivityClient, CacheStore, ReviewClient, SourceKind, SourcePairs,
    TimeWindow, ACTIVITY_API, REVIEW_API,
};

/// A user id known to the public endpoints; adjust when it goes stale.
const TEST_USER: &str = "jdoe";

fn aliases(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("--- MSR pipeline live test ---");

    let data_dir = tempfile::tempdir()?;
    println!("[1] data root: {}", data_dir.path().display());

    let window = TimeWindow::previous_month();
    println!("[2] window: {} .. {} ({} days)", window.start, window.end, window.span_days());

    let users: Vec<String> = vec![TEST_USER.to_string()];
    let store = CacheStore::new(vec![data_dir.path().to_string_lossy().into_owned()]);
    let activity = ActivityClient::new(ACTIVITY_API)?;
    let review = ReviewClient::new(REVIEW_API)?;

    let fields = aliases(&[("type", "record_type"), ("project", "module"), ("user", "gerrit_id")]);
    let gerrit = aliases(&[("subject", "subject"), ("project", "project"), ("user", "owner.gerrit_id")]);

    let mut actions = Vec::new();
    let mut wip = Vec::new();
    let mut pairs = SourcePairs::new(&store, &activity, &review, &window, &users);
    while let Some(pair) = pairs.next_pair().await {
        let (activity_path, review_path) = pair?;
        println!("[3] cached activity dataset: {}", activity_path.display());
        println!("[3] cached pending dataset:  {}", review_path.display());

        actions.extend(load_actions(&activity_path, &fields, SourceKind::Activity)?);
        wip.extend(load_actions(&review_path, &gerrit, SourceKind::PendingReview)?);
    }
    println!("[4] projected {} actions, {} pending items", actions.len(), wip.len());

    let summary = summarize(&actions, &wip);
    println!("[5] summary:");
    for (kind, count) in &summary {
        println!("      {kind}: {count}");
    }

    println!("--- pipeline live test finished ---");
    Ok(())
}
