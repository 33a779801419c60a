#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use rekod::db::comments::Comments;
    use rekod::db::records::Records;
    use rekod::db::users::Users;
    use rekod::libs::comment::Comment;
    use rekod::libs::record::Record;
    use rekod::libs::stats::StatsAggregator;
    use rekod::libs::user::User;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    // Tests in this binary share process environment; serialize them so
    // each one sees its own HOME-scoped database.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct StatsTestContext {
        _guard: MutexGuard<'static, ()>,
        _temp_dir: TempDir,
    }

    impl TestContext for StatsTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            StatsTestContext {
                _guard: guard,
                _temp_dir: temp_dir,
            }
        }
    }

    // Wednesday; week starts Monday 2025-06-16, month on 2025-06-01.
    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 18).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn ts(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn user(username: &str) -> User {
        Users::new().unwrap().get_or_create(username, "Test User").unwrap()
    }

    fn insert_record(user_id: i64, title: &str, category: &str, status: &str, created_at: NaiveDateTime) -> i64 {
        let mut record = Record::new(user_id, title, "", category);
        record.status = status.to_string();
        record.created_at = Some(created_at);
        Records::new().unwrap().insert(&record).unwrap()
    }

    fn aggregator() -> StatsAggregator {
        StatsAggregator::new(Records::new().unwrap(), Comments::new().unwrap())
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_zero_records_summary(_ctx: &mut StatsTestContext) {
        let owner = user("empty").id.unwrap();
        let summary = aggregator().compute_summary(owner, noon()).unwrap();

        assert_eq!(summary.total, 0);
        assert_eq!(summary.status_breakdown.active, 0);
        assert_eq!(summary.status_breakdown.inactive, 0);
        assert_eq!(summary.status_breakdown.completed, 0);
        assert_eq!(summary.unclassified_status, 0);
        assert!(summary.by_category.is_empty());
        assert_eq!(summary.time_stats.today, 0);
        assert_eq!(summary.time_stats.this_week, 0);
        assert_eq!(summary.time_stats.this_month, 0);
        assert!(summary.recent_activity.is_empty());
        assert!(summary.recent_records.is_empty());
        assert!(summary.oldest_records.is_empty());
        assert_eq!(summary.first_record_date, None);
        assert_eq!(summary.last_record_date, None);
        assert_eq!(summary.comments.total_comments, 0);
        assert_eq!(summary.comments.comments_on_my_records, 0);
        assert!(summary.comments.recent_comments.is_empty());
        assert!(summary.comments.top_commented_records.is_empty());
        assert_eq!(summary.generated_at, "2025-06-18 12:00:00");
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_status_and_category_breakdown(_ctx: &mut StatsTestContext) {
        // Three records created today: two Active (Work), one Completed
        // (Personal).
        let owner = user("alice").id.unwrap();
        insert_record(owner, "First", "Work", "Active", ts(2025, 6, 18, 9));
        insert_record(owner, "Second", "Work", "Active", ts(2025, 6, 18, 10));
        insert_record(owner, "Third", "Personal", "Completed", ts(2025, 6, 18, 11));

        let summary = aggregator().compute_summary(owner, noon()).unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.status_breakdown.active, 2);
        assert_eq!(summary.status_breakdown.completed, 1);
        assert_eq!(summary.status_breakdown.inactive, 0);
        assert_eq!(summary.unclassified_status, 0);
        assert_eq!(summary.by_category.get("Work"), Some(&2));
        assert_eq!(summary.by_category.get("Personal"), Some(&1));
        assert_eq!(summary.time_stats.today, 3);
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_unrecognized_status_excluded_from_breakdown(_ctx: &mut StatsTestContext) {
        let owner = user("alice").id.unwrap();
        insert_record(owner, "Normal", "Work", "Active", ts(2025, 6, 18, 9));
        insert_record(owner, "Odd", "Work", "Archived", ts(2025, 6, 18, 10));

        let summary = aggregator().compute_summary(owner, noon()).unwrap();

        // Independent counts: the odd row is in the total but in none of
        // the three buckets, and is surfaced as unclassified.
        assert_eq!(summary.total, 2);
        assert_eq!(summary.status_breakdown.active, 1);
        assert_eq!(summary.status_breakdown.inactive, 0);
        assert_eq!(summary.status_breakdown.completed, 0);
        assert_eq!(summary.unclassified_status, 1);
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_time_windows_are_monotonic_when_nested(_ctx: &mut StatsTestContext) {
        let owner = user("alice").id.unwrap();
        insert_record(owner, "Today", "Work", "Active", ts(2025, 6, 18, 9));
        insert_record(owner, "This week", "Work", "Active", ts(2025, 6, 17, 10));
        insert_record(owner, "This month", "Work", "Active", ts(2025, 6, 2, 10));
        insert_record(owner, "Last month", "Work", "Active", ts(2025, 5, 1, 10));

        let summary = aggregator().compute_summary(owner, noon()).unwrap();

        assert_eq!(summary.time_stats.today, 1);
        assert_eq!(summary.time_stats.this_week, 2);
        assert_eq!(summary.time_stats.this_month, 3);
        assert!(summary.time_stats.today <= summary.time_stats.this_week);
        assert!(summary.time_stats.this_week <= summary.time_stats.this_month);
        assert!(summary.time_stats.this_month <= summary.total);
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_activity_histogram_skips_empty_days(_ctx: &mut StatsTestContext) {
        let owner = user("alice").id.unwrap();
        insert_record(owner, "A", "Work", "Active", ts(2025, 6, 18, 9));
        insert_record(owner, "B", "Work", "Active", ts(2025, 6, 18, 10));
        insert_record(owner, "C", "Work", "Active", ts(2025, 6, 2, 10));
        // Outside the trailing 30 days.
        insert_record(owner, "Old", "Work", "Active", ts(2025, 5, 1, 10));

        let summary = aggregator().compute_summary(owner, noon()).unwrap();

        let days: Vec<(&String, &i64)> = summary.recent_activity.iter().collect();
        assert_eq!(days.len(), 2);
        assert_eq!(summary.recent_activity.get("2025-06-02"), Some(&1));
        assert_eq!(summary.recent_activity.get("2025-06-18"), Some(&2));
        assert_eq!(summary.recent_activity.get("2025-05-01"), None);
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_record_samples_and_date_range(_ctx: &mut StatsTestContext) {
        let owner = user("alice").id.unwrap();
        for day in 1..=7 {
            insert_record(owner, &format!("Record {}", day), "Work", "Active", ts(2025, 6, day, 9));
        }

        let summary = aggregator().compute_summary(owner, noon()).unwrap();

        assert_eq!(summary.recent_records.len(), 5);
        assert_eq!(summary.oldest_records.len(), 5);
        assert_eq!(summary.recent_records[0].title, "Record 7");
        assert_eq!(summary.oldest_records[0].title, "Record 1");
        assert_eq!(summary.first_record_date.as_deref(), Some("2025-06-01"));
        assert_eq!(summary.last_record_date.as_deref(), Some("2025-06-07"));
        assert_eq!(summary.recent_records[0].date, "2025-06-07 09:00:00");
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_idempotent_for_same_now(_ctx: &mut StatsTestContext) {
        let owner = user("alice").id.unwrap();
        let r1 = insert_record(owner, "One", "Work", "Active", ts(2025, 6, 18, 9));
        insert_record(owner, "Two", "Personal", "Completed", ts(2025, 6, 10, 9));
        let other = user("bob").id.unwrap();
        Comments::new()
            .unwrap()
            .insert(&Comment::new(r1, other, "a comment"))
            .unwrap();

        let mut aggregator = aggregator();
        let first = aggregator.compute_summary(owner, noon()).unwrap();
        let second = aggregator.compute_summary(owner, noon()).unwrap();

        assert_eq!(first, second);
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_comments_from_other_users_on_owned_records(_ctx: &mut StatsTestContext) {
        let owner = user("alice").id.unwrap();
        let other = user("bob").id.unwrap();
        let r1 = insert_record(owner, "First", "Work", "Active", ts(2025, 6, 17, 9));
        let r2 = insert_record(owner, "Second", "Work", "Active", ts(2025, 6, 17, 10));

        let mut comments = Comments::new().unwrap();
        comments.insert(&Comment::new(r1, other, "note on first")).unwrap();
        comments.insert(&Comment::new(r2, other, "note on second")).unwrap();

        let summary = aggregator().compute_summary(owner, noon()).unwrap();

        // The owner authored nothing, yet both comments land on owned
        // records regardless of author.
        assert_eq!(summary.comments.total_comments, 0);
        assert_eq!(summary.comments.comments_on_my_records, 2);
        assert!(summary.comments.recent_comments.is_empty());
        assert_eq!(summary.comments.top_commented_records.len(), 2);
        for top in &summary.comments.top_commented_records {
            assert_eq!(top.comment_count, 1);
        }
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_dangling_comment_reports_unknown_title(_ctx: &mut StatsTestContext) {
        let owner = user("alice").id.unwrap();
        let kept = insert_record(owner, "Kept", "Work", "Active", ts(2025, 6, 17, 9));
        let doomed = insert_record(owner, "Doomed", "Work", "Active", ts(2025, 6, 17, 10));

        let mut comments = Comments::new().unwrap();
        comments.insert(&Comment::new(kept, owner, "stays resolvable")).unwrap();
        comments.insert(&Comment::new(doomed, owner, "will dangle")).unwrap();

        // No cascade: deleting the record leaves its comment behind.
        Records::new().unwrap().delete(doomed).unwrap();

        let summary = aggregator().compute_summary(owner, noon()).unwrap();

        let titles: Vec<&str> = summary.comments.recent_comments.iter().map(|c| c.record_title.as_str()).collect();
        assert!(titles.contains(&"Kept"));
        assert!(titles.contains(&"Unknown"));

        // Unrelated record queries are unaffected by the dangling row.
        let remaining = Comments::new().unwrap().fetch_by_record(kept).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].content, "stays resolvable");
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_comment_content_preview_truncated(_ctx: &mut StatsTestContext) {
        let owner = user("alice").id.unwrap();
        let record_id = insert_record(owner, "Chatty", "Work", "Active", ts(2025, 6, 17, 9));

        let long_content = "x".repeat(60);
        Comments::new().unwrap().insert(&Comment::new(record_id, owner, &long_content)).unwrap();

        let summary = aggregator().compute_summary(owner, noon()).unwrap();

        assert_eq!(summary.comments.recent_comments.len(), 1);
        let preview = &summary.comments.recent_comments[0].content;
        assert_eq!(preview, &format!("{}...", "x".repeat(50)));
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_top_commented_sorted_and_capped(_ctx: &mut StatsTestContext) {
        let owner = user("alice").id.unwrap();
        let other = user("bob").id.unwrap();

        let mut comments = Comments::new().unwrap();
        for i in 1..=6 {
            let record_id = insert_record(owner, &format!("Record {}", i), "Work", "Active", ts(2025, 6, 10, 9));
            for _ in 0..i {
                comments.insert(&Comment::new(record_id, other, "ping")).unwrap();
            }
        }
        // A record nobody commented on must never appear in the list.
        insert_record(owner, "Silent", "Work", "Active", ts(2025, 6, 10, 10));

        let summary = aggregator().compute_summary(owner, noon()).unwrap();

        let top = &summary.comments.top_commented_records;
        assert_eq!(top.len(), 5);
        let counts: Vec<i64> = top.iter().map(|t| t.comment_count).collect();
        assert_eq!(counts, vec![6, 5, 4, 3, 2]);
        assert_eq!(top[0].record_title, "Record 6");
        assert!(top.iter().all(|t| t.comment_count > 0));
        assert!(top.iter().all(|t| t.record_title != "Silent"));
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_recent_comments_capped_and_newest_first(_ctx: &mut StatsTestContext) {
        let owner = user("alice").id.unwrap();
        let record_id = insert_record(owner, "Busy", "Work", "Active", ts(2025, 6, 10, 9));

        let mut comments = Comments::new().unwrap();
        for i in 1..=7 {
            comments.insert(&Comment::new(record_id, owner, &format!("comment {}", i))).unwrap();
        }

        let summary = aggregator().compute_summary(owner, noon()).unwrap();

        let recent = &summary.comments.recent_comments;
        assert_eq!(recent.len(), 5);
        // Same-second inserts fall back to id order, newest insert first.
        assert_eq!(recent[0].content, "comment 7");
        assert_eq!(recent[4].content, "comment 3");
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_owners_are_isolated(_ctx: &mut StatsTestContext) {
        let alice = user("alice").id.unwrap();
        let bob = user("bob").id.unwrap();
        insert_record(alice, "Hers", "Work", "Active", ts(2025, 6, 18, 9));
        insert_record(bob, "His", "Work", "Active", ts(2025, 6, 18, 9));

        let summary = aggregator().compute_summary(alice, noon()).unwrap();

        assert_eq!(summary.total, 1);
        assert_eq!(summary.recent_records[0].title, "Hers");
    }

    #[test_context(StatsTestContext)]
    #[test]
    fn test_thirty_day_window_is_relative_to_now(_ctx: &mut StatsTestContext) {
        let owner = user("alice").id.unwrap();
        let now = noon();
        // One hour inside the window, one hour outside it.
        insert_record(owner, "Inside", "Work", "Active", now - Duration::days(30) + Duration::hours(1));
        insert_record(owner, "Outside", "Work", "Active", now - Duration::days(30) - Duration::hours(1));

        let summary = aggregator().compute_summary(owner, now).unwrap();

        assert_eq!(summary.recent_activity.values().sum::<i64>(), 1);
    }
}
