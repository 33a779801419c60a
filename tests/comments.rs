#[cfg(test)]
mod tests {
    use rekod::db::comments::Comments;
    use rekod::libs::comment::Comment;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct CommentTestContext {
        _guard: MutexGuard<'static, ()>,
        _temp_dir: TempDir,
    }

    impl TestContext for CommentTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            CommentTestContext {
                _guard: guard,
                _temp_dir: temp_dir,
            }
        }
    }

    #[test_context(CommentTestContext)]
    #[test]
    fn test_insert_and_fetch_by_record(_ctx: &mut CommentTestContext) {
        let mut comments = Comments::new().unwrap();
        comments.insert(&Comment::new(1, 10, "first")).unwrap();
        comments.insert(&Comment::new(1, 11, "second")).unwrap();
        comments.insert(&Comment::new(2, 10, "elsewhere")).unwrap();

        let on_record = comments.fetch_by_record(1).unwrap();
        assert_eq!(on_record.len(), 2);
        // Newest first; same-second inserts fall back to id order.
        assert_eq!(on_record[0].content, "second");
        assert_eq!(on_record[1].content, "first");
    }

    #[test_context(CommentTestContext)]
    #[test]
    fn test_insert_rejects_empty_content(_ctx: &mut CommentTestContext) {
        let mut comments = Comments::new().unwrap();
        assert!(comments.insert(&Comment::new(1, 10, "  ")).is_err());
    }

    #[test_context(CommentTestContext)]
    #[test]
    fn test_update_refreshes_updated_at(_ctx: &mut CommentTestContext) {
        let mut comments = Comments::new().unwrap();
        let id = comments.insert(&Comment::new(1, 10, "draft")).unwrap();

        let before = comments.get(id).unwrap().unwrap();
        assert_eq!(before.created_at, before.updated_at);

        comments.update(id, 10, "final").unwrap();

        let after = comments.get(id).unwrap().unwrap();
        assert_eq!(after.content, "final");
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at >= after.created_at);
    }

    #[test_context(CommentTestContext)]
    #[test]
    fn test_update_requires_ownership(_ctx: &mut CommentTestContext) {
        let mut comments = Comments::new().unwrap();
        let id = comments.insert(&Comment::new(1, 10, "mine")).unwrap();

        assert!(comments.update(id, 99, "hijacked").is_err());
        assert_eq!(comments.get(id).unwrap().unwrap().content, "mine");
    }

    #[test_context(CommentTestContext)]
    #[test]
    fn test_delete_requires_ownership(_ctx: &mut CommentTestContext) {
        let mut comments = Comments::new().unwrap();
        let id = comments.insert(&Comment::new(1, 10, "mine")).unwrap();

        assert!(comments.delete(id, 99).is_err());
        comments.delete(id, 10).unwrap();
        assert!(comments.get(id).unwrap().is_none());
        assert!(comments.delete(id, 10).is_err());
    }

    #[test_context(CommentTestContext)]
    #[test]
    fn test_count_by_author(_ctx: &mut CommentTestContext) {
        let mut comments = Comments::new().unwrap();
        comments.insert(&Comment::new(1, 10, "a")).unwrap();
        comments.insert(&Comment::new(2, 10, "b")).unwrap();
        comments.insert(&Comment::new(1, 11, "c")).unwrap();

        assert_eq!(comments.count_by_author(10).unwrap(), 2);
        assert_eq!(comments.count_by_author(11).unwrap(), 1);
        assert_eq!(comments.count_by_author(12).unwrap(), 0);
    }

    #[test_context(CommentTestContext)]
    #[test]
    fn test_count_for_records_empty_set_short_circuits(_ctx: &mut CommentTestContext) {
        let mut comments = Comments::new().unwrap();
        comments.insert(&Comment::new(1, 10, "a")).unwrap();

        assert_eq!(comments.count_for_records(&[]).unwrap(), 0);
        assert_eq!(comments.count_for_records(&[1]).unwrap(), 1);
        assert_eq!(comments.count_for_records(&[1, 2, 3]).unwrap(), 1);
    }

    #[test_context(CommentTestContext)]
    #[test]
    fn test_top_commented_orders_by_count(_ctx: &mut CommentTestContext) {
        let mut comments = Comments::new().unwrap();
        for _ in 0..3 {
            comments.insert(&Comment::new(7, 10, "busy")).unwrap();
        }
        comments.insert(&Comment::new(8, 10, "quiet")).unwrap();

        let top = comments.top_commented(&[7, 8, 9], 5).unwrap();
        assert_eq!(top, vec![(7, 3), (8, 1)]);

        let capped = comments.top_commented(&[7, 8, 9], 1).unwrap();
        assert_eq!(capped, vec![(7, 3)]);

        assert!(comments.top_commented(&[], 5).unwrap().is_empty());
    }

    #[test_context(CommentTestContext)]
    #[test]
    fn test_fetch_recent_by_author_limit(_ctx: &mut CommentTestContext) {
        let mut comments = Comments::new().unwrap();
        for i in 1..=4 {
            comments.insert(&Comment::new(1, 10, &format!("comment {}", i))).unwrap();
        }

        let recent = comments.fetch_recent_by_author(10, 2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].content, "comment 4");
        assert_eq!(recent[1].content, "comment 3");
    }
}
