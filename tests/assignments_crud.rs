#[cfg(test)]
mod tests {
    use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
    use parking_lot::{Mutex, MutexGuard};
    use studyflow::libs::storage::Storage;
    use studyflow::store::assignments::{
        reduce, upcoming, Assignment, AssignmentAction, AssignmentForm, AssignmentType, Assignments,
        Priority,
    };
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct AssignmentsTestContext {
        _temp_dir: TempDir,
        _guard: MutexGuard<'static, ()>,
    }

    impl AsyncTestContext for AssignmentsTestContext {
        async fn setup() -> Self {
            let guard = ENV_LOCK.lock();
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            AssignmentsTestContext {
                _temp_dir: temp_dir,
                _guard: guard,
            }
        }

        async fn teardown(self) {}
    }

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn form(title: &str, due_date: NaiveDateTime) -> AssignmentForm {
        AssignmentForm {
            title: title.to_string(),
            course_id: "c1".to_string(),
            due_date,
            kind: AssignmentType::Assignment,
            priority: Priority::Medium,
            description: String::new(),
        }
    }

    fn record(id: &str, due_date: NaiveDateTime, completed: bool) -> Assignment {
        Assignment {
            id: id.to_string(),
            title: format!("Assignment {}", id),
            course_id: "c1".to_string(),
            due_date,
            kind: AssignmentType::Assignment,
            priority: Priority::Medium,
            description: String::new(),
            completed,
            completed_date: None,
            created_at: dt(2024, 1, 1, 0, 0),
        }
    }

    #[test_context(AssignmentsTestContext)]
    #[tokio::test]
    async fn test_add_starts_incomplete(_ctx: &mut AssignmentsTestContext) {
        let storage = Storage::new();
        let mut assignments = Assignments::load(&storage).await;

        let added = assignments.add(form("Problem set 3", dt(2030, 5, 1, 23, 59)));
        assert!(!added.completed);
        assert_eq!(added.completed_date, None);
    }

    #[test_context(AssignmentsTestContext)]
    #[tokio::test]
    async fn test_toggle_sets_and_clears_completed_date(_ctx: &mut AssignmentsTestContext) {
        let storage = Storage::new();
        let mut assignments = Assignments::load(&storage).await;
        let added = assignments.add(form("Problem set 3", dt(2030, 5, 1, 23, 59)));

        assignments.toggle_complete(&added.id);
        let done = assignments.get(&added.id).unwrap();
        assert!(done.completed);
        assert!(done.completed_date.is_some());

        assignments.toggle_complete(&added.id);
        let undone = assignments.get(&added.id).unwrap();
        assert!(!undone.completed);
        assert_eq!(undone.completed_date, None);
    }

    #[test_context(AssignmentsTestContext)]
    #[tokio::test]
    async fn test_update_preserves_completion_state(_ctx: &mut AssignmentsTestContext) {
        let storage = Storage::new();
        let mut assignments = Assignments::load(&storage).await;
        let added = assignments.add(form("Problem set 3", dt(2030, 5, 1, 23, 59)));
        assignments.toggle_complete(&added.id);
        let completed_date = assignments.get(&added.id).unwrap().completed_date;

        let mut changed = form("Problem set 3 (revised)", dt(2030, 5, 2, 23, 59));
        changed.priority = Priority::High;
        assignments.update(&added.id, changed);

        let updated = assignments.get(&added.id).unwrap();
        assert_eq!(updated.title, "Problem set 3 (revised)");
        assert_eq!(updated.priority, Priority::High);
        assert!(updated.completed);
        assert_eq!(updated.completed_date, completed_date);
        assert_eq!(updated.created_at, added.created_at);
    }

    #[test_context(AssignmentsTestContext)]
    #[tokio::test]
    async fn test_update_unknown_id_changes_nothing(_ctx: &mut AssignmentsTestContext) {
        let storage = Storage::new();
        let mut assignments = Assignments::load(&storage).await;
        assignments.add(form("Problem set 3", dt(2030, 5, 1, 23, 59)));

        assignments.update("no-such-id", form("Phantom", dt(2030, 6, 1, 0, 0)));
        assert_eq!(assignments.all().len(), 1);
        assert_eq!(assignments.all()[0].title, "Problem set 3");
    }

    #[test_context(AssignmentsTestContext)]
    #[tokio::test]
    async fn test_by_course_and_delete(_ctx: &mut AssignmentsTestContext) {
        let storage = Storage::new();
        let mut assignments = Assignments::load(&storage).await;
        let first = assignments.add(form("Problem set 3", dt(2030, 5, 1, 23, 59)));
        let mut other = form("Lab report", dt(2030, 5, 2, 23, 59));
        other.course_id = "c2".to_string();
        assignments.add(other);

        assert_eq!(assignments.by_course("c1").len(), 1);
        assert_eq!(assignments.by_course("c2").len(), 1);

        assignments.delete(&first.id);
        assert!(assignments.by_course("c1").is_empty());
    }

    #[test_context(AssignmentsTestContext)]
    #[tokio::test]
    async fn test_completion_survives_reload(_ctx: &mut AssignmentsTestContext) {
        let storage = Storage::new();
        let mut assignments = Assignments::load(&storage).await;
        let added = assignments.add(form("Problem set 3", dt(2030, 5, 1, 23, 59)));
        assignments.toggle_complete(&added.id);
        assignments.flush().await;

        let reloaded = Assignments::load(&storage).await;
        let record = reloaded.get(&added.id).unwrap();
        assert!(record.completed);
        assert!(record.completed_date.is_some());
    }

    #[test]
    fn test_upcoming_filters_and_sorts() {
        let now = dt(2024, 6, 10, 12, 0);
        let state = vec![
            record("late", now - Duration::hours(1), false),
            record("far", dt(2024, 6, 20, 9, 0), false),
            record("done", dt(2024, 6, 12, 9, 0), true),
            record("soon", dt(2024, 6, 11, 9, 0), false),
        ];

        let result = upcoming(&state, now);
        let ids: Vec<&str> = result.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["soon", "far"]);
    }

    #[test]
    fn test_upcoming_is_stable_for_equal_due_dates() {
        let now = dt(2024, 6, 10, 12, 0);
        let due = dt(2024, 6, 11, 9, 0);
        let state = vec![record("a", due, false), record("b", due, false)];

        let result = upcoming(&state, now);
        let ids: Vec<&str> = result.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_toggle_only_touches_the_target() {
        let state = vec![
            record("a", dt(2030, 5, 1, 23, 59), false),
            record("b", dt(2030, 5, 2, 23, 59), false),
        ];
        let at = dt(2024, 6, 10, 12, 0);

        let state = reduce(
            state,
            AssignmentAction::ToggleComplete {
                id: "a".to_string(),
                at,
            },
        );
        assert!(state[0].completed);
        assert_eq!(state[0].completed_date, Some(at));
        assert!(!state[1].completed);
        assert_eq!(state[1].completed_date, None);
    }

    #[test_context(AssignmentsTestContext)]
    #[tokio::test]
    async fn test_toggle_uses_current_time(_ctx: &mut AssignmentsTestContext) {
        let storage = Storage::new();
        let mut assignments = Assignments::load(&storage).await;
        let added = assignments.add(form("Problem set 3", dt(2030, 5, 1, 23, 59)));

        let before = Local::now().naive_local();
        assignments.toggle_complete(&added.id);
        let after = Local::now().naive_local();

        let completed_date = assignments.get(&added.id).unwrap().completed_date.unwrap();
        assert!(completed_date >= before && completed_date <= after);
    }
}
