#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use serde_json::json;
    use parking_lot::{Mutex, MutexGuard};
    use studyflow::libs::storage::{revive_dates, Storage, ASSIGNMENTS_KEY, COURSES_KEY, SETTINGS_KEY};
    use studyflow::store::assignments::{Assignment, AssignmentType, Priority};
    use studyflow::store::courses::{Course, CourseSchedule};
    use studyflow::store::settings::UserSettings;
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};

    // The storage path comes from HOME, so tests in this binary must
    // not run concurrently.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct StorageTestContext {
        _temp_dir: TempDir,
        _guard: MutexGuard<'static, ()>,
    }

    impl AsyncTestContext for StorageTestContext {
        async fn setup() -> Self {
            let guard = ENV_LOCK.lock();
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            StorageTestContext {
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

    fn sample_course() -> Course {
        Course {
            id: "c1".to_string(),
            name: "Linear Algebra".to_string(),
            code: "MATH201".to_string(),
            instructor: "Dr. Chen".to_string(),
            location: "Hall B".to_string(),
            color: "#13A4EC".to_string(),
            schedule: vec![CourseSchedule {
                day: 1,
                start_time: "09:00".to_string(),
                end_time: "10:30".to_string(),
            }],
            created_at: dt(2024, 1, 15, 9, 0),
        }
    }

    #[test_context(StorageTestContext)]
    #[tokio::test]
    async fn test_round_trip_with_nested_dates(_ctx: &mut StorageTestContext) {
        let storage = Storage::new();
        let courses = vec![sample_course()];

        storage.save(COURSES_KEY, &courses).await.unwrap();
        let loaded: Vec<Course> = storage.load(COURSES_KEY).await.unwrap().unwrap();

        assert_eq!(loaded, courses);
        assert_eq!(loaded[0].created_at, dt(2024, 1, 15, 9, 0));
    }

    #[test_context(StorageTestContext)]
    #[tokio::test]
    async fn test_load_missing_returns_none(_ctx: &mut StorageTestContext) {
        let storage = Storage::new();
        let loaded: Option<Vec<Course>> = storage.load(COURSES_KEY).await.unwrap();
        assert!(loaded.is_none());
    }

    #[test_context(StorageTestContext)]
    #[tokio::test]
    async fn test_corrupt_document_is_an_error(_ctx: &mut StorageTestContext) {
        let storage = Storage::new();
        storage.save_raw(COURSES_KEY, "definitely not json").await.unwrap();

        let loaded: Result<Option<Vec<Course>>, _> = storage.load(COURSES_KEY).await;
        assert!(loaded.is_err());
    }

    #[test_context(StorageTestContext)]
    #[tokio::test]
    async fn test_revives_legacy_rfc3339_and_epoch_millis(_ctx: &mut StorageTestContext) {
        let storage = Storage::new();
        // A legacy document: RFC 3339 with a Z suffix, plus an
        // epoch-milliseconds number.
        let legacy = r#"[{
            "id": "a1",
            "title": "Problem set 3",
            "courseId": "c1",
            "dueDate": "2024-01-15T09:00:00.000Z",
            "type": "exam",
            "priority": "high",
            "description": "",
            "completed": false,
            "createdAt": 1704067200000
        }]"#;
        storage.save_raw(ASSIGNMENTS_KEY, legacy).await.unwrap();

        let loaded: Vec<Assignment> = storage.load(ASSIGNMENTS_KEY).await.unwrap().unwrap();
        assert_eq!(loaded[0].due_date, dt(2024, 1, 15, 9, 0));
        assert_eq!(loaded[0].created_at, dt(2024, 1, 1, 0, 0));
        assert_eq!(loaded[0].kind, AssignmentType::Exam);
        assert_eq!(loaded[0].priority, Priority::High);
        assert_eq!(loaded[0].completed_date, None);
    }

    #[test_context(StorageTestContext)]
    #[tokio::test]
    async fn test_remove_and_clear_all(_ctx: &mut StorageTestContext) {
        let storage = Storage::new();
        storage.save(COURSES_KEY, &vec![sample_course()]).await.unwrap();
        storage.save(SETTINGS_KEY, &UserSettings::default()).await.unwrap();

        storage.remove(COURSES_KEY).await.unwrap();
        let courses: Option<Vec<Course>> = storage.load(COURSES_KEY).await.unwrap();
        assert!(courses.is_none());

        // Removing an absent key stays silent.
        storage.remove(COURSES_KEY).await.unwrap();

        storage.clear_all().await.unwrap();
        let settings: Option<UserSettings> = storage.load(SETTINGS_KEY).await.unwrap();
        assert!(settings.is_none());
    }

    #[test]
    fn test_revival_is_by_field_name_at_any_depth() {
        let mut doc = json!({
            "outer": {
                "date": "2024-03-03T12:00:00.000Z",
                "items": [{ "startTime": 1704067200000i64 }]
            },
            "title": "2024-03-03T12:00:00.000Z"
        });
        revive_dates(&mut doc);

        assert_eq!(doc["outer"]["date"], "2024-03-03T12:00:00");
        assert_eq!(doc["outer"]["items"][0]["startTime"], "2024-01-01T00:00:00");
        // Fields outside the revival list stay untouched.
        assert_eq!(doc["title"], "2024-03-03T12:00:00.000Z");
    }
}
