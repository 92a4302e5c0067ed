#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use parking_lot::{Mutex, MutexGuard};
    use studyflow::libs::storage::{Storage, COURSES_KEY};
    use studyflow::store::courses::{reduce, Course, CourseAction, CourseForm, CourseSchedule, Courses};
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct CoursesTestContext {
        _temp_dir: TempDir,
        _guard: MutexGuard<'static, ()>,
    }

    impl AsyncTestContext for CoursesTestContext {
        async fn setup() -> Self {
            let guard = ENV_LOCK.lock();
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            CoursesTestContext {
                _temp_dir: temp_dir,
                _guard: guard,
            }
        }

        async fn teardown(self) {}
    }

    fn form(name: &str, code: &str) -> CourseForm {
        CourseForm {
            name: name.to_string(),
            code: code.to_string(),
            instructor: "Dr. Chen".to_string(),
            location: "Hall B".to_string(),
            color: "#13A4EC".to_string(),
            schedule: vec![CourseSchedule {
                day: 1,
                start_time: "09:00".to_string(),
                end_time: "10:30".to_string(),
            }],
        }
    }

    #[test_context(CoursesTestContext)]
    #[tokio::test]
    async fn test_add_assigns_unique_ids(_ctx: &mut CoursesTestContext) {
        let storage = Storage::new();
        let mut courses = Courses::load(&storage).await;

        let mut ids = HashSet::new();
        for i in 0..20 {
            let course = courses.add(form(&format!("Course {}", i), "C100"));
            ids.insert(course.id.clone());
        }
        assert_eq!(ids.len(), 20);
    }

    #[test_context(CoursesTestContext)]
    #[tokio::test]
    async fn test_update_replaces_fields_and_keeps_identity(_ctx: &mut CoursesTestContext) {
        let storage = Storage::new();
        let mut courses = Courses::load(&storage).await;
        let added = courses.add(form("Linear Algebra", "MATH201"));

        let mut changed = form("Linear Algebra II", "MATH202");
        changed.location = "Hall C".to_string();
        courses.update(&added.id, changed);

        let updated = courses.get(&added.id).unwrap();
        assert_eq!(updated.name, "Linear Algebra II");
        assert_eq!(updated.code, "MATH202");
        assert_eq!(updated.location, "Hall C");
        assert_eq!(updated.id, added.id);
        assert_eq!(updated.created_at, added.created_at);
    }

    #[test_context(CoursesTestContext)]
    #[tokio::test]
    async fn test_update_unknown_id_changes_nothing(_ctx: &mut CoursesTestContext) {
        let storage = Storage::new();
        let mut courses = Courses::load(&storage).await;
        let added = courses.add(form("Linear Algebra", "MATH201"));

        courses.update("no-such-id", form("Phantom", "X000"));

        assert_eq!(courses.all().len(), 1);
        assert_eq!(courses.get(&added.id).unwrap().name, "Linear Algebra");
    }

    #[test_context(CoursesTestContext)]
    #[tokio::test]
    async fn test_delete_removes_only_the_target(_ctx: &mut CoursesTestContext) {
        let storage = Storage::new();
        let mut courses = Courses::load(&storage).await;
        let first = courses.add(form("Linear Algebra", "MATH201"));
        let second = courses.add(form("Organic Chemistry", "CHEM210"));

        courses.delete(&first.id);
        assert!(courses.get(&first.id).is_none());
        assert!(courses.get(&second.id).is_some());

        // Deleting an unknown id leaves the collection alone.
        courses.delete("no-such-id");
        assert_eq!(courses.all().len(), 1);
    }

    #[test_context(CoursesTestContext)]
    #[tokio::test]
    async fn test_changes_survive_reload(_ctx: &mut CoursesTestContext) {
        let storage = Storage::new();
        let mut courses = Courses::load(&storage).await;
        let added = courses.add(form("Linear Algebra", "MATH201"));
        courses.flush().await;

        let reloaded = Courses::load(&storage).await;
        assert!(!reloaded.load_failed());
        assert_eq!(reloaded.all().len(), 1);
        assert_eq!(reloaded.get(&added.id).unwrap().name, "Linear Algebra");
    }

    #[test_context(CoursesTestContext)]
    #[tokio::test]
    async fn test_load_never_writes_back(_ctx: &mut CoursesTestContext) {
        let storage = Storage::new();
        let mut courses = Courses::load(&storage).await;
        courses.flush().await;

        // No mutation happened, so no document may appear on disk.
        let on_disk: Option<Vec<Course>> = storage.load(COURSES_KEY).await.unwrap();
        assert!(on_disk.is_none());
    }

    #[test_context(CoursesTestContext)]
    #[tokio::test]
    async fn test_corrupt_document_degrades_to_empty(_ctx: &mut CoursesTestContext) {
        let storage = Storage::new();
        storage.save_raw(COURSES_KEY, "{ not valid").await.unwrap();

        let courses = Courses::load(&storage).await;
        assert!(courses.load_failed());
        assert!(courses.all().is_empty());

        // The broken document stays on disk untouched until a mutation.
        let raw: Result<Option<Vec<Course>>, _> = storage.load(COURSES_KEY).await;
        assert!(raw.is_err());
    }

    #[test_context(CoursesTestContext)]
    #[tokio::test]
    async fn test_failed_write_keeps_memory_and_sets_the_error_slot(_ctx: &mut CoursesTestContext) {
        let storage = Storage::new();
        let mut courses = Courses::load(&storage).await;

        // A directory where the document should go makes every write
        // fail while reads still resolve.
        let path = studyflow::libs::data_storage::DataStorage::new()
            .get_path("courses.json")
            .unwrap();
        std::fs::create_dir(&path).unwrap();

        let added = courses.add(form("Linear Algebra", "MATH201"));
        courses.flush().await;

        // The in-memory mutation stands and the failure is reported,
        // once.
        assert_eq!(courses.all().len(), 1);
        assert_eq!(courses.get(&added.id).unwrap().name, "Linear Algebra");
        assert!(courses.take_write_error().is_some());
        assert!(courses.take_write_error().is_none());
    }

    #[test]
    fn test_reducer_set_add_delete() {
        let base = vec![];
        let course = Course {
            id: "c1".to_string(),
            name: "Linear Algebra".to_string(),
            code: "MATH201".to_string(),
            instructor: String::new(),
            location: String::new(),
            color: "#13A4EC".to_string(),
            schedule: vec![],
            created_at: chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        };

        let state = reduce(base, CourseAction::Add(course.clone()));
        assert_eq!(state.len(), 1);

        let state = reduce(state, CourseAction::Set(vec![]));
        assert!(state.is_empty());

        let state = reduce(vec![course.clone()], CourseAction::Delete("c1".to_string()));
        assert!(state.is_empty());
    }
}
