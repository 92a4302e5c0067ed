#[derive(Debug, Clone)]
pub enum Message {
    // === COURSE MESSAGES ===
    CourseAdded(String),
    CourseUpdated(String),
    CourseDeleted,
    CourseNotFound(String),
    NoCourses,

    // === ASSIGNMENT MESSAGES ===
    AssignmentAdded(String),
    AssignmentUpdated(String),
    AssignmentDeleted,
    AssignmentNotFound(String),
    AssignmentCompleted(String),
    AssignmentReopened(String),
    NoAssignments,
    NoUpcomingAssignments,

    // === SESSION MESSAGES ===
    SessionSaved(String), // formatted duration
    SessionDiscarded,
    SessionDeleted,
    SessionNotFound(String),
    NoSessions,

    // === TIMER MESSAGES ===
    TimerStarted(String),     // course name
    TimerStopped(String),     // formatted elapsed time
    ConfirmSaveSession,
    PromptSessionNotes,

    // === SETTINGS MESSAGES ===
    SettingsSaved,
    ThemeSwitched(String),
    NotificationToggled(String, bool),

    // === CALENDAR MESSAGES ===
    AgendaHeader(String),     // date
    NoAgendaEntries(String),  // date
    MarkedDatesCount(usize),

    // === STORAGE MESSAGES ===
    StorageLoadDegraded(String), // store key
    StorageWriteFailed(String),  // error detail
    DataCleared,
    ConfirmReset,
    ResetCancelled,
}
