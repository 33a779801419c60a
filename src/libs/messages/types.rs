#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigParseError,
    ConfigUserMissing,
    PromptUsername,
    PromptFullName,

    // === USER MESSAGES ===
    UserCreated(String),    // username
    UserWelcome(String),    // full name
    UserNotFound(String),   // username
    UsernameTaken(String),  // username

    // === RECORD MESSAGES ===
    RecordCreated,
    RecordUpdated,
    RecordDeleted,
    RecordNotFound(i64),
    RecordTitleEmpty,
    RecordsHeader,
    NoRecordsFound,
    NoRecordsMatching(String), // search term
    ConfirmDeleteRecord(String), // title
    NoChangesDetected,
    PromptRecordTitle,
    PromptRecordDescription,
    PromptRecordCategory,
    PromptRecordStatus,

    // === COMMENT MESSAGES ===
    CommentAdded,
    CommentUpdated,
    CommentDeleted,
    CommentNotFound(i64),
    CommentNotOwned,
    CommentContentEmpty,
    CommentsHeader(String), // record title
    NoCommentsFound,
    ConfirmDeleteComment,

    // === REPORT MESSAGES ===
    ReportHeader(String),    // username
    ReportGeneratedAt(String),
    RecentCommentsHeader,
    StatsUnavailable(String),      // error detail
    SectionSkipped(String, String), // section, reason
    UnclassifiedStatusWarning(i64), // count

    // === EXPORT MESSAGES ===
    ExportingReport(String, String), // format, username
    ExportCompleted(String),         // path
    ExportFailed(String),            // error detail
    PdfRenderFailed(String),         // error detail
}
