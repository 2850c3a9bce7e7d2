//! Backend wire contract: endpoint paths and response normalization.

pub mod normalize;

/// Endpoint paths, relative to the configured base URL.
pub mod endpoints {
    pub const LOGIN: &str = "/login";
    pub const SIGNUP: &str = "/signup";
    pub const BEAT_THE_AI: &str = "/beat_the_ai";
    pub const CREATE_QUIZ_FROM_BANK: &str = "/create_quiz_from_bank";
    pub const FETCH_QUIZ_FOR_THEME: &str = "/fetch_quiz_for_theme";
    pub const SUBMIT_QUIZ: &str = "/submit_quiz";
    pub const VIEW_QUIZ_SCORE: &str = "/view_quiz_score";
    pub const VIEW_ATTEMPTED_QUIZ: &str = "/view_attempted_quiz";
    pub const VIEW_PROFILE: &str = "/view_profile";
    pub const EDIT_PROFILE: &str = "/edit_profile";
    pub const RECENT_QUIZZES: &str = "/recent_quizzes";
    pub const LEADERBOARD_THEME: &str = "/leaderboard_theme";
    pub const LEADERBOARD_OVERALL: &str = "/leaderboard_overall";
    pub const LEADERBOARD_DAILY: &str = "/leaderboard_daily";
    pub const GET_ALL_THEMES: &str = "/get_all_themes";
    pub const SUBMIT_FEEDBACK: &str = "/submit_feedback";
}

/// Themes offered when the backend has no theme list.
pub const DEFAULT_THEMES: [&str; 6] = [
    "general",
    "sports",
    "history",
    "science",
    "cricket",
    "programming",
];

/// Questions requested for a freshly created theme quiz.
pub const DEFAULT_QUESTION_COUNT: usize = 5;
