use std::path::PathBuf;

pub const MEMBERS_FILE: &str = "members.json";
pub const ATTENDANCE_FILE: &str = "attendance.json";
pub const CONTRIBUTION_FILE: &str = "contribution.json";

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_STORE_PATH: &str = ".jiuzhou-prefs.json";

/// Key under which the language preference lives in the store.
pub const LANG_STORE_KEY: &str = "jiuzhou.lang";

/// Number of leading ranks flagged as "top" in a contribution season.
pub const TOP_N: usize = 3;

/// Floor applied to an attendance record's session count before dividing.
pub const MIN_SESSION_TOTAL: f64 = 1.0;

pub const DEFAULT_LOG_FILTER: &str = "jiuzhou_site=info";

pub fn data_dir_or_default(value: Option<PathBuf>) -> PathBuf {
    value
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

pub fn members_path(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join(MEMBERS_FILE)
}

pub fn attendance_path(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join(ATTENDANCE_FILE)
}

pub fn contribution_path(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join(CONTRIBUTION_FILE)
}
