use std::path::PathBuf;

pub fn default_version() -> u32 {
    1
}

pub fn default_max_exact_matches() -> usize {
    2
}

pub fn default_max_similar_plans() -> usize {
    5
}

pub fn default_max_value_plans() -> usize {
    2
}

pub fn default_max_validity_multiple() -> Option<u32> {
    Some(4)
}

pub fn default_advisor_binary() -> PathBuf {
    // Check common install location first
    if let Some(home) = std::env::var_os("HOME") {
        let local_path = PathBuf::from(home).join(".claude/local/claude");
        if local_path.exists() {
            return local_path;
        }
    }
    // Fall back to PATH lookup
    PathBuf::from("claude")
}

pub fn default_advisor_model() -> String {
    "sonnet".to_string()
}

pub fn default_advisor_timeout_sec() -> u64 {
    30
}

pub fn default_max_attempts() -> u32 {
    3
}

pub fn default_delay_ms() -> u64 {
    1000
}
