//! Small name helpers shared by the registry and the UI.

/// Short display name of a scene path: `"|group1|pSphere1"` -> `"pSphere1"`.
pub fn short_name(path: &str) -> &str {
    path.rsplit('|').next().unwrap_or(path)
}

/// Generate a unique name by appending an incrementing `_N` suffix.
///
/// Returns `base` unchanged when it is already free.
pub fn unique_name(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    let mut counter = 1u32;
    loop {
        let candidate = format!("{}_{}", base, counter);
        if !taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("|group1|pSphere1"), "pSphere1");
        assert_eq!(short_name("pCube1"), "pCube1");
        assert_eq!(short_name(""), "");
    }

    #[test]
    fn test_unique_name() {
        let existing = ["NewSet", "NewSet_1"];
        let taken = |n: &str| existing.contains(&n);
        assert_eq!(unique_name("Other", taken), "Other");
        assert_eq!(unique_name("NewSet", taken), "NewSet_2");
    }
}
