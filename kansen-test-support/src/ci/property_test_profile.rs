//! Property-test run profile shared by every kansen proptest suite.
//!
//! Case counts and process forking can be raised in CI without editing the
//! suites themselves.

use std::env;

/// Environment variable overriding the number of cases per property.
pub const KANSEN_PBT_CASES_ENV_KEY: &str = "KANSEN_PBT_CASES";
/// Environment variable enabling forked proptest execution.
pub const KANSEN_PBT_FORK_ENV_KEY: &str = "KANSEN_PBT_FORK";

/// Resolved proptest settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Reads overrides from the environment, falling back to the given
    /// defaults when a variable is unset or malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use kansen_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(KANSEN_PBT_CASES_ENV_KEY, default_cases, parse_cases),
            fork: override_or(KANSEN_PBT_FORK_ENV_KEY, default_fork, parse_switch),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether cases run in forked subprocesses.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }
}

fn override_or<T>(key: &'static str, default: T, parse: fn(&str) -> Option<T>) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|| {
        tracing::warn!(env = key, raw = %raw, "ignoring malformed property-test override");
        default
    })
}

fn parse_cases(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|&cases| cases > 0)
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::single("1", Some(1))]
    #[case::padded(" 250 ", Some(250))]
    #[case::zero("0", None)]
    #[case::negative("-1", None)]
    #[case::text("many", None)]
    fn case_counts_must_be_positive_integers(#[case] raw: &str, #[case] expected: Option<u32>) {
        assert_eq!(parse_cases(raw), expected);
    }

    #[rstest]
    #[case("true", Some(true))]
    #[case("ON", Some(true))]
    #[case("1", Some(true))]
    #[case("no", Some(false))]
    #[case("Off", Some(false))]
    #[case("", None)]
    #[case("2", None)]
    fn switches_accept_common_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_switch(raw), expected);
    }

    #[test]
    fn unset_variables_use_defaults() {
        let key = "KANSEN_PBT_TEST_UNSET_SENTINEL";
        assert_eq!(override_or(key, 17_u32, parse_cases), 17);
    }
}
