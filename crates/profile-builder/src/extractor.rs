//! Keyword rules.

use serde_json::{Map, Value};

/// Extracted fields, keyed by field name.
pub type ProfileData = Map<String, Value>;

/// Key holding the unmodified input text.
pub const RAW_TEXT: &str = "raw_text";
/// Key for the detected job title.
pub const JOB_TITLE: &str = "job_title";
/// Key for the detected employer.
pub const EMPLOYER: &str = "employer";
/// Key for the detected start year (integer).
pub const START_YEAR: &str = "start_year";
/// Key for the worker name.
pub const NAME: &str = "name";

/// Name assigned to every extracted profile.
///
/// Names are not read from the transcript yet; every profile gets this value.
pub const PLACEHOLDER_NAME: &str = "Unnamed Worker";

/// Value a rule writes when it matches.
#[derive(Clone, Copy)]
enum RuleValue {
    Text(&'static str),
    Integer(i64),
}

impl RuleValue {
    fn to_json(self) -> Value {
        match self {
            RuleValue::Text(text) => Value::from(text),
            RuleValue::Integer(n) => Value::from(n),
        }
    }
}

/// A single substring rule: if any needle occurs, set `key` to `value`.
struct KeywordRule {
    needles: &'static [&'static str],
    key: &'static str,
    value: RuleValue,
}

const RULES: &[KeywordRule] = &[
    KeywordRule {
        needles: &["driver"],
        key: JOB_TITLE,
        value: RuleValue::Text("Driver"),
    },
    KeywordRule {
        needles: &["uber"],
        key: EMPLOYER,
        value: RuleValue::Text("Uber"),
    },
    KeywordRule {
        needles: &["since 2020", "2020"],
        key: START_YEAR,
        value: RuleValue::Integer(2020),
    },
];

/// Extract profile fields from a transcript.
///
/// The output always contains [`RAW_TEXT`] (the input, unmodified) and
/// [`NAME`] (set to [`PLACEHOLDER_NAME`]). [`JOB_TITLE`], [`EMPLOYER`] and
/// [`START_YEAR`] are present only when their keywords occur.
pub fn extract_profile_data(text: &str) -> ProfileData {
    let mut data = ProfileData::new();
    data.insert(RAW_TEXT.to_string(), Value::from(text));

    let lower = text.to_lowercase();
    for rule in RULES {
        if rule.needles.iter().any(|needle| lower.contains(needle)) {
            data.insert(rule.key.to_string(), rule.value.to_json());
        }
    }

    data.insert(NAME.to_string(), Value::from(PLACEHOLDER_NAME));

    tracing::debug!(
        fields = data.len(),
        text_len = text.len(),
        "Extracted profile data"
    );

    data
}
