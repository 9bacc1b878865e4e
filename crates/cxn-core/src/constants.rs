//! Shared constants for the construction annotator.

/// Separator between components of a construction form (`X+得+Y+死`).
pub const COMPONENT_SEPARATOR: char = '+';

/// Default upper bound on the length of a slot placeholder match.
pub const DEFAULT_WINDOW: usize = 3;

/// Default placeholder bound used by the regex-only matcher.
pub const DEFAULT_MATCHER_WINDOW: usize = 10;

/// Slot names that switch the policy scorer into clause-segment mode.
pub const COMPLEX_SLOT_NAMES: [&str; 3] = ["X", "Y", "Z"];

// ---- Feature weights ----

/// Initial `regex` weight of every feature.
pub const BASE_REGEX_WEIGHT: f64 = 1.0;

/// Weight added to `regex` for every match covering a position.
pub const REGEX_MATCH_BOOST: f64 = 0.5;

/// A `regex` weight of exactly one boost, the target of the negative-score penalty.
pub const SINGLE_MATCH_REGEX_WEIGHT: f64 = BASE_REGEX_WEIGHT + REGEX_MATCH_BOOST;

/// `regex` weight assigned when a single-boost position carries a negative score.
pub const PENALIZED_REGEX_WEIGHT: f64 = 0.5;

/// Initial `deriv` weight of every feature.
pub const BASE_DERIV_WEIGHT: f64 = 1.0;

/// `deriv` weight for retained growth-section characters with a positive score.
pub const DERIV_POSITIVE_WEIGHT: f64 = 1.2;

/// `deriv` weight for retained growth-section characters with a non-positive score.
pub const DERIV_NON_POSITIVE_WEIGHT: f64 = 0.2;

// ---- Policy weights ----

/// Policy key for constant steps.
pub const POLICY_CONSTANT: &str = "constant";

/// Policy key for variable steps.
pub const POLICY_VARIABLE: &str = "variable";

/// Policy key for steps outside the construction.
pub const POLICY_OTHERS: &str = "others";

/// Default cumulative-score weight of a constant step.
pub const DEFAULT_POLICY_CONSTANT: f64 = 1.0;

/// Default cumulative-score weight of a variable step.
pub const DEFAULT_POLICY_VARIABLE: f64 = 0.5;

/// Default cumulative-score weight of an others step.
pub const DEFAULT_POLICY_OTHERS: f64 = -0.5;

// ---- Models ----

/// Number of clusters the label resolver works with.
pub const CLUSTER_COUNT: usize = 3;

/// Default cap on the adaptive polynomial degree.
pub const DEFAULT_MAX_DEGREE: usize = 8;

/// Default seed for mixture-model initialisation.
pub const DEFAULT_CLUSTER_SEED: u64 = 42;

/// Default EM iteration cap.
pub const DEFAULT_CLUSTER_MAX_ITERATIONS: usize = 100;

/// Default EM convergence tolerance on the mean log-likelihood.
pub const DEFAULT_CLUSTER_TOLERANCE: f64 = 1e-6;

// ---- Segmentation ----

/// Default tag for characters the lexicon does not know.
pub const DEFAULT_UNKNOWN_TAG: &str = "x";

/// Tag for punctuation and other non-word characters.
pub const PUNCTUATION_TAG: &str = "w";

/// Tag for numerals.
pub const NUMERAL_TAG: &str = "m";

/// Tag for ASCII letters.
pub const LATIN_TAG: &str = "eng";
