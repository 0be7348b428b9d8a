use crate::{
    consts::{BASE_PAIR_PARAMETERS, BASE_STEP_PARAMETERS},
    error::{HelixError, HelixResult},
};

use std::fmt;

/// Whether a parameter is defined per base-pair or per base-step.
///
/// # Variants
///
/// - `BasePair`: one value per base-pair, positions `1..=N`
/// - `BaseStep`: one value per junction between base-pairs, positions `1..=N-1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    BasePair,
    BaseStep,
}

impl ParameterKind {
    /// Number of positions lost at the end of the chain for this kind.
    pub fn adjustment(self) -> i64 {
        match self {
            ParameterKind::BasePair => 0,
            ParameterKind::BaseStep => 1,
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterKind::BasePair => write!(f, "base-pair"),
            ParameterKind::BaseStep => write!(f, "base-step"),
        }
    }
}

/// Maps a parameter name onto its kind.
///
/// # Example
///
/// ```rust,ignore
/// use helixmd::parameter::{classify, ParameterKind};
///
/// assert_eq!(classify("twist").unwrap(), ParameterKind::BaseStep);
/// assert!(classify("writhe").is_err());
/// ```
pub fn classify(name: &str) -> HelixResult<ParameterKind> {
    if BASE_PAIR_PARAMETERS.iter().any(|(p, _)| *p == name) {
        Ok(ParameterKind::BasePair)
    } else if BASE_STEP_PARAMETERS.iter().any(|(p, _)| *p == name) {
        Ok(ParameterKind::BaseStep)
    } else {
        Err(HelixError::UnknownParameter {
            name: name.to_string(),
            accepted: accepted_parameters(),
        })
    }
}

/// Data column of a parameter in do_x3dna text output, `None` if the
/// parameter is unknown or only stored in HDF5 files.
pub fn column_of(name: &str) -> Option<usize> {
    BASE_PAIR_PARAMETERS
        .iter()
        .chain(BASE_STEP_PARAMETERS.iter())
        .find(|(p, _)| *p == name)
        .and_then(|(_, column)| *column)
}

/// Numbered list of every accepted name, base-pair parameters first.
pub fn accepted_parameters() -> String {
    BASE_PAIR_PARAMETERS
        .iter()
        .chain(BASE_STEP_PARAMETERS.iter())
        .enumerate()
        .map(|(idx, (name, _))| format!("{}. \"{}\"", idx + 1, name))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("shear", ParameterKind::BasePair)]
    #[case("propeller", ParameterKind::BasePair)]
    #[case("chi s-2", ParameterKind::BasePair)]
    #[case("helical axis curvature", ParameterKind::BasePair)]
    #[case("twist", ParameterKind::BaseStep)]
    #[case("h-rise", ParameterKind::BaseStep)]
    #[case("major groove refined", ParameterKind::BaseStep)]
    fn test_classify_known(#[case] name: &str, #[case] expected: ParameterKind) {
        assert_eq!(classify(name).unwrap(), expected);
    }

    #[rstest]
    #[case("writhe")]
    #[case("Twist")]
    #[case("")]
    fn test_classify_unknown(#[case] name: &str) {
        match classify(name) {
            Err(HelixError::UnknownParameter { name: got, accepted }) => {
                assert_eq!(got, name);
                assert!(accepted.starts_with("1. \"shear\""));
                assert!(accepted.ends_with("46. \"major groove refined\""));
            }
            other => panic!("expected UnknownParameter, got {:?}", other),
        }
    }

    #[rstest]
    fn test_adjustment() {
        assert_eq!(ParameterKind::BasePair.adjustment(), 0);
        assert_eq!(ParameterKind::BaseStep.adjustment(), 1);
    }

    #[rstest]
    fn test_column_of() {
        assert_eq!(column_of("roll"), Some(5));
        assert_eq!(column_of("zeta s-2"), Some(13));
        assert_eq!(column_of("helical axis tangent"), None);
        assert_eq!(column_of("writhe"), None);
    }
}
